// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Iced Application implementation for Emberwatch.

use crate::api::DeviceClient;
use crate::config::AppConfig;
use crate::message::Message;
use crate::state::{AppState, SaveOutcome, SettingsPanel, UpdatePhase};
use crate::ui::theme::{self, *};
use crate::ui::{channel_card, loading_panel, settings_panel};
use iced::widget::{
    column, container, mouse_area, opaque, row, scrollable, stack, text, Space,
};
use iced::{Alignment, Background, Color, Element, Fill, Subscription, Task, Theme};
use std::time::Duration;
use tracing::{error, info, warn};

/// Main application.
pub struct Emberwatch {
    /// Application state.
    state: AppState,
    /// Device API client. None when client construction failed at startup.
    client: Option<DeviceClient>,
    /// Poll interval for the tick subscription.
    poll_interval: Duration,
}

impl Emberwatch {
    /// Create a new application instance.
    ///
    /// Kicks off an immediate system and channel fetch so the first paint
    /// does not wait a full poll interval.
    pub fn new(config: AppConfig) -> (Self, Task<Message>) {
        let state = AppState::new();
        let poll_interval = Duration::from_millis(config.device.poll_interval_ms.max(100));

        let client = match DeviceClient::new(&config.device) {
            Ok(client) => {
                info!("Device client ready for {}", config.device.base_url);
                Some(client)
            }
            Err(e) => {
                error!("Failed to build device client: {}", e);
                None
            }
        };

        let startup = match &client {
            Some(client) => {
                let system_client = client.clone();
                let channels_client = client.clone();
                Task::batch([
                    Task::perform(
                        async move { system_client.system().await },
                        Message::SystemFetched,
                    ),
                    Task::perform(
                        async move { channels_client.channels().await },
                        Message::ChannelsFetched,
                    ),
                ])
            }
            None => Task::none(),
        };

        let app = Self {
            state,
            client,
            poll_interval,
        };

        (app, startup)
    }

    /// Handle messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ==================== Polling ====================
            Message::Tick => {
                // While a firmware update runs, ticks only watch for it to
                // finish; channel polling resumes afterwards.
                return match self.state.update_phase {
                    UpdatePhase::Normal => self.fetch_channels(),
                    UpdatePhase::Updating => self.fetch_system(),
                };
            }
            Message::ChannelsFetched(Ok(map)) => {
                self.state.apply_channels(map);
            }
            Message::ChannelsFetched(Err(e)) => {
                // Dropped; the next tick retries with the last good list
                // still on screen.
                warn!("Channel fetch failed: {}", e);
                self.state.channel_fetch_failed(&e);
            }
            Message::SystemFetched(Ok(info)) => {
                let was_updating = self.state.update_phase == UpdatePhase::Updating;
                self.state.apply_system(info);
                if was_updating && self.state.update_phase == UpdatePhase::Normal {
                    info!("Firmware update finished, resuming channel polling");
                    return self.fetch_channels();
                }
            }
            Message::SystemFetched(Err(e)) => {
                warn!("System info fetch failed: {}", e);
            }

            // ==================== Channel Cards ====================
            Message::CardPressed(display_number) => {
                let Some(client) = self.client.clone() else {
                    return Task::none();
                };
                let epoch = self.state.begin_settings_load(display_number);
                return Task::perform(
                    async move { client.channel_settings(display_number).await },
                    move |result| Message::SettingsLoaded(epoch, result),
                );
            }

            // ==================== Settings Panel ====================
            Message::SettingsLoaded(epoch, result) => {
                self.state.apply_settings_loaded(epoch, result);
            }
            Message::SettingsNameChanged(name) => {
                if let Some(draft) = self.state.draft_mut() {
                    draft.name = name;
                }
            }
            Message::SettingsLowLimitChanged(value) => {
                if let Some(draft) = self.state.draft_mut() {
                    draft.low_limit = value;
                }
            }
            Message::SettingsHighLimitChanged(value) => {
                if let Some(draft) = self.state.draft_mut() {
                    draft.high_limit = value;
                }
            }
            Message::SettingsColorPicked(color) => {
                if let Some(draft) = self.state.draft_mut() {
                    draft.color = Some(color);
                }
            }
            Message::SettingsSensorPicked(sensor) => {
                if let Some(draft) = self.state.draft_mut() {
                    draft.sensor = Some(sensor);
                }
            }
            Message::SettingsAlarmLowToggled(enabled) => {
                if let Some(draft) = self.state.draft_mut() {
                    draft.alarm_low = enabled;
                }
            }
            Message::SettingsAlarmHighToggled(enabled) => {
                if let Some(draft) = self.state.draft_mut() {
                    draft.alarm_high = enabled;
                }
            }
            Message::SettingsSaveRequested => {
                let epoch = self.state.settings_epoch();
                let Some(client) = self.client.clone() else {
                    return Task::none();
                };
                let Some(draft) = self.state.draft_mut() else {
                    return Task::none();
                };
                match draft.to_update() {
                    Ok(update) => {
                        draft.error = None;
                        draft.saving = true;
                        let module_id = draft.module_id;
                        let channel_id = draft.channel_id;
                        return Task::perform(
                            async move {
                                client
                                    .save_channel_config(module_id, channel_id, &update)
                                    .await
                            },
                            move |result| Message::SettingsSaved(epoch, result),
                        );
                    }
                    Err(message) => {
                        draft.error = Some(message);
                    }
                }
            }
            Message::SettingsSaved(epoch, result) => {
                if let Err(ref e) = result {
                    warn!("Channel config save failed: {}", e);
                }
                if self.state.apply_settings_saved(epoch, result) == SaveOutcome::Saved {
                    // Refresh immediately so the card reflects the new
                    // settings before the next tick.
                    return self.fetch_channels();
                }
            }
            Message::SettingsClosed => {
                self.state.close_settings();
            }
        }

        Task::none()
    }

    fn fetch_channels(&self) -> Task<Message> {
        match self.client.clone() {
            Some(client) => Task::perform(
                async move { client.channels().await },
                Message::ChannelsFetched,
            ),
            None => Task::none(),
        }
    }

    fn fetch_system(&self) -> Task<Message> {
        match self.client.clone() {
            Some(client) => Task::perform(
                async move { client.system().await },
                Message::SystemFetched,
            ),
            None => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_header(),
            Space::new().height(SPACING),
            self.view_channel_cards(),
            Space::new().height(SPACING),
            self.view_footer(),
        ]
        .padding(PADDING);

        let main_content: Element<Message> = container(content)
            .width(Fill)
            .height(Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(BACKGROUND)),
                ..container::Style::default()
            })
            .into();

        // Settings panel floats over a dimmed backdrop; clicking the
        // backdrop closes it.
        let panel: Option<Element<Message>> = match &self.state.settings {
            SettingsPanel::Closed => None,
            SettingsPanel::Loading { display_number, .. } => {
                Some(loading_panel(*display_number))
            }
            SettingsPanel::Open(draft) => Some(settings_panel(draft)),
        };

        match panel {
            Some(panel) => {
                let backdrop = mouse_area(
                    container(Space::new().width(Fill).height(Fill))
                        .width(Fill)
                        .height(Fill)
                        .style(|_| container::Style {
                            background: Some(Background::Color(Color {
                                a: 0.5,
                                ..Color::BLACK
                            })),
                            ..container::Style::default()
                        }),
                )
                .on_press(Message::SettingsClosed);

                let centered_panel = container(panel)
                    .width(Fill)
                    .height(Fill)
                    .center_x(Fill)
                    .center_y(Fill);

                stack![main_content, backdrop, opaque(centered_panel)].into()
            }
            None => main_content,
        }
    }

    /// View the header bar.
    fn view_header(&self) -> Element<'_, Message> {
        let title = text("Emberwatch").size(20).color(TEXT);

        let status = if self.state.connected {
            text("Connected").size(12).color(SUCCESS)
        } else {
            text("Disconnected").size(12).color(TEXT_DIM)
        };

        let device_text: Element<Message> = match &self.state.system {
            Some(info) => {
                let host = info.host.as_deref().unwrap_or("unknown host");
                let version = info.software_version.as_deref().unwrap_or("?");
                text(format!("{} · v{}", host, version))
                    .size(12)
                    .color(TEXT_DIM)
                    .into()
            }
            None => Space::new().width(0).into(),
        };

        row![
            title,
            Space::new().width(SPACING),
            status,
            Space::new().width(Fill),
            device_text,
        ]
        .align_y(Alignment::Center)
        .into()
    }

    /// View the channel card row.
    fn view_channel_cards(&self) -> Element<'_, Message> {
        if self.state.update_phase == UpdatePhase::Updating {
            // Last-known cards stay up, dimmed behind the banner text.
            return column![
                text("Firmware update in progress...").size(16).color(WARNING),
                Space::new().height(SPACING),
                self.cards_row(),
            ]
            .into();
        }

        if self.state.channels.is_empty() {
            let hint = if self.state.connected {
                "No channels reported by the device."
            } else {
                "Waiting for the device..."
            };
            return container(text(hint).size(14).color(TEXT_DIM))
                .center_x(Fill)
                .padding(PADDING)
                .into();
        }

        self.cards_row()
    }

    fn cards_row(&self) -> Element<'_, Message> {
        let cards: Vec<Element<Message>> = self
            .state
            .channels
            .iter()
            .enumerate()
            .map(|(i, entry)| channel_card(entry, i + 1))
            .collect();

        scrollable(row(cards).spacing(SPACING).align_y(Alignment::Start))
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::default(),
            ))
            .into()
    }

    /// View the footer with the last error, if any.
    fn view_footer(&self) -> Element<'_, Message> {
        let error_text: Element<Message> = if let Some(ref err) = self.state.last_error {
            text(format!("Error: {}", err)).size(11).color(DANGER).into()
        } else {
            Space::new().width(0).into()
        };

        row![Space::new().width(Fill), error_text]
            .align_y(Alignment::Center)
            .into()
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        theme::emberwatch_theme()
    }

    /// Subscription for the poll tick.
    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(self.poll_interval).map(|_| Message::Tick)
    }
}
