// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Channel settings panel UI components.
//!
//! A modal form for editing one channel's name, limits, alarms, color
//! and sensor type.

use crate::message::Message;
use crate::state::SettingsDraft;
use crate::ui::theme::*;
use iced::widget::{button, checkbox, column, container, pick_list, row, text, text_input, Space};
use iced::{Alignment, Background, Border, Color, Element, Fill, Length, Theme};

/// Create the settings panel for an open draft.
pub fn settings_panel(draft: &SettingsDraft) -> Element<'_, Message> {
    // Header with channel name, card number and close button
    let header = row![
        text(&draft.title).size(18).color(TEXT),
        Space::new().width(SPACING_SMALL),
        text(format!("#{}", draft.display_number))
            .size(13)
            .color(TEXT_DIM),
        Space::new().width(Fill),
        button(text("\u{00D7}").size(18))
            .padding([2, 8])
            .style(|_theme: &Theme, status| {
                let is_hovered =
                    matches!(status, button::Status::Hovered | button::Status::Pressed);
                button::Style {
                    background: Some(Background::Color(if is_hovered {
                        SURFACE_LIGHT
                    } else {
                        Color::TRANSPARENT
                    })),
                    text_color: TEXT_DIM,
                    border: Border::default().rounded(BORDER_RADIUS_SMALL),
                    ..button::Style::default()
                }
            })
            .on_press(Message::SettingsClosed),
    ]
    .align_y(Alignment::Center);

    let divider = container(Space::new().height(1))
        .width(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(SURFACE_LIGHT)),
            ..container::Style::default()
        });

    // Name field
    let name_input = text_input("Channel name", &draft.name)
        .on_input(Message::SettingsNameChanged)
        .size(13)
        .style(field_style);

    // Limit fields
    let low_input = text_input("Low limit", &draft.low_limit)
        .on_input(Message::SettingsLowLimitChanged)
        .size(13)
        .style(field_style);
    let high_input = text_input("High limit", &draft.high_limit)
        .on_input(Message::SettingsHighLimitChanged)
        .size(13)
        .style(field_style);
    let limits_row = row![
        column![
            text("Min °").size(11).color(TEXT_DIM),
            low_input,
        ]
        .spacing(2),
        Space::new().width(SPACING),
        column![
            text("Max °").size(11).color(TEXT_DIM),
            high_input,
        ]
        .spacing(2),
    ];

    // Color picker
    let color_picker = column![
        text("Color").size(11).color(TEXT_DIM),
        pick_list(
            draft.colors.clone(),
            draft.color.clone(),
            Message::SettingsColorPicked,
        )
        .placeholder("Select...")
        .text_size(12)
        .padding([4, 8])
        .width(Length::Fill)
        .style(picker_style),
    ]
    .spacing(2);

    // Sensor picker, scoped to the channel's module
    let sensor_picker = column![
        text("Sensor type").size(11).color(TEXT_DIM),
        pick_list(
            draft.sensors.clone(),
            draft.sensor.clone(),
            Message::SettingsSensorPicked,
        )
        .placeholder("Select...")
        .text_size(12)
        .padding([4, 8])
        .width(Length::Fill)
        .style(picker_style),
    ]
    .spacing(2);

    // Alarm toggles
    let low_alarm = row![
        checkbox(draft.alarm_low)
            .on_toggle(Message::SettingsAlarmLowToggled)
            .size(14),
        Space::new().width(SPACING_SMALL),
        text("Low temperature alarm").size(12).color(TEXT_DIM),
    ]
    .align_y(Alignment::Center);
    let high_alarm = row![
        checkbox(draft.alarm_high)
            .on_toggle(Message::SettingsAlarmHighToggled)
            .size(14),
        Space::new().width(SPACING_SMALL),
        text("High temperature alarm").size(12).color(TEXT_DIM),
    ]
    .align_y(Alignment::Center);

    // Validation / save error
    let error_text: Element<Message> = if let Some(ref err) = draft.error {
        text(err.clone()).size(11).color(DANGER).into()
    } else {
        Space::new().height(0).into()
    };

    // Action buttons
    let cancel_button = button(text("Cancel").size(13))
        .padding([6, 14])
        .style(|_theme: &Theme, status| {
            let is_hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            button::Style {
                background: Some(Background::Color(if is_hovered {
                    SURFACE_LIGHT
                } else {
                    SURFACE
                })),
                text_color: TEXT,
                border: standard_border(),
                ..button::Style::default()
            }
        })
        .on_press(Message::SettingsClosed);

    let save_label = if draft.saving { "Saving..." } else { "Save" };
    let save_button = button(text(save_label).size(13))
        .padding([6, 14])
        .style(move |_theme: &Theme, _status| button::Style {
            background: Some(Background::Color(PRIMARY)),
            text_color: BACKGROUND,
            border: Border::default().rounded(BORDER_RADIUS),
            ..button::Style::default()
        })
        .on_press_maybe(if draft.saving {
            None
        } else {
            Some(Message::SettingsSaveRequested)
        });

    let buttons_row = row![
        Space::new().width(Fill),
        cancel_button,
        Space::new().width(SPACING),
        save_button,
    ]
    .align_y(Alignment::Center);

    let content = column![
        header,
        Space::new().height(SPACING_SMALL),
        divider,
        Space::new().height(SPACING),
        column![text("Name").size(11).color(TEXT_DIM), name_input].spacing(2),
        Space::new().height(SPACING),
        limits_row,
        Space::new().height(SPACING),
        color_picker,
        Space::new().height(SPACING),
        sensor_picker,
        Space::new().height(SPACING),
        low_alarm,
        Space::new().height(SPACING_SMALL),
        high_alarm,
        Space::new().height(SPACING),
        error_text,
        Space::new().height(SPACING_SMALL),
        buttons_row,
    ]
    .padding(PADDING);

    panel_container(content.into())
}

/// Create the placeholder panel shown while the settings fetch chain is
/// in flight.
pub fn loading_panel<'a>(display_number: usize) -> Element<'a, Message> {
    let content = column![
        text(format!("Channel #{display_number}")).size(18).color(TEXT),
        Space::new().height(SPACING),
        text("Loading...").size(13).color(TEXT_DIM),
    ]
    .padding(PADDING)
    .align_x(Alignment::Center);

    panel_container(content.into())
}

fn panel_container(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .width(Length::Fixed(SETTINGS_PANEL_WIDTH))
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(BACKGROUND)),
            border: Border::default()
                .rounded(BORDER_RADIUS)
                .color(PRIMARY)
                .width(2.0),
            shadow: iced::Shadow {
                color: Color {
                    a: 0.4,
                    ..Color::BLACK
                },
                offset: iced::Vector::new(0.0, 8.0),
                blur_radius: 24.0,
            },
            ..container::Style::default()
        })
        .into()
}

fn field_style(_theme: &Theme, _status: text_input::Status) -> text_input::Style {
    text_input::Style {
        background: Background::Color(SURFACE),
        border: Border::default()
            .rounded(BORDER_RADIUS_SMALL)
            .color(SURFACE_LIGHT)
            .width(1.0),
        icon: TEXT,
        placeholder: TEXT_DIM,
        value: TEXT,
        selection: PRIMARY,
    }
}

fn picker_style(_theme: &Theme, _status: pick_list::Status) -> pick_list::Style {
    pick_list::Style {
        text_color: TEXT,
        placeholder_color: TEXT_DIM,
        handle_color: TEXT_DIM,
        background: Background::Color(SURFACE),
        border: Border::default()
            .rounded(BORDER_RADIUS_SMALL)
            .color(SURFACE_LIGHT)
            .width(1.0),
    }
}
