// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Application state management.

use crate::api::{
    flatten_channels, ApiError, ChannelConfigUpdate, ChannelEntry, ChannelMap, ChannelSettings,
    ColorOption, SystemInfo,
};
use tracing::debug;

/// How a channel's current reading relates to its alert limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// Sensor off (no value).
    Off,
    /// Below the low limit.
    Low,
    /// Within limits.
    Ok,
    /// Above the high limit.
    High,
}

impl Reading {
    /// Classify a reading against its limits.
    ///
    /// Comparisons are strict, matching the device's own front end: a value
    /// equal to a limit is in range. The alert-enabled flags are deliberately
    /// not consulted here; card coloring always reflects the limits.
    pub fn classify(value: Option<f64>, low_limit: f64, high_limit: f64) -> Self {
        match value {
            None => Reading::Off,
            Some(v) if v < low_limit => Reading::Low,
            Some(v) if v > high_limit => Reading::High,
            Some(_) => Reading::Ok,
        }
    }

    /// Whether the reading is outside its limits (rendered bold).
    pub fn is_out_of_range(self) -> bool {
        matches!(self, Reading::Low | Reading::High)
    }
}

/// Format a reading for the card: one decimal with a degree sign, or "OFF".
pub fn format_reading(value: Option<f64>) -> String {
    match value {
        None => "OFF".to_string(),
        Some(v) => format!("{v:.1}°"),
    }
}

/// Whether the poller is in its normal cycle or tracking a firmware update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePhase {
    #[default]
    Normal,
    /// A firmware update is in progress; ticks check update status instead
    /// of refreshing channels.
    Updating,
}

/// Settings panel lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SettingsPanel {
    #[default]
    Closed,
    /// The fetch chain for one card press is in flight.
    Loading { epoch: u64, display_number: usize },
    Open(SettingsDraft),
}

/// Editable copy of one channel's settings, captured from a single
/// snapshot when the panel opened.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDraft {
    pub display_number: usize,
    pub module_id: u64,
    pub channel_id: u64,
    /// Header title: the channel name at the time the panel opened.
    pub title: String,
    pub name: String,
    /// Limit fields are kept as text while editing; parsed on save.
    pub low_limit: String,
    pub high_limit: String,
    pub alarm_low: bool,
    pub alarm_high: bool,
    pub color: Option<ColorOption>,
    pub colors: Vec<ColorOption>,
    pub sensor: Option<String>,
    pub sensors: Vec<String>,
    /// Validation or save error shown in the panel.
    pub error: Option<String>,
    pub saving: bool,
}

impl SettingsDraft {
    /// Build the draft from a settings snapshot.
    ///
    /// The selected color is matched by palette key and the sensor by name;
    /// a channel value not present in the fetched options leaves the
    /// selector empty, exactly as the device's own UI behaves.
    pub fn from_settings(settings: ChannelSettings) -> Self {
        let ChannelSettings {
            display_number,
            module_id,
            channel_id,
            channel,
            colors,
            sensors,
        } = settings;

        let color = colors
            .iter()
            .find(|c| c.hex.eq_ignore_ascii_case(&channel.color))
            .cloned();
        let sensor = channel
            .sensor_type
            .as_ref()
            .and_then(|st| sensors.iter().find(|s| *s == st).cloned());

        Self {
            display_number,
            module_id,
            channel_id,
            title: channel.name.clone(),
            name: channel.name,
            low_limit: format!("{}", channel.alert_low_limit),
            high_limit: format!("{}", channel.alert_high_limit),
            alarm_low: channel.alert_low_enabled,
            alarm_high: channel.alert_high_enabled,
            color,
            colors,
            sensor,
            sensors,
            error: None,
            saving: false,
        }
    }

    /// Validate the draft and produce the config update to POST.
    pub fn to_update(&self) -> Result<ChannelConfigUpdate, String> {
        let low = self
            .low_limit
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid low limit: \"{}\"", self.low_limit))?;
        let high = self
            .high_limit
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid high limit: \"{}\"", self.high_limit))?;

        Ok(ChannelConfigUpdate {
            name: self.name.trim().to_string(),
            sensor_type: self.sensor.clone(),
            color: self.color.as_ref().map(|c| c.hex.clone()),
            alert_low_limit: low,
            alert_high_limit: high,
            alert_low_enabled: self.alarm_low,
            alert_high_enabled: self.alarm_high,
        })
    }
}

/// Outcome of a save response against the current panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saved; the panel was closed and the channel list should refresh.
    Saved,
    /// Save failed; the panel stays open showing the error.
    Failed,
    /// The response belonged to a superseded panel and was dropped.
    Stale,
}

/// Top-level application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Channels in display order; position is identity.
    pub channels: Vec<ChannelEntry>,
    pub system: Option<SystemInfo>,
    pub update_phase: UpdatePhase,
    pub settings: SettingsPanel,
    /// Bumped on every settings open; responses carrying an older epoch
    /// are stale and dropped.
    settings_epoch: u64,
    /// Whether the last channel fetch succeeded.
    pub connected: bool,
    /// Most recent recoverable error, shown in the footer.
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the channel list with a fresh snapshot. Every card repaints
    /// from this on the next frame.
    pub fn apply_channels(&mut self, map: ChannelMap) {
        self.channels = flatten_channels(map);
        self.connected = true;
        self.last_error = None;
    }

    /// Record a failed channel fetch; the displayed list stays untouched.
    pub fn channel_fetch_failed(&mut self, error: &ApiError) {
        self.connected = false;
        self.last_error = Some(error.to_string());
    }

    /// Apply fresh system information, entering or leaving update tracking.
    pub fn apply_system(&mut self, info: SystemInfo) {
        self.update_phase = if info.update_in_progress {
            UpdatePhase::Updating
        } else {
            UpdatePhase::Normal
        };
        self.system = Some(info);
    }

    /// Start loading settings for a card press. Returns the epoch the
    /// eventual response must carry to be accepted.
    pub fn begin_settings_load(&mut self, display_number: usize) -> u64 {
        self.settings_epoch += 1;
        self.settings = SettingsPanel::Loading {
            epoch: self.settings_epoch,
            display_number,
        };
        self.settings_epoch
    }

    /// Apply the result of a settings fetch chain. Returns false if the
    /// response was stale (panel closed or reopened meanwhile).
    pub fn apply_settings_loaded(
        &mut self,
        epoch: u64,
        result: Result<ChannelSettings, ApiError>,
    ) -> bool {
        match self.settings {
            SettingsPanel::Loading { epoch: current, .. } if current == epoch => {}
            _ => {
                debug!("Dropping stale settings response (epoch {})", epoch);
                return false;
            }
        }

        match result {
            Ok(settings) => {
                self.settings = SettingsPanel::Open(SettingsDraft::from_settings(settings));
            }
            Err(e) => {
                self.settings = SettingsPanel::Closed;
                self.last_error = Some(e.to_string());
            }
        }
        true
    }

    /// Apply the result of a save request.
    pub fn apply_settings_saved(&mut self, epoch: u64, result: Result<(), ApiError>) -> SaveOutcome {
        if epoch != self.settings_epoch || !matches!(self.settings, SettingsPanel::Open(_)) {
            debug!("Dropping stale save response (epoch {})", epoch);
            return SaveOutcome::Stale;
        }

        match result {
            Ok(()) => {
                self.settings = SettingsPanel::Closed;
                SaveOutcome::Saved
            }
            Err(e) => {
                if let SettingsPanel::Open(draft) = &mut self.settings {
                    draft.saving = false;
                    draft.error = Some(e.to_string());
                }
                SaveOutcome::Failed
            }
        }
    }

    pub fn close_settings(&mut self) {
        self.settings = SettingsPanel::Closed;
    }

    /// The epoch of the currently open or loading panel.
    pub fn settings_epoch(&self) -> u64 {
        self.settings_epoch
    }

    /// Mutable access to the open draft, if any.
    pub fn draft_mut(&mut self) -> Option<&mut SettingsDraft> {
        match &mut self.settings {
            SettingsPanel::Open(draft) => Some(draft),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Channel;
    use std::collections::BTreeMap;

    fn channel(name: &str, value: Option<f64>, low: f64, high: f64) -> Channel {
        Channel {
            name: name.to_string(),
            color: "#0000ff".to_string(),
            value,
            alert_low_limit: low,
            alert_high_limit: high,
            alert_low_enabled: false,
            alert_high_enabled: false,
            sensor_type: Some("Maverick".to_string()),
        }
    }

    fn map_of(modules: Vec<(u64, Vec<(u64, Channel)>)>) -> ChannelMap {
        modules
            .into_iter()
            .map(|(m, chs)| (m, chs.into_iter().collect::<BTreeMap<_, _>>()))
            .collect()
    }

    #[test]
    fn test_classify_off_regardless_of_limits() {
        assert_eq!(Reading::classify(None, 50.0, 90.0), Reading::Off);
        assert_eq!(Reading::classify(None, -10.0, -5.0), Reading::Off);
    }

    #[test]
    fn test_classify_boundaries_are_in_range() {
        assert_eq!(Reading::classify(Some(49.9), 50.0, 90.0), Reading::Low);
        assert_eq!(Reading::classify(Some(50.0), 50.0, 90.0), Reading::Ok);
        assert_eq!(Reading::classify(Some(90.0), 50.0, 90.0), Reading::Ok);
        assert_eq!(Reading::classify(Some(90.1), 50.0, 90.0), Reading::High);
    }

    #[test]
    fn test_classify_ignores_alert_enabled_flags() {
        // Flags are not an input at all; a disabled alarm still colors.
        let ch = channel("Grill", Some(95.0), 50.0, 90.0);
        assert!(!ch.alert_high_enabled);
        assert_eq!(
            Reading::classify(ch.value, ch.alert_low_limit, ch.alert_high_limit),
            Reading::High
        );
    }

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(None), "OFF");
        assert_eq!(format_reading(Some(87.3)), "87.3°");
        assert_eq!(format_reading(Some(90.0)), "90.0°");
    }

    #[test]
    fn test_apply_channels_matches_count_and_position() {
        let mut state = AppState::new();
        state.apply_channels(map_of(vec![
            (1, vec![(0, channel("A", Some(20.0), 0.0, 100.0))]),
            (
                2,
                vec![
                    (0, channel("B", None, 0.0, 100.0)),
                    (1, channel("C", Some(30.0), 0.0, 100.0)),
                ],
            ),
        ]));
        assert_eq!(state.channels.len(), 3);
        assert_eq!(state.channels[0].channel.name, "A");
        assert_eq!(state.channels[1].channel.name, "B");
        assert_eq!(state.channels[2].channel.name, "C");
        assert!(state.connected);

        // Shrink: position i always reflects entry i of the new snapshot.
        state.apply_channels(map_of(vec![(
            2,
            vec![(1, channel("C", Some(31.0), 0.0, 100.0))],
        )]));
        assert_eq!(state.channels.len(), 1);
        assert_eq!(state.channels[0].channel.name, "C");
        assert_eq!(state.channels[0].channel.value, Some(31.0));
    }

    #[test]
    fn test_grill_card_example() {
        let mut state = AppState::new();
        state.apply_channels(map_of(vec![(
            1,
            vec![(0, channel("Grill", Some(87.3), 50.0, 90.0))],
        )]));
        assert_eq!(state.channels.len(), 1);
        let entry = &state.channels[0];
        assert_eq!(entry.channel.name, "Grill");
        assert_eq!(format_reading(entry.channel.value), "87.3°");
        assert_eq!(
            Reading::classify(entry.channel.value, 50.0, 90.0),
            Reading::Ok
        );
    }

    #[test]
    fn test_fetch_failure_keeps_last_known_good() {
        let mut state = AppState::new();
        state.apply_channels(map_of(vec![(
            1,
            vec![(0, channel("A", Some(20.0), 0.0, 100.0))],
        )]));
        state.channel_fetch_failed(&ApiError::Timeout);
        assert_eq!(state.channels.len(), 1);
        assert!(!state.connected);
        assert_eq!(state.last_error.as_deref(), Some("request timed out"));
    }

    fn settings_for(display_number: usize) -> ChannelSettings {
        ChannelSettings {
            display_number,
            module_id: 2,
            channel_id: 1,
            channel: channel("Meat", Some(60.0), 50.0, 90.0),
            colors: vec![
                ColorOption {
                    label: "Blue".to_string(),
                    hex: "#0000FF".to_string(),
                },
                ColorOption {
                    label: "Red".to_string(),
                    hex: "#ff0000".to_string(),
                },
            ],
            sensors: vec!["Maverick".to_string(), "iGrill2".to_string()],
        }
    }

    #[test]
    fn test_draft_captures_snapshot_and_selections() {
        let draft = SettingsDraft::from_settings(settings_for(3));
        assert_eq!(draft.display_number, 3);
        assert_eq!(draft.module_id, 2);
        assert_eq!(draft.channel_id, 1);
        assert_eq!(draft.title, "Meat");
        assert_eq!(draft.name, "Meat");
        assert_eq!(draft.low_limit, "50");
        assert_eq!(draft.high_limit, "90");
        // Color matched by hex key, case-insensitively.
        assert_eq!(draft.color.as_ref().unwrap().label, "Blue");
        assert_eq!(draft.sensor.as_deref(), Some("Maverick"));
    }

    #[test]
    fn test_draft_selection_empty_when_not_in_options() {
        let mut settings = settings_for(1);
        settings.channel.color = "#123456".to_string();
        settings.channel.sensor_type = Some("Unknown".to_string());
        let draft = SettingsDraft::from_settings(settings);
        assert_eq!(draft.color, None);
        assert_eq!(draft.sensor, None);
    }

    #[test]
    fn test_draft_to_update_parses_limits() {
        let mut draft = SettingsDraft::from_settings(settings_for(1));
        draft.low_limit = " 42.5 ".to_string();
        draft.high_limit = "120".to_string();
        let update = draft.to_update().unwrap();
        assert_eq!(update.alert_low_limit, 42.5);
        assert_eq!(update.alert_high_limit, 120.0);
        assert_eq!(update.color.as_deref(), Some("#0000FF"));

        draft.high_limit = "hot".to_string();
        assert!(draft.to_update().is_err());
    }

    #[test]
    fn test_stale_settings_response_is_dropped() {
        let mut state = AppState::new();
        let first = state.begin_settings_load(1);
        // A second open supersedes the first.
        let second = state.begin_settings_load(2);
        assert_ne!(first, second);

        assert!(!state.apply_settings_loaded(first, Ok(settings_for(1))));
        assert!(matches!(
            state.settings,
            SettingsPanel::Loading {
                display_number: 2,
                ..
            }
        ));

        assert!(state.apply_settings_loaded(second, Ok(settings_for(2))));
        match &state.settings {
            SettingsPanel::Open(draft) => assert_eq!(draft.display_number, 2),
            other => panic!("expected open panel, got {other:?}"),
        }
    }

    #[test]
    fn test_settings_response_after_close_is_dropped() {
        let mut state = AppState::new();
        let epoch = state.begin_settings_load(1);
        state.close_settings();
        assert!(!state.apply_settings_loaded(epoch, Ok(settings_for(1))));
        assert_eq!(state.settings, SettingsPanel::Closed);
    }

    #[test]
    fn test_settings_fetch_failure_closes_panel() {
        let mut state = AppState::new();
        let epoch = state.begin_settings_load(4);
        assert!(state.apply_settings_loaded(epoch, Err(ApiError::ChannelVanished(4))));
        assert_eq!(state.settings, SettingsPanel::Closed);
        assert_eq!(
            state.last_error.as_deref(),
            Some("channel #4 is no longer present")
        );
    }

    #[test]
    fn test_save_outcomes() {
        let mut state = AppState::new();
        let epoch = state.begin_settings_load(1);
        state.apply_settings_loaded(epoch, Ok(settings_for(1)));

        // Failure keeps the panel open with the error.
        assert_eq!(
            state.apply_settings_saved(epoch, Err(ApiError::Status(500))),
            SaveOutcome::Failed
        );
        let draft = state.draft_mut().unwrap();
        assert!(!draft.saving);
        assert_eq!(draft.error.as_deref(), Some("device returned HTTP 500"));

        // Success closes it.
        assert_eq!(state.apply_settings_saved(epoch, Ok(())), SaveOutcome::Saved);
        assert_eq!(state.settings, SettingsPanel::Closed);

        // A save response for a superseded panel is dropped.
        assert_eq!(state.apply_settings_saved(epoch, Ok(())), SaveOutcome::Stale);
    }

    #[test]
    fn test_update_phase_transitions() {
        let mut state = AppState::new();
        assert_eq!(state.update_phase, UpdatePhase::Normal);

        state.apply_system(SystemInfo {
            host: Some("wlanthermo".to_string()),
            software_version: Some("1.2".to_string()),
            unit: None,
            update_in_progress: true,
        });
        assert_eq!(state.update_phase, UpdatePhase::Updating);

        state.apply_system(SystemInfo {
            host: Some("wlanthermo".to_string()),
            software_version: Some("1.3".to_string()),
            unit: None,
            update_in_progress: false,
        });
        assert_eq!(state.update_phase, UpdatePhase::Normal);
    }
}
