// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Message types for UI actions and device API responses.

use crate::api::{ApiError, ChannelMap, ChannelSettings, ColorOption, SystemInfo};

/// All messages in the application.
#[derive(Debug, Clone)]
pub enum Message {
    // ==================== Polling ====================
    /// Periodic poll tick.
    Tick,
    /// Channel list fetch finished.
    ChannelsFetched(Result<ChannelMap, ApiError>),
    /// System info fetch finished (startup and update tracking).
    SystemFetched(Result<SystemInfo, ApiError>),

    // ==================== Channel Cards ====================
    /// A channel card was pressed; carries the 1-based "#N" number printed
    /// on the card.
    CardPressed(usize),

    // ==================== Settings Panel ====================
    /// The settings fetch chain finished (epoch, result).
    SettingsLoaded(u64, Result<ChannelSettings, ApiError>),
    /// Name field edited.
    SettingsNameChanged(String),
    /// Low limit field edited.
    SettingsLowLimitChanged(String),
    /// High limit field edited.
    SettingsHighLimitChanged(String),
    /// A palette color was picked.
    SettingsColorPicked(ColorOption),
    /// A sensor type was picked.
    SettingsSensorPicked(String),
    /// Low alarm checkbox toggled.
    SettingsAlarmLowToggled(bool),
    /// High alarm checkbox toggled.
    SettingsAlarmHighToggled(bool),
    /// Save button pressed.
    SettingsSaveRequested,
    /// Save request finished (epoch, result).
    SettingsSaved(u64, Result<(), ApiError>),
    /// Panel dismissed (close button, backdrop, or Cancel).
    SettingsClosed,
}
