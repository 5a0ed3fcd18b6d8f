// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Wire types for the device's JSON API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Channel list as the device reports it: module id -> channel id -> channel.
///
/// BTreeMap keys give the stable module-then-channel iteration order that
/// display numbering is derived from.
pub type ChannelMap = BTreeMap<u64, BTreeMap<u64, Channel>>;

/// One temperature channel with its display and alert configuration.
///
/// The device sends more fields than these (`unit`, `description`,
/// `timestamp`, `alert_state`, ...); unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    /// Display color as a hex key from the device palette (e.g. "#0000ff").
    pub color: String,
    /// Current reading in the device's unit. `None` means the sensor is off.
    pub value: Option<f64>,
    pub alert_low_limit: f64,
    pub alert_high_limit: f64,
    #[serde(default)]
    pub alert_low_enabled: bool,
    #[serde(default)]
    pub alert_high_enabled: bool,
    /// Sensor type identifier, scoped to the owning module.
    #[serde(default)]
    pub sensor_type: Option<String>,
}

/// A channel paired with its position in the device's module/channel order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelEntry {
    pub module_id: u64,
    pub channel_id: u64,
    pub channel: Channel,
}

/// Flatten the module -> channel mapping into the ordered sequence that
/// defines the global channel index. Card `i` (0-based) shows entry `i`
/// and is labeled `#(i + 1)`.
pub fn flatten_channels(map: ChannelMap) -> Vec<ChannelEntry> {
    let mut entries = Vec::new();
    for (module_id, channels) in map {
        for (channel_id, channel) in channels {
            entries.push(ChannelEntry {
                module_id,
                channel_id,
                channel,
            });
        }
    }
    entries
}

/// A selectable display color from the device palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorOption {
    /// Human-readable name, e.g. "SkyBlue".
    pub label: String,
    /// Palette key, e.g. "#87ceeb".
    pub hex: String,
}

impl fmt::Display for ColorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Map the `/api/colors` payload (an array of `[label, hex]` pairs) into
/// palette options.
pub fn pairs_to_colors(pairs: Vec<(String, String)>) -> Vec<ColorOption> {
    pairs
        .into_iter()
        .map(|(label, hex)| ColorOption { label, hex })
        .collect()
}

/// System information from `/api/system`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub software_version: Option<String>,
    /// Temperature unit setting, e.g. "temp_celsius".
    #[serde(default)]
    pub unit: Option<String>,
    /// True while the device is flashing a firmware update.
    #[serde(default)]
    pub update_in_progress: bool,
}

/// Everything the settings panel needs for one channel, captured in a
/// single snapshot so concurrent opens cannot interleave.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSettings {
    /// The 1-based number printed on the card that was pressed.
    pub display_number: usize,
    pub module_id: u64,
    pub channel_id: u64,
    pub channel: Channel,
    pub colors: Vec<ColorOption>,
    /// Sensor types available on the owning module.
    pub sensors: Vec<String>,
}

/// Editable channel configuration, POSTed back to the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelConfigUpdate {
    pub name: String,
    pub sensor_type: Option<String>,
    pub color: Option<String>,
    pub alert_low_limit: f64,
    pub alert_high_limit: f64,
    pub alert_low_enabled: bool,
    pub alert_high_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANNELS_JSON: &str = r##"{
        "1": {
            "0": {
                "name": "Grill",
                "color": "#0000ff",
                "value": 87.3,
                "alert_low_limit": 50.0,
                "alert_high_limit": 90.0,
                "alert_low_enabled": true,
                "alert_high_enabled": false,
                "sensor_type": "Maverick",
                "unit": "temp_celsius",
                "alert_state": "ok"
            },
            "1": {
                "name": "Meat",
                "color": "#7fff00",
                "value": null,
                "alert_low_limit": 10.0,
                "alert_high_limit": 75.0,
                "sensor_type": null
            }
        },
        "2": {
            "0": {
                "name": "Oven",
                "color": "#ff0000",
                "value": 180.0,
                "alert_low_limit": 150.0,
                "alert_high_limit": 220.0
            }
        }
    }"##;

    #[test]
    fn test_parse_channel_map() {
        let map: ChannelMap = serde_json::from_str(CHANNELS_JSON).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1].len(), 2);
        let grill = &map[&1][&0];
        assert_eq!(grill.name, "Grill");
        assert_eq!(grill.value, Some(87.3));
        assert!(grill.alert_low_enabled);
        assert!(!grill.alert_high_enabled);
        assert_eq!(grill.sensor_type.as_deref(), Some("Maverick"));
    }

    #[test]
    fn test_null_value_is_none() {
        let map: ChannelMap = serde_json::from_str(CHANNELS_JSON).unwrap();
        assert_eq!(map[&1][&1].value, None);
        assert_eq!(map[&1][&1].sensor_type, None);
    }

    #[test]
    fn test_missing_alert_flags_default_to_false() {
        let map: ChannelMap = serde_json::from_str(CHANNELS_JSON).unwrap();
        let oven = &map[&2][&0];
        assert!(!oven.alert_low_enabled);
        assert!(!oven.alert_high_enabled);
    }

    #[test]
    fn test_flatten_order_is_module_then_channel() {
        let map: ChannelMap = serde_json::from_str(CHANNELS_JSON).unwrap();
        let entries = flatten_channels(map);
        let order: Vec<(u64, u64)> = entries
            .iter()
            .map(|e| (e.module_id, e.channel_id))
            .collect();
        assert_eq!(order, vec![(1, 0), (1, 1), (2, 0)]);
        assert_eq!(entries[0].channel.name, "Grill");
        assert_eq!(entries[2].channel.name, "Oven");
    }

    #[test]
    fn test_colors_pairs_parse() {
        let json = r##"[["Blue", "#0000ff"], ["Chartreuse", "#7fff00"]]"##;
        let pairs: Vec<(String, String)> = serde_json::from_str(json).unwrap();
        let colors = pairs_to_colors(pairs);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].label, "Blue");
        assert_eq!(colors[0].hex, "#0000ff");
        assert_eq!(colors[1].to_string(), "Chartreuse");
    }

    #[test]
    fn test_system_info_defaults() {
        let info: SystemInfo = serde_json::from_str("{}").unwrap();
        assert!(!info.update_in_progress);
        assert_eq!(info.host, None);

        let info: SystemInfo = serde_json::from_str(
            r#"{"host": "wlanthermo", "software_version": "1.2", "update_in_progress": true}"#,
        )
        .unwrap();
        assert!(info.update_in_progress);
        assert_eq!(info.host.as_deref(), Some("wlanthermo"));
    }
}
