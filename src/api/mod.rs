// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Device HTTP API: wire types and client.

pub mod client;
pub mod types;

pub use client::{ApiError, DeviceClient};
pub use types::{
    flatten_channels, Channel, ChannelConfigUpdate, ChannelEntry, ChannelMap, ChannelSettings,
    ColorOption, SystemInfo,
};
