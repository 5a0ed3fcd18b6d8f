// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! HTTP client for the device API.

use crate::api::types::{
    flatten_channels, pairs_to_colors, ChannelConfigUpdate, ChannelEntry, ChannelMap,
    ChannelSettings, ColorOption, SystemInfo,
};
use crate::config::DeviceConfig;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure kinds for device API calls.
///
/// String-backed so messages carrying one stay cloneable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("device unreachable: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("malformed response: {0}")]
    InvalidResponse(String),
    #[error("device returned HTTP {0}")]
    Status(u16),
    /// The pressed card's index no longer exists in a fresh channel
    /// snapshot (channel count changed between paint and click).
    #[error("channel #{0} is no longer present")]
    ChannelVanished(usize),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Client for the device's JSON API.
///
/// Cheap to clone; every call is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: String,
}

impl DeviceClient {
    /// Build a client from the device configuration.
    pub fn new(config: &DeviceConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = self.http.get(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Fetch the full channel list.
    pub async fn channels(&self) -> Result<ChannelMap, ApiError> {
        self.get_json("api/channels").await
    }

    /// Fetch the display color palette.
    pub async fn colors(&self) -> Result<Vec<ColorOption>, ApiError> {
        let pairs: Vec<(String, String)> = self.get_json("api/colors").await?;
        Ok(pairs_to_colors(pairs))
    }

    /// Fetch the sensor types available on one module.
    pub async fn module_sensors(&self, module_id: u64) -> Result<Vec<String>, ApiError> {
        self.get_json(&format!("api/modules/{module_id}/sensors"))
            .await
    }

    /// Fetch system information (host, version, update state).
    pub async fn system(&self) -> Result<SystemInfo, ApiError> {
        self.get_json("api/system").await
    }

    /// Gather everything the settings panel needs for the channel behind a
    /// card's display number.
    ///
    /// The chain is sequential: the fresh channel snapshot resolves which
    /// module the sensor list must be scoped to. The result is a single
    /// snapshot, so nothing here depends on poll state that a concurrent
    /// tick could mutate.
    pub async fn channel_settings(
        &self,
        display_number: usize,
    ) -> Result<ChannelSettings, ApiError> {
        let entries = flatten_channels(self.channels().await?);
        let entry = resolve_entry(entries, display_number)?;

        let colors = self.colors().await?;
        let sensors = self.module_sensors(entry.module_id).await?;

        Ok(ChannelSettings {
            display_number,
            module_id: entry.module_id,
            channel_id: entry.channel_id,
            channel: entry.channel,
            colors,
            sensors,
        })
    }

    /// Save one channel's configuration back to the device.
    pub async fn save_channel_config(
        &self,
        module_id: u64,
        channel_id: u64,
        update: &ChannelConfigUpdate,
    ) -> Result<(), ApiError> {
        debug!(
            "POST api/channel_config/{}/{}: {:?}",
            module_id, channel_id, update
        );
        let response = self
            .http
            .post(self.url(&format!("api/channel_config/{module_id}/{channel_id}")))
            .json(update)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Resolve a card's 1-based display number against a flattened channel
/// snapshot.
///
/// A number outside the snapshot means the channel count changed between
/// paint and click; the press is rejected rather than resolved to the
/// wrong channel.
fn resolve_entry(
    mut entries: Vec<ChannelEntry>,
    display_number: usize,
) -> Result<ChannelEntry, ApiError> {
    let index = display_number
        .checked_sub(1)
        .ok_or(ApiError::ChannelVanished(display_number))?;
    if index >= entries.len() {
        return Err(ApiError::ChannelVanished(display_number));
    }
    Ok(entries.swap_remove(index))
}
