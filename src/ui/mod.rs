// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! UI components for Emberwatch.

pub mod channel_card;
pub mod settings_panel;
pub mod theme;

pub use channel_card::channel_card;
pub use settings_panel::{loading_panel, settings_panel};
