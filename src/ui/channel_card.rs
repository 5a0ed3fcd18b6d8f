// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Channel card UI component.

use crate::api::ChannelEntry;
use crate::message::Message;
use crate::state::{format_reading, Reading};
use crate::ui::theme::*;
use iced::font::{self, Font};
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Background, Border, Color, Element, Fill, Theme};

/// Bold face for out-of-range readings.
const BOLD: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

/// Create a channel card for one entry.
///
/// `display_number` is the 1-based position label ("#N"); pressing the card
/// opens the settings panel for that number.
pub fn channel_card(entry: &ChannelEntry, display_number: usize) -> Element<'_, Message> {
    let channel = &entry.channel;
    let border_color = parse_hex_color(&channel.color).unwrap_or(SURFACE_LIGHT);

    let title = text(&channel.name).size(14).color(TEXT);
    let number = text(format!("#{display_number}")).size(12).color(TEXT_DIM);

    let reading = Reading::classify(
        channel.value,
        channel.alert_low_limit,
        channel.alert_high_limit,
    );
    let reading_color = match reading {
        Reading::Low => READING_LOW,
        Reading::High => READING_HIGH,
        Reading::Off | Reading::Ok => TEXT,
    };
    let mut reading_text = text(format_reading(channel.value))
        .size(30)
        .color(reading_color);
    if reading.is_out_of_range() {
        reading_text = reading_text.font(BOLD);
    }

    let low_label = text(format!("\u{25BC} {}°", channel.alert_low_limit))
        .size(11)
        .color(TEXT_DIM);
    let high_label = text(format!("\u{25B2} {}°", channel.alert_high_limit))
        .size(11)
        .color(TEXT_DIM);

    let content = column![
        row![title, Space::new().width(Fill), number].align_y(Alignment::Center),
        Space::new().height(SPACING),
        container(reading_text).center_x(Fill),
        Space::new().height(SPACING),
        row![low_label, Space::new().width(Fill), high_label].align_y(Alignment::Center),
    ]
    .padding(PADDING)
    .spacing(SPACING_SMALL);

    let card = container(content)
        .width(CHANNEL_CARD_WIDTH)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(SURFACE)),
            border: Border::default()
                .rounded(BORDER_RADIUS)
                .color(border_color)
                .width(2.0),
            ..container::Style::default()
        });

    // Whole card is clickable.
    button(card)
        .padding(0)
        .style(|_theme: &Theme, status| {
            let is_hovered = matches!(status, button::Status::Hovered | button::Status::Pressed);
            button::Style {
                background: Some(Background::Color(if is_hovered {
                    Color {
                        a: 0.06,
                        ..Color::WHITE
                    }
                } else {
                    Color::TRANSPARENT
                })),
                border: Border::default().rounded(BORDER_RADIUS),
                ..button::Style::default()
            }
        })
        .on_press(Message::CardPressed(display_number))
        .into()
}
