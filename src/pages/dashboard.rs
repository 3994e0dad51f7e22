// SPDX-License-Identifier: MPL-2.0

//! Dashboard page view for the Lectern application.

use crate::api::ApiError;
use crate::app::{AppModel, ConnectionStatus, Message};
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget;

use super::widgets::connection_status_badge;

/// View for the Dashboard page
pub fn view(app: &AppModel, _space_s: u16, space_m: u16) -> Element<'_, Message> {
    let header = widget::row::with_capacity(2)
        .push(widget::text::title1(fl!("dashboard")))
        .push(connection_status_badge(&app.connection_status))
        .align_y(Alignment::Center)
        .spacing(space_m);

    let refresh_button = if matches!(app.connection_status, ConnectionStatus::Connecting) {
        widget::button::standard(fl!("refresh"))
    } else {
        widget::button::standard(fl!("refresh")).on_press(Message::FetchOverview)
    };

    let role_card = stat_card(fl!("role"), app.config.role.as_str().to_string());
    let api_card = stat_card(fl!("api-url"), app.config.api_url.clone());

    let overview = app.overview.as_ref();
    let courses_card = stat_card(
        fl!("course-count"),
        overview.map_or_else(|| "-".to_string(), |o| count_text(&o.courses)),
    );
    let organizations_card = stat_card(
        fl!("organization-count"),
        overview.map_or_else(|| "-".to_string(), |o| count_text(&o.organizations)),
    );

    let stats_row1 = widget::row::with_capacity(2)
        .push(role_card)
        .push(api_card)
        .spacing(space_m);

    let stats_row2 = widget::row::with_capacity(2)
        .push(courses_card)
        .push(organizations_card)
        .spacing(space_m);

    let refreshed = overview.map(|o| {
        widget::text::caption(fl!(
            "last-refresh",
            time = o.refreshed_at.format("%H:%M:%S").to_string()
        ))
    });

    let content: Element<'_, Message> = match &app.connection_status {
        ConnectionStatus::Disconnected | ConnectionStatus::Error(_) if overview.is_none() => {
            widget::column::with_capacity(3)
                .push(
                    widget::container(widget::text::body(fl!("dashboard-connect-hint")))
                        .padding(space_m)
                        .width(Length::Fill)
                        .class(cosmic::style::Container::Card),
                )
                .push(stats_row1)
                .push(refresh_button)
                .spacing(space_m)
                .into()
        }
        _ => widget::column::with_capacity(4)
            .push(
                widget::row::with_capacity(2)
                    .push(refresh_button)
                    .push_maybe(refreshed)
                    .spacing(space_m)
                    .align_y(Alignment::Center),
            )
            .push(stats_row1)
            .push(stats_row2)
            .spacing(space_m)
            .into(),
    };

    widget::column::with_capacity(2)
        .push(header)
        .push(content)
        .spacing(space_m)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn count_text(count: &Result<usize, ApiError>) -> String {
    match count {
        Ok(count) => count.to_string(),
        Err(_) => fl!("unavailable"),
    }
}

/// Helper to create a stat card widget
fn stat_card(label: String, value: String) -> Element<'static, Message> {
    widget::container(
        widget::column::with_capacity(2)
            .push(widget::text::caption(label))
            .push(widget::text::title3(value))
            .spacing(4),
    )
    .padding(cosmic::theme::spacing().space_s)
    .width(Length::FillPortion(1))
    .class(cosmic::style::Container::Card)
    .into()
}
