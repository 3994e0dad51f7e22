// SPDX-License-Identifier: MPL-2.0

//! Settings page view for the Lectern application.

use crate::app::{AppModel, ConnectionStatus, Message, SettingsStatus};
use crate::config::Role;
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget;

/// View for the Settings page
pub fn view(app: &AppModel, space_s: u16, space_m: u16) -> Element<'_, Message> {
    let header = widget::text::title1(fl!("settings"));

    let connection_section = cosmic::widget::settings::section()
        .title(fl!("connection"))
        .add(
            cosmic::widget::settings::item::builder(fl!("api-url"))
                .description(fl!("api-url-description"))
                .control(
                    widget::text_input(fl!("api-url-placeholder"), &app.api_url_input)
                        .on_input(Message::ApiUrlChanged)
                        .width(Length::Fixed(300.0)),
                ),
        )
        .add(
            cosmic::widget::settings::item::builder(fl!("auth-token"))
                .description(fl!("auth-token-description"))
                .control(
                    widget::secure_input(
                        fl!("auth-token-placeholder"),
                        &app.auth_token_input,
                        None,
                        true,
                    )
                    .on_input(Message::AuthTokenChanged)
                    .width(Length::Fixed(300.0)),
                ),
        );

    // One toggle-style button per role
    let mut role_selector = widget::row::with_capacity(Role::ALL.len());
    for role in Role::ALL {
        let button = widget::button::text(role_label(role))
            .class(if role == app.role_input {
                cosmic::theme::Button::Suggested
            } else {
                cosmic::theme::Button::Standard
            })
            .on_press(Message::RoleSelected(role));
        role_selector = role_selector.push(button);
    }

    let role_section = cosmic::widget::settings::section()
        .title(fl!("account"))
        .add(
            cosmic::widget::settings::item::builder(fl!("role"))
                .description(fl!("role-description"))
                .control(role_selector.spacing(space_s).align_y(Alignment::Center)),
        );

    let connection_status_text = match &app.connection_status {
        ConnectionStatus::Disconnected => fl!("status-disconnected"),
        ConnectionStatus::Connecting => fl!("status-connecting"),
        ConnectionStatus::Connected => fl!("status-connected"),
        ConnectionStatus::Error(e) => format!("{}: {}", fl!("status-error"), e),
    };

    let mut buttons = widget::row::with_capacity(4)
        .push(widget::button::standard(fl!("save")).on_press(Message::SaveSettings))
        .push(widget::button::suggested(fl!("test-connection")).on_press(Message::TestConnection))
        .push(widget::text::body(connection_status_text))
        .spacing(space_s)
        .align_y(Alignment::Center);

    let save_status = match &app.settings_status {
        SettingsStatus::Idle => None,
        SettingsStatus::Saved => Some((fl!("settings-saved"), cosmic::theme::Button::Suggested)),
        SettingsStatus::Error(e) => Some((e.clone(), cosmic::theme::Button::Destructive)),
    };
    if let Some((text, style)) = save_status {
        buttons =
            buttons.push(widget::button::custom(widget::text::caption(text)).class(style));
    }

    widget::scrollable(
        widget::column::with_capacity(4)
            .push(header)
            .push(connection_section)
            .push(role_section)
            .push(buttons)
            .spacing(space_m)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}

fn role_label(role: Role) -> String {
    match role {
        Role::Admin => fl!("role-admin"),
        Role::Teacher => fl!("role-teacher"),
        Role::Student => fl!("role-student"),
    }
}
