// SPDX-License-Identifier: MPL-2.0

//! Enrollment page: organization, program, semester and student.

use crate::app::{AppModel, Message};
use crate::fl;
use crate::forms::FormKind;
use crate::widgets::CascadeSelector;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget;

use super::widgets::selection_summary;

/// View for the Enrollment page
pub fn view(app: &AppModel, space_s: u16, space_m: u16) -> Element<'_, Message> {
    let chain = app.chain(FormKind::Enrollment);

    let header = widget::row::with_capacity(2)
        .push(widget::text::title1(fl!("enrollment")).width(Length::Fill))
        .push(
            widget::button::standard(fl!("start-over"))
                .on_press(Message::ResetForm(FormKind::Enrollment)),
        )
        .align_y(Alignment::Center)
        .spacing(space_m);

    let selector = CascadeSelector::new(chain, |msg| Message::Form(FormKind::Enrollment, msg))
        .dropdown_width(Length::Fixed(360.0))
        .spacing(space_s);

    widget::scrollable(
        widget::column::with_capacity(4)
            .push(header)
            .push(widget::text::body(fl!("enrollment-description")))
            .push(selector)
            .push(selection_summary(chain, fl!("enrollment-ready")))
            .spacing(space_m)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}
