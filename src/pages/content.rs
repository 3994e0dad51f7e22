// SPDX-License-Identifier: MPL-2.0

//! Course content page: pick a course, then a chapter, then a content item.

use crate::app::{AppModel, Message};
use crate::fl;
use crate::forms::FormKind;
use crate::widgets::CascadeSelector;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget;

use super::widgets::selection_summary;

/// View for the Course content page
pub fn view(app: &AppModel, space_s: u16, space_m: u16) -> Element<'_, Message> {
    let chain = app.chain(FormKind::CourseContent);

    let header = widget::row::with_capacity(2)
        .push(widget::text::title1(fl!("course-content")).width(Length::Fill))
        .push(
            widget::button::standard(fl!("start-over"))
                .on_press(Message::ResetForm(FormKind::CourseContent)),
        )
        .align_y(Alignment::Center)
        .spacing(space_m);

    let selector = CascadeSelector::new(chain, |msg| {
        Message::Form(FormKind::CourseContent, msg)
    })
    .spacing(space_s);

    widget::scrollable(
        widget::column::with_capacity(4)
            .push(header)
            .push(widget::text::body(fl!("course-content-description")))
            .push(selector)
            .push(selection_summary(chain, fl!("content-ready")))
            .spacing(space_m)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}
