// SPDX-License-Identifier: MPL-2.0

//! Cascade selector widget: one labelled dropdown per chain level.
//!
//! The widget only renders a [`DependencyChain`]; the parent owns the chain
//! and feeds [`ChainMessage`]s back into it from its update function.
//!
//! # Example
//!
//! ```ignore
//! fn view(&self) -> Element<'_, Message> {
//!     CascadeSelector::new(&self.chain, |msg| Message::Chain(msg))
//!         .dropdown_width(Length::Fixed(320.0))
//!         .into()
//! }
//! ```

use crate::chain::{ChainMessage, DependencyChain, LevelPhase, LevelSpec, LevelState};
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget::{self, icon};

/// Builder for the cascade selector.
///
/// `on_message` is cloned into every dropdown callback, so it must be a
/// cheap `'static` closure such as `move |msg| Message::Form(kind, msg)`.
pub struct CascadeSelector<'a, F> {
    chain: &'a DependencyChain,
    on_message: F,
    dropdown_width: Length,
    spacing: u16,
}

impl<'a, F, Message> CascadeSelector<'a, F>
where
    F: Fn(ChainMessage) -> Message + Clone + Send + Sync + 'static,
    Message: Clone + 'static,
{
    pub fn new(chain: &'a DependencyChain, on_message: F) -> Self {
        Self {
            chain,
            on_message,
            dropdown_width: Length::Fixed(320.0),
            spacing: 12,
        }
    }

    /// Sets the width of each dropdown.
    ///
    /// Default is `Length::Fixed(320.0)`.
    pub fn dropdown_width(mut self, width: Length) -> Self {
        self.dropdown_width = width;
        self
    }

    /// Sets the vertical spacing between levels.
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    fn render_level(
        &self,
        index: usize,
        spec: &'a LevelSpec,
        state: &'a LevelState,
    ) -> Element<'a, Message> {
        let parent_title = index
            .checked_sub(1)
            .and_then(|above| self.chain.spec(above))
            .map(|spec| spec.title.clone());
        let parent_selected = index == 0
            || self
                .chain
                .level(index - 1)
                .is_some_and(|above| above.selection().is_some());

        let header = widget::row::with_capacity(3)
            .push(widget::text::heading(spec.title.as_str()).width(Length::Fill))
            .push_maybe(
                state
                    .is_loading()
                    .then(|| widget::text::caption(fl!("loading"))),
            )
            .push_maybe(state.selection().is_some().then(|| {
                widget::button::text(fl!("clear")).on_press((self.on_message)(
                    ChainMessage::Select {
                        level: index,
                        option: None,
                    },
                ))
            }))
            .spacing(8)
            .align_y(Alignment::Center);

        let body: Element<'a, Message> = match state.phase() {
            LevelPhase::Failed => self.render_error(index, state.error().unwrap_or_default()),
            _ if !parent_selected => widget::text::caption(fl!(
                "select-parent-first",
                parent = parent_title.unwrap_or_default()
            ))
            .into(),
            LevelPhase::Ready if state.options().is_empty() => {
                widget::text::caption(fl!("no-options")).into()
            }
            _ => self.render_dropdown(index, state),
        };

        widget::column::with_capacity(2)
            .push(header)
            .push(body)
            .spacing(4)
            .into()
    }

    fn render_dropdown(&self, index: usize, state: &'a LevelState) -> Element<'a, Message> {
        let options = state.options().to_vec();
        let on_message = self.on_message.clone();

        widget::dropdown(state.labels(), state.selected_index(), move |idx| {
            on_message(ChainMessage::Select {
                level: index,
                option: options.get(idx).cloned(),
            })
        })
        .width(self.dropdown_width)
        .into()
    }

    fn render_error(&self, index: usize, error: &str) -> Element<'a, Message> {
        widget::row::with_capacity(3)
            .push(icon::from_name("dialog-error-symbolic").size(16))
            .push(
                widget::text::caption(error.to_string())
                    .class(cosmic::style::Text::Accent)
                    .width(Length::Fill),
            )
            .push(
                widget::button::standard(fl!("retry"))
                    .on_press((self.on_message)(ChainMessage::Retry { level: index })),
            )
            .spacing(8)
            .align_y(Alignment::Center)
            .into()
    }

    /// Builds the widget and returns it as an Element.
    pub fn build(self) -> Element<'a, Message> {
        let chain = self.chain;
        let mut column = widget::column::with_capacity(chain.len()).spacing(self.spacing);
        for (index, (spec, state)) in chain.iter().enumerate() {
            column = column.push(self.render_level(index, spec, state));
        }

        widget::container(column)
            .padding(16)
            .width(Length::Fill)
            .class(cosmic::style::Container::Card)
            .into()
    }
}

impl<'a, F, Message> From<CascadeSelector<'a, F>> for Element<'a, Message>
where
    F: Fn(ChainMessage) -> Message + Clone + Send + Sync + 'static,
    Message: Clone + 'static,
{
    fn from(selector: CascadeSelector<'a, F>) -> Self {
        selector.build()
    }
}
