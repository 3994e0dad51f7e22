// SPDX-License-Identifier: MPL-2.0

//! Selection state and the controller that keeps it consistent.

use super::error::ChainError;
use super::level::LevelSpec;
use super::mapping::normalize;
use super::option::{OptionValue, SelectOption};
use crate::api::ApiError;

/// Tag attached to one option fetch.
///
/// A response is applied only while its ticket is still the pending ticket
/// of its level. Any newer selection upstream replaces or drops that ticket,
/// which is how late responses for superseded parents are recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    level: usize,
    parent: Option<OptionValue>,
    seq: u64,
}

impl FetchTicket {
    /// The level whose options this fetch populates.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The parent id the fetch was issued for (`None` for the root level).
    pub fn parent(&self) -> Option<&OptionValue> {
        self.parent.as_ref()
    }
}

/// Where a level is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    /// No parent yet, or the parent was cleared.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Options are populated (possibly with an empty list).
    Ready,
    /// The last fetch failed; the level is empty and can be retried.
    Failed,
}

/// Outcome of applying a fetch response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Options were replaced with `count` entries.
    Applied { count: usize },
    /// The fetch failed or returned an unusable payload.
    Failed(ApiError),
    /// The response belonged to a superseded selection and was dropped.
    Stale,
}

/// State of a single level.
#[derive(Debug, Clone, Default)]
pub struct LevelState {
    selection: Option<SelectOption>,
    options: Vec<SelectOption>,
    /// Display labels mirroring `options`, borrowed by dropdown widgets.
    labels: Vec<String>,
    loading: bool,
    loaded: bool,
    pending: Option<FetchTicket>,
    error: Option<String>,
}

impl LevelState {
    pub fn selection(&self) -> Option<&SelectOption> {
        self.selection.as_ref()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last load error, kept for display until the next load starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Position of the current selection within the options, if listed.
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selection.as_ref()?;
        self.options.iter().position(|o| o.value == selected.value)
    }

    pub fn phase(&self) -> LevelPhase {
        if self.loading {
            LevelPhase::Loading
        } else if self.error.is_some() {
            LevelPhase::Failed
        } else if self.loaded {
            LevelPhase::Ready
        } else {
            LevelPhase::Idle
        }
    }

    fn set_options(&mut self, options: Vec<SelectOption>) {
        self.labels = options.iter().map(|o| o.label.clone()).collect();
        self.options = options;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// An ordered chain of dependent selectors.
///
/// The controller is synchronous: operations that need data hand back a
/// [`FetchTicket`], the caller performs the request, and the response comes
/// back through [`DependencyChain::finish_load`]. Between those two calls the
/// user may keep changing selections; the ticket decides whether the
/// response still matters.
///
/// For every level `i > 0`, an empty selection at `i - 1` implies an empty
/// selection, empty options and no pending fetch at `i`. Every public
/// mutation preserves this before returning.
#[derive(Debug, Clone)]
pub struct DependencyChain {
    specs: Vec<LevelSpec>,
    levels: Vec<LevelState>,
    next_seq: u64,
}

impl DependencyChain {
    pub fn new(specs: Vec<LevelSpec>) -> Self {
        let levels = vec![LevelState::default(); specs.len()];
        Self {
            specs,
            levels,
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn spec(&self, level: usize) -> Option<&LevelSpec> {
        self.specs.get(level)
    }

    pub fn level(&self, level: usize) -> Option<&LevelState> {
        self.levels.get(level)
    }

    /// Iterates over `(spec, state)` pairs from the root down.
    pub fn iter(&self) -> impl Iterator<Item = (&LevelSpec, &LevelState)> {
        self.specs.iter().zip(self.levels.iter())
    }

    pub fn phase(&self, level: usize) -> Option<LevelPhase> {
        self.levels.get(level).map(LevelState::phase)
    }

    /// Sets the selection at `level` and clears everything below it.
    ///
    /// Passing `None` clears the level. When an option is chosen and a next
    /// level exists, a fetch for that level is started and its ticket is
    /// returned.
    pub fn select_at(
        &mut self,
        level: usize,
        option: Option<SelectOption>,
    ) -> Result<Option<FetchTicket>, ChainError> {
        self.check_level(level)?;
        if option.is_some() && level > 0 && self.levels[level - 1].selection.is_none() {
            return Err(ChainError::ParentUnselected { level });
        }

        tracing::debug!(
            level = self.specs[level].key,
            selection = ?option.as_ref().map(|o| &o.value),
            "selection changed"
        );

        let parent = option.as_ref().map(|o| o.value.clone());
        self.levels[level].selection = option;
        self.clear_below(level);

        let ticket = match parent {
            Some(parent) if level + 1 < self.len() => {
                Some(self.load_options(level + 1, Some(parent))?)
            }
            _ => None,
        };

        debug_assert!(self.is_consistent());
        Ok(ticket)
    }

    /// Marks `level` as loading for `parent` and returns the fetch ticket.
    ///
    /// The root level is unscoped and accepts any `parent`. Deeper levels
    /// require `parent` to be the current selection one level up.
    pub fn load_options(
        &mut self,
        level: usize,
        parent: Option<OptionValue>,
    ) -> Result<FetchTicket, ChainError> {
        self.check_level(level)?;
        if level > 0 {
            let selected = self.levels[level - 1]
                .selection
                .as_ref()
                .ok_or(ChainError::ParentUnselected { level })?;
            match &parent {
                Some(requested) if *requested == selected.value => {}
                Some(requested) => {
                    return Err(ChainError::ParentMismatch {
                        level: level - 1,
                        selected: selected.value.clone(),
                        requested: requested.clone(),
                    });
                }
                None => return Err(ChainError::ParentUnselected { level }),
            }
        }

        let ticket = FetchTicket {
            level,
            parent,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let state = &mut self.levels[level];
        state.loading = true;
        state.error = None;
        state.pending = Some(ticket.clone());

        debug_assert!(self.is_consistent());
        Ok(ticket)
    }

    /// Starts loading the root level. `None` for an empty chain.
    pub fn load_roots(&mut self) -> Option<FetchTicket> {
        self.load_options(0, None).ok()
    }

    /// Reloads `level` for its current parent.
    ///
    /// Returns `None` when the level has no parent selection to load for.
    pub fn retry(&mut self, level: usize) -> Result<Option<FetchTicket>, ChainError> {
        self.check_level(level)?;
        if level == 0 {
            return self.load_options(0, None).map(Some);
        }
        match self.levels[level - 1].selection.as_ref().map(|s| s.value.clone()) {
            Some(parent) => self.load_options(level, Some(parent)).map(Some),
            None => Ok(None),
        }
    }

    /// Applies the response for `ticket`.
    ///
    /// Responses whose ticket is no longer pending are dropped silently.
    /// Failures (transport, status or malformed payload) empty the level,
    /// keep its selection, and are reported once through `notify`.
    pub fn finish_load(
        &mut self,
        ticket: &FetchTicket,
        response: Result<serde_json::Value, ApiError>,
        mut notify: impl FnMut(&LevelSpec, &ApiError),
    ) -> LoadOutcome {
        let is_pending = self
            .levels
            .get(ticket.level)
            .is_some_and(|state| state.pending.as_ref() == Some(ticket));
        if !is_pending {
            tracing::debug!(
                level = ticket.level,
                parent = ?ticket.parent,
                "dropping stale option response"
            );
            return LoadOutcome::Stale;
        }

        let spec = &self.specs[ticket.level];
        let result = response.and_then(|body| normalize(&body, &spec.envelope, &spec.extractor));

        let state = &mut self.levels[ticket.level];
        state.pending = None;
        state.loading = false;

        let outcome = match result {
            Ok(options) => {
                let count = options.len();
                state.set_options(options);
                state.loaded = true;

                let selection_listed = state
                    .selection
                    .as_ref()
                    .is_none_or(|s| state.options.iter().any(|o| o.value == s.value));
                if !selection_listed {
                    state.selection = None;
                    self.clear_below(ticket.level);
                }
                LoadOutcome::Applied { count }
            }
            Err(error) => {
                state.set_options(Vec::new());
                state.loaded = false;
                state.error = Some(error.to_string());
                tracing::warn!(level = spec.key, %error, "failed to load options");
                notify(spec, &error);
                LoadOutcome::Failed(error)
            }
        };

        debug_assert!(self.is_consistent());
        outcome
    }

    /// Drops every selection, option list and pending fetch.
    pub fn reset(&mut self) {
        self.levels.iter_mut().for_each(LevelState::clear);
    }

    /// Selections from the root down to the first empty level.
    pub fn selected_path(&self) -> Vec<&SelectOption> {
        self.levels.iter().map_while(|l| l.selection.as_ref()).collect()
    }

    /// True when every level has a selection.
    pub fn is_complete(&self) -> bool {
        !self.levels.is_empty() && self.levels.iter().all(|l| l.selection.is_some())
    }

    /// Checks the chain invariant and internal bookkeeping.
    pub fn is_consistent(&self) -> bool {
        let parents_ok = self.levels.windows(2).all(|pair| {
            pair[0].selection.is_some()
                || (pair[1].selection.is_none() && pair[1].options.is_empty() && !pair[1].loading)
        });
        let levels_ok = self.levels.iter().all(|l| {
            l.loading == l.pending.is_some() && l.labels.len() == l.options.len()
        });
        parents_ok && levels_ok
    }

    fn clear_below(&mut self, level: usize) {
        for state in self.levels.iter_mut().skip(level + 1) {
            state.clear();
        }
    }

    fn check_level(&self, level: usize) -> Result<(), ChainError> {
        if level < self.len() {
            Ok(())
        } else {
            Err(ChainError::LevelOutOfRange {
                level,
                len: self.len(),
            })
        }
    }
}
