//! Event wiring between the item store, the view, and persistence.
//!
//! Every [`Action`] runs to completion in a fixed order: the store mutates,
//! the view follows, and the full item list is written back. Writes that fail
//! are logged and do not roll anything back; the error of the last action is
//! kept for [`Tracker::take_write_error`].

use anyhow::Error;

use crate::models::{Item, MealInput};
use crate::storage::{KeyValueStore, Persistence};
use crate::store::ItemStore;
use crate::view::{Button, ListView, NodeHandle, ViewMode};

/// A user gesture on the tracker screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Submit the form as a new item.
    Add,
    /// Wipe every item.
    ClearAll,
    /// Press the edit affordance of the node rendered for this id.
    Select(i64),
    /// Leave edit mode without saving.
    Back,
    /// Save the form over the selected item.
    Update,
    /// Delete the selected item.
    Delete,
}

impl Action {
    fn button(self) -> Option<Button> {
        match self {
            Action::Add => Some(Button::Add),
            Action::ClearAll => Some(Button::ClearAll),
            Action::Back => Some(Button::Back),
            Action::Update => Some(Button::Update),
            Action::Delete => Some(Button::Delete),
            Action::Select(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Empty meal text, calories that do not parse, or a value the tally
    /// cannot hold.
    InvalidInput,
    /// The button for this action is not shown in the current mode.
    ButtonHidden,
    /// No rendered node matches the requested or selected id.
    UnknownItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(Reason),
}

pub struct Tracker<S> {
    store: ItemStore,
    view: ListView,
    persistence: Persistence<S>,
    write_error: Option<Error>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Load the stored snapshot into both the store and the view, then show
    /// the screen in adding mode.
    pub fn start(persistence: Persistence<S>) -> Self {
        let mut view = ListView::new();
        view.render_all(&persistence.load());

        let mut store = ItemStore::new();
        store.hydrate(persistence.load());

        view.set_mode(ViewMode::Adding);
        tracing::debug!(items = store.list().len(), total = store.total(), "tracker started");

        Self {
            store,
            view,
            persistence,
            write_error: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.store.list()
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.store.total()
    }

    #[must_use]
    pub fn current_id(&self) -> Option<i64> {
        self.store.current_id()
    }

    #[must_use]
    pub fn view(&self) -> &ListView {
        &self.view
    }

    #[must_use]
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn into_persistence(self) -> Persistence<S> {
        self.persistence
    }

    /// Error from the last action's write, if it failed. Cleared at the start
    /// of every dispatch.
    pub fn take_write_error(&mut self) -> Option<Error> {
        self.write_error.take()
    }

    /// Type into both form inputs.
    pub fn fill_form(&mut self, meal: impl Into<String>, cals: impl Into<String>) {
        self.view.set_meal_input(meal);
        self.view.set_cals_input(cals);
    }

    pub fn set_meal_input(&mut self, text: impl Into<String>) {
        self.view.set_meal_input(text);
    }

    pub fn set_cals_input(&mut self, text: impl Into<String>) {
        self.view.set_cals_input(text);
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        self.write_error = None;
        if action.button().is_some_and(|b| !self.view.is_visible(b)) {
            tracing::debug!(?action, "button hidden, ignoring");
            return Outcome::Ignored(Reason::ButtonHidden);
        }

        let outcome = match action {
            Action::Add => self.add(),
            Action::ClearAll => self.clear_all(),
            Action::Select(id) => self.select(id),
            Action::Back => self.back(),
            Action::Update => self.update(),
            Action::Delete => self.delete(),
        };
        tracing::debug!(?action, ?outcome, total = self.store.total(), "dispatched");
        outcome
    }

    fn add(&mut self) -> Outcome {
        let form = self.view.read_form();
        let Some(input) = MealInput::from_form(&form.meal, &form.cals) else {
            return Outcome::Ignored(Reason::InvalidInput);
        };

        if self.store.total().checked_add(input.cals).is_none() {
            return Outcome::Ignored(Reason::InvalidInput);
        }
        let Some(id) = self.store.add(&input.meal, input.cals) else {
            return Outcome::Ignored(Reason::InvalidInput);
        };
        self.store.add_to_total(input.cals);
        self.view.append_one(&input.meal, input.cals, id, self.store.total());
        self.persist();
        Outcome::Applied
    }

    fn clear_all(&mut self) -> Outcome {
        self.view.clear_all();
        self.store.clear();
        if let Err(e) = self.persistence.clear() {
            tracing::warn!("failed to clear stored items: {e:#}");
            self.write_error = Some(e);
        }
        Outcome::Applied
    }

    fn select(&mut self, id: i64) -> Outcome {
        let Some(handle) = self.view.node_for(id) else {
            return Outcome::Ignored(Reason::UnknownItem);
        };
        self.store.begin_edit(id);
        self.view.set_mode(ViewMode::Editing(handle));
        Outcome::Applied
    }

    fn back(&mut self) -> Outcome {
        self.view.set_mode(ViewMode::Adding);
        self.store.cancel_edit();
        Outcome::Applied
    }

    fn update(&mut self) -> Outcome {
        let form = self.view.read_form();
        let outcome = match MealInput::from_form(&form.meal, &form.cals) {
            None => Outcome::Ignored(Reason::InvalidInput),
            Some(input) => match self.selected_node() {
                None => Outcome::Ignored(Reason::UnknownItem),
                Some(handle) => {
                    self.store.apply_edit(&input.meal, input.cals);
                    self.view.update_node(handle, &input.meal, input.cals);
                    self.view.set_mode(ViewMode::Adding);
                    self.view.set_total(self.store.total());
                    Outcome::Applied
                }
            },
        };
        // Written back even when nothing changed.
        self.persist();
        outcome
    }

    fn delete(&mut self) -> Outcome {
        if let Some(handle) = self.selected_node() {
            self.view.remove_node(handle);
        }
        self.view.set_mode(ViewMode::Adding);
        self.store.remove_current();
        self.persist();
        self.view.set_total(self.store.total());
        Outcome::Applied
    }

    fn selected_node(&self) -> Option<NodeHandle> {
        self.store.current_id().and_then(|id| self.view.node_for(id))
    }

    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(self.store.list()) {
            tracing::warn!("failed to save items: {e:#}");
            self.write_error = Some(e);
        }
    }
}
