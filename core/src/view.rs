//! Headless view model for the tracker screen.
//!
//! `ListView` plays the part of the page: two form inputs, a list of item
//! nodes with an edit affordance each, a total display, and mode-dependent
//! buttons. Everything it holds is plain text, so front-ends print it
//! verbatim without any markup step.

use std::collections::HashMap;

use crate::models::{Item, total_cals};

/// Stable handle to a rendered node. Handles are invalidated by
/// [`ListView::render_all`] and [`ListView::clear_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

/// One rendered list entry: meal label, calorie text, and the item id it
/// was rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNode {
    pub id: i64,
    pub meal: String,
    pub cals: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Adding,
    Editing(NodeHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Add,
    Update,
    Delete,
    Back,
    ClearAll,
}

/// Raw text currently typed into the two inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub meal: String,
    pub cals: String,
}

#[derive(Debug)]
pub struct ListView {
    slots: Vec<Option<ItemNode>>,
    by_id: HashMap<i64, NodeHandle>,
    form: FormState,
    total_text: String,
    mode: ViewMode,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            by_id: HashMap::new(),
            form: FormState::default(),
            total_text: "0".to_string(),
            mode: ViewMode::Adding,
        }
    }
}

impl ListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Form ---

    pub fn set_meal_input(&mut self, text: impl Into<String>) {
        self.form.meal = text.into();
    }

    pub fn set_cals_input(&mut self, text: impl Into<String>) {
        self.form.cals = text.into();
    }

    #[must_use]
    pub fn read_form(&self) -> &FormState {
        &self.form
    }

    fn clear_inputs(&mut self) {
        self.form = FormState::default();
    }

    // --- List ---

    /// Replace every node with one node per item and show their sum.
    pub fn render_all(&mut self, items: &[Item]) {
        self.slots.clear();
        self.by_id.clear();
        for item in items {
            self.push_node(item.id, &item.meal, item.cals);
        }
        self.set_total(total_cals(items));
    }

    /// Append a freshly added item, show `running_total`, and clear the form.
    pub fn append_one(
        &mut self,
        meal: &str,
        cals: i64,
        id: i64,
        running_total: i64,
    ) -> NodeHandle {
        let handle = self.push_node(id, meal, cals);
        self.set_total(running_total);
        self.clear_inputs();
        handle
    }

    pub fn update_node(&mut self, handle: NodeHandle, meal: &str, cals: i64) {
        if let Some(Some(node)) = self.slots.get_mut(handle.0) {
            node.meal = meal.to_string();
            node.cals = cals.to_string();
        }
    }

    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.slots.get_mut(handle.0).and_then(Option::take) else {
            return;
        };
        if self.by_id.get(&node.id) == Some(&handle) {
            self.by_id.remove(&node.id);
        }
    }

    /// Drop all nodes and reset the total display to 0.
    pub fn clear_all(&mut self) {
        self.slots.clear();
        self.by_id.clear();
        self.set_total(0);
    }

    #[must_use]
    pub fn node_for(&self, id: i64) -> Option<NodeHandle> {
        self.by_id.get(&id).copied()
    }

    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&ItemNode> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    /// Rendered nodes in display order.
    pub fn nodes(&self) -> impl Iterator<Item = &ItemNode> {
        self.slots.iter().flatten()
    }

    fn push_node(&mut self, id: i64, meal: &str, cals: i64) -> NodeHandle {
        let handle = NodeHandle(self.slots.len());
        self.slots.push(Some(ItemNode {
            id,
            meal: meal.to_string(),
            cals: cals.to_string(),
        }));
        self.by_id.insert(id, handle);
        handle
    }

    // --- Total ---

    pub fn set_total(&mut self, total: i64) {
        self.total_text = total.to_string();
    }

    #[must_use]
    pub fn total_text(&self) -> &str {
        &self.total_text
    }

    // --- Mode ---

    /// Switch between adding and editing. Entering edit mode copies the
    /// source node's text into the form; leaving it clears the form.
    pub fn set_mode(&mut self, mode: ViewMode) {
        match mode {
            ViewMode::Editing(handle) => {
                if let Some(node) = self.node(handle) {
                    self.form = FormState {
                        meal: node.meal.clone(),
                        cals: node.cals.clone(),
                    };
                }
            }
            ViewMode::Adding => self.clear_inputs(),
        }
        self.mode = mode;
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn is_visible(&self, button: Button) -> bool {
        let editing = matches!(self.mode, ViewMode::Editing(_));
        match button {
            Button::Add => !editing,
            Button::Update | Button::Delete | Button::Back => editing,
            Button::ClearAll => true,
        }
    }
}
