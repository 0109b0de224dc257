use crate::models::{Item, total_cals};

/// In-memory authoritative item list with its running total and the id
/// currently open for editing.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    total: i64,
    current: Option<i64>,
}

impl ItemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Id the next added item will get, or `None` once ids are exhausted.
    #[must_use]
    pub fn next_id(&self) -> Option<i64> {
        match self.items.iter().map(|i| i.id).max() {
            None => Some(1),
            Some(max) => max.checked_add(1),
        }
    }

    /// Append a new item and return its id. The running total is not touched;
    /// callers follow up with [`ItemStore::add_to_total`]. Returns `None`
    /// without appending when no id is left.
    pub fn add(&mut self, meal: &str, cals: i64) -> Option<i64> {
        let id = self.next_id()?;
        self.items.push(Item::new(id, meal, cals));
        Some(id)
    }

    pub fn add_to_total(&mut self, cals: i64) {
        self.total = self.total.saturating_add(cals);
    }

    pub fn begin_edit(&mut self, id: i64) {
        self.current = Some(id);
    }

    pub fn cancel_edit(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn current_id(&self) -> Option<i64> {
        self.current
    }

    /// Overwrite the current item. Total is recomputed and the selection is
    /// cleared even when nothing matched.
    pub fn apply_edit(&mut self, meal: &str, cals: i64) {
        let current = self.current;
        if let Some(item) = self.items.iter_mut().find(|i| Some(i.id) == current) {
            item.meal = meal.to_string();
            item.cals = cals;
        }
        self.recompute_total();
        self.current = None;
    }

    pub fn remove_current(&mut self) {
        if let Some(idx) = self.items.iter().position(|i| Some(i.id) == self.current) {
            self.items.remove(idx);
        }
        self.recompute_total();
        self.current = None;
    }

    /// Empty the list and reset the total. The selection is left as is.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0;
    }

    /// Replace the list with a persisted snapshot. An empty snapshot leaves
    /// the store untouched.
    pub fn hydrate(&mut self, snapshot: Vec<Item>) {
        if snapshot.is_empty() {
            return;
        }
        self.items = snapshot;
        self.recompute_total();
        self.current = None;
    }

    fn recompute_total(&mut self) {
        self.total = total_cals(&self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eggs_and_toast() -> ItemStore {
        let mut store = ItemStore::new();
        store.hydrate(vec![Item::new(1, "Eggs", 200), Item::new(2, "Toast", 100)]);
        store
    }

    #[test]
    fn test_add_assigns_one_when_empty() {
        let mut store = ItemStore::new();
        assert_eq!(store.add("Eggs", 200), Some(1));
        assert_eq!(store.list(), &[Item::new(1, "Eggs", 200)]);
    }

    #[test]
    fn test_add_does_not_touch_total() {
        let mut store = ItemStore::new();
        store.add("Eggs", 200);
        assert_eq!(store.total(), 0);
        store.add_to_total(200);
        assert_eq!(store.total(), 200);
    }

    #[test]
    fn test_total_tracks_sum_over_adds() {
        let mut store = ItemStore::new();
        for (meal, cals) in [("Eggs", 200), ("Toast", 100), ("Juice", -5), ("Jam", 0)] {
            store.add(meal, cals);
            store.add_to_total(cals);
            assert_eq!(store.total(), total_cals(store.list()));
        }
        assert_eq!(store.total(), 295);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = ItemStore::new();
        store.add("a", 1);
        store.add("b", 2);
        store.add("c", 3);
        store.begin_edit(2);
        store.remove_current();
        assert_eq!(store.add("d", 4), Some(4));
    }

    #[test]
    fn test_id_uses_max_not_last() {
        let mut store = ItemStore::new();
        store.hydrate(vec![Item::new(5, "a", 1), Item::new(2, "b", 1)]);
        assert_eq!(store.add("c", 1), Some(6));
    }

    #[test]
    fn test_add_when_ids_exhausted() {
        let mut store = ItemStore::new();
        store.hydrate(vec![Item::new(i64::MAX, "x", 1)]);
        assert_eq!(store.next_id(), None);
        assert_eq!(store.add("y", 2), None);
        assert_eq!(store.list(), &[Item::new(i64::MAX, "x", 1)]);
    }

    #[test]
    fn test_apply_edit() {
        let mut store = eggs_and_toast();
        store.begin_edit(2);
        store.apply_edit("Salad", 150);
        assert_eq!(
            store.list(),
            &[Item::new(1, "Eggs", 200), Item::new(2, "Salad", 150)]
        );
        assert_eq!(store.total(), 350);
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn test_apply_edit_stale_selection_still_recomputes() {
        let mut store = eggs_and_toast();
        store.add_to_total(1000);
        store.begin_edit(99);
        store.apply_edit("Ghost", 1);
        assert_eq!(store.list().len(), 2);
        assert_eq!(store.total(), 300);
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn test_apply_edit_without_selection() {
        let mut store = eggs_and_toast();
        store.apply_edit("Ghost", 1);
        assert_eq!(store.list()[0].meal, "Eggs");
        assert_eq!(store.total(), 300);
    }

    #[test]
    fn test_remove_current() {
        let mut store = eggs_and_toast();
        store.begin_edit(1);
        store.remove_current();
        assert_eq!(store.list(), &[Item::new(2, "Toast", 100)]);
        assert_eq!(store.total(), 100);
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn test_remove_current_missing_is_noop() {
        let mut store = eggs_and_toast();
        store.begin_edit(42);
        store.remove_current();
        assert_eq!(store.list().len(), 2);
        assert_eq!(store.total(), 300);
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn test_cancel_edit() {
        let mut store = eggs_and_toast();
        store.begin_edit(1);
        assert_eq!(store.current_id(), Some(1));
        store.cancel_edit();
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn test_clear_keeps_selection() {
        // Clearing does not drop the selection, so a later edit may point at
        // an id that no longer exists.
        let mut store = eggs_and_toast();
        store.begin_edit(2);
        store.clear();
        assert!(store.list().is_empty());
        assert_eq!(store.total(), 0);
        assert_eq!(store.current_id(), Some(2));
    }

    #[test]
    fn test_clear_without_selection() {
        let mut store = eggs_and_toast();
        store.clear();
        assert!(store.list().is_empty());
        assert_eq!(store.total(), 0);
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn test_hydrate_recomputes_total() {
        let store = eggs_and_toast();
        assert_eq!(store.total(), 300);
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn test_hydrate_empty_keeps_existing_items() {
        let mut store = eggs_and_toast();
        store.hydrate(Vec::new());
        assert_eq!(store.list().len(), 2);
        assert_eq!(store.total(), 300);
    }

    #[test]
    fn test_hydrate_replaces_wholesale() {
        let mut store = eggs_and_toast();
        store.hydrate(vec![Item::new(7, "Soup", 80)]);
        assert_eq!(store.list(), &[Item::new(7, "Soup", 80)]);
        assert_eq!(store.total(), 80);
    }
}
