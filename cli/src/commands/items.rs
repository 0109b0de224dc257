use anyhow::{Context, Result};

use caltrack_core::{Action, Database, Item, Outcome, Reason, Tracker};

use super::helpers::{exit_ignored, print_list, reason_message};

/// Fail the command if the last dispatched action could not be written back.
fn ensure_saved(tracker: &mut Tracker<Database>) -> Result<()> {
    match tracker.take_write_error() {
        Some(e) => Err(e).context("Failed to save items"),
        None => Ok(()),
    }
}

pub(crate) fn cmd_list(tracker: &Tracker<Database>, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "items": tracker.items(),
                "total": tracker.total(),
            }))?
        );
    } else {
        print_list(tracker.view());
    }
    Ok(())
}

pub(crate) fn cmd_add(
    mut tracker: Tracker<Database>,
    meal: &str,
    cals: &str,
    json: bool,
) -> Result<()> {
    tracker.fill_form(meal, cals);
    if let Outcome::Ignored(reason) = tracker.dispatch(Action::Add) {
        exit_ignored(reason_message(reason), json);
    }
    ensure_saved(&mut tracker)?;

    let Some(item) = tracker.items().last().cloned() else {
        exit_ignored(reason_message(Reason::UnknownItem), json);
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        let Item { id, meal, cals } = item;
        let total = tracker.total();
        println!("Added [{id}] {meal} ({cals} kcal), total {total} kcal");
    }
    Ok(())
}

pub(crate) fn cmd_edit(
    mut tracker: Tracker<Database>,
    id: i64,
    meal: &str,
    cals: &str,
    json: bool,
) -> Result<()> {
    if let Outcome::Ignored(_) = tracker.dispatch(Action::Select(id)) {
        exit_ignored(&format!("Item {id} not found"), json);
    }
    tracker.fill_form(meal, cals);
    let outcome = tracker.dispatch(Action::Update);
    ensure_saved(&mut tracker)?;
    if let Outcome::Ignored(reason) = outcome {
        exit_ignored(reason_message(reason), json);
    }

    let Some(item) = tracker.items().iter().find(|i| i.id == id).cloned() else {
        exit_ignored(&format!("Item {id} not found"), json);
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        let Item { id, meal, cals } = item;
        let total = tracker.total();
        println!("Updated [{id}] {meal} ({cals} kcal), total {total} kcal");
    }
    Ok(())
}

pub(crate) fn cmd_delete(mut tracker: Tracker<Database>, id: i64, json: bool) -> Result<()> {
    if let Outcome::Ignored(_) = tracker.dispatch(Action::Select(id)) {
        exit_ignored(&format!("Item {id} not found"), json);
    }
    tracker.dispatch(Action::Delete);
    ensure_saved(&mut tracker)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "deleted": id, "total": tracker.total() })
        );
    } else {
        let total = tracker.total();
        println!("Deleted item {id}, total {total} kcal");
    }
    Ok(())
}

pub(crate) fn cmd_clear(mut tracker: Tracker<Database>, json: bool) -> Result<()> {
    let count = tracker.items().len();
    match tracker.dispatch(Action::ClearAll) {
        Outcome::Applied => {}
        Outcome::Ignored(reason) => exit_ignored(reason_message(reason), json),
    }
    if let Some(e) = tracker.take_write_error() {
        return Err(e.context("Failed to clear items"));
    }

    if json {
        println!("{}", serde_json::json!({ "cleared": count }));
    } else {
        println!("Cleared {count} items");
    }
    Ok(())
}
