use serde::Serialize;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use caltrack_core::Reason;
use caltrack_core::view::{Button, ItemNode, ListView, ViewMode};

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn reason_message(reason: Reason) -> &'static str {
    match reason {
        Reason::InvalidInput => "Meal name must not be empty and calories must be a number",
        Reason::ButtonHidden => "That action is not available right now",
        Reason::UnknownItem => "No such item",
    }
}

/// Report an ignored action and exit with status 2.
pub(crate) fn exit_ignored(message: &str, json: bool) -> ! {
    if json {
        println!("{}", json_error(message));
    } else {
        eprintln!("{message}");
    }
    process::exit(2);
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

pub(crate) fn items_table<'a>(nodes: impl Iterator<Item = &'a ItemNode>) -> String {
    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Meal")]
        meal: String,
        #[tabled(rename = "Calories")]
        cals: String,
    }

    let rows: Vec<ItemRow> = nodes
        .map(|n| ItemRow {
            id: n.id,
            meal: truncate(&n.meal, 40),
            cals: n.cals.clone(),
        })
        .collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..3)).with(Alignment::right()))
        .to_string()
}

pub(crate) fn print_list(view: &ListView) {
    if view.nodes().next().is_none() {
        println!("No items yet");
    } else {
        println!("{}", items_table(view.nodes()));
    }
    println!("Total: {} kcal", view.total_text());
}

/// Full screen: list, total, form contents, and the buttons on offer.
pub(crate) fn print_screen(view: &ListView) {
    print_list(view);

    let form = view.read_form();
    match view.mode() {
        ViewMode::Adding => println!("[adding]  meal: {:?}  cals: {:?}", form.meal, form.cals),
        ViewMode::Editing(handle) => {
            let id = view.node(handle).map_or_else(|| "?".to_string(), |n| n.id.to_string());
            println!(
                "[editing {id}]  meal: {:?}  cals: {:?}",
                form.meal, form.cals
            );
        }
    }

    let buttons: Vec<&str> = [
        (Button::Add, "add"),
        (Button::Update, "update"),
        (Button::Delete, "delete"),
        (Button::Back, "back"),
        (Button::ClearAll, "clear"),
    ]
    .into_iter()
    .filter(|(b, _)| view.is_visible(*b))
    .map(|(_, label)| label)
    .collect();
    println!("actions: {}", buttons.join(" | "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use caltrack_core::Item;

    #[test]
    fn test_json_error() {
        assert_eq!(json_error("No such item"), r#"{"error":"No such item"}"#);
        assert_eq!(json_error("say \"hi\""), r#"{"error":"say \"hi\""}"#);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Eggs", 10), "Eggs");
        assert_eq!(truncate("Scrambled eggs on toast", 10), "Scrambl...");
    }

    #[test]
    fn test_truncate_utf8() {
        assert_eq!(truncate("Crème brûlée tart", 10), "Crème b...");
        assert_eq!(truncate("日清カップヌードル", 8), "日清カップ...");
    }

    #[test]
    fn test_items_table_contains_rows() {
        let mut view = ListView::new();
        view.render_all(&[Item::new(1, "Eggs", 200), Item::new(2, "<i>Toast</i>", 100)]);
        let table = items_table(view.nodes());
        assert!(table.contains("Eggs"));
        assert!(table.contains("<i>Toast</i>"));
        assert!(table.contains("200"));
        assert!(table.contains("Calories"));
    }

    #[test]
    fn test_reason_messages_are_distinct() {
        let all = [Reason::InvalidInput, Reason::ButtonHidden, Reason::UnknownItem];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(reason_message(*a), reason_message(*b));
            }
        }
    }
}
