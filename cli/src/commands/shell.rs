use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

use caltrack_core::{Action, KeyValueStore, Outcome, Tracker};

use super::helpers::{print_list, print_screen, reason_message};

const HELP: &str = "\
commands:
  meal <text>          type into the meal field
  cals <text>          type into the calories field
  add [<meal> <cals>]  add the form as a new item
  edit <id>            open an item for editing
  update [<meal> <cals>]
                       save the form over the item being edited
  delete               delete the item being edited
  back                 stop editing
  clear                remove every item
  list                 show the screen again
  help                 show this help
  quit                 leave";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Meal(String),
    Cals(String),
    Act(Action),
    /// Fill both inputs, then act.
    Fill {
        meal: String,
        cals: String,
        then: Action,
    },
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

    let cmd = match word {
        "meal" => ShellCommand::Meal(rest.to_string()),
        "cals" => ShellCommand::Cals(rest.to_string()),
        "add" => with_optional_fill(rest, Action::Add)?,
        "update" => with_optional_fill(rest, Action::Update)?,
        "edit" => {
            let id: i64 = rest
                .trim()
                .parse()
                .with_context(|| format!("Invalid item ID: '{}'", rest.trim()))?;
            ShellCommand::Act(Action::Select(id))
        }
        "delete" => ShellCommand::Act(Action::Delete),
        "back" => ShellCommand::Act(Action::Back),
        "clear" => ShellCommand::Act(Action::ClearAll),
        "list" | "ls" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => bail!("Unknown command '{other}'. Type 'help' for a list"),
    };
    Ok(Some(cmd))
}

/// `add Scrambled eggs 250` splits on the last space: everything before it
/// is the meal, the last word is the calories.
fn with_optional_fill(rest: &str, then: Action) -> Result<ShellCommand> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(ShellCommand::Act(then));
    }
    let Some((meal, cals)) = rest.rsplit_once(' ') else {
        bail!("Expected '<meal> <cals>', got '{rest}'");
    };
    Ok(ShellCommand::Fill {
        meal: meal.trim_end().to_string(),
        cals: cals.to_string(),
        then,
    })
}

enum Step {
    Continue { redraw: bool, note: Option<String> },
    Quit,
}

fn execute<S: KeyValueStore>(tracker: &mut Tracker<S>, cmd: ShellCommand) -> Step {
    let action = match cmd {
        ShellCommand::Meal(text) => {
            tracker.set_meal_input(text);
            return Step::Continue {
                redraw: false,
                note: None,
            };
        }
        ShellCommand::Cals(text) => {
            tracker.set_cals_input(text);
            return Step::Continue {
                redraw: false,
                note: None,
            };
        }
        ShellCommand::Show => {
            return Step::Continue {
                redraw: true,
                note: None,
            };
        }
        ShellCommand::Help => {
            return Step::Continue {
                redraw: false,
                note: Some(HELP.to_string()),
            };
        }
        ShellCommand::Quit => return Step::Quit,
        ShellCommand::Act(action) => action,
        ShellCommand::Fill { meal, cals, then } => {
            tracker.fill_form(meal, cals);
            then
        }
    };

    let (redraw, note) = match tracker.dispatch(action) {
        Outcome::Applied => (true, None),
        Outcome::Ignored(reason) => (false, Some(reason_message(reason).to_string())),
    };
    // The session keeps its in-memory state; only the write is reported.
    let note = match (tracker.take_write_error(), note) {
        (Some(e), None) => Some(format!("Failed to save items: {e:#}")),
        (Some(e), Some(note)) => Some(format!("{note}\nFailed to save items: {e:#}")),
        (None, note) => note,
    };
    Step::Continue { redraw, note }
}

pub(crate) fn cmd_shell<S: KeyValueStore>(mut tracker: Tracker<S>) -> Result<()> {
    print_screen(tracker.view());
    eprintln!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("> ");
        io::stderr().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        let cmd = match parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };

        match execute(&mut tracker, cmd) {
            Step::Quit => break,
            Step::Continue { redraw, note } => {
                if let Some(note) = note {
                    eprintln!("{note}");
                }
                if redraw {
                    print_screen(tracker.view());
                }
            }
        }
    }

    print_list(tracker.view());
    Ok(())
}
