use crate::hooks::detect::EventState;
use crate::hooks::HookTarget;
use comfy_table::{Cell, Color, Table};

fn state_cell(state: EventState) -> Cell {
    let color = match state {
        EventState::Installed => Color::Green,
        EventState::Partial => Color::Yellow,
        EventState::Missing => Color::DarkGrey,
        EventState::Malformed => Color::Red,
    };
    Cell::new(state.to_string()).fg(color)
}

/// Print a per-event table for each target. Unreadable settings files are
/// reported inline rather than aborting the whole report.
pub fn run(targets: &[HookTarget]) {
    for target in targets {
        println!();
        println!(
            "\x1b[1m{}\x1b[0m \x1b[2m({}){}\x1b[0m",
            target.name(),
            target.settings_path().display(),
            if target.is_configured() { "" } else { " · not configured" }
        );

        let rows = match target.status() {
            Ok(Some(rows)) => rows,
            Ok(None) => {
                println!("  \x1b[2mNo settings file\x1b[0m");
                continue;
            }
            Err(e) => {
                println!("  \x1b[1;31m{}\x1b[0m", e);
                continue;
            }
        };

        let mut table = Table::new();
        table.set_header(vec!["Event", "Matcher", "State"]);

        for entry in target.catalog().entries() {
            let state = rows
                .iter()
                .find(|(event, _)| *event == entry.event)
                .map(|(_, s)| *s)
                .unwrap_or(EventState::Missing);
            table.add_row(vec![
                Cell::new(entry.event),
                Cell::new(entry.matcher.unwrap_or("")),
                state_cell(state),
            ]);
        }
        println!("{table}");
    }
    println!();
}
