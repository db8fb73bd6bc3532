use crate::core::error::Result;
use crate::hooks::{HookTarget, SetupOutcome};

pub fn run(targets: &[HookTarget]) -> Result<()> {
    let bg = "\x1b[1;32m"; // bold green
    let d = "\x1b[2m"; // dim
    let r = "\x1b[0m"; // reset

    println!();
    for target in targets {
        match target.setup()? {
            SetupOutcome::AgentNotFound => {
                println!(
                    "  {d}[skip]{r} {} not found {d}({} does not exist){r}",
                    target.name(),
                    target
                        .settings_path()
                        .parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                );
            }
            SetupOutcome::Installed {
                added,
                already_present,
            } => {
                if added.is_empty() {
                    println!(
                        "  {d}[skip]{r} {} hooks already installed",
                        target.name()
                    );
                } else {
                    println!(
                        "  {bg}[done]{r} Installed {} {} hook(s): {}",
                        added.len(),
                        target.name(),
                        added.join(", ")
                    );
                }
                if !added.is_empty() && !already_present.is_empty() {
                    println!(
                        "         {d}already present: {}{r}",
                        already_present.join(", ")
                    );
                }
                println!("         {d}→ {}{r}", target.settings_path().display());
                println!(
                    "         {d}→ events post to {}{r}",
                    target.catalog().signature()
                );
            }
        }
    }
    println!();
    Ok(())
}
