use crate::core::error::Result;
use crate::hooks::{HookTarget, RemoveOutcome};

pub fn run(targets: &[HookTarget]) -> Result<()> {
    let bg = "\x1b[1;32m"; // bold green
    let d = "\x1b[2m"; // dim
    let r = "\x1b[0m"; // reset

    for target in targets {
        let path = target.settings_path().display();
        match target.remove()? {
            RemoveOutcome::NoSettingsFile => {
                println!("  {d}[skip]{r} No {} found", path);
            }
            RemoveOutcome::NoHooksSection => {
                println!("  {d}[skip]{r} No hooks configured in {}", path);
            }
            RemoveOutcome::Removed { removed } if removed.is_empty() => {
                println!(
                    "  {d}[skip]{r} No {} hooks of ours in {}",
                    target.name(),
                    path
                );
            }
            RemoveOutcome::Removed { removed } => {
                println!(
                    "  {bg}[done]{r} Removed {} hooks {d}({}){r}",
                    target.name(),
                    removed.join(", ")
                );
                println!("         {d}→ {}{r}", path);
            }
        }
    }
    Ok(())
}
