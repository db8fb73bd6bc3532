use crate::core::error::Result;
use crate::hooks::HookTarget;
use std::io::{BufRead, Write};

/// First-run flow: when none of the targets has any of our events configured,
/// offer to run setup. Targets that are already configured are left alone.
pub fn run(targets: &[HookTarget], assume_yes: bool) -> Result<()> {
    let stdin = std::io::stdin();
    run_with_input(targets, assume_yes, &mut stdin.lock())
}

fn run_with_input(
    targets: &[HookTarget],
    assume_yes: bool,
    input: &mut impl BufRead,
) -> Result<()> {
    let b = "\x1b[1m"; // bold
    let d = "\x1b[2m"; // dim
    let r = "\x1b[0m"; // reset

    let pending: Vec<HookTarget> = targets
        .iter()
        .filter(|t| !t.is_configured())
        .cloned()
        .collect();

    if pending.is_empty() {
        println!("  {d}[skip]{r} Hooks already configured");
        return Ok(());
    }

    if !assume_yes {
        println!();
        println!("  {b}Hooks are not configured for:{r}");
        for target in &pending {
            println!("    {d}-{r} {} {d}({}){r}", target.name(), target.settings_path().display());
        }
        println!();
        print!("  {b}Install them now?{r} {d}[y/N]{r} ");
        std::io::stdout().flush().ok();
        let mut answer = String::new();
        input.read_line(&mut answer).unwrap_or(0);
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("  {d}Skipped. Run `hookwire setup` any time.{r}");
            return Ok(());
        }
    }

    super::setup::run(&pending)
}
