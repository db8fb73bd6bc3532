pub mod claude_hooks;
pub mod gemini;

use crate::core::error::Result;
use crate::hooks::HookTarget;
use clap::ValueEnum;

/// Which agent's settings a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Agent {
    Claude,
    Gemini,
    All,
}

impl Agent {
    pub fn targets(self, port: u16) -> Result<Vec<HookTarget>> {
        Ok(match self {
            Agent::Claude => vec![claude_hooks::target(port)?],
            Agent::Gemini => vec![gemini::target(port)?],
            Agent::All => vec![claude_hooks::target(port)?, gemini::target(port)?],
        })
    }
}
