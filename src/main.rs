mod commands;
mod core;
mod hooks;
mod integrations;

use clap::{Parser, Subcommand};
use integrations::Agent;

/// hookwire: forward coding-agent lifecycle hooks to a local listener.
/// Installs and removes only its own entries; your other hooks are left as they are.
#[derive(Parser)]
#[command(name = "hookwire", version = env!("CARGO_PKG_VERSION"), about = "Wire agent hooks to a local listener")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    /// Listener port the hooks post to (default: ~/.hookwirerc, then 7337)
    #[arg(long, global = true, env = "HOOKWIRE_PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install hooks into the agent's settings.json
    Setup {
        #[arg(long, value_enum, default_value = "claude")]
        agent: Agent,
    },

    /// Remove only the hooks hookwire installed
    Remove {
        #[arg(long, value_enum, default_value = "claude")]
        agent: Agent,
    },

    /// Show which hook events are installed
    Status {
        #[arg(long, value_enum, default_value = "all")]
        agent: Agent,
    },

    /// Exit 0 if hooks are configured, 1 otherwise (for scripts)
    Check {
        #[arg(long, value_enum, default_value = "claude")]
        agent: Agent,
    },

    /// First run: offer to install hooks if they aren't configured yet
    Init {
        /// Install without asking
        #[arg(long, short)]
        yes: bool,
        #[arg(long, value_enum, default_value = "claude")]
        agent: Agent,
    },
}

fn targets_or_exit(agent: Agent, port: u16) -> Vec<hooks::HookTarget> {
    match agent.targets(port) {
        Ok(targets) => targets,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    core::logging::init(cli.verbose);

    let port = core::config::load_config().resolve_port(cli.port);
    tracing::debug!("Using listener port {}", port);

    match cli.command {
        Commands::Setup { agent } => {
            let targets = targets_or_exit(agent, port);
            if let Err(e) = commands::setup::run(&targets) {
                eprintln!("Error installing hooks: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Remove { agent } => {
            let targets = targets_or_exit(agent, port);
            if let Err(e) = commands::remove::run(&targets) {
                eprintln!("Error removing hooks: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Status { agent } => {
            let targets = targets_or_exit(agent, port);
            commands::status::run(&targets);
        }

        Commands::Check { agent } => {
            let targets = targets_or_exit(agent, port);
            if !targets.iter().any(|t| t.is_configured()) {
                std::process::exit(1);
            }
        }

        Commands::Init { yes, agent } => {
            let targets = targets_or_exit(agent, port);
            if let Err(e) = commands::init::run(&targets, yes) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
