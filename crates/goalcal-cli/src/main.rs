use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "goalcal", version, about = "Goalcal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calendar provisioning and administration
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
    /// Login and session tokens
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Calendar settings
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Day entry management
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Year statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Admin { action } => commands::admin::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Day { action } => commands::day::run(action),
        Commands::Stats { action } => commands::stats::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
