//! Paralegal - agent-side gateway for a legal control plane

use clap::{Parser, Subcommand};
use tracing::error;

mod commands;

use commands::{
    approval_command, case_command, cases_command, notify_command, schedule_add_command,
    schedule_remove_command, schedule_update_command, status_command, tasks_command, tools_command,
    watch_command,
};

/// Paralegal - control-plane gateway for the case bot
#[derive(Parser)]
#[command(name = "paralegal")]
#[command(about = "Gateway client for the legal control plane")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show control-plane status (heartbeat)
    Status,
    /// List the lawyer's cases
    Cases,
    /// Show one case in detail
    Case {
        /// Case ID
        id: String,
    },
    /// Poll an approval request
    Approval {
        /// Approval ID
        id: String,
    },
    /// List self-queued tasks
    Tasks {
        /// Filter by status
        #[arg(short, long)]
        status: Option<String>,
        /// Max results
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Send a notification to the lawyer
    Notify {
        /// Subject line
        #[arg(short, long)]
        subject: String,
        /// Message body
        #[arg(short, long)]
        message: String,
        /// Mark as urgent
        #[arg(short, long)]
        urgent: bool,
        /// Associated case ID
        #[arg(short, long)]
        case: Option<String>,
    },
    /// Show the tool surfaces exposed to the agent runtime
    Tools,
    /// Manage control-plane schedules
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Run the heartbeat loop
    Watch {
        /// Heartbeat interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,
        /// Verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Subcommand)]
enum ScheduleCommands {
    /// Add a schedule
    Add {
        #[arg(short, long)]
        name: String,
        /// cron, daily, weekday, hourly, interval
        #[arg(short = 't', long)]
        schedule_type: String,
        /// Schedule value (cron expr, ISO time, ms)
        #[arg(short = 'v', long)]
        schedule_value: String,
        /// Task type, e.g. deadline_check, briefing
        #[arg(short = 'k', long)]
        task_type: String,
    },
    /// Enable or disable a schedule
    Update {
        id: String,
        #[arg(short, long)]
        enabled: Option<bool>,
        #[arg(short = 'v', long)]
        schedule_value: Option<String>,
    },
    /// Remove a schedule
    Remove { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbose flag in Watch command
    if matches!(cli.command, Commands::Watch { verbose: true, .. }) {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let result = match cli.command {
        Commands::Status => status_command().await,
        Commands::Cases => cases_command().await,
        Commands::Case { id } => case_command(id).await,
        Commands::Approval { id } => approval_command(id).await,
        Commands::Tasks { status, limit } => tasks_command(status, limit).await,
        Commands::Notify {
            subject,
            message,
            urgent,
            case,
        } => notify_command(subject, message, urgent, case).await,
        Commands::Tools => tools_command().await,
        Commands::Schedule { command } => match command {
            ScheduleCommands::Add {
                name,
                schedule_type,
                schedule_value,
                task_type,
            } => schedule_add_command(name, schedule_type, schedule_value, task_type).await,
            ScheduleCommands::Update {
                id,
                enabled,
                schedule_value,
            } => schedule_update_command(id, enabled, schedule_value).await,
            ScheduleCommands::Remove { id } => schedule_remove_command(id).await,
        },
        Commands::Watch { interval, .. } => watch_command(interval).await,
    };

    if let Err(e) = result {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
