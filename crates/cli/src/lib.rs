pub mod commands;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use lana_core::config::{AppConfig, LoadOptions, LogFormat, LoggingConfig};

#[derive(Debug, Parser)]
#[command(
    name = "lana",
    about = "Lana operator CLI",
    long_about = "Operate Lana guest communication automation: classify guest messages, run the \
                  auto-reply pipeline, inspect configuration, and validate runtime readiness.",
    after_help = "Examples:\n  lana classify --message \"Is there parking nearby?\"\n  lana reply --guest-name Maya --message \"What time is checkout?\"\n  lana doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Classify a guest message into category, urgency, and attention flag")]
    Classify {
        #[arg(long, help = "Guest message text to classify")]
        message: String,
    },
    #[command(about = "Run the full auto-reply pipeline: classify, gate, and generate")]
    Reply(ReplyArgs),
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, API key readiness, and the business-hours window")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct ReplyArgs {
    #[arg(long, help = "Guest display name")]
    pub guest_name: String,
    #[arg(long, help = "Inbound guest message text")]
    pub message: String,
    #[arg(long, help = "Property name for prompt context")]
    pub property: Option<String>,
    #[arg(long, help = "Check-in date for prompt context")]
    pub check_in: Option<String>,
    #[arg(long, help = "Check-out date for prompt context")]
    pub check_out: Option<String>,
    #[arg(long, help = "Host name used for the reply sign-off")]
    pub host_name: Option<String>,
}

fn init_logging() {
    use tracing::Level;

    let logging = AppConfig::load(LoadOptions::default()).map(|config| config.logging).unwrap_or(
        LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
    );
    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let builder = tracing_subscriber::fmt().with_target(false).with_max_level(log_level);
    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

pub fn run() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Classify { message } => commands::classify::run(&message),
        Command::Reply(args) => commands::reply::run(&args),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
