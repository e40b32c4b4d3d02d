mod cmd;

use clap::{Parser, Subcommand};
use cmd::schedule::InputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chime",
    about = "Minute-resolution desktop notification scheduler",
    version,
    propagate_version = true
)]
struct Cli {
    /// Schedule database (created on first use)
    #[arg(long, global = true, env = "CHIME_DB", default_value = "chime.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a notification schedule
    ///
    /// Two input modes are available:
    ///   stdin  reads the title, body, and rule from prompts on standard input
    ///   cli    takes everything from flags (--title, --body, and --rrule)
    ///
    /// Examples:
    ///   chime schedule --input cli --title "Meeting Reminder" \
    ///     --body "Don't forget the meeting at 10 AM" --rrule "FREQ=DAILY;INTERVAL=1"
    ///
    ///   printf "Meeting Reminder\nDon't forget\nFREQ=DAILY;INTERVAL=1\n" | chime schedule
    #[command(verbatim_doc_comment)]
    Schedule {
        /// Input mode (stdin or cli)
        #[arg(long, value_enum, default_value = "stdin")]
        input: InputMode,

        /// Title of the schedule entry
        #[arg(long)]
        title: Option<String>,

        /// Body/description of the schedule entry
        #[arg(long)]
        body: Option<String>,

        /// Recurrence rule in iCalendar format (e.g., FREQ=WEEKLY)
        #[arg(long)]
        rrule: Option<String>,
    },

    /// Run the dispatch loop, checking schedules every minute
    Daemon,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Daemon => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Schedule {
            input,
            title,
            body,
            rrule,
        } => cmd::schedule::run(&cli.db, input, title, body, rrule),
        Commands::Daemon => cmd::daemon::run(&cli.db),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
