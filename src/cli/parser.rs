use clap::{Parser, Subcommand};

/// Command-line interface definition for rworkwatch
/// Tracks work sessions and breaks from keyboard/mouse activity
#[derive(Parser)]
#[command(
    name = "rworkwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Activity-driven work/break tracker: records work sessions and breaks per work day in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Watch keyboard/mouse activity and record sessions until stopped
    Watch,

    /// Show the current status and today's totals
    Status,

    /// Show the sessions of a month
    List {
        #[arg(long = "month", value_name = "YYYY-MM", help = "Month to show (default: current)")]
        month: Option<String>,

        #[arg(long = "json", help = "Print the month as JSON")]
        json: bool,
    },

    /// Correct a recorded session or break
    Edit {
        /// Work day (YYYY-MM-DD)
        date: String,

        #[arg(long = "session", help = "Session number as shown by `list` (1-based)")]
        session: usize,

        #[arg(long = "break", help = "Break number within the session (1-based)")]
        brk: Option<usize>,

        #[arg(long = "in", help = "New start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "New end time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "delete", help = "Delete the session (or break)")]
        delete: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
