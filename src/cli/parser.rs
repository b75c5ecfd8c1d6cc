use crate::reader::SourceFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rContaPyme
/// CLI application to turn inventory files into ContaPyme CSV imports
#[derive(Parser)]
#[command(
    name = "rcontapyme",
    version = env!("CARGO_PKG_VERSION"),
    about = "Import inventory files (CSV/XLSX/XLS), spread quantities by weekday and export the ContaPyme CSV",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the directory where uploaded files are staged
    #[arg(global = true, long = "uploads", value_name = "DIR")]
    pub uploads: Option<String>,

    /// Print the JSON document of the operation instead of the human output
    #[arg(global = true, long = "json")]
    pub json: bool,

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

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

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

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Import an inventory file and replace the current batch
    Import {
        /// Inventory file (.csv, .xlsx or .xls)
        #[arg(value_name = "FILE")]
        file: String,

        /// Declared file kind (default: taken from the extension)
        #[arg(long, value_enum)]
        kind: Option<SourceFormat>,
    },

    /// Show the current batch with statistics
    Preview {
        #[arg(long, short = 'n', help = "Show at most N records in the table")]
        limit: Option<usize>,
    },

    /// Write the ContaPyme CSV and clean up the batch
    Export {
        #[arg(long, value_name = "FILE", conflicts_with = "dir")]
        file: Option<String>,

        #[arg(
            long,
            value_name = "DIR",
            help = "Directory for contapyme_<timestamp>.csv (default: export_dir)"
        )]
        dir: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Remove the stored batch and the staged uploads
    Cleanup,
}
