//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PromptForge - structured prompt composer
#[derive(Parser, Debug)]
#[command(
    name = "pf",
    author,
    version,
    about = "Craft structured prompts with expert roles, templates and saved presets",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (launches the TUI when omitted)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose a prompt from flags and print it
    Compose {
        /// Start from a built-in template (by name)
        #[arg(short, long)]
        template: Option<String>,

        /// Who the model should act as
        #[arg(long)]
        role: Option<String>,

        /// The main objective
        #[arg(long)]
        task: Option<String>,

        /// Background information
        #[arg(long)]
        context: Option<String>,

        /// How the model should think
        #[arg(long)]
        reasoning: Option<String>,

        /// Desired output structure
        #[arg(long)]
        format: Option<String>,

        /// Copy the prompt to the system clipboard
        #[arg(long)]
        copy: bool,

        /// Save the prompt under this name
        #[arg(short, long, value_name = "NAME")]
        save: Option<String>,

        /// Export the prompt to a text file
        #[arg(short, long)]
        export: bool,

        /// Directory to export into (defaults to the configured export dir)
        #[arg(short, long, requires = "export")]
        out: Option<PathBuf>,

        /// Remember this role and format as defaults
        #[arg(long)]
        set_defaults: bool,
    },

    /// List built-in templates
    Templates,

    /// List expert roles
    Roles,

    /// Show prompt-writing tips
    Tips,

    /// List saved prompts
    List,

    /// Print a saved prompt
    Show {
        /// Saved prompt ID
        #[arg(required = true)]
        id: i64,
    },

    /// Delete a saved prompt
    Delete {
        /// Saved prompt ID
        #[arg(required = true)]
        id: i64,
    },

    /// Export a saved prompt to a text file
    Export {
        /// Saved prompt ID
        #[arg(required = true)]
        id: i64,

        /// Directory to export into (defaults to the configured export dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show the stored default preferences
    Prefs,
}
