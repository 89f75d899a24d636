//! Command-line definitions.

use clap::{Parser, Subcommand};
use memo_core::defaults::{ENV_CONFIG_DIR, ENV_DATA_DIR, ENV_PASSWORD};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memo")]
#[command(author, version, about = "Sticky notes with per-user profiles and optional encryption")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Password for an encrypted profile
    #[arg(short, long, global = true, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,

    /// Directory for notes, users and settings
    #[arg(long, global = true, env = ENV_DATA_DIR)]
    pub data_dir: Option<PathBuf>,

    /// Directory for per-user configuration
    #[arg(long, global = true, env = ENV_CONFIG_DIR)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage user profiles
    #[command(subcommand)]
    Users(UserCommand),

    /// Work with the current user's notes
    #[command(subcommand)]
    Notes(NoteCommand),

    /// Manage encryption for the current user
    #[command(subcommand)]
    Password(PasswordCommand),

    /// Show or change where the current user's notes are stored
    #[command(subcommand)]
    Path(PathCommand),

    /// Show or change global settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Export or import a profile backup
    #[command(subcommand)]
    Backup(BackupCommand),
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List profiles; the current one is marked
    List,
    /// Register a profile
    Add { name: String },
    /// Remove a profile and its notes
    Remove { name: String },
    /// Make a profile current
    Switch { name: String },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// List notes
    List,
    /// Create a note
    Add {
        /// Note text
        content: String,

        /// Explicit title (derived from the first line when omitted)
        #[arg(short, long)]
        title: Option<String>,

        /// Color theme (yellow, pink, mint, sky, lavender, peach, darkgray, navy)
        /// or a hex color
        #[arg(short, long)]
        color: Option<String>,

        /// Font size (clamped to 8-48)
        #[arg(long)]
        font_size: Option<f64>,
    },
    /// Search titles and content, ignoring case
    Search { query: String },
    /// Show one note with its details
    Show {
        /// Note id or unique id prefix
        id: String,
    },
    /// Replace a note's text or appearance
    Edit {
        /// Note id or unique id prefix
        id: String,

        /// New text
        #[arg(short = 'm', long)]
        content: Option<String>,

        /// New explicit title; empty string clears it
        #[arg(short, long)]
        title: Option<String>,

        /// New color theme or hex color
        #[arg(short, long)]
        color: Option<String>,

        /// New font size
        #[arg(long)]
        font_size: Option<f64>,
    },
    /// Delete a note
    Delete {
        /// Note id or unique id prefix
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PasswordCommand {
    /// Show whether encryption is enabled, and the hint
    Status,
    /// Enable encryption or change the password
    Set {
        /// New password (at least 4 characters)
        new_password: String,

        /// Hint shown when asking for the password
        #[arg(long)]
        hint: Option<String>,
    },
    /// Disable encryption and store notes as plain JSON
    Remove,
}

#[derive(Subcommand, Debug)]
pub enum PathCommand {
    /// Print the note file path
    Show,
    /// Store notes in another directory
    Set { dir: PathBuf },
    /// Go back to the default data directory
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print all settings
    Show,
    /// Change one setting
    Set {
        /// background-color, note-color, note-text-color or language
        key: String,
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Write the current profile to a backup file
    Export {
        /// Output file (default: StickyMemo_Backup_<timestamp>.jmb)
        path: Option<PathBuf>,
    },
    /// Restore a backup as a new profile
    Import {
        path: PathBuf,

        /// Import under this name instead of the one in the backup
        #[arg(long = "as", value_name = "NAME")]
        target_name: Option<String>,

        /// Make the imported profile current
        #[arg(long)]
        switch: bool,
    },
}
