use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::presence::{Participant, UserAttrs};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Track when chat members were last seen and report who is around")]
#[command(long_about = "rollcall - last-seen presence for chat groups

Records the last observed activity, join, or leave of every member in each
chat, then classifies members into online-ish, offline-ish, bots, and
deleted buckets for a chosen recency threshold.

QUICK START:
  rollcall ingest events.jsonl      Apply a JSON Lines event feed
  rollcall check -100123 60         Report with a 60 minute threshold
  rollcall check -100123 2d         Report with a 2 day threshold
  rollcall export -100123           Write members_<chat>_<time>.csv

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Database file (defaults to ~/.rollcall/rollcall.db)
    #[arg(long, env = "ROLLCALL_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.rollcall/config.yaml)
    #[arg(long, env = "ROLLCALL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a single presence event
    ///
    /// # Examples
    ///
    ///   rollcall record activity -100123 42 --username ada
    ///   rollcall record join -100123 43 --first-name Grace --at 1700000000
    ///   rollcall record leave -100123 42
    Record(RecordArgs),

    /// Apply presence events from a JSON Lines file or stdin
    ///
    /// Each line is one event tagged by "kind":
    ///
    ///   {"kind":"activity","chat_id":-100,"user":{"user_id":1,"username":"ada"},"timestamp":1700000000}
    ///   {"kind":"join","chat_id":-100,"users":[{"user_id":2}]}
    ///   {"kind":"leave","chat_id":-100,"user":{"user_id":1}}
    ///
    /// Malformed lines are logged and skipped.
    Ingest {
        /// Event file; reads stdin when omitted or "-"
        file: Option<PathBuf>,
    },

    /// Report who was seen within a threshold
    ///
    /// Without a threshold, shows the threshold chooser instead.
    ///
    /// # Examples
    ///
    ///   rollcall check -100123           Show threshold choices
    ///   rollcall check -100123 45        45 minutes
    ///   rollcall check -100123 1d        1 day
    #[command(alias = "cheak")]
    Check(CheckArgs),

    /// Export all tracked members of a chat as CSV
    Export(ExportArgs),

    /// List tracked chats
    Chats,

    /// Show database location, schema version, and uptime
    #[command(alias = "ping")]
    Status,
}

#[derive(Args)]
pub struct RecordArgs {
    #[command(subcommand)]
    pub command: RecordCommands,
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// A message or other activity
    Activity(UserEventArgs),
    /// A user joining the chat
    Join(UserEventArgs),
    /// A user leaving the chat (kept as a presence update)
    Leave(UserEventArgs),
}

#[derive(Args, Debug, Clone)]
pub struct UserEventArgs {
    /// Chat id
    #[arg(allow_negative_numbers = true)]
    pub chat_id: i64,

    /// User id
    pub user_id: i64,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// The user is a bot
    #[arg(long)]
    pub bot: bool,

    /// The account is deleted
    #[arg(long)]
    pub deleted: bool,

    /// Event time as unix seconds (defaults to now)
    #[arg(long)]
    pub at: Option<i64>,
}

impl UserEventArgs {
    #[must_use]
    pub fn participant(&self) -> Participant {
        Participant::new(
            self.user_id,
            UserAttrs {
                username: self.username.clone().unwrap_or_default(),
                first_name: self.first_name.clone().unwrap_or_default(),
                last_name: self.last_name.clone().unwrap_or_default(),
                is_bot: self.bot,
                is_deleted: self.deleted,
            },
        )
    }
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Chat id
    #[arg(allow_negative_numbers = true)]
    pub chat_id: i64,

    /// Threshold: minutes (45) or days (2d); bad tokens mean 30 minutes
    #[arg(allow_negative_numbers = true)]
    pub threshold: Option<String>,

    /// Run with the configured default threshold instead of the chooser
    #[arg(long, conflicts_with = "threshold")]
    pub no_menu: bool,

    /// Requesting user id, checked against the chat's admins
    #[arg(long = "as", value_name = "USER_ID")]
    pub requester: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Chat id
    #[arg(allow_negative_numbers = true)]
    pub chat_id: i64,

    /// Directory to write the CSV into (defaults to ~/.rollcall/exports)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Requesting user id, checked against the chat's admins
    #[arg(long = "as", value_name = "USER_ID")]
    pub requester: Option<i64>,
}
