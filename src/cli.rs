use crate::domain::constants::{DEFAULT_CONFIG_FILE, DEFAULT_INPUT_FILE};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dgmove",
    version,
    about = "Move Panorama objects between shared and device-group scopes"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move every object listed in the input CSV.
    Run {
        #[arg(default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        #[arg(
            long,
            env = "MOVE_COLLISION",
            value_enum,
            ignore_case = true,
            default_value_t = CollisionPolicy::Skip
        )]
        collision: CollisionPolicy,
        #[arg(long, default_value = ".", help = "Directory for the moves_*.csv audit file")]
        log_dir: PathBuf,
    },
    /// Print the config path for a scope/type (and object name).
    Xpath {
        scope: String,
        object_type: String,
        name: Option<String>,
    },
    /// Summarize an audit file and list objects left in both scopes.
    Report { audit: PathBuf },
}

/// What to do when the destination already holds an object with the same name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    #[default]
    Skip,
    Overwrite,
}

impl CollisionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CollisionPolicy::Skip => "skip",
            CollisionPolicy::Overwrite => "overwrite",
        }
    }
}
