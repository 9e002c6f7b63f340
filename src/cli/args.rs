//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::AttributeSelector;

/// Automatic search-set creation for BIM model trees
#[derive(Parser, Debug)]
#[command(name = "navsets")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level (-d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Saved-sets file (default: from config, fallback navsets-sets.json)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub sets: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create discipline search sets from model root names
    Disciplines {
        /// Model file (.json) or directory of model files
        #[arg(value_hint = ValueHint::AnyPath)]
        model: PathBuf,
    },

    /// Create per-discipline clash sets grouped by an element attribute
    ClashSets {
        /// Model file (.json) or directory of model files
        #[arg(value_hint = ValueHint::AnyPath)]
        model: PathBuf,

        /// Attribute to group by (default: from config, fallback category)
        #[arg(short, long, value_enum)]
        attribute: Option<AttributeSelector>,
    },

    /// Show the persisted search-set hierarchy
    Show,

    /// Show effective configuration as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
