//! CLI module for GenAI Stack Config
//!
//! Provides subcommands for working with deployment parameters:
//! - `resolve`: run the full pipeline and print the canonical parameter set
//! - `validate`: schema-check the ambient input and report every issue
//! - `profiles`: list the built-in environment profile table

pub mod profiles;
pub mod resolve;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::LayeredParamSource;

/// GenAI Stack Config - Deployment parameter resolution with environment profiles
#[derive(Parser)]
#[command(name = "genai-stack-config")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the effective deployment parameters and print them as JSON
    Resolve(ResolveArgs),

    /// Validate the ambient input against the schema without resolving
    Validate(ValidateArgs),

    /// List the built-in environment profiles
    Profiles,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Parameters file (JSON, TOML or YAML); overrides the configured default
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print compact JSON on one line
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Parameters file (JSON, TOML or YAML); overrides the configured default
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Build the ambient parameter source from the app config and an optional
/// file override from the command line
pub(crate) fn build_source(config: &AppConfig, file_override: Option<&Path>) -> LayeredParamSource {
    let source = LayeredParamSource::new(&config.source.env_prefix);

    match file_override {
        Some(path) => source.with_file(path),
        None => match &config.source.file {
            Some(path) => source.with_file(path),
            None => source,
        },
    }
}
