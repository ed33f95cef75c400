//! Resolve command - runs the full resolution pipeline

use tracing::info;

use crate::cli::{self, ResolveArgs};
use crate::config::AppConfig;
use crate::domain::Resolver;
use crate::infrastructure::logging;

/// Resolve the effective deployment parameters and print them as JSON
pub fn run(args: ResolveArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let source = cli::build_source(&config, args.file.as_deref());
    let resolved = Resolver::builtin().resolve(&source)?;

    info!(
        env = %resolved.env,
        model_ids = resolved.model_ids.len(),
        "parameters resolved"
    );

    let output = if args.compact {
        serde_json::to_string(&resolved)?
    } else {
        serde_json::to_string_pretty(&resolved)?
    };
    println!("{output}");

    Ok(())
}
