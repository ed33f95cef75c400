//! Validate command - schema-checks the ambient input without resolving

use anyhow::bail;

use crate::cli::{self, ValidateArgs};
use crate::config::AppConfig;
use crate::domain::{validate_params, ParamSource};
use crate::infrastructure::logging;

/// Validate the ambient input and report every schema issue
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let source = cli::build_source(&config, args.file.as_deref());
    let raw = source.read()?;

    match validate_params(&raw) {
        Ok(params) => {
            println!(
                "ok: env '{}' ({} model ids, {} image, {} video)",
                params.env,
                params.model_ids.len(),
                params.image_generation_model_ids.len(),
                params.video_generation_model_ids.len(),
            );
            Ok(())
        }
        Err(error) => {
            for issue in error.issues() {
                eprintln!("invalid: {issue}");
            }
            bail!("{} schema issue(s) found", error.issues().len());
        }
    }
}
