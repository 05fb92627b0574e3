use hlm_config::HlmConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<HlmConfig> {
    let mut config = HlmConfig::load_with_dotenv()?;
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
    }
    config.validate()?;
    tracing::debug!(database = %config.database.path, "configuration loaded");
    Ok(config)
}
