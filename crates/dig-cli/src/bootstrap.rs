use anyhow::Context;
use dig_config::DigConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, then command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DigConfig> {
    load_project_dotenv()?;
    let mut config = DigConfig::load().context("failed to load digmap configuration")?;
    apply_flag_overrides(&mut config, flags);
    Ok(config)
}

/// Prefer the `.env` next to the nearest `.digmap/` directory, else the
/// usual dotenv lookup from the current directory.
fn load_project_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    if let Some(root) = cwd.ancestors().find(|dir| dir.join(".digmap").is_dir()) {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return Ok(());
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}

fn apply_flag_overrides(config: &mut DigConfig, flags: &GlobalFlags) {
    if let Some(url) = flags.api_url.as_deref().map(str::trim)
        && !url.is_empty()
    {
        config.api.url = url.to_string();
    }
}
