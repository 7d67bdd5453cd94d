//! Configuration initialization and hierarchy management

use tracing::info;

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::domain::model::InvalidScenePolicy;
use crate::error::ReelcutResult;
use crate::utils::logging::LogFormat;

/// Build the effective configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> ReelcutResult<AppConfig> {
    // Steps 1-3: defaults, then file, then environment
    let adapter = TomlConfigAdapter::load(cli.config.as_deref())?;
    let source = adapter.source().map(|p| p.display().to_string());
    let mut config = adapter.into_config();

    // Step 4: CLI arguments
    let overrides = apply_cli_configuration_overrides(&mut config, cli)?;

    config.validate()?;
    info!(
        file = source.as_deref().unwrap_or("<none>"),
        cli_overrides = overrides,
        "Configuration hierarchy initialized"
    );
    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_configuration_overrides(config: &mut AppConfig, cli: &Cli) -> ReelcutResult<usize> {
    let mut cli_overrides = 0;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        cli_overrides += 1;
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = LogFormat::parse(format)?;
        cli_overrides += 1;
    }

    if let Commands::Clip(args) = &cli.command {
        if let Some(policy) = &args.on_invalid_scene {
            config.pipeline.invalid_scene_policy = InvalidScenePolicy::parse(policy)?;
            cli_overrides += 1;
        }
    }

    Ok(cli_overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_win() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("custom.toml");
        std::fs::write(
            &config_path,
            "[logging]\nlevel = \"warn\"\n[pipeline]\ninvalid_scene_policy = \"abort\"\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "reelcut",
            "--config",
            config_path.to_str().unwrap(),
            "--log-level",
            "debug",
            "clip",
            "--source",
            "a.mp4",
            "--on-invalid-scene",
            "skip",
        ]);
        let config = initialize_configuration_hierarchy(&cli).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.pipeline.invalid_scene_policy, InvalidScenePolicy::Skip);
    }

    #[test]
    fn test_bad_policy_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("empty.toml");
        std::fs::write(&config_path, "").unwrap();

        let cli = Cli::parse_from([
            "reelcut",
            "--config",
            config_path.to_str().unwrap(),
            "clip",
            "--on-invalid-scene",
            "maybe",
        ]);
        assert!(initialize_configuration_hierarchy(&cli).is_err());
    }
}
