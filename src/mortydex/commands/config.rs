use crate::commands::{CmdMessage, CmdResult};
use crate::config::{ConfigKey, DexConfig};
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(ConfigKey),
    Set(ConfigKey, String),
}

/// An unreadable `config.json` is treated as defaults, so `Set` can
/// overwrite it with a valid file.
pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = DexConfig::load(data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config, starting from defaults");
        DexConfig::default()
    });
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            result.add_message(CmdMessage::info(format!(
                "{} = {}",
                key.name(),
                config.get(key)
            )));
            return Ok(result);
        }
        ConfigAction::Set(key, value) => {
            config.set(key, &value)?;
            config.save(data_dir)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key.name(),
                config.get(key)
            )));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_then_show() {
        let dir = TempDir::new().unwrap();
        run(
            dir.path(),
            ConfigAction::Set(ConfigKey::TimeoutSecs, "30".into()),
        )
        .unwrap();

        let result = run(dir.path(), ConfigAction::ShowKey(ConfigKey::TimeoutSecs)).unwrap();
        assert_eq!(result.messages[0].content, "timeout-secs = 30");

        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap().timeout_secs, 30);
    }

    #[test]
    fn corrupt_config_can_be_overwritten() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{not json").unwrap();

        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config.unwrap(), DexConfig::default());

        run(dir.path(), ConfigAction::Set(ConfigKey::Retries, "2".into())).unwrap();
        let repaired = DexConfig::load(dir.path()).unwrap();
        assert_eq!(repaired.retries, 2);
    }

    #[test]
    fn invalid_value_is_not_saved() {
        let dir = TempDir::new().unwrap();
        assert!(run(dir.path(), ConfigAction::Set(ConfigKey::Retries, "-1".into())).is_err());
        assert!(!dir.path().join("config.json").exists());
    }
}
