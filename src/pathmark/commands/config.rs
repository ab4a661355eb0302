use crate::commands::{CmdMessage, CmdResult};
use crate::config::PathmarkConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = PathmarkConfig::load(config_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = PathmarkConfig::load(config_dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = PathmarkConfig::load(config_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(config_dir)?;
            let shown = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result)
        }
    }
}
