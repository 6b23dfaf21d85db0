use std::{fs, path::Path};

use anyhow::{Result, bail};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_yaml};

pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_yaml()?)?;
    Ok(CommandResult {
        summary: CommandSummary::Init(InitSummary {
            path: CONFIG_FILE_NAME.to_string(),
        }),
    })
}
