use std::path::Path;

use anyhow::Result;
use tracing::error;

use super::super::exit_status::ExitStatus;
use crate::{
    config::{CONFIG_FILE_NAME, default_config_json},
    utils::write_output,
};

pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        error!("{} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    write_output(config_path, &default_config_json()?)?;
    success!("Created {}", CONFIG_FILE_NAME);

    Ok(ExitStatus::Success)
}
