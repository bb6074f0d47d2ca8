use std::{
  io::{Error, ErrorKind},
  path::{Path, PathBuf},
};

use log::debug;

const TASKER_DEFAULT_STORAGE_DIR: &str = ".tasker";
const TASKER_DEFAULT_STORAGE_NAME: &str = "tasks.json";
const TASKER_DEFAULT_CONFIG_NAME: &str = ".tasker.json";

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
  pub storage_path: String,
}

impl Config {
  /// Reads the config file named by `TASKER_CONFIG` or `~/.tasker.json`,
  /// writing a default one on first run. `TASKER_DB` overrides the storage path.
  pub fn load() -> std::io::Result<Self> {
    let home = home_dir()?;
    let config_file_path = match std::env::var("TASKER_CONFIG") {
      Ok(file_path) => PathBuf::from(file_path),
      Err(_) => home.join(TASKER_DEFAULT_CONFIG_NAME),
    };

    let mut config = Self::load_from(&config_file_path, &home)?;
    if let Ok(storage_path) = std::env::var("TASKER_DB") {
      config.storage_path = storage_path;
    }
    debug!("tasker database: {}", config.storage_path);
    return Ok(config);
  }

  pub fn load_from(config_file_path: &Path, home: &Path) -> std::io::Result<Self> {
    if !config_file_path.exists() {
      let config = Self::with_home(home);
      if let Some(parent) = config_file_path.parent() {
        if !parent.as_os_str().is_empty() {
          std::fs::create_dir_all(parent)?;
        }
      }
      let file = std::fs::File::create(config_file_path)?;
      serde_json::to_writer_pretty(file, &config)?;
      debug!("default config written to {}", config_file_path.display());
      return Ok(config);
    }

    let file = std::fs::File::open(config_file_path)?;
    return serde_json::from_reader(file).map_err(|err| Error::new(ErrorKind::InvalidData, err));
  }

  pub fn with_home(home: &Path) -> Self {
    Self {
      storage_path: home
        .join(TASKER_DEFAULT_STORAGE_DIR)
        .join(TASKER_DEFAULT_STORAGE_NAME)
        .display()
        .to_string(),
    }
  }
}

fn home_dir() -> std::io::Result<PathBuf> {
  std::env::var("HOME")
    .map(PathBuf::from)
    .map_err(|_| Error::new(ErrorKind::NotFound, "HOME is not set"))
}
