//! Locating and reading the CLI configuration file.
//!
//! An explicit `--config` path wins. Otherwise the first existing file among
//! `tracery/config.toml` and the platform configuration directory is used,
//! falling back to [`AppConfig::default`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};

use tracery::{TraceryError, config::AppConfig};

const LOCAL_CONFIG: &str = "tracery/config.toml";

/// Loads the configuration used for a run.
///
/// # Errors
///
/// Returns [`TraceryError::Io`] if an explicit path does not exist or a file
/// cannot be read, and [`TraceryError::Input`] (with the offending span) if
/// the file is not a valid configuration.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TraceryError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("configuration file {} does not exist", path.display()),
            )
            .into());
        }
        return read_config(path);
    }

    match discover() {
        Some(path) => read_config(&path),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Implicit configuration locations, in priority order.
fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "tracery", "tracery") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("Platform configuration directory unavailable"),
    }
    paths
}

fn discover() -> Option<PathBuf> {
    candidates().into_iter().find(|path| {
        let found = path.is_file();
        debug!(path = path.display().to_string(), found = found; "Checked configuration location");
        found
    })
}

fn read_config(path: &Path) -> Result<AppConfig, TraceryError> {
    info!(path = path.display().to_string(); "Loading configuration");
    let source = fs::read_to_string(path)?;
    toml::from_str(&source).map_err(|err| {
        TraceryError::new_input_error(
            format!("invalid configuration in {}: {}", path.display(), err.message()),
            err.span(),
            source.clone(),
        )
    })
}
