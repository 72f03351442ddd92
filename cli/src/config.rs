use crate::error::Error;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "hookbucket.toml";

/// Settings read from hookbucket.toml
///
/// Every key is optional, the defaults reproduce the plain gcloud/gsutil calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionConfig {
    /// Cloud CLI binary
    pub gcloud: String,

    /// Storage CLI binary, used for bucket creation
    pub gsutil: String,

    /// Managed runtime of the deployed function
    pub runtime: String,

    /// Directory for the generated function source, relative to the working dir
    pub source_dir: PathBuf,

    pub region: Option<String>,
    pub project: Option<String>,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            gcloud: "gcloud".into(),
            gsutil: "gsutil".into(),
            runtime: "nodejs14".into(),
            source_dir: PathBuf::from("webhook-function"),
            region: None,
            project: None,
        }
    }
}

impl ProvisionConfig {
    /// Read hookbucket.toml from the directory, defaults if there is none
    pub fn from_dir(path: &Path) -> eyre::Result<Self> {
        Self::read(&path.join(CONFIG_FILE_NAME), true)
    }

    /// Read a config file the user pointed at, it has to exist
    pub fn from_file(config_toml_path: &Path) -> eyre::Result<Self> {
        Self::read(config_toml_path, false)
    }

    fn read(config_toml_path: &Path, is_optional: bool) -> eyre::Result<Self> {
        let toml_string = match std::fs::read_to_string(config_toml_path) {
            Ok(toml_string) => toml_string,

            // Just use a default config if the implicit file is not there
            Err(e) if is_optional && e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No {}, using defaults", config_toml_path.display());
                return Ok(ProvisionConfig::default());
            }

            Err(e) => {
                log::error!("Can't read {}: {e:?}", config_toml_path.display());

                return Err(e).wrap_err(Error::new(
                    &format!("Failed to read {}", config_toml_path.display()),
                    Some("Check the path and the file permissions."),
                ));
            }
        };

        log::debug!("Using config from {}", config_toml_path.display());

        let config = toml::from_str(&toml_string)
            .inspect_err(|e| log::error!("Can't parse: {e:?}"))
            .wrap_err(Error::new(
                &format!("Failed to parse {}", config_toml_path.display()),
                Some("Check the file against the documented keys."),
            ))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProvisionConfig::from_dir(dir.path()).unwrap();
        assert_eq!(config, ProvisionConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "runtime = \"nodejs20\"\nregion = \"europe-west1\"\n",
        )
        .unwrap();

        let config = ProvisionConfig::from_dir(dir.path()).unwrap();

        assert_eq!(config.runtime, "nodejs20");
        assert_eq!(config.region.as_deref(), Some("europe-west1"));
        assert_eq!(config.gcloud, "gcloud");
        assert_eq!(config.source_dir, PathBuf::from("webhook-function"));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "runtme = \"nodejs20\"\n").unwrap();
        assert!(ProvisionConfig::from_dir(dir.path()).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prod-hookbucket.toml");

        let error: Error = ProvisionConfig::from_file(&path).unwrap_err().into();

        assert_eq!(
            error.title(),
            format!("Failed to read {}", path.display())
        );
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prod-hookbucket.toml");
        std::fs::write(&path, "project = \"acme\"\n").unwrap();

        let config = ProvisionConfig::from_file(&path).unwrap();
        assert_eq!(config.project.as_deref(), Some("acme"));
    }

    #[test]
    fn unreadable_implicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        // A directory in place of the file fails with something other than NotFound
        std::fs::create_dir(dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert!(ProvisionConfig::from_dir(dir.path()).is_err());
    }
}
