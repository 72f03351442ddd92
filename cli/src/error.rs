use std::path::PathBuf;

/// Display global error message in unified format
#[derive(Debug)]
pub struct Error(String, Option<String>);

impl Error {
    pub fn new(message: &str, details: Option<&str>) -> Self {
        Error(message.to_string(), details.map(|d| d.to_string()))
    }

    /// Print the error to stderr in the unified format
    pub fn report(&self) {
        eprintln!("\n{}\n{self}", console::style("Error").red().bold());
    }

    #[cfg(test)]
    pub(crate) fn title(&self) -> &str {
        &self.0
    }
}

/// Display the message and details, as sort of a hint
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}\n\n{}",
            self.0,
            console::style(self.1.clone().unwrap_or("".into())).dim()
        )
    }
}

impl std::error::Error for Error {}

/// Convert eyre reports raised outside of the workflow (e.g. while loading the config)
impl From<eyre::ErrReport> for Error {
    fn from(error: eyre::ErrReport) -> Self {
        log::error!("{error:?}");

        error
            .downcast::<Error>()
            .unwrap_or_else(|err| Error::new(&err.to_string(), None))
    }
}

/// Failure of a single provisioning step
///
/// Every step of the workflow returns one of these, the workflow stops on the first one.
#[derive(thiserror::Error, Debug)]
pub enum ProvisionError {
    /// The cloud CLI is not installed, or its version query failed
    #[error("{program} command not found")]
    ToolMissing { program: String },

    /// The account query returned nothing
    #[error("{program} is not configured with a cloud account")]
    NotAuthenticated { program: String },

    /// External command ran but exited with non-zero status
    #[error("Failed to {step}: {stderr}")]
    CommandFailed { step: &'static str, stderr: String },

    /// One of the generated source files could not be written
    #[error("Failed to write {}", file.display())]
    FileWrite {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process could not be launched at all
    #[error("Failed to launch {program}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the prompt or writing output failed
    #[error("Failed to read from or write to the terminal")]
    Terminal(#[source] std::io::Error),
}

impl From<ProvisionError> for Error {
    fn from(error: ProvisionError) -> Self {
        log::error!("{error:?}");

        match &error {
            ProvisionError::ToolMissing { program } => Error::new(
                &format!("{program} command not found"),
                Some("Please install Google Cloud SDK."),
            ),
            ProvisionError::NotAuthenticated { program } => Error::new(
                &format!("{program} is not configured with a cloud account"),
                Some(&format!("Run `{program} auth login` and try again.")),
            ),
            ProvisionError::CommandFailed { step, stderr } => {
                Error::new(&format!("Failed to {step}"), Some(stderr.trim()))
            }
            ProvisionError::FileWrite { file, source } => Error::new(
                &format!(
                    "An error occurred while creating {}",
                    file.file_name()
                        .map(|name| name.to_string_lossy())
                        .unwrap_or_else(|| file.to_string_lossy())
                ),
                Some(&source.to_string()),
            ),
            ProvisionError::Launch { .. } | ProvisionError::Terminal(_) => Error::new(
                "An error occurred",
                Some(&error.to_string()),
            ),
        }
    }
}
