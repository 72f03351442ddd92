use crate::error::ProvisionError;
use std::io::{BufRead, Write};

/// What the user asked to provision
///
/// The single name is used as the bucket, the function, its exported entry point and
/// the manifest's package name. It is passed to the tooling as is, without validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    name: String,
}

impl DeploymentRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Ask for the bucket name interactively
    pub fn prompt(
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<Self, ProvisionError> {
        write!(output, "Enter the bucket name: ").map_err(ProvisionError::Terminal)?;
        output.flush().map_err(ProvisionError::Terminal)?;

        let mut line = String::new();
        input.read_line(&mut line).map_err(ProvisionError::Terminal)?;

        // Only the line terminator goes away
        let name = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(&line);

        Ok(Self::new(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The gs:// URI of the bucket
    pub fn bucket_uri(&self) -> String {
        format!("gs://{}", self.name)
    }
}
