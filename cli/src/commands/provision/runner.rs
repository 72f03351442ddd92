use crate::commands::provision::ProvisionCommand;
use crate::config::ProvisionConfig;
use crate::error::Error;
use crate::files::LocalFs;
use crate::process::SystemRunner;
use crate::request::DeploymentRequest;
use crate::runner::Runner;
use crate::workflow::Workflow;
use crate::writer::Writer;
use std::io;

pub(crate) struct ProvisionRunner<'a> {
    pub(super) command: &'a ProvisionCommand,
    pub(super) writer: &'a Writer,
}

impl Runner for ProvisionRunner<'_> {
    /// Provision the bucket and the function
    ///
    /// Stops at the first failing step, the resources created before it stay in place.
    fn run(&mut self) -> Result<(), Error> {
        let config = self.config()?;
        log::debug!("{config:?}");

        let workflow = Workflow::new(&SystemRunner, &LocalFs, &config, self.writer);
        let name = self.command.name.clone();
        let is_structured = self.writer.is_structured();

        let deployment = workflow.run(|| match name {
            Some(name) => Ok(DeploymentRequest::new(name)),

            // Keep stdout for the JSON document
            None if is_structured => {
                DeploymentRequest::prompt(&mut io::stdin().lock(), &mut io::stderr())
            }

            None => DeploymentRequest::prompt(&mut io::stdin().lock(), &mut io::stdout()),
        })?;

        self.writer.json(deployment.summary()).map_err(|e| {
            self.error(
                Some("Output error"),
                Some("Failed to write the result to stdout."),
                Some(Box::new(e)),
            )
        })?;

        Ok(())
    }
}

impl ProvisionRunner<'_> {
    /// Config from --config, or from the current dir
    fn config(&self) -> Result<ProvisionConfig, Error> {
        let config = match &self.command.config {
            Some(path) => ProvisionConfig::from_file(path),
            None => {
                let dir = std::env::current_dir().map_err(|e| {
                    self.error(
                        Some("Failed to determine current directory"),
                        Some("Please verify you have proper file system permissions."),
                        Some(Box::new(e)),
                    )
                })?;

                ProvisionConfig::from_dir(&dir)
            }
        };

        Ok(config?)
    }
}
