use crate::config::ProvisionConfig;
use crate::error::ProvisionError;
use crate::process::{CommandOutput, CommandRunner, Invocation};
use crate::request::DeploymentRequest;
use std::path::Path;

/// Calls to the gcloud/gsutil tools
///
/// Each call runs one external command to completion and maps its exit status onto
/// a [`ProvisionError`]. Nothing is retried.
pub struct Gcloud<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a ProvisionConfig,
}

impl<'a> Gcloud<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a ProvisionConfig) -> Self {
        Self { runner, config }
    }

    /// Query the CLI version, returns the version report
    pub fn check_installed(&self) -> Result<String, ProvisionError> {
        let output = self.execute(self.version())?;

        if !output.success {
            log::error!("Version query failed: {}", output.stderr);

            return Err(ProvisionError::ToolMissing {
                program: self.config.gcloud.clone(),
            });
        }

        Ok(output.stdout)
    }

    /// Query the active account, returns it if there is one
    pub fn check_authenticated(&self) -> Result<String, ProvisionError> {
        let output = self.execute(self.account())?;
        let account = output.stdout.trim();

        if !output.success || account.is_empty() {
            log::error!("Account query returned {:?}: {}", account, output.stderr);

            return Err(ProvisionError::NotAuthenticated {
                program: self.config.gcloud.clone(),
            });
        }

        Ok(account.to_string())
    }

    pub fn create_bucket(&self, request: &DeploymentRequest) -> Result<(), ProvisionError> {
        let output = self.execute(self.make_bucket(request))?;
        Self::expect_success(output, "create bucket")
    }

    pub fn deploy_function(&self, request: &DeploymentRequest) -> Result<(), ProvisionError> {
        let output = self.execute(self.deploy(request))?;
        Self::expect_success(output, "deploy function")
    }

    /// Read the HTTPS trigger URL of the deployed function
    pub fn describe_url(&self, request: &DeploymentRequest) -> Result<String, ProvisionError> {
        let output = self.execute(self.describe(request))?;
        Self::expect_success(output.clone(), "get function URL")?;
        Ok(output.stdout.trim().to_string())
    }

    pub(crate) fn version(&self) -> Invocation {
        Invocation::new(&self.config.gcloud).arg("version")
    }

    pub(crate) fn account(&self) -> Invocation {
        Invocation::new(&self.config.gcloud).args([
            "config",
            "list",
            "account",
            "--format",
            "value(core.account)",
        ])
    }

    pub(crate) fn make_bucket(&self, request: &DeploymentRequest) -> Invocation {
        let mut invocation = Invocation::new(&self.config.gsutil).arg("mb");

        if let Some(project) = &self.config.project {
            invocation = invocation.args(["-p", project.as_str()]);
        }

        invocation.arg(request.bucket_uri())
    }

    pub(crate) fn deploy(&self, request: &DeploymentRequest) -> Invocation {
        let source = Path::new(".").join(&self.config.source_dir);

        let invocation = Invocation::new(&self.config.gcloud)
            .args(["functions", "deploy", request.name()])
            .args(["--runtime", self.config.runtime.as_str()])
            .args(["--trigger-http", "--allow-unauthenticated"])
            .arg("--source")
            .arg(source.to_string_lossy());

        self.scoped(invocation)
    }

    pub(crate) fn describe(&self, request: &DeploymentRequest) -> Invocation {
        let invocation = Invocation::new(&self.config.gcloud)
            .args(["functions", "describe", request.name()])
            .args(["--format", "value(httpsTrigger.url)"]);

        self.scoped(invocation)
    }

    /// Append the optional region and project flags
    fn scoped(&self, mut invocation: Invocation) -> Invocation {
        if let Some(region) = &self.config.region {
            invocation = invocation.args(["--region", region.as_str()]);
        }

        if let Some(project) = &self.config.project {
            invocation = invocation.args(["--project", project.as_str()]);
        }

        invocation
    }

    fn execute(&self, invocation: Invocation) -> Result<CommandOutput, ProvisionError> {
        self.runner
            .run(&invocation)
            .map_err(|source| ProvisionError::Launch {
                program: invocation.program.clone(),
                source,
            })
    }

    fn expect_success(output: CommandOutput, step: &'static str) -> Result<(), ProvisionError> {
        if output.success {
            return Ok(());
        }

        Err(ProvisionError::CommandFailed {
            step,
            stderr: output.stderr,
        })
    }
}
