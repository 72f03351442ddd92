use crate::config::ProvisionConfig;
use crate::error::{Error, ProvisionError};
use crate::files::SourceFs;
use crate::gcloud::Gcloud;
use crate::process::CommandRunner;
use crate::progress::{Progress, ProgressStatus};
use crate::request::DeploymentRequest;
use crate::source;
use crate::writer::Writer;
use serde_json::json;

/// Outcome of a completed workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub request: DeploymentRequest,

    /// Absent if the function was deployed but its URL could not be read
    pub url: Option<String>,
}

impl Deployment {
    /// Result document for `--json`, the url is null if the lookup failed
    pub fn summary(&self) -> serde_json::Value {
        json!({ "bucket": self.request.name(), "url": self.url })
    }
}

/// Provision a bucket and a webhook function writing into it
///
/// Six steps run one after another, the first failing step stops the workflow. Nothing
/// done by earlier steps is rolled back.
pub struct Workflow<'a> {
    gcloud: Gcloud<'a>,
    fs: &'a dyn SourceFs,
    config: &'a ProvisionConfig,
    writer: &'a Writer,
}

impl<'a> Workflow<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        fs: &'a dyn SourceFs,
        config: &'a ProvisionConfig,
        writer: &'a Writer,
    ) -> Self {
        Self {
            gcloud: Gcloud::new(runner, config),
            fs,
            config,
            writer,
        }
    }

    /// Run all steps
    ///
    /// The request is obtained only after the CLI is known to be installed and logged in.
    pub fn run(
        &self,
        request: impl FnOnce() -> Result<DeploymentRequest, ProvisionError>,
    ) -> Result<Deployment, ProvisionError> {
        self.check_tool_installed()?;
        self.check_authenticated()?;

        let request = request()?;
        log::info!("Provisioning {:?}", request.name());

        self.create_bucket(&request)?;
        self.generate_function_source(&request)?;
        self.deploy_function(&request)?;
        let url = self.function_url(&request);

        if let Some(url) = &url {
            self.say(&format!("Function URL: {url}"))?;
        }

        Ok(Deployment { request, url })
    }

    pub fn check_tool_installed(&self) -> Result<(), ProvisionError> {
        let version = self.step("Checking", &self.config.gcloud, "Found", || {
            self.gcloud.check_installed()
        })?;

        self.say(version.trim_end())
    }

    pub fn check_authenticated(&self) -> Result<(), ProvisionError> {
        let account = self.step("Checking", "account", "Logged in", || {
            self.gcloud.check_authenticated()
        })?;

        self.say(&format!(
            "{} is configured with the account: {account}",
            self.config.gcloud
        ))
    }

    pub fn create_bucket(&self, request: &DeploymentRequest) -> Result<(), ProvisionError> {
        self.step("Creating", &request.bucket_uri(), "Created", || {
            self.gcloud.create_bucket(request)
        })?;

        self.say("Bucket created successfully.")
    }

    pub fn generate_function_source(
        &self,
        request: &DeploymentRequest,
    ) -> Result<(), ProvisionError> {
        let dir = self.config.source_dir.to_string_lossy();

        self.step("Generating", &dir, "Generated", || {
            source::generate(self.fs, &self.config.source_dir, request, self.writer)
        })?;

        Ok(())
    }

    pub fn deploy_function(&self, request: &DeploymentRequest) -> Result<(), ProvisionError> {
        self.step("Deploying", request.name(), "Deployed", || {
            self.gcloud.deploy_function(request)
        })?;

        self.say("Function deployed successfully.")
    }

    /// Look up the trigger URL
    ///
    /// A failure is reported, but does not fail the workflow since the function is deployed.
    pub fn function_url(&self, request: &DeploymentRequest) -> Option<String> {
        self.step("Describing", request.name(), "Described", || {
            self.gcloud.describe_url(request)
        })
        .map_err(|error| Error::from(error).report())
        .ok()
    }

    /// Run a step between two stage lines
    fn step<T>(
        &self,
        stage: &str,
        subject: &str,
        done: &str,
        action: impl FnOnce() -> Result<T, ProvisionError>,
    ) -> Result<T, ProvisionError> {
        let progress = Progress::new(subject);
        progress.log_stage(stage);

        let result = action();

        match &result {
            Ok(_) => progress.finish(done, ProgressStatus::Success),
            Err(_) => progress.finish("Failed", ProgressStatus::Error),
        }

        result
    }

    fn say(&self, message: &str) -> Result<(), ProvisionError> {
        self.writer.line(message).map_err(ProvisionError::Terminal)
    }
}
