use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use std::sync::OnceLock;

/// Environment variable holding the env_logger filter
pub const LOG_ENV: &str = "HOOKBUCKET_LOG";

/// Set up log levels, formatting, and routing of log lines around the progress output
pub struct Logger {
    multi_progress: MultiProgress,
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

impl<'a> Logger {
    pub fn init() -> &'a Self {
        LOGGER.get_or_init(|| {
            let logger = env_logger::Builder::from_env(
                // No logs shown by default, only human-friendly messages
                // Enable logs output with "export HOOKBUCKET_LOG=debug" in terminal
                env_logger::Env::default().filter_or(LOG_ENV, "off"),
            )
            .build();

            let level = logger.filter();
            let multi_progress = MultiProgress::new();

            // Fails only if another logger is already installed, e.g. in tests
            if LogWrapper::new(multi_progress.clone(), logger)
                .try_init()
                .is_ok()
            {
                log::set_max_level(level);
            }

            Self { multi_progress }
        })
    }

    pub fn multi_progress() -> &'a MultiProgress {
        &Self::init().multi_progress
    }
}
