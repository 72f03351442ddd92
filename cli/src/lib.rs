pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod gcloud;
pub mod logger;
pub mod process;
pub mod progress;
pub mod request;
pub mod runner;
pub mod source;
pub mod template;
pub mod workflow;
pub mod writer;
