mod runner;

use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use runner::ProvisionRunner;
use std::path::PathBuf;

/// Create a bucket and deploy a webhook function writing into it
#[derive(clap::Args, Clone, Debug)]
pub struct ProvisionCommand {
    /// Name of the bucket and the function, asked for interactively if omitted
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Path to the config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Runnable for ProvisionCommand {
    fn runner<'a>(&'a self, writer: &'a Writer) -> impl Runner + 'a {
        ProvisionRunner {
            command: self,
            writer,
        }
    }
}
