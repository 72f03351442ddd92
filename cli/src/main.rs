use clap::{ArgAction, Parser};
use hookbucket::commands::provision::ProvisionCommand;
use hookbucket::logger::Logger;
use hookbucket::runner::{Runnable, Runner};
use hookbucket::writer::Writer;

#[derive(Parser)]
#[command(
    name = "hookbucket",
    version,
    about = "Provision a storage bucket and a webhook function writing into it",
    long_about = "Creates a Cloud Storage bucket, generates a Node.js HTTP function that stores every webhook payload in the bucket, deploys it with gcloud and prints its URL."
)]
struct Cli {
    #[command(flatten)]
    provision: ProvisionCommand,

    /// Print the result as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Derive a runner from the command and run it
///
/// A failed run is reported but does not change the exit code.
fn run(command: &impl Runnable, writer: &Writer) {
    if let Err(error) = command.runner(writer).run() {
        error.report();
    }
}

fn main() {
    Logger::init();
    let cli = Cli::parse();
    let writer = Writer::new(cli.json);
    run(&cli.provision, &writer);
}
