use crate::error::Error;
use crate::writer::Writer;
use std::error::Error as StdError;

pub trait Runner {
    /// Run the command
    ///
    /// Returns an error shown to the user in case of failure
    fn run(&mut self) -> Result<(), Error>;

    /// Construct an error shown to the user
    fn error(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        origin: Option<Box<dyn StdError>>,
    ) -> Error {
        if let Some(origin) = origin {
            log::error!("{origin:?}");
        }

        if let Some(title) = title {
            Error::new(title, description)
        } else {
            Error::new(
                "Failed to run the command",
                Some("Run again with HOOKBUCKET_LOG=debug to see the details."),
            )
        }
    }
}

/// Return a runner for a command
pub trait Runnable {
    fn runner<'a>(&'a self, writer: &'a Writer) -> impl Runner + 'a;
}
