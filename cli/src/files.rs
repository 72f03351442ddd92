use std::io;
use std::path::Path;

/// File system operations needed to lay out the function source
pub trait SourceFs {
    /// Create the directory with its parents, succeeds if it already exists
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate the file and write the contents
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The local file system
#[derive(Default)]
pub struct LocalFs;

impl SourceFs for LocalFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path).inspect_err(|e| log::error!("Can't create dir: {e:?}"))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents).inspect_err(|e| log::error!("Can't write: {e:?}"))
    }
}
