use crate::error::ProvisionError;
use crate::files::SourceFs;
use crate::request::DeploymentRequest;
use crate::template::{self, HANDLER_FILE_NAME, MANIFEST_FILE_NAME};
use crate::writer::Writer;
use std::io;
use std::path::{Path, PathBuf};

/// Lay out the function source: the handler and its manifest
///
/// The directory is created if missing. Each file is written separately and the first
/// failure stops the generation.
pub fn generate(
    fs: &dyn SourceFs,
    dir: &Path,
    request: &DeploymentRequest,
    writer: &Writer,
) -> Result<Vec<PathBuf>, ProvisionError> {
    fs.create_dir_all(dir)
        .map_err(|source| ProvisionError::FileWrite {
            file: dir.to_path_buf(),
            source,
        })?;

    let manifest = template::manifest(request.name()).map_err(io::Error::from);

    let files = [
        (HANDLER_FILE_NAME, Ok(template::handler(request.name()))),
        (MANIFEST_FILE_NAME, manifest),
    ];

    let mut written = Vec::with_capacity(files.len());

    for (file_name, contents) in files {
        let path = dir.join(file_name);

        contents
            .and_then(|contents| fs.write(&path, &contents))
            .map_err(|source| ProvisionError::FileWrite {
                file: path.clone(),
                source,
            })?;

        log::info!("Wrote {}", path.display());
        writer
            .line(&format!("{file_name} file created successfully."))
            .map_err(ProvisionError::Terminal)?;
        written.push(path);
    }

    Ok(written)
}
