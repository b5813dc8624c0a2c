use crate::error::TrackerError;
use std::io;
use std::path::Path;
use tracing::info;

/// Create the static asset directory if it is absent.
///
/// Returns `true` when the directory was created and `false` when it already
/// existed; an existing directory and its contents are left untouched.
pub fn ensure_static_dir(dir: &Path) -> Result<bool, TrackerError> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", dir.display()),
        )
        .into()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            std::fs::create_dir_all(dir)?;
            info!(path = %dir.display(), "created static directory");
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}
