//! Lifetime management for the temporary files of one layout run.
//!
//! [`TempResources`] hands out uniquely named files in a work directory and
//! remembers every path it has handed out, including paths the engine is
//! expected to create later. [`TempResources::cleanup`] removes all of them;
//! it also runs on drop, so an early return or a panic between creation and
//! cleanup does not leak files.
//!
//! Removal is best-effort. A path that is already gone counts as removed, an
//! interrupted removal is retried a bounded number of times, and any other
//! failure becomes a [`CleanupWarning`] instead of an error.

use std::{
    fmt,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use log::{trace, warn};

use crate::error::SerializationError;

/// Prefix shared by every file the driver creates.
const FILE_PREFIX: &str = "forceatlas-";

/// Attempts made when removal keeps being interrupted.
const MAX_INTERRUPTED_ATTEMPTS: usize = 16;

/// A temporary file that could not be removed.
///
/// Never fails a layout run; reported and logged only.
#[derive(Debug)]
pub struct CleanupWarning {
    path: PathBuf,
    source: io::Error,
}

impl CleanupWarning {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &io::Error {
        &self.source
    }
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not remove temporary file {}: {}",
            self.path.display(),
            self.source
        )
    }
}

/// The set of temporary paths owned by a single layout run.
#[derive(Debug)]
pub struct TempResources {
    dir: PathBuf,
    paths: Vec<PathBuf>,
}

impl TempResources {
    /// Creates an empty set that places new files in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            paths: Vec::new(),
        }
    }

    /// Creates a uniquely named empty file ending in `suffix` and tracks it.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::TempFile`] if the file cannot be created.
    pub fn create(&mut self, suffix: &str) -> Result<(PathBuf, File), SerializationError> {
        let temp_error = |source| SerializationError::TempFile {
            dir: self.dir.clone(),
            source,
        };

        let named = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(suffix)
            .tempfile_in(&self.dir)
            .map_err(temp_error)?;
        let (file, path) = named.keep().map_err(|err| temp_error(err.error))?;

        trace!(path = path.display().to_string(); "Created temporary file");
        self.paths.push(path.clone());
        Ok((path, file))
    }

    /// Tracks a path that some other party will create.
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Returns every tracked path, in creation order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Removes every tracked path and stops tracking them.
    ///
    /// Returns one warning per path that still could not be removed.
    pub fn cleanup(&mut self) -> Vec<CleanupWarning> {
        let mut warnings = Vec::new();

        for path in self.paths.drain(..) {
            match remove_file(&path) {
                Ok(()) => trace!(path = path.display().to_string(); "Removed temporary file"),
                Err(source) => {
                    let warning = CleanupWarning { path, source };
                    warn!(warning:%; "Temporary file left behind");
                    warnings.push(warning);
                }
            }
        }

        warnings
    }
}

impl Drop for TempResources {
    fn drop(&mut self) {
        if !self.paths.is_empty() {
            self.cleanup();
        }
    }
}

fn remove_file(path: &Path) -> io::Result<()> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match fs::remove_file(path) {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err)
                if err.kind() == io::ErrorKind::Interrupted
                    && attempts < MAX_INTERRUPTED_ATTEMPTS =>
            {
                continue;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_create_is_unique_and_tracked() {
        let dir = tempdir().unwrap();
        let mut resources = TempResources::new(dir.path());

        let (first, _) = resources.create(".net").unwrap();
        let (second, _) = resources.create(".net").unwrap();

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(first.starts_with(dir.path()));
        assert!(first.to_string_lossy().ends_with(".net"));
        assert_eq!(resources.paths(), &[first, second]);
    }

    #[test]
    fn test_cleanup_removes_everything() {
        let dir = tempdir().unwrap();
        let mut resources = TempResources::new(dir.path());

        let (path, mut file) = resources.create(".csv").unwrap();
        writeln!(file, "content").unwrap();
        let produced = dir.path().join("engine-output.txt");
        fs::write(&produced, "x").unwrap();
        resources.track(&produced);

        let warnings = resources.cleanup();

        assert!(warnings.is_empty());
        assert!(!path.exists());
        assert!(!produced.exists());
        assert!(resources.paths().is_empty());
    }

    #[test]
    fn test_missing_file_is_not_a_warning() {
        let dir = tempdir().unwrap();
        let mut resources = TempResources::new(dir.path());
        resources.track(dir.path().join("never-created.distances.txt"));

        assert!(resources.cleanup().is_empty());
    }

    #[test]
    fn test_unremovable_path_is_a_warning() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("a-directory");
        fs::create_dir(&blocker).unwrap();

        let (created, warnings) = {
            let mut resources = TempResources::new(dir.path());
            let (created, _) = resources.create(".net").unwrap();
            resources.track(&blocker);
            (created, resources.cleanup())
        };

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path(), blocker.as_path());
        assert!(warnings[0].to_string().contains("a-directory"));
        assert!(!created.exists());
    }

    #[test]
    fn test_drop_cleans_up() {
        let dir = tempdir().unwrap();
        let path = {
            let mut resources = TempResources::new(dir.path());
            resources.create(".coords").unwrap().0
        };

        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_create_in_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let mut resources = TempResources::new(dir.path().join("missing"));

        let err = resources.create(".net").unwrap_err();

        assert!(matches!(err, SerializationError::TempFile { .. }));
        assert!(resources.paths().is_empty());
    }
}
