//! Self-installation of the servicify binary

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::error::ServiceError;

/// Outcome of copying the running executable into place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Binary copied to the destination
    Installed(PathBuf),
    /// Already running from the destination; nothing copied
    AlreadyInstalled(PathBuf),
}

/// Copy `source` to `dest` and mark it executable (0755)
///
/// Parent directories are created as needed. When `source` and `dest` are
/// the same file nothing is written.
pub fn install_executable(source: &Path, dest: &Path) -> Result<SetupOutcome, ServiceError> {
    if is_same_file(source, dest) {
        tracing::debug!("{} is already the running binary", dest.display());
        return Ok(SetupOutcome::AlreadyInstalled(dest.to_path_buf()));
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ServiceError::io("Failed to create directory", parent, e))?;
    }

    // Write beside the target then rename, so a running copy is never truncated
    let staging = dest.with_extension("servicify-new");
    fs::copy(source, &staging)
        .map_err(|e| ServiceError::io("Failed to copy executable to", &staging, e))?;
    let placed = fs::set_permissions(&staging, fs::Permissions::from_mode(0o755))
        .map_err(|e| ServiceError::io("Failed to set permissions on", &staging, e))
        .and_then(|()| {
            fs::rename(&staging, dest).map_err(|e| ServiceError::io("Failed to install", dest, e))
        });
    if let Err(e) = placed {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }

    tracing::info!("Installed {} -> {}", source.display(), dest.display());
    Ok(SetupOutcome::Installed(dest.to_path_buf()))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_and_marks_executable() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("build/servicify");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, b"\x7fELF").unwrap();
        let dest = dir.path().join("usr/local/bin/servicify");

        let outcome = install_executable(&source, &dest).unwrap();

        assert_eq!(outcome, SetupOutcome::Installed(dest.clone()));
        assert_eq!(fs::read(&dest).unwrap(), b"\x7fELF");
        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert!(!dest.with_extension("servicify-new").exists());
    }

    #[test]
    fn overwrites_previous_install() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("servicify-new-build");
        let dest = dir.path().join("bin/servicify");
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::write(&dest, "old").unwrap();
        fs::write(&source, "new").unwrap();

        install_executable(&source, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn same_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("servicify");
        fs::write(&path, "bin").unwrap();

        let outcome = install_executable(&path, &path).unwrap();

        assert_eq!(outcome, SetupOutcome::AlreadyInstalled(path));
    }

    #[test]
    fn failed_rename_removes_staged_copy() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("servicify");
        fs::write(&source, "bin").unwrap();
        // A non-empty directory at the destination makes the rename fail
        let dest = dir.path().join("bin/target");
        fs::create_dir_all(dest.join("occupied")).unwrap();

        let err = install_executable(&source, &dest).unwrap_err();

        assert!(matches!(err, ServiceError::Io { .. }));
        assert!(!dest.with_extension("servicify-new").exists());
        assert!(dest.is_dir());
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = install_executable(&dir.path().join("nope"), &dir.path().join("dest"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Io { .. }));
    }
}
