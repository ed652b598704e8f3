//! Entry point auto-detection
//!
//! Looks at `package.json` first, then probes a fixed list of conventional
//! filenames. The first match wins.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ServiceError;

/// Manifest file consulted for entry point hints
pub const MANIFEST_FILE: &str = "package.json";

/// Conventional entry files, probed in order when the manifest has no answer
pub const FALLBACK_ENTRIES: &[&str] = &[
    "index.js",
    "app.js",
    "server.js",
    "main.js",
    "src/index.js",
    "src/app.js",
    "src/server.js",
    "dist/index.js",
];

/// Where a detected entry point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    /// `package.json` "main"
    ManifestMain,
    /// Trailing argument of `package.json` "scripts.start"
    ManifestStartScript,
    /// First existing file from [`FALLBACK_ENTRIES`]
    Fallback,
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntrySource::ManifestMain => "package.json main",
            EntrySource::ManifestStartScript => "package.json scripts.start",
            EntrySource::Fallback => "conventional filename",
        };
        f.write_str(label)
    }
}

/// An entry point relative to the application directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedEntry {
    pub path: PathBuf,
    pub source: EntrySource,
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    main: Option<String>,
    #[serde(default)]
    scripts: HashMap<String, String>,
}

/// Detect the entry point of the app in `app_dir`
///
/// `interpreter` is the bare command name (e.g. "node") a start script must
/// begin with for its trailing argument to be trusted.
///
/// Manifest-declared values are returned without checking that the file
/// exists; the caller validates existence after selection.
pub fn detect_entry(app_dir: &Path, interpreter: &str) -> Result<DetectedEntry, ServiceError> {
    if let Some(manifest) = read_manifest(app_dir) {
        if let Some(main) = manifest.main.as_deref().and_then(normalize_relative) {
            tracing::debug!(entry = %main.display(), "entry point from package.json main");
            return Ok(DetectedEntry {
                path: main,
                source: EntrySource::ManifestMain,
            });
        }

        if let Some(start) = manifest
            .scripts
            .get("start")
            .and_then(|script| entry_from_start_script(script, interpreter))
        {
            tracing::debug!(entry = %start.display(), "entry point from package.json start script");
            return Ok(DetectedEntry {
                path: start,
                source: EntrySource::ManifestStartScript,
            });
        }
    }

    FALLBACK_ENTRIES
        .iter()
        .find(|candidate| app_dir.join(candidate).is_file())
        .map(|candidate| {
            tracing::debug!(entry = candidate, "entry point from fallback list");
            DetectedEntry {
                path: PathBuf::from(candidate),
                source: EntrySource::Fallback,
            }
        })
        .ok_or_else(|| ServiceError::EntryUndetected(app_dir.to_path_buf()))
}

/// Parse `package.json`, treating a missing or malformed file as absent
fn read_manifest(app_dir: &Path) -> Option<Manifest> {
    let path = app_dir.join(MANIFEST_FILE);
    let contents = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::warn!("Ignoring unparsable {}: {}", path.display(), e);
            None
        }
    }
}

/// Extract the script path from a start command like `node server.js`
///
/// Only trusted when the command invokes the interpreter directly.
fn entry_from_start_script(script: &str, interpreter: &str) -> Option<PathBuf> {
    let mut tokens = script.split_whitespace();
    let program = tokens.next()?;
    let program_name = Path::new(program).file_name()?.to_str()?;
    if program_name != interpreter {
        return None;
    }

    let trailing = tokens.last()?;
    if trailing.starts_with('-') {
        return None;
    }
    normalize_relative(trailing)
}

fn normalize_relative(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix("./").unwrap_or(trimmed);
    if stripped.is_empty() {
        None
    } else {
        Some(PathBuf::from(stripped))
    }
}
