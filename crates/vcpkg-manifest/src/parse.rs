//! Entry points for decoding a manifest from bytes, text, readers and files.
//!
//! Every entry point is all-or-nothing: it returns a complete [`Manifest`] or
//! a [`ManifestError`], never a partially decoded document. Parsing holds no
//! shared state, so separate documents can be parsed concurrently.
//!
//! The `*_with` variants take [`ParseOptions`]; the plain variants use
//! [`ParseOptions::default`] (lenient, no size limit).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::manifest::Manifest;
use crate::{ManifestError, Result};

// ---------------------------------------------------------------------------
// ParseOptions
// ---------------------------------------------------------------------------

/// Configuration for a parse call.
///
/// Serializable so that a host can keep it alongside its own configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Reject feature definitions without a description.
    ///
    /// vcpkg documents `description` as required, but lenient parsing accepts
    /// documents without one and only logs a warning.
    pub strict: bool,
    /// Upper bound on the input size in bytes. `None` means unbounded.
    pub max_input_bytes: Option<u64>,
}

impl ParseOptions {
    /// Lenient options with no size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with strict validation enabled.
    pub fn strict() -> Self {
        Self::default().with_strict(true)
    }

    /// Enable or disable strict validation.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Bound the input size.
    pub fn with_max_input_bytes(mut self, limit: u64) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Decode a manifest from raw UTF-8 JSON bytes.
pub fn parse_slice(bytes: &[u8]) -> Result<Manifest> {
    parse_slice_with(bytes, &ParseOptions::default())
}

/// Decode a manifest from raw UTF-8 JSON bytes with explicit options.
pub fn parse_slice_with(bytes: &[u8], options: &ParseOptions) -> Result<Manifest> {
    if let Some(limit) = options.max_input_bytes {
        if bytes.len() as u64 > limit {
            return Err(ManifestError::InputTooLarge { limit });
        }
    }

    let manifest: Manifest = serde_json::from_slice(bytes)?;
    check_descriptions(&manifest, options)?;

    debug!(
        default_features = manifest.default_features.len(),
        features = manifest.features.len(),
        dependencies = manifest.dependencies.len(),
        overrides = manifest.overrides.len(),
        "decoded vcpkg manifest"
    );
    Ok(manifest)
}

/// Decode a manifest from a string.
pub fn parse_str(text: &str) -> Result<Manifest> {
    parse_slice(text.as_bytes())
}

/// Decode a manifest from a string with explicit options.
pub fn parse_str_with(text: &str, options: &ParseOptions) -> Result<Manifest> {
    parse_slice_with(text.as_bytes(), options)
}

/// Read `reader` to the end and decode the result.
pub fn parse_reader<R: Read>(reader: R) -> Result<Manifest> {
    parse_reader_with(reader, &ParseOptions::default())
}

/// Read `reader` to the end and decode the result with explicit options.
///
/// With a size limit, at most `limit + 1` bytes are read, so an oversized
/// input is rejected without buffering all of it.
pub fn parse_reader_with<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Manifest> {
    let mut bytes = Vec::new();
    match options.max_input_bytes {
        Some(limit) => {
            reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
        }
        None => {
            reader.read_to_end(&mut bytes)?;
        }
    }
    parse_slice_with(&bytes, options)
}

/// Read and decode the manifest at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Manifest> {
    parse_file_with(path, &ParseOptions::default())
}

/// Read and decode the manifest at `path` with explicit options.
pub fn parse_file_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Manifest> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading vcpkg manifest");
    let file = File::open(path)?;
    parse_reader_with(file, options)
}

// -- internal helpers -------------------------------------------------------

fn check_descriptions(manifest: &Manifest, options: &ParseOptions) -> Result<()> {
    for (name, feature) in &manifest.features {
        if feature.has_description() {
            continue;
        }
        if options.strict {
            return Err(ManifestError::MissingDescription {
                feature: name.clone(),
            });
        }
        warn!(feature = %name, "feature has no description");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
