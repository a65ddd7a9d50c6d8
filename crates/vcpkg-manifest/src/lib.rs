//! vcpkg manifest -- Typed decoding of `vcpkg.json` package manifests.
//!
//! A vcpkg manifest lets the same logical field appear in more than one JSON
//! shape: a dependency may be a bare string (`"fmt"`) or an object
//! (`{"name": "fmt", "version>=": "9.0.0"}`), and a feature reference may be a
//! bare string or a `{name, platform}` object. This crate collapses those
//! shapes into one canonical, strictly typed [`Manifest`](manifest::Manifest)
//! that downstream dependency-graph construction can consume without ever
//! looking at raw JSON again.
//!
//! # Quick Start
//!
//! ```
//! use vcpkg_manifest::prelude::*;
//!
//! let manifest = parse_str(
//!     r#"{
//!         "dependencies": { "fmt": { "version>=": "9.0.0" } },
//!         "default-features": ["core"],
//!         "overrides": { "zlib": "1.2.11" }
//!     }"#,
//! )
//! .unwrap();
//!
//! let fmt = &manifest.dependencies["fmt"];
//! assert_eq!(fmt.name, "fmt");
//! assert_eq!(fmt.min_version.as_deref(), Some("9.0.0"));
//! assert_eq!(manifest.default_features[0].name, "core");
//! assert_eq!(manifest.overrides["zlib"], "1.2.11");
//! ```
//!
//! # Modules
//!
//! - [`shape`]: the string-or-object decoder shared by dependencies and
//!   feature references, plus null-tolerant field helpers.
//! - [`feature`]: feature activations and feature definitions.
//! - [`dependency`]: dependency entries.
//! - [`manifest`]: the top-level document.
//! - [`parse`]: entry points and [`ParseOptions`](parse::ParseOptions).
//! - [`catalog`]: hand-off of a decoded manifest to a graph builder.

#![deny(unsafe_code)]

pub mod catalog;
pub mod dependency;
pub mod feature;
pub mod manifest;
pub mod parse;
pub mod shape;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while reading or decoding a manifest.
///
/// Decoding is all-or-nothing: any of these aborts the parse and no partial
/// manifest is returned.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Reading the source bytes failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON (including truncated input).
    #[error("invalid JSON: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A value is valid JSON but matches none of the accepted shapes.
    #[error("unexpected shape: {message}")]
    Shape {
        line: usize,
        column: usize,
        message: String,
    },

    /// Strict mode: a feature definition has no description.
    #[error("feature '{feature}' has no description")]
    MissingDescription { feature: String },

    /// The input exceeded the caller-configured size limit.
    #[error("manifest exceeds the configured limit of {limit} bytes")]
    InputTooLarge { limit: u64 },
}

impl From<serde_json::Error> for ManifestError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let line = err.line();
        let column = err.column();
        match err.classify() {
            Category::Io => ManifestError::Io(err.into()),
            Category::Syntax | Category::Eof => ManifestError::Syntax {
                line,
                column,
                message: err.to_string(),
            },
            Category::Data => ManifestError::Shape {
                line,
                column,
                message: err.to_string(),
            },
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ManifestError>;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::catalog::{
        catalog_manifest, CatalogOutput, GraphBuilder, Package, Relationship, UnwiredGraph,
    };
    pub use crate::dependency::Dependency;
    pub use crate::feature::{FeatureActivation, FeatureDefinition};
    pub use crate::manifest::Manifest;
    pub use crate::parse::{
        parse_file, parse_file_with, parse_reader, parse_reader_with, parse_slice,
        parse_slice_with, parse_str, parse_str_with, ParseOptions,
    };
    pub use crate::ManifestError;
}
