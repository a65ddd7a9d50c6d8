//! Hand-off of a decoded manifest to graph construction.
//!
//! Turning a [`Manifest`] into packages and dependency relationships belongs
//! to an external collaborator, modelled here as the [`GraphBuilder`] trait.
//! This module only guarantees that the builder sees a complete, normalized
//! manifest: [`catalog_manifest`] reads and decodes the whole document first
//! and never calls the builder on failure.
//!
//! [`UnwiredGraph`] is the builder used until real graph construction is
//! wired in; it reports no packages and no relationships.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;
use crate::parse::{parse_reader_with, ParseOptions};
use crate::Result;

/// A package discovered from a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: Option<String>,
}

/// A directed dependency edge between two packages, by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
}

/// What a [`GraphBuilder`] produces for one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOutput {
    pub packages: Vec<Package>,
    pub relationships: Vec<Relationship>,
}

impl CatalogOutput {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.relationships.is_empty()
    }
}

/// Builds packages and relationships from a decoded manifest.
pub trait GraphBuilder {
    fn build(&self, manifest: &Manifest) -> CatalogOutput;
}

/// Builder that is not yet connected to the decoded manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwiredGraph;

impl GraphBuilder for UnwiredGraph {
    fn build(&self, _manifest: &Manifest) -> CatalogOutput {
        CatalogOutput::default()
    }
}

impl<F> GraphBuilder for F
where
    F: Fn(&Manifest) -> CatalogOutput,
{
    fn build(&self, manifest: &Manifest) -> CatalogOutput {
        self(manifest)
    }
}

/// Read a manifest from `reader`, decode it, and hand it to `builder`.
pub fn catalog_manifest<R, G>(reader: R, options: &ParseOptions, builder: &G) -> Result<CatalogOutput>
where
    R: Read,
    G: GraphBuilder + ?Sized,
{
    let manifest = parse_reader_with(reader, options)?;
    let output = builder.build(&manifest);
    tracing::debug!(
        packages = output.packages.len(),
        relationships = output.relationships.len(),
        "cataloged vcpkg manifest"
    );
    Ok(output)
}
