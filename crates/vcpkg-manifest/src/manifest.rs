//! The top-level vcpkg manifest document.
//!
//! A [`Manifest`] holds the four parts of `vcpkg.json` that matter for
//! dependency-graph construction:
//!
//! - `default-features`: feature activations enabled unless the consumer opts
//!   out;
//! - `features`: the package's optional features, by name;
//! - `dependencies`: dependency entries, by name;
//! - `overrides`: forced versions, by package name.
//!
//! Every other key in the document is ignored. Mappings are `BTreeMap`s so
//! iteration and serialization order are deterministic; when the source
//! repeats a key, the last value wins.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer};
use serde::Serialize;

use crate::dependency::{Dependency, DependencyObject};
use crate::feature::{FeatureActivation, FeatureDefinition};
use crate::shape::{null_as_default, Object, Shape, StructuredShape};
use crate::ManifestError;

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// A fully decoded vcpkg manifest.
///
/// All values are normalized: dependencies and feature activations carry no
/// trace of which JSON shape they were written in, and every dependency in
/// [`dependencies`](Self::dependencies) has a non-empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Feature activations enabled by default.
    #[serde(rename = "default-features", skip_serializing_if = "Vec::is_empty")]
    pub default_features: Vec<FeatureActivation>,
    /// Optional features of the package, by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, FeatureDefinition>,
    /// Dependency entries, by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, Dependency>,
    /// Forced version strings, by package name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
}

impl Manifest {
    /// Whether the manifest declares nothing at all.
    pub fn is_empty(&self) -> bool {
        self.default_features.is_empty()
            && self.features.is_empty()
            && self.dependencies.is_empty()
            && self.overrides.is_empty()
    }

    /// The forced version for `package`, if one is declared.
    pub fn override_for(&self, package: &str) -> Option<&str> {
        self.overrides.get(package).map(String::as_str)
    }

    /// Iterate every dependency declared anywhere in the manifest: top-level
    /// entries first (in key order), then each feature's dependencies (in
    /// feature key order), paired with the feature that declares them.
    pub fn all_dependencies(&self) -> impl Iterator<Item = (Option<&str>, &Dependency)> {
        let top = self.dependencies.values().map(|dep| (None::<&str>, dep));
        let nested = self.features.iter().flat_map(|(name, feature)| {
            feature
                .dependencies
                .iter()
                .map(move |dep| (Some(name.as_str()), dep))
        });
        top.chain(nested)
    }
}

impl FromStr for Manifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_str(s)
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct ManifestObject {
    #[serde(rename = "default-features", default, deserialize_with = "null_as_default")]
    default_features: Vec<FeatureActivation>,
    #[serde(default, deserialize_with = "null_as_default")]
    features: BTreeMap<String, FeatureDefinition>,
    #[serde(default, deserialize_with = "dependency_map")]
    dependencies: BTreeMap<String, Dependency>,
    #[serde(default, deserialize_with = "null_as_default")]
    overrides: BTreeMap<String, String>,
}

impl StructuredShape for ManifestObject {
    const EXPECTING: &'static str = "a vcpkg manifest object";
}

/// Decodes the `dependencies` mapping, letting each key name an object entry
/// that omits `name`.
fn dependency_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Dependency>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Shape<DependencyObject>> = null_as_default(deserializer)?;
    raw.into_iter()
        .map(|(key, shape)| {
            let dep = Dependency::from_shape::<D::Error>(shape, Some(key.as_str()))?;
            Ok((key, dep))
        })
        .collect()
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Object(raw) = Object::<ManifestObject>::deserialize(deserializer)?;
        Ok(Manifest {
            default_features: raw.default_features,
            features: raw.features,
            dependencies: raw.dependencies,
            overrides: raw.overrides,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
