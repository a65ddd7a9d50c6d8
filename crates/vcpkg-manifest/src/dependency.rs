//! Dependency entries.
//!
//! A dependency is written either as a bare port name (`"fmt"`) or as an
//! object:
//!
//! ```json
//! {
//!     "name": "curl",
//!     "version>=": "8.4.0",
//!     "default-features": false,
//!     "features": ["ssl", {"name": "http2", "platform": "!uwp"}],
//!     "platform": "windows"
//! }
//! ```
//!
//! Both shapes decode to the same [`Dependency`]. Inside the manifest's
//! top-level `dependencies` mapping the object may omit `name`; the mapping key
//! supplies it.

use serde::de::{self, Deserialize, Deserializer};
use serde::Serialize;

use crate::feature::FeatureActivation;
use crate::shape::{non_empty, null_as_default, require_name, Shape, StructuredShape};

const NAME_EXPECTED: &str = "a non-empty dependency name";

// ---------------------------------------------------------------------------
// Dependency
// ---------------------------------------------------------------------------

/// One normalized dependency reference.
///
/// `min_version` is an opaque version string; it is not parsed here.
/// `default_features` is `true` unless the source explicitly disabled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// The dependency's port name. Never empty.
    pub name: String,
    /// Minimum acceptable version (`version>=`), if declared.
    #[serde(rename = "version>=", skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    /// Whether the dependency's default features are enabled.
    #[serde(rename = "default-features", skip_serializing_if = "is_true")]
    pub default_features: bool,
    /// Features requested from the dependency.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureActivation>,
    /// Platform expression restricting the dependency, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

fn is_true(value: &bool) -> bool {
    *value
}

impl Dependency {
    /// A dependency on `name` with no further constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_version: None,
            default_features: true,
            features: Vec::new(),
            platform: None,
        }
    }

    /// Set the minimum version.
    pub fn with_min_version(mut self, version: impl Into<String>) -> Self {
        self.min_version = non_empty(Some(version.into()));
        self
    }

    /// Set whether default features are enabled.
    pub fn with_default_features(mut self, enabled: bool) -> Self {
        self.default_features = enabled;
        self
    }

    /// Request an additional feature.
    pub fn with_feature(mut self, feature: FeatureActivation) -> Self {
        self.features.push(feature);
        self
    }

    /// Restrict the dependency to `platform`.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = non_empty(Some(platform.into()));
        self
    }

    /// Resolve a decoded shape into a dependency.
    ///
    /// `key` is the mapping key the value was found under, if any. An object
    /// without a `name` takes its name from the key; an explicit `name` wins.
    /// A bare string is always the name itself.
    pub(crate) fn from_shape<E: de::Error>(
        shape: Shape<DependencyObject>,
        key: Option<&str>,
    ) -> Result<Self, E> {
        match shape {
            Shape::Scalar(name) => Ok(Dependency::new(require_name::<E>(name, NAME_EXPECTED)?)),
            Shape::Structured(obj) => {
                let name = match (non_empty(obj.name), key) {
                    (Some(name), _) => name,
                    (None, Some(key)) => {
                        tracing::trace!(dependency = key, "dependency name taken from mapping key");
                        key.to_owned()
                    }
                    (None, None) => String::new(),
                };
                Ok(Dependency {
                    name: require_name::<E>(name, NAME_EXPECTED)?,
                    min_version: non_empty(obj.min_version),
                    default_features: obj.default_features.unwrap_or(true),
                    features: obj.features,
                    platform: non_empty(obj.platform),
                })
            }
        }
    }
}

/// The object form of a dependency, as written in the manifest.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct DependencyObject {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "version>=", default)]
    min_version: Option<String>,
    #[serde(rename = "default-features", default)]
    default_features: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    features: Vec<FeatureActivation>,
    #[serde(default)]
    platform: Option<String>,
}

impl StructuredShape for DependencyObject {
    const EXPECTING: &'static str = "a dependency name or dependency object";
}

impl<'de> Deserialize<'de> for Dependency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let shape = Shape::<DependencyObject>::deserialize(deserializer)?;
        Dependency::from_shape(shape, None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
