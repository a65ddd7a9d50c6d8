//! Feature activations and feature definitions.
//!
//! vcpkg uses the word "feature" for two different things:
//!
//! - A [`FeatureDefinition`] is an optional unit of the package itself, found
//!   under the manifest's `features` mapping. It carries a description, its
//!   own dependencies, supported platforms and an optional license.
//! - A [`FeatureActivation`] is a *reference* to a feature by name, optionally
//!   restricted to a platform. Activations appear in the manifest's
//!   `default-features` list and in a dependency's requested `features`.
//!
//! Activations accept either a bare string (`"ssl"`) or an object
//! (`{"name": "ssl", "platform": "linux"}`); both decode to the same value.

use serde::de::{Deserialize, Deserializer};
use serde::Serialize;

use crate::dependency::Dependency;
use crate::shape::{non_empty, null_as_default, require_name, Object, Shape, StructuredShape};

// ---------------------------------------------------------------------------
// FeatureActivation
// ---------------------------------------------------------------------------

/// A reference to a feature by name, optionally platform-qualified.
///
/// `name` is never empty. `platform` is `None` when the reference applies on
/// every platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureActivation {
    /// The referenced feature's name.
    pub name: String,
    /// Platform expression restricting the activation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl FeatureActivation {
    /// An unconditional activation of `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: None,
        }
    }

    /// Restrict the activation to `platform`.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = non_empty(Some(platform.into()));
        self
    }

    /// Whether the activation applies on every platform.
    pub fn is_unconditional(&self) -> bool {
        self.platform.is_none()
    }
}

#[derive(serde::Deserialize)]
struct ActivationObject {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default)]
    platform: Option<String>,
}

impl StructuredShape for ActivationObject {
    const EXPECTING: &'static str = "a feature name or feature object";
}

impl<'de> Deserialize<'de> for FeatureActivation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        const WHAT: &str = "a non-empty feature name";

        let (name, platform) = match Shape::<ActivationObject>::deserialize(deserializer)? {
            Shape::Scalar(name) => (name, None),
            Shape::Structured(obj) => (obj.name, non_empty(obj.platform)),
        };
        Ok(FeatureActivation {
            name: require_name::<D::Error>(name, WHAT)?,
            platform,
        })
    }
}

// ---------------------------------------------------------------------------
// FeatureDefinition
// ---------------------------------------------------------------------------

/// One named, optional feature of the package.
///
/// `description` is documented as required by vcpkg but is not enforced at
/// decode time; a missing description decodes as an empty string. Strict
/// parsing (see [`ParseOptions`](crate::parse::ParseOptions)) rejects it.
///
/// `license` is `None` both when the key is absent and when it is `null`. An
/// explicit empty string stays `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureDefinition {
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub supports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl FeatureDefinition {
    /// Whether the feature declared a non-empty description.
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

#[derive(serde::Deserialize)]
struct FeatureObject {
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    dependencies: Vec<Dependency>,
    #[serde(default, deserialize_with = "null_as_default")]
    supports: Vec<String>,
    #[serde(default)]
    license: Option<String>,
}

impl StructuredShape for FeatureObject {
    const EXPECTING: &'static str = "a feature object";
}

impl<'de> Deserialize<'de> for FeatureDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Object(raw) = Object::<FeatureObject>::deserialize(deserializer)?;
        Ok(FeatureDefinition {
            description: raw.description,
            dependencies: raw.dependencies,
            supports: raw.supports,
            license: raw.license,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
