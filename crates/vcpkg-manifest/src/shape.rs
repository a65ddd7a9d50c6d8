//! String-or-object decoding for manifest fields.
//!
//! Several vcpkg manifest fields accept two physically different JSON shapes
//! for the same logical value: a bare string naming the thing, or an object
//! spelling out its properties. [`Shape`] is the tagged form of that choice.
//! It is resolved exactly once, at decode time, into the canonical model type
//! (see [`Dependency`](crate::dependency::Dependency) and
//! [`FeatureActivation`](crate::feature::FeatureActivation)); the raw shape is
//! never stored.
//!
//! # Decode order
//!
//! The decoder dispatches on the JSON value itself rather than trying one
//! shape and falling back on failure:
//!
//! - a JSON string becomes [`Shape::Scalar`], decoded through serde's string
//!   visitor so escape sequences are handled;
//! - a JSON object becomes [`Shape::Structured`];
//! - anything else (number, bool, null, array) is a shape mismatch.
//!
//! A string can therefore never be mistaken for an empty object, and an object
//! that fails to decode reports its own error instead of being retried as a
//! string.
//!
//! # Example
//!
//! ```
//! use serde::Deserialize;
//! use vcpkg_manifest::shape::{Shape, StructuredShape};
//!
//! #[derive(Debug, PartialEq, Deserialize)]
//! struct Port {
//!     name: String,
//! }
//!
//! impl StructuredShape for Port {
//!     const EXPECTING: &'static str = "a port name or port object";
//! }
//!
//! let bare: Shape<Port> = serde_json::from_str(r#""zlib""#).unwrap();
//! assert_eq!(bare, Shape::Scalar("zlib".to_owned()));
//!
//! let object: Shape<Port> = serde_json::from_str(r#"{"name": "zlib"}"#).unwrap();
//! assert_eq!(object, Shape::Structured(Port { name: "zlib".to_owned() }));
//!
//! assert!(serde_json::from_str::<Shape<Port>>("42").is_err());
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Unexpected, Visitor};

// ---------------------------------------------------------------------------
// StructuredShape
// ---------------------------------------------------------------------------

/// A type decoded from the object form of a string-or-object field.
pub trait StructuredShape {
    /// Human-readable description of the accepted shapes, used in
    /// shape-mismatch errors (e.g. `"a dependency name or object"`).
    const EXPECTING: &'static str;
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// One decoded string-or-object value, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<S> {
    /// The bare-string shorthand, holding the decoded (unescaped) string.
    Scalar(String),
    /// The structured-object form.
    Structured(S),
}

impl<'de, S> Deserialize<'de> for Shape<S>
where
    S: Deserialize<'de> + StructuredShape,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ShapeVisitor(PhantomData))
    }
}

struct ShapeVisitor<S>(PhantomData<S>);

impl<'de, S> Visitor<'de> for ShapeVisitor<S>
where
    S: Deserialize<'de> + StructuredShape,
{
    type Value = Shape<S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(S::EXPECTING)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Shape::Scalar(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Shape::Scalar(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        S::deserialize(MapAccessDeserializer::new(map)).map(Shape::Structured)
    }
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// Decodes `S` from a JSON object only.
///
/// Derived `Deserialize` impls for structs also accept JSON arrays
/// (positional fields), so `[]` would silently decode as an all-default
/// struct. Wrapping the raw struct in `Object` rejects every non-object value
/// with `S::EXPECTING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object<S>(pub S);

impl<'de, S> Deserialize<'de> for Object<S>
where
    S: Deserialize<'de> + StructuredShape,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ObjectVisitor(PhantomData))
    }
}

struct ObjectVisitor<S>(PhantomData<S>);

impl<'de, S> Visitor<'de> for ObjectVisitor<S>
where
    S: Deserialize<'de> + StructuredShape,
{
    type Value = Object<S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(S::EXPECTING)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        S::deserialize(MapAccessDeserializer::new(map)).map(Object)
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Decodes an optional field where JSON `null` means the same as absent.
///
/// Use together with `#[serde(default)]` so that a missing key also yields
/// `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Rejects an empty name with a shape-mismatch error.
pub(crate) fn require_name<E: de::Error>(name: String, what: &'static str) -> Result<String, E> {
    if name.is_empty() {
        return Err(E::invalid_value(Unexpected::Str(""), &what));
    }
    Ok(name)
}

/// Treats an empty qualifier string the same as an absent one.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
