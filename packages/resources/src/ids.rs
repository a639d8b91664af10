//! Typed string identifiers for schema and resource addressing.
//!
//! The server addresses everything by dotted names and paths carried as plain
//! JSON strings. This module wraps those strings in `Name<T>`, a typed wrapper
//! that prevents accidentally mixing up identifier kinds (e.g. passing a
//! `SheetId` where a `ContentTypeId` was expected).
//!
//! # Example
//!
//! ```rust
//! use resources::ids::{ContentTypeId, SheetId};
//!
//! let content_type = ContentTypeId::from("agora.resources.comment.IComment");
//! let sheet = SheetId::from("agora.sheets.comment.IComment");
//!
//! // These are incompatible types:
//! // let wrong: ContentTypeId = sheet; // Compile error!
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// Marker type for content-type identifiers.
pub struct ContentType;

/// Marker type for sheet identifiers.
pub struct Sheet;

/// Marker type for resource paths.
pub struct Path;

/// A typed wrapper around a wire-level string identifier.
///
/// The type parameter `T` is the identifier kind. Identifiers are opaque:
/// the core never inspects their structure, only compares them.
#[repr(transparent)]
pub struct Name<T>(String, PhantomData<fn() -> T>);

/// Typed identifier naming a resource type.
pub type ContentTypeId = Name<ContentType>;

/// Typed identifier naming a sheet (schema fragment).
pub type SheetId = Name<Sheet>;

/// Opaque server-assigned resource path.
///
/// Absent on instances that have not been persisted yet.
pub type ResourcePath = Name<Path>;

impl<T> Name<T> {
    /// Creates an identifier from any string-like value.
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into(), PhantomData)
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the inner string.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

// Manual impls: deriving would incorrectly bound the marker type `T`.

impl<T> Clone for Name<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for Name<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&format!("Name<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Name<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Name<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Name<T> {}

impl<T> PartialEq<str> for Name<T> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl<T> PartialEq<&str> for Name<T> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<T> PartialOrd for Name<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Name<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Name<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

// Borrow<str> lets maps keyed by an identifier be queried with a plain &str.
impl<T> Borrow<str> for Name<T> {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<T> AsRef<str> for Name<T> {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<T> From<&str> for Name<T> {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<String> for Name<T> {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> From<Name<T>> for String {
    #[inline]
    fn from(name: Name<T>) -> Self {
        name.0
    }
}

impl<T> FromStr for Name<T> {
    type Err = std::convert::Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

// ============================================================================
// Serde support
// ============================================================================

// Identifiers appear on the wire as plain JSON strings, including as object
// keys, so (de)serialization delegates to the inner string.

impl<T> Serialize for Name<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Name<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

// ============================================================================
// Tests
// ============================================================================
