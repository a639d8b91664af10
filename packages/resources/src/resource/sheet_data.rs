//! Sheet instances - raw sheet data paired with its declared metadata.
//!
//! A sheet instance is the unit a resource's `data` map holds: the raw JSON
//! object the server sent for one sheet, together with the shared metadata
//! describing that sheet. An instance cannot exist without its metadata, so
//! every consumer of a populated sheet can rely on the access contract being
//! present.

use std::sync::Arc;

use serde_json::Value;

use crate::ids::SheetId;
use crate::schema::sheet::SheetMetadata;

/// Capability of exposing sheet metadata for reference extraction.
///
/// Reference extraction walks a resource's attached sheets through this
/// interface only; it never looks at the raw values.
pub trait HasReferenceMetadata {
    /// The declared metadata of this sheet.
    fn metadata(&self) -> &SheetMetadata;
}

/// One attached sheet: raw data plus shared metadata.
///
/// The value is opaque to this crate beyond what the metadata declares;
/// interpreting fields is the caller's business.
#[derive(Debug, Clone)]
pub struct SheetInstance {
    metadata: Arc<SheetMetadata>,
    value: Value,
}

impl SheetInstance {
    /// Pairs raw sheet data with its metadata.
    pub fn new(metadata: Arc<SheetMetadata>, value: Value) -> Self {
        Self { metadata, value }
    }

    /// An instance with no data yet (e.g. on a local draft).
    pub fn empty(metadata: Arc<SheetMetadata>) -> Self {
        Self::new(metadata, Value::Object(serde_json::Map::new()))
    }

    /// The sheet identifier, as declared by the metadata.
    pub fn id(&self) -> &SheetId {
        self.metadata.id()
    }

    /// The declared metadata of this sheet.
    pub fn metadata(&self) -> &SheetMetadata {
        &self.metadata
    }

    /// The shared metadata handle, for attaching the same sheet elsewhere.
    pub fn metadata_handle(&self) -> &Arc<SheetMetadata> {
        &self.metadata
    }

    /// The raw sheet data.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the instance, returning the raw sheet data.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Looks up a field in object-shaped sheet data.
    ///
    /// `None` if the value is not an object or has no such key.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.value.as_object().and_then(|object| object.get(name))
    }
}

impl HasReferenceMetadata for SheetInstance {
    fn metadata(&self) -> &SheetMetadata {
        &self.metadata
    }
}

/// Collects declared reference field names across sheets, in iteration order.
///
/// The concatenation of each sheet's `references` declaration; duplicates
/// across sheets are kept. Works over anything exposing sheet metadata, not
/// just [`SheetInstance`].
pub fn collect_references<'a, I, S>(sheets: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a S>,
    S: HasReferenceMetadata + 'a,
{
    sheets
        .into_iter()
        .flat_map(|sheet| sheet.metadata().references())
        .map(String::as_str)
        .collect()
}
