//! Schema registry mapping identifiers to shared declarations.
//!
//! The registry maps content-type identifiers to resource type descriptors
//! and sheet identifiers to sheet metadata. It is populated once at
//! application start (by hand, from the built-in schema, or from a parsed
//! [`SchemaDocument`](crate::schema::document::SchemaDocument)) and then
//! passed by shared reference to every collaborator that assembles
//! resources. There is no global state: a registry is an ordinary value.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::ids::{ContentTypeId, SheetId};
use crate::schema::descriptor::ResourceTypeDescriptor;
use crate::schema::sheet::SheetMetadata;

/// Registry of all declared sheets and resource types.
///
/// Declarations are handed out as `Arc`s so instances can share them without
/// copying; nothing is mutated after registration.
///
/// # Example
///
/// ```rust
/// use resources::schema::descriptor::ResourceTypeDescriptor;
/// use resources::schema::registry::SchemaRegistry;
/// use resources::schema::sheet::{SheetField, SheetMetadata};
///
/// let mut registry = SchemaRegistry::new();
/// registry.register_sheet(SheetMetadata::new(
///     "agora.sheets.name.IName",
///     vec![SheetField::new("name").create_mandatory()],
/// )?)?;
/// registry.register_resource_type(
///     ResourceTypeDescriptor::build("agora.resources.pool.IPool")
///         .sheet("agora.sheets.name.IName")
///         .finish(),
/// )?;
///
/// assert!(registry.has_resource_type("agora.resources.pool.IPool"));
/// # Ok::<(), resources::error::SchemaError>(())
/// ```
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    sheets: IndexMap<SheetId, Arc<SheetMetadata>>,
    resources: IndexMap<ContentTypeId, Arc<ResourceTypeDescriptor>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sheet declaration.
    ///
    /// # Errors
    ///
    /// [`SchemaError::SheetAlreadyRegistered`] if the identifier is taken.
    /// Sheets are declared at most once; replacing a live declaration would
    /// silently change the metadata other instances already share.
    pub fn register_sheet(&mut self, metadata: SheetMetadata) -> SchemaResult<()> {
        let id = metadata.id().clone();
        if self.sheets.contains_key(&id) {
            return Err(SchemaError::SheetAlreadyRegistered { sheet: id });
        }
        debug!(sheet = %id, fields = metadata.field_names().len(), "registered sheet");
        self.sheets.insert(id, Arc::new(metadata));
        Ok(())
    }

    /// Registers a resource type descriptor.
    ///
    /// Every sheet the descriptor declares must already be registered, so
    /// register sheets first. Ancestor types are *not* validated: they may
    /// name abstract marker types that never get a descriptor of their own.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::ResourceTypeAlreadyRegistered`] if the identifier is
    ///   taken.
    /// - [`SchemaError::UnknownSheet`] if a declared sheet is missing.
    pub fn register_resource_type(
        &mut self,
        descriptor: ResourceTypeDescriptor,
    ) -> SchemaResult<()> {
        let content_type = descriptor.content_type().clone();
        if self.resources.contains_key(&content_type) {
            return Err(SchemaError::ResourceTypeAlreadyRegistered { content_type });
        }
        for sheet in descriptor.sheet_names() {
            if !self.sheets.contains_key(sheet) {
                return Err(SchemaError::UnknownSheet {
                    content_type,
                    sheet: sheet.clone(),
                });
            }
        }
        debug!(
            content_type = %content_type,
            sheets = descriptor.sheet_names().len(),
            "registered resource type"
        );
        self.resources.insert(content_type, Arc::new(descriptor));
        Ok(())
    }

    /// Looks up a sheet declaration.
    pub fn sheet(&self, sheet: &str) -> Option<&Arc<SheetMetadata>> {
        self.sheets.get(sheet)
    }

    /// Looks up a resource type descriptor.
    pub fn descriptor(&self, content_type: &str) -> Option<&Arc<ResourceTypeDescriptor>> {
        self.resources.get(content_type)
    }

    /// Whether a sheet with this identifier is registered.
    pub fn has_sheet(&self, sheet: &str) -> bool {
        self.sheets.contains_key(sheet)
    }

    /// Whether a resource type with this identifier is registered.
    pub fn has_resource_type(&self, content_type: &str) -> bool {
        self.resources.contains_key(content_type)
    }

    /// All registered sheet identifiers, in registration order.
    pub fn sheet_ids(&self) -> impl Iterator<Item = &SheetId> {
        self.sheets.keys()
    }

    /// All registered content types, in registration order.
    pub fn content_types(&self) -> impl Iterator<Item = &ContentTypeId> {
        self.resources.keys()
    }
}
