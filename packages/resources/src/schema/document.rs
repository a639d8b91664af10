//! Wire format for schema declarations.
//!
//! The server describes every resource type and sheet it serves in one
//! machine-readable document, loaded by clients once at startup. This module
//! parses that document and turns it into a populated
//! [`SchemaRegistry`]; fetching it is the HTTP collaborator's job.
//!
//! ```json
//! {
//!   "sheets": {
//!     "agora.sheets.comment.IComment": {
//!       "fields": [
//!         { "name": "refers_to", "creatable": true, "create_mandatory": true,
//!           "reference": true },
//!         { "name": "content", "editable": true, "creatable": true }
//!       ]
//!     }
//!   },
//!   "resources": {
//!     "agora.resources.comment.ICommentVersion": {
//!       "super_types": ["agora.resources.item.IItemVersion"],
//!       "sheets": ["agora.sheets.comment.IComment"]
//!     }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SchemaResult;
use crate::schema::descriptor::ResourceTypeDescriptor;
use crate::schema::registry::SchemaRegistry;
use crate::schema::sheet::{SheetField, SheetMetadata};

/// Everything the server declares about its types, in declaration order.
///
/// `IndexMap` keys keep the document's order so registration order (and with
/// it every registry listing) is reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Sheet declarations keyed by sheet identifier.
    #[serde(default)]
    pub sheets: IndexMap<String, SheetSpec>,

    /// Resource type declarations keyed by content type.
    #[serde(default)]
    pub resources: IndexMap<String, ResourceTypeSpec>,
}

/// Declaration of one sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetSpec {
    /// Field declarations, in order.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Declaration of one sheet field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name within the sheet.
    pub name: String,

    /// Included in read responses. Defaults to true.
    #[serde(default = "default_true")]
    pub readable: bool,

    /// Accepted in edit requests.
    #[serde(default)]
    pub editable: bool,

    /// Accepted in create requests.
    #[serde(default)]
    pub creatable: bool,

    /// Required in create requests.
    #[serde(default)]
    pub create_mandatory: bool,

    /// The value references another resource.
    #[serde(default)]
    pub reference: bool,
}

/// Declaration of one resource type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceTypeSpec {
    /// Flattened ancestor types.
    #[serde(default)]
    pub super_types: Vec<String>,

    /// Sheets carried by this type.
    #[serde(default)]
    pub sheets: Vec<String>,

    /// Content types addable inside this type.
    #[serde(default)]
    pub element_types: Vec<String>,

    /// Permission required to create an instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_permission: Option<String>,

    /// Prefix for server-side naming of new children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autonaming_prefix: Option<String>,
}

fn default_true() -> bool {
    true
}

impl From<FieldSpec> for SheetField {
    fn from(spec: FieldSpec) -> Self {
        Self {
            name: spec.name,
            readable: spec.readable,
            editable: spec.editable,
            creatable: spec.creatable,
            create_mandatory: spec.create_mandatory,
            reference: spec.reference,
        }
    }
}

impl SchemaDocument {
    /// Builds a registry from the document.
    ///
    /// Sheets are registered first, then resource types, each in document
    /// order; the same [`SchemaError`](crate::error::SchemaError)s apply as
    /// for manual registration.
    pub fn into_registry(self) -> SchemaResult<SchemaRegistry> {
        let mut registry = SchemaRegistry::new();

        for (id, spec) in self.sheets {
            let fields = spec.fields.into_iter().map(SheetField::from).collect();
            registry.register_sheet(SheetMetadata::new(id, fields)?)?;
        }

        for (id, spec) in self.resources {
            let mut builder = ResourceTypeDescriptor::build(id);
            for super_type in spec.super_types {
                builder = builder.super_type(super_type);
            }
            for sheet in spec.sheets {
                builder = builder.sheet(sheet);
            }
            for element_type in spec.element_types {
                builder = builder.element_type(element_type);
            }
            if let Some(permission) = spec.create_permission {
                builder = builder.create_permission(permission);
            }
            if let Some(prefix) = spec.autonaming_prefix {
                builder = builder.autonaming(prefix);
            }
            registry.register_resource_type(builder.finish())?;
        }

        debug!(
            sheets = registry.sheet_ids().count(),
            resources = registry.content_types().count(),
            "schema document loaded"
        );
        Ok(registry)
    }
}
