//! Runtime resource and sheet type model for the Agora participation platform.
//!
//! The server composes its content types out of named "sheets" (schema
//! fragments) and describes the whole arrangement to clients as data. This
//! crate is the client-side model of that arrangement: it holds the declared
//! shape of every type, classifies fetched instances against it, and finds
//! the fields that link one resource to another - all without static
//! knowledge of any concrete type.
//!
//! # What lives where
//!
//! - [`schema`] - declarations: [`SheetMetadata`] (per-sheet field access
//!   contract), [`ResourceTypeDescriptor`] (a type's flattened ancestry and
//!   sheet set), the [`SchemaRegistry`] that owns both, the wire-level
//!   [`SchemaDocument`], and the built-in platform schema.
//! - [`resource`] - instances: [`Resource`] assembled from a wire payload or
//!   drafted locally, with its classification and reference queries.
//! - [`ids`] - typed identifier wrappers ([`ContentTypeId`], [`SheetId`],
//!   [`ResourcePath`]).
//! - [`error`] - typed errors; queries never raise, declaration conflicts
//!   and malformed payloads do.
//!
//! # Example
//!
//! ```rust
//! use resources::schema::builtin::{self, TYPE_COMMENT_VERSION, TYPE_ITEM_VERSION};
//! use resources::Resource;
//! use serde_json::json;
//!
//! let registry = builtin::core_registry()?;
//! let comment = Resource::from_value(
//!     json!({
//!         "content_type": TYPE_COMMENT_VERSION,
//!         "path": "/proposal/comments/comment_0000001/version_0000002",
//!         "data": {
//!             "agora.sheets.comment.IComment": {
//!                 "refers_to": "/proposal",
//!                 "content": "What about the northern site?"
//!             },
//!             "agora.sheets.versions.IVersionable": {
//!                 "follows": ["/proposal/comments/comment_0000001/version_0000001"]
//!             }
//!         }
//!     }),
//!     &registry,
//! )?;
//!
//! assert!(comment.is_instance_of(TYPE_ITEM_VERSION));
//! assert_eq!(comment.references(), ["refers_to", "follows"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Scope
//!
//! Everything here is synchronous, in-memory, and read-only after
//! construction. Fetching payloads, caching, permission enforcement, and
//! rendering belong to the surrounding application; this crate only consumes
//! the schema those collaborators provide and answers their queries.

pub mod error;
pub mod ids;
pub mod resource;
pub mod schema;

pub use error::{ResourceError, ResourceResult, SchemaError, SchemaResult};
pub use ids::{ContentTypeId, ResourcePath, SheetId};
pub use resource::model::{RawResource, Resource};
pub use resource::sheet_data::{collect_references, HasReferenceMetadata, SheetInstance};
pub use schema::descriptor::{ResourceTypeDescriptor, ResourceTypeDescriptorBuilder};
pub use schema::document::{FieldSpec, ResourceTypeSpec, SchemaDocument, SheetSpec};
pub use schema::registry::SchemaRegistry;
pub use schema::sheet::{SheetField, SheetMetadata};
