//! Typed errors for schema registration and resource construction.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Absence is not an error in this crate: querying a resource with an
//! identifier the schema never declared answers `false`. Errors are reserved
//! for declaration-time conflicts and malformed server payloads, and are
//! always local to the call that raised them.

use thiserror::Error;

use crate::ids::{ContentTypeId, SheetId};

/// Errors raised while declaring sheets and resource types.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A sheet with this identifier is already registered.
    ///
    /// Sheets are declared at most once; all instances of a sheet share one
    /// read-only metadata record.
    #[error("sheet already registered: {sheet}")]
    SheetAlreadyRegistered {
        /// Identifier of the sheet that was declared twice.
        sheet: SheetId,
    },

    /// A resource type with this identifier is already registered.
    #[error("resource type already registered: {content_type}")]
    ResourceTypeAlreadyRegistered {
        /// Identifier of the resource type that was declared twice.
        content_type: ContentTypeId,
    },

    /// A resource type declares a sheet the registry has never seen.
    ///
    /// Sheets must be registered before any resource type that carries them.
    #[error("resource type {content_type} declares unknown sheet {sheet}")]
    UnknownSheet {
        /// The resource type being registered.
        content_type: ContentTypeId,
        /// The sheet it declares.
        sheet: SheetId,
    },

    /// A sheet declares the same field name more than once.
    #[error("sheet {sheet} declares field {field} more than once")]
    DuplicateField {
        /// The sheet being declared.
        sheet: SheetId,
        /// The repeated field name.
        field: String,
    },

    /// A field is mandatory on create but not itself creatable.
    #[error("sheet {sheet} field {field} is create-mandatory but not creatable")]
    MandatoryNotCreatable {
        /// The sheet being declared.
        sheet: SheetId,
        /// The offending field name.
        field: String,
    },
}

/// Errors raised while building a resource instance from server data.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The payload names a content type absent from the registry.
    #[error("unknown content type: {content_type}")]
    UnknownContentType {
        /// The content type the payload carried.
        content_type: ContentTypeId,
    },

    /// The payload carries sheet data its resource type does not declare.
    #[error("resource type {content_type} does not declare sheet {sheet}")]
    UndeclaredSheet {
        /// The resource type of the instance being assembled.
        content_type: ContentTypeId,
        /// The sheet key found in the payload.
        sheet: SheetId,
    },

    /// The payload does not match the wire shape.
    ///
    /// The wrapped error names the offending field (e.g. a missing
    /// `content_type` or a non-object `data`).
    #[error("malformed resource payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Result type alias for schema declaration.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Result type alias for resource construction.
pub type ResourceResult<T> = std::result::Result<T, ResourceError>;
