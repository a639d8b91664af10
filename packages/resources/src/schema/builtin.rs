//! Built-in platform schema.
//!
//! The sheets and resource types every deployment ships with. Process-level
//! schemas extend this set (via [`register_core_schema`] on their own
//! registry) with deployment-specific types served by the schema document.

use crate::error::SchemaResult;
use crate::schema::descriptor::ResourceTypeDescriptor;
use crate::schema::registry::SchemaRegistry;
use crate::schema::sheet::{SheetField, SheetMetadata};

/// Client-assigned name of a resource, fixed after creation.
pub const SHEET_NAME: &str = "agora.sheets.name.IName";

/// Human-readable title.
pub const SHEET_TITLE: &str = "agora.sheets.title.ITitle";

/// Long-form description.
pub const SHEET_DESCRIPTION: &str = "agora.sheets.description.IDescription";

/// Server-maintained bookkeeping: creator, timestamps, deletion flags.
pub const SHEET_METADATA: &str = "agora.sheets.metadata.IMetadata";

/// Version lineage: which version(s) this one follows.
pub const SHEET_VERSIONABLE: &str = "agora.sheets.versions.IVersionable";

/// Pool contents: the elements a container holds.
pub const SHEET_POOL: &str = "agora.sheets.pool.IPool";

/// Comment payload: body text and the commented resource.
pub const SHEET_COMMENT: &str = "agora.sheets.comment.IComment";

/// Generic container for other resources.
pub const TYPE_POOL: &str = "agora.resources.pool.IPool";

/// Versionable content container (a pool of its own versions).
pub const TYPE_ITEM: &str = "agora.resources.item.IItem";

/// One immutable version of an item.
pub const TYPE_ITEM_VERSION: &str = "agora.resources.item.IItemVersion";

/// A comment thread on some resource.
pub const TYPE_COMMENT: &str = "agora.resources.comment.IComment";

/// One immutable version of a comment.
pub const TYPE_COMMENT_VERSION: &str = "agora.resources.comment.ICommentVersion";

/// Registers the built-in sheets and resource types.
///
/// Call on an empty registry (or one whose identifiers cannot collide with
/// the `agora.` namespace); re-registering a built-in is an error like any
/// other duplicate declaration.
pub fn register_core_schema(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register_sheet(SheetMetadata::new(
        SHEET_NAME,
        vec![SheetField::new("name").create_mandatory()],
    )?)?;
    registry.register_sheet(SheetMetadata::new(
        SHEET_TITLE,
        vec![SheetField::new("title").editable().create_mandatory()],
    )?)?;
    registry.register_sheet(SheetMetadata::new(
        SHEET_DESCRIPTION,
        vec![
            SheetField::new("description").editable().creatable(),
            SheetField::new("short_description").editable().creatable(),
        ],
    )?)?;
    registry.register_sheet(SheetMetadata::new(
        SHEET_METADATA,
        vec![
            SheetField::new("creator").reference(),
            SheetField::new("creation_date"),
            SheetField::new("modification_date"),
            SheetField::new("deleted").editable(),
            SheetField::new("hidden").editable(),
        ],
    )?)?;
    registry.register_sheet(SheetMetadata::new(
        SHEET_VERSIONABLE,
        vec![SheetField::new("follows").creatable().reference()],
    )?)?;
    registry.register_sheet(SheetMetadata::new(
        SHEET_POOL,
        vec![SheetField::new("elements").reference()],
    )?)?;
    registry.register_sheet(SheetMetadata::new(
        SHEET_COMMENT,
        vec![
            SheetField::new("refers_to").create_mandatory().reference(),
            SheetField::new("content").editable().create_mandatory(),
        ],
    )?)?;

    let pool = ResourceTypeDescriptor::build(TYPE_POOL)
        .sheet(SHEET_NAME)
        .sheet(SHEET_METADATA)
        .sheet(SHEET_POOL)
        .element_type(TYPE_ITEM)
        .create_permission("create_pool")
        .finish();

    let item = ResourceTypeDescriptor::build(TYPE_ITEM)
        .extending(&pool)
        .element_type(TYPE_ITEM_VERSION)
        .create_permission("create_item")
        .autonaming("item_")
        .finish();

    let item_version = ResourceTypeDescriptor::build(TYPE_ITEM_VERSION)
        .sheet(SHEET_METADATA)
        .sheet(SHEET_VERSIONABLE)
        .create_permission("create_item_version")
        .autonaming("version_")
        .finish();

    let comment = ResourceTypeDescriptor::build(TYPE_COMMENT)
        .extending(&item)
        .element_type(TYPE_COMMENT_VERSION)
        .create_permission("create_comment")
        .autonaming("comment_")
        .finish();

    let comment_version = ResourceTypeDescriptor::build(TYPE_COMMENT_VERSION)
        .extending(&item_version)
        .sheet(SHEET_COMMENT)
        .create_permission("create_comment")
        .autonaming("version_")
        .finish();

    registry.register_resource_type(pool)?;
    registry.register_resource_type(item)?;
    registry.register_resource_type(item_version)?;
    registry.register_resource_type(comment)?;
    registry.register_resource_type(comment_version)?;

    Ok(())
}

/// A fresh registry holding exactly the built-in schema.
pub fn core_registry() -> SchemaResult<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    register_core_schema(&mut registry)?;
    Ok(registry)
}
