//! Resource type descriptors - the class-level identity of a resource type.
//!
//! A descriptor states what a resource type *is*: its own identifier, every
//! ancestor type it satisfies, and every sheet it carries. The ancestor set
//! is flattened when the descriptor is declared, so membership tests at query
//! time are plain set lookups with no hierarchy walk.

use indexmap::IndexSet;

use crate::ids::{ContentTypeId, SheetId};

/// Class-level declaration of one concrete resource type.
///
/// Shared read-only by every instance of the type. Build one with
/// [`ResourceTypeDescriptor::build`]:
///
/// ```rust
/// use resources::schema::descriptor::ResourceTypeDescriptor;
///
/// let item = ResourceTypeDescriptor::build("agora.resources.item.IItem")
///     .sheet("agora.sheets.name.IName")
///     .finish();
///
/// // A concrete type derived from `item`: ancestors are flattened here,
/// // at declaration time, not walked at query time.
/// let comment = ResourceTypeDescriptor::build("agora.resources.comment.IComment")
///     .extending(&item)
///     .finish();
///
/// assert!(comment.satisfies("agora.resources.item.IItem"));
/// assert!(comment.declares_sheet("agora.sheets.name.IName"));
/// ```
#[derive(Debug, Clone)]
pub struct ResourceTypeDescriptor {
    content_type: ContentTypeId,
    super_types: IndexSet<ContentTypeId>,
    sheet_names: IndexSet<SheetId>,
    element_types: Vec<ContentTypeId>,
    create_permission: Option<String>,
    autonaming_prefix: Option<String>,
}

impl ResourceTypeDescriptor {
    /// Starts declaring a resource type.
    pub fn build(content_type: impl Into<ContentTypeId>) -> ResourceTypeDescriptorBuilder {
        ResourceTypeDescriptorBuilder {
            content_type: content_type.into(),
            super_types: IndexSet::new(),
            sheet_names: IndexSet::new(),
            element_types: Vec::new(),
            create_permission: None,
            autonaming_prefix: None,
        }
    }

    /// This type's own identifier.
    pub fn content_type(&self) -> &ContentTypeId {
        &self.content_type
    }

    /// All ancestor types this type satisfies (flattened, excluding itself).
    pub fn super_types(&self) -> &IndexSet<ContentTypeId> {
        &self.super_types
    }

    /// Every sheet this type carries, in declaration order.
    pub fn sheet_names(&self) -> &IndexSet<SheetId> {
        &self.sheet_names
    }

    /// Content types addable inside this type (pool-like containers).
    pub fn element_types(&self) -> &[ContentTypeId] {
        &self.element_types
    }

    /// Permission required to create an instance of this type.
    pub fn create_permission(&self) -> Option<&str> {
        self.create_permission.as_deref()
    }

    /// Prefix for server-side automatic naming of new children.
    ///
    /// `None` means instances are named by the client.
    pub fn autonaming_prefix(&self) -> Option<&str> {
        self.autonaming_prefix.as_deref()
    }

    /// Whether an instance of this type is usable as `type_id`.
    ///
    /// True iff `type_id` is this type itself or one of its declared
    /// ancestors. An identifier known to neither is `false`, never an error.
    pub fn satisfies(&self, type_id: &str) -> bool {
        self.content_type == *type_id || self.super_types.contains(type_id)
    }

    /// Whether this type declares the sheet, populated or not.
    pub fn declares_sheet(&self, sheet: &str) -> bool {
        self.sheet_names.contains(sheet)
    }
}

/// Builder for [`ResourceTypeDescriptor`].
#[derive(Debug)]
pub struct ResourceTypeDescriptorBuilder {
    content_type: ContentTypeId,
    super_types: IndexSet<ContentTypeId>,
    sheet_names: IndexSet<SheetId>,
    element_types: Vec<ContentTypeId>,
    create_permission: Option<String>,
    autonaming_prefix: Option<String>,
}

impl ResourceTypeDescriptorBuilder {
    /// Derives this type from a base type.
    ///
    /// Copies the base's sheets and records the base itself plus all of its
    /// ancestors as ancestors of this type. This is the flattening step:
    /// chains of `extending` calls collapse into one flat ancestor set.
    ///
    /// Per-type declarations (element types, permission, autonaming) are not
    /// inherited.
    pub fn extending(mut self, base: &ResourceTypeDescriptor) -> Self {
        self.super_types.insert(base.content_type.clone());
        for ancestor in &base.super_types {
            self.super_types.insert(ancestor.clone());
        }
        for sheet in &base.sheet_names {
            self.sheet_names.insert(sheet.clone());
        }
        self
    }

    /// Declares an ancestor type directly.
    pub fn super_type(mut self, type_id: impl Into<ContentTypeId>) -> Self {
        self.super_types.insert(type_id.into());
        self
    }

    /// Declares a sheet carried by this type.
    pub fn sheet(mut self, sheet: impl Into<SheetId>) -> Self {
        self.sheet_names.insert(sheet.into());
        self
    }

    /// Declares a content type addable inside this type.
    pub fn element_type(mut self, type_id: impl Into<ContentTypeId>) -> Self {
        self.element_types.push(type_id.into());
        self
    }

    /// Sets the permission required to create instances.
    pub fn create_permission(mut self, permission: impl Into<String>) -> Self {
        self.create_permission = Some(permission.into());
        self
    }

    /// Enables server-side naming of new children with the given prefix.
    pub fn autonaming(mut self, prefix: impl Into<String>) -> Self {
        self.autonaming_prefix = Some(prefix.into());
        self
    }

    /// Finishes the declaration.
    pub fn finish(self) -> ResourceTypeDescriptor {
        ResourceTypeDescriptor {
            content_type: self.content_type,
            super_types: self.super_types,
            sheet_names: self.sheet_names,
            element_types: self.element_types,
            create_permission: self.create_permission,
            autonaming_prefix: self.autonaming_prefix,
        }
    }
}
