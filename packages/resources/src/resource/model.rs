//! Resource instances and the queries the rest of the platform asks of them.
//!
//! A [`Resource`] is one fetched (or locally drafted) piece of content: a
//! content type plus a map from sheet identifier to sheet data. Consumers
//! rarely know the concrete type statically; they interrogate the instance
//! instead:
//!
//! - [`Resource::is_instance_of`] - usable as a given type?
//! - [`Resource::has_sheet`] / [`Resource::has_sheet_data`] - does the type
//!   declare a sheet, and is it actually populated here?
//! - [`Resource::references`] - which fields point at other resources?
//!
//! Instances are immutable snapshots between fetch and replacement: when the
//! server state changes, the owning collaborator builds a new instance and
//! swaps it in. Nothing here mutates an instance behind a shared reference,
//! which is the only concurrency guarantee this model gives or needs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use std::sync::Arc;

use crate::error::{ResourceError, ResourceResult};
use crate::ids::{ContentTypeId, ResourcePath, SheetId};
use crate::resource::sheet_data::{collect_references, SheetInstance};
use crate::schema::descriptor::ResourceTypeDescriptor;
use crate::schema::registry::SchemaRegistry;

/// The wire shape of one resource, exactly as the REST API sends it.
///
/// Field names are part of the wire contract (`content_type`,
/// `first_version_path`, `root_versions`), not naming style. Identity fields
/// are absent on instances the server has not persisted yet. `data` keeps
/// payload order so assembling a [`Resource`] from it is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResource {
    /// Concrete type of this resource.
    pub content_type: ContentTypeId,

    /// Server-assigned path, absent on drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<ResourcePath>,

    /// Path of the containing resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ResourcePath>,

    /// Path of the first version, on versionable items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_version_path: Option<ResourcePath>,

    /// Version roots this instance belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub root_versions: Vec<ResourcePath>,

    /// Raw sheet objects keyed by sheet identifier.
    #[serde(default)]
    pub data: IndexMap<SheetId, Value>,
}

/// One resource instance: identity, sheet data, and its type's descriptor.
///
/// Owned exclusively by the collaborator that fetched or drafted it; sheet
/// instances are owned by the resource that aggregates them.
#[derive(Debug, Clone)]
pub struct Resource {
    content_type: ContentTypeId,
    descriptor: Arc<ResourceTypeDescriptor>,
    path: Option<ResourcePath>,
    parent: Option<ResourcePath>,
    first_version_path: Option<ResourcePath>,
    root_versions: Vec<ResourcePath>,
    data: IndexMap<SheetId, SheetInstance>,
}

impl Resource {
    /// Drafts a resource locally, before the server has seen it.
    ///
    /// The draft has no path and no sheet data; attach sheets with
    /// [`Resource::attach`].
    ///
    /// # Errors
    ///
    /// [`ResourceError::UnknownContentType`] if the registry has no
    /// descriptor for `content_type`.
    pub fn new(
        content_type: impl Into<ContentTypeId>,
        registry: &SchemaRegistry,
    ) -> ResourceResult<Self> {
        let content_type = content_type.into();
        let descriptor = registry
            .descriptor(content_type.as_str())
            .cloned()
            .ok_or_else(|| ResourceError::UnknownContentType {
                content_type: content_type.clone(),
            })?;
        Ok(Self {
            content_type,
            descriptor,
            path: None,
            parent: None,
            first_version_path: None,
            root_versions: Vec::new(),
            data: IndexMap::new(),
        })
    }

    /// Assembles a resource from a decoded wire payload.
    ///
    /// Sheets are attached in payload order. Every key in `raw.data` must be
    /// a sheet the content type declares; the server never sends anything
    /// else, so an undeclared key means the client schema and the payload
    /// disagree and the instance must not be half-built.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::UnknownContentType`] if the registry has no
    ///   descriptor for the payload's type.
    /// - [`ResourceError::UndeclaredSheet`] for a `data` key the type does
    ///   not declare.
    pub fn from_raw(raw: RawResource, registry: &SchemaRegistry) -> ResourceResult<Self> {
        let mut resource = Self::new(raw.content_type, registry)?;
        resource.path = raw.path;
        resource.parent = raw.parent;
        resource.first_version_path = raw.first_version_path;
        resource.root_versions = raw.root_versions;

        for (sheet_id, value) in raw.data {
            // Registration guarantees metadata exists for declared sheets.
            let metadata = resource
                .descriptor
                .declares_sheet(sheet_id.as_str())
                .then(|| registry.sheet(sheet_id.as_str()))
                .flatten()
                .ok_or_else(|| ResourceError::UndeclaredSheet {
                    content_type: resource.content_type.clone(),
                    sheet: sheet_id.clone(),
                })?;
            resource
                .data
                .insert(sheet_id, SheetInstance::new(Arc::clone(metadata), value));
        }

        trace!(
            content_type = %resource.content_type,
            sheets = resource.data.len(),
            "assembled resource"
        );
        Ok(resource)
    }

    /// Assembles a resource from an undecoded JSON payload.
    ///
    /// # Errors
    ///
    /// [`ResourceError::MalformedPayload`] naming the offending field for
    /// payloads that do not match the wire shape (missing `content_type`,
    /// non-object `data`), plus everything [`Resource::from_raw`] raises.
    pub fn from_value(value: Value, registry: &SchemaRegistry) -> ResourceResult<Self> {
        let raw: RawResource = serde_json::from_value(value)?;
        Self::from_raw(raw, registry)
    }

    /// Projects the instance back onto the wire shape.
    ///
    /// Identity fields and sheet data come back exactly as they went in; no
    /// normalization happens in either direction.
    pub fn to_raw(&self) -> RawResource {
        RawResource {
            content_type: self.content_type.clone(),
            path: self.path.clone(),
            parent: self.parent.clone(),
            first_version_path: self.first_version_path.clone(),
            root_versions: self.root_versions.clone(),
            data: self
                .data
                .iter()
                .map(|(id, sheet)| (id.clone(), sheet.value().clone()))
                .collect(),
        }
    }

    /// Concrete type of this resource.
    pub fn content_type(&self) -> &ContentTypeId {
        &self.content_type
    }

    /// The shared descriptor of this resource's type.
    pub fn descriptor(&self) -> &Arc<ResourceTypeDescriptor> {
        &self.descriptor
    }

    /// Server-assigned path, if persisted.
    pub fn path(&self) -> Option<&ResourcePath> {
        self.path.as_ref()
    }

    /// Path of the containing resource.
    pub fn parent(&self) -> Option<&ResourcePath> {
        self.parent.as_ref()
    }

    /// Path of the first version, on versionable items.
    pub fn first_version_path(&self) -> Option<&ResourcePath> {
        self.first_version_path.as_ref()
    }

    /// Version roots this instance belongs to.
    pub fn root_versions(&self) -> &[ResourcePath] {
        &self.root_versions
    }

    /// Whether the server has assigned this instance a path.
    pub fn is_persisted(&self) -> bool {
        self.path.is_some()
    }

    /// Whether this instance is usable as `type_id`.
    ///
    /// True for the instance's own content type and every declared ancestor;
    /// any other identifier (including ones no schema has ever named) is
    /// `false`, never an error. No hierarchy is walked: the ancestor set was
    /// flattened when the type was declared.
    pub fn is_instance_of(&self, type_id: &str) -> bool {
        self.descriptor.satisfies(type_id)
    }

    /// Whether this resource's type declares the sheet.
    ///
    /// Purely a statement about the type: a declared sheet may not be
    /// populated yet while an instance is being assembled. Callers that need
    /// "declared and populated" combine this with
    /// [`Resource::has_sheet_data`].
    pub fn has_sheet(&self, sheet: &str) -> bool {
        self.descriptor.declares_sheet(sheet)
    }

    /// Whether sheet data is actually attached under this identifier.
    pub fn has_sheet_data(&self, sheet: &str) -> bool {
        self.data.contains_key(sheet)
    }

    /// The attached sheet instance, if populated.
    pub fn sheet(&self, sheet: &str) -> Option<&SheetInstance> {
        self.data.get(sheet)
    }

    /// All attached sheet instances, in attachment order.
    pub fn sheets(&self) -> impl Iterator<Item = &SheetInstance> {
        self.data.values()
    }

    /// Attaches (or replaces) sheet data.
    ///
    /// Replacing keeps the sheet's original position in the attachment
    /// order. Only the owning collaborator calls this, e.g. while drafting a
    /// resource or folding in an edit before resubmission.
    ///
    /// # Errors
    ///
    /// [`ResourceError::UndeclaredSheet`] if the type does not declare the
    /// instance's sheet.
    pub fn attach(&mut self, instance: SheetInstance) -> ResourceResult<()> {
        if !self.descriptor.declares_sheet(instance.id().as_str()) {
            return Err(ResourceError::UndeclaredSheet {
                content_type: self.content_type.clone(),
                sheet: instance.id().clone(),
            });
        }
        self.data.insert(instance.id().clone(), instance);
        Ok(())
    }

    /// Field names of every attached sheet that hold resource references.
    ///
    /// The concatenation of each attached sheet's declared reference fields,
    /// in attachment order. Duplicates are kept: two sheets declaring the
    /// same field name contribute one entry each. A resource with no sheet
    /// data yields an empty vec.
    ///
    /// These are names, not values; resolving a name against the sheet's raw
    /// data (a scalar path, an array of paths, a nested structure) is the
    /// caller's job.
    pub fn references(&self) -> Vec<&str> {
        collect_references(self.data.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::sheet::{SheetField, SheetMetadata};
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register_sheet(
                SheetMetadata::new(
                    "ICommentVersion",
                    vec![
                        SheetField::new("refers_to").create_mandatory().reference(),
                        SheetField::new("content").editable().create_mandatory(),
                    ],
                )
                .unwrap(),
            )
            .unwrap();
        registry
            .register_sheet(
                SheetMetadata::new(
                    "IVersionable",
                    vec![SheetField::new("follows").creatable().reference()],
                )
                .unwrap(),
            )
            .unwrap();
        registry
            .register_resource_type(
                ResourceTypeDescriptor::build("Comment")
                    .super_type("IVersionable")
                    .sheet("ICommentVersion")
                    .sheet("IVersionable")
                    .finish(),
            )
            .unwrap();
        registry
    }

    fn attach(resource: &mut Resource, registry: &SchemaRegistry, sheet: &str, value: Value) {
        let metadata = registry.sheet(sheet).unwrap().clone();
        resource
            .attach(SheetInstance::new(metadata, value))
            .unwrap();
    }

    #[test]
    fn test_draft_has_no_path_and_no_data() {
        let registry = registry();
        let draft = Resource::new("Comment", &registry).unwrap();
        assert!(!draft.is_persisted());
        assert!(draft.path().is_none());
        assert_eq!(draft.sheets().count(), 0);
        assert!(draft.references().is_empty());
    }

    #[test]
    fn test_unknown_content_type_rejected() {
        let registry = registry();
        let err = Resource::new("Proposal", &registry).unwrap_err();
        assert!(matches!(err, ResourceError::UnknownContentType { .. }));
    }

    #[test]
    fn test_classification_against_declared_hierarchy() {
        let registry = registry();
        let resource = Resource::new("Comment", &registry).unwrap();

        assert!(resource.is_instance_of("Comment"));
        assert!(resource.is_instance_of("IVersionable"));
        assert!(!resource.is_instance_of("Proposal"));
    }

    #[test]
    fn test_declared_and_populated_are_separate_questions() {
        let registry = registry();
        let mut resource = Resource::new("Comment", &registry).unwrap();

        assert!(resource.has_sheet("ICommentVersion"));
        assert!(!resource.has_sheet_data("ICommentVersion"));

        attach(&mut resource, &registry, "ICommentVersion", json!({}));
        assert!(resource.has_sheet_data("ICommentVersion"));

        // Unknown identifiers are false on both tiers.
        assert!(!resource.has_sheet("INope"));
        assert!(!resource.has_sheet_data("INope"));
    }

    #[test]
    fn test_references_concatenate_in_attachment_order() {
        let registry = registry();
        let mut resource = Resource::new("Comment", &registry).unwrap();
        attach(
            &mut resource,
            &registry,
            "ICommentVersion",
            json!({ "refers_to": "/proposal", "content": "+1" }),
        );
        attach(
            &mut resource,
            &registry,
            "IVersionable",
            json!({ "follows": [] }),
        );

        assert_eq!(resource.references(), ["refers_to", "follows"]);
    }

    #[test]
    fn test_attach_undeclared_sheet_rejected() {
        let registry = registry();
        let mut resource = Resource::new("Comment", &registry).unwrap();
        let foreign = Arc::new(SheetMetadata::new("IForeign", vec![]).unwrap());
        let err = resource
            .attach(SheetInstance::new(foreign, json!({})))
            .unwrap_err();
        assert!(matches!(err, ResourceError::UndeclaredSheet { .. }));
    }

    #[test]
    fn test_reattach_replaces_in_place() {
        let registry = registry();
        let mut resource = Resource::new("Comment", &registry).unwrap();
        attach(&mut resource, &registry, "ICommentVersion", json!({}));
        attach(&mut resource, &registry, "IVersionable", json!({}));
        attach(
            &mut resource,
            &registry,
            "ICommentVersion",
            json!({ "content": "edited" }),
        );

        let order: Vec<&str> = resource.sheets().map(|s| s.id().as_str()).collect();
        assert_eq!(order, ["ICommentVersion", "IVersionable"]);
        assert_eq!(
            resource.sheet("ICommentVersion").unwrap().field("content"),
            Some(&json!("edited"))
        );
    }

    #[test]
    fn test_from_raw_attaches_in_payload_order() {
        let registry = registry();
        let raw: RawResource = serde_json::from_value(json!({
            "content_type": "Comment",
            "path": "/proposal/comments/comment_0000001",
            "data": {
                "IVersionable": { "follows": ["/c/v1"] },
                "ICommentVersion": { "refers_to": "/proposal", "content": "+1" }
            }
        }))
        .unwrap();
        let resource = Resource::from_raw(raw, &registry).unwrap();

        assert_eq!(resource.references(), ["follows", "refers_to"]);
        assert!(resource.is_persisted());
    }

    #[test]
    fn test_from_raw_rejects_undeclared_data_key() {
        let registry = registry();
        let raw: RawResource = serde_json::from_value(json!({
            "content_type": "Comment",
            "data": { "IForeign": {} }
        }))
        .unwrap();
        let err = Resource::from_raw(raw, &registry).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::UndeclaredSheet { ref sheet, .. } if *sheet == "IForeign"
        ));
    }

    #[test]
    fn test_from_value_names_missing_content_type() {
        let registry = registry();
        let err = Resource::from_value(json!({ "data": {} }), &registry).unwrap_err();
        match err {
            ResourceError::MalformedPayload(inner) => {
                assert!(inner.to_string().contains("content_type"));
            }
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_from_value_rejects_non_object_data() {
        let registry = registry();
        let err = Resource::from_value(
            json!({ "content_type": "Comment", "data": "not an object" }),
            &registry,
        )
        .unwrap_err();
        assert!(matches!(err, ResourceError::MalformedPayload(_)));
    }

    #[test]
    fn test_wire_round_trip_preserves_identity_fields() {
        let registry = registry();
        let payload = json!({
            "content_type": "Comment",
            "path": "/p/c/comment_0000001",
            "parent": "/p/c",
            "first_version_path": "/p/c/comment_0000001/v1",
            "root_versions": ["/p/v2", "/p/v1"],
            "data": {
                "ICommentVersion": { "refers_to": "/p", "content": "+1" }
            }
        });
        let resource = Resource::from_value(payload.clone(), &registry).unwrap();

        assert_eq!(resource.content_type(), "Comment");
        assert_eq!(resource.path().unwrap(), "/p/c/comment_0000001");
        assert_eq!(resource.root_versions(), ["/p/v2", "/p/v1"]);

        let back = serde_json::to_value(resource.to_raw()).unwrap();
        assert_eq!(back, payload);
    }
}
