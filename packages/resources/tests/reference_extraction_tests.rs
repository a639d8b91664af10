//! Reference extraction across attached sheets: the dependency-tracking
//! query used to resolve drafts and invalidate caches.

use std::sync::Arc;

use resources::{
    Resource, ResourceTypeDescriptor, SchemaRegistry, SheetField, SheetInstance, SheetMetadata,
};
use serde_json::json;

fn registry_with(sheets: &[(&str, &[&str])], content_type: &str) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    let mut builder = ResourceTypeDescriptor::build(content_type);
    for (sheet_id, reference_fields) in sheets {
        let fields = reference_fields
            .iter()
            .map(|name| SheetField::new(*name).creatable().reference())
            .collect();
        registry
            .register_sheet(SheetMetadata::new(*sheet_id, fields).unwrap())
            .unwrap();
        builder = builder.sheet(*sheet_id);
    }
    registry.register_resource_type(builder.finish()).unwrap();
    registry
}

fn attach(resource: &mut Resource, registry: &SchemaRegistry, sheet: &str) {
    let metadata = Arc::clone(registry.sheet(sheet).unwrap());
    resource
        .attach(SheetInstance::new(metadata, json!({})))
        .unwrap();
}

#[test]
fn no_sheet_data_yields_an_empty_list() {
    let registry = registry_with(&[("IBadge", &["badge"])], "BadgeAssignment");
    let resource = Resource::new("BadgeAssignment", &registry).unwrap();
    assert!(resource.references().is_empty());
}

#[test]
fn sheets_without_reference_fields_contribute_nothing() {
    let registry = registry_with(&[("ITitle", &[]), ("IBadge", &["badge"])], "Badge");
    let mut resource = Resource::new("Badge", &registry).unwrap();
    attach(&mut resource, &registry, "ITitle");
    attach(&mut resource, &registry, "IBadge");

    assert_eq!(resource.references(), ["badge"]);
}

#[test]
fn extraction_order_follows_attachment_order() {
    let registry = registry_with(
        &[("IBadge", &["badge", "subject"]), ("IWorkflow", &["state"])],
        "BadgeAssignment",
    );

    let mut forward = Resource::new("BadgeAssignment", &registry).unwrap();
    attach(&mut forward, &registry, "IBadge");
    attach(&mut forward, &registry, "IWorkflow");
    assert_eq!(forward.references(), ["badge", "subject", "state"]);

    let mut reversed = Resource::new("BadgeAssignment", &registry).unwrap();
    attach(&mut reversed, &registry, "IWorkflow");
    attach(&mut reversed, &registry, "IBadge");
    assert_eq!(reversed.references(), ["state", "badge", "subject"]);
}

#[test]
fn same_field_name_in_two_sheets_is_reported_twice() {
    // Two sheets may both call their link "subject"; a combining caller
    // needs both entries, so nothing is de-duplicated.
    let registry = registry_with(
        &[("IBadgeAssignment", &["subject"]), ("IRate", &["subject"])],
        "Mixed",
    );
    let mut resource = Resource::new("Mixed", &registry).unwrap();
    attach(&mut resource, &registry, "IBadgeAssignment");
    attach(&mut resource, &registry, "IRate");

    assert_eq!(resource.references(), ["subject", "subject"]);
}

#[test]
fn extraction_reports_names_not_values() {
    // Resolving a name against the raw data is the caller's job; the shape
    // of the value (scalar, array, nested) does not affect extraction.
    let registry = registry_with(&[("IVersionable", &["follows"])], "Version");
    let mut resource = Resource::new("Version", &registry).unwrap();
    let metadata = Arc::clone(registry.sheet("IVersionable").unwrap());
    resource
        .attach(SheetInstance::new(
            metadata,
            json!({ "follows": ["/item/v1", "/item/v2"] }),
        ))
        .unwrap();

    assert_eq!(resource.references(), ["follows"]);

    // A caller resolving the name sees the untouched raw value.
    let sheet = resource.sheet("IVersionable").unwrap();
    assert_eq!(
        sheet.field("follows"),
        Some(&json!(["/item/v1", "/item/v2"]))
    );
}

#[test]
fn extraction_is_stable_across_repeated_calls() {
    let registry = registry_with(
        &[("IBadge", &["badge"]), ("IWorkflow", &["state"])],
        "BadgeAssignment",
    );
    let mut resource = Resource::new("BadgeAssignment", &registry).unwrap();
    attach(&mut resource, &registry, "IBadge");
    attach(&mut resource, &registry, "IWorkflow");

    let first = resource.references();
    let second = resource.references();
    assert_eq!(first, second);
}
