//! Sheet metadata - the per-sheet field access contract.
//!
//! A sheet is a named schema fragment: a set of fields with declared access
//! flags, shared by every resource type that carries the sheet. Metadata is
//! declared once per sheet type and is read-only afterwards; instances hold
//! it behind an `Arc` (see [`crate::resource::sheet_data::SheetInstance`]).

use crate::error::{SchemaError, SchemaResult};
use crate::ids::SheetId;

/// One field declaration inside a sheet.
///
/// Flags default to read-only: `readable` starts true, everything else false.
///
/// # Example
///
/// ```rust
/// use resources::schema::sheet::SheetField;
///
/// // A comment body: shown, editable, required when creating.
/// let content = SheetField::new("content").editable().create_mandatory();
///
/// // A link to another resource, set at creation and fixed afterwards.
/// let refers_to = SheetField::new("refers_to").reference().create_mandatory();
/// ```
#[derive(Debug, Clone)]
pub struct SheetField {
    /// Field name within the sheet.
    pub name: String,
    /// Included in read responses.
    pub readable: bool,
    /// Accepted in edit requests.
    pub editable: bool,
    /// Accepted in create requests.
    pub creatable: bool,
    /// Required in create requests. Implies `creatable`.
    pub create_mandatory: bool,
    /// The value identifies another resource rather than holding data.
    pub reference: bool,
}

impl SheetField {
    /// Creates a read-only field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            readable: true,
            editable: false,
            creatable: false,
            create_mandatory: false,
            reference: false,
        }
    }

    /// Marks the field as accepted in edit requests.
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Marks the field as accepted in create requests.
    pub fn creatable(mut self) -> Self {
        self.creatable = true;
        self
    }

    /// Marks the field as required on create (and therefore creatable).
    pub fn create_mandatory(mut self) -> Self {
        self.creatable = true;
        self.create_mandatory = true;
        self
    }

    /// Marks the field value as a reference to another resource.
    pub fn reference(mut self) -> Self {
        self.reference = true;
        self
    }

    /// Excludes the field from read responses (e.g. credentials).
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// The declared access contract of one sheet type.
///
/// Holds the field names grouped by flag, in field-declaration order. Shared
/// by all instances of the sheet; never mutated after construction.
#[derive(Debug, Clone)]
pub struct SheetMetadata {
    id: SheetId,
    field_names: Vec<String>,
    readable: Vec<String>,
    editable: Vec<String>,
    creatable: Vec<String>,
    create_mandatory: Vec<String>,
    references: Vec<String>,
}

impl SheetMetadata {
    /// Declares a sheet from its field list.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::DuplicateField`] if two fields share a name.
    /// - [`SchemaError::MandatoryNotCreatable`] if a field is flagged
    ///   `create_mandatory` without `creatable` (possible when field flags
    ///   come from a deserialized schema document).
    pub fn new(id: impl Into<SheetId>, fields: Vec<SheetField>) -> SchemaResult<Self> {
        let id = id.into();
        let mut meta = Self {
            id,
            field_names: Vec::with_capacity(fields.len()),
            readable: Vec::new(),
            editable: Vec::new(),
            creatable: Vec::new(),
            create_mandatory: Vec::new(),
            references: Vec::new(),
        };

        for field in fields {
            if meta.declares_field(&field.name) {
                return Err(SchemaError::DuplicateField {
                    sheet: meta.id.clone(),
                    field: field.name,
                });
            }
            if field.create_mandatory && !field.creatable {
                return Err(SchemaError::MandatoryNotCreatable {
                    sheet: meta.id.clone(),
                    field: field.name,
                });
            }

            if field.readable {
                meta.readable.push(field.name.clone());
            }
            if field.editable {
                meta.editable.push(field.name.clone());
            }
            if field.creatable {
                meta.creatable.push(field.name.clone());
            }
            if field.create_mandatory {
                meta.create_mandatory.push(field.name.clone());
            }
            if field.reference {
                meta.references.push(field.name.clone());
            }
            meta.field_names.push(field.name);
        }

        Ok(meta)
    }

    /// The sheet identifier.
    pub fn id(&self) -> &SheetId {
        &self.id
    }

    /// All declared field names, in declaration order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Whether the sheet declares a field with this name.
    pub fn declares_field(&self, name: &str) -> bool {
        self.field_names.iter().any(|f| f == name)
    }

    /// Field names included in read responses.
    pub fn readable(&self) -> &[String] {
        &self.readable
    }

    /// Field names accepted in edit requests.
    pub fn editable(&self) -> &[String] {
        &self.editable
    }

    /// Field names accepted in create requests.
    pub fn creatable(&self) -> &[String] {
        &self.creatable
    }

    /// Field names required in create requests.
    pub fn create_mandatory(&self) -> &[String] {
        &self.create_mandatory
    }

    /// Field names whose values reference other resources.
    pub fn references(&self) -> &[String] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment_sheet() -> SheetMetadata {
        SheetMetadata::new(
            "agora.sheets.comment.IComment",
            vec![
                SheetField::new("refers_to").reference().create_mandatory(),
                SheetField::new("content").editable().create_mandatory(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_flag_sets_follow_declaration_order() {
        let meta = comment_sheet();
        assert_eq!(meta.field_names(), ["refers_to", "content"]);
        assert_eq!(meta.readable(), ["refers_to", "content"]);
        assert_eq!(meta.editable(), ["content"]);
        assert_eq!(meta.creatable(), ["refers_to", "content"]);
        assert_eq!(meta.create_mandatory(), ["refers_to", "content"]);
        assert_eq!(meta.references(), ["refers_to"]);
    }

    #[test]
    fn test_create_mandatory_implies_creatable() {
        let field = SheetField::new("name").create_mandatory();
        assert!(field.creatable);
        assert!(field.create_mandatory);
    }

    #[test]
    fn test_write_only_field_is_not_readable() {
        let meta = SheetMetadata::new(
            "agora.sheets.password.IPasswordAuthentication",
            vec![SheetField::new("password").write_only().create_mandatory()],
        )
        .unwrap();
        assert!(meta.readable().is_empty());
        assert_eq!(meta.creatable(), ["password"]);
        assert!(meta.declares_field("password"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = SheetMetadata::new(
            "s",
            vec![SheetField::new("x"), SheetField::new("x").editable()],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { ref field, .. } if field == "x"));
    }

    #[test]
    fn test_mandatory_without_creatable_rejected() {
        // Only reachable through hand-built flags, e.g. a parsed document.
        let mut field = SheetField::new("x");
        field.create_mandatory = true;
        let err = SheetMetadata::new("s", vec![field]).unwrap_err();
        assert!(matches!(err, SchemaError::MandatoryNotCreatable { .. }));
    }

    #[test]
    fn test_empty_sheet_is_valid() {
        let meta = SheetMetadata::new("agora.sheets.marker.IMarker", vec![]).unwrap();
        assert!(meta.field_names().is_empty());
        assert!(meta.references().is_empty());
    }
}
