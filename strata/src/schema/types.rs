use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key used for the document id unless overridden during declaration.
pub const DEFAULT_ID_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    String,
    Integer,
    Double,
    Date,
    Facet,
}

/// Declared shape of a field. Only the `Text` variant can carry a tokenizer,
/// so a tokenizer on a non-text field is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text { tokenizer: Option<String> },
    String,
    Integer,
    Double,
    Date,
    Facet,
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::String => FieldType::String,
            FieldKind::Integer => FieldType::Integer,
            FieldKind::Double => FieldType::Double,
            FieldKind::Date => FieldType::Date,
            FieldKind::Facet => FieldType::Facet,
        }
    }
}

/// A single declared document attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub kind: FieldKind,
    pub stored: bool,
}

impl Field {
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, FieldKind::Text { .. })
    }

    /// Explicit tokenizer, if one was declared. Always `None` for non-text
    /// fields; text fields without one fall back to the schema default.
    pub fn tokenizer(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Text { tokenizer } => tokenizer.as_deref(),
            _ => None,
        }
    }
}

/// Sealed field registry produced by [`Schema::build`] or loaded from a
/// schema file.
///
/// Declaration order is preserved: the per-type accessors and
/// [`Schema::field_tokenizers`] return fields in the order they were first
/// declared. Once built a schema is read-only and can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) default_tokenizer: String,
    pub(crate) id_field: String,
    pub(crate) entries: Vec<Field>,
    pub(crate) by_key: HashMap<String, usize>,
}

impl Schema {
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.by_key.get(key).map(|&slot| &self.entries[slot])
    }

    /// Tokenizer to use when indexing or querying `key`: the field's explicit
    /// tokenizer if set, else the schema default. `None` for unknown keys and
    /// for non-text fields.
    pub fn tokenizer_for(&self, key: &str) -> Option<&str> {
        let field = self.get(key)?;
        if !field.is_text() {
            return None;
        }
        Some(field.tokenizer().unwrap_or(&self.default_tokenizer))
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.entries
    }

    pub fn fields_of_type(&self, field_type: FieldType) -> Vec<&Field> {
        self.entries
            .iter()
            .filter(|f| f.field_type() == field_type)
            .collect()
    }

    pub fn text_fields(&self) -> Vec<&Field> {
        self.fields_of_type(FieldType::Text)
    }

    pub fn string_fields(&self) -> Vec<&Field> {
        self.fields_of_type(FieldType::String)
    }

    pub fn integer_fields(&self) -> Vec<&Field> {
        self.fields_of_type(FieldType::Integer)
    }

    pub fn double_fields(&self) -> Vec<&Field> {
        self.fields_of_type(FieldType::Double)
    }

    pub fn date_fields(&self) -> Vec<&Field> {
        self.fields_of_type(FieldType::Date)
    }

    pub fn facet_fields(&self) -> Vec<&Field> {
        self.fields_of_type(FieldType::Facet)
    }

    /// Explicit tokenizers of text fields, in declaration order. Fields
    /// falling back to the default tokenizer are skipped.
    pub fn field_tokenizers(&self) -> Vec<&str> {
        self.entries.iter().filter_map(|f| f.tokenizer()).collect()
    }

    pub fn default_tokenizer(&self) -> &str {
        &self.default_tokenizer
    }

    /// Key of the field acting as the document's unique id. Not required to
    /// name a declared field.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }
}
