use std::collections::HashMap;

use super::types::{Field, FieldKind, Schema, DEFAULT_ID_FIELD};

/// Registers fields against a fresh registry; consumed by [`Schema::build`].
///
/// Re-declaring a key replaces the earlier field in place, keeping its
/// original registry slot. That matches the declared contract, but since a
/// typo'd re-declaration silently loses a field, the replacement is logged
/// at warn level.
pub struct SchemaBuilder {
    default_tokenizer: String,
    id_field: String,
    entries: Vec<Field>,
    by_key: HashMap<String, usize>,
}

impl SchemaBuilder {
    fn new(default_tokenizer: String) -> Self {
        Self {
            default_tokenizer,
            id_field: DEFAULT_ID_FIELD.to_string(),
            entries: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Designate `key` as the document id field. The key is not required to
    /// name a declared field.
    pub fn id(&mut self, key: impl Into<String>) -> &mut Self {
        self.id_field = key.into();
        self
    }

    /// Register a text field. Tokenizer and storage are set on the returned
    /// handle; without an explicit tokenizer the schema default applies.
    pub fn text(&mut self, key: impl Into<String>) -> TextFieldDecl<'_> {
        TextFieldDecl {
            field: self.declare(key.into(), FieldKind::Text { tokenizer: None }),
        }
    }

    /// Register an untokenized string field (exact-match only).
    pub fn string(&mut self, key: impl Into<String>) -> FieldDecl<'_> {
        FieldDecl {
            field: self.declare(key.into(), FieldKind::String),
        }
    }

    pub fn integer(&mut self, key: impl Into<String>) -> FieldDecl<'_> {
        FieldDecl {
            field: self.declare(key.into(), FieldKind::Integer),
        }
    }

    pub fn double(&mut self, key: impl Into<String>) -> FieldDecl<'_> {
        FieldDecl {
            field: self.declare(key.into(), FieldKind::Double),
        }
    }

    pub fn date(&mut self, key: impl Into<String>) -> FieldDecl<'_> {
        FieldDecl {
            field: self.declare(key.into(), FieldKind::Date),
        }
    }

    pub fn facet(&mut self, key: impl Into<String>) -> FieldDecl<'_> {
        FieldDecl {
            field: self.declare(key.into(), FieldKind::Facet),
        }
    }

    fn declare(&mut self, key: String, kind: FieldKind) -> &mut Field {
        let slot = match self.by_key.get(&key) {
            Some(&slot) => {
                tracing::warn!(
                    field = %key,
                    "field re-declared, replacing the previous definition"
                );
                self.entries[slot] = Field {
                    key,
                    kind,
                    stored: false,
                };
                slot
            }
            None => {
                let slot = self.entries.len();
                self.by_key.insert(key.clone(), slot);
                self.entries.push(Field {
                    key,
                    kind,
                    stored: false,
                });
                slot
            }
        };
        &mut self.entries[slot]
    }

    fn seal(self) -> Schema {
        Schema {
            default_tokenizer: self.default_tokenizer,
            id_field: self.id_field,
            entries: self.entries,
            by_key: self.by_key,
        }
    }
}

/// Handle to a just-declared text field.
pub struct TextFieldDecl<'a> {
    field: &'a mut Field,
}

impl TextFieldDecl<'_> {
    /// Use `name` instead of the schema default tokenizer for this field.
    pub fn tokenizer(self, name: impl Into<String>) -> Self {
        if let FieldKind::Text { tokenizer } = &mut self.field.kind {
            *tokenizer = Some(name.into());
        }
        self
    }

    /// Retain the original value for retrieval in addition to indexing it.
    pub fn stored(self) -> Self {
        self.field.stored = true;
        self
    }
}

/// Handle to a just-declared non-text field.
pub struct FieldDecl<'a> {
    field: &'a mut Field,
}

impl FieldDecl<'_> {
    /// Retain the original value for retrieval in addition to indexing it.
    pub fn stored(self) -> Self {
        self.field.stored = true;
        self
    }
}

impl Schema {
    /// Run `declare` against a fresh builder and seal the result.
    ///
    /// ```
    /// use strata::Schema;
    ///
    /// let schema = Schema::build("standard", |s| {
    ///     s.text("title").stored();
    ///     s.text("body").tokenizer("raw");
    ///     s.integer("views");
    /// });
    ///
    /// assert_eq!(schema.tokenizer_for("body"), Some("raw"));
    /// ```
    pub fn build(
        default_tokenizer: impl Into<String>,
        declare: impl FnOnce(&mut SchemaBuilder),
    ) -> Schema {
        let mut builder = SchemaBuilder::new(default_tokenizer.into());
        declare(&mut builder);
        builder.seal()
    }
}
