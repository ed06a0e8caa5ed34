//! Mapping from a sealed [`Schema`] onto tantivy's engine-level field
//! definitions.
//!
//! Pure configuration: opening, writing, and querying the index stay with
//! the engine. Callers register the tokenizers named by
//! [`required_tokenizers`] on the index before the first write.

use tantivy::schema::{
    DateOptions, FacetOptions, IndexRecordOption, NumericOptions, Schema as IndexSchema,
    TextFieldIndexing, STORED, STRING,
};

use crate::schema::{FieldKind, Schema};

/// Build the tantivy schema for an index over `schema`.
///
/// Text fields index with positions under their resolved tokenizer name
/// (explicit, else the schema default). String fields are indexed raw for
/// exact matching. Numeric and date fields are indexed and fast so they can
/// back range queries and sorting. Facet fields are always stored. The id
/// field is added as a stored raw string unless a field was declared under
/// that key, in which case the declaration wins.
pub fn index_schema(schema: &Schema) -> IndexSchema {
    let mut builder = IndexSchema::builder();

    for field in schema.fields() {
        let stored = field.stored;
        match &field.kind {
            FieldKind::Text { .. } => {
                let tokenizer = field.tokenizer().unwrap_or(schema.default_tokenizer());
                let indexing = TextFieldIndexing::default()
                    .set_tokenizer(tokenizer)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions);
                let mut options =
                    tantivy::schema::TextOptions::default().set_indexing_options(indexing);
                if stored {
                    options = options.set_stored();
                }
                builder.add_text_field(&field.key, options);
            }
            FieldKind::String => {
                let mut options = STRING;
                if stored {
                    options = options | STORED;
                }
                builder.add_text_field(&field.key, options);
            }
            FieldKind::Integer => {
                builder.add_i64_field(&field.key, numeric_options(stored));
            }
            FieldKind::Double => {
                builder.add_f64_field(&field.key, numeric_options(stored));
            }
            FieldKind::Date => {
                let mut options = DateOptions::default().set_indexed().set_fast();
                if stored {
                    options = options.set_stored();
                }
                builder.add_date_field(&field.key, options);
            }
            FieldKind::Facet => {
                builder.add_facet_field(&field.key, FacetOptions::default().set_stored());
            }
        }
    }

    // The id field backs upsert and delete in the engine.
    if schema.get(schema.id_field()).is_none() {
        builder.add_text_field(schema.id_field(), STRING | STORED);
    }

    builder.build()
}

fn numeric_options(stored: bool) -> NumericOptions {
    let mut options = NumericOptions::default().set_indexed().set_fast();
    if stored {
        options = options.set_stored();
    }
    options
}

/// Tokenizer names the engine must be able to resolve for this schema: the
/// default plus every explicit text-field tokenizer, first-occurrence order,
/// deduplicated.
pub fn required_tokenizers(schema: &Schema) -> Vec<&str> {
    let mut names = vec![schema.default_tokenizer()];
    for field in schema.text_fields() {
        if let Some(tokenizer) = field.tokenizer() {
            if !names.contains(&tokenizer) {
                names.push(tokenizer);
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::schema::FieldType as EngineFieldType;

    fn scenario() -> Schema {
        Schema::build("standard", |s| {
            s.text("title").stored();
            s.text("body").tokenizer("raw");
            s.integer("views").stored();
            s.string("path").stored();
            s.double("score");
            s.date("published_at");
            s.facet("category");
        })
    }

    fn text_tokenizer(index_schema: &IndexSchema, name: &str) -> String {
        let field = index_schema.get_field(name).unwrap();
        match index_schema.get_field_entry(field).field_type() {
            EngineFieldType::Str(options) => options
                .get_indexing_options()
                .expect("text field should be indexed")
                .tokenizer()
                .to_string(),
            other => panic!("expected a text field for '{}', got {:?}", name, other),
        }
    }

    #[test]
    fn test_text_fields_carry_resolved_tokenizer() {
        let index_schema = index_schema(&scenario());
        assert_eq!(text_tokenizer(&index_schema, "title"), "standard");
        assert_eq!(text_tokenizer(&index_schema, "body"), "raw");
    }

    #[test]
    fn test_stored_flags_are_respected() {
        let index_schema = index_schema(&scenario());

        let stored = |name: &str| {
            let field = index_schema.get_field(name).unwrap();
            index_schema.get_field_entry(field).is_stored()
        };
        assert!(stored("title"));
        assert!(!stored("body"));
        assert!(stored("views"));
        assert!(stored("path"));
        assert!(!stored("score"));
    }

    #[test]
    fn test_numeric_and_date_fields_are_indexed_and_fast() {
        let index_schema = index_schema(&scenario());

        let views = index_schema.get_field("views").unwrap();
        match index_schema.get_field_entry(views).field_type() {
            EngineFieldType::I64(options) => {
                assert!(options.is_indexed());
                assert!(options.is_fast());
            }
            other => panic!("expected i64 field, got {:?}", other),
        }

        let published_at = index_schema.get_field("published_at").unwrap();
        let entry = index_schema.get_field_entry(published_at);
        assert!(entry.is_indexed());
        assert!(entry.is_fast());
    }

    #[test]
    fn test_id_field_added_when_not_declared() {
        let index_schema = index_schema(&scenario());
        let id = index_schema.get_field("id").unwrap();
        let entry = index_schema.get_field_entry(id);
        assert!(entry.is_stored());
        assert_eq!(text_tokenizer(&index_schema, "id"), "raw");
    }

    #[test]
    fn test_declared_field_under_id_key_wins() {
        let schema = Schema::build("standard", |s| {
            s.text("id");
            s.text("body");
        });
        let index_schema = index_schema(&schema);

        // Exactly the two declared fields; no second "id" is injected.
        assert_eq!(index_schema.fields().count(), 2);
        assert_eq!(text_tokenizer(&index_schema, "id"), "standard");
    }

    #[test]
    fn test_custom_id_field_is_injected_under_its_key() {
        let schema = Schema::build("standard", |s| {
            s.id("slug");
            s.text("body");
        });
        let index_schema = index_schema(&schema);
        let slug = index_schema.get_field("slug").unwrap();
        assert!(index_schema.get_field_entry(slug).is_stored());
    }

    #[test]
    fn test_required_tokenizers_deduplicated_in_order() {
        let schema = Schema::build("standard", |s| {
            s.text("a");
            s.text("b").tokenizer("raw");
            s.text("c").tokenizer("standard");
            s.text("d").tokenizer("ngram3");
        });
        assert_eq!(
            required_tokenizers(&schema),
            vec!["standard", "raw", "ngram3"]
        );
    }
}
