use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schema::{FieldType, Schema};
use crate::{Error, Result};

/// On-disk declarative form of a schema, accepted as YAML or JSON.
///
/// ```yaml
/// default_tokenizer: standard
/// id_field: slug          # optional, defaults to "id"
/// fields:
///   - name: title
///     type: text
///     stored: true
///   - name: body
///     type: text
///     tokenizer: raw
///   - name: views
///     type: integer
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    pub default_tokenizer: String,
    #[serde(default)]
    pub id_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub stored: bool,
    #[serde(default)]
    pub tokenizer: Option<String>,
}

impl SchemaFile {
    /// Replay the file's declarations through the builder. A `tokenizer` on
    /// a non-text field cannot be expressed on the builder surface and is
    /// dropped here; `lint` reports it.
    pub fn into_schema(self) -> Schema {
        let SchemaFile {
            default_tokenizer,
            id_field,
            fields,
        } = self;

        Schema::build(default_tokenizer, |b| {
            if let Some(key) = id_field {
                b.id(key);
            }
            for def in fields {
                let FieldDef {
                    name,
                    field_type,
                    stored,
                    tokenizer,
                } = def;
                match field_type {
                    FieldType::Text => {
                        let mut decl = b.text(name);
                        if let Some(tokenizer) = tokenizer {
                            decl = decl.tokenizer(tokenizer);
                        }
                        if stored {
                            decl.stored();
                        }
                    }
                    other => {
                        let decl = match other {
                            FieldType::String => b.string(name),
                            FieldType::Integer => b.integer(name),
                            FieldType::Double => b.double(name),
                            FieldType::Date => b.date(name),
                            FieldType::Facet => b.facet(name),
                            FieldType::Text => unreachable!(),
                        };
                        if stored {
                            decl.stored();
                        }
                    }
                }
            }
        })
    }

    /// Human-readable issues with the declaration (empty = ok). None of
    /// these block construction; they flag declarations that will silently
    /// lose information.
    pub fn lint(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.fields.is_empty() {
            issues.push("schema declares no fields".to_string());
        }
        let mut seen = HashSet::new();
        for def in &self.fields {
            if !seen.insert(def.name.as_str()) {
                issues.push(format!(
                    "field '{}' is declared more than once; the later declaration wins",
                    def.name
                ));
            }
            if def.tokenizer.is_some() && def.field_type != FieldType::Text {
                issues.push(format!(
                    "field '{}' sets a tokenizer but is not a text field; it will be ignored",
                    def.name
                ));
            }
        }
        issues
    }
}

/// Loads declarative schema files from a directory.
pub struct SchemaLoader {
    schemas_dir: PathBuf,
}

impl SchemaLoader {
    pub fn new(schemas_dir: impl AsRef<Path>) -> Self {
        Self {
            schemas_dir: schemas_dir.as_ref().to_path_buf(),
        }
    }

    /// Load every `.yaml`/`.yml`/`.json` file in the directory, keyed by
    /// file stem.
    pub fn load_all(&self) -> Result<HashMap<String, Schema>> {
        let mut schemas = HashMap::new();

        for path in self.schema_paths()? {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let schema = self.load_schema(&path)?;
            tracing::debug!(schema = %stem, fields = schema.fields().len(), "loaded schema");
            schemas.insert(stem.to_string(), schema);
        }

        Ok(schemas)
    }

    pub fn load_schema(&self, path: &Path) -> Result<Schema> {
        Ok(self.load_file(path)?.into_schema())
    }

    pub fn load_file(&self, path: &Path) -> Result<SchemaFile> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(Error::Schema(format!(
                "Unsupported schema file extension: {}",
                path.display()
            ))),
        }
    }

    /// Lint every schema file in the directory; map file stem -> issues,
    /// schemas without issues omitted.
    pub fn lint_all(&self) -> Result<HashMap<String, Vec<String>>> {
        let mut map = HashMap::new();

        for path in self.schema_paths()? {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let issues = self.load_file(&path)?.lint();
            if !issues.is_empty() {
                map.insert(stem.to_string(), issues);
            }
        }

        Ok(map)
    }

    fn schema_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.schemas_dir.exists() {
            return Err(Error::Schema(format!(
                "Schemas directory does not exist: {}",
                self.schemas_dir.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.schemas_dir)? {
            let path = entry?.path();
            if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml" | "yml" | "json")
            ) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}
