// ABOUTME: Whole-document JSON persistence
// ABOUTME: First load synthesizes a default document; corrupt documents fall back to it

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, error, warn};

use taskflow_core::{
    document_file, generate_entity_id, AppDocument, Company, CompanyData, DEFAULT_COMPANY_NAME,
    DOCUMENT_VERSION,
};

use crate::StorageResult;

/// Build the document used when nothing is stored yet: one workspace with
/// empty collections and the built-in field set.
pub fn default_document() -> AppDocument {
    let company = Company {
        id: generate_entity_id("company"),
        name: DEFAULT_COMPANY_NAME.to_string(),
    };
    let mut data = CompanyData::empty();
    data.fields = taskflow_schema::default_fields();

    let mut doc = AppDocument {
        active_company_id: company.id.clone(),
        ..Default::default()
    };
    doc.company_data.insert(company.id.clone(), data);
    doc.companies.push(company);
    doc
}

/// Store for the single application-state document.
///
/// All operations are whole-document: callers read the full document, mutate
/// a clone, and write the full document back. There is no field-level patching
/// and no atomicity across concurrent writers.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (~/.taskflow/document.json)
    pub fn at_default_path() -> Self {
        Self::new(document_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the parent directory and document file exist
    pub async fn ensure_document(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                debug!("Creating TaskFlow directory: {:?}", parent);
                fs::create_dir_all(parent).await?;
            }
        }

        if !self.path.exists() {
            debug!("Creating document file: {:?}", self.path);
            self.save(&default_document()).await?;
        }

        Ok(())
    }

    /// Reads the document from disk.
    ///
    /// A missing file is synthesized and persisted immediately; an
    /// unparseable file is replaced by the default document (destructive
    /// recovery, logged). Structural invariants are repaired and any repair
    /// is persisted back (read-repair).
    pub async fn load(&self) -> StorageResult<AppDocument> {
        self.ensure_document().await?;

        debug!("Reading document from: {:?}", self.path);
        let mut doc = match fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<AppDocument>(&content) {
                Ok(doc) => doc,
                Err(e) => {
                    error!("Failed to parse document: {}", e);
                    warn!("Replacing corrupt document with defaults");
                    let doc = default_document();
                    self.save(&doc).await?;
                    return Ok(doc);
                }
            },
            Err(e) => {
                error!("Failed to read document: {}", e);
                warn!("Using default document");
                let doc = default_document();
                self.save(&doc).await?;
                return Ok(doc);
            }
        };

        let mut repaired = doc.normalize();
        if doc.companies.is_empty() {
            warn!("Document has no workspaces, resetting to defaults");
            doc = default_document();
            repaired = true;
        }
        // Seed the built-in schema into workspaces that lost theirs
        for data in doc.company_data.values_mut() {
            if data.fields.is_empty() {
                data.fields = taskflow_schema::default_fields();
                repaired = true;
            }
        }
        if doc.version != DOCUMENT_VERSION {
            debug!(
                "Re-stamping document version {} -> {}",
                doc.version, DOCUMENT_VERSION
            );
            doc.version = DOCUMENT_VERSION.to_string();
            repaired = true;
        }
        if repaired {
            warn!("Document required repair on load, persisting fixes");
            self.save(&doc).await?;
        }

        debug!(
            "Loaded document with {} workspaces (active: {})",
            doc.companies.len(),
            doc.active_company_id
        );
        Ok(doc)
    }

    /// Writes the whole document to disk
    pub async fn save(&self, doc: &AppDocument) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        debug!("Writing document to: {:?}", self.path);
        let json_content = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, json_content).await?;

        debug!(
            "Successfully wrote document with {} workspaces",
            doc.companies.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, DocumentStore) {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path().join("document.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_first_load_synthesizes_and_persists_default() {
        let (_dir, store) = temp_store();
        assert!(!store.path().exists());

        let doc = store.load().await.unwrap();
        assert!(store.path().exists());
        assert_eq!(doc.companies.len(), 1);
        assert_eq!(doc.companies[0].name, DEFAULT_COMPANY_NAME);
        assert_eq!(doc.active_company_id, doc.companies[0].id);

        let data = doc.company_data.get(&doc.active_company_id).unwrap();
        assert!(!data.fields.is_empty());
        assert!(data.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_document() {
        let (_dir, store) = temp_store();
        let mut doc = store.load().await.unwrap();
        doc.companies.push(Company {
            id: "company-2".to_string(),
            name: "Acme".to_string(),
        });
        doc.company_data
            .insert("company-2".to_string(), CompanyData::empty());

        store.save(&doc).await.unwrap();
        let loaded = store.load().await.unwrap();

        // Loading seeds the default field set into the new empty workspace;
        // everything else must survive field-for-field.
        let mut expected = doc.clone();
        expected
            .company_data
            .get_mut("company-2")
            .unwrap()
            .fields = taskflow_schema::default_fields();
        assert_eq!(loaded, expected);
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_to_default() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap())
            .await
            .unwrap();
        fs::write(store.path(), "{not json at all")
            .await
            .unwrap();

        let doc = store.load().await.unwrap();
        assert_eq!(doc.companies.len(), 1);
        assert_eq!(doc.companies[0].name, DEFAULT_COMPANY_NAME);

        // The default replacement was persisted, not just returned
        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded, doc);
    }

    #[tokio::test]
    async fn test_load_repairs_dangling_active_company() {
        let (_dir, store) = temp_store();
        let mut doc = store.load().await.unwrap();
        doc.active_company_id = "company-missing".to_string();
        store.save(&doc).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.active_company_id, loaded.companies[0].id);
    }
}
