// ABOUTME: DataLayer and WorkspaceContext
// ABOUTME: Every mutation is read whole document, modify, write whole document, notify

use std::path::PathBuf;

use tracing::{debug, info, warn};

use taskflow_core::{generate_entity_id, AppDocument, Company, CompanyData};
use taskflow_store::{DocumentEvent, DocumentStore, EventBus};

use crate::error::{DataError, DataResult};

/// Entry point to the persisted application state.
///
/// Owns the document store and the change-notification bus. All entity
/// operations go through a [`WorkspaceContext`] so the workspace an operation
/// targets is always explicit.
pub struct DataLayer {
    store: DocumentStore,
    events: EventBus,
}

impl DataLayer {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            events: EventBus::new(),
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(DocumentStore::new(path))
    }

    /// Layer over the default document location (~/.taskflow/document.json)
    pub fn at_default_path() -> Self {
        Self::new(DocumentStore::at_default_path())
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub(crate) async fn read(&self) -> DataResult<AppDocument> {
        Ok(self.store.load().await?)
    }

    pub(crate) async fn commit(
        &self,
        doc: &AppDocument,
        event: DocumentEvent,
    ) -> DataResult<()> {
        self.store.save(doc).await?;
        self.events.emit(event);
        Ok(())
    }

    /// All workspaces, in creation order
    pub async fn list_companies(&self) -> DataResult<Vec<Company>> {
        Ok(self.read().await?.companies)
    }

    pub async fn active_company_id(&self) -> DataResult<String> {
        Ok(self.read().await?.active_company_id)
    }

    /// Switch the active workspace. An id not present in `companies` is
    /// silently ignored.
    pub async fn set_active_company(&self, id: &str) -> DataResult<()> {
        let mut doc = self.read().await?;
        if !doc.companies.iter().any(|c| c.id == id) {
            warn!("Ignoring switch to unknown workspace {}", id);
            return Ok(());
        }
        if doc.active_company_id == id {
            return Ok(());
        }
        doc.active_company_id = id.to_string();
        self.commit(&doc, DocumentEvent::ActiveCompanyChanged).await
    }

    /// Create a workspace with empty collections and the built-in field set,
    /// and switch the active workspace to it.
    pub async fn add_company(&self, name: &str) -> DataResult<Company> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DataError::Validation(
                "Workspace name is required".to_string(),
            ));
        }

        let mut doc = self.read().await?;
        let company = Company {
            id: generate_entity_id("company"),
            name: name.to_string(),
        };
        let mut data = CompanyData::empty();
        data.fields = taskflow_schema::default_fields();

        doc.company_data.insert(company.id.clone(), data);
        doc.companies.push(company.clone());
        doc.active_company_id = company.id.clone();

        self.commit(&doc, DocumentEvent::ActiveCompanyChanged)
            .await?;
        info!("Created workspace '{}' with ID {}", company.name, company.id);
        Ok(company)
    }

    /// Delete a workspace and its data. Deleting the last remaining workspace
    /// is refused; if the deleted workspace was active, the first remaining
    /// one becomes active.
    pub async fn delete_company(&self, id: &str) -> DataResult<bool> {
        let mut doc = self.read().await?;
        if doc.companies.len() <= 1 {
            warn!("Refusing to delete the last remaining workspace");
            return Ok(false);
        }
        let Some(index) = doc.companies.iter().position(|c| c.id == id) else {
            debug!("Workspace {} not found, nothing to delete", id);
            return Ok(false);
        };

        let removed = doc.companies.remove(index);
        doc.company_data.remove(&removed.id);

        let was_active = doc.active_company_id == removed.id;
        if was_active {
            // First-remaining policy, not most-recently-used
            doc.active_company_id = doc.companies[0].id.clone();
        }

        let event = if was_active {
            DocumentEvent::ActiveCompanyChanged
        } else {
            DocumentEvent::DocumentChanged
        };
        self.commit(&doc, event).await?;
        info!("Deleted workspace '{}' (ID: {})", removed.name, removed.id);
        Ok(true)
    }

    /// A context scoping all entity operations to one workspace
    pub fn workspace(&self, company_id: impl Into<String>) -> WorkspaceContext<'_> {
        WorkspaceContext {
            layer: self,
            company_id: company_id.into(),
        }
    }

    /// Context for the currently active workspace
    pub async fn active_workspace(&self) -> DataResult<WorkspaceContext<'_>> {
        let id = self.active_company_id().await?;
        Ok(self.workspace(id))
    }
}

/// Explicit workspace handle: every call re-reads the document, mutates a
/// clone scoped to this workspace, and writes the whole document back.
pub struct WorkspaceContext<'a> {
    pub(crate) layer: &'a DataLayer,
    company_id: String,
}

impl WorkspaceContext<'_> {
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub(crate) async fn read(&self) -> DataResult<AppDocument> {
        self.layer.read().await
    }

    pub(crate) fn data<'d>(&self, doc: &'d mut AppDocument) -> DataResult<&'d mut CompanyData> {
        doc.company_data
            .get_mut(&self.company_id)
            .ok_or_else(|| DataError::UnknownCompany(self.company_id.clone()))
    }

    pub(crate) fn data_ref<'d>(&self, doc: &'d AppDocument) -> Option<&'d CompanyData> {
        doc.company_data.get(&self.company_id)
    }

    pub(crate) async fn commit(&self, doc: &AppDocument) -> DataResult<()> {
        self.layer.commit(doc, DocumentEvent::DocumentChanged).await
    }
}
