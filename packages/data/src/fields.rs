// ABOUTME: Field-config operations bridging the schema engine to persistence
// ABOUTME: Schema violations reject before any write; cascades persist atomically

use tracing::info;

use taskflow_core::{FieldConfig, RepositoryConfig};
use taskflow_schema::{self as schema, FieldConfigInput, FieldConfigUpdate};

use crate::error::DataResult;
use crate::layer::WorkspaceContext;
use crate::logs::push_log;

impl WorkspaceContext<'_> {
    /// The workspace's field configs, ordered
    pub async fn fields(&self) -> DataResult<Vec<FieldConfig>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| data.fields.clone())
            .unwrap_or_default())
    }

    pub async fn add_field(&self, input: FieldConfigInput) -> DataResult<FieldConfig> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let field = schema::add_custom_field(&mut data.fields, input)?;
        push_log(data, format!("Added field \"{}\"", field.label), None);
        self.commit(&doc).await?;
        info!("Added custom field '{}' ({})", field.label, field.id);
        Ok(field)
    }

    pub async fn update_field(
        &self,
        id: &str,
        update: FieldConfigUpdate,
    ) -> DataResult<FieldConfig> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let field = schema::update_field(&mut data.fields, id, update)?;
        self.commit(&doc).await?;
        Ok(field)
    }

    /// Toggle a field active/inactive; protected and required fields are
    /// rejected by the engine before anything is written.
    pub async fn set_field_active(&self, id: &str, active: bool) -> DataResult<()> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        schema::set_active(&mut data.fields, id, active)?;
        self.commit(&doc).await
    }

    pub async fn set_field_required(&self, id: &str, required: bool) -> DataResult<()> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        schema::set_required(&mut data.fields, id, required)?;
        self.commit(&doc).await
    }

    /// Delete a custom field and strip its values from every task
    pub async fn delete_field(&self, id: &str) -> DataResult<FieldConfig> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let field = schema::delete_field(&mut data.fields, &mut data.tasks, id)?;
        push_log(data, format!("Deleted field \"{}\"", field.label), None);
        self.commit(&doc).await?;
        info!("Deleted field '{}' ({})", field.label, field.id);
        Ok(field)
    }

    /// Apply a drag-drop ordering of the active fields
    pub async fn reorder_fields(&self, ordered_active_ids: &[String]) -> DataResult<()> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        schema::reorder(&mut data.fields, ordered_active_ids);
        self.commit(&doc).await
    }

    /// Rename a group across all fields carrying it; collisions reject
    pub async fn rename_group(&self, old: &str, new: &str) -> DataResult<usize> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let renamed = schema::rename_group(&mut data.fields, old, new)?;
        if renamed == 0 {
            return Ok(0);
        }
        self.commit(&doc).await?;
        Ok(renamed)
    }

    pub async fn group_names(&self) -> DataResult<Vec<String>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| schema::group_names(&data.fields))
            .unwrap_or_default())
    }

    /// Configured tag options unioned with values observed on tasks
    pub async fn available_tags(&self) -> DataResult<Vec<String>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| schema::available_tags(&data.fields, &data.tasks))
            .unwrap_or_default())
    }

    /// Delete a tag from option lists and from every task carrying it
    pub async fn delete_tag(&self, value: &str) -> DataResult<usize> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let removed = schema::delete_tag(&mut data.fields, &mut data.tasks, value);
        if removed == 0 {
            return Ok(0);
        }
        push_log(data, format!("Deleted tag \"{}\"", value), None);
        self.commit(&doc).await?;
        Ok(removed)
    }

    /// Replace the repository list, keeping field options and PR-link base
    /// URLs name-aligned
    pub async fn set_repositories(&self, entries: Vec<RepositoryConfig>) -> DataResult<()> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        schema::set_repositories(&mut data.fields, &mut data.repository_configs, entries)?;
        self.commit(&doc).await
    }

    pub async fn repository_configs(&self) -> DataResult<Vec<RepositoryConfig>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| data.repository_configs.clone())
            .unwrap_or_default())
    }
}
