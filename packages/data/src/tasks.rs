// ABOUTME: Task CRUD scoped to one workspace
// ABOUTME: Soft delete moves tasks to the bin; the bin purges after 30 days

use chrono::{Duration, Utc};
use tracing::{debug, info};

use taskflow_core::{
    generate_entity_id, Comment, Task, TaskCreateInput, TaskUpdateInput, BIN_RETENTION_DAYS,
};

use crate::error::DataResult;
use crate::layer::WorkspaceContext;
use crate::logs::push_log;

impl WorkspaceContext<'_> {
    /// Create a task with a generated id and fresh timestamps
    pub async fn add_task(&self, input: TaskCreateInput) -> DataResult<Task> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;

        let now = Utc::now();
        let task = Task {
            id: generate_entity_id("task"),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_else(|| "To Do".to_string()),
            repositories: input.repositories,
            developers: input.developers,
            testers: input.testers,
            custom_fields: input.custom_fields,
            pr_links: input.pr_links,
            deployment_status: None,
            attachments: Vec::new(),
            comments: Vec::new(),
            reminder: None,
            is_favorite: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        data.tasks.push(task.clone());
        push_log(
            data,
            format!("Created task \"{}\"", task.title),
            Some(task.id.clone()),
        );
        self.commit(&doc).await?;
        info!("Created task '{}' with ID {}", task.title, task.id);
        Ok(task)
    }

    /// Tasks not in the bin
    pub async fn get_tasks(&self) -> DataResult<Vec<Task>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| {
                data.tasks
                    .iter()
                    .filter(|t| t.deleted_at.is_none())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Look up a task by id, including binned tasks
    pub async fn get_task(&self, id: &str) -> DataResult<Option<Task>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .and_then(|data| data.tasks.iter().find(|t| t.id == id).cloned()))
    }

    /// Merge partial fields into a task and refresh `updated_at`
    pub async fn update_task(
        &self,
        id: &str,
        updates: TaskUpdateInput,
    ) -> DataResult<Option<Task>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(title) = updates.title {
            task.title = title;
        }
        if let Some(description) = updates.description {
            task.description = description;
        }
        if let Some(status) = updates.status {
            task.status = status;
        }
        if let Some(repositories) = updates.repositories {
            task.repositories = repositories;
        }
        if let Some(developers) = updates.developers {
            task.developers = developers;
        }
        if let Some(testers) = updates.testers {
            task.testers = testers;
        }
        if let Some(custom_fields) = updates.custom_fields {
            task.custom_fields.extend(custom_fields);
        }
        if let Some(pr_links) = updates.pr_links {
            task.pr_links = pr_links;
        }
        if let Some(deployment_status) = updates.deployment_status {
            task.deployment_status = Some(deployment_status);
        }
        task.updated_at = Utc::now();
        let updated = task.clone();

        push_log(
            data,
            format!("Updated task \"{}\"", updated.title),
            Some(updated.id.clone()),
        );
        self.commit(&doc).await?;
        Ok(Some(updated))
    }

    /// Soft delete: move a task to the bin
    pub async fn delete_task(&self, id: &str) -> DataResult<bool> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.deleted_at.is_none())
        else {
            return Ok(false);
        };

        task.deleted_at = Some(Utc::now());
        let title = task.title.clone();
        let task_id = task.id.clone();
        push_log(data, format!("Moved task \"{}\" to bin", title), Some(task_id));
        self.commit(&doc).await?;
        Ok(true)
    }

    /// Bring a task back from the bin
    pub async fn restore_task(&self, id: &str) -> DataResult<bool> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.deleted_at.is_some())
        else {
            return Ok(false);
        };

        task.deleted_at = None;
        let title = task.title.clone();
        let task_id = task.id.clone();
        push_log(data, format!("Restored task \"{}\"", title), Some(task_id));
        self.commit(&doc).await?;
        Ok(true)
    }

    /// Remove a task record entirely
    pub async fn delete_task_permanently(&self, id: &str) -> DataResult<bool> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(index) = data.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };

        let removed = data.tasks.remove(index);
        push_log(
            data,
            format!("Permanently deleted task \"{}\"", removed.title),
            None,
        );
        self.commit(&doc).await?;
        info!("Permanently deleted task {}", removed.id);
        Ok(true)
    }

    /// Drop every task currently in the bin; returns how many were removed
    pub async fn empty_bin(&self) -> DataResult<usize> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let before = data.tasks.len();
        data.tasks.retain(|t| t.deleted_at.is_none());
        let removed = before - data.tasks.len();
        if removed == 0 {
            return Ok(0);
        }

        push_log(data, format!("Emptied bin ({} tasks)", removed), None);
        self.commit(&doc).await?;
        Ok(removed)
    }

    /// Purge binned tasks past the retention window
    pub async fn purge_expired_tasks(&self) -> DataResult<usize> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let cutoff = Utc::now() - Duration::days(BIN_RETENTION_DAYS);
        let before = data.tasks.len();
        data.tasks
            .retain(|t| t.deleted_at.map(|at| at > cutoff).unwrap_or(true));
        let purged = before - data.tasks.len();
        if purged == 0 {
            return Ok(0);
        }

        debug!("Purged {} expired tasks from bin", purged);
        push_log(data, format!("Purged {} expired tasks", purged), None);
        self.commit(&doc).await?;
        Ok(purged)
    }

    /// Tasks in the bin, after purging anything past retention
    pub async fn binned_tasks(&self) -> DataResult<Vec<Task>> {
        self.purge_expired_tasks().await?;
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| {
                data.tasks
                    .iter()
                    .filter(|t| t.deleted_at.is_some())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    pub async fn set_favorite(&self, id: &str, favorite: bool) -> DataResult<Option<Task>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        task.is_favorite = favorite;
        let updated = task.clone();
        self.commit(&doc).await?;
        Ok(Some(updated))
    }

    /// Append a comment to a task
    pub async fn add_comment(
        &self,
        task_id: &str,
        author: Option<String>,
        text: String,
    ) -> DataResult<Option<Task>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };

        task.comments.push(Comment {
            author,
            text,
            created_at: Utc::now(),
        });
        task.updated_at = Utc::now();
        let updated = task.clone();
        self.commit(&doc).await?;
        Ok(Some(updated))
    }

    /// Replace a comment's text by index. An out-of-range index is a no-op
    /// returning `None`.
    pub async fn update_comment(
        &self,
        task_id: &str,
        index: usize,
        text: String,
    ) -> DataResult<Option<Task>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };
        let Some(comment) = task.comments.get_mut(index) else {
            return Ok(None);
        };

        comment.text = text;
        task.updated_at = Utc::now();
        let updated = task.clone();
        self.commit(&doc).await?;
        Ok(Some(updated))
    }

    /// Remove a comment by index. An out-of-range index is a no-op returning
    /// `None`.
    pub async fn delete_comment(&self, task_id: &str, index: usize) -> DataResult<Option<Task>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };
        if index >= task.comments.len() {
            return Ok(None);
        }

        task.comments.remove(index);
        task.updated_at = Utc::now();
        let updated = task.clone();
        self.commit(&doc).await?;
        Ok(Some(updated))
    }
}
