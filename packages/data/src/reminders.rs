// ABOUTME: Task reminders and workspace-general reminders
// ABOUTME: Pinned task reminders surface on the main page outside the task view

use chrono::{DateTime, Utc};

use taskflow_core::{generate_entity_id, Reminder, Task};

use crate::error::DataResult;
use crate::layer::WorkspaceContext;

/// A pinned task reminder together with the task it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedReminder {
    pub task_id: String,
    pub task_title: String,
    pub reminder: Reminder,
}

impl WorkspaceContext<'_> {
    /// Attach (or replace) a task's reminder
    pub async fn set_reminder(
        &self,
        task_id: &str,
        text: String,
        remind_at: Option<DateTime<Utc>>,
        pinned: bool,
    ) -> DataResult<Option<Task>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };

        task.reminder = Some(Reminder {
            id: generate_entity_id("reminder"),
            text,
            remind_at,
            pinned,
        });
        let updated = task.clone();
        self.commit(&doc).await?;
        Ok(Some(updated))
    }

    pub async fn clear_reminder(&self, task_id: &str) -> DataResult<Option<Task>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };
        if task.reminder.is_none() {
            return Ok(None);
        }

        task.reminder = None;
        let updated = task.clone();
        self.commit(&doc).await?;
        Ok(Some(updated))
    }

    /// Pinned reminders across all live tasks, for the main page
    pub async fn pinned_reminders(&self) -> DataResult<Vec<PinnedReminder>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| {
                data.tasks
                    .iter()
                    .filter(|t| t.deleted_at.is_none())
                    .filter_map(|t| {
                        t.reminder
                            .as_ref()
                            .filter(|r| r.pinned)
                            .map(|r| PinnedReminder {
                                task_id: t.id.clone(),
                                task_title: t.title.clone(),
                                reminder: r.clone(),
                            })
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    pub async fn add_general_reminder(
        &self,
        text: String,
        remind_at: Option<DateTime<Utc>>,
    ) -> DataResult<Reminder> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;

        let reminder = Reminder {
            id: generate_entity_id("reminder"),
            text,
            remind_at,
            pinned: false,
        };
        data.general_reminders.push(reminder.clone());
        self.commit(&doc).await?;
        Ok(reminder)
    }

    pub async fn general_reminders(&self) -> DataResult<Vec<Reminder>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| data.general_reminders.clone())
            .unwrap_or_default())
    }

    pub async fn delete_general_reminder(&self, id: &str) -> DataResult<bool> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(index) = data.general_reminders.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        data.general_reminders.remove(index);
        self.commit(&doc).await?;
        Ok(true)
    }
}
