// ABOUTME: Note CRUD scoped to one workspace

use chrono::Utc;

use taskflow_core::{generate_entity_id, Note};

use crate::error::DataResult;
use crate::layer::WorkspaceContext;

#[derive(Debug, Clone, Default)]
pub struct NoteCreateInput {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct NoteUpdateInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl WorkspaceContext<'_> {
    pub async fn add_note(&self, input: NoteCreateInput) -> DataResult<Note> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;

        let now = Utc::now();
        let note = Note {
            id: generate_entity_id("note"),
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: now,
        };
        data.notes.push(note.clone());
        self.commit(&doc).await?;
        Ok(note)
    }

    pub async fn notes(&self) -> DataResult<Vec<Note>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| data.notes.clone())
            .unwrap_or_default())
    }

    pub async fn update_note(
        &self,
        id: &str,
        input: NoteUpdateInput,
    ) -> DataResult<Option<Note>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(note) = data.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };

        if let Some(title) = input.title {
            note.title = Some(title);
        }
        if let Some(content) = input.content {
            note.content = content;
        }
        note.updated_at = Utc::now();
        let updated = note.clone();
        self.commit(&doc).await?;
        Ok(Some(updated))
    }

    pub async fn delete_note(&self, id: &str) -> DataResult<bool> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(index) = data.notes.iter().position(|n| n.id == id) else {
            return Ok(false);
        };

        data.notes.remove(index);
        self.commit(&doc).await?;
        Ok(true)
    }
}
