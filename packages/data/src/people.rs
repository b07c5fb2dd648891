// ABOUTME: Developer/tester CRUD scoped to one workspace
// ABOUTME: Deleting a person unassigns them from every task referencing the id

use tracing::info;

use taskflow_core::{generate_entity_id, CompanyData, Person};

use crate::error::DataResult;
use crate::layer::WorkspaceContext;
use crate::logs::push_log;

/// Which person collection an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonRole {
    Developer,
    Tester,
}

impl PersonRole {
    fn id_prefix(self) -> &'static str {
        match self {
            PersonRole::Developer => "developer",
            PersonRole::Tester => "tester",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PersonRole::Developer => "developer",
            PersonRole::Tester => "tester",
        }
    }
}

fn collection(data: &mut CompanyData, role: PersonRole) -> &mut Vec<Person> {
    match role {
        PersonRole::Developer => &mut data.developers,
        PersonRole::Tester => &mut data.testers,
    }
}

/// Input for creating or updating a person
#[derive(Debug, Clone, Default)]
pub struct PersonInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl WorkspaceContext<'_> {
    pub async fn add_person(&self, role: PersonRole, input: PersonInput) -> DataResult<Person> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;

        let person = Person {
            id: generate_entity_id(role.id_prefix()),
            name: input.name,
            email: input.email,
            phone: input.phone,
        };
        collection(data, role).push(person.clone());
        push_log(data, format!("Added {} \"{}\"", role.label(), person.name), None);
        self.commit(&doc).await?;
        Ok(person)
    }

    pub async fn persons(&self, role: PersonRole) -> DataResult<Vec<Person>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| match role {
                PersonRole::Developer => data.developers.clone(),
                PersonRole::Tester => data.testers.clone(),
            })
            .unwrap_or_default())
    }

    pub async fn update_person(
        &self,
        role: PersonRole,
        id: &str,
        input: PersonInput,
    ) -> DataResult<Option<Person>> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let Some(person) = collection(data, role).iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        person.name = input.name;
        person.email = input.email;
        person.phone = input.phone;
        let updated = person.clone();
        self.commit(&doc).await?;
        Ok(Some(updated))
    }

    /// Delete a person and unassign them from all tasks referencing the id
    pub async fn delete_person(&self, role: PersonRole, id: &str) -> DataResult<bool> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let people = collection(data, role);
        let Some(index) = people.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        let removed = people.remove(index);

        // Referential cascade: tasks hold person ids, not foreign keys
        for task in data.tasks.iter_mut() {
            let assignments = match role {
                PersonRole::Developer => &mut task.developers,
                PersonRole::Tester => &mut task.testers,
            };
            assignments.retain(|assigned| assigned != id);
        }

        push_log(
            data,
            format!("Removed {} \"{}\"", role.label(), removed.name),
            None,
        );
        self.commit(&doc).await?;
        info!("Deleted {} '{}' (ID: {})", role.label(), removed.name, removed.id);
        Ok(true)
    }
}
