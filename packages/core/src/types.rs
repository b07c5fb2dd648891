use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::constants::DOCUMENT_VERSION;

/// A workspace (company): the top-level tenant partition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: String,
    pub name: String,
}

/// Field types supported by the dynamic schema engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Date,
    Select,
    MultiSelect,
    Tags,
    Url,
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Text
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Textarea => write!(f, "textarea"),
            FieldType::Date => write!(f, "date"),
            FieldType::Select => write!(f, "select"),
            FieldType::MultiSelect => write!(f, "multiselect"),
            FieldType::Tags => write!(f, "tags"),
            FieldType::Url => write!(f, "url"),
        }
    }
}

/// Sort direction hint for list rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One choice in a select/multiselect/tags field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOption {
    pub id: String,
    pub label: String,
    pub value: String,
}

/// Schema definition describing one form field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    pub id: String,
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub group: String,
    pub order: usize,
    #[serde(rename = "isRequired")]
    pub is_required: bool,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "isCustom")]
    pub is_custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(rename = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(rename = "sortDirection", skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

/// Repository entry used to build PR links; kept name-aligned with the
/// options of the `repositories` field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryConfig {
    pub name: String,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
}

/// Typed value stored for a field on a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
    Null,
}

impl FieldValue {
    /// Whether the value counts as empty for required-field validation
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Flag(_) => false,
            FieldValue::Null => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// A comment on a task, addressed by index within the task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub author: Option<String>,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A file or link attached to a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// A reminder, either attached to a task or workspace-general
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    pub id: String,
    pub text: String,
    #[serde(rename = "remindAt", skip_serializing_if = "Option::is_none")]
    pub remind_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pinned: bool,
}

/// A developer or tester
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A freestanding note, independent of tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// One append-only activity log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// A task record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub testers: Vec<String>,
    #[serde(rename = "customFields", default)]
    pub custom_fields: HashMap<String, FieldValue>,
    #[serde(rename = "prLinks", default)]
    pub pr_links: Vec<String>,
    #[serde(rename = "deploymentStatus", skip_serializing_if = "Option::is_none")]
    pub deployment_status: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    #[serde(rename = "isFavorite", default)]
    pub is_favorite: bool,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreateInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub testers: Vec<String>,
    #[serde(rename = "customFields", default)]
    pub custom_fields: HashMap<String, FieldValue>,
    #[serde(rename = "prLinks", default)]
    pub pr_links: Vec<String>,
}

/// Input for partially updating an existing task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub repositories: Option<Vec<String>>,
    pub developers: Option<Vec<String>>,
    pub testers: Option<Vec<String>>,
    #[serde(rename = "customFields")]
    pub custom_fields: Option<HashMap<String, FieldValue>>,
    #[serde(rename = "prLinks")]
    pub pr_links: Option<Vec<String>>,
    #[serde(rename = "deploymentStatus")]
    pub deployment_status: Option<String>,
}

/// Everything owned by one workspace
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanyData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub developers: Vec<Person>,
    #[serde(default)]
    pub testers: Vec<Person>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(rename = "repositoryConfigs", default)]
    pub repository_configs: Vec<RepositoryConfig>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(rename = "generalReminders", default)]
    pub general_reminders: Vec<Reminder>,
}

impl CompanyData {
    /// An empty workspace payload; field seeding happens at the store layer
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Root persisted structure: the whole application state as one document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppDocument {
    pub version: String,
    pub companies: Vec<Company>,
    #[serde(rename = "activeCompanyId")]
    pub active_company_id: String,
    #[serde(rename = "companyData")]
    pub company_data: HashMap<String, CompanyData>,
}

impl AppDocument {
    /// Repair structural invariants in place; returns true if anything changed.
    ///
    /// Ensures every company has a `CompanyData` entry, drops orphaned data
    /// entries, and re-points `active_company_id` at an existing company.
    /// An empty company list is not repaired here; the store replaces such a
    /// document wholesale.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;

        for company in &self.companies {
            if !self.company_data.contains_key(&company.id) {
                self.company_data
                    .insert(company.id.clone(), CompanyData::empty());
                changed = true;
            }
        }

        let known: Vec<String> = self.companies.iter().map(|c| c.id.clone()).collect();
        let before = self.company_data.len();
        self.company_data.retain(|id, _| known.contains(id));
        if self.company_data.len() != before {
            changed = true;
        }

        if !known.contains(&self.active_company_id) {
            if let Some(first) = self.companies.first() {
                self.active_company_id = first.id.clone();
                changed = true;
            }
        }

        changed
    }
}

impl Default for AppDocument {
    fn default() -> Self {
        AppDocument {
            version: DOCUMENT_VERSION.to_string(),
            companies: Vec::new(),
            active_company_id: String::new(),
            company_data: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_repairs_dangling_active_id() {
        let mut doc = AppDocument {
            companies: vec![Company {
                id: "company-1".to_string(),
                name: "Acme".to_string(),
            }],
            active_company_id: "company-gone".to_string(),
            ..Default::default()
        };

        assert!(doc.normalize());
        assert_eq!(doc.active_company_id, "company-1");
        assert!(doc.company_data.contains_key("company-1"));
    }

    #[test]
    fn test_normalize_drops_orphaned_company_data() {
        let mut doc = AppDocument {
            companies: vec![Company {
                id: "company-1".to_string(),
                name: "Acme".to_string(),
            }],
            active_company_id: "company-1".to_string(),
            ..Default::default()
        };
        doc.company_data
            .insert("company-1".to_string(), CompanyData::empty());
        doc.company_data
            .insert("company-deleted".to_string(), CompanyData::empty());

        assert!(doc.normalize());
        assert_eq!(doc.company_data.len(), 1);
    }

    #[test]
    fn test_field_value_untagged_serde() {
        let text: FieldValue = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(text, FieldValue::Text("hello".to_string()));

        let list: FieldValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(
            list,
            FieldValue::List(vec!["a".to_string(), "b".to_string()])
        );

        let null: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(null, FieldValue::Null);
        assert!(null.is_empty());
        assert!(FieldValue::Text("  ".to_string()).is_empty());
        assert!(!FieldValue::Flag(false).is_empty());
    }
}
