// ABOUTME: Append-only activity log, capped at the most recent 2000 entries

use chrono::Utc;

use taskflow_core::{generate_entity_id, CompanyData, LogEntry, LOG_CAP};

use crate::error::DataResult;
use crate::layer::WorkspaceContext;

/// Append an entry to a workspace's log, evicting the oldest past the cap
pub(crate) fn push_log(data: &mut CompanyData, message: String, task_id: Option<String>) {
    push_entry(
        data,
        LogEntry {
            id: generate_entity_id("log"),
            timestamp: Utc::now(),
            message,
            task_id,
        },
    );
}

fn push_entry(data: &mut CompanyData, entry: LogEntry) {
    data.logs.push(entry);
    if data.logs.len() > LOG_CAP {
        let excess = data.logs.len() - LOG_CAP;
        data.logs.drain(0..excess);
    }
}

impl WorkspaceContext<'_> {
    /// Record a log entry directly (mutations log on their own)
    pub async fn append_log(
        &self,
        message: impl Into<String>,
        task_id: Option<String>,
    ) -> DataResult<LogEntry> {
        let mut doc = self.read().await?;
        let data = self.data(&mut doc)?;
        let entry = LogEntry {
            id: generate_entity_id("log"),
            timestamp: Utc::now(),
            message: message.into(),
            task_id,
        };
        push_entry(data, entry.clone());
        self.commit(&doc).await?;
        Ok(entry)
    }

    pub async fn logs(&self) -> DataResult<Vec<LogEntry>> {
        let doc = self.read().await?;
        Ok(self
            .data_ref(&doc)
            .map(|data| data.logs.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_log_evicts_oldest_past_cap() {
        let mut data = CompanyData::empty();
        for i in 0..(LOG_CAP + 5) {
            push_log(&mut data, format!("entry {}", i), None);
        }

        assert_eq!(data.logs.len(), LOG_CAP);
        assert_eq!(data.logs.first().unwrap().message, "entry 5");
        assert_eq!(
            data.logs.last().unwrap().message,
            format!("entry {}", LOG_CAP + 4)
        );
    }
}
