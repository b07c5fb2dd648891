// ABOUTME: Shared utility functions for TaskFlow
// ABOUTME: Timestamp-prefixed entity id generation

use chrono::Utc;

/// Generate a unique entity id of the form `{prefix}-{millis}-{suffix}`.
///
/// The millisecond timestamp keeps ids roughly sortable by creation time; the
/// random suffix disambiguates ids minted within the same millisecond.
pub fn generate_entity_id(prefix: &str) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_entity_id() {
        let id1 = generate_entity_id("task");
        let id2 = generate_entity_id("task");

        assert!(id1.starts_with("task-"));
        assert!(id2.starts_with("task-"));
        assert_ne!(id1, id2);

        // prefix, millisecond timestamp, random suffix
        let parts: Vec<&str> = id1.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
    }
}
