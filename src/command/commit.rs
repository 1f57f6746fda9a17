//! Commit command.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::command::UpdateCommand;
use crate::error::Result;

/// Options of the optimize step sent with a commit.
///
/// Unset options are left out of the payload and the server defaults apply
/// (`waitSearcher=true`, `expungeDeletes=false`, `maxSegments=1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_searcher: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expunge_deletes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_segments: Option<u32>,
}

impl CommitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wait_searcher(mut self, wait: bool) -> Self {
        self.wait_searcher = Some(wait);
        self
    }

    pub fn with_expunge_deletes(mut self, expunge: bool) -> Self {
        self.expunge_deletes = Some(expunge);
        self
    }

    pub fn with_max_segments(mut self, max_segments: u32) -> Self {
        self.max_segments = Some(max_segments);
        self
    }
}

/// Commits pending updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitCommand {
    options: CommitOptions,
}

impl CommitCommand {
    pub fn new(options: CommitOptions) -> Self {
        CommitCommand { options }
    }
}

impl UpdateCommand for CommitCommand {
    fn name(&self) -> &'static str {
        "commit"
    }

    fn payload(&self) -> Result<Value> {
        Ok(json!({
            "optimize": serde_json::to_value(self.options)?,
            "commit": {},
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commit_payload() {
        let payload = CommitCommand::default().payload().unwrap();
        assert_eq!(payload, json!({"optimize": {}, "commit": {}}));
    }

    #[test]
    fn test_commit_options_in_payload() {
        let options = CommitOptions::new()
            .with_wait_searcher(false)
            .with_max_segments(4);
        let payload = CommitCommand::new(options).payload().unwrap();
        assert_eq!(
            payload,
            json!({"optimize": {"waitSearcher": false, "maxSegments": 4}, "commit": {}})
        );
    }
}
