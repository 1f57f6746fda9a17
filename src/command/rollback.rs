//! Rollback command.

use serde_json::{Value, json};

use crate::command::UpdateCommand;
use crate::error::Result;

/// Discards every add made since the last commit.
#[derive(Debug, Clone, Copy, Default)]
pub struct RollbackCommand;

impl UpdateCommand for RollbackCommand {
    fn name(&self) -> &'static str {
        "rollback"
    }

    fn payload(&self) -> Result<Value> {
        Ok(json!({ "rollback": {} }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_payload() {
        assert_eq!(RollbackCommand.payload().unwrap(), json!({"rollback": {}}));
        assert!(RollbackCommand.parameters().is_empty());
    }
}
