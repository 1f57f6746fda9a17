//! Update commands.
//!
//! Each command knows its JSON body and the query parameters that go with
//! it. Sending is left to [`crate::transport::Transport`]; the client posts
//! every command to the configured update handler.

pub mod add;
pub mod commit;
pub mod rollback;

use serde_json::Value;

use crate::error::Result;
use crate::query::QueryParam;

pub use add::{AddCommand, AddParameters};
pub use commit::{CommitCommand, CommitOptions};
pub use rollback::RollbackCommand;

/// A request against the update handler.
pub trait UpdateCommand {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// The JSON body to post.
    fn payload(&self) -> Result<Value>;

    /// Query parameters sent with the body.
    fn parameters(&self) -> Vec<QueryParam> {
        Vec::new()
    }
}
