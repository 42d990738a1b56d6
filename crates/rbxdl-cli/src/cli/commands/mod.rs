//! CLI command handlers, one file per command.

mod categories;
mod checksum;
mod count;
mod get;
mod id;

pub use categories::run_categories;
pub use checksum::run_checksum;
pub use count::run_count;
pub use get::{run_get, GetOptions};
pub use id::run_id;
