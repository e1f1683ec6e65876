pub mod check;
pub mod list;
pub mod sync;

pub use check::run_check;
pub use list::list_definition_files;
pub use sync::{run_sync, sync_definitions};
