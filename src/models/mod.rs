pub mod sync_result;
pub mod test_case;

pub use sync_result::{SyncOutcome, SyncResult, SyncSummary};
pub use test_case::{StepDefinition, TestCaseDefinition};
