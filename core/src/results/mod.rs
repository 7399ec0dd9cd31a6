//! Result aggregation: final status, hit ratio, ranking and row layout.

mod row;
mod summary;
mod table;

pub use row::{ResultRow, ResultStatus};
pub use summary::RunSummary;
pub use table::ResultTable;
