//! CLI command implementations.

pub mod add;
pub mod export;
pub mod list;
pub mod report;
pub mod resolve;
pub mod score;

pub use add::AddArgs;
pub use export::ExportArgs;
pub use list::ListArgs;
pub use report::ReportArgs;
pub use resolve::ResolveArgs;
pub use score::ScoreArgs;
