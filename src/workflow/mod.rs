pub mod exam_store;
pub mod filter;

pub use exam_store::{AuditStats, ExamAuditStore};
pub use filter::ExamFilter;
