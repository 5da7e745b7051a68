pub mod audit_status;
pub mod exam;
pub mod loaders;

pub use audit_status::AuditStatus;
pub use exam::{ExamAuditRecord, ExamSeed};
pub use loaders::{load_seed_file, parse_seed_str};
