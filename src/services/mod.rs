pub mod audit;
pub mod pagination;

pub use audit::{AuditAction, Transition, DEFAULT_APPROVE_COMMENT};
pub use pagination::{Page, Paginator};
