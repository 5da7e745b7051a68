//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层充当界面：把文本命令翻译成仓库调用，再把结果渲染成文本。
//!
//! ## 模块划分
//!
//! ### `command` - 命令解析
//! - 把一行输入解析为 `Command`
//! - 只做语法检查，不做审核判断（例如驳回意见为空仍然解析成功）
//!
//! ### `console` - 审核控制台
//! - 管理应用生命周期（加载种子数据、读取输入、退出统计）
//! - 渲染列表页，并标出每条试卷当前可用的操作
//!
//! ## 层次关系
//!
//! ```text
//! console (读取命令 / 渲染)
//!     ↓
//! workflow::ExamAuditStore (持有记录、筛选、分页)
//!     ↓
//! services (能力层：audit 状态机 / pagination 分页器)
//!     ↓
//! models (ExamAuditRecord / AuditStatus / 种子加载)
//! ```

pub mod command;
pub mod console;

pub use command::Command;
pub use console::{App, Outcome};
