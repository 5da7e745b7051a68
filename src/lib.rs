//! # CodeQuest Audit
//!
//! CodeQuest 管理后台的试卷审核核心
//!
//! ## 架构设计
//!
//! ### ① 模型层（Models）
//! - `models/` - `ExamAuditRecord`、`AuditStatus`、TOML 种子加载
//!
//! ### ② 业务能力层（Services）
//! - `audit` - 审核状态机，集中校验所有状态流转，保证只有已通过的试卷可以展示
//! - `pagination` - 通用分页器，所有输入都被夹紧，从不报错
//!
//! ### ③ 流程层（Workflow）
//! - `ExamAuditStore` - 持有记录集合，对外暴露审核操作、筛选和分页
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/console` - 命令行审核台，充当界面层
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AuditStatus, ExamAuditRecord};
pub use orchestrator::App;
pub use services::{AuditAction, Page, Paginator, Transition};
pub use workflow::{ExamAuditStore, ExamFilter};
