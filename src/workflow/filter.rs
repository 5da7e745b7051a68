//! 列表筛选条件

use std::fmt::Display;

use crate::models::{AuditStatus, ExamAuditRecord};

/// 试卷列表筛选条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamFilter {
    /// 按审核状态筛选，`None` 表示全部
    pub status: Option<AuditStatus>,
    /// 按标题 / 赛事 / 科目关键字筛选
    pub keyword: Option<String>,
}

impl ExamFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(status: AuditStatus) -> Self {
        Self {
            status: Some(status),
            keyword: None,
        }
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = if keyword.trim().is_empty() {
            None
        } else {
            Some(keyword.trim().to_string())
        };
        self
    }

    pub fn matches(&self, record: &ExamAuditRecord) -> bool {
        if let Some(status) = self.status {
            if record.audit_status() != status {
                return false;
            }
        }
        match &self.keyword {
            Some(keyword) => record.matches_keyword(keyword),
            None => true,
        }
    }
}

impl Display for ExamFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.status.map(|s| s.label()).unwrap_or("全部");
        match &self.keyword {
            Some(keyword) => write!(f, "[状态: {} | 关键字: {}]", status, keyword),
            None => write!(f, "[状态: {}]", status),
        }
    }
}
