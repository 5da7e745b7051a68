use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AuditError;
use crate::models::AuditStatus;
use crate::services::audit::{self, AuditAction, Transition};

/// 试卷审核记录
///
/// 描述性字段（标题、赛事、科目等）创建后不可修改；
/// 审核相关字段只能通过 [`ExamAuditRecord::apply`] 修改，
/// 保证 `can_display == true` 时状态一定是 `approved`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAuditRecord {
    id: u64,
    title: String,
    contest: String,
    subject: String,
    level: String,
    year: u16,
    total_questions: u32,
    pub(crate) audit_status: AuditStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reviewer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) review_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) review_comment: Option<String>,
    pub(crate) can_display: bool,
}

/// 种子数据中的试卷记录（未经校验）
#[derive(Debug, Clone, Deserialize)]
pub struct ExamSeed {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub contest: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub level: String,
    #[serde(deserialize_with = "deserialize_year")]
    pub year: u16,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default = "default_status")]
    pub audit_status: AuditStatus,
    #[serde(default)]
    pub reviewer: Option<String>,
    #[serde(default)]
    pub review_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub review_comment: Option<String>,
    #[serde(default)]
    pub can_display: bool,
}

fn default_status() -> AuditStatus {
    AuditStatus::PendingReview
}

impl ExamAuditRecord {
    /// 创建一份新提交的试卷，状态为待审核，不展示
    pub fn new(
        id: u64,
        title: impl Into<String>,
        contest: impl Into<String>,
        subject: impl Into<String>,
        level: impl Into<String>,
        year: u16,
        total_questions: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            contest: contest.into(),
            subject: subject.into(),
            level: level.into(),
            year,
            total_questions,
            audit_status: AuditStatus::PendingReview,
            reviewer: None,
            review_time: None,
            review_comment: None,
            can_display: false,
        }
    }

    /// 以指定初始状态创建（用于种子数据，例如 `in_review`）
    pub fn with_status(mut self, status: AuditStatus) -> Self {
        self.audit_status = status;
        if status != AuditStatus::Approved {
            self.can_display = false;
        }
        self
    }

    /// 从种子数据构建记录
    ///
    /// 非 `approved` 状态却标记为展示的种子会被强制改为不展示。
    pub fn from_seed(seed: ExamSeed) -> Self {
        let mut can_display = seed.can_display;
        if can_display && seed.audit_status != AuditStatus::Approved {
            warn!(
                "⚠️ 试卷 #{} 状态为「{}」却标记为展示，已强制关闭展示",
                seed.id, seed.audit_status
            );
            can_display = false;
        }

        Self {
            id: seed.id,
            title: seed.title,
            contest: seed.contest,
            subject: seed.subject,
            level: seed.level,
            year: seed.year,
            total_questions: seed.total_questions,
            audit_status: seed.audit_status,
            reviewer: seed.reviewer,
            review_time: seed.review_time,
            review_comment: seed.review_comment,
            can_display,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn contest(&self) -> &str {
        &self.contest
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn audit_status(&self) -> AuditStatus {
        self.audit_status
    }

    pub fn reviewer(&self) -> Option<&str> {
        self.reviewer.as_deref()
    }

    pub fn review_time(&self) -> Option<NaiveDateTime> {
        self.review_time
    }

    pub fn review_comment(&self) -> Option<&str> {
        self.review_comment.as_deref()
    }

    pub fn can_display(&self) -> bool {
        self.can_display
    }

    /// 当前状态和操作人下该操作是否可用（界面据此禁用按钮）
    pub fn can_apply(&self, action: &AuditAction, reviewer: &str) -> bool {
        audit::check(self, action, reviewer).is_ok()
    }

    /// 执行一次审核操作
    ///
    /// # 参数
    /// - `action`: 审核操作
    /// - `reviewer`: 当前操作人
    /// - `now`: 审核时间
    ///
    /// # 返回
    /// 操作被拒绝时返回错误，记录不变
    pub fn apply(
        &mut self,
        action: &AuditAction,
        reviewer: &str,
        now: NaiveDateTime,
    ) -> Result<Transition, AuditError> {
        audit::apply(self, action, reviewer, now)
    }

    /// 标题、赛事或科目是否包含关键字（不区分大小写）
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return true;
        }
        [&self.title, &self.contest, &self.subject]
            .iter()
            .any(|field| field.to_lowercase().contains(&keyword))
    }
}

impl std::fmt::Display for ExamAuditRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} [{} · {} · {} · {}年 · {}题] {}{}",
            self.id,
            self.title,
            self.contest,
            self.subject,
            self.level,
            self.year,
            self.total_questions,
            self.audit_status,
            if self.can_display { " 👁" } else { "" }
        )
    }
}

// Helper function to deserialize year as either string or integer
fn deserialize_year<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = u16;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a year")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .trim()
                .trim_end_matches('年')
                .parse()
                .map_err(|_| E::custom(format!("invalid year: {}", value)))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u16::try_from(value).map_err(|_| E::custom(format!("year out of range: {}", value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u16::try_from(value).map_err(|_| E::custom(format!("year out of range: {}", value)))
        }
    }

    deserializer.deserialize_any(YearVisitor)
}
