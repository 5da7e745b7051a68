/// 试卷审核状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// 待审核
    PendingReview,
    /// 审核中
    InReview,
    /// 已通过
    Approved,
    /// 已驳回
    Rejected,
}

impl AuditStatus {
    /// 全部状态，按看板展示顺序
    pub const ALL: [AuditStatus; 4] = [
        AuditStatus::PendingReview,
        AuditStatus::InReview,
        AuditStatus::Approved,
        AuditStatus::Rejected,
    ];

    /// 获取状态代码（与序列化值一致）
    pub fn code(self) -> &'static str {
        match self {
            AuditStatus::PendingReview => "pending_review",
            AuditStatus::InReview => "in_review",
            AuditStatus::Approved => "approved",
            AuditStatus::Rejected => "rejected",
        }
    }

    /// 获取中文标签
    pub fn label(self) -> &'static str {
        match self {
            AuditStatus::PendingReview => "待审核",
            AuditStatus::InReview => "审核中",
            AuditStatus::Approved => "已通过",
            AuditStatus::Rejected => "已驳回",
        }
    }

    /// 是否可以进行审核（通过 / 驳回）
    pub fn is_reviewable(self) -> bool {
        matches!(self, AuditStatus::PendingReview | AuditStatus::InReview)
    }

    /// 从代码或中文标签解析状态
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "pending_review" | "pending" | "待审核" => Some(AuditStatus::PendingReview),
            "in_review" | "reviewing" | "审核中" => Some(AuditStatus::InReview),
            "approved" | "已通过" => Some(AuditStatus::Approved),
            "rejected" | "已驳回" => Some(AuditStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
