//! 试卷审核状态机 - 业务能力层
//!
//! 所有状态流转都在这里集中校验：
//!
//! | 当前状态 | 操作 | 目标状态 |
//! |---|---|---|
//! | 待审核 / 审核中 | 通过 | 已通过（展示） |
//! | 待审核 / 审核中 / 已通过 | 驳回（必须填写意见） | 已驳回（不展示） |
//! | 已驳回 | 重新提交 | 待审核（不展示） |
//! | 已通过 | 切换展示 | 已通过 |
//!
//! 对非「已通过」的试卷切换展示不做任何修改。

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::AuditError;
use crate::models::{AuditStatus, ExamAuditRecord};

/// 通过时未填写意见使用的默认文案
pub const DEFAULT_APPROVE_COMMENT: &str = "审核通过";

/// 审核操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditAction {
    /// 通过，意见可为空
    Approve { comment: String },
    /// 驳回，意见必填
    Reject { comment: String },
    /// 重新提交
    Resubmit,
    /// 切换前台展示
    ToggleDisplay,
}

impl AuditAction {
    pub fn approve(comment: impl Into<String>) -> Self {
        AuditAction::Approve {
            comment: comment.into(),
        }
    }

    pub fn reject(comment: impl Into<String>) -> Self {
        AuditAction::Reject {
            comment: comment.into(),
        }
    }

    /// 操作名称
    pub fn name(&self) -> &'static str {
        match self {
            AuditAction::Approve { .. } => "通过",
            AuditAction::Reject { .. } => "驳回",
            AuditAction::Resubmit => "重新提交",
            AuditAction::ToggleDisplay => "切换展示",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 一次操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 审核状态发生变化
    Applied { from: AuditStatus, to: AuditStatus },
    /// 展示开关被切换
    DisplayToggled { visible: bool },
    /// 操作被忽略，记录未变
    Ignored,
}

/// 校验通过后要写入记录的修改
enum Plan {
    /// 通过或驳回：写入审核人、时间、意见
    Review {
        to: AuditStatus,
        reviewer: String,
        comment: String,
        visible: bool,
    },
    /// 重新提交：只改状态，审核历史保留
    Resubmit,
    Flip,
    Ignore,
}

fn plan(
    record: &ExamAuditRecord,
    action: &AuditAction,
    reviewer: &str,
) -> Result<Plan, AuditError> {
    let from = record.audit_status;
    let invalid = || AuditError::InvalidTransition {
        id: record.id(),
        from,
        action: action.name(),
    };

    match action {
        AuditAction::Approve { comment } if from.is_reviewable() => {
            let comment = comment.trim();
            Ok(Plan::Review {
                to: AuditStatus::Approved,
                reviewer: require_reviewer(record, reviewer)?,
                comment: if comment.is_empty() {
                    DEFAULT_APPROVE_COMMENT.to_string()
                } else {
                    comment.to_string()
                },
                visible: true,
            })
        }
        AuditAction::Reject { comment } if from != AuditStatus::Rejected => {
            let comment = comment.trim();
            if comment.is_empty() {
                return Err(AuditError::EmptyRejectComment { id: record.id() });
            }
            Ok(Plan::Review {
                to: AuditStatus::Rejected,
                reviewer: require_reviewer(record, reviewer)?,
                comment: comment.to_string(),
                visible: false,
            })
        }
        AuditAction::Resubmit if from == AuditStatus::Rejected => Ok(Plan::Resubmit),
        AuditAction::ToggleDisplay if from == AuditStatus::Approved => Ok(Plan::Flip),
        AuditAction::ToggleDisplay => Ok(Plan::Ignore),
        _ => Err(invalid()),
    }
}

/// 校验操作是否可执行
///
/// 与 [`apply`] 使用同一套校验，包括审核人是否为空。
/// 切换展示在非「已通过」状态下虽然不会报错，但视为不可用。
pub fn check(
    record: &ExamAuditRecord,
    action: &AuditAction,
    reviewer: &str,
) -> Result<(), AuditError> {
    match plan(record, action, reviewer)? {
        Plan::Ignore => Err(AuditError::InvalidTransition {
            id: record.id(),
            from: record.audit_status,
            action: action.name(),
        }),
        _ => Ok(()),
    }
}

/// 对记录执行一次操作
///
/// 先完成全部校验再修改，失败时记录保持不变。
pub fn apply(
    record: &mut ExamAuditRecord,
    action: &AuditAction,
    reviewer: &str,
    now: NaiveDateTime,
) -> Result<Transition, AuditError> {
    let from = record.audit_status;

    let transition = match plan(record, action, reviewer)? {
        Plan::Ignore => {
            debug!("试卷 #{} 状态为「{}」，忽略切换展示", record.id(), from);
            Transition::Ignored
        }
        Plan::Flip => {
            record.can_display = !record.can_display;
            Transition::DisplayToggled {
                visible: record.can_display,
            }
        }
        Plan::Review {
            to,
            reviewer,
            comment,
            visible,
        } => {
            record.audit_status = to;
            record.reviewer = Some(reviewer);
            record.review_time = Some(now);
            record.review_comment = Some(comment);
            record.can_display = visible;
            Transition::Applied { from, to }
        }
        Plan::Resubmit => {
            record.audit_status = AuditStatus::PendingReview;
            record.can_display = false;
            Transition::Applied {
                from,
                to: AuditStatus::PendingReview,
            }
        }
    };

    enforce_display_gate(record);
    Ok(transition)
}

/// 非「已通过」的记录强制关闭展示，返回是否做了修正
pub fn enforce_display_gate(record: &mut ExamAuditRecord) -> bool {
    if record.can_display && record.audit_status != AuditStatus::Approved {
        record.can_display = false;
        return true;
    }
    false
}

fn require_reviewer(record: &ExamAuditRecord, reviewer: &str) -> Result<String, AuditError> {
    let reviewer = reviewer.trim();
    if reviewer.is_empty() {
        return Err(AuditError::MissingReviewer { id: record.id() });
    }
    Ok(reviewer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn record(status: AuditStatus) -> ExamAuditRecord {
        ExamAuditRecord::new(2, "CSP-S 2023 第二轮", "CCF", "C++", "提高", 2023, 4).with_status(status)
    }

    fn approved_and_shown() -> ExamAuditRecord {
        let mut r = record(AuditStatus::PendingReview);
        r.apply(&AuditAction::approve(""), "张老师", now()).unwrap();
        r
    }

    fn assert_gate(r: &ExamAuditRecord) {
        assert!(!r.can_display() || r.audit_status() == AuditStatus::Approved);
    }

    #[test]
    fn test_approve_with_blank_comment_uses_default() {
        let mut r = record(AuditStatus::PendingReview);
        let t = r.apply(&AuditAction::approve("   "), "张老师", now()).unwrap();

        assert_eq!(
            t,
            Transition::Applied {
                from: AuditStatus::PendingReview,
                to: AuditStatus::Approved
            }
        );
        assert_eq!(r.audit_status(), AuditStatus::Approved);
        assert_eq!(r.review_comment(), Some(DEFAULT_APPROVE_COMMENT));
        assert_eq!(r.reviewer(), Some("张老师"));
        assert_eq!(r.review_time(), Some(now()));
        assert!(r.can_display());
    }

    #[test]
    fn test_approve_from_in_review_trims_comment() {
        let mut r = record(AuditStatus::InReview);
        r.apply(&AuditAction::approve("  题目质量好 "), "李老师", now()).unwrap();
        assert_eq!(r.review_comment(), Some("题目质量好"));
        assert_gate(&r);
    }

    #[test]
    fn test_reject_with_blank_comment_is_refused() {
        let mut r = record(AuditStatus::PendingReview);
        let before = r.clone();

        let err = r.apply(&AuditAction::reject(" \t "), "张老师", now()).unwrap_err();
        assert_eq!(err, AuditError::EmptyRejectComment { id: 2 });
        assert_eq!(r, before);
        assert!(!r.can_apply(&AuditAction::reject(""), "张老师"));
        assert!(r.can_apply(&AuditAction::reject("需要调整"), "张老师"));
    }

    #[test]
    fn test_reject_approved_record_hides_it() {
        let mut r = approved_and_shown();
        assert!(r.can_display());

        let t = r.apply(&AuditAction::reject("发现错题"), "王老师", now()).unwrap();
        assert_eq!(
            t,
            Transition::Applied {
                from: AuditStatus::Approved,
                to: AuditStatus::Rejected
            }
        );
        assert_eq!(r.audit_status(), AuditStatus::Rejected);
        assert_eq!(r.review_comment(), Some("发现错题"));
        assert_eq!(r.reviewer(), Some("王老师"));
        assert!(!r.can_display());
    }

    #[test]
    fn test_reject_then_resubmit_keeps_history() {
        let mut r = record(AuditStatus::PendingReview);
        r.apply(&AuditAction::reject("需要调整"), "张老师", now()).unwrap();
        assert_eq!(r.audit_status(), AuditStatus::Rejected);
        assert_eq!(r.review_comment(), Some("需要调整"));
        assert!(!r.can_display());

        let t = r.apply(&AuditAction::Resubmit, "张老师", now()).unwrap();
        assert_eq!(
            t,
            Transition::Applied {
                from: AuditStatus::Rejected,
                to: AuditStatus::PendingReview
            }
        );
        assert_eq!(r.audit_status(), AuditStatus::PendingReview);
        assert_eq!(r.review_comment(), Some("需要调整"));
        assert_eq!(r.reviewer(), Some("张老师"));
        assert!(!r.can_display());
    }

    #[test]
    fn test_toggle_display_only_flips_approved() {
        let mut r = approved_and_shown();
        assert_eq!(
            r.apply(&AuditAction::ToggleDisplay, "张老师", now()).unwrap(),
            Transition::DisplayToggled { visible: false }
        );
        assert_eq!(
            r.apply(&AuditAction::ToggleDisplay, "张老师", now()).unwrap(),
            Transition::DisplayToggled { visible: true }
        );
        assert_eq!(r.audit_status(), AuditStatus::Approved);

        for status in [
            AuditStatus::PendingReview,
            AuditStatus::InReview,
            AuditStatus::Rejected,
        ] {
            let mut r = record(status);
            let before = r.clone();
            assert!(!r.can_apply(&AuditAction::ToggleDisplay, "张老师"));
            assert_eq!(
                r.apply(&AuditAction::ToggleDisplay, "张老师", now()).unwrap(),
                Transition::Ignored
            );
            assert_eq!(r, before);
        }
    }

    #[test]
    fn test_invalid_transitions_leave_record_unchanged() {
        let cases = [
            (AuditStatus::Rejected, AuditAction::approve("ok")),
            (AuditStatus::Approved, AuditAction::approve("ok")),
            (AuditStatus::PendingReview, AuditAction::Resubmit),
            (AuditStatus::InReview, AuditAction::Resubmit),
            (AuditStatus::Approved, AuditAction::Resubmit),
            (AuditStatus::Rejected, AuditAction::reject("again")),
        ];

        for (status, action) in cases {
            let mut r = record(status);
            let before = r.clone();
            assert!(!r.can_apply(&action, "张老师"), "{:?} / {:?}", status, action);
            let err = r.apply(&action, "张老师", now()).unwrap_err();
            assert!(matches!(err, AuditError::InvalidTransition { from, .. } if from == status));
            assert_eq!(r, before);
        }
    }

    #[test]
    fn test_missing_reviewer_is_refused() {
        let mut r = record(AuditStatus::PendingReview);
        let before = r.clone();
        let err = r.apply(&AuditAction::approve(""), "  ", now()).unwrap_err();
        assert_eq!(err, AuditError::MissingReviewer { id: 2 });
        assert_eq!(r, before);
    }

    #[test]
    fn test_can_apply_agrees_with_apply_on_blank_reviewer() {
        let r = record(AuditStatus::PendingReview);
        assert!(!r.can_apply(&AuditAction::approve(""), ""));
        assert!(!r.can_apply(&AuditAction::reject("需要调整"), " "));
        assert!(r.can_apply(&AuditAction::approve(""), "张老师"));

        let mut rejected = record(AuditStatus::Rejected);
        assert!(rejected.can_apply(&AuditAction::Resubmit, ""));
        rejected.apply(&AuditAction::Resubmit, "", now()).unwrap();
        assert_eq!(rejected.audit_status(), AuditStatus::PendingReview);
    }

    #[test]
    fn test_display_gate_holds_after_every_action() {
        let actions = [
            AuditAction::approve(""),
            AuditAction::ToggleDisplay,
            AuditAction::reject("x"),
            AuditAction::Resubmit,
            AuditAction::ToggleDisplay,
        ];
        for status in AuditStatus::ALL {
            let mut r = record(status);
            for _ in 0..3 {
                for action in &actions {
                    let _ = r.apply(action, "张老师", now());
                    assert_gate(&r);
                }
            }
        }
    }

    #[test]
    fn test_enforce_display_gate_repairs_direct_edits() {
        let mut r = record(AuditStatus::Rejected);
        r.can_display = true;
        assert!(enforce_display_gate(&mut r));
        assert!(!r.can_display());
        assert!(!enforce_display_gate(&mut r));
    }
}
