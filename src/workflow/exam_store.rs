//! 试卷审核仓库 - 流程层
//!
//! 持有全部试卷记录和列表分页状态，界面只通过这里的方法读取和修改数据：
//! - 审核操作统一经过 `services::audit` 的状态机
//! - 列表视图 = 筛选 → 分页

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::error::{AppError, AppResult, BusinessError};
use crate::models::{AuditStatus, ExamAuditRecord};
use crate::services::audit::{self, AuditAction, Transition};
use crate::services::pagination::{Page, Paginator};
use crate::workflow::filter::ExamFilter;

/// 各审核状态的数量统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    pub total: usize,
    pub pending_review: usize,
    pub in_review: usize,
    pub approved: usize,
    pub rejected: usize,
    /// 前台展示中的数量
    pub displayed: usize,
}

/// 试卷审核仓库
pub struct ExamAuditStore {
    records: Vec<ExamAuditRecord>,
    paginator: Paginator,
    filter: ExamFilter,
    reviewer: String,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn validate_reviewer(reviewer: String) -> AppResult<String> {
    let trimmed = reviewer.trim();
    if trimmed.is_empty() {
        return Err(BusinessError::BlankReviewer.into());
    }
    Ok(trimmed.to_string())
}

impl ExamAuditStore {
    /// 创建仓库
    ///
    /// # 参数
    /// - `records`: 初始记录，ID 必须唯一
    /// - `page_size`: 每页条数
    /// - `reviewer`: 当前操作人，不能为空
    pub fn new(
        mut records: Vec<ExamAuditRecord>,
        page_size: usize,
        reviewer: impl Into<String>,
    ) -> AppResult<Self> {
        let reviewer = validate_reviewer(reviewer.into())?;

        let mut seen = HashSet::with_capacity(records.len());
        for record in records.iter_mut() {
            if !seen.insert(record.id()) {
                return Err(BusinessError::DuplicateRecordId { id: record.id() }.into());
            }
            if audit::enforce_display_gate(record) {
                warn!("⚠️ 试卷 #{} 未通过审核却处于展示状态，已关闭展示", record.id());
            }
        }

        let paginator = Paginator::for_len(records.len(), page_size);
        Ok(Self {
            records,
            paginator,
            filter: ExamFilter::all(),
            reviewer,
            clock: local_now,
        })
    }

    /// 替换审核时间来源
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    /// 切换当前操作人
    pub fn set_reviewer(&mut self, reviewer: impl Into<String>) -> AppResult<()> {
        self.reviewer = validate_reviewer(reviewer.into())?;
        info!("👤 当前审核人: {}", self.reviewer);
        Ok(())
    }

    pub fn records(&self) -> &[ExamAuditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按ID查找试卷
    pub fn get(&self, id: u64) -> AppResult<&ExamAuditRecord> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::record_not_found(id))
    }

    /// 该操作当前是否可用
    pub fn can_apply(&self, id: u64, action: &AuditAction) -> AppResult<bool> {
        Ok(self.get(id)?.can_apply(action, &self.reviewer))
    }

    /// 对指定试卷执行审核操作
    pub fn dispatch(&mut self, id: u64, action: &AuditAction) -> AppResult<Transition> {
        let now = (self.clock)();
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::record_not_found(id))?;

        let transition = match record.apply(action, &self.reviewer, now) {
            Ok(t) => t,
            Err(e) => {
                warn!("❌ {}", e);
                return Err(e.into());
            }
        };

        match transition {
            Transition::Applied { from, to } => {
                info!(
                    "✓ 试卷 #{} {}: 「{}」→「{}」 (审核人: {})",
                    id, action, from, to, self.reviewer
                );
            }
            Transition::DisplayToggled { visible } => {
                info!(
                    "✓ 试卷 #{} 前台展示已{}",
                    id,
                    if visible { "开启" } else { "关闭" }
                );
            }
            Transition::Ignored => {
                info!("试卷 #{} 未通过审核，忽略切换展示", id);
            }
        }

        // 状态变化可能让记录移出当前筛选结果
        self.sync_paginator();
        Ok(transition)
    }

    /// 审核通过，意见为空时使用默认文案
    pub fn approve(&mut self, id: u64, comment: &str) -> AppResult<Transition> {
        self.dispatch(id, &AuditAction::approve(comment))
    }

    /// 驳回，意见必填
    pub fn reject(&mut self, id: u64, comment: &str) -> AppResult<Transition> {
        self.dispatch(id, &AuditAction::reject(comment))
    }

    /// 重新提交被驳回的试卷
    pub fn resubmit(&mut self, id: u64) -> AppResult<Transition> {
        self.dispatch(id, &AuditAction::Resubmit)
    }

    /// 切换前台展示
    pub fn toggle_display(&mut self, id: u64) -> AppResult<Transition> {
        self.dispatch(id, &AuditAction::ToggleDisplay)
    }

    pub fn filter(&self) -> &ExamFilter {
        &self.filter
    }

    /// 修改筛选条件并回到第一页
    pub fn set_filter(&mut self, filter: ExamFilter) {
        info!("🔍 筛选条件: {}", filter);
        self.filter = filter;
        self.paginator.reset();
        self.sync_paginator();
    }

    /// 筛选后的全部记录
    pub fn visible(&self) -> Vec<&ExamAuditRecord> {
        self.records.iter().filter(|r| self.filter.matches(r)).collect()
    }

    /// 当前页
    pub fn current_page(&self) -> Page<&ExamAuditRecord> {
        let visible = self.visible();
        self.paginator.page(&visible).map(|r| *r)
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn set_page(&mut self, page: i64) {
        self.paginator.set_page(page);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.paginator.set_page_size(size);
    }

    pub fn next_page(&mut self) {
        self.paginator.next_page();
    }

    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
    }

    /// 各状态数量统计（不受筛选条件影响）
    pub fn stats(&self) -> AuditStats {
        let mut stats = AuditStats {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.audit_status() {
                AuditStatus::PendingReview => stats.pending_review += 1,
                AuditStatus::InReview => stats.in_review += 1,
                AuditStatus::Approved => stats.approved += 1,
                AuditStatus::Rejected => stats.rejected += 1,
            }
            if record.can_display() {
                stats.displayed += 1;
            }
        }
        stats
    }

    fn sync_paginator(&mut self) {
        let count = self.records.iter().filter(|r| self.filter.matches(r)).count();
        self.paginator.resize(count);
    }
}
