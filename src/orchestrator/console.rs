//! 审核控制台 - 编排层
//!
//! 充当界面层：读取一行命令，调用仓库方法，渲染文本结果。
//! 自身不做任何审核判断。

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{load_seed_file, AuditStatus, ExamAuditRecord};
use crate::orchestrator::command::{Command, HELP};
use crate::services::audit::{AuditAction, Transition};
use crate::utils::logging;
use crate::workflow::{ExamAuditStore, ExamFilter};

/// 命令执行后的去向
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 输出文本，继续读取
    Continue(String),
    /// 退出
    Quit,
}

/// 应用主结构
pub struct App {
    store: ExamAuditStore,
}

impl App {
    /// 初始化应用：加载种子数据并创建仓库
    pub async fn initialize(config: &Config) -> Result<Self> {
        logging::log_startup(config);

        let records = load_seed_file(Path::new(&config.seed_file))
            .await
            .with_context(|| format!("无法加载试卷数据: {}", config.seed_file))?;

        if records.is_empty() {
            warn!("⚠️ 种子文件中没有试卷");
        }

        Ok(Self::with_records(records, config)?)
    }

    /// 使用已有记录创建应用
    pub fn with_records(records: Vec<ExamAuditRecord>, config: &Config) -> AppResult<Self> {
        let store = ExamAuditStore::new(records, config.page_size, config.reviewer_name.clone())?;
        Ok(Self { store })
    }

    pub fn store(&self) -> &ExamAuditStore {
        &self.store
    }

    /// 逐行读取标准输入直到 quit 或 EOF
    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        stdout.write_all(self.render_page().as_bytes()).await?;
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                stdout.write_all(b"> ").await?;
                stdout.flush().await?;
                continue;
            }

            match self.execute_line(&line) {
                Outcome::Quit => break,
                Outcome::Continue(text) => {
                    stdout.write_all(text.as_bytes()).await?;
                    stdout.write_all(b"\n> ").await?;
                    stdout.flush().await?;
                }
            }
        }

        logging::log_stats(&self.store.stats());
        info!("👋 审核台已退出");
        Ok(())
    }

    /// 解析并执行一行命令，错误会渲染为文本
    pub fn execute_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(e) => Outcome::Continue(format!("⚠️ {}", e)),
        }
    }

    /// 执行命令
    pub fn execute(&mut self, command: Command) -> Outcome {
        let text = match command {
            Command::Quit => return Outcome::Quit,
            Command::Help => help_text(),
            Command::Reviewer(name) => match self.store.set_reviewer(name) {
                Ok(()) => format!("✓ 当前审核人: {}", self.store.reviewer()),
                Err(e) => format!("⚠️ {}", e),
            },
            Command::List => self.render_page(),
            Command::Page(n) => {
                self.store.set_page(n);
                self.render_page()
            }
            Command::PageSize(n) => {
                self.store.set_page_size(n);
                self.render_page()
            }
            Command::Next => {
                self.store.next_page();
                self.render_page()
            }
            Command::Prev => {
                self.store.prev_page();
                self.render_page()
            }
            Command::Filter { status, keyword } => {
                let filter = ExamFilter {
                    status,
                    keyword: None,
                }
                .keyword(keyword);
                self.store.set_filter(filter);
                self.render_page()
            }
            Command::Search(keyword) => {
                let filter = self.store.filter().clone().keyword(keyword);
                self.store.set_filter(filter);
                self.render_page()
            }
            Command::Show(id) => match self.store.get(id) {
                Ok(record) => serde_json::to_string_pretty(record)
                    .unwrap_or_else(|e| format!("⚠️ 序列化失败: {}", e)),
                Err(e) => format!("⚠️ {}", e),
            },
            Command::Approve { id, comment } => self.run_action(id, AuditAction::approve(comment)),
            Command::Reject { id, comment } => self.run_action(id, AuditAction::reject(comment)),
            Command::Resubmit(id) => self.run_action(id, AuditAction::Resubmit),
            Command::Toggle(id) => self.run_action(id, AuditAction::ToggleDisplay),
            Command::Stats => {
                let stats = self.store.stats();
                format!(
                    "总数 {} | 待审核 {} | 审核中 {} | 已通过 {} | 已驳回 {} | 展示中 {}",
                    stats.total,
                    stats.pending_review,
                    stats.in_review,
                    stats.approved,
                    stats.rejected,
                    stats.displayed
                )
            }
        };
        Outcome::Continue(text)
    }

    fn run_action(&mut self, id: u64, action: AuditAction) -> String {
        match self.store.dispatch(id, &action) {
            Ok(Transition::Applied { from, to }) => {
                format!("✓ 试卷 #{} {}: {} → {}", id, action, from, to)
            }
            Ok(Transition::DisplayToggled { visible }) => format!(
                "✓ 试卷 #{} 前台展示: {}",
                id,
                if visible { "开启" } else { "关闭" }
            ),
            Ok(Transition::Ignored) => format!("试卷 #{} 未通过审核，不能切换展示", id),
            Err(e) => format!("⚠️ {}", e),
        }
    }

    /// 渲染当前页
    pub fn render_page(&self) -> String {
        let page = self.store.current_page();
        let mut out = format!(
            "{} 第 {}/{} 页 · 共 {} 条 · 每页 {} 条\n",
            self.store.filter(),
            page.page_number,
            page.pages_available.max(1),
            page.total_count,
            page.page_size
        );

        if page.page_items.is_empty() {
            out.push_str("  (没有符合条件的试卷)");
            return out;
        }

        for record in &page.page_items {
            out.push_str(&render_row(record, self.store.reviewer()));
            out.push('\n');
        }
        out.pop();
        out
    }
}

/// 标题最多显示的字符数
const TITLE_WIDTH: usize = 24;

/// 渲染一行试卷：状态在前，只截断标题
fn render_row(record: &ExamAuditRecord, reviewer: &str) -> String {
    format!(
        "  #{} {}{} {} [{} · {} · {} · {}年 · {}题]  {}",
        record.id(),
        record.audit_status(),
        if record.can_display() { " 👁" } else { "" },
        logging::truncate_text(record.title(), TITLE_WIDTH),
        record.contest(),
        record.subject(),
        record.level(),
        record.year(),
        record.total_questions(),
        available_actions(record, reviewer)
    )
}

/// 列出当前可用的操作，对应界面上启用的按钮
fn available_actions(record: &ExamAuditRecord, reviewer: &str) -> String {
    let candidates = [
        AuditAction::approve(""),
        // 任意非空意见，仅用于判断按钮是否可用
        AuditAction::reject("-"),
        AuditAction::Resubmit,
        AuditAction::ToggleDisplay,
    ];
    let names: Vec<&str> = candidates
        .iter()
        .filter(|action| record.can_apply(action, reviewer))
        .map(|action| action.name())
        .collect();

    if names.is_empty() {
        String::new()
    } else {
        format!("[{}]", names.join(" / "))
    }
}

/// 帮助文本，附带可用的状态代码
fn help_text() -> String {
    let codes: Vec<String> = AuditStatus::ALL
        .iter()
        .map(|s| format!("{} ({})", s.code(), s.label()))
        .collect();
    format!("{}\n状态代码: {}", HELP, codes.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let records = (1..=12)
            .map(|id| ExamAuditRecord::new(id, format!("周赛 {}", id), "CodeQuest", "C++", "普及", 2024, 5))
            .collect();
        App::with_records(records, &Config::default()).unwrap()
    }

    fn text(outcome: Outcome) -> String {
        match outcome {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_render_page_shows_header_and_actions() {
        let app = app();
        let page = app.render_page();
        assert!(page.starts_with("[状态: 全部] 第 1/2 页 · 共 12 条 · 每页 10 条"));
        assert!(page.contains("[通过 / 驳回]"));
        assert_eq!(page.lines().count(), 11);
    }

    #[test]
    fn test_reject_without_comment_is_reported() {
        let mut app = app();
        let out = text(app.execute_line("reject 3"));
        assert!(out.contains("驳回意见不能为空"));
        assert_eq!(app.store().get(3).unwrap().audit_status(), AuditStatus::PendingReview);
    }

    #[test]
    fn test_full_review_cycle_through_commands() {
        let mut app = app();
        assert!(text(app.execute_line("reject 2 需要调整")).contains("待审核 → 已驳回"));
        assert!(text(app.execute_line("toggle 2")).contains("不能切换展示"));
        assert!(text(app.execute_line("resubmit 2")).contains("已驳回 → 待审核"));
        assert!(text(app.execute_line("approve 2")).contains("待审核 → 已通过"));
        assert!(text(app.execute_line("toggle 2")).contains("关闭"));

        let show = text(app.execute_line("show 2"));
        let json: serde_json::Value = serde_json::from_str(&show).unwrap();
        assert_eq!(json["auditStatus"], "approved");
        assert_eq!(json["reviewComment"], "审核通过");
        assert_eq!(json["canDisplay"], false);
    }

    #[test]
    fn test_paging_and_filter_commands() {
        let mut app = app();
        assert!(text(app.execute_line("page 9")).contains("第 2/2 页"));
        assert!(text(app.execute_line("page -99999999999999999999")).contains("第 1/2 页"));
        assert!(text(app.execute_line("page 99999999999999999999")).contains("第 2/2 页"));
        assert!(text(app.execute_line("size 5")).contains("第 2/3 页"));
        app.execute_line("approve 1");
        let out = text(app.execute_line("filter approved"));
        assert!(out.contains("第 1/1 页 · 共 1 条"));
        let out = text(app.execute_line("search 不存在"));
        assert!(out.contains("没有符合条件的试卷"));
    }

    #[test]
    fn test_long_title_keeps_status_visible() {
        let mut record = ExamAuditRecord::new(
            1,
            "全国青少年信息学奥林匹克联赛 2023 提高组复赛模拟",
            "CCF",
            "C++",
            "提高",
            2023,
            4,
        );
        record
            .apply(&AuditAction::reject("需要调整"), "张老师", chrono::Local::now().naive_local())
            .unwrap();
        let mut app = App::with_records(vec![record], &Config::default()).unwrap();

        let page = text(app.execute_line("list"));
        assert!(page.contains("#1 已驳回 全国青少年信息学奥林匹克联赛"));
        assert!(page.contains("..."));
        assert!(page.contains("2023年 · 4题"));
        assert!(page.contains("[重新提交]"));
    }

    #[test]
    fn test_reviewer_command_switches_operator() {
        let mut app = app();
        assert!(text(app.execute_line("reviewer 李老师")).contains("李老师"));
        app.execute_line("approve 1");
        assert_eq!(app.store().get(1).unwrap().reviewer(), Some("李老师"));

        let out = text(app.execute_line("reviewer"));
        assert!(out.contains("缺少参数"));
        assert_eq!(app.store().reviewer(), "李老师");
    }

    #[test]
    fn test_help_lists_status_codes() {
        let mut app = app();
        let help = text(app.execute_line("help"));
        for status in AuditStatus::ALL {
            assert!(help.contains(status.code()));
        }
    }

    #[test]
    fn test_parse_errors_and_quit() {
        let mut app = app();
        assert!(text(app.execute_line("frobnicate")).contains("未知命令"));
        assert!(text(app.execute_line("show 404")).contains("不存在"));
        assert_eq!(app.execute_line("quit"), Outcome::Quit);
    }
}
