/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::AuditStats;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug / info 级别。
/// 重复调用不会报错（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 CodeQuest 试卷审核台启动");
    info!("👤 当前审核人: {}", config.reviewer_name);
    info!("📄 每页条数: {}", config.page_size);
    info!("📁 种子数据: {}", config.seed_file);
    info!("{}", "=".repeat(60));
}

/// 打印审核统计
pub fn log_stats(stats: &AuditStats) {
    info!("{}", "─".repeat(60));
    info!("📊 试卷总数: {}", stats.total);
    info!(
        "⏳ 待审核: {} | 🔎 审核中: {} | ✅ 已通过: {} | ❌ 已驳回: {}",
        stats.pending_review, stats.in_review, stats.approved, stats.rejected
    );
    info!("👁 前台展示: {}", stats.displayed);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars_not_bytes() {
        assert_eq!(truncate_text("信息学奥赛", 2), "信息...");
        assert_eq!(truncate_text("NOI", 5), "NOI");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
