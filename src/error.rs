use crate::models::AuditStatus;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 审核流转错误
    #[error("审核错误: {0}")]
    Audit(#[from] AuditError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 控制台命令错误
    #[error("命令错误: {0}")]
    Command(#[from] CommandError),
}

/// 审核流转错误
///
/// 出现这些错误时记录保持原样，不会发生部分修改
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// 驳回时未填写意见
    #[error("试卷 #{id} 驳回失败: 驳回意见不能为空")]
    EmptyRejectComment { id: u64 },
    /// 审核人为空
    #[error("试卷 #{id} 审核失败: 缺少审核人")]
    MissingReviewer { id: u64 },
    /// 当前状态不允许该操作
    #[error("试卷 #{id} 当前状态为「{from}」，不能执行「{action}」")]
    InvalidTransition {
        id: u64,
        from: AuditStatus,
        action: &'static str,
    },
}

/// 业务逻辑错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessError {
    /// 试卷不存在
    #[error("试卷 #{id} 不存在")]
    RecordNotFound { id: u64 },
    /// 试卷ID重复
    #[error("试卷ID #{id} 重复")]
    DuplicateRecordId { id: u64 },
    /// 审核人为空
    #[error("审核人不能为空")]
    BlankReviewer,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置值不合法
    #[error("配置项 {name} 不合法: {reason}")]
    InvalidValue { name: String, reason: String },
}

/// 控制台命令错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// 空命令
    #[error("命令为空")]
    Empty,
    /// 未知命令
    #[error("未知命令: {command}，输入 help 查看帮助")]
    Unknown { command: String },
    /// 缺少参数
    #[error("命令 {command} 缺少参数 <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    /// 数字参数无法解析
    #[error("无法解析数字: {value}")]
    InvalidNumber { value: String },
    /// 状态参数无法解析
    #[error("未知审核状态: {value}")]
    InvalidStatus { value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建试卷不存在错误
    pub fn record_not_found(id: u64) -> Self {
        AppError::Business(BusinessError::RecordNotFound { id })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为被拒绝的审核操作（界面上应视为按钮不可用）
    pub fn is_refused_action(&self) -> bool {
        matches!(self, AppError::Audit(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_error_message_names_status_and_action() {
        let err = AppError::from(AuditError::InvalidTransition {
            id: 7,
            from: AuditStatus::Approved,
            action: "重新提交",
        });
        let msg = err.to_string();
        assert!(msg.contains("#7"));
        assert!(msg.contains("已通过"));
        assert!(msg.contains("重新提交"));
        assert!(err.is_refused_action());
    }

    #[test]
    fn test_not_found_is_not_a_refused_action() {
        let err = AppError::record_not_found(3);
        assert_eq!(err.to_string(), "业务错误: 试卷 #3 不存在");
        assert!(!err.is_refused_action());
    }
}
