use crate::error::{AppResult, ConfigError};
use crate::services::pagination::DEFAULT_PAGE_SIZE;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 列表每页条数
    pub page_size: usize,
    /// 当前操作人（暂无登录，使用占位名称）
    pub reviewer_name: String,
    /// 试卷种子数据文件
    pub seed_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            reviewer_name: "管理员".to_string(),
            seed_file: "data/exams.toml".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源读取配置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let default = Self::default();

        let page_size = match lookup("DEFAULT_PAGE_SIZE") {
            Some(v) => parse_var("DEFAULT_PAGE_SIZE", &v, "正整数")?,
            None => default.page_size,
        };
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_PAGE_SIZE".to_string(),
                reason: "每页条数必须大于 0".to_string(),
            }
            .into());
        }

        let reviewer_name = lookup("REVIEWER_NAME").unwrap_or(default.reviewer_name);
        if reviewer_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "REVIEWER_NAME".to_string(),
                reason: "审核人不能为空".to_string(),
            }
            .into());
        }

        let verbose_logging = match lookup("VERBOSE_LOGGING") {
            Some(v) => parse_var("VERBOSE_LOGGING", &v, "布尔值")?,
            None => default.verbose_logging,
        };

        Ok(Self {
            page_size,
            reviewer_name,
            seed_file: lookup("SEED_FILE").unwrap_or(default.seed_file),
            verbose_logging,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var_name: &str, value: &str, expected_type: &str) -> AppResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        }
        .into()
    })
}
