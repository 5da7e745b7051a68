//! 控制台命令解析

use crate::error::CommandError;
use crate::models::AuditStatus;

/// 控制台命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Page(i64),
    PageSize(usize),
    Next,
    Prev,
    /// `None` 表示全部状态
    Filter {
        status: Option<AuditStatus>,
        keyword: String,
    },
    /// 保留状态筛选，只修改关键字
    Search(String),
    Show(u64),
    Approve { id: u64, comment: String },
    Reject { id: u64, comment: String },
    Resubmit(u64),
    Toggle(u64),
    /// 切换当前操作人
    Reviewer(String),
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "\
可用命令:
  list                          显示当前页
  page <n> / next / prev        翻页
  size <n>                      修改每页条数
  filter <状态|all> [关键字]    按状态筛选 (pending_review / in_review / approved / rejected)
  search [关键字]               按标题、赛事、科目搜索
  show <id>                     以 JSON 显示试卷详情
  approve <id> [意见]           审核通过
  reject <id> <意见>            驳回（意见必填）
  resubmit <id>                 重新提交被驳回的试卷
  toggle <id>                   切换前台展示（仅已通过）
  reviewer <姓名>                切换当前审核人
  stats                         审核统计
  help / quit";

impl Command {
    /// 解析一行输入
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "list" | "ls" => Ok(Command::List),
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "stats" => Ok(Command::Stats),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "page" => Ok(Command::Page(parse_page(required(rest, "page", "n")?)?)),
            "reviewer" => Ok(Command::Reviewer(required(rest, "reviewer", "姓名")?.to_string())),
            "size" => Ok(Command::PageSize(parse_number(required(rest, "size", "n")?)?)),
            "filter" => {
                let (status, keyword) = split_first(required(rest, "filter", "状态")?);
                let status = match status.to_lowercase().as_str() {
                    "all" | "全部" => None,
                    other => Some(AuditStatus::parse(other).ok_or_else(|| {
                        CommandError::InvalidStatus {
                            value: status.to_string(),
                        }
                    })?),
                };
                Ok(Command::Filter {
                    status,
                    keyword: keyword.to_string(),
                })
            }
            "search" => Ok(Command::Search(rest.to_string())),
            "show" => Ok(Command::Show(parse_id(rest, "show")?)),
            "resubmit" => Ok(Command::Resubmit(parse_id(rest, "resubmit")?)),
            "toggle" => Ok(Command::Toggle(parse_id(rest, "toggle")?)),
            "approve" => {
                let (id, comment) = split_first(required(rest, "approve", "id")?);
                Ok(Command::Approve {
                    id: parse_number(id)?,
                    comment: comment.to_string(),
                })
            }
            // 意见为空时仍然解析成功，由审核流程拒绝
            "reject" => {
                let (id, comment) = split_first(required(rest, "reject", "id")?);
                Ok(Command::Reject {
                    id: parse_number(id)?,
                    comment: comment.to_string(),
                })
            }
            _ => Err(CommandError::Unknown {
                command: head.to_string(),
            }),
        }
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

fn split_first(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (s, ""),
    }
}

fn parse_id(rest: &str, command: &'static str) -> Result<u64, CommandError> {
    let (id, _) = split_first(required(rest, command, "id")?);
    parse_number(id)
}

/// 页码超出 i64 范围时饱和，交给分页器夹紧
fn parse_page(value: &str) -> Result<i64, CommandError> {
    if let Ok(page) = value.parse::<i64>() {
        return Ok(page);
    }
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(if negative { i64::MIN } else { i64::MAX })
    } else {
        Err(CommandError::InvalidNumber {
            value: value.to_string(),
        })
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        value: value.to_string(),
    })
}
