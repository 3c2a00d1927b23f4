// 错误处理系统
// 统一的错误类型：数据加载失败直接上报，图表引擎错误降级为占位图

use std::{fmt, error::Error as StdError, io};
use serde::{Serialize, Deserialize};

// 仪表盘错误类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DashboardError {
    // 引擎错误 (可降级)
    NotFound(String),
    UnknownType(String),
    EmptySelection(String),
    EmptyPopulation(String),

    // 数据源错误
    Data(String),
    Database(String),

    // 配置错误
    ConfigError(String),

    // I/O错误
    FileError(String),
    ParseError(String),

    // 通用错误
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::NotFound(msg) => write!(f, "记录未找到: {}", msg),
            DashboardError::UnknownType(msg) => write!(f, "未知属性: {}", msg),
            DashboardError::EmptySelection(msg) => write!(f, "选择为空: {}", msg),
            DashboardError::EmptyPopulation(msg) => write!(f, "种群为空: {}", msg),

            DashboardError::Data(msg) => write!(f, "数据错误: {}", msg),
            DashboardError::Database(msg) => write!(f, "数据库错误: {}", msg),

            DashboardError::ConfigError(msg) => write!(f, "配置错误: {}", msg),

            DashboardError::FileError(msg) => write!(f, "文件错误: {}", msg),
            DashboardError::ParseError(msg) => write!(f, "解析错误: {}", msg),

            DashboardError::InvalidInput(msg) => write!(f, "输入无效: {}", msg),
        }
    }
}

impl StdError for DashboardError {}

// 错误转换实现
impl From<io::Error> for DashboardError {
    fn from(error: io::Error) -> Self {
        DashboardError::FileError(error.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(error: serde_json::Error) -> Self {
        DashboardError::ParseError(error.to_string())
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(error: toml::de::Error) -> Self {
        DashboardError::ConfigError(error.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(error: csv::Error) -> Self {
        DashboardError::Data(error.to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for DashboardError {
    fn from(error: rusqlite::Error) -> Self {
        DashboardError::Database(error.to_string())
    }
}

// 错误创建辅助宏
#[macro_export]
macro_rules! dashboard_error {
    ($variant:ident, $msg:expr) => {
        $crate::DashboardError::$variant($msg.to_string())
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::DashboardError::$variant(format!($fmt, $($arg)*))
    };
}

// 错误恢复策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRecovery {
    Placeholder,
    Skip,
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DashboardError::EmptySelection(_) => ErrorSeverity::Low,
            DashboardError::NotFound(_) | DashboardError::UnknownType(_) => ErrorSeverity::Medium,
            DashboardError::EmptyPopulation(_) | DashboardError::InvalidInput(_) => ErrorSeverity::Medium,
            DashboardError::ConfigError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_strategy(&self) -> ErrorRecovery {
        match self {
            DashboardError::NotFound(_)
            | DashboardError::UnknownType(_)
            | DashboardError::EmptySelection(_)
            | DashboardError::EmptyPopulation(_) => ErrorRecovery::Placeholder,
            DashboardError::InvalidInput(_) => ErrorRecovery::Skip,
            _ => ErrorRecovery::Abort,
        }
    }

    // 引擎错误绝不终止进程
    pub fn is_recoverable(&self) -> bool {
        self.recovery_strategy() != ErrorRecovery::Abort
    }
}
