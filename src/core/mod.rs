// 核心模块 - 错误处理与配置管理

pub mod config;
pub mod error;

// 重新导出核心类型
pub use config::{
    AssetConfig, ConfigManager, DashboardConfig, DataConfig, DistributionConfig, MatchupConfig,
    RadarConfig,
};
pub use error::{DashboardError, ErrorRecovery, ErrorSeverity, Result};
