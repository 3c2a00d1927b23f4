// 道馆领袖对战仪表盘库入口
// 数据仓库 -> 三个分析引擎 (雷达图、分布图、属性相克网格) -> 与渲染无关的图表描述

// 核心模块 - 始终可用
pub mod core;
pub mod pokemon;
pub mod data;
pub mod charts;

// 重新导出核心类型
pub use crate::core::{ConfigManager, DashboardConfig, DashboardError, Result};
pub use crate::pokemon::{BaseStats, CreatureRecord, PokemonType, StatKind, TeamRecord, TypeChart, TYPE_CHART};
pub use crate::data::StatRepository;
pub use crate::charts::{Dashboard, DashboardPayload, Figure, Selection};

// 版本信息
pub const VERSION: &str = "0.1.0";
pub const NAME: &str = "leader_dashboard";

// 仪表盘常量
pub mod constants {
    // 用户队伍槽位数
    pub const MAX_SLOTS: usize = 6;
    // 分布图同值错开步长
    pub const DEFAULT_OFFSET_STEP: f64 = 0.5;
}

// 便利函数
pub fn init() -> Result<()> {
    // 初始化日志系统
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "leader_dashboard=info");
    }

    // 重复初始化 (例如测试中) 不视为错误
    let _ = env_logger::try_init();

    log::info!("仪表盘初始化完成 v{}", VERSION);
    Ok(())
}
