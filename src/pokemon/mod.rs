// Pokemon领域记录
// 加载后只读：宝可梦记录构成统计种群，道馆记录描述领袖队伍

use serde::{Deserialize, Serialize};

pub mod stats;
pub mod types;

pub use stats::{BaseStats, PopulationStats, StatKind, StatSummary, STAT_COUNT};
pub use types::{Effectiveness, PokemonType, TypeChart, TYPE_CHART, TYPE_COUNT};

// 宝可梦记录，名称唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub name: String,
    pub stats: BaseStats,
    // 原始属性字符串，查相克表时才解析
    pub type1: String,
    pub image_key: String,
}

impl CreatureRecord {
    pub fn new(name: &str, stats: BaseStats, type1: &str) -> Self {
        Self {
            name: name.to_string(),
            stats,
            type1: type1.to_string(),
            image_key: name.to_lowercase(),
        }
    }
}

// 道馆队伍
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team_id: u32,
    pub leader: String,
    pub location: String,
    pub members: Vec<String>,
}

// 领袖队伍成员的属性行 (反规范化)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderTypeRow {
    pub leader: String,
    pub type1: String,
}
