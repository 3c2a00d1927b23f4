// Pokemon能力值统计
// 六项基础能力值及种群的最小/平均/最大值

use serde::{Deserialize, Serialize};
use log::debug;
use crate::core::error::{DashboardError, Result};

pub const STAT_COUNT: usize = 6;

// 基础能力值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    HP,         // 体力
    Attack,     // 攻击
    Defense,    // 防御
    SpAttack,   // 特攻
    SpDefense,  // 特防
    Speed,      // 速度
}

impl StatKind {
    pub const ALL: [StatKind; STAT_COUNT] = [
        StatKind::HP,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpAttack,
        StatKind::SpDefense,
        StatKind::Speed,
    ];

    // 雷达图轴标签
    pub fn display_name(self) -> &'static str {
        match self {
            StatKind::HP => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpAttack => "Special Attack",
            StatKind::SpDefense => "Special Defense",
            StatKind::Speed => "Speed",
        }
    }

    // 数据表列名，分布图的y轴类别
    pub fn column_name(self) -> &'static str {
        match self {
            StatKind::HP => "HP",
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
            StatKind::SpAttack => "special_attack",
            StatKind::SpDefense => "special_defense",
            StatKind::Speed => "speed",
        }
    }

    pub fn axis_names() -> Vec<String> {
        Self::ALL.iter().map(|s| s.display_name().to_string()).collect()
    }
}

// 基础能力值 (按原样信任，不做范围校验)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub sp_attack: f64,
    pub sp_defense: f64,
    pub speed: f64,
}

impl BaseStats {
    pub fn new(hp: f64, attack: f64, defense: f64, sp_attack: f64, sp_defense: f64, speed: f64) -> Self {
        Self { hp, attack, defense, sp_attack, sp_defense, speed }
    }

    pub fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::HP => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::SpAttack => self.sp_attack,
            StatKind::SpDefense => self.sp_defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn values(&self) -> [f64; STAT_COUNT] {
        [self.hp, self.attack, self.defense, self.sp_attack, self.sp_defense, self.speed]
    }
}

// 单项能力值的种群统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

// 种群统计，加载时计算一次，与选择无关
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    summaries: [StatSummary; STAT_COUNT],
    population_size: usize,
}

impl PopulationStats {
    pub fn from_stats<'a, I>(stats: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a BaseStats>,
    {
        let mut mins = [f64::INFINITY; STAT_COUNT];
        let mut maxs = [f64::NEG_INFINITY; STAT_COUNT];
        let mut sums = [0.0f64; STAT_COUNT];
        let mut count = 0usize;

        for base in stats {
            for (i, value) in base.values().iter().enumerate() {
                mins[i] = mins[i].min(*value);
                maxs[i] = maxs[i].max(*value);
                sums[i] += value;
            }
            count += 1;
        }

        if count == 0 {
            return Err(DashboardError::EmptyPopulation("没有任何宝可梦记录".to_string()));
        }

        let summaries = std::array::from_fn(|i| StatSummary {
            min: mins[i],
            max: maxs[i],
            mean: sums[i] / count as f64,
        });

        debug!("种群统计完成: {} 条记录", count);
        Ok(Self { summaries, population_size: count })
    }

    pub fn summary(&self, stat: StatKind) -> StatSummary {
        self.summaries[stat as usize]
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_labels() {
        assert_eq!(
            StatKind::axis_names(),
            vec!["HP", "Attack", "Defense", "Special Attack", "Special Defense", "Speed"]
        );
        assert_eq!(StatKind::SpDefense.column_name(), "special_defense");
        assert_eq!(StatKind::HP.column_name(), "HP");
    }

    #[test]
    fn test_base_stats_access() {
        let stats = BaseStats::new(45.0, 49.0, 49.0, 65.0, 65.0, 45.0);
        assert_eq!(stats.get(StatKind::SpAttack), 65.0);
        assert_eq!(stats.values(), [45.0, 49.0, 49.0, 65.0, 65.0, 45.0]);
    }

    #[test]
    fn test_population_summary() {
        let population = vec![
            BaseStats::new(1.0, 10.0, 10.0, 10.0, 10.0, 10.0),
            BaseStats::new(255.0, 20.0, 30.0, 40.0, 50.0, 60.0),
            BaseStats::new(50.0, 30.0, 20.0, 10.0, 0.0, 5.0),
        ];
        let pop = PopulationStats::from_stats(&population).unwrap();

        let hp = pop.summary(StatKind::HP);
        assert_eq!(hp.min, 1.0);
        assert_eq!(hp.max, 255.0);
        assert!((hp.mean - 102.0).abs() < 1e-9);

        let speed = pop.summary(StatKind::Speed);
        assert_eq!(speed.min, 5.0);
        assert_eq!(speed.max, 60.0);
        assert_eq!(pop.population_size(), 3);
    }

    #[test]
    fn test_empty_population() {
        let empty: Vec<BaseStats> = Vec::new();
        assert!(matches!(
            PopulationStats::from_stats(&empty),
            Err(DashboardError::EmptyPopulation(_))
        ));
    }
}
