// 数据管理系统
// 启动时一次性加载全部表格，之后只读；种群统计在加载时计算

use indexmap::{IndexMap, IndexSet};
use log::{info, warn};
use crate::core::config::DataConfig;
use crate::core::error::{DashboardError, Result};
use crate::pokemon::{CreatureRecord, LeaderTypeRow, PopulationStats, TeamRecord};

pub mod assets;
#[cfg(feature = "sqlite")]
pub mod database;
pub mod loader;

pub use assets::{AssetResolver, PlayerPortrait};
pub use loader::{DataFormat, DataLoader};

// 宝可梦与道馆数据仓库
#[derive(Debug, Clone)]
pub struct StatRepository {
    // 名称 -> 记录，保持文件顺序
    creatures: IndexMap<String, CreatureRecord>,
    teams: Vec<TeamRecord>,
    leader_types: Vec<LeaderTypeRow>,
    population: Option<PopulationStats>,
}

impl StatRepository {
    // leader_types 为 None 时由队伍成员与宝可梦属性推导
    pub fn from_records(
        creatures: Vec<CreatureRecord>,
        teams: Vec<TeamRecord>,
        leader_types: Option<Vec<LeaderTypeRow>>,
    ) -> Self {
        let mut by_name: IndexMap<String, CreatureRecord> = IndexMap::with_capacity(creatures.len());
        for record in creatures {
            if by_name.contains_key(&record.name) {
                warn!("重复的宝可梦记录，保留第一条: {}", record.name);
                continue;
            }
            by_name.insert(record.name.clone(), record);
        }

        let leader_types = leader_types.unwrap_or_else(|| Self::derive_leader_types(&by_name, &teams));

        let population = match PopulationStats::from_stats(by_name.values().map(|c| &c.stats)) {
            Ok(population) => Some(population),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        Self {
            creatures: by_name,
            teams,
            leader_types,
            population,
        }
    }

    pub fn load(config: &DataConfig) -> Result<Self> {
        let mut loader = DataLoader::new();
        let creatures = loader.load_creatures(&config.creatures_csv)?;
        let teams = loader.load_teams(&config.gyms_csv, &config.gym_members_csv)?;
        let leader_types = Self::load_leader_types(config)?;

        let repository = Self::from_records(creatures, teams, leader_types);
        info!(
            "数据仓库加载完成: {} 只宝可梦, {} 位领袖",
            repository.creatures.len(),
            repository.leaders().len()
        );
        Ok(repository)
    }

    #[cfg(feature = "sqlite")]
    fn load_leader_types(config: &DataConfig) -> Result<Option<Vec<LeaderTypeRow>>> {
        let Some(db_path) = &config.database else {
            return Ok(None);
        };

        let mut db = database::StatsDatabase::open(db_path)?;
        let rows = match &config.leader_types_sql {
            Some(sql_path) => db.load_leader_types_from_file(sql_path)?,
            None => db.load_leader_types(database::DEFAULT_LEADER_TYPES_SQL)?,
        };
        Ok(Some(rows))
    }

    #[cfg(not(feature = "sqlite"))]
    fn load_leader_types(config: &DataConfig) -> Result<Option<Vec<LeaderTypeRow>>> {
        if config.database.is_some() {
            warn!("未启用sqlite特性，忽略数据库配置，改用队伍成员推导属性");
        }
        Ok(None)
    }

    fn derive_leader_types(
        creatures: &IndexMap<String, CreatureRecord>,
        teams: &[TeamRecord],
    ) -> Vec<LeaderTypeRow> {
        teams
            .iter()
            .flat_map(|team| {
                team.members.iter().filter_map(move |member| {
                    creatures.get(member).map(|c| LeaderTypeRow {
                        leader: team.leader.clone(),
                        type1: c.type1.clone(),
                    })
                })
            })
            .collect()
    }

    pub fn creature(&self, name: &str) -> Result<&CreatureRecord> {
        self.creatures
            .get(name)
            .ok_or_else(|| DashboardError::NotFound(format!("宝可梦 {}", name)))
    }

    pub fn creatures(&self) -> impl Iterator<Item = &CreatureRecord> {
        self.creatures.values()
    }

    pub fn creature_names(&self) -> Vec<&str> {
        self.creatures.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    // 领袖下拉选项，按首次出现顺序去重
    pub fn leaders(&self) -> Vec<&str> {
        self.teams
            .iter()
            .map(|t| t.leader.as_str())
            .collect::<IndexSet<&str>>()
            .into_iter()
            .collect()
    }

    pub fn leader_location(&self, leader: &str) -> Result<&str> {
        self.teams
            .iter()
            .find(|t| t.leader == leader)
            .map(|t| t.location.as_str())
            .ok_or_else(|| DashboardError::NotFound(format!("领袖 {}", leader)))
    }

    // 该领袖所有队伍成员，按队伍顺序
    pub fn leader_members(&self, leader: &str) -> Vec<&str> {
        self.teams
            .iter()
            .filter(|t| t.leader == leader)
            .flat_map(|t| t.members.iter().map(|m| m.as_str()))
            .collect()
    }

    pub fn leader_roster_types(&self, leader: &str) -> Vec<&str> {
        self.leader_types
            .iter()
            .filter(|row| row.leader == leader)
            .map(|row| row.type1.as_str())
            .collect()
    }

    pub fn population(&self) -> Result<&PopulationStats> {
        self.population
            .as_ref()
            .ok_or_else(|| DashboardError::EmptyPopulation("数据仓库中没有宝可梦".to_string()))
    }
}
