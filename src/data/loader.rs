// 数据加载器
// 从CSV/JSON表格文件加载宝可梦记录和道馆队伍

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use log::{debug, info};
use crate::core::error::{DashboardError, Result};
use crate::pokemon::{BaseStats, CreatureRecord, TeamRecord};

// 数据格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    JSON,   // 记录数组
    CSV,    // 带表头的表格
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(DataFormat::CSV),
            Some("json") => Ok(DataFormat::JSON),
            _ => Err(DashboardError::Data(format!("不支持的数据格式: {}", path.display()))),
        }
    }
}

// Pokemon.csv 行 (多余的列被忽略)
#[derive(Debug, Clone, Deserialize)]
struct CreatureRow {
    name: String,
    #[serde(rename = "HP")]
    hp: f64,
    attack: f64,
    defense: f64,
    special_attack: f64,
    special_defense: f64,
    speed: f64,
    type1: String,
}

impl From<CreatureRow> for CreatureRecord {
    fn from(row: CreatureRow) -> Self {
        let stats = BaseStats::new(
            row.hp,
            row.attack,
            row.defense,
            row.special_attack,
            row.special_defense,
            row.speed,
        );
        CreatureRecord::new(&row.name, stats, &row.type1)
    }
}

// Gym.csv 行
#[derive(Debug, Clone, Deserialize)]
pub struct GymRow {
    pub gym_id: u32,
    pub leader: String,
    #[serde(default)]
    pub location: String,
}

// Gym_Pokemon.csv 行
#[derive(Debug, Clone, Deserialize)]
pub struct GymMemberRow {
    pub gym_id: u32,
    pub pokemon: String,
}

// 加载统计
#[derive(Debug, Clone, Default)]
pub struct LoadStatistics {
    pub files_loaded: u64,
    pub rows_loaded: u64,
}

pub struct DataLoader {
    statistics: LoadStatistics,
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            statistics: LoadStatistics::default(),
        }
    }

    pub fn statistics(&self) -> &LoadStatistics {
        &self.statistics
    }

    pub fn load_creatures(&mut self, path: &Path) -> Result<Vec<CreatureRecord>> {
        let records = match DataFormat::from_path(path)? {
            DataFormat::CSV => {
                let rows: Vec<CreatureRow> = self.read_csv(path)?;
                rows.into_iter().map(CreatureRecord::from).collect()
            }
            DataFormat::JSON => {
                let file = File::open(path).map_err(|e| {
                    DashboardError::FileError(format!("打开 {} 失败: {}", path.display(), e))
                })?;
                let records: Vec<CreatureRecord> = serde_json::from_reader(file)?;
                self.statistics.files_loaded += 1;
                self.statistics.rows_loaded += records.len() as u64;
                records
            }
        };

        info!("加载宝可梦记录: {} 条 ({})", records.len(), path.display());
        Ok(records)
    }

    pub fn load_creatures_from_reader<R: Read>(&mut self, reader: R) -> Result<Vec<CreatureRecord>> {
        let rows: Vec<CreatureRow> = self.read_csv_from(reader)?;
        Ok(rows.into_iter().map(CreatureRecord::from).collect())
    }

    pub fn load_teams(&mut self, gyms_path: &Path, members_path: &Path) -> Result<Vec<TeamRecord>> {
        let gyms: Vec<GymRow> = self.read_csv(gyms_path)?;
        let members: Vec<GymMemberRow> = self.read_csv(members_path)?;
        let teams = Self::join_teams(gyms, members);
        info!("加载道馆队伍: {} 支", teams.len());
        Ok(teams)
    }

    // 按 gym_id 内连接，保持道馆文件顺序；没有成员的道馆被丢弃
    pub fn join_teams(gyms: Vec<GymRow>, members: Vec<GymMemberRow>) -> Vec<TeamRecord> {
        let mut by_gym: HashMap<u32, Vec<String>> = HashMap::new();
        for member in members {
            by_gym.entry(member.gym_id).or_default().push(member.pokemon);
        }

        gyms.into_iter()
            .filter_map(|gym| {
                let members = by_gym.get(&gym.gym_id)?.clone();
                Some(TeamRecord {
                    team_id: gym.gym_id,
                    leader: gym.leader,
                    location: gym.location,
                    members,
                })
            })
            .collect()
    }

    fn read_csv<T: DeserializeOwned>(&mut self, path: &Path) -> Result<Vec<T>> {
        let file = File::open(path).map_err(|e| {
            DashboardError::FileError(format!("打开 {} 失败: {}", path.display(), e))
        })?;
        let rows = self.read_csv_from(file)?;
        debug!("读取CSV: {} ({} 行)", path.display(), rows.len());
        Ok(rows)
    }

    fn read_csv_from<T: DeserializeOwned, R: Read>(&mut self, reader: R) -> Result<Vec<T>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for row in csv_reader.deserialize() {
            rows.push(row?);
        }

        self.statistics.files_loaded += 1;
        self.statistics.rows_loaded += rows.len() as u64;
        Ok(rows)
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const POKEMON_CSV: &str = "\
name,HP,attack,defense,special_attack,special_defense,speed,type1,type2
Bulbasaur,45,49,49,65,65,45,Grass,Poison
Charmander,39,52,43,60,50,65,Fire,
Squirtle,44,48,65,50,64,43,Water,
";

    #[test]
    fn test_format_from_path() {
        assert_eq!(DataFormat::from_path(Path::new("Pokemon.csv")).unwrap(), DataFormat::CSV);
        assert_eq!(DataFormat::from_path(Path::new("a/b.JSON")).unwrap(), DataFormat::JSON);
        assert!(DataFormat::from_path(Path::new("stats.db")).is_err());
    }

    #[test]
    fn test_load_creatures_from_reader() {
        let mut loader = DataLoader::new();
        let records = loader.load_creatures_from_reader(POKEMON_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Bulbasaur");
        assert_eq!(records[0].stats.sp_attack, 65.0);
        assert_eq!(records[1].type1, "Fire");
        assert_eq!(loader.statistics().rows_loaded, 3);
    }

    #[test]
    fn test_load_creatures_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pokemon.json");
        let records = vec![CreatureRecord::new("Pikachu", BaseStats::new(35.0, 55.0, 40.0, 50.0, 50.0, 90.0), "Electric")];
        fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let mut loader = DataLoader::new();
        assert_eq!(loader.load_creatures(&path).unwrap(), records);
    }

    #[test]
    fn test_malformed_row_is_error() {
        let mut loader = DataLoader::new();
        let bad = "name,HP,attack,defense,special_attack,special_defense,speed,type1\nOddish,abc,1,1,1,1,1,Grass\n";
        assert!(matches!(
            loader.load_creatures_from_reader(bad.as_bytes()),
            Err(DashboardError::Data(_))
        ));
    }

    #[test]
    fn test_join_teams() {
        let gyms = vec![
            GymRow { gym_id: 1, leader: "Brock".to_string(), location: "pewter".to_string() },
            GymRow { gym_id: 2, leader: "Misty".to_string(), location: "cerulean".to_string() },
            GymRow { gym_id: 3, leader: "Nobody".to_string(), location: "nowhere".to_string() },
        ];
        let members = vec![
            GymMemberRow { gym_id: 2, pokemon: "Staryu".to_string() },
            GymMemberRow { gym_id: 1, pokemon: "Geodude".to_string() },
            GymMemberRow { gym_id: 2, pokemon: "Starmie".to_string() },
            GymMemberRow { gym_id: 1, pokemon: "Onix".to_string() },
        ];

        let teams = DataLoader::join_teams(gyms, members);
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].leader, "Brock");
        assert_eq!(teams[0].members, vec!["Geodude", "Onix"]);
        assert_eq!(teams[1].members, vec!["Staryu", "Starmie"]);
    }

    #[test]
    fn test_load_teams_from_files() {
        let dir = tempdir().unwrap();
        let gyms_path = dir.path().join("Gym.csv");
        let members_path = dir.path().join("Gym_Pokemon.csv");
        fs::write(&gyms_path, "gym_id,leader,location,badge\n1,Brock,pewter,Boulder\n").unwrap();
        fs::write(&members_path, "gym_id,pokemon\n1,Geodude\n1,Onix\n").unwrap();

        let mut loader = DataLoader::new();
        let teams = loader.load_teams(&gyms_path, &members_path).unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].location, "pewter");
        assert_eq!(teams[0].members.len(), 2);
    }
}
