// 仪表盘配置管理
// 进程启动时加载一次，之后以只读引用传入各图表引擎

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};
use log::{debug, info};

use crate::core::error::{DashboardError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub assets: AssetConfig,
    pub radar: RadarConfig,
    pub distribution: DistributionConfig,
    pub matchup: MatchupConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub creatures_csv: PathBuf,
    pub gyms_csv: PathBuf,
    pub gym_members_csv: PathBuf,
    // 可选：领袖属性行来自SQLite
    pub database: Option<PathBuf>,
    pub leader_types_sql: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub creature_images: PathBuf,
    pub leader_images: PathBuf,
    pub player_images: PathBuf,
    pub image_extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub radial_range: [f64; 2],
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    pub offset_step: f64,
    pub palette: Vec<String>,
    pub point_size: f64,
    pub mean_marker_size: f64,
    pub extreme_marker_size: f64,
    pub range_line_color: String,
    pub range_line_width: f64,
    pub height: u32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchupConfig {
    pub base_point_size: f64,
    pub size_factor: f64,
    pub marker_opacity: f64,
    pub legend_marker_size: f64,
    pub super_effective_color: String,
    pub normal_color: String,
    pub not_very_effective_color: String,
    pub no_effect_color: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            assets: AssetConfig::default(),
            radar: RadarConfig::default(),
            distribution: DistributionConfig::default(),
            matchup: MatchupConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            creatures_csv: PathBuf::from("Pokemon.csv"),
            gyms_csv: PathBuf::from("Gym.csv"),
            gym_members_csv: PathBuf::from("Gym_Pokemon.csv"),
            database: None,
            leader_types_sql: None,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            creature_images: PathBuf::from("assets/images"),
            leader_images: PathBuf::from("assets/gen1_leaders"),
            player_images: PathBuf::from("assets/players"),
            image_extension: "png".to_string(),
        }
    }
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            radial_range: [0.0, 100.0],
            fill: "toself".to_string(),
        }
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            offset_step: crate::constants::DEFAULT_OFFSET_STEP,
            palette: vec![
                "#F4A261".to_string(),
                "#FF6B6B".to_string(),
                "#F7DC6F".to_string(),
                "#6ED3CF".to_string(),
                "#40A8C4".to_string(),
                "#457B9D".to_string(),
            ],
            point_size: 10.0,
            mean_marker_size: 10.0,
            extreme_marker_size: 1.0,
            range_line_color: "#D3D3D3".to_string(),
            range_line_width: 6.0,
            height: 500,
            width: 800,
        }
    }
}

impl Default for MatchupConfig {
    fn default() -> Self {
        Self {
            base_point_size: 2.0,
            size_factor: 8.0,
            marker_opacity: 0.7,
            legend_marker_size: 10.0,
            super_effective_color: "#FF7F50".to_string(),
            normal_color: "#FFD700".to_string(),
            not_very_effective_color: "#FFF8DC".to_string(),
            no_effect_color: "#D3D3D3".to_string(),
        }
    }
}

pub struct ConfigManager {
    config: DashboardConfig,
    config_path: PathBuf,
    last_modified: SystemTime,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::open(config_path)
    }

    pub fn open(config_path: PathBuf) -> Result<Self> {
        let config = Self::load_from_file(&config_path)?;
        let last_modified = fs::metadata(&config_path)
            .and_then(|m| m.modified())
            .unwrap_or_else(|_| SystemTime::now());

        Ok(Self {
            config,
            config_path,
            last_modified,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    // 文件修改时间变化时重新加载
    pub fn check_reload(&mut self) -> Result<bool> {
        let modified = fs::metadata(&self.config_path)?.modified()?;

        if modified > self.last_modified {
            info!("检测到配置文件更改，重新加载: {:?}", self.config_path);
            self.config = Self::load_from_file(&self.config_path)?;
            self.last_modified = modified;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn default_config_path() -> Result<PathBuf> {
        let mut path = std::env::current_dir()?;
        path.push("config");
        path.push("dashboard.toml");
        Ok(path)
    }

    pub fn load_from_file(path: &Path) -> Result<DashboardConfig> {
        if !path.exists() {
            info!("配置文件不存在，创建默认配置: {:?}", path);
            let default_config = DashboardConfig::default();
            Self::save_config_to_file(&default_config, path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&content).map_err(|e| {
            DashboardError::ConfigError(format!("解析配置文件失败: {}", e))
        })?;

        Self::validate_config(&config)?;
        info!("成功加载配置文件: {:?}", path);
        Ok(config)
    }

    pub fn save_config_to_file(config: &DashboardConfig, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(config).map_err(|e| {
            DashboardError::ConfigError(format!("序列化配置失败: {}", e))
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        debug!("配置已保存到: {:?}", path);
        Ok(())
    }

    pub fn validate_config(config: &DashboardConfig) -> Result<()> {
        let dist = &config.distribution;
        if dist.offset_step.is_nan() || dist.offset_step <= 0.0 {
            return Err(DashboardError::ConfigError("偏移步长必须大于0".to_string()));
        }

        if dist.palette.is_empty() {
            return Err(DashboardError::ConfigError("分布图调色板不能为空".to_string()));
        }

        let [low, high] = config.radar.radial_range;
        if low.is_nan() || high.is_nan() || low >= high {
            return Err(DashboardError::ConfigError("雷达图半径范围必须递增".to_string()));
        }

        if config.matchup.size_factor < 0.0 || config.matchup.base_point_size < 0.0 {
            return Err(DashboardError::ConfigError("相克图点大小参数不能为负".to_string()));
        }

        Ok(())
    }

    // 命令行覆盖：在已加载的配置之上修改字段，然后重新校验
    pub fn apply_overrides(
        config: &mut DashboardConfig,
        database: Option<PathBuf>,
        offset_step: Option<f64>,
    ) -> Result<()> {
        if let Some(database) = database {
            debug!("覆盖数据库路径: {:?}", database);
            config.data.database = Some(database);
        }
        if let Some(step) = offset_step {
            debug!("覆盖偏移步长: {}", step);
            config.distribution.offset_step = step;
        }

        Self::validate_config(config)
    }
}
