// 图表模块
// 选择状态、三个分析引擎、头像面板以及统一的仪表盘入口

use serde::{Deserialize, Serialize};
use log::{debug, warn};
use crate::constants::MAX_SLOTS;
use crate::core::config::DashboardConfig;
use crate::core::error::{DashboardError, Result};
use crate::data::{AssetResolver, PlayerPortrait, StatRepository};
use crate::pokemon::TypeChart;

pub mod distribution;
pub mod matchup;
pub mod payload;
pub mod portraits;
pub mod radar;

pub use distribution::{layout_distribution, DistributionFrame, PlacedPoint, StatStrip};
pub use matchup::{build_matchup, score_types, LegendEntry, MatchupCell, MatchupGrid};
pub use payload::{Figure, Trace};
pub use portraits::{build_portraits, LeaderCard, PortraitPanel};
pub use radar::{build_profiles, radar_figure, RadarSeries};

// 用户当前选择：领袖 + 六个可空槽位
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub leader: Option<String>,
    pub slots: [Option<String>; MAX_SLOTS],
    pub player: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leader(mut self, leader: &str) -> Self {
        self.leader = Some(leader.to_string());
        self
    }

    pub fn with_slot(mut self, index: usize, name: &str) -> Self {
        match self.slots.get_mut(index) {
            Some(slot) => *slot = Some(name.to_string()),
            None => warn!("槽位索引越界，忽略: {}", index),
        }
        self
    }

    // 依次填入槽位；空字符串视为未选择
    pub fn from_slots<I, S>(leader: Option<String>, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self {
            leader,
            ..Self::default()
        };
        for (index, name) in names.into_iter().enumerate() {
            if index >= MAX_SLOTS {
                return Err(DashboardError::InvalidInput(format!(
                    "最多选择 {} 只宝可梦",
                    MAX_SLOTS
                )));
            }
            let name = name.into();
            if !name.trim().is_empty() {
                selection.slots[index] = Some(name);
            }
        }
        Ok(selection)
    }

    // 非空槽位，按槽位顺序
    pub fn chosen(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|name| (index, name)))
    }

    pub fn all_slots_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

// 一次完整渲染的全部图表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardPayload {
    pub radar: Figure,
    pub distribution: Figure,
    pub matchup: Figure,
    pub portraits: PortraitPanel,
}

// 仪表盘：持有只读数据，每次选择变化重新计算
pub struct Dashboard {
    repository: StatRepository,
    config: DashboardConfig,
    chart: TypeChart,
    assets: AssetResolver,
}

impl Dashboard {
    pub fn new(repository: StatRepository, config: DashboardConfig) -> Self {
        let assets = AssetResolver::new(config.assets.clone());
        Self {
            repository,
            config,
            chart: TypeChart::standard(),
            assets,
        }
    }

    pub fn load(config: DashboardConfig) -> Result<Self> {
        let repository = StatRepository::load(&config.data)?;
        Ok(Self::new(repository, config))
    }

    pub fn repository(&self) -> &StatRepository {
        &self.repository
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn radar(&self, selection: &Selection) -> Figure {
        let series = build_profiles(&self.repository, selection);
        radar_figure(&series, &self.config.radar)
    }

    pub fn distribution(&self, selection: &Selection) -> Figure {
        let config = &self.config.distribution;
        match layout_distribution(&self.repository, selection, config) {
            Ok(frame) => frame.to_figure(config),
            Err(e) => Self::placeholder("分布图", e),
        }
    }

    pub fn matchup(&self, selection: &Selection) -> Figure {
        let config = &self.config.matchup;
        match build_matchup(&self.repository, selection, &self.chart, config) {
            Ok(grid) => grid.to_figure(config),
            Err(e) => Self::placeholder("相克网格", e),
        }
    }

    pub fn portraits(&self, selection: &Selection) -> PortraitPanel {
        build_portraits(&self.repository, selection, &self.assets)
    }

    pub fn player_portraits(&self) -> Vec<PlayerPortrait> {
        self.assets.list_player_portraits()
    }

    pub fn render(&self, selection: &Selection) -> DashboardPayload {
        debug!("重新计算仪表盘: {:?}", selection);
        DashboardPayload {
            radar: self.radar(selection),
            distribution: self.distribution(selection),
            matchup: self.matchup(selection),
            portraits: self.portraits(selection),
        }
    }

    fn placeholder(chart: &str, error: DashboardError) -> Figure {
        if error.is_recoverable() {
            debug!("{} 无数据: {}", chart, error);
        } else {
            warn!("{} 计算失败: {}", chart, error);
        }
        Figure::no_data()
    }
}
