// 属性相克网格
// 用户队伍属性 (攻击) × 领袖队伍属性 (防御)，每格一个倍率。
// 点的大小随用户队伍人数增长，与倍率无关。

use serde::{Deserialize, Serialize};
use log::{debug, warn};
use crate::charts::payload::{Axis, AxisValue, Figure, Font, Layout, Marker, ScatterTrace, Trace};
use crate::charts::Selection;
use crate::core::config::MatchupConfig;
use crate::core::error::{DashboardError, Result};
use crate::data::StatRepository;
use crate::pokemon::{Effectiveness, PokemonType, TypeChart};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupCell {
    pub attacker_index: usize,
    pub defender_index: usize,
    pub attacker: PokemonType,
    pub defender: PokemonType,
    pub effectiveness: Effectiveness,
    pub multiplier: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub effectiveness: Effectiveness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupGrid {
    pub attacker_types: Vec<PokemonType>,
    pub defender_types: Vec<PokemonType>,
    pub cells: Vec<MatchupCell>,
    pub point_size: f64,
    pub legend: Vec<LegendEntry>,
}

// 倍率 -> 颜色
pub fn color_for(effectiveness: Effectiveness, config: &MatchupConfig) -> &str {
    match effectiveness {
        Effectiveness::SuperEffective => &config.super_effective_color,
        Effectiveness::Normal => &config.normal_color,
        Effectiveness::NotVeryEffective => &config.not_very_effective_color,
        Effectiveness::NoEffect => &config.no_effect_color,
    }
}

pub fn point_size(team_size: usize, config: &MatchupConfig) -> f64 {
    config.base_point_size + team_size as f64 * config.size_factor
}

// 四个图例项始终输出，与网格中是否出现无关
pub fn legend_entries(config: &MatchupConfig) -> Vec<LegendEntry> {
    Effectiveness::LEGEND_ORDER
        .iter()
        .map(|&effectiveness| LegendEntry {
            label: effectiveness.legend_label().to_string(),
            color: color_for(effectiveness, config).to_string(),
            effectiveness,
        })
        .collect()
}

fn parse_types(names: &[&str]) -> Result<Vec<PokemonType>> {
    names.iter().map(|name| PokemonType::from_name(name)).collect()
}

// 任一属性名未知即整体失败
pub fn score_types(
    attacker_names: &[&str],
    defender_names: &[&str],
    chart: &TypeChart,
    config: &MatchupConfig,
) -> Result<MatchupGrid> {
    let attacker_types = parse_types(attacker_names)?;
    let defender_types = parse_types(defender_names)?;

    let mut cells = Vec::with_capacity(attacker_types.len() * defender_types.len());
    for (i, &attacker) in attacker_types.iter().enumerate() {
        for (j, &defender) in defender_types.iter().enumerate() {
            let effectiveness = chart.effectiveness(attacker, defender);
            cells.push(MatchupCell {
                attacker_index: i,
                defender_index: j,
                attacker,
                defender,
                effectiveness,
                multiplier: effectiveness.multiplier(),
                color: color_for(effectiveness, config).to_string(),
            });
        }
    }

    debug!("属性相克网格: {} × {}", attacker_types.len(), defender_types.len());

    Ok(MatchupGrid {
        point_size: point_size(attacker_types.len(), config),
        attacker_types,
        defender_types,
        cells,
        legend: legend_entries(config),
    })
}

pub fn build_matchup(
    repository: &StatRepository,
    selection: &Selection,
    chart: &TypeChart,
    config: &MatchupConfig,
) -> Result<MatchupGrid> {
    let leader = match selection.leader.as_deref() {
        Some(leader) if !selection.all_slots_empty() => leader,
        _ => {
            return Err(DashboardError::EmptySelection(
                "未选择领袖或六个槽位均为空".to_string(),
            ))
        }
    };

    // 未知宝可梦不计入用户队伍
    let attacker_names: Vec<&str> = selection
        .chosen()
        .filter_map(|(slot, name)| match repository.creature(name) {
            Ok(creature) => Some(creature.type1.as_str()),
            Err(e) => {
                warn!("相克网格跳过槽位 {}: {}", slot, e);
                None
            }
        })
        .collect();

    let defender_names = repository.leader_roster_types(leader);
    score_types(&attacker_names, &defender_names, chart, config)
}

// 网格下标 -> 属性名
fn type_ticks(types: &[PokemonType]) -> Axis {
    Axis {
        tickvals: Some((0..types.len()).map(AxisValue::from).collect()),
        ticktext: Some(types.iter().map(|t| t.name().to_string()).collect()),
        ..Default::default()
    }
}

impl MatchupGrid {
    pub fn cell(&self, attacker_index: usize, defender_index: usize) -> Option<&MatchupCell> {
        self.cells
            .iter()
            .find(|c| c.attacker_index == attacker_index && c.defender_index == defender_index)
    }

    pub fn text_size(&self) -> f64 {
        ((self.point_size / 40.0).floor() + 1.0).min(16.0)
    }

    pub fn to_figure(&self, config: &MatchupConfig) -> Figure {
        let mut data: Vec<Trace> = self
            .cells
            .iter()
            .map(|cell| {
                Trace::Scatter(ScatterTrace {
                    x: vec![Some(cell.attacker_index.into())],
                    y: vec![Some(cell.defender_index.into())],
                    mode: "markers+text".to_string(),
                    marker: Some(Marker {
                        color: Some(cell.color.clone()),
                        size: Some(self.point_size),
                        symbol: None,
                        opacity: Some(config.marker_opacity),
                    }),
                    text: Some(vec![format!("{:.1}", cell.multiplier)]),
                    textposition: Some("middle center".to_string()),
                    textfont: Some(Font {
                        family: None,
                        size: Some(self.text_size()),
                        color: Some("black".to_string()),
                    }),
                    showlegend: Some(false),
                    ..Default::default()
                })
            })
            .collect();

        data.extend(self.legend.iter().map(|entry| {
            Trace::Scatter(ScatterTrace {
                x: vec![None],
                y: vec![None],
                mode: "markers".to_string(),
                name: Some(entry.label.clone()),
                marker: Some(Marker {
                    color: Some(entry.color.clone()),
                    size: Some(config.legend_marker_size),
                    symbol: None,
                    opacity: None,
                }),
                ..Default::default()
            })
        }));

        Figure {
            data,
            layout: Layout {
                title: Some("Type Effectiveness Between Teams".to_string()),
                xaxis: Some(Axis {
                    title: Some("User's Team (Attacking Types)".to_string()),
                    ..type_ticks(&self.attacker_types)
                }),
                yaxis: Some(Axis {
                    title: Some("Gym Leader's Team (Defending Types)".to_string()),
                    ..type_ticks(&self.defender_types)
                }),
                showlegend: Some(true),
                ..Default::default()
            },
        }
    }
}
