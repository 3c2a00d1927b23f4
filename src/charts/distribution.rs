// 能力值分布条
// 每项能力值一条数轴：种群最小/平均/最大，加上所选宝可梦的位置。
// 相同位置按选择顺序依次右移一个步长，结果只取决于输入顺序。

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use log::{debug, warn};
use crate::charts::payload::{AxisValue, Figure, Font, Layout, Legend, Line, Marker, ScatterTrace, Trace, Axis};
use crate::charts::Selection;
use crate::core::config::DistributionConfig;
use crate::core::error::Result;
use crate::data::StatRepository;
use crate::pokemon::{BaseStats, StatKind, StatSummary};

// 一只宝可梦在某项能力值上的落点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPoint {
    pub creature: String,
    pub value: f64,
    pub offset: f64,
    pub x: f64,
    pub color: String,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatStrip {
    pub stat: StatKind,
    pub summary: StatSummary,
    pub points: Vec<PlacedPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionFrame {
    pub strips: Vec<StatStrip>,
}

struct Entry<'a> {
    name: &'a str,
    stats: BaseStats,
    color: String,
}

// 从 value 开始按步长寻找未占用位置并登记
pub fn resolve_position(used: &mut Vec<f64>, value: f64, step: f64) -> f64 {
    let mut offset = 0.0;
    while used.contains(&(value + offset)) {
        offset += step;
    }
    let x = value + offset;
    used.push(x);
    x
}

// 重复选择的宝可梦只画一次：位置取第一次出现，颜色取最后一个槽位
fn collect_entries<'a>(
    repository: &StatRepository,
    selection: &'a Selection,
    config: &DistributionConfig,
) -> Vec<Entry<'a>> {
    let mut entries: Vec<Entry<'a>> = Vec::new();

    for (slot, name) in selection.chosen() {
        let creature = match repository.creature(name) {
            Ok(creature) => creature,
            Err(e) => {
                warn!("分布图跳过槽位 {}: {}", slot, e);
                continue;
            }
        };

        let color = config
            .palette
            .get(slot % config.palette.len().max(1))
            .cloned()
            .unwrap_or_else(|| "black".to_string());
        match entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.color = color,
            None => entries.push(Entry {
                name,
                stats: creature.stats,
                color,
            }),
        }
    }

    entries
}

pub fn layout_distribution(
    repository: &StatRepository,
    selection: &Selection,
    config: &DistributionConfig,
) -> Result<DistributionFrame> {
    let population = repository.population()?;
    let entries = collect_entries(repository, selection, config);

    // 整次计算共享一个图例集合，每只宝可梦只出现一次图例
    let mut legend_emitted: HashSet<&str> = HashSet::new();

    let strips = StatKind::ALL
        .iter()
        .map(|&stat| {
            let mut used: Vec<f64> = Vec::with_capacity(entries.len());
            let points = entries
                .iter()
                .map(|entry| {
                    let value = entry.stats.get(stat);
                    let x = resolve_position(&mut used, value, config.offset_step);
                    PlacedPoint {
                        creature: entry.name.to_string(),
                        value,
                        offset: x - value,
                        x,
                        color: entry.color.clone(),
                        show_legend: legend_emitted.insert(entry.name),
                    }
                })
                .collect();

            StatStrip {
                stat,
                summary: population.summary(stat),
                points,
            }
        })
        .collect();

    debug!("分布图布局完成: {} 只宝可梦", entries.len());
    Ok(DistributionFrame { strips })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn summary_marker(x: f64, category: &str, label: &str, hover: String, size: f64) -> Trace {
    Trace::Scatter(ScatterTrace {
        x: vec![Some(x.into())],
        y: vec![Some(category.into())],
        mode: "markers+text".to_string(),
        text: Some(vec![label.to_string()]),
        textposition: Some("bottom center".to_string()),
        hovertext: Some(vec![hover]),
        hoverinfo: Some("text".to_string()),
        marker: Some(Marker {
            color: Some("black".to_string()),
            size: Some(size),
            symbol: Some("circle".to_string()),
            opacity: None,
        }),
        showlegend: Some(false),
        ..Default::default()
    })
}

impl DistributionFrame {
    pub fn point_count(&self) -> usize {
        self.strips.iter().map(|s| s.points.len()).sum()
    }

    pub fn strip(&self, stat: StatKind) -> Option<&StatStrip> {
        self.strips.iter().find(|s| s.stat == stat)
    }

    pub fn to_figure(&self, config: &DistributionConfig) -> Figure {
        let mut data = Vec::new();

        for strip in &self.strips {
            let category = strip.stat.column_name();
            let StatSummary { min, max, mean } = strip.summary;

            data.push(summary_marker(
                min,
                category,
                "Min",
                format!("Min: {:?}", round_to(min, 2)),
                config.extreme_marker_size,
            ));
            data.push(summary_marker(
                max,
                category,
                "Max",
                format!("Max: {:?}", round_to(max, 2)),
                config.extreme_marker_size,
            ));
            data.push(Trace::Scatter(ScatterTrace {
                x: vec![Some(min.into()), Some(max.into())],
                y: vec![Some(category.into()), Some(category.into())],
                mode: "lines".to_string(),
                line: Some(Line {
                    color: Some(config.range_line_color.clone()),
                    width: Some(config.range_line_width),
                }),
                showlegend: Some(false),
                ..Default::default()
            }));
            data.push(summary_marker(
                mean,
                category,
                "Average",
                format!("Average: {:?}", round_to(mean, 0)),
                config.mean_marker_size,
            ));
        }

        for strip in &self.strips {
            let category = strip.stat.column_name();
            for point in &strip.points {
                data.push(Trace::Scatter(ScatterTrace {
                    x: vec![Some(point.x.into())],
                    y: vec![Some(category.into())],
                    mode: "markers+text".to_string(),
                    name: point.show_legend.then(|| point.creature.clone()),
                    hovertext: Some(vec![format!("{}: {}", point.creature, point.value)]),
                    hoverinfo: Some("text".to_string()),
                    marker: Some(Marker {
                        color: Some(point.color.clone()),
                        size: Some(config.point_size),
                        symbol: Some("circle".to_string()),
                        opacity: None,
                    }),
                    showlegend: Some(point.show_legend),
                    ..Default::default()
                }));
            }
        }

        let categories: Vec<&str> = StatKind::ALL.iter().map(|s| s.column_name()).collect();

        Figure {
            data,
            layout: Layout {
                xaxis: Some(Axis {
                    zeroline: Some(false),
                    showgrid: Some(true),
                    ..Default::default()
                }),
                yaxis: Some(Axis {
                    showticklabels: Some(true),
                    tickvals: Some(categories.iter().map(|c| AxisValue::from(*c)).collect()),
                    ticktext: Some(categories.iter().map(|c| c.to_string()).collect()),
                    ..Default::default()
                }),
                height: Some(config.height),
                width: Some(config.width),
                plot_bgcolor: Some("rgba(0,0,0,0)".to_string()),
                showlegend: Some(true),
                legend: Some(Legend {
                    title: Some("Label".to_string()),
                    x: Some(1.0),
                    y: Some(1.0),
                    traceorder: Some("normal".to_string()),
                    bgcolor: Some("rgba(255, 255, 255, 0)".to_string()),
                }),
                font: Some(Font {
                    family: Some("Georgia".to_string()),
                    size: Some(12.0),
                    color: Some("black".to_string()),
                }),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::pokemon::CreatureRecord;

    fn twins_repository() -> StatRepository {
        let mut creatures = fixtures::creatures();
        creatures.push(CreatureRecord::new("Alpha", BaseStats::new(45.0, 10.0, 10.0, 10.0, 10.0, 10.0), "Normal"));
        creatures.push(CreatureRecord::new("Beta", BaseStats::new(45.0, 10.0, 20.0, 10.0, 10.0, 10.0), "Normal"));
        creatures.push(CreatureRecord::new("Gamma", BaseStats::new(45.0, 10.0, 30.0, 10.0, 10.0, 10.0), "Normal"));
        StatRepository::from_records(creatures, fixtures::teams(), None)
    }

    #[test]
    fn test_resolve_position() {
        let mut used = Vec::new();
        assert_eq!(resolve_position(&mut used, 45.0, 0.5), 45.0);
        assert_eq!(resolve_position(&mut used, 45.0, 0.5), 45.5);
        assert_eq!(resolve_position(&mut used, 45.5, 0.5), 46.0);
        assert_eq!(resolve_position(&mut used, 44.0, 0.5), 44.0);
        assert_eq!(used, vec![45.0, 45.5, 46.0, 44.0]);
    }

    #[test]
    fn test_identical_values_step_by_selection_order() {
        let repo = twins_repository();
        let selection = Selection::new()
            .with_slot(0, "Alpha")
            .with_slot(1, "Beta")
            .with_slot(2, "Gamma");
        let frame = layout_distribution(&repo, &selection, &DistributionConfig::default()).unwrap();

        let hp = frame.strip(StatKind::HP).unwrap();
        let xs: Vec<f64> = hp.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![45.0, 45.5, 46.0]);
        let offsets: Vec<f64> = hp.points.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);

        // 防御值各不相同，不偏移
        let defense = frame.strip(StatKind::Defense).unwrap();
        assert!(defense.points.iter().all(|p| p.offset == 0.0));
    }

    #[test]
    fn test_tie_break_follows_order_not_name() {
        let repo = twins_repository();
        let selection = Selection::new().with_slot(0, "Beta").with_slot(1, "Alpha");
        let frame = layout_distribution(&repo, &selection, &DistributionConfig::default()).unwrap();

        let hp = frame.strip(StatKind::HP).unwrap();
        assert_eq!(hp.points[0].creature, "Beta");
        assert_eq!(hp.points[0].x, 45.0);
        assert_eq!(hp.points[1].creature, "Alpha");
        assert_eq!(hp.points[1].x, 45.5);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let repo = twins_repository();
        let selection = Selection::new()
            .with_slot(0, "Gamma")
            .with_slot(1, "Alpha")
            .with_slot(4, "Bulbasaur")
            .with_slot(5, "Beta");
        let config = DistributionConfig::default();

        let first = layout_distribution(&repo, &selection, &config).unwrap();
        let second = layout_distribution(&repo, &selection, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.to_figure(&config)).unwrap(),
            serde_json::to_string(&second.to_figure(&config)).unwrap()
        );
    }

    #[test]
    fn test_legend_emitted_once_per_creature() {
        let repo = fixtures::repository();
        let selection = Selection::new().with_slot(0, "Onix").with_slot(1, "Pikachu");
        let frame = layout_distribution(&repo, &selection, &DistributionConfig::default()).unwrap();

        assert_eq!(frame.point_count(), 12);
        let legend_rows: Vec<&str> = frame
            .strips
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|p| p.show_legend)
            .map(|p| p.creature.as_str())
            .collect();
        assert_eq!(legend_rows, vec!["Onix", "Pikachu"]);
        assert!(frame.strips[0].points.iter().all(|p| p.show_legend));
    }

    #[test]
    fn test_colors_and_duplicates() {
        let repo = fixtures::repository();
        let selection = Selection::new()
            .with_slot(0, "Onix")
            .with_slot(2, "Pikachu")
            .with_slot(4, "Onix");
        let config = DistributionConfig::default();
        let frame = layout_distribution(&repo, &selection, &config).unwrap();

        let hp = frame.strip(StatKind::HP).unwrap();
        assert_eq!(hp.points.len(), 2);
        assert_eq!(hp.points[0].creature, "Onix");
        assert_eq!(hp.points[0].color, config.palette[4]);
        assert_eq!(hp.points[1].color, config.palette[2]);
    }

    #[test]
    fn test_unknown_and_empty_slots_skipped() {
        let repo = fixtures::repository();
        let selection = Selection::new().with_slot(1, "Missingno").with_slot(3, "Chansey");
        let frame = layout_distribution(&repo, &selection, &DistributionConfig::default()).unwrap();

        assert_eq!(frame.strips.len(), 6);
        assert!(frame.strips.iter().all(|s| s.points.len() == 1));

        let empty = layout_distribution(&repo, &Selection::new(), &DistributionConfig::default()).unwrap();
        assert_eq!(empty.point_count(), 0);
        assert_eq!(empty.strips[0].summary.max, 250.0);
    }

    #[test]
    fn test_out_of_range_values_plotted_as_given() {
        let mut creatures = fixtures::creatures();
        creatures.push(CreatureRecord::new("Glitch", BaseStats::new(-5.0, 999.0, 1.0, 1.0, 1.0, 1.0), "Normal"));
        let repo = StatRepository::from_records(creatures, Vec::new(), None);
        let frame = layout_distribution(&repo, &Selection::new().with_slot(0, "Glitch"), &DistributionConfig::default()).unwrap();
        assert_eq!(frame.strip(StatKind::HP).unwrap().points[0].x, -5.0);
        assert_eq!(frame.strip(StatKind::Attack).unwrap().points[0].x, 999.0);
    }

    #[test]
    fn test_figure_traces() {
        let repo = fixtures::repository();
        let config = DistributionConfig::default();
        let frame = layout_distribution(&repo, &Selection::new().with_slot(0, "Bulbasaur"), &config).unwrap();
        let figure = frame.to_figure(&config);

        // 每项4条统计轨迹 + 每项1个点
        assert_eq!(figure.data.len(), 6 * 4 + 6);

        let value = serde_json::to_value(&figure).unwrap();
        assert_eq!(value["data"][0]["text"][0], "Min");
        // 种群统计为浮点数，悬停文本保留小数点
        assert_eq!(value["data"][0]["hovertext"][0], "Min: 30.0");
        assert_eq!(value["data"][1]["hovertext"][0], "Max: 250.0");
        assert_eq!(value["data"][0]["y"][0], "HP");
        assert_eq!(value["data"][2]["mode"], "lines");
        assert_eq!(value["data"][2]["line"]["color"], "#D3D3D3");
        assert_eq!(value["data"][3]["text"][0], "Average");
        assert_eq!(value["data"][3]["hovertext"][0], "Average: 62.0");
        assert_eq!(value["data"][24]["name"], "Bulbasaur");
        assert_eq!(value["data"][24]["showlegend"], true);
        assert_eq!(value["data"][24]["hovertext"][0], "Bulbasaur: 45");
        assert_eq!(value["data"][25]["showlegend"], false);
        assert_eq!(value["data"][25]["y"][0], "attack");
        assert_eq!(value["layout"]["legend"]["title"], "Label");
    }

    #[test]
    fn test_hover_rounding() {
        assert_eq!(format!("{:?}", round_to(68.3333, 2)), "68.33");
        assert_eq!(format!("{:?}", round_to(68.3333, 0)), "68.0");
        assert_eq!(format!("{:?}", round_to(1.0, 2)), "1.0");
    }

    #[test]
    fn test_empty_population_is_error() {
        let repo = StatRepository::from_records(Vec::new(), Vec::new(), None);
        assert!(layout_distribution(&repo, &Selection::new(), &DistributionConfig::default()).is_err());
    }
}
