// 雷达图能力值轮廓
// 每个非空槽位一条序列；未知名称得到空序列而不是失败

use serde::{Deserialize, Serialize};
use log::{debug, warn};
use crate::charts::payload::{Figure, Layout, Polar, PolarTrace, RadialAxis, Trace};
use crate::charts::Selection;
use crate::core::config::RadarConfig;
use crate::data::StatRepository;
use crate::pokemon::StatKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub label: String,
    // HP, Attack, Defense, Special Attack, Special Defense, Speed
    pub values: Vec<f64>,
    pub axis_names: Vec<String>,
}

impl RadarSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn build_profiles(repository: &StatRepository, selection: &Selection) -> Vec<RadarSeries> {
    let axis_names = StatKind::axis_names();

    selection
        .chosen()
        .map(|(slot, name)| match repository.creature(name) {
            Ok(creature) => RadarSeries {
                label: creature.name.clone(),
                values: creature.stats.values().to_vec(),
                axis_names: axis_names.clone(),
            },
            Err(e) => {
                warn!("雷达图槽位 {} 降级为空序列: {}", slot, e);
                RadarSeries {
                    label: name.to_string(),
                    values: Vec::new(),
                    axis_names: axis_names.clone(),
                }
            }
        })
        .collect()
}

pub fn radar_figure(series: &[RadarSeries], config: &RadarConfig) -> Figure {
    let data = series
        .iter()
        .map(|s| {
            Trace::Scatterpolar(PolarTrace {
                r: s.values.clone(),
                theta: s.axis_names.clone(),
                name: s.label.clone(),
                fill: Some(config.fill.clone()),
            })
        })
        .collect::<Vec<_>>();

    debug!("雷达图: {} 条序列", data.len());

    Figure {
        data,
        layout: Layout {
            polar: Some(Polar {
                radialaxis: RadialAxis {
                    visible: true,
                    range: config.radial_range,
                },
            }),
            showlegend: Some(true),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_profiles_follow_selection_order() {
        let repo = fixtures::repository();
        let selection = Selection::new()
            .with_slot(0, "Squirtle")
            .with_slot(3, "Bulbasaur");

        let series = build_profiles(&repo, &selection);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Squirtle");
        assert_eq!(series[0].values, vec![44.0, 48.0, 65.0, 50.0, 64.0, 43.0]);
        assert_eq!(series[1].label, "Bulbasaur");
        assert_eq!(
            series[1].axis_names,
            vec!["HP", "Attack", "Defense", "Special Attack", "Special Defense", "Speed"]
        );
    }

    #[test]
    fn test_unknown_creature_gives_empty_series() {
        let repo = fixtures::repository();
        let selection = Selection::new()
            .with_slot(0, "Missingno")
            .with_slot(1, "Pikachu");

        let series = build_profiles(&repo, &selection);
        assert_eq!(series.len(), 2);
        assert!(series[0].is_empty());
        assert_eq!(series[0].label, "Missingno");
        assert!(!series[1].is_empty());
    }

    #[test]
    fn test_empty_selection_gives_no_series() {
        let repo = fixtures::repository();
        assert!(build_profiles(&repo, &Selection::new()).is_empty());
    }

    #[test]
    fn test_radar_figure_shape() {
        let repo = fixtures::repository();
        let series = build_profiles(&repo, &Selection::new().with_slot(2, "Onix"));
        let figure = radar_figure(&series, &RadarConfig::default());

        let value = serde_json::to_value(&figure).unwrap();
        assert_eq!(value["data"][0]["type"], "scatterpolar");
        assert_eq!(value["data"][0]["fill"], "toself");
        assert_eq!(value["data"][0]["name"], "Onix");
        assert_eq!(value["data"][0]["r"][2], 160.0);
        assert_eq!(value["layout"]["polar"]["radialaxis"]["range"], serde_json::json!([0.0, 100.0]));
        assert_eq!(value["layout"]["showlegend"], true);
    }
}
