// 头像面板
// 领袖卡片、领袖队伍图片、六个槽位图片

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use log::warn;
use crate::charts::Selection;
use crate::constants::MAX_SLOTS;
use crate::data::{AssetResolver, StatRepository};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderCard {
    pub name: String,
    pub image: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortraitPanel {
    pub leader: Option<LeaderCard>,
    pub team_images: Vec<PathBuf>,
    // 与槽位一一对应，空槽或未知名称为 None
    pub slot_images: Vec<Option<PathBuf>>,
    pub player_image: Option<PathBuf>,
}

pub fn build_portraits(
    repository: &StatRepository,
    selection: &Selection,
    assets: &AssetResolver,
) -> PortraitPanel {
    let (leader, team_images) = match selection.leader.as_deref() {
        Some(name) => match repository.leader_location(name) {
            Ok(location) => (
                Some(LeaderCard {
                    name: name.to_string(),
                    image: assets.leader_image(location, name),
                }),
                repository
                    .leader_members(name)
                    .into_iter()
                    .map(|member| assets.creature_image(member))
                    .collect(),
            ),
            Err(e) => {
                warn!("头像面板: {}", e);
                (None, Vec::new())
            }
        },
        None => (None, Vec::new()),
    };

    let mut slot_images = vec![None; MAX_SLOTS];
    for (slot, name) in selection.chosen() {
        match repository.creature(name) {
            Ok(creature) => slot_images[slot] = Some(assets.creature_image(&creature.image_key)),
            Err(e) => warn!("槽位 {} 无图片: {}", slot, e),
        }
    }

    PortraitPanel {
        leader,
        team_images,
        slot_images,
        player_image: selection.player.as_ref().map(PathBuf::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AssetConfig;
    use crate::data::fixtures;
    use std::path::Path;

    #[test]
    fn test_leader_card_and_team() {
        let repo = fixtures::repository();
        let assets = AssetResolver::new(AssetConfig::default());
        let selection = Selection::new().with_leader("Brock");

        let panel = build_portraits(&repo, &selection, &assets);
        let card = panel.leader.unwrap();
        assert_eq!(card.name, "Brock");
        assert_eq!(card.image, Path::new("assets/gen1_leaders/Pewter_brock.png"));
        assert_eq!(
            panel.team_images,
            vec![
                PathBuf::from("assets/images/geodude.png"),
                PathBuf::from("assets/images/onix.png")
            ]
        );
        assert!(panel.slot_images.iter().all(Option::is_none));
    }

    #[test]
    fn test_slot_images() {
        let repo = fixtures::repository();
        let assets = AssetResolver::new(AssetConfig::default());
        let selection = Selection::new()
            .with_slot(1, "Pikachu")
            .with_slot(4, "Missingno");

        let panel = build_portraits(&repo, &selection, &assets);
        assert_eq!(panel.slot_images.len(), MAX_SLOTS);
        assert_eq!(panel.slot_images[1], Some(PathBuf::from("assets/images/pikachu.png")));
        assert_eq!(panel.slot_images[4], None);
        assert!(panel.leader.is_none());
        assert!(panel.team_images.is_empty());
    }

    #[test]
    fn test_unknown_leader_and_player_passthrough() {
        let repo = fixtures::repository();
        let assets = AssetResolver::new(AssetConfig::default());
        let mut selection = Selection::new().with_leader("Giovanni");
        selection.player = Some("assets/players/red.png".to_string());

        let panel = build_portraits(&repo, &selection, &assets);
        assert!(panel.leader.is_none());
        assert_eq!(panel.player_image, Some(PathBuf::from("assets/players/red.png")));
    }
}
