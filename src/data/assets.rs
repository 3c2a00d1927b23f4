// 图片资源路径
// 只计算路径，不检查图片是否存在 (玩家头像目录除外)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use log::warn;
use crate::core::config::AssetConfig;

// 玩家角色头像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPortrait {
    pub label: String,
    pub path: PathBuf,
}

pub struct AssetResolver {
    config: AssetConfig,
}

impl AssetResolver {
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    // assets/images/<小写名称>.png
    pub fn creature_image(&self, name: &str) -> PathBuf {
        self.config
            .creature_images
            .join(format!("{}.{}", name.to_lowercase(), self.config.image_extension))
    }

    // assets/gen1_leaders/<首字母大写地点>_<小写领袖>.png
    pub fn leader_image(&self, location: &str, leader: &str) -> PathBuf {
        self.config.leader_images.join(format!(
            "{}_{}.{}",
            capitalize(location),
            leader.to_lowercase(),
            self.config.image_extension
        ))
    }

    pub fn list_player_portraits(&self) -> Vec<PlayerPortrait> {
        list_portraits(&self.config.player_images, &self.config.image_extension)
    }
}

// 首字母大写，其余小写
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

fn list_portraits(dir: &Path, extension: &str) -> Vec<PlayerPortrait> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("无法读取玩家头像目录 {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut portraits: Vec<PlayerPortrait> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension))
        .filter_map(|path| {
            let label = path.file_stem()?.to_string_lossy().to_string();
            Some(PlayerPortrait { label, path })
        })
        .collect();

    portraits.sort_by(|a, b| a.path.cmp(&b.path));
    portraits
}
