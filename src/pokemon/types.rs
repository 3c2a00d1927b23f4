// Pokemon属性系统
// 15种属性的固定顺序与15×15相克表，进程级只读常量

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::core::error::{DashboardError, Result};

pub const TYPE_COUNT: usize = 15;

// Pokemon属性类型 (顺序即相克表索引)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PokemonType {
    Normal = 0,     // 一般
    Fire = 1,       // 火
    Water = 2,      // 水
    Electric = 3,   // 电
    Grass = 4,      // 草
    Ice = 5,        // 冰
    Fighting = 6,   // 格斗
    Poison = 7,     // 毒
    Ground = 8,     // 地面
    Flying = 9,     // 飞行
    Psychic = 10,   // 超能力
    Bug = 11,       // 虫
    Rock = 12,      // 岩石
    Ghost = 13,     // 幽灵
    Dragon = 14,    // 龙
}

impl PokemonType {
    pub const ALL: [PokemonType; TYPE_COUNT] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Electric,
        PokemonType::Grass,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PokemonType::Normal => "Normal",
            PokemonType::Fire => "Fire",
            PokemonType::Water => "Water",
            PokemonType::Electric => "Electric",
            PokemonType::Grass => "Grass",
            PokemonType::Ice => "Ice",
            PokemonType::Fighting => "Fighting",
            PokemonType::Poison => "Poison",
            PokemonType::Ground => "Ground",
            PokemonType::Flying => "Flying",
            PokemonType::Psychic => "Psychic",
            PokemonType::Bug => "Bug",
            PokemonType::Rock => "Rock",
            PokemonType::Ghost => "Ghost",
            PokemonType::Dragon => "Dragon",
        }
    }

    // 名称必须与属性表完全一致 (区分大小写)
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .ok_or_else(|| crate::dashboard_error!(UnknownType, "属性 {} 不在属性表中", name))
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PokemonType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

// 属性效果倍率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effectiveness {
    NoEffect,          // 无效 (0倍)
    NotVeryEffective,  // 效果不佳 (0.5倍)
    Normal,            // 普通效果 (1倍)
    SuperEffective,    // 效果拔群 (2倍)
}

impl Effectiveness {
    // 图例顺序
    pub const LEGEND_ORDER: [Effectiveness; 4] = [
        Effectiveness::SuperEffective,
        Effectiveness::Normal,
        Effectiveness::NotVeryEffective,
        Effectiveness::NoEffect,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Effectiveness::NoEffect => 0.0,
            Effectiveness::NotVeryEffective => 0.5,
            Effectiveness::Normal => 1.0,
            Effectiveness::SuperEffective => 2.0,
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            Effectiveness::SuperEffective => "Super Effective (2x)",
            Effectiveness::Normal => "Normal Effectiveness (1x)",
            Effectiveness::NotVeryEffective => "Not Very Effective (0.5x)",
            Effectiveness::NoEffect => "No Effect (0x)",
        }
    }
}

use Effectiveness::{NotVeryEffective as H, Normal as N, SuperEffective as S};

// [攻击属性][防御属性]
const STANDARD_CHART: [[Effectiveness; TYPE_COUNT]; TYPE_COUNT] = [
    //Nor Fir Wat Ele Gra Ice Fig Poi Gro Fly Psy Bug Roc Gho Dra
    [N, N, N, N, N, N, N, N, N, N, N, N, N, N, N], // Normal
    [N, N, N, N, S, N, N, N, N, N, N, S, S, N, N], // Fire
    [N, N, N, N, H, N, N, N, S, N, N, N, S, N, N], // Water
    [N, N, N, N, N, N, N, N, N, S, N, N, N, N, N], // Electric
    [N, H, S, N, N, N, N, N, S, N, N, N, S, N, N], // Grass
    [N, N, N, N, N, N, S, N, S, N, N, S, S, N, S], // Ice
    [S, N, N, N, N, N, N, N, N, N, H, S, S, N, N], // Fighting
    [N, N, N, N, N, N, N, N, N, N, N, N, N, S, N], // Poison
    [N, N, S, S, N, N, N, N, N, N, N, N, S, N, S], // Ground
    [N, N, N, N, N, N, N, N, N, N, N, N, N, N, N], // Flying
    [N, N, N, N, N, N, N, N, N, N, S, N, N, N, N], // Psychic
    [N, N, N, N, N, N, N, N, N, N, N, N, S, N, N], // Bug
    [N, N, N, N, N, N, S, N, H, N, N, N, N, N, N], // Rock
    [N, N, N, N, N, N, N, N, N, N, N, N, N, S, N], // Ghost
    [N, N, N, N, N, N, N, N, N, N, N, N, N, N, S], // Dragon
];

// 相克表不对称；部分格子与正作不同，以此表为准
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeChart {
    cells: [[Effectiveness; TYPE_COUNT]; TYPE_COUNT],
}

pub static TYPE_CHART: TypeChart = TypeChart::standard();

impl TypeChart {
    pub const fn standard() -> Self {
        Self { cells: STANDARD_CHART }
    }

    pub fn effectiveness(&self, attacker: PokemonType, defender: PokemonType) -> Effectiveness {
        self.cells[attacker.index()][defender.index()]
    }

    pub fn multiplier(&self, attacker: PokemonType, defender: PokemonType) -> f64 {
        self.effectiveness(attacker, defender).multiplier()
    }

    // 按名称查表，任一名称未知即报错
    pub fn lookup(&self, attacker: &str, defender: &str) -> Result<Effectiveness> {
        let attacker = PokemonType::from_name(attacker)?;
        let defender = PokemonType::from_name(defender)?;
        Ok(self.effectiveness(attacker, defender))
    }

}

impl Default for TypeChart {
    fn default() -> Self {
        Self::standard()
    }
}
