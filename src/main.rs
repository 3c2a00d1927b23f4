// 道馆领袖对战仪表盘命令行入口
// 加载数据，按命令行给出的选择计算图表，以JSON输出到标准输出

use anyhow::Context;
use clap::{Parser, ValueEnum};
use leader_dashboard::{ConfigManager, Dashboard, Selection};
use log::{error, info};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartKind {
    Radar,
    Distribution,
    Matchup,
    Portraits,
    All,
}

#[derive(Debug, Parser)]
#[command(name = "leader_dashboard", version, about = "道馆领袖对战分析仪表盘")]
struct Cli {
    /// 配置文件路径 (默认 config/dashboard.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 对手领袖
    #[arg(short, long)]
    leader: Option<String>,

    /// 用户队伍宝可梦，可重复，最多6个
    #[arg(short, long = "slot")]
    slots: Vec<String>,

    /// 玩家头像路径
    #[arg(short, long)]
    player: Option<String>,

    /// 领袖属性行改从SQLite数据库读取
    #[arg(long)]
    database: Option<PathBuf>,

    /// 分布图同值错开步长
    #[arg(long)]
    offset_step: Option<f64>,

    #[arg(long, value_enum, default_value_t = ChartKind::All)]
    chart: ChartKind,

    #[arg(long)]
    pretty: bool,

    #[arg(long)]
    list_leaders: bool,

    #[arg(long)]
    list_creatures: bool,

    #[arg(long)]
    list_players: bool,
}

fn main() {
    // 初始化日志系统
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    info!("启动领袖对战仪表盘 v{}", leader_dashboard::VERSION);

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("运行失败: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::open(path.clone()),
        None => ConfigManager::new(),
    }
    .context("加载配置失败")?;

    let mut config = manager.config().clone();
    ConfigManager::apply_overrides(&mut config, cli.database.clone(), cli.offset_step)
        .context("命令行覆盖无效")?;

    let dashboard = Dashboard::load(config).context("加载数据失败")?;
    let output = render(&dashboard, cli)?;

    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(text)
}

fn build_selection(cli: &Cli) -> leader_dashboard::Result<Selection> {
    let mut selection = Selection::from_slots(cli.leader.clone(), cli.slots.iter().cloned())?;
    selection.player = cli.player.clone();
    Ok(selection)
}

fn render(dashboard: &Dashboard, cli: &Cli) -> anyhow::Result<Value> {
    let repository = dashboard.repository();

    if cli.list_leaders {
        return Ok(json!(repository.leaders()));
    }
    if cli.list_creatures {
        return Ok(json!(repository.creature_names()));
    }
    if cli.list_players {
        return Ok(serde_json::to_value(dashboard.player_portraits())?);
    }

    let selection = build_selection(cli)?;
    let value = match cli.chart {
        ChartKind::Radar => serde_json::to_value(dashboard.radar(&selection))?,
        ChartKind::Distribution => serde_json::to_value(dashboard.distribution(&selection))?,
        ChartKind::Matchup => serde_json::to_value(dashboard.matchup(&selection))?,
        ChartKind::Portraits => serde_json::to_value(dashboard.portraits(&selection))?,
        ChartKind::All => serde_json::to_value(dashboard.render(&selection))?,
    };
    Ok(value)
}
