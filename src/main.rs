// ==========================================
// 护理排班系统 - 命令行主入口
// ==========================================
// 依据: Nursing_Roster_Master_Spec.md
// 技术栈: Rust + CSV 数据交换
// 系统定位: 决策支持系统
// ==========================================

use anyhow::{bail, Context, Result};
use nurse_roster::engine::{RunContext, ScheduleOrchestrator};
use nurse_roster::importer::{CsvExporter, PreferenceLoader, RosterLoader};
use nurse_roster::{logging, ConfigSnapshot, PreferenceStore};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// 解析后的命令行参数
struct CliArgs {
    year: i32,
    month: u32,
    roster: PathBuf,
    prefs: Option<PathBuf>,
    config: Option<PathBuf>,
    holidays: BTreeSet<u32>,
    out_dir: PathBuf,
}

fn print_usage() {
    println!("用法: nurse-roster <年> <月> --roster <花名册.csv> [选项]");
    println!();
    println!("选项:");
    println!("  --roster <路径>     花名册 CSV (必填)");
    println!("  --prefs <路径>      休假申请 CSV");
    println!("  --config <路径>     配置 JSON (缺省读用户配置目录, 再退回内建默认)");
    println!("  --holidays <清单>   国定假日, 逗号分隔的当月日期 (如 1,6,12)");
    println!("  --out-dir <路径>    输出目录 (默认当前目录)");
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    if args.len() < 2 {
        bail!("缺少必填参数 <年> <月>");
    }

    let year: i32 = args[0].parse().with_context(|| format!("年份非法: {}", args[0]))?;
    let month: u32 = args[1].parse().with_context(|| format!("月份非法: {}", args[1]))?;
    if !(1..=12).contains(&month) {
        bail!("月份必须在 1-12 之间: {}", month);
    }

    let mut roster = None;
    let mut prefs = None;
    let mut config = None;
    let mut holidays = BTreeSet::new();
    let mut out_dir = PathBuf::from(".");

    let mut iter = args[2..].iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .with_context(|| format!("选项 {} 缺少取值", flag))
        };
        match flag.as_str() {
            "--roster" => roster = Some(PathBuf::from(value()?)),
            "--prefs" => prefs = Some(PathBuf::from(value()?)),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--holidays" => {
                for part in value()?.split(',') {
                    let day: u32 = part
                        .trim()
                        .parse()
                        .with_context(|| format!("假日日期非法: {}", part))?;
                    holidays.insert(day);
                }
            }
            "--out-dir" => out_dir = PathBuf::from(value()?),
            other => bail!("未知选项: {}", other),
        }
    }

    let roster = roster.context("缺少必填选项 --roster")?;
    Ok(CliArgs {
        year,
        month,
        roster,
        prefs,
        config,
        holidays,
        out_dir,
    })
}

/// 配置装载顺序: --config 指定档 > 用户配置目录 > 内建默认
fn load_config(explicit: Option<&PathBuf>) -> Result<ConfigSnapshot> {
    if let Some(path) = explicit {
        let snapshot = ConfigSnapshot::load(path)
            .with_context(|| format!("配置装载失败: {}", path.display()))?;
        return Ok(snapshot);
    }

    if let Some(dir) = dirs::config_dir() {
        let path = dir.join("nurse-roster").join("config.json");
        if path.exists() {
            let snapshot = ConfigSnapshot::load(&path)
                .with_context(|| format!("配置装载失败: {}", path.display()))?;
            return Ok(snapshot);
        }
    }

    Ok(ConfigSnapshot::default())
}

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", nurse_roster::APP_NAME);
    tracing::info!("系统版本: {}", nurse_roster::VERSION);
    tracing::info!("==================================================");

    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|a| a == "--help" || a == "-h") || raw.is_empty() {
        print_usage();
        return Ok(());
    }

    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(err) => {
            print_usage();
            return Err(err);
        }
    };

    let snapshot = load_config(args.config.as_ref())?;
    snapshot.validate().context("配置校验失败")?;

    let roster = RosterLoader::new()
        .load(&args.roster)
        .with_context(|| format!("花名册导入失败: {}", args.roster.display()))?;
    let preferences = match &args.prefs {
        Some(path) => PreferenceLoader::new()
            .load(path)
            .with_context(|| format!("休假申请导入失败: {}", path.display()))?,
        None => PreferenceStore::new(),
    };

    let ctx = RunContext::assemble(
        args.year,
        args.month,
        roster,
        preferences,
        args.holidays,
        &snapshot.demand,
        snapshot.rules,
    );
    let result = ScheduleOrchestrator::new().run(&ctx);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("输出目录创建失败: {}", args.out_dir.display()))?;
    let stem = format!("{}{:02}", args.year, args.month);
    let exporter = CsvExporter::new();
    exporter.export_roster(&result, &args.out_dir.join(format!("roster_{}.csv", stem)))?;
    exporter.export_summaries(&result, &args.out_dir.join(format!("summary_{}.csv", stem)))?;
    exporter.export_compliance(&result, &args.out_dir.join(format!("compliance_{}.csv", stem)))?;
    exporter.export_result_json(&result, &args.out_dir.join(format!("result_{}.json", stem)))?;

    tracing::info!(
        run_id = %result.run_id,
        out_dir = %args.out_dir.display(),
        "排班完成, 三份报表与结果 JSON 已导出"
    );
    Ok(())
}
