//! # 图标批量缩减工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与结果输出。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use icon_batch_reducer::batch::{BatchDriver, BatchPlan, BatchReport, BatchSettings, FileStatus};
use icon_batch_reducer::error::AppError;
use icon_batch_reducer::icon::ResizeQuality;

/// 将目录中的图片批量转换为固定尺寸、带透明留白的图标。
#[derive(Debug, Parser)]
#[command(name = "icon-batch-reducer", version, about)]
struct Cli {
    /// 源目录（递归扫描 png / jpg / jpeg / gif）
    source_dir: Option<PathBuf>,

    /// 输出目录：<输出目录>/<文件名>
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// 在源文件旁输出 <文件名><后缀>.<扩展名>
    #[arg(short, long)]
    alongside: bool,

    /// 目标宽度（像素）
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// 目标高度（像素）
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// 四周留白（像素）
    #[arg(short, long, allow_negative_numbers = true)]
    padding: Option<i64>,

    /// 缩放档位：quality / balanced / speed
    #[arg(short, long)]
    quality: Option<ResizeQuality>,

    /// 并存输出时插入的文件名后缀
    #[arg(long)]
    suffix: Option<String>,

    /// 无需变换的图片按原样复制到输出目录
    #[arg(long)]
    copy_unaltered: bool,

    /// 单个源文件体积上限（字节）
    #[arg(long)]
    max_file_size: Option<u64>,

    /// 解码像素上限
    #[arg(long)]
    max_decoded_pixels: Option<u64>,

    /// JSON 设置文件，命令行参数优先
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 只计算并预览结果，不写任何文件
    #[arg(long)]
    dry_run: bool,

    /// 以 JSON 输出报告
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> BatchSettings {
        BatchSettings {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            save_alongside_source: self.alongside.then_some(true),
            target_width: self.width,
            target_height: self.height,
            padding: self.padding,
            resize_quality: self.quality,
            suffix: self.suffix.clone(),
            copy_unaltered: self.copy_unaltered.then_some(true),
            max_file_size: self.max_file_size,
            max_decoded_pixels: self.max_decoded_pixels,
        }
    }
}

/// 没有文件失败。
const EXIT_OK: u8 = 0;
/// 批次完成，但部分文件失败。
const EXIT_FILE_FAILURES: u8 = 1;
/// 批次无法开始（配置、设置文件、源目录等）。
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    ExitCode::from(execute(&cli))
}

/// 执行一次批处理并映射为进程退出码。
fn execute(cli: &Cli) -> u8 {
    match run(cli) {
        Ok(true) => EXIT_FILE_FAILURES,
        Ok(false) => EXIT_OK,
        Err(err) => {
            log::error!("❌ 批处理无法开始: {err}");
            eprintln!("错误: {err}");
            EXIT_FATAL
        }
    }
}

/// 设置文件为基础，命令行参数覆盖其上。
fn resolve_settings(cli: &Cli) -> Result<BatchSettings, AppError> {
    let base = match &cli.config {
        Some(path) => BatchSettings::load_from_path(path)?,
        None => BatchSettings::default(),
    };
    Ok(base.merge(cli.overrides()))
}

fn run(cli: &Cli) -> Result<bool, AppError> {
    let config = resolve_settings(cli)?.into_config()?;
    let driver = BatchDriver::new(config);

    if cli.dry_run {
        let plan = driver.plan()?;
        print_plan(&plan, cli.json)?;
        return Ok(plan.files.iter().any(|file| file.result.is_err()));
    }

    let report = driver.run()?;
    print_report(&report, cli.json)?;
    Ok(report.has_failures())
}

fn print_plan(plan: &BatchPlan, json: bool) -> Result<(), AppError> {
    if json {
        let entries: Vec<serde_json::Value> = plan
            .files
            .iter()
            .map(|file| {
                let action = match &file.result {
                    Ok(processed) if processed.outcome.is_skipped() => "skip",
                    Ok(_) => "transform",
                    Err(_) => "fail",
                };
                serde_json::json!({
                    "source": file.source,
                    "action": action,
                    "destinations": file.destinations,
                    "error": file.result.as_ref().err().map(|e| e.to_string()),
                })
            })
            .collect();
        let text = serde_json::to_string_pretty(&entries)
            .map_err(|e| AppError::Report(format!("序列化预览失败: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    for file in &plan.files {
        match &file.result {
            Ok(processed) if processed.outcome.is_skipped() => {
                println!("跳过  {}", file.source.display());
            }
            Ok(processed) => {
                let (w, h) = processed.source_dimensions;
                let (tw, th) = file.preview().map(|icon| icon.dimensions()).unwrap_or((0, 0));
                println!("变换  {} ({w}x{h} -> {tw}x{th})", file.source.display());
                for target in &file.destinations {
                    println!("      -> {}", target.display());
                }
            }
            Err(err) => println!("失败  {}: {err}", file.source.display()),
        }
    }
    println!("共 {} 个文件（预览模式，未写入）", plan.len());
    Ok(())
}

fn print_report(report: &BatchReport, json: bool) -> Result<(), AppError> {
    if json {
        let text = report
            .to_json()
            .map_err(|e| AppError::Report(format!("序列化报告失败: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    for record in report.failures() {
        if let FileStatus::Failed { reason, outputs, .. } = &record.status {
            println!("失败  {}: {reason}", record.source.display());
            for written in outputs {
                println!("      已写出 -> {}", written.display());
            }
        }
    }

    let tally = report.tally();
    println!(
        "完成：已变换 {}，未变换 {}，失败 {}",
        tally.altered, tally.unaltered, tally.failed
    );
    Ok(())
}
