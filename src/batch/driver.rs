//! # 批处理驱动模块
//!
//! ## 设计思路
//!
//! 驱动只负责“校验 → 枚举 → 逐个处理 → 写出 → 汇总”，单个文件的加载与变换
//! 全部委托 `IconHandler`。处理严格串行；单个文件失败只记录，不中断批次，不重试。
//!
//! ## 实现思路
//!
//! - `run`：流式处理，每个文件的图像在写出后立即释放。
//! - `plan` + `commit`：先为全部文件计算一次结果（供预览），确认后直接写出计划中
//!   持有的结果，不重复计算，保证预览与输出一致。
//! - 枚举结果在处理前一次性收集，避免本次写出的文件被同一批次再次扫描到。

use std::fs;
use std::path::{Path, PathBuf};

use super::destination::{destinations, output_path};
use super::enumerator::enumerate_images;
use super::report::{BatchReport, FileStatus};
use super::BatchConfig;
use crate::error::AppError;
use crate::icon::{IconError, IconHandler, ProcessedFile, TransformOutcome};

/// 批处理驱动。
#[derive(Debug, Clone)]
pub struct BatchDriver {
    config: BatchConfig,
    handler: IconHandler,
}

/// 预览计划中的单个文件：已计算的结果与将要写入的目的地。
#[derive(Debug)]
pub struct PlannedFile {
    pub source: PathBuf,
    pub result: Result<ProcessedFile, IconError>,
    pub destinations: Vec<PathBuf>,
}

impl PlannedFile {
    /// 预览用：变换后的图标（如有）。
    pub fn preview(&self) -> Option<&crate::icon::RasterImage> {
        match &self.result {
            Ok(ProcessedFile {
                outcome: TransformOutcome::Transformed(icon),
                ..
            }) => Some(icon),
            _ => None,
        }
    }
}

/// 两阶段流程的第一阶段产物。
#[derive(Debug, Default)]
pub struct BatchPlan {
    pub files: Vec<PlannedFile>,
}

impl BatchPlan {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl BatchDriver {
    pub fn new(config: BatchConfig) -> Self {
        let handler = IconHandler::new(config.transform, config.limits);
        Self { config, handler }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// 整批校验并收集待处理文件；任何错误都发生在接触文件之前。
    fn collect_sources(&self) -> Result<Vec<PathBuf>, AppError> {
        self.config.validate()?;

        let sources: Vec<PathBuf> = enumerate_images(&self.config.source_dir).collect();
        if sources.is_empty() {
            return Err(AppError::EmptySource(self.config.source_dir.clone()));
        }

        log::info!(
            "🔍 在 {} 中找到 {} 张待处理图片",
            self.config.source_dir.display(),
            sources.len()
        );
        Ok(sources)
    }

    /// 流式处理整个批次。
    pub fn run(&self) -> Result<BatchReport, AppError> {
        let sources = self.collect_sources()?;
        let mut report = BatchReport::default();

        for source in sources {
            let status = match self.handler.process_file(&source) {
                Ok(processed) => self.commit_outcome(&source, processed.outcome),
                Err(err) => FileStatus::failed(&err),
            };
            log_status(&source, &status);
            report.push(source, status);
        }

        log_tally(&report);
        Ok(report)
    }

    /// 为全部文件计算变换结果，不写任何文件。
    pub fn plan(&self) -> Result<BatchPlan, AppError> {
        let sources = self.collect_sources()?;

        let files = sources
            .into_iter()
            .map(|source| {
                let result = self.handler.process_file(&source);
                let destinations = destinations(&self.config, &source);
                PlannedFile {
                    source,
                    result,
                    destinations,
                }
            })
            .collect();

        Ok(BatchPlan { files })
    }

    /// 写出计划中已计算好的结果。
    pub fn commit(&self, plan: BatchPlan) -> BatchReport {
        let mut report = BatchReport::default();

        for planned in plan.files {
            let status = match planned.result {
                Ok(processed) => self.commit_outcome(&planned.source, processed.outcome),
                Err(err) => FileStatus::failed(&err),
            };
            log_status(&planned.source, &status);
            report.push(planned.source, status);
        }

        log_tally(&report);
        report
    }

    fn commit_outcome(&self, source: &Path, outcome: TransformOutcome) -> FileStatus {
        match outcome {
            TransformOutcome::Transformed(icon) => {
                // 每个目的地都尝试写入，失败记录中保留已写出的路径
                let mut outputs = Vec::new();
                let mut first_error = None;
                for target in destinations(&self.config, source) {
                    match self.handler.write_icon(&icon, &target) {
                        Ok(()) => outputs.push(target),
                        Err(err) => {
                            log::warn!("❌ 写入失败: {}", err);
                            first_error.get_or_insert(err);
                        }
                    }
                }
                match first_error {
                    Some(err) => FileStatus::failed_with_outputs(&err, outputs),
                    None => FileStatus::Altered { outputs },
                }
            }
            TransformOutcome::Skipped => match self.copy_unaltered(source) {
                Ok(copied_to) => FileStatus::Unaltered { copied_to },
                Err(err) => FileStatus::failed(&err),
            },
        }
    }

    fn copy_unaltered(&self, source: &Path) -> Result<Option<PathBuf>, IconError> {
        let output_dir = match (&self.config.output_dir, self.config.copy_unaltered) {
            (Some(dir), true) => dir,
            _ => return Ok(None),
        };

        let target = output_path(output_dir, source);
        if is_same_file(source, &target) {
            return Ok(None);
        }

        fs::create_dir_all(output_dir).map_err(|e| {
            IconError::Write(format!("创建输出目录 '{}' 失败：{}", output_dir.display(), e))
        })?;
        fs::copy(source, &target).map_err(|e| {
            IconError::Write(format!("复制到 '{}' 失败：{}", target.display(), e))
        })?;

        Ok(Some(target))
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn log_status(source: &Path, status: &FileStatus) {
    match status {
        FileStatus::Altered { outputs } => {
            log::info!("🖼️ 已生成图标: {} -> {} 个目的地", source.display(), outputs.len());
        }
        FileStatus::Unaltered { .. } => {
            log::info!("⏭️ 已在目标尺寸内，未变换: {}", source.display());
        }
        FileStatus::Failed { stage, reason, outputs, .. } => {
            log::warn!(
                "❌ 处理失败 [{}]: {} - {}（已写出 {} 个目的地）",
                stage,
                source.display(),
                reason,
                outputs.len()
            );
        }
    }
}

fn log_tally(report: &BatchReport) {
    let tally = report.tally();
    log::info!(
        "📊 批处理完成 - 已变换: {} 未变换: {} 失败: {}",
        tally.altered,
        tally.unaltered,
        tally.failed
    );
}
