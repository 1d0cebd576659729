//! # 批处理报告模块
//!
//! ## 设计思路
//!
//! 每个文件对应一条记录，失败记录携带错误码、阶段与原因，保证每个失败都能追溯到
//! 具体文件。汇总统计由记录实时计算，避免计数与明细不一致。

use std::path::PathBuf;

use serde::Serialize;

use crate::icon::IconError;

/// 单个文件的最终状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// 已变换并写入全部目的地。
    Altered { outputs: Vec<PathBuf> },
    /// 源图已在目标尺寸内；`copied_to` 为按原样复制的位置（如有）。
    Unaltered { copied_to: Option<PathBuf> },
    /// 处理失败；`outputs` 为失败前后已成功写入的目的地，可能非空。
    Failed {
        code: &'static str,
        stage: &'static str,
        reason: String,
        outputs: Vec<PathBuf>,
    },
}

impl FileStatus {
    pub fn failed(error: &IconError) -> Self {
        Self::failed_with_outputs(error, Vec::new())
    }

    /// 部分目的地写入成功后的失败状态。
    pub fn failed_with_outputs(error: &IconError, outputs: Vec<PathBuf>) -> Self {
        Self::Failed {
            code: error.code(),
            stage: error.stage(),
            reason: error.to_string(),
            outputs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub source: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// 汇总统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchTally {
    pub altered: usize,
    pub unaltered: usize,
    pub failed: usize,
}

impl BatchTally {
    pub fn total(&self) -> usize {
        self.altered + self.unaltered + self.failed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub records: Vec<FileRecord>,
}

impl BatchReport {
    pub fn push(&mut self, source: PathBuf, status: FileStatus) {
        self.records.push(FileRecord { source, status });
    }

    pub fn tally(&self) -> BatchTally {
        self.records
            .iter()
            .fold(BatchTally::default(), |mut tally, record| {
                match record.status {
                    FileStatus::Altered { .. } => tally.altered += 1,
                    FileStatus::Unaltered { .. } => tally.unaltered += 1,
                    FileStatus::Failed { .. } => tally.failed += 1,
                }
                tally
            })
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileRecord> {
        self.records
            .iter()
            .filter(|record| matches!(record.status, FileStatus::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// 报告与汇总一起序列化为 JSON。
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Output<'a> {
            tally: BatchTally,
            records: &'a [FileRecord],
        }

        serde_json::to_string_pretty(&Output {
            tally: self.tally(),
            records: &self.records,
        })
    }
}
