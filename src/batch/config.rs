//! # 批处理配置模块
//!
//! ## 设计思路
//!
//! 原先散落在界面对象里的可变状态（所选目录、勾选框、缓存的文件列表）
//! 全部收敛为显式的 `BatchConfig`，由调用方一次性传给批处理驱动。
//!
//! ## 实现思路
//!
//! - `BatchSettings`：JSON 设置文件与命令行参数共用的“可选字段”形态，
//!   支持逐字段覆盖（命令行优先）。
//! - `BatchSettings::into_config`：补默认值并做数值校验，产出 `BatchConfig`。
//! - `BatchConfig::validate`：在接触任何文件之前检查目的地与源目录。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::icon::{
    LoadLimits, ResizeQuality, TransformConfig, DEFAULT_PADDING, DEFAULT_TARGET_HEIGHT,
    DEFAULT_TARGET_WIDTH,
};

/// 与源文件并存输出时插入在扩展名前的默认后缀。
pub const DEFAULT_SUFFIX: &str = "-sm";

/// 一次批处理运行所需的全部参数。
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub transform: TransformConfig,
    pub limits: LoadLimits,
    pub source_dir: PathBuf,
    /// 显式输出目录：`<output_dir>/<basename>`。
    pub output_dir: Option<PathBuf>,
    /// 与源文件并存输出：`<原目录>/<stem><suffix>.<ext>`。
    pub save_alongside_source: bool,
    pub suffix: String,
    /// 无需变换的源文件按原样复制到输出目录。
    pub copy_unaltered: bool,
}

impl BatchConfig {
    /// 以默认参数创建配置；至少还需要设置一个输出目的地。
    pub fn new(source_dir: impl Into<PathBuf>, transform: TransformConfig) -> Self {
        Self {
            transform,
            limits: LoadLimits::default(),
            source_dir: source_dir.into(),
            output_dir: None,
            save_alongside_source: false,
            suffix: DEFAULT_SUFFIX.to_string(),
            copy_unaltered: false,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_save_alongside_source(mut self, enabled: bool) -> Self {
        self.save_alongside_source = enabled;
        self
    }

    /// 在处理任何文件之前执行的整批校验。
    ///
    /// # 返回
    /// - `Ok(())` — 可以开始处理
    /// - `Err(AppError::InvalidConfig)` — 未选择目的地、源目录无效或后缀非法
    pub fn validate(&self) -> Result<(), AppError> {
        if self.output_dir.is_none() && !self.save_alongside_source {
            return Err(AppError::InvalidConfig(
                "未选择输出目的地：请指定输出目录或启用与源文件并存输出".to_string(),
            ));
        }

        if !self.source_dir.is_dir() {
            return Err(AppError::InvalidConfig(format!(
                "源目录不存在或不是目录: {}",
                self.source_dir.display()
            )));
        }

        if self.save_alongside_source && self.suffix.is_empty() {
            return Err(AppError::InvalidConfig(
                "与源文件并存输出时后缀不能为空，否则会覆盖源文件".to_string(),
            ));
        }

        if self.suffix.contains(['/', '\\']) {
            return Err(AppError::InvalidConfig(format!("后缀不能包含路径分隔符: {}", self.suffix)));
        }

        if self.copy_unaltered && self.output_dir.is_none() {
            return Err(AppError::InvalidConfig(
                "复制未变换文件需要指定输出目录".to_string(),
            ));
        }

        if let Some(output_dir) = &self.output_dir {
            if same_directory(output_dir, &self.source_dir) {
                log::warn!(
                    "⚠️ 输出目录与源目录相同，同名文件将被覆盖: {}",
                    output_dir.display()
                );
            }
        }

        Ok(())
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// 设置文件 / 命令行参数的可选字段形态。
///
/// 数值字段使用有符号整数接收，负数在 `into_config` 中被明确拒绝为配置错误。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchSettings {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub save_alongside_source: Option<bool>,
    pub target_width: Option<i64>,
    pub target_height: Option<i64>,
    pub padding: Option<i64>,
    pub resize_quality: Option<ResizeQuality>,
    pub suffix: Option<String>,
    pub copy_unaltered: Option<bool>,
    pub max_file_size: Option<u64>,
    pub max_decoded_pixels: Option<u64>,
}

impl BatchSettings {
    /// 从 JSON 设置文件读取。
    pub fn load_from_path(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Settings(format!("读取设置文件 '{}' 失败: {}", path.display(), e)))?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::Settings(format!("解析设置文件 '{}' 失败: {}", path.display(), e)))
    }

    /// 逐字段合并，`overrides` 中已设置的字段优先。
    pub fn merge(self, overrides: BatchSettings) -> BatchSettings {
        BatchSettings {
            source_dir: overrides.source_dir.or(self.source_dir),
            output_dir: overrides.output_dir.or(self.output_dir),
            save_alongside_source: overrides.save_alongside_source.or(self.save_alongside_source),
            target_width: overrides.target_width.or(self.target_width),
            target_height: overrides.target_height.or(self.target_height),
            padding: overrides.padding.or(self.padding),
            resize_quality: overrides.resize_quality.or(self.resize_quality),
            suffix: overrides.suffix.or(self.suffix),
            copy_unaltered: overrides.copy_unaltered.or(self.copy_unaltered),
            max_file_size: overrides.max_file_size.or(self.max_file_size),
            max_decoded_pixels: overrides.max_decoded_pixels.or(self.max_decoded_pixels),
        }
    }

    /// 补齐默认值并校验数值，产出 `BatchConfig`。
    ///
    /// 这里只做数值层面的校验；目的地与源目录的检查由 `BatchConfig::validate` 负责。
    pub fn into_config(self) -> Result<BatchConfig, AppError> {
        let source_dir = self
            .source_dir
            .ok_or_else(|| AppError::InvalidConfig("未指定源目录".to_string()))?;

        let transform = TransformConfig::from_signed(
            self.target_width.unwrap_or(i64::from(DEFAULT_TARGET_WIDTH)),
            self.target_height.unwrap_or(i64::from(DEFAULT_TARGET_HEIGHT)),
            self.padding.unwrap_or(i64::from(DEFAULT_PADDING)),
        )
        .map_err(|e| AppError::InvalidConfig(e.to_string()))?
        .with_resize_quality(self.resize_quality.unwrap_or_default());

        let defaults = LoadLimits::default();
        let limits = LoadLimits {
            max_file_size: self.max_file_size.unwrap_or(defaults.max_file_size),
            max_decoded_pixels: self.max_decoded_pixels.unwrap_or(defaults.max_decoded_pixels),
        };

        Ok(BatchConfig {
            transform,
            limits,
            source_dir,
            output_dir: self.output_dir,
            save_alongside_source: self.save_alongside_source.unwrap_or(false),
            suffix: self.suffix.unwrap_or_else(|| DEFAULT_SUFFIX.to_string()),
            copy_unaltered: self.copy_unaltered.unwrap_or(false),
        })
    }
}
