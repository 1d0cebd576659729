//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconHandler` 只负责单个文件的流程编排，不关心批次与输出目的地。
//! 处理链路固定为：
//! 1. 读取并校验源文件
//! 2. 解码为 `DynamicImage`
//! 3. 执行纯函数变换
//!
//! ## 实现思路
//!
//! - 配置在构造时一次性传入且不可变，整条链路使用同一份参数。
//! - 记录 `load/transform/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView, ImageFormat};

use super::pipeline;
use super::source::{TransformOutcome, TransformResult};
use super::{IconError, LoadLimits, TransformConfig};

/// 图标处理器。
///
/// 封装变换配置与加载限制，编排各子模块完成单个文件的处理。
#[derive(Debug, Clone)]
pub struct IconHandler {
    config: TransformConfig,
    limits: LoadLimits,
}

/// 单个文件的处理结果。
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub outcome: TransformOutcome,
    /// 按内容嗅探到的源格式。
    pub format: ImageFormat,
    pub source_dimensions: (u32, u32),
}

impl IconHandler {
    /// # 示例
    /// ```rust
    /// use icon_batch_reducer::icon::{IconHandler, LoadLimits, TransformConfig};
    ///
    /// let handler = IconHandler::new(TransformConfig::default(), LoadLimits::default());
    /// assert_eq!(handler.config().target_width(), 200);
    /// ```
    pub fn new(config: TransformConfig, limits: LoadLimits) -> Self {
        Self { config, limits }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn limits(&self) -> &LoadLimits {
        &self.limits
    }

    /// 对已解码图像执行变换。
    pub fn transform(&self, image: DynamicImage) -> TransformResult {
        pipeline::transform(image, &self.config)
    }

    /// 处理主入口：读取、解码并变换单个文件。
    pub fn process_file(&self, path: &Path) -> Result<ProcessedFile, IconError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let loaded = self.load_from_file(path)?;
        let load_elapsed = load_start.elapsed();

        let source_dimensions = loaded.image.dimensions();

        let transform_start = Instant::now();
        let outcome = self.transform(loaded.image)?;
        let transform_elapsed = transform_start.elapsed();

        log::info!(
            "✅ 图片处理完成 - {} {}x{} {} load={}ms transform={}ms total={}ms",
            path.display(),
            source_dimensions.0,
            source_dimensions.1,
            if outcome.is_skipped() { "skipped" } else { "transformed" },
            load_elapsed.as_millis(),
            transform_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(ProcessedFile {
            outcome,
            format: loaded.format,
            source_dimensions,
        })
    }
}
