//! # 数据模型与中间结果
//!
//! ## 设计思路
//!
//! 将“流水线各阶段的产物”显式建模：
//! - `LoadedImage` 表示已解码、尚未变换的图像及其源格式
//! - `RasterImage` 表示 8 位 RGBA 位图
//! - `TransformOutcome` 表示变换结果（已变换 / 无需变换）

use image::{DynamicImage, ImageFormat, RgbaImage};

use super::IconError;

/// 8 位 RGBA 位图，由当前持有它的阶段独占。
pub type RasterImage = RgbaImage;

/// 变换成功时的两种结果。
#[derive(Debug, Clone)]
pub enum TransformOutcome {
    /// 已生成目标尺寸的图标。
    Transformed(RasterImage),
    /// 源图已在目标尺寸内，未做任何处理。
    Skipped,
}

impl TransformOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn into_image(self) -> Option<RasterImage> {
        match self {
            Self::Transformed(image) => Some(image),
            Self::Skipped => None,
        }
    }
}

/// 变换结果；`Err` 即失败分支，携带失败原因。
pub type TransformResult = Result<TransformOutcome, IconError>;

/// 加载阶段输出：解码后的图像与嗅探到的源格式。
#[derive(Debug)]
pub struct LoadedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}
