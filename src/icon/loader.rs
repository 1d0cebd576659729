//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理本地文件的原始字节读取与解码，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要的内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 格式：按内容嗅探，只接受 PNG / JPEG / GIF。
//! - 尺寸：先读 header 宽高做像素上限检查，再完整解码。

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use super::source::LoadedImage;
use super::{IconError, IconHandler, LoadLimits};

/// 允许的源图格式。
pub const SUPPORTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif];

impl IconHandler {
    /// 从本地路径读取并解码图片。
    pub fn load_from_file(&self, path: &Path) -> Result<LoadedImage, IconError> {
        log::debug!("📁 开始读取本地图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(IconError::FileSystem(format!("文件不存在：{}", path.display())));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| IconError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        let limits = self.limits();
        if metadata.len() > limits.max_file_size {
            return Err(IconError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                limits.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| IconError::FileSystem(format!("无法读取图片文件：{}", e)))?;

        decode_from_memory(&bytes, limits)
    }
}

/// 将内存中的图片字节解码为 `LoadedImage`。
pub fn decode_from_memory(bytes: &[u8], limits: &LoadLimits) -> Result<LoadedImage, IconError> {
    let format = image::guess_format(bytes)
        .map_err(|e| IconError::Decode(format!("无法识别图片格式：{}", e)))?;

    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(IconError::Decode(format!("不支持的图片格式：{:?}", format)));
    }

    let (width, height) = inspect_dimensions(bytes, format)?;
    validate_pixel_limits(limits, width, height)?;

    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| IconError::Decode(format!("图片解码失败：{}", e)))?;

    Ok(LoadedImage { image, format })
}

/// 仅通过图片头信息读取宽高，用于在完整解码前做像素限制检查。
fn inspect_dimensions(bytes: &[u8], format: ImageFormat) -> Result<(u32, u32), IconError> {
    ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| IconError::Decode(format!("无法读取图片尺寸：{}", e)))
}

fn validate_pixel_limits(limits: &LoadLimits, width: u32, height: u32) -> Result<(), IconError> {
    let pixels = u64::from(width) * u64::from(height);

    if pixels > limits.max_decoded_pixels {
        return Err(IconError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, limits.max_decoded_pixels
        )));
    }

    Ok(())
}
