//! # 写入模块
//!
//! ## 设计思路
//!
//! 按目标路径扩展名决定输出格式，保持与源文件同一格式族。
//! JPEG 不支持透明通道，写入前先合成到白色背景上。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use super::source::RasterImage;
use super::{IconError, IconHandler};

/// 根据扩展名推断输出格式；未知或缺失时回退 PNG。
pub fn output_format_for(path: &Path) -> ImageFormat {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
        Some("gif") => ImageFormat::Gif,
        _ => ImageFormat::Png,
    }
}

/// 将 RGBA 图标按 alpha 合成到白色背景。
pub fn flatten_onto_white(image: &RasterImage) -> RgbImage {
    let (width, height) = image.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

impl IconHandler {
    /// 将图标写入目标路径，父目录不存在时自动创建。
    pub fn write_icon(&self, image: &RasterImage, path: &Path) -> Result<(), IconError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                IconError::Write(format!("创建输出目录 '{}' 失败：{}", parent.display(), e))
            })?;
        }

        let format = output_format_for(path);
        let encodable = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(flatten_onto_white(image)),
            _ => DynamicImage::ImageRgba8(image.clone()),
        };

        let file = File::create(path)
            .map_err(|e| IconError::Write(format!("无法创建文件 '{}'：{}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);

        encodable
            .write_to(&mut writer, format)
            .map_err(|e| IconError::Write(format!("编码写入 '{}' 失败：{}", path.display(), e)))?;
        writer
            .flush()
            .map_err(|e| IconError::Write(format!("刷新文件 '{}' 失败：{}", path.display(), e)))?;

        log::debug!("💾 已写入 {}（{:?}）", path.display(), format);
        Ok(())
    }
}
