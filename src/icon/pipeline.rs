//! # 图标变换流水线模块
//!
//! ## 设计思路
//!
//! 将“源图 → 固定尺寸透明图标”的过程集中为一个纯函数 `transform`，
//! 不做任何 I/O，不读取全局状态，便于单测与复用（预览与最终写入共用同一结果）。
//!
//! ## 实现思路
//!
//! 1. 转换为 RGBA
//! 2. 源图已在目标尺寸内 → `Skipped`
//! 3. 按与全透明像素的精确差异计算内容包围盒并裁剪
//! 4. 四周扩展透明留白
//! 5. 等比缩小（只缩不放）到目标尺寸内
//! 6. 居中粘贴到目标尺寸的透明画布

use fast_image_resize as fr;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};

use super::source::{TransformOutcome, TransformResult};
use super::{IconError, TransformConfig};

/// 留白与画布使用的填充像素：白色、完全透明。
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// 包围盒比较基准：全零的完全透明像素。
const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// 中间画布像素上限，防止超大留白或目标尺寸触发巨量内存分配。
const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// 内容包围盒（左上角坐标与宽高）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 执行完整的图标变换。
///
/// # 示例
/// ```rust
/// use icon_batch_reducer::icon::{transform, TransformConfig, TransformOutcome};
/// use image::{DynamicImage, Rgba, RgbaImage};
///
/// let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(400, 300, Rgba([9, 9, 9, 255])));
/// let config = TransformConfig::new(200, 200, 25)?;
///
/// match transform(source, &config)? {
///     TransformOutcome::Transformed(icon) => assert_eq!(icon.dimensions(), (200, 200)),
///     TransformOutcome::Skipped => unreachable!(),
/// }
/// # Ok::<(), icon_batch_reducer::icon::IconError>(())
/// ```
pub fn transform(image: DynamicImage, config: &TransformConfig) -> TransformResult {
    let (target_width, target_height) = (config.target_width(), config.target_height());
    if target_width == 0 || target_height == 0 {
        return Err(IconError::InvalidConfig(format!(
            "目标尺寸必须为正数：{}x{}",
            target_width, target_height
        )));
    }

    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();

    if width <= target_width && height <= target_height {
        log::debug!(
            "⏭️ 源图 {}x{} 已在目标 {}x{} 内，跳过",
            width,
            height,
            target_width,
            target_height
        );
        return Ok(TransformOutcome::Skipped);
    }
    ensure_canvas_budget(target_width, target_height)?;

    let cropped = match content_bounds(&rgba) {
        Some(bounds) if (bounds.width, bounds.height) != (width, height) => {
            imageops::crop_imm(&rgba, bounds.x, bounds.y, bounds.width, bounds.height).to_image()
        }
        Some(_) => rgba,
        None => {
            log::debug!("🫥 未找到非透明内容，跳过裁剪");
            rgba
        }
    };

    let padded = pad(&cropped, config.padding())?;
    let resized = fit_within(padded, target_width, target_height, config.resize_quality().filter());
    let canvas = compose_centered(&resized, target_width, target_height);

    log::debug!(
        "🧩 变换完成：{}x{} -> 内容 {}x{} -> 画布 {}x{}",
        width,
        height,
        resized.width(),
        resized.height(),
        target_width,
        target_height
    );

    Ok(TransformOutcome::Transformed(canvas))
}

/// 计算所有与全透明像素存在精确数值差异的像素的最小包围矩形。
///
/// 比较的是完整 RGBA 值而不只是 alpha，因此 `(255,255,255,0)` 也算作内容。
/// 图像完全空白时返回 `None`。
pub fn content_bounds(image: &RgbaImage) -> Option<ContentBounds> {
    let (width, height) = image.dimensions();
    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel != BLANK {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| ContentBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// 四周各扩展 `padding` 像素，新像素为透明白。
pub fn pad(image: &RgbaImage, padding: u32) -> Result<RgbaImage, IconError> {
    if padding == 0 {
        return Ok(image.clone());
    }

    let (width, height) = image.dimensions();
    let grow = |side: u32| {
        padding
            .checked_mul(2)
            .and_then(|extra| side.checked_add(extra))
            .ok_or_else(|| {
                IconError::InvalidConfig(format!("留白 {} 导致尺寸溢出（边长 {}）", padding, side))
            })
    };
    let (padded_width, padded_height) = (grow(width)?, grow(height)?);
    ensure_canvas_budget(padded_width, padded_height)?;

    let mut padded = RgbaImage::from_pixel(padded_width, padded_height, TRANSPARENT_WHITE);
    imageops::replace(&mut padded, image, i64::from(padding), i64::from(padding));
    Ok(padded)
}

/// 等比缩放后的尺寸：只缩不放，每边四舍五入并限制在 `[1, max]`。
pub fn fitted_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let fit = |side: u32, max: u32| ((side as f64 * scale).round() as u32).clamp(1, max.max(1));

    (fit(width, max_width), fit(height, max_height))
}

/// 等比缩小到目标范围内；已满足时原样返回。
pub fn fit_within(image: RgbaImage, max_width: u32, max_height: u32, filter: FilterType) -> RgbaImage {
    let (width, height) = image.dimensions();
    let (target_width, target_height) = fitted_dimensions(width, height, max_width, max_height);
    if (target_width, target_height) == (width, height) {
        return image;
    }

    match resize_with_fast_image_resize(&image, target_width, target_height, filter) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}", err);
            imageops::resize(&image, target_width, target_height, filter)
        }
    }
}

/// 内容在画布上的居中偏移（向下取整）。
pub fn centered_offset(content: (u32, u32), canvas: (u32, u32)) -> (u32, u32) {
    (
        canvas.0.saturating_sub(content.0) / 2,
        canvas.1.saturating_sub(content.1) / 2,
    )
}

/// 创建全透明画布并将内容居中粘贴。
pub fn compose_centered(content: &RgbaImage, canvas_width: u32, canvas_height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(canvas_width, canvas_height, TRANSPARENT_WHITE);
    let (x, y) = centered_offset(content.dimensions(), (canvas_width, canvas_height));
    imageops::replace(&mut canvas, content, i64::from(x), i64::from(y));
    canvas
}

fn ensure_canvas_budget(width: u32, height: u32) -> Result<(), IconError> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_CANVAS_PIXELS {
        return Err(IconError::ResourceLimit(format!(
            "画布过大：{}x{}（{} 像素，限制：{} 像素）",
            width, height, pixels, MAX_CANVAS_PIXELS
        )));
    }
    Ok(())
}

fn resize_with_fast_image_resize(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, IconError> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| IconError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| IconError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| IconError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}
