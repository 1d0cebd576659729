//! # 配置模块
//!
//! ## 设计思路
//!
//! 将变换所需的全部参数集中到不可变的 `TransformConfig`，每次调用显式传入，
//! 不依赖任何全局状态。构造时即完成校验，之后流水线可以直接信任这些数值。
//!
//! ## 实现思路
//!
//! - `Default` 对应原始工具的固定行为：200x200 画布，四周 25 像素留白。
//! - `ResizeQuality` 负责档位字符串解析与反向输出，映射到底层滤镜。
//! - `from_signed` 接收用户输入的有符号整数，非正尺寸 / 负留白直接拒绝。
//! - `LoadLimits` 控制读取与解码阶段的资源上限。

use std::str::FromStr;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::IconError;

pub const DEFAULT_TARGET_WIDTH: u32 = 200;
pub const DEFAULT_TARGET_HEIGHT: u32 = 200;
pub const DEFAULT_PADDING: u32 = 25;

/// 缩放质量档位（面向用户语义）。
///
/// - `Quality`：Lanczos3，尽量保真（默认）
/// - `Balanced`：CatmullRom
/// - `Speed`：Triangle，优先速度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeQuality {
    #[default]
    Quality,
    Balanced,
    Speed,
}

impl ResizeQuality {
    /// 将档位输出为稳定字符串。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }

    pub fn filter(self) -> FilterType {
        match self {
            Self::Quality => FilterType::Lanczos3,
            Self::Balanced => FilterType::CatmullRom,
            Self::Speed => FilterType::Triangle,
        }
    }
}

impl FromStr for ResizeQuality {
    type Err = IconError;

    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use icon_batch_reducer::icon::ResizeQuality;
    ///
    /// let q: ResizeQuality = " Balanced ".parse()?;
    /// assert_eq!(q.as_str(), "balanced");
    /// # Ok::<(), icon_batch_reducer::icon::IconError>(())
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(IconError::InvalidConfig(format!(
                "未知缩放档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }
}

/// 图标变换配置。
///
/// 字段私有，只能通过校验过的构造函数创建，保证目标尺寸恒为正数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformConfig {
    target_width: u32,
    target_height: u32,
    padding: u32,
    resize_quality: ResizeQuality,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            padding: DEFAULT_PADDING,
            resize_quality: ResizeQuality::default(),
        }
    }
}

impl TransformConfig {
    /// 创建配置，目标宽高必须大于 0。
    ///
    /// # 示例
    /// ```rust
    /// use icon_batch_reducer::icon::TransformConfig;
    ///
    /// let config = TransformConfig::new(64, 64, 4)?;
    /// assert_eq!(config.target_width(), 64);
    /// assert!(TransformConfig::new(0, 64, 4).is_err());
    /// # Ok::<(), icon_batch_reducer::icon::IconError>(())
    /// ```
    pub fn new(target_width: u32, target_height: u32, padding: u32) -> Result<Self, IconError> {
        if target_width == 0 || target_height == 0 {
            return Err(IconError::InvalidConfig(format!(
                "目标尺寸必须为正数：{}x{}",
                target_width, target_height
            )));
        }

        Ok(Self {
            target_width,
            target_height,
            padding,
            resize_quality: ResizeQuality::default(),
        })
    }

    /// 从用户输入的有符号整数创建配置。
    ///
    /// 非正的目标尺寸、负数留白以及超出 `u32` 的数值都视为配置错误。
    pub fn from_signed(target_width: i64, target_height: i64, padding: i64) -> Result<Self, IconError> {
        if target_width <= 0 || target_height <= 0 {
            return Err(IconError::InvalidConfig(format!(
                "目标尺寸必须为正数：{}x{}",
                target_width, target_height
            )));
        }
        if padding < 0 {
            return Err(IconError::InvalidConfig(format!("留白不能为负数：{}", padding)));
        }

        let to_u32 = |value: i64, name: &str| {
            u32::try_from(value)
                .map_err(|_| IconError::InvalidConfig(format!("{} 数值过大：{}", name, value)))
        };

        Self::new(
            to_u32(target_width, "target_width")?,
            to_u32(target_height, "target_height")?,
            to_u32(padding, "padding")?,
        )
    }

    pub fn with_resize_quality(mut self, quality: ResizeQuality) -> Self {
        self.resize_quality = quality;
        self
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn target_height(&self) -> u32 {
        self.target_height
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn resize_quality(&self) -> ResizeQuality {
        self.resize_quality
    }
}

/// 读取与解码阶段的资源上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadLimits {
    /// 单个源文件允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`），在完整解码前按头信息检查。
    pub max_decoded_pixels: u64,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_original_tool() {
        let config = TransformConfig::default();
        assert_eq!(config.target_width(), 200);
        assert_eq!(config.target_height(), 200);
        assert_eq!(config.padding(), 25);
        assert_eq!(config.resize_quality(), ResizeQuality::Quality);
        assert_eq!(config.resize_quality().filter(), FilterType::Lanczos3);
    }

    #[test]
    fn rejects_non_positive_targets() {
        assert!(matches!(TransformConfig::new(0, 10, 0), Err(IconError::InvalidConfig(_))));
        assert!(matches!(TransformConfig::new(10, 0, 0), Err(IconError::InvalidConfig(_))));
        assert!(matches!(
            TransformConfig::from_signed(-5, 10, 0),
            Err(IconError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_negative_padding() {
        let result = TransformConfig::from_signed(64, 64, -1);
        assert!(matches!(result, Err(IconError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_values_beyond_u32() {
        let result = TransformConfig::from_signed(i64::from(u32::MAX) + 1, 64, 0);
        assert!(matches!(result, Err(IconError::InvalidConfig(_))));
    }

    #[test]
    fn accepts_padding_larger_than_target() {
        let config = TransformConfig::from_signed(16, 16, 500).expect("valid config");
        assert_eq!(config.padding(), 500);
    }

    #[test]
    fn resize_quality_parse_and_print() {
        for quality in [ResizeQuality::Quality, ResizeQuality::Balanced, ResizeQuality::Speed] {
            let parsed: ResizeQuality = quality.as_str().parse().expect("parse quality");
            assert_eq!(parsed, quality);
        }
        assert!("ultra".parse::<ResizeQuality>().is_err());
    }
}
