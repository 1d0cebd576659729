//! # 图标处理模块（icon）
//!
//! ## 设计思路
//!
//! 该模块将“读取校验 → 解码 → 裁剪/留白/缩放/居中 → 编码写入”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `pipeline`：纯函数变换，不做任何 I/O
//! - `handler`：编排单个文件的处理流程
//! - `loader`：负责文件读取、格式嗅探与像素上限校验
//! - `writer`：负责按扩展名编码写入
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! batch::driver（逐个文件）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（读取 + 体积/像素校验 + 解码）
//!    ├─ pipeline.rs（裁剪 → 留白 → 缩放 → 居中）
//!    └─ writer.rs（编码 + 写入）
//!    ↓
//! 返回 IconError 给批处理层记录
//! ```

mod config;
mod error;
mod handler;
mod loader;
pub mod pipeline;
mod source;
mod writer;

pub use config::{
    LoadLimits, ResizeQuality, TransformConfig, DEFAULT_PADDING, DEFAULT_TARGET_HEIGHT,
    DEFAULT_TARGET_WIDTH,
};
pub use error::IconError;
pub use handler::{IconHandler, ProcessedFile};
pub use loader::{decode_from_memory, SUPPORTED_FORMATS};
pub use pipeline::transform;
pub use source::{LoadedImage, RasterImage, TransformOutcome, TransformResult};
pub use writer::{flatten_onto_white, output_format_for};
