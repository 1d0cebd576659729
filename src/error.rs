//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义批处理层统一的 `AppError` 枚举。单个文件的失败（`IconError`）在批次内被记录
//! 而不是向上抛出；只有整批无法开始的错误（配置错误、源目录为空）才会以
//! `AppError` 形式终止运行。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 单文件错误的载体是 `IconError`，由批处理报告记录，不转换为 `AppError`。

use std::path::PathBuf;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 批处理配置不合法（未选择输出目的地、源目录无效等）
    #[error("配置错误: {0}")]
    InvalidConfig(String),

    /// 源目录中没有可处理的图片
    #[error("源目录中没有可处理的图片: {}", .0.display())]
    EmptySource(PathBuf),

    /// 设置文件读取或解析失败
    #[error("设置文件错误: {0}")]
    Settings(String),

    /// 报告输出失败
    #[error("报告输出失败: {0}")]
    Report(String),
}

