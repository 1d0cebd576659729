//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图标流水线中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//! `code()` / `stage()` 输出稳定标识，供批处理报告与 JSON 输出使用。

/// 图标处理统一错误类型。
///
/// 该类型会在批处理层被记录到单个文件的失败记录中，不中断整个批次。
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("解码错误：{0}")]
    Decode(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),

    #[error("写入错误：{0}")]
    Write(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl IconError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode_error",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Write(_) => "write_error",
            Self::FileSystem(_) => "file_system",
            Self::ResourceLimit(_) => "resource_limit",
        }
    }

    /// 错误所属的处理阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileSystem(_) | Self::ResourceLimit(_) => "load",
            Self::Decode(_) => "decode",
            Self::InvalidConfig(_) => "transform",
            Self::Write(_) => "write",
        }
    }
}
