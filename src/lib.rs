//! # 图标批量缩减工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              命令行 (clap) / 其他调用方                  │
//! │   源目录 · 输出目录 · 并存输出 · 尺寸 · 留白 · 档位      │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ BatchConfig (显式参数，无隐藏状态)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↓                                                  │
//! │  ┌─ batch ──────── 枚举 → 逐个处理 → 写出 → 汇总         │
//! │  │   ├─ enumerator   递归筛选 png/jpg/jpeg/gif           │
//! │  │   ├─ destination  <输出目录>/<文件名> · <stem>-sm.<ext>│
//! │  │   ├─ driver       run / plan + commit                 │
//! │  │   └─ report       逐文件记录 + 汇总 + JSON            │
//! │  │                                                       │
//! │  ├─ icon ───────── 读取 · 解码 · 变换 · 编码              │
//! │  │   └─ pipeline     裁剪 → 留白 → 缩放 → 居中 (纯函数)   │
//! │  │                                                       │
//! │  └─ error ──────── AppError (整批致命错误)               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，整批无法开始时返回 |
//! | [`icon`] | 单个图片的加载、变换与写出；`icon::transform` 为纯函数 |
//! | [`batch`] | 批处理配置、文件枚举、输出路径、驱动与报告 |

pub mod batch;
pub mod error;
pub mod icon;
