//! # 批处理模块（batch）
//!
//! 取代原先界面层的目录选择、勾选框与消息框：
//!
//! - `config`：`BatchConfig` / `BatchSettings`（JSON 设置文件 + 命令行覆盖）
//! - `enumerator`：递归枚举图片文件
//! - `destination`：输出路径规划（输出目录 / `-sm` 后缀）
//! - `driver`：串行处理、失败隔离、预览与确认两阶段
//! - `report`：逐文件记录与汇总

mod config;
mod destination;
mod driver;
mod enumerator;
mod report;

pub use config::{BatchConfig, BatchSettings, DEFAULT_SUFFIX};
pub use destination::{alongside_path, destinations, output_path};
pub use driver::{BatchDriver, BatchPlan, PlannedFile};
pub use enumerator::{enumerate_images, has_image_extension, IMAGE_EXTENSIONS};
pub use report::{BatchReport, BatchTally, FileRecord, FileStatus};
