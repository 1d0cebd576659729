//! 图片文件枚举模块
//!
//! 递归遍历源目录，按小写扩展名筛选 `png / jpg / jpeg / gif`，惰性产出绝对路径。
//! 遍历顺序取决于文件系统，不做排序保证。

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// 可处理的源文件扩展名（小写）。
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// 判断路径扩展名是否属于可处理图片。
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// 惰性枚举 `root` 下所有图片文件。
///
/// 无法读取的目录项记录 warn 日志后跳过，不中断遍历。
/// 指向普通文件的符号链接会被产出（路径保持为链接本身）；不跟随目录链接，
/// 悬空链接被忽略。
pub fn enumerate_images(root: &Path) -> impl Iterator<Item = PathBuf> + use<> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("⚠️ 跳过无法读取的目录项: {}", err);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
        })
        .map(|entry| entry.into_path())
        .filter(|path| has_image_extension(path))
}
