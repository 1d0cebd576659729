//! 输出路径规划模块
//!
//! - 输出目录：`<output_dir>/<basename>`
//! - 与源文件并存：`<原目录>/<stem><suffix>.<ext>`，无扩展名时为 `<stem><suffix>`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::BatchConfig;

/// 输出目录中的目标路径。
pub fn output_path(output_dir: &Path, source: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.to_path_buf(),
    }
}

/// 与源文件并存时的目标路径（后缀插入在扩展名之前）。
pub fn alongside_path(source: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = source.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

/// 按配置列出单个源文件的全部目的地：先输出目录，后并存路径。
pub fn destinations(config: &BatchConfig, source: &Path) -> Vec<PathBuf> {
    let mut targets = Vec::with_capacity(2);
    if let Some(output_dir) = &config.output_dir {
        targets.push(output_path(output_dir, source));
    }
    if config.save_alongside_source {
        targets.push(alongside_path(source, &config.suffix));
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::TransformConfig;

    #[test]
    fn output_path_keeps_basename() {
        let path = output_path(Path::new("/out"), Path::new("/src/nested/logo.PNG"));
        assert_eq!(path, PathBuf::from("/out/logo.PNG"));
    }

    #[test]
    fn alongside_path_inserts_suffix_before_extension() {
        assert_eq!(
            alongside_path(Path::new("/src/logo.png"), "-sm"),
            PathBuf::from("/src/logo-sm.png")
        );
        assert_eq!(
            alongside_path(Path::new("/src/archive.tar.gif"), "-sm"),
            PathBuf::from("/src/archive.tar-sm.gif")
        );
    }

    #[test]
    fn alongside_path_without_extension() {
        assert_eq!(alongside_path(Path::new("/src/logo"), "-sm"), PathBuf::from("/src/logo-sm"));
    }

    #[test]
    fn destinations_follow_config_order() {
        let source = Path::new("/src/a.jpg");
        let config = BatchConfig::new("/src", TransformConfig::default())
            .with_output_dir("/out")
            .with_save_alongside_source(true);

        assert_eq!(
            destinations(&config, source),
            vec![PathBuf::from("/out/a.jpg"), PathBuf::from("/src/a-sm.jpg")]
        );

        let only_alongside = BatchConfig::new("/src", TransformConfig::default()).with_save_alongside_source(true);
        assert_eq!(destinations(&only_alongside, source), vec![PathBuf::from("/src/a-sm.jpg")]);
    }
}
