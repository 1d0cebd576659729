// End-to-end batch runs against real files in a temp directory
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use icon_batch_reducer::batch::{BatchConfig, BatchDriver, BatchTally, FileStatus};
use icon_batch_reducer::error::AppError;
use icon_batch_reducer::icon::{IconHandler, LoadLimits, TransformConfig};
use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock error")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("icon-batch-reducer-{tag}-{nanos}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_rgba(path: &Path, width: u32, height: u32) {
    RgbaImage::from_pixel(width, height, Rgba([30, 60, 90, 255]))
        .save(path)
        .expect("write rgba test image");
}

/// 源目录布局：两张需要变换、一张已在目标尺寸内、一张损坏、一个非图片文件。
fn populate_source(dir: &Path) {
    fs::create_dir_all(dir.join("nested")).expect("create nested");
    write_rgba(&dir.join("big.png"), 300, 200);
    write_rgba(&dir.join("small.png"), 20, 20);
    RgbImage::from_pixel(400, 100, Rgb([200, 100, 50]))
        .save(dir.join("nested/photo.jpg"))
        .expect("write jpg test image");
    fs::write(dir.join("broken.gif"), b"garbage, not an image").expect("write broken file");
    fs::write(dir.join("notes.txt"), b"ignored").expect("write text file");
}

fn icon_config() -> TransformConfig {
    TransformConfig::new(64, 64, 4).expect("config")
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir)
        .map(|entries| entries.flatten().filter(|e| e.path().is_file()).count())
        .unwrap_or(0)
}

#[test]
fn run_with_output_dir_tallies_each_outcome() {
    let root = unique_temp_dir("driver-output");
    let src = root.join("src");
    let out = root.join("out");
    populate_source(&src);

    let config = BatchConfig::new(&src, icon_config()).with_output_dir(&out);
    let report = BatchDriver::new(config).run().expect("batch should start");

    assert_eq!(report.tally(), BatchTally { altered: 2, unaltered: 1, failed: 1 });

    for name in ["big.png", "photo.jpg"] {
        let icon = image::open(out.join(name)).expect("output icon exists");
        assert_eq!(icon.dimensions(), (64, 64));
    }
    assert!(!out.join("small.png").exists());

    let failure = report.failures().next().expect("one failure");
    assert!(failure.source.ends_with("broken.gif"));
    assert!(matches!(failure.status, FileStatus::Failed { code: "decode_error", .. }));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn png_output_keeps_transparent_border() {
    let root = unique_temp_dir("driver-border");
    let src = root.join("src");
    let out = root.join("out");
    fs::create_dir_all(&src).expect("create src");
    write_rgba(&src.join("wide.png"), 400, 100);

    let config = BatchConfig::new(&src, icon_config()).with_output_dir(&out);
    BatchDriver::new(config).run().expect("batch should start");

    let icon = image::open(out.join("wide.png")).expect("output").to_rgba8();
    assert_eq!(icon.dimensions(), (64, 64));
    assert_eq!(icon.get_pixel(32, 0)[3], 0);
    assert_eq!(icon.get_pixel(32, 63)[3], 0);
    assert!(icon.get_pixel(32, 32)[3] >= 250);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn alongside_output_uses_suffix_and_keeps_sources() {
    let root = unique_temp_dir("driver-alongside");
    populate_source(&root);
    let original = fs::read(root.join("big.png")).expect("read source");

    let config = BatchConfig::new(&root, icon_config()).with_save_alongside_source(true);
    let report = BatchDriver::new(config).run().expect("batch should start");

    assert_eq!(report.tally().altered, 2);
    let icon = image::open(root.join("big-sm.png")).expect("suffixed icon");
    assert_eq!(icon.dimensions(), (64, 64));
    assert!(root.join("nested/photo-sm.jpg").exists());
    assert!(!root.join("small-sm.png").exists());
    assert_eq!(fs::read(root.join("big.png")).expect("read source"), original);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn both_destinations_are_written_in_order() {
    let root = unique_temp_dir("driver-both");
    let src = root.join("src");
    let out = root.join("out");
    fs::create_dir_all(&src).expect("create src");
    write_rgba(&src.join("logo.png"), 128, 128);

    let config = BatchConfig::new(&src, icon_config())
        .with_output_dir(&out)
        .with_save_alongside_source(true);
    let report = BatchDriver::new(config).run().expect("batch should start");

    let outputs = match &report.records[0].status {
        FileStatus::Altered { outputs } => outputs.clone(),
        other => panic!("unexpected status: {other:?}"),
    };
    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].ends_with("out/logo.png"));
    assert!(outputs[1].ends_with("src/logo-sm.png"));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn blocked_alongside_target_keeps_written_outputs_in_report() {
    let root = unique_temp_dir("driver-partial");
    let src = root.join("src");
    let out = root.join("out");
    fs::create_dir_all(src.join("logo-sm.png")).expect("create blocking directory");
    write_rgba(&src.join("logo.png"), 128, 128);

    let config = BatchConfig::new(&src, icon_config())
        .with_output_dir(&out)
        .with_save_alongside_source(true);
    let report = BatchDriver::new(config).run().expect("batch should start");

    assert_eq!(report.tally(), BatchTally { altered: 0, unaltered: 0, failed: 1 });
    match &report.records[0].status {
        FileStatus::Failed { code, stage, outputs, .. } => {
            assert_eq!(*code, "write_error");
            assert_eq!(*stage, "write");
            assert_eq!(outputs.len(), 1);
            assert!(outputs[0].ends_with("out/logo.png"));
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert_eq!(image::open(out.join("logo.png")).expect("output icon").dimensions(), (64, 64));
    assert!(src.join("logo-sm.png").is_dir());

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_destination_is_fatal_before_any_write() {
    let root = unique_temp_dir("driver-nodest");
    populate_source(&root);
    let before = count_files(&root);

    let result = BatchDriver::new(BatchConfig::new(&root, icon_config())).run();

    assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    assert_eq!(count_files(&root), before);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn source_without_images_is_fatal() {
    let root = unique_temp_dir("driver-empty");
    let out = root.join("out");
    fs::write(root.join("readme.txt"), b"nothing here").expect("write text file");

    let config = BatchConfig::new(&root, icon_config()).with_output_dir(&out);
    let result = BatchDriver::new(config).run();

    assert!(matches!(result, Err(AppError::EmptySource(_))));
    assert!(!out.exists());

    let _ = fs::remove_dir_all(root);
}

#[test]
fn plan_then_commit_matches_run() {
    let root = unique_temp_dir("driver-plan");
    let src = root.join("src");
    let planned_out = root.join("planned");
    let direct_out = root.join("direct");
    populate_source(&src);

    let planned = BatchDriver::new(BatchConfig::new(&src, icon_config()).with_output_dir(&planned_out));
    let plan = planned.plan().expect("plan should succeed");

    assert_eq!(plan.len(), 4);
    assert!(!planned_out.exists(), "planning must not write anything");
    let previews: Vec<_> = plan.files.iter().filter_map(|f| f.preview()).collect();
    assert_eq!(previews.len(), 2);
    assert!(previews.iter().all(|icon| icon.dimensions() == (64, 64)));

    let committed = planned.commit(plan);
    let direct = BatchDriver::new(BatchConfig::new(&src, icon_config()).with_output_dir(&direct_out))
        .run()
        .expect("run should succeed");

    assert_eq!(committed.tally(), direct.tally());
    for name in ["big.png", "photo.jpg"] {
        assert!(planned_out.join(name).exists());
        assert!(direct_out.join(name).exists());
    }
    assert_eq!(
        fs::read(planned_out.join("big.png")).expect("planned png"),
        fs::read(direct_out.join("big.png")).expect("direct png")
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn copy_unaltered_copies_source_bytes() {
    let root = unique_temp_dir("driver-copy");
    let src = root.join("src");
    let out = root.join("out");
    fs::create_dir_all(&src).expect("create src");
    write_rgba(&src.join("tiny.png"), 16, 16);

    let mut config = BatchConfig::new(&src, icon_config()).with_output_dir(&out);
    config.copy_unaltered = true;
    let report = BatchDriver::new(config).run().expect("batch should start");

    assert_eq!(report.tally(), BatchTally { altered: 0, unaltered: 1, failed: 0 });
    assert_eq!(
        fs::read(out.join("tiny.png")).expect("copied"),
        fs::read(src.join("tiny.png")).expect("source")
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn written_icon_is_skipped_on_rerun() {
    let root = unique_temp_dir("driver-idempotent");
    let src = root.join("src");
    let out = root.join("out");
    fs::create_dir_all(&src).expect("create src");
    write_rgba(&src.join("big.png"), 500, 300);

    let config = BatchConfig::new(&src, icon_config()).with_output_dir(&out);
    BatchDriver::new(config).run().expect("batch should start");

    let handler = IconHandler::new(icon_config(), LoadLimits::default());
    let processed = handler.process_file(&out.join("big.png")).expect("reprocess output");
    assert!(processed.outcome.is_skipped());

    let _ = fs::remove_dir_all(root);
}
