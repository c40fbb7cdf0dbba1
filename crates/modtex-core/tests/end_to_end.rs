//! End-to-end runs over real temp directories: scan a mods folder, write
//! the rotated report, and darken a PNG tree.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use image::{Rgb as ImgRgb, RgbImage, Rgba, RgbaImage};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use modtex_core::config::ScanConfig;
use modtex_core::scan::{log_file_name, write_report, ScanReport};
use modtex_core::{rotate_logs, ArchiveScanner, Config, PixelDarkener};

fn png_with_pixel(r: u8, g: u8, b: u8) -> Vec<u8> {
    let mut img = RgbImage::new(2, 2);
    img.put_pixel(1, 1, ImgRgb([r, g, b]));
    let mut buf = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buf),
        image::ImageFormat::Png,
    )
    .unwrap();
    buf
}

fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
    let mut file = File::create(path).unwrap();
    let mut writer = ZipWriter::new(&mut file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, opts).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn scan_one_archive_and_write_rotated_report() {
    let mods = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();

    let matching = png_with_pixel(198, 198, 198);
    let plain = png_with_pixel(10, 20, 30);
    write_jar(
        &mods.path().join("pack.jar"),
        &[
            ("assets/mymod/textures/gui/container.png", &matching),
            ("assets/mymod/textures/gui/plain.png", &plain),
            ("assets/mymod/textures/item/icon.png", &matching),
        ],
    );

    let scanner = ArchiveScanner::new(&ScanConfig::default());
    let outcome = scanner.scan_dir(mods.path());

    // Exactly one qualifying texture matched: one archive, one mod id, one path
    assert_eq!(outcome.stats.processed_archives, 1);
    assert_eq!(outcome.stats.matched_textures, 1);
    assert_eq!(outcome.index.archive_count(), 1);
    assert_eq!(outcome.index.total_textures(), 1);

    // A prior log rotates away before the new one is written
    let log_path = logs.path().join(log_file_name("Unknown Profile"));
    std::fs::write(&log_path, "previous run").unwrap();
    rotate_logs(&log_path, 5);

    let report = ScanReport {
        profile: "Unknown Profile",
        scanned_at: chrono::Local::now(),
        stats: &outcome.stats,
        index: &outcome.index,
    };
    let file = File::create(&log_path).unwrap();
    write_report(file, &report).unwrap();

    let text = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(text.matches("Mod: ").count(), 1);
    assert_eq!(text.matches("  ModID: mymod").count(), 1);
    assert_eq!(text.matches("    - gui/container.png").count(), 1);
    assert!(!text.contains("plain.png"));

    let rotated = logs
        .path()
        .join(log_file_name("Unknown Profile").replace(".txt", "-1.txt"));
    assert_eq!(std::fs::read_to_string(rotated).unwrap(), "previous run");
}

#[test]
fn darken_tree_then_rescan_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([198, 198, 198, 255]));
    img.put_pixel(1, 0, Rgba([40, 40, 40, 0]));
    let path = dir.path().join("tex.png");
    img.save(&path).unwrap();

    let config = Config::default();
    let stats = PixelDarkener::uniform(&config.darken).darken_tree(dir.path());
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.errors, 0);

    let result = image::open(&path).unwrap().into_rgba8();
    // floor(198 * 0.399) = 79; the transparent pixel is untouched
    assert_eq!(result.get_pixel(0, 0).0, [79, 79, 79, 255]);
    assert_eq!(result.get_pixel(1, 0).0, [40, 40, 40, 0]);
}
