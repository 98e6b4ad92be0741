//! End-to-end batch tests
//!
//! These run the orchestrator against a scratch root and check what lands on disk.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use brandgen_core::{
    BatchError, BatchOrchestrator, BrandConfig, ImageGenerator, ItemStatus, Rasterizer,
    RenderError, ResvgRasterizer,
};

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50"><path d="M0 0h100v50H0z" fill="#0063be"/></svg>"##;

/// Records what it was asked to draw and hands back the markup as bytes
#[derive(Default)]
struct RecordingRasterizer {
    calls: RefCell<Vec<(u32, String)>>,
    backgrounds: RefCell<Vec<Option<String>>>,
    fail_width: Option<u32>,
}

impl Rasterizer for RecordingRasterizer {
    fn rasterize(&self, svg: &str, width: u32, bg: Option<&str>) -> Result<Vec<u8>, RenderError> {
        self.backgrounds.borrow_mut().push(bg.map(str::to_string));
        if Some(width) == self.fail_width {
            return Err(RenderError::InvalidSize { width, height: 0 });
        }
        self.calls.borrow_mut().push((width, svg.to_string()));
        Ok(svg.as_bytes().to_vec())
    }
}

fn scratch_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("logo/asset-svg/logo.svg");
    fs::create_dir_all(src.parent().unwrap()).unwrap();
    fs::write(&src, LOGO).unwrap();
    dir
}

fn run_with<R: Rasterizer>(root: &Path, config: BrandConfig, rasterizer: R) -> Result<brandgen_core::BatchReport, BatchError> {
    let orchestrator = BatchOrchestrator::new(config, root);
    let generator = ImageGenerator::new(orchestrator.source_path(), rasterizer);
    orchestrator.run(&generator)
}

#[test]
fn files_exist_iff_inclusion_rule_holds() {
    let root = scratch_root();
    let config = BrandConfig::default();
    let report = run_with(root.path(), config.clone(), RecordingRasterizer::default()).unwrap();
    assert!(report.is_complete());

    for color in &config.colors {
        let name = config.color_name(color).unwrap();
        for &size in &config.sizes {
            let favicon = root.path().join(format!("logo/favicon/favicon-{}.png", size));
            let standard = root.path().join(format!("logo/standar/{}-{}.png", name, size));

            if color == "#0063BE" {
                assert_eq!(favicon.exists(), size <= 128, "favicon {}", size);
            }
            assert_eq!(standard.exists(), size >= 512, "{} {}", name, size);
        }
    }

    assert!(root.path().join("logo/favicon/favicon-16.png").exists());
    assert!(root.path().join("logo/standar/white-1024.png").exists());
    assert!(!root.path().join("logo/standar/secondary-64.png").exists());
    assert!(!root.path().join("logo/standar/primary-16.png").exists());
}

#[test]
fn each_output_is_recolored_source() {
    let root = scratch_root();
    let rasterizer = RecordingRasterizer::default();
    let config = BrandConfig {
        sizes: vec![16, 512],
        ..BrandConfig::default()
    };

    let orchestrator = BatchOrchestrator::new(config, root.path());
    let generator = ImageGenerator::new(orchestrator.source_path(), rasterizer);
    orchestrator.run(&generator).unwrap();

    let white = fs::read_to_string(root.path().join("logo/standar/white-512.png")).unwrap();
    assert!(white.contains(r##"fill="#FFF""##));
    assert!(!white.contains("#0063be"));

    let favicon = fs::read_to_string(root.path().join("logo/favicon/favicon-16.png")).unwrap();
    assert!(favicon.contains(r##"fill="#0063BE""##));
}

#[test]
fn report_preserves_emission_order() {
    let root = scratch_root();
    let config = BrandConfig {
        colors: vec!["#FFF".into(), "#0063BE".into()],
        sizes: vec![16, 512],
        ..BrandConfig::default()
    };
    let report = run_with(root.path(), config, RecordingRasterizer::default()).unwrap();

    assert_eq!(
        report.generated_files(),
        vec![
            "logo/standar/white-512.png",
            "logo/favicon/favicon-16.png",
            "logo/standar/primary-512.png",
        ]
    );
    assert_eq!(report.report_hash.len(), 64);
}

#[test]
fn failed_item_does_not_stop_the_batch() {
    let root = scratch_root();
    let config = BrandConfig {
        colors: vec!["#0063BE".into()],
        sizes: vec![16, 32, 512],
        ..BrandConfig::default()
    };
    let rasterizer = RecordingRasterizer {
        fail_width: Some(32),
        ..Default::default()
    };
    let report = run_with(root.path(), config, rasterizer).unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.failures().count(), 1);
    assert!(matches!(report.items[1].status, ItemStatus::Failed { .. }));
    assert_eq!(
        report.generated_files(),
        vec!["logo/favicon/favicon-16.png", "logo/standar/primary-512.png"]
    );
    assert!(!root.path().join("logo/favicon/favicon-32.png").exists());
}

#[test]
fn missing_source_aborts_before_output() {
    let root = tempfile::tempdir().unwrap();
    let err = run_with(root.path(), BrandConfig::default(), RecordingRasterizer::default()).unwrap_err();

    assert!(matches!(err, BatchError::Generator(_)));
    assert!(!root.path().join("logo").exists());
}

#[test]
fn unnamed_standard_color_aborts_before_output() {
    let root = scratch_root();
    let mut config = BrandConfig::default();
    config.colors.push("#ABCDEF".into());

    let err = run_with(root.path(), config, RecordingRasterizer::default()).unwrap_err();
    assert!(matches!(err, BatchError::InvalidConfig(_)));
    assert!(!root.path().join("logo/standar").exists());
}

#[test]
fn readme_lists_generated_files() {
    let root = scratch_root();
    let config = BrandConfig {
        sizes: vec![32, 1024],
        ..BrandConfig::default()
    };
    let orchestrator = BatchOrchestrator::new(config, root.path());
    let generator = ImageGenerator::new(orchestrator.source_path(), RecordingRasterizer::default());
    let report = orchestrator.run(&generator).unwrap();

    let path = orchestrator.write_readme(&report).unwrap();
    assert_eq!(path, root.path().join("README.md"));

    let readme = fs::read_to_string(path).unwrap();
    let rows: Vec<_> = readme.lines().filter(|l| l.starts_with("|<img")).collect();
    assert_eq!(rows.len(), report.generated_files().len());
    assert!(rows[0].contains("[dark-1024.png]") && rows[0].contains("| 1024px |"));
    assert!(rows.iter().any(|r| r.contains("[favicon-32.png]") && r.contains("| 32px |")));
}

#[test]
fn resvg_batch_writes_real_pngs() {
    let root = scratch_root();
    let config = BrandConfig {
        colors: vec!["#0063BE".into(), "#000".into()],
        sizes: vec![16, 64],
        standard_min_size: 64,
        background: Some("#FFF".into()),
        ..BrandConfig::default()
    };
    let report = run_with(root.path(), config, ResvgRasterizer::new()).unwrap();
    assert!(report.is_complete());

    let png = fs::read(root.path().join("logo/standar/black-64.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    assert_eq!((width, height), (64, 32));

    assert!(root.path().join("logo/favicon/favicon-16.png").exists());
    assert!(root.path().join("logo/favicon/favicon-64.png").exists());
}

#[test]
fn background_is_passed_to_every_render() {
    let root = scratch_root();
    let config = BrandConfig {
        sizes: vec![16, 512],
        background: Some("#FFF".into()),
        ..BrandConfig::default()
    };
    let rasterizer = RecordingRasterizer::default();
    let report = run_with(root.path(), config, &rasterizer).unwrap();

    let backgrounds = rasterizer.backgrounds.borrow();
    assert_eq!(backgrounds.len(), report.items.len());
    assert!(backgrounds.iter().all(|bg| bg.as_deref() == Some("#FFF")));
}

#[test]
fn no_background_means_transparent_request() {
    let root = scratch_root();
    let config = BrandConfig {
        sizes: vec![512],
        ..BrandConfig::default()
    };
    let rasterizer = RecordingRasterizer::default();
    run_with(root.path(), config, &rasterizer).unwrap();

    let backgrounds = rasterizer.backgrounds.borrow();
    assert_eq!(backgrounds.len(), 6);
    assert!(backgrounds.iter().all(Option::is_none));
}

#[test]
fn named_svg_palette_color_is_rendered() {
    let root = scratch_root();
    let mut config = BrandConfig {
        colors: vec!["rebeccapurple".into()],
        sizes: vec![512],
        ..BrandConfig::default()
    };
    config.color_names.insert("rebeccapurple".into(), "purple".into());

    let report = run_with(root.path(), config, ResvgRasterizer::new()).unwrap();
    assert_eq!(report.generated_files(), vec!["logo/standar/purple-512.png"]);

    let png = fs::read(root.path().join("logo/standar/purple-512.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
