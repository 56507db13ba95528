use std::path::{Path, PathBuf};

use image::GenericImageView;
use routelapse::{
    Activity, FrameRate, GeoPoint, OutputResolution, RecorderOptions, RecordingDoc, Rgba8,
    StrategyKind, Viewport,
};

fn sample_doc() -> RecordingDoc {
    RecordingDoc {
        activities: vec![
            Activity {
                id: "lakeside-run".to_string(),
                name: "Lakeside Run".to_string(),
                color: Rgba8::from_hex("#e64a19").unwrap(),
                coordinates: vec![
                    GeoPoint::new(47.3600, 8.5380),
                    GeoPoint::new(47.3628, 8.5405),
                    GeoPoint::new(47.3655, 8.5431),
                    GeoPoint::new(47.3671, 8.5458),
                ],
            },
            Activity {
                id: "bridge-loop".to_string(),
                name: String::new(),
                color: Rgba8::from_hex("#3388ff").unwrap(),
                coordinates: vec![
                    GeoPoint::new(47.3612, 8.5402),
                    GeoPoint::new(47.3648, 8.5440),
                ],
            },
        ],
        viewport: Viewport { container: [512, 320], center: None, zoom: None, fit_padding: 40.0 },
        options: RecorderOptions {
            resolution: OutputResolution::Hd720,
            frame_rate: FrameRate::Fps24,
            duration_secs: 0.25,
            strategy: StrategyKind::DirectDraw,
        },
        animate: vec!["lakeside-run".to_string()],
        show_static_routes: true,
        debug: false,
        export_frame: None,
    }
}

fn write_doc(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let doc_path = dir.join("recording.json");
    let f = std::fs::File::create(&doc_path).unwrap();
    serde_json::to_writer_pretty(f, &sample_doc()).unwrap();
    doc_path
}

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_routelapse").map(PathBuf::from).unwrap_or_else(|| {
        let mut p = PathBuf::from("target").join("debug");
        p.push(if cfg!(windows) { "routelapse.exe" } else { "routelapse" });
        p
    })
}

#[test]
fn cli_frame_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke_frame");
    let doc_path = write_doc(&dir);
    let out_path = dir.join("frame.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_path())
        .args(["frame", "--in"])
        .arg(&doc_path)
        .args(["--progress", "65", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let decoded = image::open(&out_path).unwrap();
    assert_eq!(decoded.dimensions(), (1280, 720));
    assert_eq!(decoded.get_pixel(2, 2), image::Rgba([0xf5, 0xf5, 0xf5, 0xff]));
}

#[test]
fn cli_export_rejects_the_snapshot_strategy() {
    let dir = PathBuf::from("target").join("cli_smoke_snapshot");
    let doc_path = write_doc(&dir);
    let out_path = dir.join("frames.zip");
    let _ = std::fs::remove_file(&out_path);

    let output = std::process::Command::new(bin_path())
        .args(["export", "--in"])
        .arg(&doc_path)
        .arg("--out")
        .arg(&out_path)
        .args(["--strategy", "snapshot"])
        .output()
        .unwrap();

    // Scripted exports carry no snapshot source, so the session must fail
    // construction instead of writing a broken archive.
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("snapshot source"), "stderr was: {stderr}");
    assert!(!out_path.exists());
}

#[test]
fn cli_export_writes_zip() {
    let dir = PathBuf::from("target").join("cli_smoke_export");
    let doc_path = write_doc(&dir);
    let out_path = dir.join("frames.zip");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_path())
        .args(["export", "--in"])
        .arg(&doc_path)
        .arg("--out")
        .arg(&out_path)
        .args(["--frame-rate", "24"])
        .status()
        .unwrap();

    assert!(status.success());
    let file = std::fs::File::open(&out_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert_eq!(archive.len(), 6, "0.25s at 24 fps is six frames");

    let mut png = Vec::new();
    std::io::Read::read_to_end(&mut archive.by_name("frames/frame_0001.png").unwrap(), &mut png)
        .unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.dimensions(), (1280, 720));
}
