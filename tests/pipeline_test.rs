// 並列組立パイプラインのテスト
//
// Fixtures are generated on the fly with the image crate (no committed
// binaries). Output is inspected by reloading with lopdf.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{Rgb, RgbImage};
use lopdf::{Document, Object};
use pdf_binding::pipeline::assembler::{AssembleConfig, assemble};
use pdf_binding::pipeline::progress::{NoopProgress, ProgressReporter};

// ============================================================
// Helpers
// ============================================================

/// Write a small RGB image; the seed makes each fixture distinct.
fn write_image(path: &Path, width: u32, height: u32, seed: u8) {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([seed, x as u8, y as u8]));
    image.save(path).expect("write test image");
}

fn workers(count: usize) -> AssembleConfig {
    AssembleConfig {
        parallel_workers: count,
        ..AssembleConfig::default()
    }
}

/// MediaBox (width, height) of a page in a loaded document.
fn page_size(doc: &Document, page_number: u32) -> (i64, i64) {
    let page_id = *doc.get_pages().get(&page_number).expect("page id");
    let media_box = doc
        .get_dictionary(page_id)
        .expect("page dict")
        .get(b"MediaBox")
        .and_then(Object::as_array)
        .expect("MediaBox");
    (
        media_box[2].as_i64().unwrap(),
        media_box[3].as_i64().unwrap(),
    )
}

/// Reporter that records every event for later inspection.
struct Recording {
    events: Mutex<Vec<(usize, usize)>>,
}

impl Recording {
    fn new() -> Self {
        Recording {
            events: Mutex::new(Vec::new()),
        }
    }

    fn events(&self) -> Vec<(usize, usize)> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for Recording {
    fn page_completed(&self, completed: usize, total: usize) {
        self.events.lock().unwrap().push((completed, total));
    }
}

// ============================================================
// 1. Order and dimensions
// ============================================================

#[test]
fn test_assemble_preserves_input_order_and_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let paths = [
        (dir.path().join("first.png"), 40, 50),
        (dir.path().join("second.png"), 60, 70),
        (dir.path().join("third.png"), 80, 90),
    ];
    for (i, (path, w, h)) in paths.iter().enumerate() {
        write_image(path, *w, *h, i as u8);
    }
    let files: Vec<PathBuf> = paths.iter().map(|(p, _, _)| p.clone()).collect();

    let pdf_bytes = assemble(&files, &workers(2), &NoopProgress).expect("assemble");
    let doc = Document::load_mem(&pdf_bytes).expect("load");

    assert_eq!(doc.get_pages().len(), 3);
    assert_eq!(page_size(&doc, 1), (40, 50));
    assert_eq!(page_size(&doc, 2), (60, 70));
    assert_eq!(page_size(&doc, 3), (80, 90));
}

#[test]
fn test_mixed_formats_become_pages() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        dir.path().join("a.jpg"),
        dir.path().join("b.png"),
        dir.path().join("c.gif"),
        dir.path().join("d.bmp"),
    ];
    for (i, path) in files.iter().enumerate() {
        write_image(path, 24, 16, i as u8 * 40);
    }

    let pdf_bytes = assemble(&files, &workers(0), &NoopProgress).expect("assemble");
    let doc = Document::load_mem(&pdf_bytes).expect("load");
    assert_eq!(doc.get_pages().len(), 4);
    for page in 1..=4 {
        assert_eq!(page_size(&doc, page), (24, 16));
    }
}

// ============================================================
// 2. Determinism across worker counts
// ============================================================

#[test]
fn test_output_is_byte_identical_across_worker_counts() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<PathBuf> = (0..6)
        .map(|i| {
            let path = dir.path().join(format!("page{i}.png"));
            write_image(&path, 30 + i, 20 + i, i as u8);
            path
        })
        .collect();

    let bytes_1 = assemble(&files, &workers(1), &NoopProgress).expect("1 worker");
    let bytes_2 = assemble(&files, &workers(2), &NoopProgress).expect("2 workers");
    let bytes_4 = assemble(&files, &workers(4), &NoopProgress).expect("4 workers");

    assert_eq!(bytes_1, bytes_2);
    assert_eq!(bytes_1, bytes_4);
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<PathBuf> = (0..3)
        .map(|i| {
            let path = dir.path().join(format!("page{i}.png"));
            write_image(&path, 50, 50, i as u8);
            path
        })
        .collect();

    let first = assemble(&files, &workers(0), &NoopProgress).expect("first run");
    let second = assemble(&files, &workers(0), &NoopProgress).expect("second run");
    assert_eq!(first, second);
}

// ============================================================
// 3. Progress reporting
// ============================================================

#[test]
fn test_progress_events_arrive_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<PathBuf> = (0..5)
        .map(|i| {
            let path = dir.path().join(format!("page{i}.png"));
            write_image(&path, 20, 20, i as u8);
            path
        })
        .collect();

    let recording = Recording::new();
    assemble(&files, &workers(4), &recording).expect("assemble");

    // completion events are strictly ordered even with parallel workers
    assert_eq!(
        recording.events(),
        vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]
    );
}

#[test]
fn test_empty_input_yields_zero_page_pdf_and_no_events() {
    let recording = Recording::new();
    let pdf_bytes = assemble(&[], &workers(0), &recording).expect("assemble");

    let doc = Document::load_mem(&pdf_bytes).expect("load");
    assert_eq!(doc.get_pages().len(), 0);
    assert!(recording.events().is_empty());
}

// ============================================================
// 4. Failure handling
// ============================================================

#[test]
fn test_corrupt_member_fails_and_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = dir.path().join("good_a.png");
    let corrupt = dir.path().join("corrupt.png");
    let good_b = dir.path().join("good_b.png");
    write_image(&good_a, 10, 10, 1);
    std::fs::write(&corrupt, b"not an image at all").unwrap();
    write_image(&good_b, 10, 10, 2);

    let files = vec![good_a, corrupt, good_b];
    let err = assemble(&files, &workers(2), &NoopProgress).unwrap_err();
    assert!(
        err.to_string().contains("corrupt.png"),
        "error should name the failing file, got: {err}"
    );
}

#[test]
fn test_first_failure_in_page_order_wins() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        dir.path().join("ok0.png"),
        dir.path().join("bad1.png"),
        dir.path().join("ok2.png"),
        dir.path().join("bad3.png"),
    ];
    write_image(&files[0], 10, 10, 0);
    std::fs::write(&files[1], b"broken one").unwrap();
    write_image(&files[2], 10, 10, 2);
    std::fs::write(&files[3], b"broken two").unwrap();

    let err = assemble(&files, &workers(4), &NoopProgress).unwrap_err();
    assert!(
        err.to_string().contains("bad1.png"),
        "earliest page error should win, got: {err}"
    );
}

#[test]
fn test_invalid_compression_level_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.png");
    write_image(&path, 10, 10, 0);

    let config = AssembleConfig {
        parallel_workers: 1,
        compression_level: 10,
    };
    let err = assemble(&[path], &config, &NoopProgress).unwrap_err();
    assert!(err.to_string().contains("compression level"));
}
