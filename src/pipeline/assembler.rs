// 並列組立: ページ構築（rayon並列） -> PDF組立（逐次）

use std::path::PathBuf;
use std::sync::Mutex;

use rayon::prelude::*;

use crate::error::{PdfBindError, Result};
use crate::page::{PageFragment, build_page, decode_image};
use crate::pdf::writer::ImagePageWriter;
use crate::pipeline::progress::ProgressReporter;

/// Tuning for a single assembly run.
pub struct AssembleConfig {
    /// Worker thread count; 0 selects the automatic count.
    pub parallel_workers: usize,
    /// zlib level (0-9) for page pixel streams.
    pub compression_level: u32,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        AssembleConfig {
            parallel_workers: 0,
            compression_level: 6,
        }
    }
}

/// 画像ファイル列からPDFバイト列を組み立てる。
///
/// スライスの並びがそのままページ順になる。ページ構築はワーカーに
/// 分散し、ドキュメントへの組み込みは逐次で行うため、出力バイト列は
/// ワーカー数によらず一致する。
///
/// 進捗は完了順に通知する（completedは1ずつ増える）。ページ構築が
/// 失敗した場合、ページ順で最初の失敗を全体のエラーとして返す。
pub fn assemble(
    images: &[PathBuf],
    config: &AssembleConfig,
    progress: &dyn ProgressReporter,
) -> Result<Vec<u8>> {
    let total = images.len();
    tracing::debug!(
        pages = total,
        workers = config.parallel_workers,
        "dispatching page builds"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallel_workers)
        .build()
        .map_err(|e| PdfBindError::config(format!("building worker pool: {e}")))?;

    // --- Phase A: page construction (rayon parallel) ---
    let completed = Mutex::new(0usize);
    let built: Vec<Result<PageFragment>> = pool.install(|| {
        images
            .par_iter()
            .enumerate()
            .map(|(index, path)| {
                let image = decode_image(path)?;
                let fragment = build_page(index, image, config.compression_level)?;
                // Hold the lock while reporting so events stay ordered.
                let mut done = completed.lock().unwrap();
                *done += 1;
                progress.page_completed(*done, total);
                drop(done);
                Ok(fragment)
            })
            .collect()
    });

    let mut fragments: Vec<PageFragment> = Vec::with_capacity(total);
    for result in built {
        fragments.push(result?);
    }

    // Sort by page index for deterministic output
    fragments.sort_by_key(|f| f.index);

    // --- Phase B: document assembly (sequential) ---
    let mut writer = ImagePageWriter::new();
    for fragment in fragments {
        writer.append_page(fragment);
    }

    tracing::debug!(pages = writer.page_count(), "assembling document");
    writer.finish()
}
