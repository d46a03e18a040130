// 画像ファイル探索: ディレクトリ再帰走査と拡張子フィルタ

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// 変換対象として認識する拡張子（小文字で比較する）。
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

/// Check whether a path names a supported image format, by extension only.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// 入力パスから画像ファイルを収集する。
///
/// ディレクトリは再帰的に走査し、拡張子が一致する通常ファイルだけを
/// 集める。単一ファイルは拡張子が一致する場合のみ1件返す。走査中に
/// 読めなかったエントリは黙って飛ばす。
///
/// The returned order is whatever the filesystem yields; callers sort.
pub fn find_image_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().flatten() {
            if entry.file_type().is_file() && is_image_file(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
    } else if input.is_file() && is_image_file(input) {
        files.push(input.to_path_buf());
    }
    files
}
