// ページ構築: デコード済み画像 -> 自己完結したページフラグメント

pub mod builder;

pub use builder::{build_page, decode_image};

/// 各ページのリソース辞書に画像XObjectを登録する際の名前。
///
/// ページは画像を1つしか持たないため、固定名で衝突しない。
pub const IMAGE_RESOURCE: &str = "Im0";

/// 1ページ分の完成データ: 圧縮済みピクセルと描画オペレータ。
///
/// Holds everything the writer needs, so page construction can run on any
/// thread without touching the filesystem again.
#[derive(Debug, Clone)]
pub struct PageFragment {
    /// Zero-based position of this page in the document.
    pub index: usize,
    /// Image width in pixels, which is also the page width in points.
    pub width: u32,
    /// Image height in pixels, which is also the page height in points.
    pub height: u32,
    /// Zlib-compressed RGB8 samples, row-major.
    pub image_data: Vec<u8>,
    /// Content stream operators that scale and paint the image.
    pub content_ops: Vec<u8>,
}
