// ファイル名の自然順ソート: 数字列は数値として比較、"cover"は先頭、"copyright"は末尾

use std::cmp::Ordering;
use std::path::PathBuf;

/// [`SortKey`]の1要素: 小文字化したテキスト、またはパース済みの数字列。
///
/// Variant order doubles as the comparison fallback when kinds differ at the
/// same position: numbers rank before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeySegment {
    Number(u128),
    Text(String),
}

/// ファイル名1件分の比較キー。
///
/// 比較順序: coverフラグ付きが先頭、copyrightフラグ付きが末尾、
/// フラグが同じもの同士はテキスト/数値セグメントの要素ごとの比較。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    cover: bool,
    segments: Vec<KeySegment>,
    copyright: bool,
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // cover=trueを先頭へ、copyright=trueを末尾へ。フラグはセグメントより優先
        other
            .cover
            .cmp(&self.cover)
            .then_with(|| self.copyright.cmp(&other.copyright))
            .then_with(|| self.segments.cmp(&other.segments))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// ファイル名（またはパス文字列）から比較キーを計算する。
///
/// 任意の文字列を受け付け、キー比較は失敗しない。名前を小文字化し、
/// `cover` / `copyright` の部分一致を調べ、ASCII数字の連続で分割して
/// テキストと数値の交互セグメント列を作る。
///
/// Empty text segments at the boundaries are kept so that digit-leading
/// names compare before text-leading ones.
pub fn sort_key(name: &str) -> SortKey {
    let lower = name.to_lowercase();
    SortKey {
        cover: lower.contains("cover"),
        segments: split_segments(&lower),
        copyright: lower.contains("copyright"),
    }
}

/// Sort image paths into page order.
///
/// Ties (distinct paths whose keys collide via case folding or leading
/// zeros) fall back to the path itself, so the result depends only on the
/// set of inputs, never on their incoming order.
pub fn sort_image_files(files: &mut [PathBuf]) {
    files.sort_by_cached_key(|path| (sort_key(&path.to_string_lossy()), path.clone()));
}

/// Split a name on digit runs, keeping both kinds of segment in order.
///
/// The output always alternates text, number, text, ... beginning and ending
/// with a (possibly empty) text segment.
fn split_segments(name: &str) -> Vec<KeySegment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            segments.push(KeySegment::Text(std::mem::take(&mut text)));
            let mut digits = String::new();
            digits.push(c);
            while let Some(&next) = chars.peek() {
                if next.is_ascii_digit() {
                    digits.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            segments.push(number_segment(digits));
        } else {
            text.push(c);
        }
    }

    segments.push(KeySegment::Text(text));
    segments
}

/// Parse a digit run. Runs too long for u128 stay text so the order remains
/// total; they compare after numbers via the variant rank.
fn number_segment(digits: String) -> KeySegment {
    match digits.parse::<u128>() {
        Ok(n) => KeySegment::Number(n),
        Err(_) => KeySegment::Text(digits),
    }
}
