//! 画像ディレクトリを1冊のPDFに束ねるライブラリ。

pub mod config;
pub mod discovery;
pub mod error;
pub mod ordering;
pub mod page;
pub mod pdf;
pub mod pipeline;
