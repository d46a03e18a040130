use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfBindError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Image decode error: {0}")]
    DecodeError(String),

    #[error("Page build error: {0}")]
    PageBuildError(String),

    #[error("PDF write error: {0}")]
    PdfWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`PdfBindError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl PdfBindError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create an image decode error.
    decode => DecodeError,
    /// Create a page build error.
    page_build => PageBuildError,
    /// Create a PDF write error.
    pdf_write => PdfWriteError,
}

pub type Result<T> = std::result::Result<T, PdfBindError>;
