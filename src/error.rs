//! Классификация ошибок загрузки тега.
//!
//! Все они приводят к невалидному TagStore; наружу как panic не уходят.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("stream too short for APE footer ({len} B)")]
    StreamTooShort { len: u64 },

    #[error("APE footer magic mismatch")]
    BadMagic,

    #[error("unsupported APE tag version: {0}")]
    UnsupportedVersion(u32),

    #[error("APE item block has no item content (size {0})")]
    EmptyItemBlock(u32),

    #[error("APE item block ({block} B) larger than stream ({stream} B)")]
    BlockExceedsStream { block: u32, stream: u64 },

    #[error("short read at offset {offset}: wanted {wanted} B, got {got} B")]
    ShortRead { offset: u64, wanted: usize, got: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Крупная категория ошибки загрузки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Footer отсутствует/повреждён, версия не поддерживается, пустой блок.
    Structural,
    /// Источник вернул меньше байт, чем запрошено (или ошибку I/O).
    TruncatedRead,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::ShortRead { .. } | LoadError::Io(_) => LoadErrorKind::TruncatedRead,
            _ => LoadErrorKind::Structural,
        }
    }
}
