//! apetag — чтение APE tag контейнера в конце аудиопотока.
//!
//! TagStore читает footer и item block (один раз, целиком в память),
//! FrameCursor ищет item по ключу в уже загруженном блоке.
//!
//! ```no_run
//! use apetag::{FileSource, TagStore};
//!
//! let src = FileSource::open("track.ape".as_ref())?;
//! let tag = TagStore::load(src);
//! if tag.is_valid() {
//!     println!("{}", tag.find_item("Artist").value());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod consts;
pub mod error;
pub mod source;

pub mod footer;
pub mod frame;
pub mod store;
pub mod cursor;

pub mod metadata;

// Хелперы бинарного декодирования (LE, терминаторы)
pub mod util;

// Удобные реэкспорты
pub use config::ApeConfig;
pub use cursor::{FrameCursor, ItemLookup};
pub use error::{LoadError, LoadErrorKind};
pub use footer::ApeFooter;
pub use frame::{FrameIter, ItemKind, ScanStop, TagItem};
pub use metadata::TagMetadata;
pub use source::{ByteSource, FileSource, MemSource, MmapSource};
pub use store::TagStore;
