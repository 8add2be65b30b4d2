use anyhow::Result;
use std::path::Path;

use apetag::{ApeConfig, FileSource, MmapSource, TagStore};

/// Открыть файл и загрузить тег (конфиг из ENV).
pub fn open_tag(path: &Path, mmap: bool) -> Result<TagStore> {
    let cfg = ApeConfig::from_env();
    let tag = if mmap {
        TagStore::load_with_config(MmapSource::open(path)?, cfg)
    } else {
        TagStore::load_with_config(FileSource::open(path)?, cfg)
    };
    Ok(tag)
}

/// Значение item'а для вывода: multi-value (NUL-разделители) через " / ".
pub fn display_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.replace('\0', " / "),
        Err(_) => format!("(binary {} B)", bytes.len()),
    }
}

/// 16 байт на строку, через пробел.
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .map(|row| {
            row.iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
