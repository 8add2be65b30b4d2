use byteorder::{ByteOrder, LittleEndian};

use crate::consts::{
    APE_TAG_MAGIC, APE_VERSION_1000, APE_VERSION_2000, FOOTER_OFF_BLOCK_SIZE, FOOTER_OFF_FLAGS,
    FOOTER_OFF_ITEM_COUNT, FOOTER_OFF_MAGIC, FOOTER_OFF_VERSION, FOOTER_SIZE, MAGIC_SIZE,
    TAG_FLAG_HAS_HEADER, TAG_FLAG_IS_HEADER, TAG_FLAG_READ_ONLY,
};
use crate::error::LoadError;

/// Footer APE тега (последние 32 байта потока).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApeFooter {
    pub version: u32, // 1000 | 2000
    pub item_block_size: u32,
    pub item_count: u32,
    pub flags: u32,
}

impl ApeFooter {
    /// Перед item frames стоит 32-байтовый header (в item_block_size не учитывается).
    pub fn has_header(&self) -> bool {
        self.flags & TAG_FLAG_HAS_HEADER != 0
    }

    /// Блок помечен как header, а не footer.
    pub fn is_header(&self) -> bool {
        self.flags & TAG_FLAG_IS_HEADER != 0
    }

    /// Тег целиком read-only (бит 0).
    pub fn read_only(&self) -> bool {
        self.flags & TAG_FLAG_READ_ONLY != 0
    }

    pub fn is_supported_version(version: u32) -> bool {
        version == APE_VERSION_1000 || version == APE_VERSION_2000
    }
}

/// Разобрать footer (валидация MAGIC и версии). Ограничения по размеру блока проверяет TagStore.
pub fn footer_read(buf: &[u8]) -> Result<ApeFooter, LoadError> {
    if buf.len() < FOOTER_SIZE {
        return Err(LoadError::StreamTooShort {
            len: buf.len() as u64,
        });
    }
    if &buf[FOOTER_OFF_MAGIC..FOOTER_OFF_MAGIC + MAGIC_SIZE] != APE_TAG_MAGIC {
        return Err(LoadError::BadMagic);
    }

    let version = LittleEndian::read_u32(&buf[FOOTER_OFF_VERSION..FOOTER_OFF_VERSION + 4]);
    if !ApeFooter::is_supported_version(version) {
        return Err(LoadError::UnsupportedVersion(version));
    }

    Ok(ApeFooter {
        version,
        item_block_size: LittleEndian::read_u32(
            &buf[FOOTER_OFF_BLOCK_SIZE..FOOTER_OFF_BLOCK_SIZE + 4],
        ),
        item_count: LittleEndian::read_u32(&buf[FOOTER_OFF_ITEM_COUNT..FOOTER_OFF_ITEM_COUNT + 4]),
        flags: LittleEndian::read_u32(&buf[FOOTER_OFF_FLAGS..FOOTER_OFF_FLAGS + 4]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footer_bytes(version: u32, size: u32, count: u32, flags: u32) -> [u8; FOOTER_SIZE] {
        let mut f = [0u8; FOOTER_SIZE];
        f[..8].copy_from_slice(APE_TAG_MAGIC);
        LittleEndian::write_u32(&mut f[8..12], version);
        LittleEndian::write_u32(&mut f[12..16], size);
        LittleEndian::write_u32(&mut f[16..20], count);
        LittleEndian::write_u32(&mut f[20..24], flags);
        f
    }

    #[test]
    fn reads_fields() {
        let f = footer_bytes(2000, 64, 1, TAG_FLAG_HAS_HEADER);
        let h = footer_read(&f).expect("footer");
        assert_eq!(h.version, 2000);
        assert_eq!(h.item_block_size, 64);
        assert_eq!(h.item_count, 1);
        assert!(h.has_header());
        assert!(!h.is_header());
        assert!(!h.read_only());
    }

    #[test]
    fn rejects_magic_and_version() {
        let mut f = footer_bytes(2000, 64, 1, 0);
        f[0] = b'X';
        assert!(matches!(footer_read(&f), Err(LoadError::BadMagic)));

        let f = footer_bytes(3000, 64, 1, 0);
        assert!(matches!(
            footer_read(&f),
            Err(LoadError::UnsupportedVersion(3000))
        ));

        assert!(matches!(
            footer_read(&f[..31]),
            Err(LoadError::StreamTooShort { len: 31 })
        ));
    }

    #[test]
    fn accepts_v1() {
        let f = footer_bytes(1000, 40, 0, 0);
        assert_eq!(footer_read(&f).expect("v1").version, 1000);
    }
}
