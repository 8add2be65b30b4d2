//! Константы формата APE tag (footer, item frames).
//!
//! Footer (32 байта, LE), всегда последние 32 байта потока:
//! [magic8="APETAGEX"][version u32][item_block_size u32][item_count u32][flags u32][reserved 8]
//!
//! item_block_size считает item frames + сам footer (но не опциональный header).

// -------- Footer --------
pub const APE_TAG_MAGIC: &[u8; 8] = b"APETAGEX";
pub const MAGIC_SIZE: usize = 8;
pub const FOOTER_SIZE: usize = 32;

pub const FOOTER_OFF_MAGIC: usize = 0;
pub const FOOTER_OFF_VERSION: usize = 8;
pub const FOOTER_OFF_BLOCK_SIZE: usize = 12;
pub const FOOTER_OFF_ITEM_COUNT: usize = 16;
pub const FOOTER_OFF_FLAGS: usize = 20;

/// Версии контейнера: APEv1 и APEv2.
pub const APE_VERSION_1000: u32 = 1000;
pub const APE_VERSION_2000: u32 = 2000;

// Tag flags (поле flags footer'а)
pub const TAG_FLAG_HAS_HEADER: u32 = 1 << 31;
pub const TAG_FLAG_IS_HEADER: u32 = 1 << 29;
pub const TAG_FLAG_READ_ONLY: u32 = 0x1;

// -------- Limits --------
/// item_count сверх этого значения обрезается (не ошибка).
pub const MAX_ITEM_COUNT: u32 = 256;
/// Максимальная длина ключа в байтах (без NUL).
pub const MAX_KEY_LEN: usize = 255;

// -------- Item frame --------
// [value_len u32][flags u32][key ... NUL][value]
pub const FRAME_OFF_VALUE_LEN: usize = 0;
pub const FRAME_OFF_FLAGS: usize = 4;
pub const FRAME_OFF_KEY: usize = 8;
/// value_len + flags + NUL ключа.
pub const FRAME_FIXED_LEN: usize = 9;

pub const ITEM_FLAG_READ_ONLY: u32 = 0x1;
/// Биты [1:3] flags — тип/кодировка значения.
pub const ITEM_ENCODING_MASK: u32 = 0xE;
pub const ITEM_ENCODING_UTF8: u32 = 0x0;
