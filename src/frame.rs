//! frame — разбор одного item frame внутри item block.
//!
//! Layout (LE): [value_len u32][flags u32][key ... NUL][value: value_len bytes]
//!
//! parse_frame() — единственное место, где читаются байты frame'а; FrameCursor и
//! FrameIter оба идут через него, поэтому правила границ одинаковые:
//! - off > block_len                     → PastEnd
//! - off + 8 > block_len                 → HeaderTruncated
//! - off + value_len > block_len         → ValueOverrun
//! - нет NUL в окне ключа                → NoKeyTerminator
//! - off + 9 + key_len + value_len > len → ValueOverrun

use std::fmt;

use crate::consts::{
    FRAME_FIXED_LEN, FRAME_OFF_FLAGS, FRAME_OFF_KEY, FRAME_OFF_VALUE_LEN, ITEM_ENCODING_MASK,
    ITEM_FLAG_READ_ONLY,
};
use crate::util::{find_terminator, le_u32_at};

/// Тип значения item'а (биты [1:3] flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// UTF-8 текст.
    Utf8,
    /// Бинарные данные (например, обложка).
    Binary,
    /// Внешняя ссылка (URL/путь).
    Locator,
    /// Зарезервированные значения.
    Reserved(u32),
}

impl ItemKind {
    pub fn from_flags(flags: u32) -> Self {
        Self::from_u32((flags & ITEM_ENCODING_MASK) >> 1)
    }

    pub fn from_u32(code: u32) -> Self {
        match code {
            0 => ItemKind::Utf8,
            1 => ItemKind::Binary,
            2 => ItemKind::Locator,
            n => ItemKind::Reserved(n),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Utf8 => write!(f, "utf8"),
            ItemKind::Binary => write!(f, "binary"),
            ItemKind::Locator => write!(f, "locator"),
            ItemKind::Reserved(n) => write!(f, "reserved({})", n),
        }
    }
}

/// Почему остановился обход frame'ов.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStop {
    /// Найден frame с искомым ключом.
    Found,
    /// Просмотрено item_count frame'ов.
    ItemCountExhausted,
    PastEnd,
    HeaderTruncated,
    ValueOverrun,
    NoKeyTerminator,
    /// Ключ не задан: проверен только первый frame.
    NoTargetKey,
    /// Искомый ключ длиннее допустимого.
    KeyTooLong,
}

/// Frame, целиком лежащий внутри item block.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawFrame<'a> {
    pub offset: usize,
    /// Весь frame: заголовок + ключ + NUL + значение.
    pub bytes: &'a [u8],
    pub flags: u32,
    pub key_len: usize,
}

impl<'a> RawFrame<'a> {
    pub fn key(&self) -> &'a [u8] {
        &self.bytes[FRAME_OFF_KEY..FRAME_OFF_KEY + self.key_len]
    }

    pub fn value(&self) -> &'a [u8] {
        &self.bytes[FRAME_FIXED_LEN + self.key_len..]
    }

    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }
}

/// Разобрать frame по смещению `off`. Никогда не читает за пределами `block`.
pub(crate) fn parse_frame(
    block: &[u8],
    off: usize,
    max_key_len: usize,
) -> Result<RawFrame<'_>, ScanStop> {
    let block_len = block.len();
    if off > block_len {
        return Err(ScanStop::PastEnd);
    }
    let key_start = off
        .checked_add(FRAME_OFF_KEY)
        .filter(|&k| k <= block_len)
        .ok_or(ScanStop::HeaderTruncated)?;

    let value_len =
        le_u32_at(block, off + FRAME_OFF_VALUE_LEN).ok_or(ScanStop::HeaderTruncated)? as usize;
    let flags = le_u32_at(block, off + FRAME_OFF_FLAGS).ok_or(ScanStop::HeaderTruncated)?;

    match off.checked_add(value_len) {
        Some(end) if end <= block_len => {}
        _ => return Err(ScanStop::ValueOverrun),
    }

    // окно поиска: ключ + NUL
    let key_len = find_terminator(&block[key_start..], max_key_len.saturating_add(1))
        .ok_or(ScanStop::NoKeyTerminator)?;

    let frame_len = FRAME_FIXED_LEN + key_len + value_len;
    let end = off
        .checked_add(frame_len)
        .filter(|&e| e <= block_len)
        .ok_or(ScanStop::ValueOverrun)?;

    Ok(RawFrame {
        offset: off,
        bytes: &block[off..end],
        flags,
        key_len,
    })
}

/// Один item тега (заимствует байты из TagStore).
#[derive(Debug, Clone, Copy)]
pub struct TagItem<'a> {
    /// Смещение frame'а внутри item block.
    pub offset: usize,
    pub key: &'a [u8],
    pub flags: u32,
    pub value: &'a [u8],
}

impl<'a> TagItem<'a> {
    pub(crate) fn from_raw(f: RawFrame<'a>) -> Self {
        Self {
            offset: f.offset,
            key: f.key(),
            flags: f.flags,
            value: f.value(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        ItemKind::from_flags(self.flags)
    }

    pub fn read_only(&self) -> bool {
        self.flags & ITEM_FLAG_READ_ONLY != 0
    }

    /// Ключ как строка (ключи APE — ASCII; прочее заменяется U+FFFD).
    pub fn key_str(&self) -> String {
        String::from_utf8_lossy(self.key).into_owned()
    }

    /// Текстовое значение. None для нетекстовых item'ов и невалидного UTF-8.
    pub fn text(&self) -> Option<&'a str> {
        if self.kind() != ItemKind::Utf8 {
            return None;
        }
        std::str::from_utf8(self.value).ok()
    }
}

/// Последовательный обход всех frame'ов item block'а (не более `limit` штук).
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    block: &'a [u8],
    offset: usize,
    remaining: u32,
    max_key_len: usize,
    stop: Option<ScanStop>,
}

impl<'a> FrameIter<'a> {
    pub(crate) fn new(block: &'a [u8], limit: u32, max_key_len: usize) -> Self {
        Self {
            block,
            offset: 0,
            remaining: limit,
            max_key_len,
            stop: None,
        }
    }

    /// Причина остановки (после того, как итератор вернул None).
    pub fn stop_reason(&self) -> Option<ScanStop> {
        self.stop
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = TagItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stop.is_some() {
            return None;
        }
        if self.remaining == 0 {
            self.stop = Some(ScanStop::ItemCountExhausted);
            return None;
        }
        match parse_frame(self.block, self.offset, self.max_key_len) {
            Ok(f) => {
                self.remaining -= 1;
                self.offset = f.end();
                Some(TagItem::from_raw(f))
            }
            Err(stop) => {
                self.stop = Some(stop);
                None
            }
        }
    }
}
