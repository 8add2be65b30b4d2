//! util — общие хелперы бинарного декодирования (footer и item frames).
//!
//! Содержит:
//! - le_u32_at(): LE u32 по произвольному смещению с проверкой границ.
//! - find_terminator(): поиск NUL-терминатора ключа.
//!
//! Все хелперы работают по срезам и никогда не читают за их пределами.

use byteorder::{ByteOrder, LittleEndian};

/// LE u32 по смещению `off`. None, если 4 байта не помещаются в `buf`.
///
/// Декодирование побайтовое (byteorder), без требований к выравниванию.
#[inline]
pub fn le_u32_at(buf: &[u8], off: usize) -> Option<u32> {
    let end = off.checked_add(4)?;
    if end > buf.len() {
        return None;
    }
    Some(LittleEndian::read_u32(&buf[off..end]))
}

/// Найти NUL в первых `max_len` байтах `buf` (не дальше конца среза).
///
/// Возвращает длину строки в байтах до терминатора, либо None, если терминатора нет.
#[inline]
pub fn find_terminator(buf: &[u8], max_len: usize) -> Option<usize> {
    buf[..buf.len().min(max_len)].iter().position(|&b| b == 0)
}
