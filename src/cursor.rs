//! cursor — поиск item'а по ключу внутри загруженного TagStore.
//!
//! Обход выполняется целиком в конструкторе (FrameCursor::new): строго вперёд от
//! смещения 0, без возвратов. Отсутствие ключа — нормальное состояние, не ошибка.

use log::{debug, warn};

use crate::consts::{FRAME_FIXED_LEN, FRAME_OFF_FLAGS, ITEM_ENCODING_MASK, ITEM_ENCODING_UTF8};
use crate::frame::{parse_frame, ItemKind, RawFrame, ScanStop};
use crate::store::TagStore;
use crate::util::le_u32_at;

/// Результат поиска item'а.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLookup {
    NotFound,
    /// Найден и декодирован как UTF-8.
    Text(String),
    /// Найден, но значение не декодируется как текст (не-UTF-8 тип или битый UTF-8 в strict-режиме).
    Undecoded { kind: ItemKind },
}

impl ItemLookup {
    pub fn found(&self) -> bool {
        !matches!(self, ItemLookup::NotFound)
    }

    /// Декодированное значение; пустая строка, если не найдено/не декодировано.
    pub fn value(&self) -> &str {
        match self {
            ItemLookup::Text(s) => s,
            _ => "",
        }
    }

    pub fn encoding_supported(&self) -> bool {
        !matches!(self, ItemLookup::Undecoded { .. })
    }
}

/// Курсор поиска одного ключа. Заимствует item block у TagStore.
#[derive(Debug)]
pub struct FrameCursor<'a> {
    store: &'a TagStore,
    target_key: Option<String>,
    key_len: u16,
    offset: usize,
    found: Option<RawFrame<'a>>,
    stop: ScanStop,
}

impl<'a> FrameCursor<'a> {
    /// Создать курсор и сразу выполнить поиск `key`.
    ///
    /// `None` — только проверка структуры первого frame'а; совпадения не бывает.
    pub fn new(store: &'a TagStore, key: Option<&str>) -> Self {
        let max_key_len = store.config().max_key_len;
        let mut cursor = Self {
            store,
            target_key: key.map(str::to_owned),
            key_len: 0,
            offset: 0,
            found: None,
            stop: ScanStop::NoTargetKey,
        };

        if let Some(k) = key {
            match u16::try_from(k.len()) {
                Ok(n) if k.len() <= max_key_len => cursor.key_len = n,
                _ => {
                    debug!("apetag: key of {} B exceeds max key length {}", k.len(), max_key_len);
                    cursor.stop = ScanStop::KeyTooLong;
                    return cursor;
                }
            }
        }

        cursor.stop = cursor.scan(max_key_len);
        cursor
    }

    fn scan(&mut self, max_key_len: usize) -> ScanStop {
        let store: &'a TagStore = self.store;
        let block = store.item_block();
        let mut remaining = store.scan_limit();

        loop {
            self.found = None;

            if remaining == 0 {
                debug!(
                    "apetag: scan exhausted item count at off={} (block {} B)",
                    self.offset,
                    block.len()
                );
                return ScanStop::ItemCountExhausted;
            }

            let frame = match parse_frame(block, self.offset, max_key_len) {
                Ok(f) => f,
                Err(stop) => {
                    debug!(
                        "apetag: scan stopped at off={} (block {} B): {:?}",
                        self.offset,
                        block.len(),
                        stop
                    );
                    return stop;
                }
            };

            let Some(target) = self.target_key.as_deref() else {
                return ScanStop::NoTargetKey;
            };

            // длина и содержимое должны совпасть целиком (без префиксных совпадений)
            if frame.key() == target.as_bytes() {
                self.found = Some(frame);
                return ScanStop::Found;
            }

            remaining -= 1;
            self.offset = frame.end();
        }
    }

    /// true — ключ не найден (обход исчерпан).
    pub fn done(&self) -> bool {
        self.found.is_none()
    }

    pub fn stop_reason(&self) -> ScanStop {
        self.stop
    }

    /// Смещение внутри item block, на котором остановился обход.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn key(&self) -> Option<&str> {
        self.target_key.as_deref()
    }

    /// 9 + длина ключа.
    pub fn header_len(&self) -> usize {
        FRAME_FIXED_LEN + self.key_len as usize
    }

    /// Байты найденного frame'а целиком.
    pub fn frame(&self) -> Option<&'a [u8]> {
        self.found.map(|f| f.bytes)
    }

    pub fn frame_len(&self) -> usize {
        self.found.map_or(0, |f| f.bytes.len())
    }

    pub fn flags(&self) -> Option<u32> {
        self.frame().and_then(|b| le_u32_at(b, FRAME_OFF_FLAGS))
    }

    pub fn kind(&self) -> Option<ItemKind> {
        self.flags().map(ItemKind::from_flags)
    }

    /// Сырые байты значения найденного item'а (для бинарных типов).
    pub fn raw_value(&self) -> Option<&'a [u8]> {
        let header_len = self.header_len();
        self.frame().and_then(|b| b.get(header_len..))
    }

    /// Декодировать значение найденного item'а.
    pub fn value(&self) -> ItemLookup {
        let (Some(flags), Some(bytes)) = (self.flags(), self.raw_value()) else {
            return ItemLookup::NotFound;
        };
        let key = self.key().unwrap_or_default();
        let kind = ItemKind::from_flags(flags);

        if flags & ITEM_ENCODING_MASK != ITEM_ENCODING_UTF8 {
            warn!(
                "apetag: item '{}' not decoded: encoding flags {:#x} ({})",
                key, flags, kind
            );
            return ItemLookup::Undecoded { kind };
        }

        match std::str::from_utf8(bytes) {
            Ok(s) => ItemLookup::Text(s.to_owned()),
            Err(e) if self.store.config().lossy_utf8 => {
                debug!("apetag: item '{}' has invalid UTF-8 ({}), decoding lossy", key, e);
                ItemLookup::Text(String::from_utf8_lossy(bytes).into_owned())
            }
            Err(e) => {
                warn!("apetag: item '{}' has invalid UTF-8: {}", key, e);
                ItemLookup::Undecoded { kind }
            }
        }
    }
}
