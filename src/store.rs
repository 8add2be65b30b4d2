//! store — загрузка APE тега с конца потока.
//!
//! Порядок:
//! 1) size() источника, чтение последних 32 байт (footer);
//! 2) MAGIC "APETAGEX", версия 1000|2000;
//! 3) item_count обрезается до max_item_count (не ошибка). Обрезанное значение
//!    только для отчёта: обход ограничен исходным item_count из footer'а;
//! 4) item_block_size > 32 и не больше длины потока;
//! 5) item block читается целиком одним read_at с `stream_len - item_block_size`.
//!
//! TagStore::load никогда не возвращает ошибку: при любой проблеме получаем
//! невалидный store с пустым буфером и сохранённой причиной (load_error()).

use anyhow::Result;
use log::debug;

use crate::config::ApeConfig;
use crate::consts::{APE_VERSION_1000, FOOTER_SIZE};
use crate::cursor::{FrameCursor, ItemLookup};
use crate::error::LoadError;
use crate::footer::{footer_read, ApeFooter};
use crate::frame::FrameIter;
use crate::source::ByteSource;

/// Загруженный item block APE тега. Неизменяем после создания.
#[derive(Debug)]
pub struct TagStore {
    valid: bool,
    item_block: Vec<u8>,
    block_size: u32,
    item_block_offset: u64,
    item_count: u32,
    scan_limit: u32,
    footer: Option<ApeFooter>,
    cfg: ApeConfig,
    load_error: Option<LoadError>,
}

/// Прочитать ровно `len` байт; короткое чтение — ошибка.
fn read_exact_at<S: ByteSource>(src: &mut S, offset: u64, len: usize) -> Result<Vec<u8>, LoadError> {
    let mut buf = vec![0u8; len];
    let got = src.read_at(offset, &mut buf)?;
    if got != len {
        return Err(LoadError::ShortRead {
            offset,
            wanted: len,
            got,
        });
    }
    Ok(buf)
}

impl TagStore {
    /// Загрузить тег с настройками по умолчанию.
    pub fn load<S: ByteSource>(source: S) -> Self {
        Self::load_with_config(source, ApeConfig::default())
    }

    pub fn load_with_config<S: ByteSource>(mut source: S, cfg: ApeConfig) -> Self {
        match Self::parse(&mut source, &cfg) {
            Ok(store) => store,
            Err(e) => {
                debug!("apetag: no valid tag: {}", e);
                Self {
                    valid: false,
                    item_block: Vec::new(),
                    block_size: 0,
                    item_block_offset: 0,
                    item_count: 0,
                    scan_limit: 0,
                    footer: None,
                    cfg,
                    load_error: Some(e),
                }
            }
        }
    }

    /// Как load, но с ошибкой наружу (downcast к LoadError).
    pub fn try_load<S: ByteSource>(mut source: S, cfg: ApeConfig) -> Result<Self> {
        Ok(Self::parse(&mut source, &cfg)?)
    }

    fn parse<S: ByteSource>(source: &mut S, cfg: &ApeConfig) -> Result<Self, LoadError> {
        let stream_len = source.size()?;
        if stream_len < FOOTER_SIZE as u64 {
            return Err(LoadError::StreamTooShort { len: stream_len });
        }

        let tail = read_exact_at(source, stream_len - FOOTER_SIZE as u64, FOOTER_SIZE)?;
        let footer = footer_read(&tail)?;
        if footer.version == APE_VERSION_1000 && !cfg.allow_v1 {
            return Err(LoadError::UnsupportedVersion(footer.version));
        }

        let item_count = footer.item_count.min(cfg.max_item_count);
        if item_count < footer.item_count {
            debug!(
                "apetag: item count {} clamped to {}",
                footer.item_count, item_count
            );
        }

        let block_size = footer.item_block_size;
        if block_size as usize <= FOOTER_SIZE {
            return Err(LoadError::EmptyItemBlock(block_size));
        }
        let item_block_offset = stream_len
            .checked_sub(block_size as u64)
            .ok_or(LoadError::BlockExceedsStream {
                block: block_size,
                stream: stream_len,
            })?;

        let item_block = read_exact_at(source, item_block_offset, block_size as usize)?;

        debug!(
            "apetag: tag v{} at off={} size={} items={}",
            footer.version, item_block_offset, block_size, item_count
        );

        Ok(Self {
            valid: true,
            item_block,
            block_size,
            item_block_offset,
            item_count,
            scan_limit: footer.item_count,
            footer: Some(footer),
            cfg: cfg.clone(),
            load_error: None,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Размер item block по footer'у (включая сам footer).
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Абсолютная позиция начала item block в потоке.
    pub fn item_block_offset(&self) -> u64 {
        self.item_block_offset
    }

    pub fn item_block(&self) -> &[u8] {
        &self.item_block
    }

    /// item_count из footer'а после обрезки.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Сколько frame'ов может посетить обход: item_count из footer'а без обрезки.
    /// Реально обход упирается в границу блока задолго до этого.
    pub fn scan_limit(&self) -> u32 {
        self.scan_limit
    }

    pub fn footer(&self) -> Option<&ApeFooter> {
        self.footer.as_ref()
    }

    pub fn version(&self) -> Option<u32> {
        self.footer.map(|f| f.version)
    }

    pub fn config(&self) -> &ApeConfig {
        &self.cfg
    }

    /// Причина невалидности (для диагностики).
    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    /// Курсор поиска по ключу.
    pub fn cursor(&self, key: Option<&str>) -> FrameCursor<'_> {
        FrameCursor::new(self, key)
    }

    /// Найти item по точному ключу и декодировать значение.
    pub fn find_item(&self, key: &str) -> ItemLookup {
        if !self.valid {
            return ItemLookup::NotFound;
        }
        FrameCursor::new(self, Some(key)).value()
    }

    /// Все item'ы по порядку (не более item_count из footer'а).
    pub fn items(&self) -> FrameIter<'_> {
        FrameIter::new(&self.item_block, self.scan_limit, self.cfg.max_key_len)
    }
}
