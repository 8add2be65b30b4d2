//! Сборка тестовых APE тегов (только для тестов: библиотека теги не пишет).
#![allow(dead_code)]

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use apetag::consts::{APE_TAG_MAGIC, FOOTER_SIZE};
use apetag::ByteSource;

pub fn frame_bytes(key: &str, value: &[u8], flags: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(9 + key.len() + value.len());
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out.extend_from_slice(value);
    out
}

pub fn footer_bytes(version: u32, block_size: u32, item_count: u32, flags: u32) -> [u8; FOOTER_SIZE] {
    let mut f = [0u8; FOOTER_SIZE];
    f[..8].copy_from_slice(APE_TAG_MAGIC);
    f[8..12].copy_from_slice(&version.to_le_bytes());
    f[12..16].copy_from_slice(&block_size.to_le_bytes());
    f[16..20].copy_from_slice(&item_count.to_le_bytes());
    f[20..24].copy_from_slice(&flags.to_le_bytes());
    f
}

/// Builder: [audio prefix][frames][padding][footer].
#[derive(Clone, Debug)]
pub struct TestTag {
    prefix: Vec<u8>,
    frames: Vec<Vec<u8>>,
    version: u32,
    item_count: Option<u32>,
    block_size: Option<u32>,
    padding: usize,
    flags: u32,
}

impl TestTag {
    pub fn new() -> Self {
        Self {
            prefix: Vec::new(),
            frames: Vec::new(),
            version: 2000,
            item_count: None,
            block_size: None,
            padding: 0,
            flags: 0,
        }
    }

    pub fn prefix(mut self, audio: &[u8]) -> Self {
        self.prefix = audio.to_vec();
        self
    }

    pub fn version(mut self, v: u32) -> Self {
        self.version = v;
        self
    }

    pub fn text(self, key: &str, value: &str) -> Self {
        self.raw(key, value.as_bytes(), 0)
    }

    pub fn raw(mut self, key: &str, value: &[u8], flags: u32) -> Self {
        self.frames.push(frame_bytes(key, value, flags));
        self
    }

    /// Произвольные байты вместо корректного frame'а.
    pub fn bytes(mut self, b: &[u8]) -> Self {
        self.frames.push(b.to_vec());
        self
    }

    pub fn item_count(mut self, n: u32) -> Self {
        self.item_count = Some(n);
        self
    }

    pub fn block_size(mut self, n: u32) -> Self {
        self.block_size = Some(n);
        self
    }

    pub fn padding(mut self, n: usize) -> Self {
        self.padding = n;
        self
    }

    pub fn tag_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let items: Vec<u8> = self.frames.concat();
        let natural = (items.len() + self.padding + FOOTER_SIZE) as u32;
        let count = self.item_count.unwrap_or(self.frames.len() as u32);
        let size = self.block_size.unwrap_or(natural);

        let mut out = self.prefix.clone();
        out.extend_from_slice(&items);
        out.extend(std::iter::repeat(0xEEu8).take(self.padding));
        out.extend_from_slice(&footer_bytes(self.version, size, count, self.flags));
        out
    }
}

/// Источник, который отдаёт не больше `limit` байт за один read_at после первого чтения.
pub struct ShortSource {
    pub data: Vec<u8>,
    pub limit: usize,
    pub reads: usize,
}

impl ByteSource for ShortSource {
    fn size(&mut self) -> io::Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let start = (offset as usize).min(self.data.len());
        let mut n = buf.len().min(self.data.len() - start);
        if self.reads > 1 {
            n = n.min(self.limit);
        }
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }
}

/// Источник, у которого size() падает с ошибкой I/O.
pub struct BrokenSource;

impl ByteSource for BrokenSource {
    fn size(&mut self) -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Other, "device gone"))
    }

    fn read_at(&mut self, _offset: u64, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device gone"))
    }
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub fn unique_path(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("apetag-{prefix}-{pid}-{t}-{id}.ape"))
}
