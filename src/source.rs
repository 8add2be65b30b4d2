//! source — random-access источник байт для чтения тега.
//!
//! ByteSource: size() + read_at(offset, buf). read_at может вернуть меньше байт,
//! чем запрошено (как pread); TagStore трактует короткое чтение как ошибку.
//!
//! Адаптеры:
//! - FileSource<R> — любой Read + Seek (std::fs::File, Cursor<..>).
//! - MemSource     — байты в памяти (Vec / Cow).
//! - MmapSource    — файл через memmap2 (read-only).

use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

pub trait ByteSource {
    /// Полная длина потока в байтах.
    fn size(&mut self) -> io::Result<u64>;

    /// Прочитать до `buf.len()` байт с позиции `offset`. Возвращает число прочитанных байт;
    /// 0 — offset на/за концом потока.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn size(&mut self) -> io::Result<u64> {
        (**self).size()
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_at(offset, buf)
    }
}

/// Копирует из `data[offset..]` в `buf`, сколько поместится.
#[inline]
fn copy_at(data: &[u8], offset: u64, buf: &mut [u8]) -> usize {
    let start = match usize::try_from(offset) {
        Ok(s) if s < data.len() => s,
        _ => return 0,
    };
    let n = buf.len().min(data.len() - start);
    buf[..n].copy_from_slice(&data[start..start + n]);
    n
}

// ---------------- FileSource ----------------

/// Источник поверх Read + Seek.
#[derive(Debug)]
pub struct FileSource<R> {
    inner: R,
}

impl FileSource<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let f = OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("open {}", path.display()))?;
        Ok(Self { inner: f })
    }
}

impl<R: Read + Seek> FileSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read + Seek> ByteSource for FileSource<R> {
    fn size(&mut self) -> io::Result<u64> {
        self.inner.seek(SeekFrom::End(0))
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.seek(SeekFrom::Start(offset))?;
        // read до заполнения буфера или EOF
        let mut got = 0;
        while got < buf.len() {
            match self.inner.read(&mut buf[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(got)
    }
}

// ---------------- MemSource ----------------

/// Источник поверх байт в памяти.
#[derive(Debug, Clone)]
pub struct MemSource<'a> {
    data: Cow<'a, [u8]>,
}

impl<'a> MemSource<'a> {
    pub fn new<B: Into<Cow<'a, [u8]>>>(data: B) -> Self {
        Self { data: data.into() }
    }
}

impl ByteSource for MemSource<'_> {
    fn size(&mut self) -> io::Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        Ok(copy_at(&self.data, offset, buf))
    }
}

// ---------------- MmapSource ----------------

/// Read-only mmap файла. Пустой файл не мапится (mmap нулевой длины не переносим).
#[derive(Debug)]
pub struct MmapSource {
    mmap: Option<Mmap>,
}

impl MmapSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("open {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("stat {}", path.display()))?
            .len();
        if len == 0 {
            return Ok(Self { mmap: None });
        }
        // Safety: маппинг только на чтение; файл не должен усекаться, пока жив MmapSource.
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("mmap {}", path.display()))?;
        Ok(Self { mmap: Some(mmap) })
    }

    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}

impl ByteSource for MmapSource {
    fn size(&mut self) -> io::Result<u64> {
        Ok(self.bytes().len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        Ok(copy_at(self.bytes(), offset, buf))
    }
}
