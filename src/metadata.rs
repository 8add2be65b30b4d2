//! metadata — стандартные поля тега (Title/Artist/...) поверх TagStore.
//!
//! Сначала точный поиск через FrameCursor; если ключ записан в другом регистре
//! ("ARTIST", "artist") — fallback по items() без учёта регистра.

use serde::Serialize;

use crate::cursor::ItemLookup;
use crate::frame::ItemKind;
use crate::store::TagStore;

pub const KEY_TITLE: &str = "Title";
pub const KEY_ARTIST: &str = "Artist";
pub const KEY_ALBUM: &str = "Album";
pub const KEY_ALBUM_ARTIST: &str = "Album Artist";
pub const KEY_COMPOSER: &str = "Composer";
pub const KEY_GENRE: &str = "Genre";
pub const KEY_YEAR: &str = "Year";
pub const KEY_TRACK: &str = "Track";
pub const KEY_DISC: &str = "Disc";
pub const KEY_COMMENT: &str = "Comment";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub composer: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub track_no: Option<u32>,
    pub track_total: Option<u32>,
    pub disc_no: Option<u32>,
    pub disc_total: Option<u32>,
    pub comment: Option<String>,
}

impl TagMetadata {
    /// Собрать стандартные поля. Невалидный store даёт пустые метаданные.
    pub fn from_store(store: &TagStore) -> Self {
        if !store.is_valid() {
            return Self::default();
        }
        let get = |key: &str| text_item(store, key);

        let (track_no, track_total) = parse_slash_pair_u32(get(KEY_TRACK).as_deref());
        let (disc_no, disc_total) = parse_slash_pair_u32(get(KEY_DISC).as_deref());

        Self {
            title: get(KEY_TITLE),
            artist: get(KEY_ARTIST),
            album: get(KEY_ALBUM),
            album_artist: get(KEY_ALBUM_ARTIST),
            composer: get(KEY_COMPOSER),
            genre: get(KEY_GENRE),
            year: get(KEY_YEAR),
            track_no,
            track_total,
            disc_no,
            disc_total,
            comment: get(KEY_COMMENT),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Непустое текстовое значение по ключу: сначала точный ключ, затем без учёта регистра.
pub fn text_item(store: &TagStore, key: &str) -> Option<String> {
    let exact = match store.find_item(key) {
        ItemLookup::Text(s) => Some(s),
        ItemLookup::Undecoded { .. } => return None,
        ItemLookup::NotFound => None,
    };
    let value = exact.or_else(|| {
        store
            .items()
            .find(|it| it.key.eq_ignore_ascii_case(key.as_bytes()))
            .filter(|it| it.kind() == ItemKind::Utf8)
            .and_then(|it| it.text().map(str::to_owned))
    })?;

    // APEv2: несколько значений разделяются NUL — берём первое
    let first = value.split('\0').next().unwrap_or_default().trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Разобрать "3" -> (Some(3), None), "3/12" -> (Some(3), Some(12)).
pub(crate) fn parse_slash_pair_u32(s: Option<&str>) -> (Option<u32>, Option<u32>) {
    let Some(s) = s else { return (None, None) };
    let s = s.trim();
    if s.is_empty() {
        return (None, None);
    }

    let mut parts = s.split('/');
    let a = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let b = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    (a, b)
}
