use anyhow::Result;
use std::path::PathBuf;

use apetag::TagMetadata;

use super::util::open_tag;

pub fn exec(path: PathBuf, mmap: bool, json: bool) -> Result<()> {
    let tag = open_tag(&path, mmap)?;
    let m = TagMetadata::from_store(&tag);

    if json {
        let s = serde_json::to_string_pretty(&m).unwrap_or_else(|_| "{}".to_string());
        println!("{s}");
        return Ok(());
    }

    if m.is_empty() {
        println!("(no metadata)");
        return Ok(());
    }

    let show = |label: &str, v: &Option<String>| {
        if let Some(v) = v {
            println!("  {:<13}= {}", label, v);
        }
    };
    let pair = |a: Option<u32>, b: Option<u32>| match (a, b) {
        (Some(a), Some(b)) => Some(format!("{a}/{b}")),
        (Some(a), None) => Some(a.to_string()),
        _ => None,
    };

    show("title", &m.title);
    show("artist", &m.artist);
    show("album", &m.album);
    show("album_artist", &m.album_artist);
    show("composer", &m.composer);
    show("genre", &m.genre);
    show("year", &m.year);
    show("track", &pair(m.track_no, m.track_total));
    show("disc", &pair(m.disc_no, m.disc_total));
    show("comment", &m.comment);
    Ok(())
}
