use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use super::util::{display_text, open_tag};

#[derive(Serialize)]
struct ItemOut {
    key: String,
    kind: String,
    read_only: bool,
    size: usize,
    text: Option<String>,
}

pub fn exec(path: PathBuf, mmap: bool, json: bool) -> Result<()> {
    let tag = open_tag(&path, mmap)?;
    let mut iter = tag.items();
    let items: Vec<ItemOut> = iter
        .by_ref()
        .map(|it| ItemOut {
            key: it.key_str(),
            kind: it.kind().to_string(),
            read_only: it.read_only(),
            size: it.value.len(),
            text: it.text().map(str::to_owned),
        })
        .collect();

    if json {
        let s = serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string());
        println!("{s}");
        return Ok(());
    }

    if !tag.is_valid() {
        println!("NO VALID APE TAG in {}", path.display());
        return Ok(());
    }
    if items.is_empty() {
        println!("(no items)");
        return Ok(());
    }
    for it in &items {
        let ro = if it.read_only { " ro" } else { "" };
        match &it.text {
            Some(t) => println!("{:<20} [{}{}] {}", it.key, it.kind, ro, display_text(t.as_bytes())),
            None => println!("{:<20} [{}{}] ({} B)", it.key, it.kind, ro, it.size),
        }
    }
    if let Some(stop) = iter.stop_reason() {
        log::debug!("dump: scan stopped: {:?}", stop);
    }
    Ok(())
}
