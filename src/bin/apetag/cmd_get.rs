use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use apetag::ItemLookup;

use super::util::{hex_dump, open_tag};

pub fn exec(path: PathBuf, key: String, mmap: bool, out: Option<PathBuf>) -> Result<()> {
    let tag = open_tag(&path, mmap)?;
    if !tag.is_valid() {
        println!("NO VALID APE TAG in {}", path.display());
        return Ok(());
    }

    let cursor = tag.cursor(Some(key.as_str()));
    let Some(raw) = cursor.raw_value() else {
        println!("NOT FOUND '{}'", key);
        return Ok(());
    };

    if let Some(out_path) = out {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut f = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&out_path)?;
        f.write_all(raw)?;
        f.sync_all()?;
        println!(
            "FOUND '{}': {} B -> wrote to {}",
            key,
            raw.len(),
            out_path.display()
        );
        return Ok(());
    }

    match cursor.value() {
        ItemLookup::Text(s) => {
            println!("FOUND '{}': {} B", key, raw.len());
            println!("text: {}", s);
        }
        ItemLookup::Undecoded { kind } => {
            println!("FOUND '{}': {} B, UNSUPPORTED encoding ({})", key, raw.len(), kind);
            println!("hex:  {}", hex_dump(&raw[..raw.len().min(64)]));
        }
        ItemLookup::NotFound => println!("NOT FOUND '{}'", key),
    }
    Ok(())
}
