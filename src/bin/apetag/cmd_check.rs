use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use super::util::open_tag;

pub fn exec(path: PathBuf, mmap: bool, json: bool) -> Result<()> {
    let tag = open_tag(&path, mmap)?;
    let items = tag.items().count();
    let reason = tag.load_error().map(|e| e.to_string());

    if json {
        let v = json!({
            "path": path.display().to_string(),
            "valid": tag.is_valid(),
            "error": reason,
            "error_kind": tag.load_error().map(|e| format!("{:?}", e.kind())),
            "version": tag.version(),
            "block_size": tag.block_size(),
            "block_offset": tag.item_block_offset(),
            "item_count": tag.item_count(),
            "items_parsed": items,
            "has_header": tag.footer().map(|f| f.has_header()),
            "read_only": tag.footer().map(|f| f.read_only()),
        });
        let s = serde_json::to_string_pretty(&v).unwrap_or_else(|_| "{}".to_string());
        println!("{s}");
        return Ok(());
    }

    if !tag.is_valid() {
        println!("NO VALID APE TAG in {}", path.display());
        if let Some(r) = reason {
            println!("  reason      = {}", r);
        }
        return Ok(());
    }

    println!("APE tag in {}", path.display());
    println!("  version     = {}", tag.version().unwrap_or_default());
    println!("  block_size  = {} B", tag.block_size());
    println!("  block_off   = {}", tag.item_block_offset());
    println!("  item_count  = {} (parsed {})", tag.item_count(), items);
    if let Some(f) = tag.footer() {
        println!("  has_header  = {}", f.has_header());
        println!("  read_only   = {}", f.read_only());
    }
    Ok(())
}
