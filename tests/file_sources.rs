mod common;

use std::fs;

use anyhow::Result;

use apetag::{FileSource, ItemLookup, MmapSource, TagStore};

use common::{unique_path, TestTag};

#[test]
fn file_and_mmap_sources_agree() -> Result<()> {
    let path = unique_path("sources");
    let audio = vec![0xA5u8; 4096];
    let bytes = TestTag::new()
        .prefix(&audio)
        .text("Artist", "Test")
        .raw("Cover Art (Front)", &[9u8; 100], 0x2)
        .build();
    fs::write(&path, &bytes)?;

    let by_file = TagStore::load(FileSource::open(&path)?);
    let by_mmap = TagStore::load(MmapSource::open(&path)?);

    for tag in [&by_file, &by_mmap] {
        assert!(tag.is_valid());
        assert_eq!(tag.item_block_offset(), audio.len() as u64);
        assert_eq!(tag.find_item("Artist"), ItemLookup::Text("Test".into()));
        assert!(!tag.find_item("Cover Art (Front)").encoding_supported());
    }
    assert_eq!(by_file.item_block(), by_mmap.item_block());

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn empty_file_has_no_tag() -> Result<()> {
    let path = unique_path("empty");
    fs::write(&path, b"")?;

    assert!(!TagStore::load(FileSource::open(&path)?).is_valid());
    assert!(!TagStore::load(MmapSource::open(&path)?).is_valid());

    fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn missing_file_is_an_open_error() {
    let path = unique_path("missing");
    assert!(FileSource::open(&path).is_err());
    assert!(MmapSource::open(&path).is_err());
}
