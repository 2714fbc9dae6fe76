use std::fs;

use treeline_core::{Block, Document, DocumentStore, FileStore, MemoryStore};

fn sample_document() -> Document {
    let mut document = Document::new();
    let page_id = document.create_page("Inbox");
    let page = document.find_page_mut(&page_id).unwrap();

    let mut task = Block::with_text("water plants");
    task.promote_to_task();
    task.due_date = Some("2026-08-10".to_string());
    task.priority = Some(3);
    task.tags.push("home".to_string());

    let mut parent = Block::with_text("garden");
    parent.collapsed = true;
    parent.children.push(task);
    page.blocks.push(parent);

    document.create_page("Someday");
    document
}

#[test]
fn save_then_load_round_trips_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("treeline.json"));
    let document = sample_document();

    store.save(&document).unwrap();
    let reloaded = FileStore::new(store.path()).load();

    assert_eq!(reloaded, document);
}

#[test]
fn missing_slot_loads_an_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.json"));

    assert_eq!(store.load(), Document::new());
}

#[test]
fn corrupt_payload_falls_back_to_an_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("treeline.json");
    fs::write(&path, "{not json").unwrap();

    assert_eq!(FileStore::new(&path).load(), Document::new());

    // A parseable payload of the wrong shape falls back the same way.
    fs::write(&path, "[1,2,3]").unwrap();
    assert_eq!(FileStore::new(&path).load(), Document::new());
}

#[test]
fn save_creates_the_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested").join("slot.json"));

    store.save(&sample_document()).unwrap();

    assert!(store.path().is_file());
}

#[test]
fn legacy_blocks_load_with_missing_fields_defaulted() {
    let store = MemoryStore::with_payload(
        r#"{"pages":[{"id":"p1","title":"Old","blocks":[{"id":"b1","text":"kept"}]}]}"#,
    );

    let document = store.load();
    let block = &document.pages[0].blocks[0];

    assert_eq!(block.id, "b1");
    assert_eq!(block.text, "kept");
    assert!(block.children.is_empty());
    assert!(!block.collapsed);
    assert!(!block.is_task);
    assert!(!block.done);
    assert_eq!(block.due_date, None);
    assert_eq!(block.priority, None);
    assert!(block.tags.is_empty());
}

#[test]
fn legacy_defaulting_applies_recursively_to_children() {
    let store = MemoryStore::with_payload(
        r#"{"pages":[{"id":"p1","title":"Old","blocks":[
            {"id":"b1","text":"parent","children":[{"id":"b2","text":"child"}],"collapsed":true}
        ]}]}"#,
    );

    let document = store.load();
    let parent = &document.pages[0].blocks[0];
    let child = &parent.children[0];

    assert!(parent.collapsed);
    assert_eq!(child.id, "b2");
    assert!(!child.is_task);
    assert!(child.tags.is_empty());
}

#[test]
fn partially_tasked_legacy_payloads_keep_their_values() {
    let store = MemoryStore::with_payload(
        r#"{"pages":[{"id":"p1","title":"Old","blocks":[
            {"id":"b1","text":"pay rent","isTask":true,"done":true,"dueDate":"2024-02-01"}
        ]}]}"#,
    );

    let block = store.load().pages[0].blocks[0].clone();

    assert!(block.is_task);
    assert!(block.done);
    assert_eq!(block.due_date.as_deref(), Some("2024-02-01"));
    assert_eq!(block.priority, None);
}

#[test]
fn memory_store_round_trips_and_exposes_its_slot() {
    let store = MemoryStore::new();
    assert_eq!(store.payload(), None);

    let document = sample_document();
    store.save(&document).unwrap();

    assert!(store.payload().is_some());
    assert_eq!(store.load(), document);
}

#[test]
fn empty_object_payload_loads_as_empty_document() {
    let store = MemoryStore::with_payload("{}");
    assert_eq!(store.load(), Document::new());
}
