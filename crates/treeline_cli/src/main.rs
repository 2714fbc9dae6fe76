//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise one create/edit/persist cycle against `treeline_core`.
//! - Keep output deterministic for quick local sanity checks.

use treeline_core::{DocumentStore, MemoryStore, StoreError, Workspace};

fn main() -> Result<(), StoreError> {
    println!("treeline_core version={}", treeline_core::core_version());

    let mut workspace = Workspace::open(MemoryStore::new());
    workspace.create_page("Scratch")?;

    let seeded_block = workspace
        .current_page()
        .and_then(|page| page.blocks.first())
        .map(|block| block.id.clone());

    if let Some(block_id) = seeded_block {
        // Literal date token keeps the probe output clock-independent.
        workspace.edit_block_text(&block_id, "/todo 2030-01-02 !p3 #smoke ship the probe")?;
        if let Some(block) = workspace
            .current_page()
            .and_then(|page| page.blocks.first())
        {
            println!(
                "block text=`{}` task={} due={} priority={} tags={}",
                block.text,
                block.is_task,
                block.due_date.as_deref().unwrap_or("-"),
                block
                    .priority
                    .map(|level| level.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                block.tags.join(",")
            );
        }
    }

    let reloaded = workspace.store().load();
    println!(
        "pages={} blocks_on_first_page={}",
        reloaded.pages.len(),
        reloaded.pages.first().map(|page| page.blocks.len()).unwrap_or(0)
    );
    Ok(())
}
