use anyhow::Result;
use owo_colors::OwoColorize;
use studydesk_core::Priority;
use studydesk_core::desk::Desk;

use super::resolve_id;
use crate::render::Render;

pub async fn run(id: &str, priority: &str) -> Result<()> {
    let priority: Priority = priority.parse()?;

    let desk = Desk::load()?;
    let mut store = desk.assignment_store()?;

    let list = store.list();
    let assignment = resolve_id(&list, |a| &a.id, id)?.clone();

    store.set_priority(&assignment.id, priority)?;
    store.settle().await;

    println!(
        "  {} is now {} priority",
        assignment.name.green(),
        priority.render()
    );
    Ok(())
}
