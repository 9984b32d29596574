use anyhow::Result;
use owo_colors::OwoColorize;
use studydesk_core::desk::Desk;

use super::resolve_id;

pub async fn run(id: &str) -> Result<()> {
    let desk = Desk::load()?;
    let mut store = desk.assignment_store()?;

    let list = store.list();
    let assignment = resolve_id(&list, |a| &a.id, id)?.clone();

    store.complete(&assignment.id)?;
    store.settle().await;

    println!("{}", format!("  Completed: {}", assignment.name).green());
    Ok(())
}
