use anyhow::Result;
use owo_colors::OwoColorize;
use studydesk_core::desk::Desk;

use crate::render::short_id;

pub async fn run(name: &str, class: &str, due: &str) -> Result<()> {
    let desk = Desk::load()?;
    let mut store = desk.assignment_store()?;

    let assignment = store.add(name, class, due)?;
    store.settle().await;

    println!(
        "{}",
        format!(
            "  Added: {} ({}), due {}",
            assignment.name,
            assignment.class_name,
            assignment.due_date.format("%Y-%m-%d")
        )
        .green()
    );
    println!("{}", format!("  id: {}", short_id(&assignment.id)).dimmed());

    Ok(())
}
