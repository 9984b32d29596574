use anyhow::Result;
use owo_colors::OwoColorize;
use studydesk_core::desk::Desk;
use studydesk_core::project::project;

use super::seed_if_fresh;
use crate::render::render_table;

pub fn run(by_due: bool) -> Result<()> {
    let desk = Desk::load()?;
    let mut store = desk.assignment_store()?;
    seed_if_fresh(&mut store);

    let assignments = if by_due {
        store.by_due_date()
    } else {
        store.list()
    };

    if assignments.is_empty() {
        println!(
            "{}",
            "  No assignments. Add one with:\n  studydesk add <name> --class <class> --due <YYYY-MM-DD>"
                .dimmed()
        );
        return Ok(());
    }

    println!("{}", render_table(&project(&assignments)));
    Ok(())
}
