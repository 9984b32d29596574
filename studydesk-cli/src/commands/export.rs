use std::path::Path;

use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use studydesk_core::desk::Desk;
use studydesk_core::export::export_document;

use crate::render::render_report;

pub fn run(out: Option<&Path>) -> Result<()> {
    let desk = Desk::load()?;
    let store = desk.assignment_store()?;

    // Reports read best in deadline order, like the dashboard shows them.
    let doc = export_document(&store.by_due_date(), Local::now().date_naive());
    let rendered = render_report(&doc);

    match out {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!(
                "{}",
                format!(
                    "  Wrote {} ({} page{}, {} assignment{})",
                    path.display(),
                    doc.pages.len(),
                    if doc.pages.len() == 1 { "" } else { "s" },
                    doc.row_count(),
                    if doc.row_count() == 1 { "" } else { "s" },
                )
                .green()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
