use anyhow::Result;
use owo_colors::OwoColorize;
use studydesk_core::desk::{ASSIGNMENTS, Desk, HABITS};

use super::create_spinner;

pub async fn run() -> Result<()> {
    let desk = Desk::load()?;
    let assignments_remote = desk.require_remote(ASSIGNMENTS)?;
    let habits_remote = desk.require_remote(HABITS)?;

    let spinner = create_spinner("Fetching remote collections...".to_string());
    let assignment_snapshot = assignments_remote.fetch().await;
    let habit_snapshot = habits_remote.fetch().await;
    spinner.finish_and_clear();

    let mut pulled_anything = false;

    match assignment_snapshot {
        Ok(snapshot) => {
            // A just-opened store has seen no local writes this session,
            // so the snapshot always applies; keep it for offline use.
            let mut store = desk.assignment_store()?;
            store.apply_snapshot(&snapshot);
            store.save()?;
            pulled_anything = true;
            println!("  Assignments: {}", store.len());
        }
        Err(e) => println!("  Assignments: {}", e.to_string().red()),
    }

    match habit_snapshot {
        Ok(snapshot) => {
            let mut store = desk.habit_store()?;
            store.apply_snapshot(&snapshot);
            store.save()?;
            pulled_anything = true;
            println!("  Habits: {}", store.len());
        }
        Err(e) => println!("  Habits: {}", e.to_string().red()),
    }

    if pulled_anything {
        println!(
            "{}",
            format!("\n  Desk updated at {}", desk.display_path().display()).green()
        );
    }

    Ok(())
}
