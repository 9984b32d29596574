use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use studydesk_core::desk::{ASSIGNMENTS, Desk, HABITS};
use studydesk_core::project::project_habits;
use studydesk_core::remote::Snapshot;
use tokio::sync::mpsc;

use crate::render::{render_habits, render_table};

enum Feed {
    Assignments(Snapshot),
    Habits(Snapshot),
}

/// Live view of the remote collections: subscribe to both, apply every
/// snapshot that isn't a stale echo, repaint on change. Runs until
/// Ctrl-C or until both subscriptions close.
pub async fn run() -> Result<()> {
    let desk = Desk::load()?;
    let assignments_remote = desk.require_remote(ASSIGNMENTS)?;
    let habits_remote = desk.require_remote(HABITS)?;

    let mut store = desk
        .assignment_store()?
        .with_render_sink(Box::new(|rows| {
            println!();
            println!("{}", render_table(rows));
        }));
    let mut habit_store = desk.habit_store()?;

    let (tx, mut rx) = mpsc::unbounded_channel();

    let assignments_tx = tx.clone();
    let assignments_sub = assignments_remote
        .subscribe(Box::new(move |snapshot| {
            let _ = assignments_tx.send(Feed::Assignments(snapshot));
        }))
        .await?;

    let habits_tx = tx;
    let habits_sub = habits_remote
        .subscribe(Box::new(move |snapshot| {
            let _ = habits_tx.send(Feed::Habits(snapshot));
        }))
        .await?;

    println!(
        "{}",
        "  Watching remote collections (Ctrl-C to stop)...".dimmed()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            message = rx.recv() => match message {
                Some(Feed::Assignments(snapshot)) => {
                    // Repainting happens through the render sink.
                    store.apply_snapshot(&snapshot);
                }
                Some(Feed::Habits(snapshot)) => {
                    if habit_store.apply_snapshot(&snapshot) {
                        let today = Local::now().date_naive();
                        println!();
                        println!("{}", render_habits(&project_habits(&habit_store.list(), today)));
                    }
                }
                None => break,
            }
        }
    }

    assignments_sub.cancel();
    habits_sub.cancel();
    println!("{}", "  Stopped watching.".dimmed());

    Ok(())
}
