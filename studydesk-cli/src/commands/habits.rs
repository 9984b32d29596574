use anyhow::Result;
use chrono::Local;
use clap::Subcommand;
use owo_colors::OwoColorize;
use studydesk_core::desk::Desk;
use studydesk_core::project::project_habits;

use super::resolve_id;
use crate::render::render_habits;

#[derive(Subcommand)]
pub enum HabitsCommand {
    /// Show your habits and streaks (the default)
    List,
    /// Start tracking a new habit
    Add { name: String },
    /// Check a habit off for today
    Check {
        /// Habit id (a unique prefix is enough)
        id: String,
    },
}

pub async fn run(command: Option<HabitsCommand>) -> Result<()> {
    match command.unwrap_or(HabitsCommand::List) {
        HabitsCommand::List => list(),
        HabitsCommand::Add { name } => add(&name).await,
        HabitsCommand::Check { id } => check(&id).await,
    }
}

fn list() -> Result<()> {
    let desk = Desk::load()?;
    let store = desk.habit_store()?;

    if store.is_empty() {
        println!(
            "{}",
            "  No habits yet. Start one with: studydesk habits add <name>".dimmed()
        );
        return Ok(());
    }

    let today = Local::now().date_naive();
    println!("{}", render_habits(&project_habits(&store.list(), today)));
    Ok(())
}

async fn add(name: &str) -> Result<()> {
    let desk = Desk::load()?;
    let mut store = desk.habit_store()?;

    let habit = store.add(name)?;
    store.settle().await;

    println!("{}", format!("  Tracking: {}", habit.name).green());
    Ok(())
}

async fn check(id: &str) -> Result<()> {
    let desk = Desk::load()?;
    let mut store = desk.habit_store()?;

    let list = store.list();
    let habit = resolve_id(&list, |h| &h.id, id)?.clone();

    let today = Local::now().date_naive();
    if store.check_in(&habit.id, today)? {
        store.settle().await;
        let streak = store
            .list()
            .iter()
            .find(|h| h.id == habit.id)
            .map(|h| h.streak(today))
            .unwrap_or(1);
        println!(
            "{}",
            format!("  Checked in: {} ({} day streak)", habit.name, streak).green()
        );
    } else {
        println!(
            "{}",
            format!("  Already checked in today: {}", habit.name).dimmed()
        );
    }

    Ok(())
}
