//! Pure projection of desk state into presentational rows.
//!
//! The projector never touches storage or the network: it maps a list to
//! the rows a frontend should paint, and nothing else. Whatever renders
//! the rows (terminal table, web page) decides colors and layout.

use chrono::NaiveDate;

use crate::assignment::{Assignment, Priority};
use crate::habit::Habit;

/// Actions a frontend can offer on an assignment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    MarkComplete,
    ChangePriority,
    Delete,
}

/// One assignment, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub class_name: String,
    pub name: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: String,
    pub actions: Vec<RowAction>,
}

/// One habit, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitRow {
    pub id: String,
    pub name: String,
    pub streak: u32,
    pub checked_today: bool,
}

/// Human-facing completion label.
pub fn status_label(completed: bool) -> &'static str {
    if completed { "Completed" } else { "Pending" }
}

/// Project the assignment list into rows, preserving the given order.
pub fn project(assignments: &[Assignment]) -> Vec<Row> {
    assignments
        .iter()
        .map(|a| Row {
            id: a.id.clone(),
            class_name: a.class_name.clone(),
            name: a.name.clone(),
            due_date: a.due_date.format("%Y-%m-%d").to_string(),
            priority: a.priority,
            status: status_label(a.completed).to_string(),
            actions: actions_for(a),
        })
        .collect()
}

/// Project the habit list into rows, preserving the given order.
pub fn project_habits(habits: &[Habit], today: NaiveDate) -> Vec<HabitRow> {
    habits
        .iter()
        .map(|h| HabitRow {
            id: h.id.clone(),
            name: h.name.clone(),
            streak: h.streak(today),
            checked_today: h.checked_on(today),
        })
        .collect()
}

fn actions_for(assignment: &Assignment) -> Vec<RowAction> {
    let mut actions = Vec::with_capacity(3);
    if !assignment.completed {
        actions.push(RowAction::MarkComplete);
    }
    actions.push(RowAction::ChangePriority);
    actions.push(RowAction::Delete);
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_assignment(name: &str, due: &str, completed: bool) -> Assignment {
        let mut a = Assignment::new(name, "IB Math", due).unwrap();
        a.completed = completed;
        a
    }

    #[test]
    fn rows_carry_every_display_field() {
        let a = make_assignment("Problem Set 4", "2026-09-01", false);
        let rows = project(std::slice::from_ref(&a));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, a.id);
        assert_eq!(rows[0].class_name, "IB Math");
        assert_eq!(rows[0].name, "Problem Set 4");
        assert_eq!(rows[0].due_date, "2026-09-01");
        assert_eq!(rows[0].priority, Priority::Medium);
        assert_eq!(rows[0].status, "Pending");
    }

    #[test]
    fn completed_rows_lose_the_mark_complete_action() {
        let pending = make_assignment("Essay", "2026-09-01", false);
        let done = make_assignment("Reading", "2026-09-02", true);
        let rows = project(&[pending, done]);

        assert!(rows[0].actions.contains(&RowAction::MarkComplete));
        assert!(!rows[1].actions.contains(&RowAction::MarkComplete));
        assert_eq!(rows[1].status, "Completed");
        assert!(rows[1].actions.contains(&RowAction::Delete));
    }

    #[test]
    fn projection_preserves_list_order() {
        let list = vec![
            make_assignment("Later", "2026-12-01", false),
            make_assignment("Sooner", "2026-09-01", false),
        ];
        let rows = project(&list);

        assert_eq!(rows[0].name, "Later");
        assert_eq!(rows[1].name, "Sooner");
    }

    #[test]
    fn projection_is_deterministic() {
        let list = vec![make_assignment("Essay", "2026-09-01", false)];
        assert_eq!(project(&list), project(&list));
    }

    #[test]
    fn empty_list_projects_to_zero_rows() {
        assert!(project(&[]).is_empty());
    }
}
