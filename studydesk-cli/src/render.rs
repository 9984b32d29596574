//! TUI rendering for studydesk types.
//!
//! Colored terminal output for projected rows and report documents,
//! using owo_colors. Everything here is string-in, string-out; the
//! commands decide what to print.

use owo_colors::OwoColorize;
use studydesk_core::Priority;
use studydesk_core::export::{REPORT_COLUMNS, ReportDocument};
use studydesk_core::project::{HabitRow, Row};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Priority {
    fn render(&self) -> String {
        match self {
            Priority::Low => "low".dimmed().to_string(),
            Priority::Medium => "medium".yellow().to_string(),
            Priority::High => "high".red().to_string(),
        }
    }
}

/// Ids are UUIDs; eight characters are plenty to identify and retype one.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", clipped)
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

// Table column widths (id, class, name, due date, priority, status).
const TABLE_WIDTHS: [usize; 6] = [10, 16, 32, 12, 8, 9];

/// Render the assignment rows as an aligned table.
pub fn render_table(rows: &[Row]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);

    let header = [
        pad("ID", TABLE_WIDTHS[0]),
        pad("Class", TABLE_WIDTHS[1]),
        pad("Assignment", TABLE_WIDTHS[2]),
        pad("Due Date", TABLE_WIDTHS[3]),
        pad("Priority", TABLE_WIDTHS[4]),
        pad("Status", TABLE_WIDTHS[5]),
    ]
    .join("  ");
    lines.push(format!("  {}", header.dimmed()));

    for row in rows {
        let priority = pad(&row.priority.to_string(), TABLE_WIDTHS[4]);
        let priority = if row.status == "Completed" {
            priority.dimmed().to_string()
        } else {
            match row.priority {
                Priority::Low => priority.dimmed().to_string(),
                Priority::Medium => priority.yellow().to_string(),
                Priority::High => priority.red().to_string(),
            }
        };

        let status = pad(&row.status, TABLE_WIDTHS[5]);
        let status = if row.status == "Completed" {
            status.green().to_string()
        } else {
            status.to_string()
        };

        let line = format!(
            "  {}  {}  {}  {}  {}  {}",
            pad(&short_id(&row.id), TABLE_WIDTHS[0]).dimmed(),
            pad(&truncate(&row.class_name, TABLE_WIDTHS[1]), TABLE_WIDTHS[1]),
            pad(&truncate(&row.name, TABLE_WIDTHS[2]), TABLE_WIDTHS[2]),
            pad(&row.due_date, TABLE_WIDTHS[3]),
            priority,
            status,
        );
        lines.push(line);
    }

    lines.join("\n")
}

/// Render the habit rows: check mark, name, streak.
pub fn render_habits(rows: &[HabitRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len());

    for row in rows {
        let mark = if row.checked_today {
            "✓".green().to_string()
        } else {
            "·".dimmed().to_string()
        };
        let streak = match row.streak {
            0 => "no streak".dimmed().to_string(),
            1 => "1 day".to_string(),
            n => format!("{} days", n),
        };
        lines.push(format!(
            "  {} {}  {}  {}",
            mark,
            pad(&short_id(&row.id), 10).dimmed(),
            pad(&truncate(&row.name, 32), 32),
            streak,
        ));
    }

    lines.join("\n")
}

// Report column widths follow the printed layout: class, assignment,
// due date, status.
const REPORT_WIDTHS: [usize; 4] = [20, 40, 12, 10];

/// Render a report document as printable plain text, one block per page.
pub fn render_report(doc: &ReportDocument) -> String {
    let total_width = REPORT_WIDTHS.iter().sum::<usize>() + 6;
    let mut lines = Vec::new();

    for page in &doc.pages {
        if page.number == 1 {
            lines.push(center(&doc.title, total_width));
            lines.push(center(&format!("Generated on: {}", doc.generated_on), total_width));
        } else {
            lines.push(String::new());
            lines.push(center(&format!("{} (page {})", doc.title, page.number), total_width));
        }
        lines.push(String::new());

        let header: Vec<String> = REPORT_COLUMNS
            .iter()
            .zip(REPORT_WIDTHS)
            .map(|(column, width)| pad(column, width))
            .collect();
        lines.push(header.join("  "));
        lines.push("-".repeat(total_width));

        for row in &page.rows {
            lines.push(
                [
                    pad(&truncate(&row.class, REPORT_WIDTHS[0]), REPORT_WIDTHS[0]),
                    pad(&truncate(&row.assignment, REPORT_WIDTHS[1]), REPORT_WIDTHS[1]),
                    pad(&row.due_date, REPORT_WIDTHS[2]),
                    pad(&row.status, REPORT_WIDTHS[3]),
                ]
                .join("  "),
            );
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}
