//! Pure export transform: assignment list to a paginated report document.
//!
//! The transform builds a printable report representation (title, dated
//! header, column layout, fixed rows per page). Rendering the document to
//! a terminal or a file is the frontend's job; this module has no side
//! effects and never reads the clock, so the same list and date always
//! produce the same document.

use chrono::NaiveDate;

use crate::assignment::Assignment;
use crate::project::status_label;

/// Title printed at the top of the report.
pub const REPORT_TITLE: &str = "School Assignments Report";

/// Column headers, in print order.
pub const REPORT_COLUMNS: [&str; 4] = ["Class", "Assignment", "Due Date", "Status"];

/// Rows that fit on one page before a page break.
pub const ROWS_PER_PAGE: usize = 23;

/// A paginated assignment report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    /// Date the report was generated, `YYYY-MM-DD`.
    pub generated_on: String,
    pub pages: Vec<ReportPage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPage {
    /// 1-based page number.
    pub number: usize,
    pub rows: Vec<ReportRow>,
}

/// One report line. Blank source fields come through as empty strings,
/// never as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub class: String,
    pub assignment: String,
    pub due_date: String,
    pub status: String,
}

impl ReportDocument {
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }
}

/// Transform the list into a report document, in list order.
///
/// `generated_on` is passed in rather than read from the clock so the
/// transform stays a pure function.
pub fn export_document(assignments: &[Assignment], generated_on: NaiveDate) -> ReportDocument {
    let rows: Vec<ReportRow> = assignments.iter().map(report_row).collect();

    let mut pages = Vec::new();
    if rows.is_empty() {
        // An empty list still yields a one-page report with the title
        // and headers, matching what the dashboard prints.
        pages.push(ReportPage {
            number: 1,
            rows: Vec::new(),
        });
    } else {
        for (i, chunk) in rows.chunks(ROWS_PER_PAGE).enumerate() {
            pages.push(ReportPage {
                number: i + 1,
                rows: chunk.to_vec(),
            });
        }
    }

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        generated_on: generated_on.format("%Y-%m-%d").to_string(),
        pages,
    }
}

fn report_row(assignment: &Assignment) -> ReportRow {
    ReportRow {
        class: assignment.class_name.clone(),
        assignment: assignment.name.clone(),
        due_date: assignment.due_date.format("%Y-%m-%d").to_string(),
        status: status_label(assignment.completed).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 22).unwrap()
    }

    fn make_assignments(n: usize) -> Vec<Assignment> {
        (0..n)
            .map(|i| Assignment::new(&format!("Task {}", i), "IB Math", "2026-09-01").unwrap())
            .collect()
    }

    #[test]
    fn report_carries_title_and_generation_date() {
        let doc = export_document(&[], generated_on());

        assert_eq!(doc.title, "School Assignments Report");
        assert_eq!(doc.generated_on, "2026-08-22");
    }

    #[test]
    fn rows_map_fields_in_column_order() {
        let mut a = Assignment::new("Problem Set 4", "IB Math", "2026-09-01").unwrap();
        a.completed = true;
        let doc = export_document(&[a], generated_on());

        let row = &doc.pages[0].rows[0];
        assert_eq!(row.class, "IB Math");
        assert_eq!(row.assignment, "Problem Set 4");
        assert_eq!(row.due_date, "2026-09-01");
        assert_eq!(row.status, "Completed");
    }

    #[test]
    fn blank_class_becomes_empty_string() {
        let mut a = Assignment::new("Orphan task", "IB Math", "2026-09-01").unwrap();
        a.class_name = String::new();
        let doc = export_document(&[a], generated_on());

        assert_eq!(doc.pages[0].rows[0].class, "");
        assert_eq!(doc.pages[0].rows[0].assignment, "Orphan task");
    }

    // --- pagination ---

    #[test]
    fn empty_list_yields_one_empty_page() {
        let doc = export_document(&[], generated_on());

        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].number, 1);
        assert!(doc.pages[0].rows.is_empty());
    }

    #[test]
    fn a_full_page_holds_exactly_the_page_limit() {
        let doc = export_document(&make_assignments(ROWS_PER_PAGE), generated_on());

        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].rows.len(), ROWS_PER_PAGE);
    }

    #[test]
    fn one_row_past_the_limit_starts_a_second_page() {
        let doc = export_document(&make_assignments(ROWS_PER_PAGE + 1), generated_on());

        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].rows.len(), ROWS_PER_PAGE);
        assert_eq!(doc.pages[1].rows.len(), 1);
        assert_eq!(doc.pages[1].number, 2);
    }

    #[test]
    fn three_pages_keep_list_order_across_breaks() {
        let doc = export_document(&make_assignments(ROWS_PER_PAGE * 2 + 5), generated_on());

        assert_eq!(doc.pages.len(), 3);
        assert_eq!(doc.row_count(), ROWS_PER_PAGE * 2 + 5);
        assert_eq!(doc.pages[0].rows[0].assignment, "Task 0");
        assert_eq!(
            doc.pages[1].rows[0].assignment,
            format!("Task {}", ROWS_PER_PAGE)
        );
    }

    #[test]
    fn export_is_deterministic() {
        let list = make_assignments(3);
        assert_eq!(
            export_document(&list, generated_on()),
            export_document(&list, generated_on())
        );
    }
}
