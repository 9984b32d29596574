use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::Value;
use studydesk_core::desk::{ASSIGNMENTS, Desk, HABITS};
use studydesk_core::remote::{RemoteCollection, RemoteDoc, Snapshot};

use super::create_spinner;

pub async fn run() -> Result<()> {
    let desk = Desk::load()?;

    let assignment_store = desk.assignment_store()?;
    let assignment_docs = to_docs(assignment_store.list(), assignment_store.revision());
    push_collection(
        "Assignments",
        desk.require_remote(ASSIGNMENTS)?,
        assignment_docs,
    )
    .await;

    let habit_store = desk.habit_store()?;
    let habit_docs = to_docs(habit_store.list(), habit_store.revision());
    push_collection("Habits", desk.require_remote(HABITS)?, habit_docs).await;

    Ok(())
}

/// Serialize entities into remote documents, stamped with the revision
/// the push represents.
fn to_docs<T: serde::Serialize + HasId>(entities: Vec<T>, revision: u64) -> Vec<(String, Value)> {
    entities
        .into_iter()
        .filter_map(|entity| {
            let id = entity.id().to_string();
            let doc = RemoteDoc {
                entity,
                revision: Some(revision),
            };
            serde_json::to_value(doc).ok().map(|value| (id, value))
        })
        .collect()
}

trait HasId {
    fn id(&self) -> &str;
}

impl HasId for studydesk_core::Assignment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for studydesk_core::Habit {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Everything local is upserted; remote documents with no local
/// counterpart are removed. A push makes the collection equal the desk.
fn removals_for(local: &[(String, Value)], remote: &Snapshot) -> Vec<String> {
    let local_ids: HashSet<&str> = local.iter().map(|(id, _)| id.as_str()).collect();

    remote
        .docs
        .iter()
        .filter_map(|doc| doc.get("id").and_then(|v| v.as_str()))
        .filter(|id| !local_ids.contains(id))
        .map(str::to_string)
        .collect()
}

async fn push_collection(
    label: &str,
    remote: Arc<dyn RemoteCollection>,
    local: Vec<(String, Value)>,
) {
    let spinner = create_spinner(format!("Pushing {}...", label.to_lowercase()));

    let removals = match remote.fetch().await {
        Ok(snapshot) => removals_for(&local, &snapshot),
        Err(e) => {
            spinner.finish_and_clear();
            println!("  {}: {}", label, e.to_string().red());
            return;
        }
    };

    let mut pushed = 0;
    let mut removed = 0;
    let mut errors: Vec<String> = Vec::new();

    for (id, doc) in local {
        match remote.upsert(&id, doc).await {
            Ok(()) => pushed += 1,
            Err(e) => errors.push(e.to_string()),
        }
    }

    for id in removals {
        match remote.remove(&id).await {
            Ok(()) => removed += 1,
            Err(e) => errors.push(e.to_string()),
        }
    }

    spinner.finish_and_clear();

    for error in &errors {
        println!("  {}", error.red());
    }

    let summary = format!("  {}: pushed {}, removed {}", label, pushed, removed);
    if errors.is_empty() {
        println!("{}", summary.green());
    } else {
        println!("{} {}", summary, format!("({} failed)", errors.len()).red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use studydesk_core::Assignment;

    #[test]
    fn push_removes_remote_documents_missing_locally() {
        let local = to_docs(
            vec![Assignment::new("Essay", "History", "2026-09-10").unwrap()],
            3,
        );
        let remote = Snapshot::new(vec![
            json!({"id": local[0].0, "name": "Essay"}),
            json!({"id": "gone-1", "name": "Deleted on this desk"}),
            json!({"id": "gone-2"}),
        ]);

        let mut removals = removals_for(&local, &remote);
        removals.sort();
        assert_eq!(removals, vec!["gone-1", "gone-2"]);
    }

    #[test]
    fn docs_carry_the_revision_stamp() {
        let docs = to_docs(
            vec![Assignment::new("Essay", "History", "2026-09-10").unwrap()],
            5,
        );

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].1["revision"], 5);
        assert_eq!(docs[0].1["className"], "History");
    }

    #[test]
    fn nothing_to_remove_when_remote_matches_local() {
        let local = to_docs(
            vec![Assignment::new("Essay", "History", "2026-09-10").unwrap()],
            1,
        );
        let remote = Snapshot::new(vec![json!({"id": local[0].0})]);

        assert!(removals_for(&local, &remote).is_empty());
    }
}
