//! Document storage for the folder provider.
//!
//! Each document is one JSON file:
//!   {root}/{user}/{collection}/{id}.json

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The one collection whose listing order is part of the protocol.
const ASSIGNMENTS: &str = "assignments";

pub fn list(root: &Path, user: &str, collection: &str) -> Result<Vec<Value>> {
    let dir = collection_dir(root, user, collection);

    // A collection nobody has written to is empty, not an error.
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&dir)
        .with_context(|| format!("Failed to read collection at {}", dir.display()))?;

    let mut docs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document at {}", path.display()))?;

        match serde_json::from_str::<Value>(&contents) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                // Skip files other programs left behind rather than
                // failing the whole listing.
                eprintln!("Skipping unreadable document {}: {}", path.display(), e);
            }
        }
    }

    sort_docs(&mut docs, collection);
    Ok(docs)
}

pub fn upsert(root: &Path, user: &str, collection: &str, id: &str, doc: &Value) -> Result<()> {
    let path = doc_path(root, user, collection, id);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create collection at {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(doc).context("Failed to serialize document")?;

    // Write to a temp file and rename so a concurrent list never sees a
    // half-written document.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents)
        .with_context(|| format!("Failed to write document to {}", tmp.display()))?;
    std::fs::rename(&tmp, &path)
        .with_context(|| format!("Failed to move document into {}", path.display()))?;

    Ok(())
}

/// Removing a document that was never written succeeds.
pub fn remove(root: &Path, user: &str, collection: &str, id: &str) -> Result<()> {
    let path = doc_path(root, user, collection, id);

    if !path.exists() {
        return Ok(());
    }

    std::fs::remove_file(&path)
        .with_context(|| format!("Failed to remove document at {}", path.display()))?;

    Ok(())
}

fn collection_dir(root: &Path, user: &str, collection: &str) -> PathBuf {
    root.join(sanitize(user)).join(sanitize(collection))
}

fn doc_path(root: &Path, user: &str, collection: &str, id: &str) -> PathBuf {
    collection_dir(root, user, collection).join(format!("{}.json", sanitize(id)))
}

fn sanitize(part: &str) -> String {
    part.replace(['/', '\\', ':'], "_")
}

/// Listings are deterministic: assignments come back in due date order
/// with undated documents last, everything else by id.
fn sort_docs(docs: &mut [Value], collection: &str) {
    if collection == ASSIGNMENTS {
        docs.sort_by_cached_key(|doc| {
            let due = due_date(doc);
            (due.is_none(), due, doc_id(doc))
        });
    } else {
        docs.sort_by_cached_key(doc_id);
    }
}

fn due_date(doc: &Value) -> Option<NaiveDate> {
    let raw = doc.get("dueDate")?.as_str()?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn doc_id(doc: &Value) -> String {
    doc.get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
