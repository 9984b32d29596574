//! The assignment store: the authoritative in-memory list for a session.
//!
//! Every mutation flows through here and fans out in a fixed order:
//! write the full list through to durable storage, project the new list
//! to the render sink, then mirror the changed document to the remote
//! collection in the background. Adapter failures are logged and never
//! roll back a mutation that already happened in memory.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::assignment::{Assignment, Priority};
use crate::durable::DurableStore;
use crate::error::{DeskError, DeskResult};
use crate::project::{Row, project};
use crate::remote::{RemoteCollection, RemoteDoc, Snapshot};

/// Durable layout: one JSON object holding the whole list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredAssignments {
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

/// Render sink invoked with the projected rows after every list change.
pub type RenderSink = Box<dyn Fn(&[Row]) + Send>;

enum Change {
    Upsert(Assignment),
    Remove(String),
}

pub struct AssignmentStore {
    assignments: Vec<Assignment>,
    /// Bumped on every local mutation and stamped into mirrored documents.
    /// Snapshots carrying a lower stamp are stale echoes of our own writes.
    revision: u64,
    fresh: bool,
    durable: Box<dyn DurableStore>,
    remote: Option<Arc<dyn RemoteCollection>>,
    render: Option<RenderSink>,
    mirror_chain: Option<JoinHandle<()>>,
}

impl AssignmentStore {
    /// Open the store, loading any previously saved list.
    ///
    /// Invalid persisted records are dropped with a warning; a corrupt
    /// blob (unparseable JSON) is an error. No saved state at all is the
    /// normal first run and leaves the store empty and fresh.
    pub fn open(durable: Box<dyn DurableStore>) -> DeskResult<AssignmentStore> {
        let blob = durable.load()?;

        let mut store = AssignmentStore {
            assignments: Vec::new(),
            revision: 0,
            fresh: blob.is_none(),
            durable,
            remote: None,
            render: None,
            mirror_chain: None,
        };

        if let Some(blob) = blob {
            let state: StoredAssignments = serde_json::from_str(&blob)
                .map_err(|e| DeskError::Serialization(e.to_string()))?;
            store.replace_all(state.assignments);
        }

        Ok(store)
    }

    /// Attach the remote collection mutations get mirrored to.
    ///
    /// Mirror writes run as background tasks, so a store with a remote
    /// attached must live inside a Tokio runtime.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteCollection>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Attach the sink that repaints the list after every change.
    pub fn with_render_sink(mut self, render: RenderSink) -> Self {
        self.render = Some(render);
        self
    }

    /// True when no saved state existed at open time.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Snapshot of the list in insertion order. Cloned, so callers can
    /// never mutate the store through it.
    pub fn list(&self) -> Vec<Assignment> {
        self.assignments.clone()
    }

    /// The list ordered by due date ascending. Ties keep insertion order.
    pub fn by_due_date(&self) -> Vec<Assignment> {
        let mut sorted = self.assignments.clone();
        sorted.sort_by_key(|a| a.due_date);
        sorted
    }

    /// Validate raw input and append a new assignment.
    pub fn add(&mut self, name: &str, class_name: &str, due_date: &str) -> DeskResult<Assignment> {
        let assignment = Assignment::new(name, class_name, due_date)?;
        self.assignments.push(assignment.clone());
        self.commit(Change::Upsert(assignment.clone()));
        Ok(assignment)
    }

    /// Change the priority of an existing assignment.
    pub fn set_priority(&mut self, id: &str, priority: Priority) -> DeskResult<()> {
        let assignment = self.find_mut(id)?;
        assignment.priority = priority;
        let changed = assignment.clone();
        self.commit(Change::Upsert(changed));
        Ok(())
    }

    /// Mark an assignment as completed.
    pub fn complete(&mut self, id: &str) -> DeskResult<()> {
        let assignment = self.find_mut(id)?;
        assignment.completed = true;
        let changed = assignment.clone();
        self.commit(Change::Upsert(changed));
        Ok(())
    }

    /// Remove an assignment from the list.
    pub fn delete(&mut self, id: &str) -> DeskResult<()> {
        let index = self
            .assignments
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| DeskError::NotFound(format!("No assignment with id '{}'", id)))?;
        self.assignments.remove(index);
        self.commit(Change::Remove(id.to_string()));
        Ok(())
    }

    /// Replace the whole list with an externally produced one.
    ///
    /// Items are validated one by one and invalid ones are dropped with a
    /// warning rather than rejecting the rest. Triggers a repaint but no
    /// durable write and no mirroring: echoing a snapshot straight back
    /// to the place it came from would loop.
    pub fn replace_all(&mut self, incoming: Vec<Assignment>) {
        let mut accepted: Vec<Assignment> = Vec::with_capacity(incoming.len());
        for assignment in incoming {
            if let Err(e) = assignment.validate() {
                warn!(id = %assignment.id, error = %e, "Dropping invalid assignment");
                continue;
            }
            if accepted.iter().any(|a| a.id == assignment.id) {
                warn!(id = %assignment.id, "Dropping assignment with duplicate id");
                continue;
            }
            accepted.push(assignment);
        }

        self.assignments = accepted;
        self.rerender();
    }

    /// Apply a remote snapshot unless it is a stale echo of our own writes.
    /// Returns whether the snapshot was applied.
    ///
    /// A snapshot stamped below the current revision was taken before our
    /// latest mutation reached the remote and would resurrect old state.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        let stamp = snapshot.revision();
        if stamp < self.revision {
            debug!(
                snapshot_revision = stamp,
                store_revision = self.revision,
                "Discarding stale remote snapshot"
            );
            return false;
        }

        self.revision = stamp;
        self.replace_all(snapshot.decode());
        true
    }

    /// Populate a fresh desk with a couple of example assignments so the
    /// first `list` isn't an empty screen. Seeds are not mirrored and do
    /// not bump the revision, so any real remote data replaces them.
    pub fn seed_examples(&mut self, today: NaiveDate) {
        let math = Assignment {
            id: Uuid::new_v4().to_string(),
            name: "Math Problem Set".to_string(),
            class_name: "IB Math".to_string(),
            due_date: today + Duration::days(3),
            priority: Priority::High,
            completed: false,
        };

        let essay = Assignment {
            id: Uuid::new_v4().to_string(),
            name: "History Essay".to_string(),
            class_name: "IB History".to_string(),
            due_date: today + Duration::days(7),
            priority: Priority::Medium,
            completed: false,
        };

        self.assignments = vec![math, essay];
        self.persist();
        self.rerender();
    }

    /// Wait for outstanding mirror writes to land.
    ///
    /// Mutations never wait on the mirror; a short-lived process that
    /// wants its writes delivered before exiting does.
    pub async fn settle(&mut self) {
        if let Some(task) = self.mirror_chain.take() {
            let _ = task.await;
        }
    }

    fn find_mut(&mut self, id: &str) -> DeskResult<&mut Assignment> {
        self.assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DeskError::NotFound(format!("No assignment with id '{}'", id)))
    }

    fn commit(&mut self, change: Change) {
        self.revision += 1;
        self.persist();
        self.rerender();
        self.mirror(change);
    }

    /// Serialize the list and write it durably, surfacing failures.
    ///
    /// Mutations go through the logging path instead; an explicit save
    /// (a `pull` keeping remote state for offline use) wants the error.
    pub fn save(&self) -> DeskResult<()> {
        let state = StoredAssignments {
            assignments: self.assignments.clone(),
        };
        let blob = serde_json::to_string_pretty(&state)
            .map_err(|e| DeskError::Serialization(e.to_string()))?;
        self.durable.save(&blob)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to write assignments to durable storage");
        }
    }

    fn rerender(&self) {
        if let Some(render) = &self.render {
            let rows = project(&self.assignments);
            render(&rows);
        }
    }

    /// Mirror one change to the remote collection in the background.
    ///
    /// Each task first awaits the previous one, so writes reach the
    /// remote in mutation order even though callers never wait.
    fn mirror(&mut self, change: Change) {
        let Some(remote) = self.remote.clone() else {
            return;
        };
        let revision = self.revision;
        let previous = self.mirror_chain.take();

        let task = tokio::spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }

            let outcome = match change {
                Change::Upsert(assignment) => {
                    let id = assignment.id.clone();
                    match serde_json::to_value(RemoteDoc {
                        entity: assignment,
                        revision: Some(revision),
                    }) {
                        Ok(doc) => remote.upsert(&id, doc).await,
                        Err(e) => Err(DeskError::Serialization(e.to_string())),
                    }
                }
                Change::Remove(id) => remote.remove(&id).await,
            };

            if let Err(e) = outcome {
                warn!(error = %e, "Failed to mirror change to the remote collection");
            }
        });

        self.mirror_chain = Some(task);
    }
}
