//! Remote side of the desk: per-user document collections.
//!
//! A remote collection mirrors the local lists as JSON documents, one
//! document per assignment or habit. The store pushes individual writes
//! through [`RemoteCollection`] and takes whole-collection snapshots
//! back through a subscription. The only shipped implementation talks
//! to a provider binary; tests substitute their own.

pub mod protocol;
pub mod provider;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::DeskResult;
use crate::remote::protocol::{ListDocs, RemoveDoc, UpsertDoc};
use crate::remote::provider::Provider;

/// Wire wrapper adding the sync revision stamp to an entity document.
///
/// The stamp is the store revision that produced the write. Snapshots
/// echoing our own documents carry it back, which is how the store
/// recognizes stale echoes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDoc<T> {
    #[serde(flatten)]
    pub entity: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

/// A full replacement view of one collection, as delivered on each change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub docs: Vec<serde_json::Value>,
}

impl Snapshot {
    pub fn new(docs: Vec<serde_json::Value>) -> Self {
        Snapshot { docs }
    }

    /// Highest revision stamp carried by any document.
    ///
    /// Documents written by other frontends may carry no stamp at all;
    /// an unstamped (or empty) snapshot ranks as revision 0.
    pub fn revision(&self) -> u64 {
        self.docs
            .iter()
            .filter_map(|doc| doc.get("revision").and_then(|v| v.as_u64()))
            .max()
            .unwrap_or(0)
    }

    /// Decode documents into entities, dropping any that fail to parse.
    pub fn decode<T: DeserializeOwned>(&self) -> Vec<T> {
        self.docs
            .iter()
            .filter_map(|doc| match serde_json::from_value::<RemoteDoc<T>>(doc.clone()) {
                Ok(wrapped) => Some(wrapped.entity),
                Err(e) => {
                    warn!(error = %e, "Dropping undecodable document from snapshot");
                    None
                }
            })
            .collect()
    }
}

/// Callback invoked with each snapshot of the collection.
pub type SnapshotFn = Box<dyn Fn(Snapshot) + Send + Sync>;

/// A live subscription. Cancelling (or dropping) the handle stops delivery.
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Wrap the delivery task backing a subscription. Implementations of
    /// [`RemoteCollection`] hand the task over here so cancellation works
    /// the same for all of them.
    pub fn new(handle: JoinHandle<()>) -> Subscription {
        Subscription { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A per-user remote document collection.
#[async_trait]
pub trait RemoteCollection: Send + Sync {
    /// Read the current contents of the collection.
    async fn fetch(&self) -> DeskResult<Snapshot>;

    /// Create or replace one document.
    async fn upsert(&self, id: &str, doc: serde_json::Value) -> DeskResult<()>;

    /// Delete one document.
    async fn remove(&self, id: &str) -> DeskResult<()>;

    /// Subscribe to collection changes. The current snapshot is delivered
    /// once immediately, then again whenever the contents change.
    async fn subscribe(&self, on_snapshot: SnapshotFn) -> DeskResult<Subscription>;
}

/// Provider-backed remote collection.
///
/// Providers expose a one-shot `list_docs` rather than a change feed, so
/// subscriptions poll: fetch on an interval, deliver a snapshot only when
/// the listing differs from the last one seen.
#[derive(Clone)]
pub struct ProviderRemote {
    provider: Provider,
    user: String,
    collection: String,
    poll_interval: Duration,
}

impl ProviderRemote {
    pub fn new(provider: Provider, user: &str, collection: &str, poll_interval: Duration) -> Self {
        ProviderRemote {
            provider,
            user: user.to_string(),
            collection: collection.to_string(),
            poll_interval,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl RemoteCollection for ProviderRemote {
    async fn fetch(&self) -> DeskResult<Snapshot> {
        let docs = self
            .provider
            .call(ListDocs {
                user: self.user.clone(),
                collection: self.collection.clone(),
            })
            .await?;
        Ok(Snapshot::new(docs))
    }

    async fn upsert(&self, id: &str, doc: serde_json::Value) -> DeskResult<()> {
        self.provider
            .call(UpsertDoc {
                user: self.user.clone(),
                collection: self.collection.clone(),
                id: id.to_string(),
                doc,
            })
            .await
    }

    async fn remove(&self, id: &str) -> DeskResult<()> {
        self.provider
            .call(RemoveDoc {
                user: self.user.clone(),
                collection: self.collection.clone(),
                id: id.to_string(),
            })
            .await
    }

    async fn subscribe(&self, on_snapshot: SnapshotFn) -> DeskResult<Subscription> {
        let initial = self.fetch().await?;
        let mut last = initial.clone();
        on_snapshot(initial);

        let poller = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(poller.poll_interval).await;
                match poller.fetch().await {
                    Ok(snapshot) => {
                        if snapshot != last {
                            last = snapshot.clone();
                            on_snapshot(snapshot);
                        }
                    }
                    Err(e) => {
                        // Transient failures keep the subscription alive;
                        // the next poll retries.
                        warn!(
                            collection = %poller.collection,
                            error = %e,
                            "Polling the remote collection failed"
                        );
                    }
                }
            }
        });

        Ok(Subscription { handle })
    }
}
