//! Scripted gateway for engine unit tests.
//!
//! Unlike the HTTP-level mock in the gateway crate, this fake implements
//! [`StoreGateway`] directly so tests can script exact remote behaviors:
//! listings that include or omit keys, probes that fail or report deletion,
//! and a holdable listing for staleness tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use storescope_gateway::{
    EntryKey, EntryPayload, GatewayError, KeyPage, ListEntriesOpts, ListVersionsOpts,
    Result as GatewayResult, SetEntryOpts, StoreGateway, VersionPage, VersionPayload,
};
use storescope_types::{
    normalize_scope, EntryIdentity, EntryMetadata, SortOrder, VersionMetadata, VersionRecord,
};

#[derive(Default)]
pub struct FakeGateway {
    /// Keys the listing returns, per (container, scope), in listing order.
    listed: Mutex<HashMap<(String, String), Vec<String>>>,
    /// Version history per identity, newest first.
    versions: Mutex<HashMap<EntryIdentity, Vec<VersionRecord>>>,
    payloads: Mutex<HashMap<(EntryIdentity, String), Value>>,
    next_cursor: Mutex<Option<String>>,

    fail_listing: AtomicBool,
    fail_probes: AtomicBool,
    fail_set: AtomicBool,
    fail_delete: AtomicBool,
    listing_gate: Mutex<Option<tokio::sync::oneshot::Receiver<()>>>,

    version_seq: AtomicUsize,
    probe_count: AtomicUsize,
    set_calls: Mutex<Vec<(EntryIdentity, Value)>>,
    delete_calls: Mutex<Vec<EntryIdentity>>,
}

impl FakeGateway {
    fn next_version_id(&self) -> String {
        format!("v{}", self.version_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Adds a key to the listing without giving it any version history.
    pub fn list_key(&self, container: &str, scope: Option<&str>, key: &str) {
        self.listed
            .lock()
            .entry((container.to_owned(), normalize_scope(scope)))
            .or_default()
            .push(key.to_owned());
    }

    /// Prepends a version (making it the newest) and stores its payload.
    pub fn push_version(&self, identity: &EntryIdentity, deleted: bool, value: Value) -> String {
        let id = self.next_version_id();
        self.versions.lock().entry(identity.clone()).or_default().insert(
            0,
            VersionRecord {
                version_id: id.clone(),
                created_time: Utc::now(),
                content_length: value.to_string().len() as u64,
                deleted,
            },
        );
        self.payloads.lock().insert((identity.clone(), id.clone()), value);
        id
    }

    /// A listed key whose newest version is live.
    pub fn seed_live(&self, container: &str, scope: Option<&str>, key: &str, value: Value) {
        self.list_key(container, scope, key);
        self.push_version(&EntryIdentity::new(container, key, scope), false, value);
    }

    /// A listed key whose newest version is a deletion marker, as when
    /// another tool deleted it but the listing still includes it.
    pub fn seed_remote_deleted(&self, container: &str, scope: Option<&str>, key: &str) {
        self.list_key(container, scope, key);
        self.push_version(&EntryIdentity::new(container, key, scope), true, Value::Null);
    }

    /// Makes the next listing block until the returned sender fires.
    pub fn hold_next_listing(&self) -> tokio::sync::oneshot::Sender<()> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        *self.listing_gate.lock() = Some(rx);
        tx
    }

    /// Sets the cursor the next listing reports.
    pub fn set_next_cursor(&self, cursor: &str) {
        *self.next_cursor.lock() = Some(cursor.to_owned());
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_probes(&self, fail: bool) {
        self.fail_probes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> Vec<(EntryIdentity, Value)> {
        self.set_calls.lock().clone()
    }

    pub fn delete_calls(&self) -> Vec<EntryIdentity> {
        self.delete_calls.lock().clone()
    }
}

fn remote_error(message: &str) -> GatewayError {
    GatewayError::from_status(500, message.to_owned())
}

#[async_trait]
impl StoreGateway for FakeGateway {
    async fn list_entries(&self, container: &str, opts: ListEntriesOpts) -> GatewayResult<KeyPage> {
        let gate = self.listing_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(remote_error("listing unavailable"));
        }
        let scope = normalize_scope(opts.scope.as_deref());
        let keys = self
            .listed
            .lock()
            .get(&(container.to_owned(), scope))
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(EntryKey::new)
            .collect();
        Ok(KeyPage { keys, next_cursor: self.next_cursor.lock().clone() })
    }

    async fn get_entry(&self, identity: &EntryIdentity) -> GatewayResult<EntryPayload> {
        let versions = self.versions.lock().get(identity).cloned().unwrap_or_default();
        match versions.first() {
            Some(latest) if !latest.deleted => {
                let data = self
                    .payloads
                    .lock()
                    .get(&(identity.clone(), latest.version_id.clone()))
                    .cloned()
                    .unwrap_or(Value::Null);
                Ok(EntryPayload { data, metadata: EntryMetadata::default() })
            }
            _ => Err(GatewayError::from_status(404, "Entry not found".to_owned())),
        }
    }

    async fn set_entry(
        &self,
        identity: &EntryIdentity,
        value: &Value,
        _opts: SetEntryOpts,
    ) -> GatewayResult<String> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(remote_error("write unavailable"));
        }
        self.set_calls.lock().push((identity.clone(), value.clone()));
        Ok(self.push_version(identity, false, value.clone()))
    }

    async fn delete_entry(&self, identity: &EntryIdentity) -> GatewayResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(remote_error("delete unavailable"));
        }
        self.delete_calls.lock().push(identity.clone());
        self.push_version(identity, true, Value::Null);
        Ok(())
    }

    async fn list_versions(
        &self,
        identity: &EntryIdentity,
        opts: ListVersionsOpts,
    ) -> GatewayResult<VersionPage> {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_probes.load(Ordering::SeqCst) {
            return Err(remote_error("versions unavailable"));
        }
        let mut versions = self.versions.lock().get(identity).cloned().unwrap_or_default();
        if opts.order == SortOrder::Ascending {
            versions.reverse();
        }
        if let Some(limit) = opts.limit {
            versions.truncate(limit as usize);
        }
        Ok(VersionPage { versions, next_cursor: None })
    }

    async fn get_version(
        &self,
        identity: &EntryIdentity,
        version_id: &str,
    ) -> GatewayResult<VersionPayload> {
        let deleted = self
            .versions
            .lock()
            .get(identity)
            .and_then(|vs| vs.iter().find(|v| v.version_id == version_id))
            .map(|v| v.deleted);
        let Some(deleted) = deleted else {
            return Err(GatewayError::from_status(404, "version not found".to_owned()));
        };
        let data = self
            .payloads
            .lock()
            .get(&(identity.clone(), version_id.to_owned()))
            .cloned()
            .unwrap_or(Value::Null);
        Ok(VersionPayload {
            data,
            metadata: VersionMetadata { deleted, ..VersionMetadata::default() },
        })
    }
}
