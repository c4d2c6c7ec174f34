// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::Semaphore;
use crate::manifest::{ManifestError, ManifestRepository, UpdateManifest};
use crate::properties::PropertyStore;
use crate::session::{StatusSink, StatusSnapshot};
use crate::status::LinkOpener;

/// Property store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryPropertyStore {
    props: RwLock<HashMap<String, String>>,
}

impl MemoryPropertyStore {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let props = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            props: RwLock::new(props),
        }
    }

    pub fn set(&self, name: &str, value: &str) {
        self.props.write().unwrap().insert(name.to_string(), value.to_string());
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn get_property(&self, name: &str) -> Option<String> {
        self.props.read().unwrap().get(name).cloned()
    }
}

/// Manifest repository whose refresh result is scripted by the test
pub struct ScriptedManifestRepository {
    current: Mutex<Option<UpdateManifest>>,
    next: Mutex<Option<UpdateManifest>>,
    refresh_calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedManifestRepository {
    /// Every refresh succeeds with `manifest`
    pub fn serving(manifest: UpdateManifest) -> Self {
        Self {
            current: Mutex::new(None),
            next: Mutex::new(Some(manifest)),
            refresh_calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Every refresh fails as if the network were down
    pub fn failing() -> Self {
        Self {
            current: Mutex::new(None),
            next: Mutex::new(None),
            refresh_calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Refresh blocks until the test adds a permit to the returned semaphore
    pub fn gated(manifest: UpdateManifest) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let repository = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::serving(manifest)
        };
        (repository, gate)
    }

    pub fn with_current(self, manifest: UpdateManifest) -> Self {
        *self.current.lock().unwrap() = Some(manifest);
        self
    }

    pub fn serve_next(&self, manifest: Option<UpdateManifest>) {
        *self.next.lock().unwrap() = manifest;
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ManifestRepository for ScriptedManifestRepository {
    async fn current_manifest(&self) -> Option<UpdateManifest> {
        self.current.lock().unwrap().clone()
    }

    async fn refresh(&self) -> Result<UpdateManifest, ManifestError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let next = self.next.lock().unwrap().clone();
        match next {
            Some(manifest) => {
                *self.current.lock().unwrap() = Some(manifest.clone());
                Ok(manifest)
            }
            None => Err(ManifestError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "network unreachable",
            ))),
        }
    }
}

/// Link opener that remembers what it was asked to open
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

/// Status sink that keeps every snapshot it is shown
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub snapshots: Vec<StatusSnapshot>,
}

impl StatusSink for RecordingSink {
    fn status_changed(&mut self, snapshot: &StatusSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}
