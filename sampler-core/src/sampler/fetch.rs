//! File retrieval
//!
//!     Samples reference files by identifier, and many samples can share one file. The
//!     [`SampleFiles`] service makes sure each identifier is retrieved and scanned at most
//!     once, however many samples ask for it and however their requests interleave.
//!
//!     Per identifier the service tracks one of two states:
//!
//!         - Pending: a retrieval is in flight; later requests queue up as waiters
//!         - Completed: the scanned file, shared by every later request
//!
//!     The check and the transition to Pending happen under one lock, so two requests can never
//!     both start a retrieval. When the retrieval succeeds the waiters are resolved in the
//!     order they registered. When it fails the failure is logged once, every waiter observes a
//!     retrieval failure, and the identifier is forgotten: the next request starts afresh.
//!     A retrieval whose future is dropped before it finishes is forgotten the same way.
//!     There is no retry and no expiry.
//!
//!     The actual I/O sits behind the [`Fetcher`] trait, so the rest of the crate never
//!     touches the network or the filesystem.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::sampler::element::{RenderedSample, SampleRequest};
use crate::sampler::error::{FetchError, SampleError};
use crate::sampler::options::SamplerDefaults;
use crate::sampler::scanning::{scan, ScannedFile};

/// Retrieves raw file content by identifier.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, identifier: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

enum FileState {
    Pending(Vec<oneshot::Sender<Arc<ScannedFile>>>),
    Completed(Arc<ScannedFile>),
}

enum Claim {
    Ready(Arc<ScannedFile>),
    Wait(oneshot::Receiver<Arc<ScannedFile>>),
    Fetch,
}

/// Deduplicating fetch-and-scan service.
pub struct SampleFiles<F> {
    fetcher: F,
    files: Mutex<HashMap<String, FileState>>,
}

impl<F: Fetcher> SampleFiles<F> {
    pub fn new(fetcher: F) -> Self {
        SampleFiles {
            fetcher,
            files: Mutex::new(HashMap::new()),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Get the scanned file for `identifier`, retrieving it if nobody has yet.
    pub async fn get(&self, identifier: &str) -> Result<Arc<ScannedFile>, FetchError> {
        match self.claim(identifier) {
            Claim::Ready(file) => Ok(file),
            Claim::Wait(receiver) => receiver
                .await
                .map_err(|_| FetchError::Abandoned(identifier.to_string())),
            Claim::Fetch => self.retrieve(identifier).await,
        }
    }

    /// Fetch the request's file and render the request against it.
    pub async fn render_request(
        &self,
        request: &SampleRequest,
        defaults: &SamplerDefaults,
    ) -> Result<RenderedSample, SampleError> {
        let identifier = request.identifier(defaults);
        let file = self.get(&identifier).await.map_err(|error| {
            SampleError::retrieval(&request.file, request.selector.as_deref(), error)
        })?;
        request.render(&file, defaults)
    }

    /// Whether a scanned file is held for `identifier`
    pub fn is_cached(&self, identifier: &str) -> bool {
        matches!(
            self.lock().get(identifier),
            Some(FileState::Completed(_))
        )
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, FileState>> {
        lock_files(&self.files)
    }

    fn claim(&self, identifier: &str) -> Claim {
        let mut files = self.lock();
        match files.get_mut(identifier) {
            Some(FileState::Completed(file)) => Claim::Ready(Arc::clone(file)),
            Some(FileState::Pending(waiters)) => {
                let (sender, receiver) = oneshot::channel();
                waiters.push(sender);
                Claim::Wait(receiver)
            }
            None => {
                files.insert(identifier.to_string(), FileState::Pending(Vec::new()));
                Claim::Fetch
            }
        }
    }

    async fn retrieve(&self, identifier: &str) -> Result<Arc<ScannedFile>, FetchError> {
        tracing::debug!(%identifier, "fetching file");
        let mut pending = PendingEntry::new(&self.files, identifier);
        let result = self.fetcher.fetch(identifier).await;
        pending.settle();

        let mut files = self.lock();
        let waiters = match files.remove(identifier) {
            Some(FileState::Pending(waiters)) => waiters,
            _ => Vec::new(),
        };

        match result {
            Ok(content) => {
                let file = Arc::new(scan(&content));
                files.insert(
                    identifier.to_string(),
                    FileState::Completed(Arc::clone(&file)),
                );
                drop(files);
                for waiter in waiters {
                    // A waiter that went away no longer needs the file.
                    let _ = waiter.send(Arc::clone(&file));
                }
                Ok(file)
            }
            Err(error) => {
                drop(files);
                tracing::warn!(%identifier, %error, waiters = waiters.len(), "failed to get file");
                Err(error)
            }
        }
    }
}

fn lock_files(
    files: &Mutex<HashMap<String, FileState>>,
) -> MutexGuard<'_, HashMap<String, FileState>> {
    files.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the Pending entry of an in-flight retrieval.
///
/// If the retrieving future is dropped before the fetch settles, the entry is removed and its
/// waiters are released with [`FetchError::Abandoned`], so the next request starts afresh.
struct PendingEntry<'a> {
    files: &'a Mutex<HashMap<String, FileState>>,
    identifier: &'a str,
    settled: bool,
}

impl<'a> PendingEntry<'a> {
    fn new(files: &'a Mutex<HashMap<String, FileState>>, identifier: &'a str) -> Self {
        PendingEntry {
            files,
            identifier,
            settled: false,
        }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for PendingEntry<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut files = lock_files(self.files);
        if let Some(FileState::Pending(waiters)) = files.remove(self.identifier) {
            tracing::debug!(
                identifier = %self.identifier,
                waiters = waiters.len(),
                "retrieval cancelled"
            );
        }
    }
}

/// Reads files from the local filesystem, treating identifiers as paths.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    root: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative identifiers against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        FileFetcher {
            root: Some(root.into()),
        }
    }

    fn path_for(&self, identifier: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(identifier),
            None => PathBuf::from(identifier),
        }
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, identifier: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        let path = self.path_for(identifier);
        let identifier = identifier.to_string();
        async move {
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|error| match error.kind() {
                    std::io::ErrorKind::NotFound => FetchError::NotFound(identifier),
                    _ => FetchError::Io {
                        identifier,
                        message: error.to_string(),
                    },
                })
        }
    }
}

/// Serves fixed content from memory and counts retrievals.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    files: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, identifier: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(identifier.into(), content.into());
        self
    }

    /// Number of retrievals performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, identifier: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .files
            .get(identifier)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(identifier.to_string()));
        async move {
            tokio::task::yield_now().await;
            result
        }
    }
}
