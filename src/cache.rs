//! File cache module
//!
//! Bounded in-memory cache of file contents as chunk lists, keyed by absolute
//! path. An entry is created lazily the first time a path is served: the
//! populate stream tees each chunk to the caller and to the entry, and the
//! entry only becomes replayable once the whole file has streamed through.
//!
//! The byte ceiling is soft. `check_and_evict` runs before a serve consults
//! the cache, and a first-time fetch of a large file can carry the total past
//! the ceiling until the next check.

use crate::fs::ChunkReader;
use crate::http::Body;
use bytes::Bytes;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One cached file: its chunks and the size recorded for eviction accounting
///
/// The recorded size is `chunk_count * chunk_size`, finalized only after the
/// full file has streamed. This overstates a short final chunk; eviction
/// accounting depends on it, so it is kept as-is rather than using exact byte
/// counts. Until finalization the entry is being-populated: present but never
/// replayed, and counted as zero bytes.
struct Entry {
    chunks: Vec<Bytes>,
    size: u64,
    complete: bool,
}

struct Inner {
    entries: HashMap<PathBuf, Entry>,
    max_bytes: u64,
    chunk_size: usize,
}

/// Process-lifetime cache of served files
///
/// Clones share the same underlying map. Single-threaded by design: the
/// dispatcher and any in-flight populate stream run on one cooperative thread,
/// so `Rc<RefCell<..>>` is the whole synchronization story.
#[derive(Clone)]
pub struct FileCache {
    inner: Rc<RefCell<Inner>>,
}

impl FileCache {
    #[must_use]
    pub fn new(max_bytes: u64, chunk_size: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: HashMap::new(),
                max_bytes,
                chunk_size,
            })),
        }
    }

    /// Serve `path` from the cache, populating it on a miss
    ///
    /// A complete entry is replayed from memory without touching storage. On a
    /// miss (or a leftover being-populated entry) the returned body lazily
    /// opens the file and streams it, appending each chunk to a fresh entry as
    /// it goes. Open and read failures surface through the body iterator.
    #[must_use]
    pub fn get_or_populate(&self, path: &Path) -> Body {
        let (chunks, chunk_size) = {
            let inner = self.inner.borrow();
            let replay = inner
                .entries
                .get(path)
                .filter(|entry| entry.complete)
                .map(|entry| entry.chunks.clone());
            (replay, inner.chunk_size)
        };

        match chunks {
            Some(chunks) => {
                debug!("serving {} from cache ({} chunks)", path.display(), chunks.len());
                Body::Chunks(Box::new(chunks.into_iter().map(Ok)))
            }
            None => {
                debug!("did not find {} in cache", path.display());
                Body::Chunks(Box::new(PopulateStream {
                    cache: self.clone(),
                    path: path.to_path_buf(),
                    chunk_size,
                    state: StreamState::Unopened,
                }))
            }
        }
    }

    /// Evict at most one entry if recorded sizes exceed the ceiling
    ///
    /// The victim is whichever entry the map yields first; not recency- or
    /// size-aware. One eviction per call even when the total is still over the
    /// ceiling afterwards. Runs once per serve, before the cache lookup, so it
    /// can evict the very entry about to be reused.
    pub fn check_and_evict(&self) {
        let mut inner = self.inner.borrow_mut();
        let total: u64 = inner.entries.values().map(|entry| entry.size).sum();
        if total <= inner.max_bytes {
            return;
        }
        if let Some(victim) = inner.entries.keys().next().cloned() {
            inner.entries.remove(&victim);
            debug!(
                "cache at {total} bytes over ceiling {}, evicted {}",
                inner.max_bytes,
                victim.display()
            );
        }
    }

    /// Whether `path` has a complete, replayable entry
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.inner
            .borrow()
            .entries
            .get(path)
            .is_some_and(|entry| entry.complete)
    }

    /// Number of entries, complete or being-populated
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Sum of recorded entry sizes
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.inner.borrow().entries.values().map(|entry| entry.size).sum()
    }

    fn begin(&self, path: &Path) {
        self.inner.borrow_mut().entries.insert(
            path.to_path_buf(),
            Entry {
                chunks: Vec::new(),
                size: 0,
                complete: false,
            },
        );
    }

    fn append(&self, path: &Path, chunk: Bytes) {
        // The entry can have been evicted mid-stream; the caller still gets
        // its chunks, the cache just stops accumulating.
        if let Some(entry) = self.inner.borrow_mut().entries.get_mut(path) {
            entry.chunks.push(chunk);
        }
    }

    fn finish(&self, path: &Path) {
        let mut inner = self.inner.borrow_mut();
        let chunk_size = inner.chunk_size as u64;
        if let Some(entry) = inner.entries.get_mut(path) {
            entry.size = entry.chunks.len() as u64 * chunk_size;
            entry.complete = true;
        }
    }
}

enum StreamState {
    Unopened,
    Reading(ChunkReader),
    Done,
}

/// One-shot producer that tees file chunks to the caller and the cache entry
///
/// The file is opened on the first `next` call, after the response head has
/// already gone out. An error at any point ends the stream and leaves the
/// entry being-populated, which a later request for the same path replaces.
struct PopulateStream {
    cache: FileCache,
    path: PathBuf,
    chunk_size: usize,
    state: StreamState,
}

impl Iterator for PopulateStream {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if let StreamState::Unopened = self.state {
            match ChunkReader::open(&self.path, self.chunk_size) {
                Ok(reader) => {
                    self.cache.begin(&self.path);
                    self.state = StreamState::Reading(reader);
                }
                Err(err) => {
                    self.state = StreamState::Done;
                    return Some(Err(err));
                }
            }
        }

        let StreamState::Reading(reader) = &mut self.state else {
            return None;
        };

        match reader.next() {
            Some(Ok(chunk)) => {
                self.cache.append(&self.path, chunk.clone());
                Some(Ok(chunk))
            }
            Some(Err(err)) => {
                self.state = StreamState::Done;
                Some(Err(err))
            }
            None => {
                self.cache.finish(&self.path);
                self.state = StreamState::Done;
                None
            }
        }
    }
}
