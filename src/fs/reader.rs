//! Chunked file reader module
//!
//! Reads a file from the backing store as a finite sequence of fixed-size byte
//! chunks. The sequence is consume-once: re-reading a file means opening a new
//! reader, not rewinding an old one.

use bytes::Bytes;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// A one-shot iterator over a file's contents in fixed-size chunks
///
/// Every chunk is full-sized except possibly the last. Each call to `next`
/// performs one bounded blocking read against the store; callers needing to
/// overlap I/O with other work interleave between chunks.
pub struct ChunkReader {
    file: File,
    chunk_size: usize,
    done: bool,
}

impl ChunkReader {
    /// Open `path` in binary mode for chunked reading
    pub fn open(path: &Path, chunk_size: usize) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            file,
            chunk_size,
            done: false,
        })
    }
}

impl Iterator for ChunkReader {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; self.chunk_size];
        let mut filled = 0;
        // Fill the chunk completely unless the file ends first; a short read
        // mid-file is not EOF.
        while filled < self.chunk_size {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }

        if filled == 0 {
            self.done = true;
            return None;
        }
        if filled < self.chunk_size {
            self.done = true;
            buf.truncate(filled);
        }
        Some(Ok(Bytes::from(buf)))
    }
}
