//! Task Output Module
//!
//! Read and write capabilities handed across the cache boundary.

use std::io::{self, Read, Write};

use bytes::{Buf, Bytes};

// == Task Output Reader ==
/// Handle on a cached payload returned by a successful lookup.
///
/// Every call to [`read`](Self::read) yields a fresh source over the same bytes.
#[derive(Debug, Clone)]
pub struct TaskOutputReader {
    payload: Bytes,
}

impl TaskOutputReader {
    pub(crate) fn new(payload: Bytes) -> Self {
        Self { payload }
    }

    // == Read ==
    /// Opens a byte source over the stored payload.
    pub fn read(&self) -> io::Result<impl Read> {
        Ok(self.payload.clone().reader())
    }

    /// Returns the whole payload. Cheap; the buffer is shared, not copied.
    pub fn bytes(&self) -> Bytes {
        self.payload.clone()
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

// == Task Output Writer ==
/// Produces a task's output payload into the sink it is given.
///
/// Any `Fn(&mut dyn Write) -> io::Result<()>` closure is a writer.
pub trait TaskOutputWriter {
    /// Writes the full payload to `sink`.
    fn write_to(&self, sink: &mut dyn Write) -> io::Result<()>;
}

impl<F> TaskOutputWriter for F
where
    F: Fn(&mut dyn Write) -> io::Result<()>,
{
    fn write_to(&self, sink: &mut dyn Write) -> io::Result<()> {
        self(sink)
    }
}
