//! Assemble packets from a raw byte stream (serio_raw node, capture file or
//! stdin), resynchronising on the packet markers.

use std::io::{self, Read};

use crate::frame::{has_markers, RawFrame, FRAME_SIZE};

pub struct FrameReader<R> {
    inner: R,
    window: RawFrame,
    dropped: u64,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            window: [0; FRAME_SIZE],
            dropped: 0,
        }
    }

    /// Total bytes discarded while hunting for packet boundaries.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Read the next marked packet. `Ok(None)` at end of stream.
    pub fn next_frame(&mut self) -> io::Result<Option<RawFrame>> {
        if !fill(&mut self.inner, &mut self.window)? {
            return Ok(None);
        }

        let mut skipped = 0u64;
        while !has_markers(&self.window) {
            self.window.copy_within(1.., 0);
            if !fill(&mut self.inner, &mut self.window[FRAME_SIZE - 1..])? {
                return Ok(None);
            }
            skipped += 1;
        }

        if skipped > 0 {
            self.dropped += skipped;
            log::warn!("Resynchronised after dropping {} bytes", skipped);
        }

        Ok(Some(self.window))
    }
}

/// `read_exact` that reports a clean end of stream as `false`.
fn fill(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<bool> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: RawFrame = [0x8A, 0x01, 0x02, 0xC0, 0x00, 0x00];
    const B: RawFrame = [0x83, 0x0F, 0xFF, 0xC0, 0x10, 0x00];

    #[test]
    fn test_reads_consecutive_frames() {
        let bytes: Vec<u8> = [A, B].concat();
        let mut reader = FrameReader::new(bytes.as_slice());
        assert_eq!(reader.next_frame().unwrap(), Some(A));
        assert_eq!(reader.next_frame().unwrap(), Some(B));
        assert_eq!(reader.next_frame().unwrap(), None);
        assert_eq!(reader.dropped(), 0);
    }

    #[test]
    fn test_resyncs_after_garbage() {
        let mut bytes = vec![0x00, 0x13, 0xC0];
        bytes.extend_from_slice(&A);
        bytes.extend_from_slice(&B);
        let mut reader = FrameReader::new(bytes.as_slice());
        assert_eq!(reader.next_frame().unwrap(), Some(A));
        assert_eq!(reader.next_frame().unwrap(), Some(B));
        assert_eq!(reader.dropped(), 3);
    }

    #[test]
    fn test_truncated_tail_is_end_of_stream() {
        let bytes: Vec<u8> = [&A[..], &B[..4]].concat();
        let mut reader = FrameReader::new(bytes.as_slice());
        assert_eq!(reader.next_frame().unwrap(), Some(A));
        assert_eq!(reader.next_frame().unwrap(), None);
    }
}
