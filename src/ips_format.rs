/// Magic bytes opening every IPS patch stream.
pub const MAGIC: &[u8; 5] = b"PATCH";

/// Sentinel terminating the record sequence. Compared as raw bytes, never as
/// text. A record whose address happens to encode as `EOF` is indistinguishable
/// from the sentinel; the format offers no escape, so the sentinel wins.
pub const SENTINEL: &[u8; 3] = b"EOF";

/// A single decoded IPS record: a sparse byte-range write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchRecord {
    /// Write `data` verbatim starting at `address`.
    Literal { address: u32, data: Vec<u8> },
    /// Write `value` repeated `count` times starting at `address`.
    RunLength { address: u32, value: u8, count: u16 },
}

impl PatchRecord {
    /// 24-bit target offset of the first byte this record writes.
    pub fn address(&self) -> u32 {
        match self {
            PatchRecord::Literal { address, .. } => *address,
            PatchRecord::RunLength { address, .. } => *address,
        }
    }

    /// One past the last byte offset this record writes. May exceed the
    /// current buffer length; that is how the image grows.
    pub fn end(&self) -> usize {
        match self {
            PatchRecord::Literal { address, data } => *address as usize + data.len(),
            PatchRecord::RunLength { address, count, .. } => *address as usize + *count as usize,
        }
    }
}
