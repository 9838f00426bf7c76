use crate::apply::apply_records;
use crate::decode::RecordDecoder;
use crate::error::{Error, Result};
use crate::header::{classify, HeaderState};

/// Owns one image for the duration of a patching run and applies patch
/// streams to it in caller order. Each stream's addresses resolve against the
/// buffer as the previous stream left it, so patches compose cumulatively.
pub struct PatchSession {
    rom: Vec<u8>,
}

/// Outcome of a multi-stream run: streams that failed partway through are
/// recorded (by position, with the decode error) rather than aborting the
/// remaining streams.
#[derive(Debug, Default)]
pub struct SessionSummary {
    pub streams_applied: usize,
    pub stream_failures: Vec<(usize, Error)>,
}

impl PatchSession {
    /// Take ownership of an image. An ambiguous layout is refused up front;
    /// patching would make its offsets meaningless.
    pub fn new(rom: Vec<u8>) -> Result<Self> {
        if classify(&rom) == HeaderState::Ambiguous {
            return Err(Error::AmbiguousLayout(rom.len()));
        }
        Ok(Self { rom })
    }

    /// Surrender the patched image.
    pub fn into_rom(self) -> Vec<u8> {
        self.rom
    }

    /// Decode and apply a single patch stream. A structural error partway
    /// through leaves the records decoded before it applied.
    pub fn apply_stream(&mut self, raw: &[u8]) -> Result<()> {
        let decoder = RecordDecoder::new(raw)?;
        apply_records(&mut self.rom, decoder)
    }

    /// Apply a sequence of patch streams in order.
    ///
    /// A stream that fails magic validation aborts the run (`BadMagic` is
    /// returned, later streams untouched). A stream that fails mid-record
    /// counts as processed: its partial writes stay, the failure lands in the
    /// summary, and the next stream is attempted.
    pub fn apply_streams<'a, I>(&mut self, streams: I) -> Result<SessionSummary>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut summary = SessionSummary::default();
        for (index, raw) in streams.into_iter().enumerate() {
            match self.apply_stream(raw) {
                Ok(()) => summary.streams_applied += 1,
                Err(Error::BadMagic) => return Err(Error::BadMagic),
                Err(err) => summary.stream_failures.push((index, err)),
            }
        }
        Ok(summary)
    }
}
