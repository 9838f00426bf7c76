use crate::error::{Error, Result};
use crate::ips_format::{PatchRecord, MAGIC, SENTINEL};

/// Lazy decoder over one IPS patch stream.
///
/// The format carries no record count or total length; only the `EOF`
/// sentinel or running out of input ends the sequence, so decoding is a
/// strict one-record-lookahead state machine with no backtracking. The first
/// structural error abandons the rest of the stream: the iterator yields the
/// error once and then fuses.
pub struct RecordDecoder<'a> {
    input: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> RecordDecoder<'a> {
    /// Validate the `PATCH` magic and position the decoder at the first
    /// record. Raw byte comparison; the magic is not text.
    pub fn new(input: &'a [u8]) -> Result<Self> {
        if input.len() < MAGIC.len() || &input[..MAGIC.len()] != MAGIC {
            return Err(Error::BadMagic);
        }
        Ok(Self {
            input,
            pos: MAGIC.len(),
            done: false,
        })
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.remaining() < n {
            return None;
        }
        let bytes = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    fn next_record(&mut self) -> Result<Option<PatchRecord>> {
        // End of input with no sentinel is also normal termination.
        if self.remaining() == 0 {
            return Ok(None);
        }
        let addr = self.take(3).ok_or(Error::TruncatedLength)?;
        if addr == SENTINEL {
            return Ok(None);
        }
        let address = u32::from_be_bytes([0, addr[0], addr[1], addr[2]]);

        let len = self.take(2).ok_or(Error::TruncatedLength)?;
        let length = u16::from_be_bytes([len[0], len[1]]);

        if length != 0 {
            let data = self
                .take(length as usize)
                .ok_or(Error::TruncatedPayload)?;
            return Ok(Some(PatchRecord::Literal {
                address,
                data: data.to_vec(),
            }));
        }

        // Zero length marks an RLE record: a fresh count, then the fill byte.
        let count_bytes = self.take(2).ok_or(Error::TruncatedRleCount)?;
        let count = u16::from_be_bytes([count_bytes[0], count_bytes[1]]);
        let value = self.take(1).ok_or(Error::TruncatedRleValue)?[0];
        Ok(Some(PatchRecord::RunLength {
            address,
            value,
            count,
        }))
    }
}

impl Iterator for RecordDecoder<'_> {
    type Item = Result<PatchRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
