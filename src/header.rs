use crate::error::{Error, Result};

/// Size of the SMC copier header prefixed to some ROM dumps.
pub const HEADER_LEN: usize = 512;

/// ROM bank granularity; image lengths are judged modulo this.
const BANK_LEN: usize = 1024;

/// Block size the header's count field is denominated in.
const BLOCK_LEN: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Headered,
    Unheadered,
    Ambiguous,
}

/// Classify an image by its length alone: a clean bank multiple has no
/// header, a bank multiple plus 512 carries one, anything else is ambiguous
/// and must not be patched or header-modified.
pub fn classify(rom: &[u8]) -> HeaderState {
    match rom.len() % BANK_LEN {
        0 => HeaderState::Unheadered,
        r if r == HEADER_LEN => HeaderState::Headered,
        _ => HeaderState::Ambiguous,
    }
}

/// Return a new image with a copier header prepended.
///
/// The header is the little-endian 8 KiB block count of the payload followed
/// by zeros; the count is informational only and is never checked again.
pub fn add_header(rom: &[u8]) -> Result<Vec<u8>> {
    match classify(rom) {
        HeaderState::Headered => Err(Error::AlreadyHeadered),
        HeaderState::Ambiguous => Err(Error::AmbiguousLayout(rom.len())),
        HeaderState::Unheadered => {
            let block_count = (rom.len() / BLOCK_LEN) as u16;
            let mut out = Vec::with_capacity(HEADER_LEN + rom.len());
            out.extend_from_slice(&block_count.to_le_bytes());
            out.resize(HEADER_LEN, 0);
            out.extend_from_slice(rom);
            Ok(out)
        }
    }
}

/// Return a new image with the copier header stripped. The stripped bytes are
/// discarded without validating the recorded block count.
pub fn remove_header(rom: &[u8]) -> Result<Vec<u8>> {
    if classify(rom) != HeaderState::Headered {
        return Err(Error::NotHeadered);
    }
    Ok(rom[HEADER_LEN..].to_vec())
}
