use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the header codec and the IPS record decoder.
///
/// I/O failures are not represented here: reading and writing files is the
/// caller's concern and is reported through `anyhow` at that layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Image length is neither a multiple of 1024 nor 512 past one, so the
    /// presence of a copier header cannot be determined.
    #[error("ambiguous image layout: {0} bytes is neither headered nor headerless")]
    AmbiguousLayout(usize),

    #[error("image already carries a copier header")]
    AlreadyHeadered,

    #[error("image does not carry a copier header")]
    NotHeadered,

    #[error("patch stream does not start with the PATCH magic")]
    BadMagic,

    #[error("patch stream truncated inside a record address/length field")]
    TruncatedLength,

    #[error("patch stream truncated inside a literal payload")]
    TruncatedPayload,

    #[error("patch stream truncated inside an RLE count field")]
    TruncatedRleCount,

    #[error("patch stream truncated before the RLE fill byte")]
    TruncatedRleValue,
}
