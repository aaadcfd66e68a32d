//! On-disk envelope around the automerge document.
//!
//! ```text
//! +----------+-----------------+----------------------+------------------+
//! | SHAPEDOC | header len (LE) | header (msgpack)     | automerge bytes  |
//! | 8 bytes  | u32             | format, label_count  | rest of file     |
//! +----------+-----------------+----------------------+------------------+
//! ```

use serde::{Deserialize, Serialize};

use crate::status::ReaderStatus;

pub(crate) const MAGIC: &[u8; 8] = b"SHAPEDOC";

const PREFIX_LEN: usize = MAGIC.len() + 4;

/// Metadata written ahead of the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Header {
    pub format: String,
    pub label_count: u64,
}

pub(crate) fn encode(header: &Header, body: &[u8]) -> Result<Vec<u8>, rmp_serde::encode::Error> {
    let header_bytes = rmp_serde::to_vec(header)?;
    let header_len = u32::try_from(header_bytes.len())
        .map_err(|_| rmp_serde::encode::Error::Syntax("envelope header too large".into()))?;

    let mut out = Vec::with_capacity(PREFIX_LEN + header_bytes.len() + body.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&header_len.to_le_bytes());
    out.extend_from_slice(&header_bytes);
    out.extend_from_slice(body);
    Ok(out)
}

/// Split a file into its header and document body
pub(crate) fn decode(bytes: &[u8]) -> Result<(Header, &[u8]), ReaderStatus> {
    if bytes.len() < PREFIX_LEN || &bytes[..MAGIC.len()] != MAGIC {
        return Err(ReaderStatus::UnrecognizedFileFormat);
    }

    let len_bytes: [u8; 4] = bytes[MAGIC.len()..PREFIX_LEN]
        .try_into()
        .map_err(|_| ReaderStatus::UnrecognizedFileFormat)?;
    let header_len = u32::from_le_bytes(len_bytes) as usize;

    let header_end = PREFIX_LEN
        .checked_add(header_len)
        .filter(|end| *end <= bytes.len())
        .ok_or(ReaderStatus::UnrecognizedFileFormat)?;

    let header: Header = rmp_serde::from_slice(&bytes[PREFIX_LEN..header_end])
        .map_err(|_| ReaderStatus::FormatFailure)?;

    Ok((header, &bytes[header_end..]))
}
