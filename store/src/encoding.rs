use serde::{Deserialize, Serialize};

use crate::{Record, StoreError};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    records: &'a [Record],
}

#[derive(Debug, Deserialize)]
struct Header {
    version: u32,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    records: Vec<Record>,
}

pub(crate) fn encode(records: &[Record]) -> Result<Vec<u8>, StoreError> {
    let envelope = EnvelopeRef {
        version: FORMAT_VERSION,
        records,
    };
    serde_json::to_vec_pretty(&envelope).map_err(StoreError::Encode)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<Record>, StoreError> {
    // Version first, so a newer layout reports as such instead of a parse error.
    let Header { version } = serde_json::from_slice(bytes).map_err(StoreError::Decode)?;
    if version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }
    let Envelope { records } = serde_json::from_slice(bytes).map_err(StoreError::Decode)?;
    Ok(records)
}
