//! Wire codec for the active event set
//!
//! Two encodings are supported:
//! - [`WireEvent`] records (serde), one per active event with its category
//!   flags, optionally wrapped in a timestamped [`WireMessage`]
//! - a compact little-endian binary frame:
//!
//! ```text
//! u16 count
//! count * (u16 event id, u16 category mask)
//! ```
//!
//! Category flags are informational. Decoding always re-derives membership
//! from the local catalog, so peers built against a different catalog cannot
//! change local behavior.

use crate::catalog::EventCatalog;
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::event_name::EventName;
use crate::events::ActiveEventSet;
use crate::types::{Category, Timestamp, WireError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

const COUNT_BYTES: usize = 2;
const RECORD_BYTES: usize = 4;

/// One active event as transmitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEvent {
    pub event_id: u16,
    pub category_flags: BTreeMap<Category, bool>,
}

impl WireEvent {
    /// Build a record with a flag for every category
    pub fn from_mask(event_id: u16, mask: u16) -> Self {
        let category_flags = Category::ALL
            .iter()
            .map(|c| (*c, mask & c.bit() != 0))
            .collect();
        Self {
            event_id,
            category_flags,
        }
    }

    /// Collapse the flags back into a bitmask
    pub fn mask(&self) -> u16 {
        self.category_flags
            .iter()
            .filter(|(_, set)| **set)
            .fold(0, |mask, (c, _)| mask | c.bit())
    }
}

/// Timestamped batch of records, as published once per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub timestamp: Timestamp,
    pub events: Vec<WireEvent>,
}

/// Encodes and decodes active event sets against a local catalog
#[derive(Debug, Clone)]
pub struct WireCodec {
    catalog: Arc<EventCatalog>,
    diagnostics: DiagnosticLog,
}

impl WireCodec {
    pub fn new(catalog: Arc<EventCatalog>) -> Self {
        Self {
            catalog,
            diagnostics: DiagnosticLog::new(),
        }
    }

    /// Records for every active event, ascending
    pub fn encode(&self, set: &ActiveEventSet) -> Vec<WireEvent> {
        set.to_wire()
    }

    /// Wrap the encoded set in a timestamped message
    pub fn message(&self, set: &ActiveEventSet, timestamp: Timestamp) -> WireMessage {
        WireMessage {
            timestamp,
            events: self.encode(set),
        }
    }

    /// Raw ids of every record the local catalog knows
    ///
    /// Unknown ids are dropped. Records whose flags disagree with the local
    /// catalog are kept; only the flags are ignored. Each call is one cycle
    /// for diagnostics, so a peer repeating the same bad record every message
    /// is reported once.
    pub fn decode(&mut self, records: &[WireEvent]) -> Vec<u16> {
        let mut ids = Vec::with_capacity(records.len());
        self.diagnostics.next_cycle();

        for record in records {
            let known = EventName::from_raw(record.event_id).filter(|e| self.catalog.is_known(*e));
            let Some(event) = known else {
                self.diagnostics.record(Diagnostic::UnknownEventId { raw: record.event_id });
                continue;
            };

            let local_mask = self.catalog.mask(event);
            let received_mask = record.mask();
            if received_mask != local_mask {
                self.diagnostics.record(Diagnostic::MalformedWireRecord {
                    raw: record.event_id,
                    received_mask,
                    local_mask,
                });
            }
            ids.push(record.event_id);
        }

        ids
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Drain diagnostics recorded since the last call
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain()
    }
}

/// Serialize records into the compact binary frame
///
/// The count field is a u16, so at most `u16::MAX` records fit in one frame.
pub fn encode_frame(records: &[WireEvent]) -> Result<Vec<u8>, WireError> {
    let count =
        u16::try_from(records.len()).map_err(|_| WireError::TooManyRecords(records.len()))?;

    let mut buf = Vec::with_capacity(COUNT_BYTES + records.len() * RECORD_BYTES);
    // Writing into a Vec cannot fail
    let _ = buf.write_u16::<LittleEndian>(count);
    for record in records {
        let _ = buf.write_u16::<LittleEndian>(record.event_id);
        let _ = buf.write_u16::<LittleEndian>(record.mask());
    }
    Ok(buf)
}

/// Parse a compact binary frame
pub fn decode_frame(bytes: &[u8]) -> Result<Vec<WireEvent>, WireError> {
    if bytes.len() < COUNT_BYTES {
        return Err(WireError::Truncated {
            expected: COUNT_BYTES,
            actual: bytes.len(),
        });
    }

    let mut cursor = Cursor::new(bytes);
    let count = read_u16(&mut cursor, COUNT_BYTES)? as usize;
    let expected = COUNT_BYTES + count * RECORD_BYTES;
    if bytes.len() < expected {
        return Err(WireError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    if bytes.len() > expected {
        return Err(WireError::TrailingBytes(bytes.len() - expected));
    }

    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let event_id = read_u16(&mut cursor, expected)?;
        let mask = read_u16(&mut cursor, expected)?;
        records.push(WireEvent::from_mask(event_id, mask));
    }
    Ok(records)
}

fn read_u16(cursor: &mut Cursor<&[u8]>, expected: usize) -> Result<u16, WireError> {
    cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| WireError::Truncated {
            expected,
            actual: cursor.get_ref().len(),
        })
}
