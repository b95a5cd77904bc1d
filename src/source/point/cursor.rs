use crate::column::{ColumnMap, CoordinateColumns};
use crate::config::DecodePolicy;
use crate::decode::{Decode, PointRecord};
use crate::error::ReaderError;
use crate::source::rows::RowStream;

use std::io::Read;

/// Lookahead state of a point grouper.
///
/// Holds at most one decoded record read ahead of the current group,
/// or the failure met while reading it. A record handed out by
/// [`Cursor::pull`] is never handed out again unless it is returned
/// through [`Cursor::push_back`].
#[derive(Debug, Default)]
pub struct Cursor {
    pending: Option<PointRecord>,
    fault: Option<ReaderError>,
    exhausted: bool,
}

impl Cursor {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.pending.is_none() && self.fault.is_none()
    }

    /// Takes the buffered record if there is one, otherwise
    /// reads and decodes the next row of the stream.
    pub fn pull<R: Read>(
        &mut self,
        rows: &mut RowStream<R>,
        columns: &ColumnMap<CoordinateColumns>,
        policy: DecodePolicy,
    ) -> Option<Result<PointRecord, ReaderError>> {
        if let Some(record) = self.pending.take() {
            return Some(Ok(record));
        }

        if let Some(fault) = self.fault.take() {
            return Some(Err(fault));
        }

        if self.exhausted {
            return None;
        }

        let next = rows.next_decoded(policy, |row| Ok(columns.decode(row)?));
        if next.is_none() {
            self.exhausted = true;
        }

        next
    }

    /// Whether a record, or the failure to read one, is available.
    /// Reads ahead into the buffer if necessary.
    pub fn peek<R: Read>(
        &mut self,
        rows: &mut RowStream<R>,
        columns: &ColumnMap<CoordinateColumns>,
        policy: DecodePolicy,
    ) -> bool {
        if self.pending.is_some() || self.fault.is_some() {
            return true;
        }

        match self.pull(rows, columns, policy) {
            Some(Ok(record)) => self.pending = Some(record),
            Some(Err(fault)) => self.fault = Some(fault),
            None => return false,
        }

        true
    }

    /// Buffers a record which belongs to the next group.
    pub fn push_back(&mut self, record: PointRecord) {
        debug_assert!(self.pending.is_none(), "lookahead holds a single record");
        self.pending = Some(record);
    }

    /// Holds a failure met mid-group until the next pull.
    pub fn defer(&mut self, fault: ReaderError) {
        debug_assert!(self.pending.is_none(), "a fault replaces the lookahead record");
        self.fault = Some(fault);
    }

    pub fn clear(&mut self) {
        *self = Cursor::default();
    }
}
