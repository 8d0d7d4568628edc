use crate::error::HistoryError;
use crate::types::{BoardMove, Color, MoveRecord};

/// Ordered list of played turns.
///
/// Append-only, except that the last record may have its passive half
/// replaced or be removed while its active half is still missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Starts a new turn with its passive move.
    pub(crate) fn open(&mut self, color: Color, passive: BoardMove) -> Result<(), HistoryError> {
        if self.open_record().is_ok() {
            return Err(HistoryError::RecordOpen);
        }
        self.records.push(MoveRecord {
            color,
            passive,
            active: None,
        });
        Ok(())
    }

    /// Replaces the passive half of the open record.
    pub(crate) fn revise_passive(&mut self, passive: BoardMove) -> Result<(), HistoryError> {
        self.open_record()?.passive = passive;
        Ok(())
    }

    /// Removes the open record.
    pub(crate) fn drop_passive(&mut self) -> Result<MoveRecord, HistoryError> {
        self.open_record()?;
        self.records.pop().ok_or(HistoryError::Empty)
    }

    /// Completes the open record with its active half.
    pub(crate) fn close(&mut self, active: BoardMove) -> Result<(), HistoryError> {
        self.open_record()?.active = Some(active);
        Ok(())
    }

    fn open_record(&mut self) -> Result<&mut MoveRecord, HistoryError> {
        let record = self.records.last_mut().ok_or(HistoryError::Empty)?;
        if record.active.is_some() {
            return Err(HistoryError::RecordClosed);
        }
        Ok(record)
    }
}
