use crate::{serialize::deserialize, traits::EntityKind};
use thiserror::Error as ThisError;

///
/// RawRowError
///

#[derive(Debug, ThisError)]
pub enum RawRowError {
    #[error("row exceeds max size: {len} bytes (limit {MAX_ROW_BYTES})")]
    TooLarge { len: usize },
}

///
/// RowDecodeError
///

#[derive(Debug, ThisError)]
pub enum RowDecodeError {
    #[error("row exceeds max size: {len} bytes (limit {MAX_ROW_BYTES})")]
    TooLarge { len: usize },
    #[error("row failed to deserialize")]
    Deserialize,
}

///
/// RawRow
///

/// Max serialized bytes for a single row to keep value loads bounded.
pub const MAX_ROW_BYTES: u32 = 4 * 1024 * 1024;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawRow(Vec<u8>);

impl RawRow {
    pub fn try_new(bytes: Vec<u8>) -> Result<Self, RawRowError> {
        if bytes.len() > MAX_ROW_BYTES as usize {
            return Err(RawRowError::TooLarge { len: bytes.len() });
        }
        Ok(Self(bytes))
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn try_decode<E: EntityKind>(&self) -> Result<E, RowDecodeError> {
        if self.0.len() > MAX_ROW_BYTES as usize {
            return Err(RowDecodeError::TooLarge { len: self.0.len() });
        }

        deserialize::<E>(&self.0).map_err(|_| RowDecodeError::Deserialize)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{serialize::serialize, test_support::TestRecord};

    #[test]
    fn raw_row_rejects_oversized_payload() {
        let bytes = vec![0u8; MAX_ROW_BYTES as usize + 1];
        let err = RawRow::try_new(bytes).unwrap_err();
        assert!(matches!(err, RawRowError::TooLarge { .. }));
    }

    #[test]
    fn raw_row_roundtrip() {
        let record = TestRecord {
            name: "walnut".to_string(),
            points: 42,
            ..TestRecord::default()
        };
        let bytes = serialize(&record).expect("serialize");
        let raw = RawRow::try_new(bytes).expect("raw row");

        let decoded = raw.try_decode::<TestRecord>().expect("decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn raw_row_rejects_truncated_payload() {
        let record = TestRecord {
            name: "walnut".to_string(),
            ..TestRecord::default()
        };
        let mut bytes = serialize(&record).expect("serialize");
        bytes.truncate(bytes.len().saturating_sub(1));
        let raw = RawRow::try_new(bytes).expect("raw row");

        let err = raw.try_decode::<TestRecord>().unwrap_err();
        assert!(matches!(err, RowDecodeError::Deserialize));
    }
}
