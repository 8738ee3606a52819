use crate::db::store::MAX_ROW_BYTES;
use serde::{Serialize, de::DeserializeOwned};
use serde_cbor::{from_slice, to_vec};
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error as ThisError;

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("deserialize error: {0}")]
    Deserialize(String),
}

/// Serialize a value into CBOR bytes.
pub fn serialize<T>(ty: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    to_vec(ty).map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Deserialize a value produced by [`serialize`].
///
/// Safety guarantees:
/// - Input size is bounded before decode.
/// - Any panic during decode is caught and reported as a deserialize error.
/// - No panic escapes this function.
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > MAX_ROW_BYTES as usize {
        return Err(SerializeError::Deserialize(
            "payload exceeds maximum allowed size".into(),
        ));
    }

    let result = catch_unwind(AssertUnwindSafe(|| from_slice(bytes)));

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(SerializeError::Deserialize(err.to_string())),
        Err(_) => Err(SerializeError::Deserialize(
            "panic during CBOR deserialization".into(),
        )),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq, Serialize)]
    struct Payload {
        label: String,
        count: u32,
    }

    #[test]
    fn roundtrip_preserves_payload() {
        let payload = Payload {
            label: "alpha".into(),
            count: 7,
        };

        let bytes = serialize(&payload).expect("serialize");
        let decoded: Payload = deserialize(&bytes).expect("deserialize");

        assert_eq!(decoded, payload);
    }

    #[test]
    fn deserialize_rejects_oversized_input() {
        let bytes = vec![0u8; MAX_ROW_BYTES as usize + 1];
        let err = deserialize::<Payload>(&bytes).unwrap_err();
        assert!(matches!(err, SerializeError::Deserialize(_)));
    }

    #[test]
    fn deserialize_reports_malformed_input() {
        let err = deserialize::<Payload>(&[0xFF, 0x00, 0x17]).unwrap_err();
        assert!(matches!(err, SerializeError::Deserialize(_)));
    }
}
