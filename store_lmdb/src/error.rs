use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("key not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("unsupported schema version {found} (this build supports {supported})")]
    SchemaVersion { found: u32, supported: u32 },

    #[error("io error: {0}")]
    Io(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<std::io::Error> for LmdbError {
    fn from(e: std::io::Error) -> Self {
        LmdbError::Io(e.to_string())
    }
}

impl From<LmdbError> for dnsdao_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::Serialization(msg) => dnsdao_store::StoreError::Serialization(msg),
            LmdbError::NotFound(msg) => dnsdao_store::StoreError::NotFound(msg),
            other => dnsdao_store::StoreError::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsdao_store::StoreError;

    #[test]
    fn lmdb_errors_map_onto_store_errors() {
        assert_eq!(
            StoreError::from(LmdbError::NotFound("params".into())),
            StoreError::NotFound("params".into())
        );
        assert_eq!(
            StoreError::from(LmdbError::Serialization("bad".into())),
            StoreError::Serialization("bad".into())
        );
        match StoreError::from(LmdbError::SchemaVersion { found: 9, supported: 1 }) {
            StoreError::Backend(msg) => assert!(msg.contains("schema version 9")),
            other => panic!("expected Backend, got {other:?}"),
        }
    }
}
