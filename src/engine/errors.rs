use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read statement at [{path}]: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("Statement at [{path}] is not a valid export: {source}")]
    MalformedDocument {
        path: String,
        #[source]
        source: serde_json::Error
    },
    #[error("Statement ingestion terminated before the document was fully streamed")]
    IngestionFailed
}

impl LoadError {
    pub fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source
        }
    }

    pub fn malformed_document(path: &str, source: serde_json::Error) -> Self {
        Self::MalformedDocument {
            path: path.to_string(),
            source
        }
    }
}
