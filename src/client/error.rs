use thiserror::Error;

/// Failures surfaced by the statistics client.
///
/// `Network` and `Status` are both transport-level failures; `Parse`
/// means the backend answered but the body did not match the expected
/// shape.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {path} failed: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {path}")]
    Status { path: String, status: u16 },

    #[error("could not parse response from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Whether this is a transport failure rather than a shape mismatch.
    pub fn is_network(&self) -> bool {
        !matches!(self, ClientError::Parse { .. })
    }

    /// The request path the failure happened on.
    pub fn path(&self) -> &str {
        match self {
            ClientError::Network { path, .. }
            | ClientError::Status { path, .. }
            | ClientError::Parse { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let status = ClientError::Status {
            path: "/statistic/1".to_string(),
            status: 503,
        };
        assert!(status.is_network());
        assert_eq!(status.path(), "/statistic/1");

        let parse = ClientError::Parse {
            path: "/statistic/1".to_string(),
            source: serde_json::from_str::<i64>("[").unwrap_err(),
        };
        assert!(!parse.is_network());
    }
}
