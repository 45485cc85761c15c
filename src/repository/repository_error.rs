/// Failure reported by a marketplace or quote-request store.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store rejected or failed a read or write.
    #[error("Database Error: {0}")]
    Database(String),

    /// The store could not be reached or refused our credentials.
    #[error("Connection Error: {0}")]
    Connection(String),

    /// A stored document did not match the expected shape.
    #[error("Serialization Error: {0}")]
    Serialization(String),

    /// Any other driver failure, kept whole for its source chain.
    #[error("Driver Error: {0}")]
    Driver(#[source] mongodb::error::Error),
}

impl RepositoryError {
    pub fn database<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Database(msg.into())
    }

    pub fn connection<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Connection(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Serialization(msg.into())
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::Write(_) | ErrorKind::InvalidArgument { .. } => {
                RepositoryError::Database(err.to_string())
            }
            ErrorKind::Authentication { .. } => {
                RepositoryError::Connection(format!("authentication failed: {}", err))
            }
            ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } => {
                RepositoryError::Connection(err.to_string())
            }
            ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
                RepositoryError::Serialization(err.to_string())
            }
            _ => RepositoryError::Driver(err),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_render_their_kind() {
        assert_eq!(
            RepositoryError::database("write rejected").to_string(),
            "Database Error: write rejected"
        );
        assert_eq!(
            RepositoryError::connection("store unavailable").to_string(),
            "Connection Error: store unavailable"
        );
        assert!(RepositoryError::serialization("bad category")
            .to_string()
            .starts_with("Serialization Error"));
    }
}
