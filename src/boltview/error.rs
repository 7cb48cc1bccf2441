use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoltError {
    #[error("Parse error on line {line:?}: {reason}")]
    Parse { line: String, reason: String },

    #[error("bucket has entry, should delete entry first: {0}")]
    BucketNotEmpty(String),

    #[error("bucket exists: {0}")]
    BucketExists(String),

    #[error("key exists: {bucket} => {key}")]
    KeyExists { bucket: String, key: String },

    #[error("key not found: {bucket} => {key}")]
    KeyNotFound { bucket: String, key: String },

    #[error("failed to open bolt")]
    OpenFailed,

    #[error("argument {what} length error: {got}")]
    Arity { what: &'static str, got: usize },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Store error: {0}")]
    Store(#[from] redb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Host error: {0}")]
    Host(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl BoltError {
    pub fn parse(line: &str, reason: impl Into<String>) -> Self {
        BoltError::Parse {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

// redb reports each phase of a transaction with its own error type; they all
// fold into `redb::Error`.
macro_rules! store_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for BoltError {
                fn from(e: $ty) -> Self {
                    BoltError::Store(e.into())
                }
            }
        )*
    };
}

store_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

pub type Result<T> = std::result::Result<T, BoltError>;
