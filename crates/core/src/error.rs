use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Statement(#[from] StatementError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum MappingError {
    #[error("property handler for type `{type_name}` already exists; pass force to replace it")]
    AlreadyExists { type_name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StatementError {
    #[error("{statement} on `{table}` requires at least one field")]
    EmptyFields {
        statement: &'static str,
        table: String,
    },
    #[error("{statement} on `{table}` requires at least one qualifier field")]
    EmptyQualifiers {
        statement: &'static str,
        table: String,
    },
    #[error("qualifier `{qualifier}` is not part of the fields of `{table}`")]
    UnknownQualifier { qualifier: String, table: String },
    #[error("{statement} on `{table}` has no updatable field left after excluding where fields")]
    NoUpdatableFields {
        statement: &'static str,
        table: String,
    },
    #[error("batch size for `{table}` must be greater than zero")]
    InvalidBatchSize { table: String },
}

impl Error {
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Statement(_) => "statement",
        }
    }
}
