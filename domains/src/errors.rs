use thiserror::Error;

/// The only kind of failure a caller placing an order can see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {

    /// A required field was absent, null or blank. Holds the field name as
    /// the caller sent it.
    #[error("Your request body is missing the field: {0}")]
    MissingField(&'static str),

}
