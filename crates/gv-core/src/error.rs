use thiserror::Error;

pub type GvResult<T> = Result<T, GvError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GvError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Domain error: {what}")]
    Domain { what: String },

    #[error("Model error: {what}")]
    Model { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
