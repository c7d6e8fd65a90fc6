use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("'{value}' is not a valid {field}")]
    InvalidChoice { field: &'static str, value: String },
}
