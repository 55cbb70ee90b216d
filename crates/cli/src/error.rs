use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("console io failed: {0}")]
    Io(#[from] std::io::Error),

    /// Standard input reached end of file while a prompt was waiting.
    #[error("input closed")]
    InputClosed,
}
