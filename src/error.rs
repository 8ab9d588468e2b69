use thiserror::Error;

#[derive(Error, Debug)]
pub enum MahjongError {
    #[error("Malformed Input: {0}")]
    MalformedInput(String),

    #[error("Illegal Hand Size: {}", describe_size(.actual, .expected))]
    IllegalHandSize { actual: usize, expected: usize },

    #[error("Invalid Declared Win: {0}")]
    InvalidDeclaredWin(String),

    #[error("Unresolvable Wildcard: {0}")]
    UnresolvableWildcard(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

fn describe_size(actual: &usize, expected: &usize) -> String {
    let (actual, expected) = (*actual, *expected);
    if actual > expected {
        format!(
            "{} tiles, expected {} ({} too many)",
            actual,
            expected,
            actual - expected
        )
    } else {
        format!(
            "{} tiles, expected {} ({} short)",
            actual,
            expected,
            expected - actual
        )
    }
}

pub type MjResult<T> = Result<T, MahjongError>;
