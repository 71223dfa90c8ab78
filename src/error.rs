use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("fund API error (status {status}): {body}")]
    FundApi { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("{field} must be a positive finite amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("annual rate must be within 0..=100 percent, got {0}")]
    InvalidRate(f64),

    #[error("step-up must be within 0..=100 percent, got {0}")]
    InvalidStepUp(f64),

    #[error("tax slab must be within 0..=100 percent, got {0}")]
    InvalidSlab(f64),

    #[error("planner.{field} is out of range: {value}")]
    InvalidTaxRule { field: &'static str, value: f64 },

    #[error("years must be within 1..={max}, got {value}")]
    InvalidYears { value: u32, max: u32 },
}
