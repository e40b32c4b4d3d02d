use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChimeError {
    #[error("title is required")]
    TitleRequired,

    #[error("body is required")]
    BodyRequired,

    #[error("recurrence rule is required")]
    RuleRequired,

    #[error("invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("notification delivery failed: {0}")]
    Delivery(String),

    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, ChimeError>;
