/// Failure to map host input onto a [`Direction`](crate::Direction).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectionError {
    #[error("unknown direction {0:?}; expected up, down, left, right or w, s, a, d")]
    Unknown(String),
    #[error("invalid direction code {0}; must be 0-3 (Up, Down, Left, Right)")]
    Code(u8),
}
