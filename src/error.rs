//! Error types for the cronwork engine

/// Result type alias for cronwork operations
pub type CronResult<T> = std::result::Result<T, CronError>;

/// Main error type for cronwork operations
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CronError {
    /// Structural parse failure: wrong field count, empty token, disallowed character
    #[error("parse error at field {position}: {token:?}: {message}")]
    Parse {
        /// Zero-based field position the error was detected at
        position: usize,
        /// The offending token
        token: String,
        /// Human-readable detail
        message: String,
    },

    /// `setPart`/field access used a position outside 0..4
    #[error("invalid field position {0}: expressions have exactly 5 fields (0..=4)")]
    InvalidField(usize),

    /// A token fails its field's validator
    #[error("invalid value {value:?} for field {position}: {message}")]
    InvalidValue {
        /// Zero-based field position
        position: usize,
        /// The offending token/substring
        value: String,
        /// Human-readable detail
        message: String,
    },

    /// Stepped-range endpoints outside the field's bounds, or decreasing bounds
    #[error(
        "range [{start}, {end}] out of bounds for field {position} (expected [{range_start}, {range_end}])"
    )]
    OutOfRange {
        /// Zero-based field position
        position: usize,
        /// Requested range start
        start: i64,
        /// Requested range end
        end: i64,
        /// Field's valid range start
        range_start: i64,
        /// Field's valid range end
        range_end: i64,
    },

    /// The search loop exhausted its iteration cap without converging
    #[error("search exhausted {max_iterations} iterations without a match")]
    Infeasible {
        /// The configured iteration cap
        max_iterations: u32,
    },

    /// Day-of-week `#` with non-numeric nth, weekday outside 1..7, or nth outside 1..5
    #[error("invalid hash expression {token:?}: {message}")]
    InvalidHash {
        /// The offending `<weekday>#<nth>` token
        token: String,
        /// Human-readable detail citing the offending value
        message: String,
    },

    /// Malformed or unknown IANA timezone name
    #[error("invalid timezone {0:?}")]
    Timezone(String),
}

impl CronError {
    /// Build a [`CronError::Parse`]
    pub fn parse<S: Into<String>>(position: usize, token: S, message: S) -> Self {
        Self::Parse {
            position,
            token: token.into(),
            message: message.into(),
        }
    }

    /// Build a [`CronError::InvalidValue`]
    pub fn invalid_value<S: Into<String>>(position: usize, value: S, message: S) -> Self {
        Self::InvalidValue {
            position,
            value: value.into(),
            message: message.into(),
        }
    }

    /// Build a [`CronError::OutOfRange`]
    pub fn out_of_range(position: usize, start: i64, end: i64, range_start: i64, range_end: i64) -> Self {
        Self::OutOfRange {
            position,
            start,
            end,
            range_start,
            range_end,
        }
    }

    /// Build a [`CronError::InvalidHash`]
    pub fn invalid_hash<S: Into<String>>(token: S, message: S) -> Self {
        Self::InvalidHash {
            token: token.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_offending_value() {
        let err = CronError::invalid_hash("9#2", "weekday 9 is out of range [1, 7]");
        let msg = err.to_string();
        assert!(msg.contains("9#2"));
        assert!(msg.contains("out of range"));
    }

    #[test]
    fn test_infeasible_display() {
        let err = CronError::Infeasible { max_iterations: 1000 };
        assert!(err.to_string().contains("1000"));
    }
}
