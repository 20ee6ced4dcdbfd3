use std::fmt;

/// Errors raised when a search is set up with malformed input.
///
/// Not finding a route is never an error; searches report it as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The search radius is zero, negative or not finite.
    InvalidRange(f64),
    /// A movement cost is negative or not finite.
    InvalidCost { name: &'static str, value: f64 },
    /// A block distance bound is not positive (or negative, for drops).
    InvalidDistance { name: &'static str, value: i32 },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange(r) => write!(f, "search range must be positive and finite, got {r}"),
            Self::InvalidCost { name, value } => {
                write!(f, "pathing option `{name}` must be a finite non-negative cost, got {value}")
            }
            Self::InvalidDistance { name, value } => {
                write!(f, "distance bound `{name}` is out of range: {value}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_option() {
        let e = SearchError::InvalidCost {
            name: "swim_cost",
            value: -1.0,
        };
        assert!(e.to_string().contains("swim_cost"));
        assert!(SearchError::InvalidRange(0.0).to_string().contains("got 0"));
    }
}
