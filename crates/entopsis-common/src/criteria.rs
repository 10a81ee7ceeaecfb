//! Criterion selection: which columns take part in a run and which way each
//! one should be optimised.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RankError;

/// Optimisation direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    /// Larger raw values are better.
    Maximize,
    /// Smaller raw values are better (costs, distances, risks).
    Minimize,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Maximize => "max",
            Direction::Minimize => "min",
        }
    }
}

impl FromStr for Direction {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "maximize" | "maximise" | "1" | "+1" | "benefit" | "极大化" => {
                Ok(Direction::Maximize)
            }
            "min" | "minimize" | "minimise" | "-1" | "cost" | "极小化" => Ok(Direction::Minimize),
            _ => Err(RankError::InvalidDirection { token: s.to_string() }),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = RankError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        d.as_str().to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selected column and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub column: String,
    #[serde(default = "default_direction")]
    pub direction: Direction,
}

fn default_direction() -> Direction { Direction::Maximize }

impl CriterionSpec {
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self { column: column.into(), direction }
    }

    pub fn maximize(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Maximize)
    }

    pub fn minimize(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Minimize)
    }
}

/// Parses `column:direction`. A bare `column` is maximised.
/// The split is on the last `:` so column names may contain colons.
impl FromStr for CriterionSpec {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((column, direction)) => Ok(Self::new(column.trim(), direction.parse()?)),
            None => Ok(Self::maximize(s.trim())),
        }
    }
}

impl fmt::Display for CriterionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tokens() {
        assert_eq!("MAX".parse::<Direction>().unwrap(), Direction::Maximize);
        assert_eq!("-1".parse::<Direction>().unwrap(), Direction::Minimize);
        assert_eq!("极小化".parse::<Direction>().unwrap(), Direction::Minimize);
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(RankError::InvalidDirection { token: "sideways".into() })
        );
    }

    #[test]
    fn test_criterion_parse() {
        let c: CriterionSpec = "beds:max".parse().unwrap();
        assert_eq!(c, CriterionSpec::maximize("beds"));
        let c: CriterionSpec = "travel:time:min".parse().unwrap();
        assert_eq!(c, CriterionSpec::minimize("travel:time"));
        let c: CriterionSpec = "staff".parse().unwrap();
        assert_eq!(c.direction, Direction::Maximize);
        assert!("cost:up".parse::<CriterionSpec>().is_err());
    }

    #[test]
    fn test_direction_serde() {
        let c: CriterionSpec = serde_json::from_str(r#"{"column":"cost","direction":"minimize"}"#).unwrap();
        assert_eq!(c.direction, Direction::Minimize);
        assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"column":"cost","direction":"min"}"#);
        assert!(serde_json::from_str::<CriterionSpec>(r#"{"column":"cost","direction":"up"}"#).is_err());
    }
}
