use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// What to put in the distance matrix when the routing service cannot answer.
#[derive(Deserialize, Serialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Every distance is zero. This is what downstream optimizers have always received.
    #[default]
    Zero,
    /// Haversine estimate between the points.
    Geometric,
}

impl Display for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FallbackPolicy::Zero => "zero",
                FallbackPolicy::Geometric => "geometric",
            }
        )
    }
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(FallbackPolicy::Zero),
            "geometric" | "haversine" => Ok(FallbackPolicy::Geometric),
            other => Err(format!(
                "Unknown fallback policy '{other}', expected 'zero' or 'geometric'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!("zero".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Zero));
        assert_eq!(" Geometric ".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Geometric));
        assert_eq!("haversine".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Geometric));
        assert!("nearest".parse::<FallbackPolicy>().is_err());
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(FallbackPolicy::default(), FallbackPolicy::Zero);
        assert_eq!(FallbackPolicy::default().to_string(), "zero");
    }
}
