//! The `{p/s}` star polygon value type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A `{num_points / step_size}` star polygon.
///
/// Equality is structural. Real stars produced by classification always
/// carry the smaller of the two mirror step sizes (`s` and `p - s`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Star {
    /// Number of points on the circle.
    pub num_points: usize,
    /// Connect every `step_size`-th point.
    pub step_size: usize,
}

impl Star {
    /// Sentinel meaning "no recognized star".
    pub const NOT_A_STAR: Star = Star {
        num_points: usize::MAX,
        step_size: usize::MAX,
    };

    /// Create a star from its point count and step size.
    pub const fn new(num_points: usize, step_size: usize) -> Self {
        Self {
            num_points,
            step_size,
        }
    }

    /// Whether this is a real star rather than the sentinel.
    pub fn is_star(&self) -> bool {
        *self != Self::NOT_A_STAR
    }

    /// Parse a whitespace separated sequence of star literals,
    /// e.g. `"{5/2} { 7 / 3 }"`.
    pub fn parse_list(text: &str) -> CoreResult<Vec<Star>> {
        let mut stars = Vec::new();
        let mut rest = text.trim_start();
        while !rest.is_empty() {
            let (star, tail) = Self::parse_prefix(rest)?;
            stars.push(star);
            rest = tail.trim_start();
        }
        Ok(stars)
    }

    /// Parse a star literal at the start of `text`, returning the star and
    /// whatever follows the closing brace.
    pub fn parse_prefix(text: &str) -> CoreResult<(Star, &str)> {
        let invalid = || CoreError::InvalidStar {
            text: text.to_string(),
        };

        let trimmed = text.trim_start();
        if !trimmed.starts_with('{') {
            return Err(invalid());
        }
        let close = trimmed.find('}').ok_or_else(invalid)?;
        let star = trimmed[..=close].parse()?;
        Ok((star, &trimmed[close + 1..]))
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_star() {
            return write!(f, "(not a star)");
        }
        write!(f, "{{ {} / {} }}", self.num_points, self.step_size)
    }
}

impl FromStr for Star {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidStar {
            text: s.to_string(),
        };

        let inner = s
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(invalid)?;
        let (points, step) = inner.split_once('/').ok_or_else(invalid)?;

        let num_points = points.trim().parse().map_err(|_| invalid())?;
        let step_size = step.trim().parse().map_err(|_| invalid())?;
        Ok(Star::new(num_points, step_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_transition_text() {
        assert_eq!(Star::new(5, 2).to_string(), "{ 5 / 2 }");
        assert_eq!(Star::NOT_A_STAR.to_string(), "(not a star)");
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert_eq!("{5/2}".parse::<Star>().unwrap(), Star::new(5, 2));
        assert_eq!("  { 7 /3 } ".parse::<Star>().unwrap(), Star::new(7, 3));
        assert!("5/2".parse::<Star>().is_err());
        assert!("{5 2}".parse::<Star>().is_err());
        assert!("{a/2}".parse::<Star>().is_err());
    }

    #[test]
    fn test_parse_list() {
        let stars = Star::parse_list("{7/2} { 7 / 3 }").unwrap();
        assert_eq!(stars, vec![Star::new(7, 2), Star::new(7, 3)]);
        assert!(Star::parse_list("").unwrap().is_empty());
        assert!(Star::parse_list("{7/2} oops").is_err());
    }

    #[test]
    fn test_parse_prefix_returns_remainder() {
        let (star, rest) = Star::parse_prefix("{ 5 / 2 } Pentagram Done").unwrap();
        assert_eq!(star, Star::new(5, 2));
        assert_eq!(rest.trim(), "Pentagram Done");
    }

    #[test]
    fn test_sentinel_is_not_a_star() {
        assert!(!Star::NOT_A_STAR.is_star());
        assert!(Star::new(2, 1).is_star());
    }
}
