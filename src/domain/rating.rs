//! Star ratings and their aggregation

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A 1-5 star rating. Constructing one is the only place the range is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(DomainError::validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )))
        }
    }
}

/// Ratings arrive as raw JSON so a wrong type is a validation outcome of
/// the service, not a body rejection. Whole floats such as `4.0` are accepted.
impl TryFrom<&serde_json::Value> for Rating {
    type Error = DomainError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let whole = value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        });
        match whole {
            Some(n) => Rating::try_from(n),
            None => Err(DomainError::validation(format!(
                "Rating must be a whole number between {} and {}",
                MIN_RATING, MAX_RATING
            ))),
        }
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arithmetic mean rounded to one decimal place; `0.0` when there are no ratings.
pub fn average_rating<I>(ratings: I) -> f64
where
    I: IntoIterator<Item = Rating>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), r| (sum + u64::from(r.0), count + 1));

    if count == 0 {
        return 0.0;
    }

    let mean = sum as f64 / count as f64;
    (mean * 10.0).round() / 10.0
}
