//! Expansion of start/end time period queries into the discrete,
//! ordered periods they span.
//!
//! Each family's cycle is linearized onto an integer ordinal,
//! `year * cycle_len + position`, so that walking the inclusive ordinal
//! interval yields every period in chronological order with year
//! rollover falling out of the arithmetic (Week 52 of 2019 is followed
//! by Week 1 of 2020).

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatfacetError};
use crate::models::time::{TimeIdentifier, TimePeriod, TimePeriodFamily};

/// Earliest year accepted in a query. The bounds are deliberately
/// generous; they exist to reject obviously corrupt input, not to
/// constrain real publication data.
pub const MIN_YEAR: i32 = 1000;

/// Latest year accepted in a query
pub const MAX_YEAR: i32 = 9999;

/// A start/end period specification as supplied by a caller.
///
/// Years are optional here because callers submit them as free-form
/// query input; validation happens in [`TimePeriodRange::expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriodQuery {
    pub start_year: Option<i32>,
    pub start_code: TimeIdentifier,
    pub end_year: Option<i32>,
    pub end_code: TimeIdentifier,
}

impl TimePeriodQuery {
    /// Create a fully specified query
    pub fn new(
        start_year: i32,
        start_code: TimeIdentifier,
        end_year: i32,
        end_code: TimeIdentifier,
    ) -> Self {
        Self {
            start_year: Some(start_year),
            start_code,
            end_year: Some(end_year),
            end_code,
        }
    }
}

/// The validated expansion of a query: a lazy, finite, restartable
/// sequence of periods.
///
/// Iteration never consumes the range; it can be walked any number of
/// times and holds no external resource or mutable cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePeriodRange {
    family: TimePeriodFamily,
    start_ordinal: i64,
    end_ordinal: i64,
}

impl TimePeriodRange {
    /// Validate a query and produce the range of periods it denotes.
    ///
    /// Checks run in order: both years present, both years within
    /// `MIN_YEAR..=MAX_YEAR`, both codes in the same family, and start
    /// not after end. Each failure maps to its own error variant.
    pub fn expand(query: &TimePeriodQuery) -> Result<Self> {
        let (Some(start_year), Some(end_year)) = (query.start_year, query.end_year) else {
            return Err(StatfacetError::MissingYear);
        };

        for year in [start_year, end_year] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(StatfacetError::YearOutOfRange {
                    year,
                    min: MIN_YEAR,
                    max: MAX_YEAR,
                });
            }
        }

        let family = query.start_code.family();
        if query.end_code.family() != family {
            return Err(StatfacetError::MismatchedPeriodFamily {
                start: query.start_code,
                end: query.end_code,
            });
        }

        let cycle_len = i64::from(family.cycle_len());
        let start_ordinal = i64::from(start_year) * cycle_len + i64::from(query.start_code.position());
        let end_ordinal = i64::from(end_year) * cycle_len + i64::from(query.end_code.position());

        if start_ordinal > end_ordinal {
            return Err(StatfacetError::InvalidRange {
                start_year,
                start: query.start_code,
                end_year,
                end: query.end_code,
            });
        }

        Ok(Self { family, start_ordinal, end_ordinal })
    }

    /// The family every period in the range belongs to
    pub fn family(&self) -> TimePeriodFamily {
        self.family
    }

    /// Number of periods in the range, always at least one
    pub fn len(&self) -> usize {
        (self.end_ordinal - self.start_ordinal + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the periods in chronological order
    pub fn iter(&self) -> TimePeriodIter {
        TimePeriodIter {
            family: self.family,
            next_ordinal: self.start_ordinal,
            end_ordinal: self.end_ordinal,
        }
    }
}

impl IntoIterator for &TimePeriodRange {
    type Item = TimePeriod;
    type IntoIter = TimePeriodIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for TimePeriodRange {
    type Item = TimePeriod;
    type IntoIter = TimePeriodIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the periods of a [`TimePeriodRange`]
#[derive(Debug, Clone)]
pub struct TimePeriodIter {
    family: TimePeriodFamily,
    next_ordinal: i64,
    end_ordinal: i64,
}

impl Iterator for TimePeriodIter {
    type Item = TimePeriod;

    fn next(&mut self) -> Option<TimePeriod> {
        if self.next_ordinal > self.end_ordinal {
            return None;
        }
        let cycle_len = i64::from(self.family.cycle_len());
        let year = self.next_ordinal.div_euclid(cycle_len) as i32;
        let position = self.next_ordinal.rem_euclid(cycle_len) as u32;
        let code = self.family.identifier_at(position)?;
        self.next_ordinal += 1;
        Some(TimePeriod::new(year, code))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end_ordinal - self.next_ordinal + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TimePeriodIter {}

impl std::iter::FusedIterator for TimePeriodIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::{MonthOfYear, Quarter, WeekNumber};

    fn week(number: u8) -> TimeIdentifier {
        TimeIdentifier::Week(WeekNumber::new(number).unwrap())
    }

    #[test]
    fn test_week_range_rolls_over_year_boundary() {
        let query = TimePeriodQuery::new(2019, week(51), 2020, week(2));
        let range = TimePeriodRange::expand(&query).unwrap();

        let periods: Vec<TimePeriod> = range.iter().collect();
        assert_eq!(
            periods,
            vec![
                TimePeriod::new(2019, week(51)),
                TimePeriod::new(2019, week(52)),
                TimePeriod::new(2020, week(1)),
                TimePeriod::new(2020, week(2)),
            ]
        );
    }

    #[test]
    fn test_single_period_range() {
        let query = TimePeriodQuery::new(
            2018,
            TimeIdentifier::AcademicYear,
            2018,
            TimeIdentifier::AcademicYear,
        );
        let range = TimePeriodRange::expand(&query).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(
            range.iter().collect::<Vec<_>>(),
            vec![TimePeriod::new(2018, TimeIdentifier::AcademicYear)]
        );
    }

    #[test]
    fn test_range_is_restartable() {
        let query = TimePeriodQuery::new(
            2018,
            TimeIdentifier::Month(MonthOfYear::November),
            2019,
            TimeIdentifier::Month(MonthOfYear::February),
        );
        let range = TimePeriodRange::expand(&query).unwrap();

        let first_pass: Vec<TimePeriod> = range.iter().collect();
        let second_pass: Vec<TimePeriod> = range.iter().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 4);
    }

    #[test]
    fn test_iterator_is_exact_size() {
        let query = TimePeriodQuery::new(
            2010,
            TimeIdentifier::CalendarQuarter(Quarter::Q3),
            2012,
            TimeIdentifier::CalendarQuarter(Quarter::Q1),
        );
        let range = TimePeriodRange::expand(&query).unwrap();
        let mut iter = range.iter();

        assert_eq!(iter.len(), 7);
        iter.next();
        assert_eq!(iter.len(), 6);
    }

    #[test]
    fn test_missing_year_rejected() {
        let query = TimePeriodQuery {
            start_year: None,
            start_code: TimeIdentifier::CalendarYear,
            end_year: Some(2020),
            end_code: TimeIdentifier::CalendarYear,
        };
        assert!(matches!(
            TimePeriodRange::expand(&query),
            Err(StatfacetError::MissingYear)
        ));
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        let query = TimePeriodQuery::new(
            12345,
            TimeIdentifier::CalendarYear,
            12346,
            TimeIdentifier::CalendarYear,
        );
        assert!(matches!(
            TimePeriodRange::expand(&query),
            Err(StatfacetError::YearOutOfRange { year: 12345, .. })
        ));
    }

    #[test]
    fn test_mismatched_family_rejected() {
        let query = TimePeriodQuery::new(
            2018,
            TimeIdentifier::CalendarQuarter(Quarter::Q1),
            2019,
            TimeIdentifier::AcademicYear,
        );
        assert!(matches!(
            TimePeriodRange::expand(&query),
            Err(StatfacetError::MismatchedPeriodFamily { .. })
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let query = TimePeriodQuery::new(
            2020,
            TimeIdentifier::FinancialYear,
            2019,
            TimeIdentifier::FinancialYear,
        );
        assert!(matches!(
            TimePeriodRange::expand(&query),
            Err(StatfacetError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_inverted_position_within_year_rejected() {
        let query = TimePeriodQuery::new(
            2019,
            TimeIdentifier::CalendarQuarter(Quarter::Q3),
            2019,
            TimeIdentifier::CalendarQuarter(Quarter::Q1),
        );
        assert!(matches!(
            TimePeriodRange::expand(&query),
            Err(StatfacetError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_missing_year_reported_before_family_mismatch() {
        // Validation order: years are checked before family membership
        let query = TimePeriodQuery {
            start_year: None,
            start_code: TimeIdentifier::CalendarYear,
            end_year: Some(2020),
            end_code: TimeIdentifier::AcademicYear,
        };
        assert!(matches!(
            TimePeriodRange::expand(&query),
            Err(StatfacetError::MissingYear)
        ));
    }
}
