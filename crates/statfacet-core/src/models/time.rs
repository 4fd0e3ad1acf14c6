//! Time period identifiers and the yearly cycles they belong to.
//!
//! Every identifier belongs to exactly one family - a fixed-length,
//! chronologically ordered cycle of the periods that make up one year
//! under one calendaring convention. Family membership and position are
//! fixed here at compile time and never inferred from input.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::StatfacetError;

/// Quarter within a yearly cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Zero-based position within the cycle
    pub fn index(self) -> u32 {
        self as u32
    }

    /// One-based quarter number
    pub fn number(self) -> u32 {
        self.index() + 1
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn from_number(number: u32) -> Option<Self> {
        number.checked_sub(1).and_then(Self::from_index)
    }
}

/// Calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthOfYear {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl MonthOfYear {
    pub const ALL: [MonthOfYear; 12] = [
        MonthOfYear::January,
        MonthOfYear::February,
        MonthOfYear::March,
        MonthOfYear::April,
        MonthOfYear::May,
        MonthOfYear::June,
        MonthOfYear::July,
        MonthOfYear::August,
        MonthOfYear::September,
        MonthOfYear::October,
        MonthOfYear::November,
        MonthOfYear::December,
    ];

    /// Zero-based position within the year
    pub fn index(self) -> u32 {
        self as u32
    }

    /// One-based month number
    pub fn number(self) -> u32 {
        self.index() + 1
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn from_number(number: u32) -> Option<Self> {
        number.checked_sub(1).and_then(Self::from_index)
    }

    pub fn name(self) -> &'static str {
        match self {
            MonthOfYear::January => "January",
            MonthOfYear::February => "February",
            MonthOfYear::March => "March",
            MonthOfYear::April => "April",
            MonthOfYear::May => "May",
            MonthOfYear::June => "June",
            MonthOfYear::July => "July",
            MonthOfYear::August => "August",
            MonthOfYear::September => "September",
            MonthOfYear::October => "October",
            MonthOfYear::November => "November",
            MonthOfYear::December => "December",
        }
    }
}

/// Week number, 1 to 52. Leap-week years (week 53) are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekNumber(u8);

impl WeekNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 52;

    pub fn new(number: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&number).then_some(Self(number))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// School term period within an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermPeriod {
    Autumn,
    AutumnSpring,
    Spring,
    Summer,
}

impl TermPeriod {
    pub const ALL: [TermPeriod; 4] = [
        TermPeriod::Autumn,
        TermPeriod::AutumnSpring,
        TermPeriod::Spring,
        TermPeriod::Summer,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Half of a financial year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YearHalf {
    /// April to September
    PartOne,
    /// October to March
    PartTwo,
}

impl YearHalf {
    pub const ALL: [YearHalf; 2] = [YearHalf::PartOne, YearHalf::PartTwo];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// A discrete time period identifier.
///
/// Serialized as its compact wire code ("AY", "CYQ1", "M9", "W51",
/// "T1T2", "P2", ...), the form callers submit in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeIdentifier {
    CalendarYear,
    AcademicYear,
    FinancialYear,
    TaxYear,
    ReportingYear,
    CalendarQuarter(Quarter),
    AcademicQuarter(Quarter),
    FinancialQuarter(Quarter),
    TaxQuarter(Quarter),
    Month(MonthOfYear),
    Week(WeekNumber),
    Term(TermPeriod),
    FinancialYearPart(YearHalf),
}

impl TimeIdentifier {
    /// The family this identifier belongs to. Total and exhaustive.
    pub fn family(self) -> TimePeriodFamily {
        match self {
            TimeIdentifier::CalendarYear => TimePeriodFamily::CalendarYear,
            TimeIdentifier::AcademicYear => TimePeriodFamily::AcademicYear,
            TimeIdentifier::FinancialYear => TimePeriodFamily::FinancialYear,
            TimeIdentifier::TaxYear => TimePeriodFamily::TaxYear,
            TimeIdentifier::ReportingYear => TimePeriodFamily::ReportingYear,
            TimeIdentifier::CalendarQuarter(_) => TimePeriodFamily::CalendarQuarters,
            TimeIdentifier::AcademicQuarter(_) => TimePeriodFamily::AcademicQuarters,
            TimeIdentifier::FinancialQuarter(_) => TimePeriodFamily::FinancialQuarters,
            TimeIdentifier::TaxQuarter(_) => TimePeriodFamily::TaxQuarters,
            TimeIdentifier::Month(_) => TimePeriodFamily::Months,
            TimeIdentifier::Week(_) => TimePeriodFamily::Weeks,
            TimeIdentifier::Term(_) => TimePeriodFamily::Terms,
            TimeIdentifier::FinancialYearPart(_) => TimePeriodFamily::FinancialYearParts,
        }
    }

    /// Zero-based chronological position within the family's cycle
    pub fn position(self) -> u32 {
        match self {
            TimeIdentifier::CalendarYear
            | TimeIdentifier::AcademicYear
            | TimeIdentifier::FinancialYear
            | TimeIdentifier::TaxYear
            | TimeIdentifier::ReportingYear => 0,
            TimeIdentifier::CalendarQuarter(quarter)
            | TimeIdentifier::AcademicQuarter(quarter)
            | TimeIdentifier::FinancialQuarter(quarter)
            | TimeIdentifier::TaxQuarter(quarter) => quarter.index(),
            TimeIdentifier::Month(month) => month.index(),
            TimeIdentifier::Week(week) => u32::from(week.get()) - 1,
            TimeIdentifier::Term(term) => term.index(),
            TimeIdentifier::FinancialYearPart(half) => half.index(),
        }
    }

    /// Compact wire code, e.g. "AY", "CYQ1", "M9", "W51", "T1T2", "P2"
    pub fn as_code(self) -> String {
        match self {
            TimeIdentifier::CalendarYear => "CY".to_string(),
            TimeIdentifier::AcademicYear => "AY".to_string(),
            TimeIdentifier::FinancialYear => "FY".to_string(),
            TimeIdentifier::TaxYear => "TY".to_string(),
            TimeIdentifier::ReportingYear => "RY".to_string(),
            TimeIdentifier::CalendarQuarter(quarter) => format!("CYQ{}", quarter.number()),
            TimeIdentifier::AcademicQuarter(quarter) => format!("AYQ{}", quarter.number()),
            TimeIdentifier::FinancialQuarter(quarter) => format!("FYQ{}", quarter.number()),
            TimeIdentifier::TaxQuarter(quarter) => format!("TYQ{}", quarter.number()),
            TimeIdentifier::Month(month) => format!("M{}", month.number()),
            TimeIdentifier::Week(week) => format!("W{}", week.get()),
            TimeIdentifier::Term(TermPeriod::Autumn) => "T1".to_string(),
            TimeIdentifier::Term(TermPeriod::AutumnSpring) => "T1T2".to_string(),
            TimeIdentifier::Term(TermPeriod::Spring) => "T2".to_string(),
            TimeIdentifier::Term(TermPeriod::Summer) => "T3".to_string(),
            TimeIdentifier::FinancialYearPart(YearHalf::PartOne) => "P1".to_string(),
            TimeIdentifier::FinancialYearPart(YearHalf::PartTwo) => "P2".to_string(),
        }
    }

    /// Human-readable label for the identifier alone
    pub fn label(self) -> String {
        match self {
            TimeIdentifier::CalendarYear => "Calendar year".to_string(),
            TimeIdentifier::AcademicYear => "Academic year".to_string(),
            TimeIdentifier::FinancialYear => "Financial year".to_string(),
            TimeIdentifier::TaxYear => "Tax year".to_string(),
            TimeIdentifier::ReportingYear => "Reporting year".to_string(),
            TimeIdentifier::CalendarQuarter(quarter)
            | TimeIdentifier::AcademicQuarter(quarter)
            | TimeIdentifier::FinancialQuarter(quarter)
            | TimeIdentifier::TaxQuarter(quarter) => format!("Q{}", quarter.number()),
            TimeIdentifier::Month(month) => month.name().to_string(),
            TimeIdentifier::Week(week) => format!("Week {}", week.get()),
            TimeIdentifier::Term(TermPeriod::Autumn) => "Autumn term".to_string(),
            TimeIdentifier::Term(TermPeriod::AutumnSpring) => {
                "Autumn and spring term".to_string()
            }
            TimeIdentifier::Term(TermPeriod::Spring) => "Spring term".to_string(),
            TimeIdentifier::Term(TermPeriod::Summer) => "Summer term".to_string(),
            TimeIdentifier::FinancialYearPart(YearHalf::PartOne) => {
                "Part 1 (April to September)".to_string()
            }
            TimeIdentifier::FinancialYearPart(YearHalf::PartTwo) => {
                "Part 2 (October to March)".to_string()
            }
        }
    }

    /// Every identifier across every family, in family then cycle order
    pub fn all() -> Vec<TimeIdentifier> {
        TimePeriodFamily::ALL
            .iter()
            .flat_map(|family| family.cycle())
            .collect()
    }
}

impl fmt::Display for TimeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_code())
    }
}

impl FromStr for TimeIdentifier {
    type Err = StatfacetError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let unknown = || StatfacetError::UnknownTimeIdentifier { code: code.to_string() };

        let identifier = match code {
            "CY" => TimeIdentifier::CalendarYear,
            "AY" => TimeIdentifier::AcademicYear,
            "FY" => TimeIdentifier::FinancialYear,
            "TY" => TimeIdentifier::TaxYear,
            "RY" => TimeIdentifier::ReportingYear,
            "T1" => TimeIdentifier::Term(TermPeriod::Autumn),
            "T1T2" => TimeIdentifier::Term(TermPeriod::AutumnSpring),
            "T2" => TimeIdentifier::Term(TermPeriod::Spring),
            "T3" => TimeIdentifier::Term(TermPeriod::Summer),
            "P1" => TimeIdentifier::FinancialYearPart(YearHalf::PartOne),
            "P2" => TimeIdentifier::FinancialYearPart(YearHalf::PartTwo),
            _ => {
                if let Some(digit) = code.strip_prefix("CYQ") {
                    let number = digit.parse().map_err(|_| unknown())?;
                    TimeIdentifier::CalendarQuarter(Quarter::from_number(number).ok_or_else(unknown)?)
                } else if let Some(digit) = code.strip_prefix("AYQ") {
                    let number = digit.parse().map_err(|_| unknown())?;
                    TimeIdentifier::AcademicQuarter(Quarter::from_number(number).ok_or_else(unknown)?)
                } else if let Some(digit) = code.strip_prefix("FYQ") {
                    let number = digit.parse().map_err(|_| unknown())?;
                    TimeIdentifier::FinancialQuarter(Quarter::from_number(number).ok_or_else(unknown)?)
                } else if let Some(digit) = code.strip_prefix("TYQ") {
                    let number = digit.parse().map_err(|_| unknown())?;
                    TimeIdentifier::TaxQuarter(Quarter::from_number(number).ok_or_else(unknown)?)
                } else if let Some(digits) = code.strip_prefix('M') {
                    let number = digits.parse().map_err(|_| unknown())?;
                    TimeIdentifier::Month(MonthOfYear::from_number(number).ok_or_else(unknown)?)
                } else if let Some(digits) = code.strip_prefix('W') {
                    let number = digits.parse().map_err(|_| unknown())?;
                    TimeIdentifier::Week(WeekNumber::new(number).ok_or_else(unknown)?)
                } else {
                    return Err(unknown());
                }
            }
        };
        Ok(identifier)
    }
}

impl Serialize for TimeIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_code())
    }
}

impl<'de> Deserialize<'de> for TimeIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(|err: StatfacetError| D::Error::custom(err.to_string()))
    }
}

/// The fixed-length, chronologically ordered cycle of identifiers that
/// make up one year under one calendaring convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePeriodFamily {
    CalendarYear,
    AcademicYear,
    FinancialYear,
    TaxYear,
    ReportingYear,
    CalendarQuarters,
    AcademicQuarters,
    FinancialQuarters,
    TaxQuarters,
    Months,
    Weeks,
    Terms,
    FinancialYearParts,
}

impl TimePeriodFamily {
    pub const ALL: [TimePeriodFamily; 13] = [
        TimePeriodFamily::CalendarYear,
        TimePeriodFamily::AcademicYear,
        TimePeriodFamily::FinancialYear,
        TimePeriodFamily::TaxYear,
        TimePeriodFamily::ReportingYear,
        TimePeriodFamily::CalendarQuarters,
        TimePeriodFamily::AcademicQuarters,
        TimePeriodFamily::FinancialQuarters,
        TimePeriodFamily::TaxQuarters,
        TimePeriodFamily::Months,
        TimePeriodFamily::Weeks,
        TimePeriodFamily::Terms,
        TimePeriodFamily::FinancialYearParts,
    ];

    /// Number of periods in one year of this family's cycle
    pub fn cycle_len(self) -> u32 {
        match self {
            TimePeriodFamily::CalendarYear
            | TimePeriodFamily::AcademicYear
            | TimePeriodFamily::FinancialYear
            | TimePeriodFamily::TaxYear
            | TimePeriodFamily::ReportingYear => 1,
            TimePeriodFamily::CalendarQuarters
            | TimePeriodFamily::AcademicQuarters
            | TimePeriodFamily::FinancialQuarters
            | TimePeriodFamily::TaxQuarters
            | TimePeriodFamily::Terms => 4,
            TimePeriodFamily::Months => 12,
            TimePeriodFamily::Weeks => 52,
            TimePeriodFamily::FinancialYearParts => 2,
        }
    }

    /// The identifier at a given position within the cycle, or None
    /// when the position is outside `0..cycle_len()`
    pub fn identifier_at(self, position: u32) -> Option<TimeIdentifier> {
        match self {
            TimePeriodFamily::CalendarYear => {
                (position == 0).then_some(TimeIdentifier::CalendarYear)
            }
            TimePeriodFamily::AcademicYear => {
                (position == 0).then_some(TimeIdentifier::AcademicYear)
            }
            TimePeriodFamily::FinancialYear => {
                (position == 0).then_some(TimeIdentifier::FinancialYear)
            }
            TimePeriodFamily::TaxYear => (position == 0).then_some(TimeIdentifier::TaxYear),
            TimePeriodFamily::ReportingYear => {
                (position == 0).then_some(TimeIdentifier::ReportingYear)
            }
            TimePeriodFamily::CalendarQuarters => {
                Quarter::from_index(position).map(TimeIdentifier::CalendarQuarter)
            }
            TimePeriodFamily::AcademicQuarters => {
                Quarter::from_index(position).map(TimeIdentifier::AcademicQuarter)
            }
            TimePeriodFamily::FinancialQuarters => {
                Quarter::from_index(position).map(TimeIdentifier::FinancialQuarter)
            }
            TimePeriodFamily::TaxQuarters => {
                Quarter::from_index(position).map(TimeIdentifier::TaxQuarter)
            }
            TimePeriodFamily::Months => {
                MonthOfYear::from_index(position).map(TimeIdentifier::Month)
            }
            TimePeriodFamily::Weeks => u8::try_from(position + 1)
                .ok()
                .and_then(WeekNumber::new)
                .map(TimeIdentifier::Week),
            TimePeriodFamily::Terms => TermPeriod::from_index(position).map(TimeIdentifier::Term),
            TimePeriodFamily::FinancialYearParts => {
                YearHalf::from_index(position).map(TimeIdentifier::FinancialYearPart)
            }
        }
    }

    /// The full cycle, in chronological order
    pub fn cycle(self) -> Vec<TimeIdentifier> {
        (0..self.cycle_len())
            .filter_map(|position| self.identifier_at(position))
            .collect()
    }

    /// Whether years in this family span two calendar years and render
    /// as "2019/20" rather than "2019"
    pub fn uses_fiscal_year(self) -> bool {
        match self {
            TimePeriodFamily::CalendarYear
            | TimePeriodFamily::CalendarQuarters
            | TimePeriodFamily::Months
            | TimePeriodFamily::Weeks => false,
            TimePeriodFamily::AcademicYear
            | TimePeriodFamily::FinancialYear
            | TimePeriodFamily::TaxYear
            | TimePeriodFamily::ReportingYear
            | TimePeriodFamily::AcademicQuarters
            | TimePeriodFamily::FinancialQuarters
            | TimePeriodFamily::TaxQuarters
            | TimePeriodFamily::Terms
            | TimePeriodFamily::FinancialYearParts => true,
        }
    }
}

/// The atomic output unit of range expansion: one discrete period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimePeriod {
    pub year: i32,
    pub code: TimeIdentifier,
}

impl TimePeriod {
    pub fn new(year: i32, code: TimeIdentifier) -> Self {
        Self { year, code }
    }

    /// The year as displayed for this period's family, e.g. "2019" or "2019/20"
    pub fn year_label(&self) -> String {
        if self.code.family().uses_fiscal_year() {
            format!("{}/{:02}", self.year, (self.year + 1).rem_euclid(100))
        } else {
            self.year.to_string()
        }
    }

    /// Human-readable label, e.g. "2019 Week 51" or "2019/20 Autumn term"
    pub fn label(&self) -> String {
        if self.code.family().cycle_len() == 1 {
            self.year_label()
        } else {
            format!("{} {}", self.year_label(), self.code.label())
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_identifier_round_trips_through_its_code() {
        for identifier in TimeIdentifier::all() {
            let code = identifier.as_code();
            assert_eq!(code.parse::<TimeIdentifier>().unwrap(), identifier, "{code}");
        }
    }

    #[test]
    fn test_position_and_identifier_at_agree() {
        for identifier in TimeIdentifier::all() {
            let family = identifier.family();
            assert_eq!(family.identifier_at(identifier.position()), Some(identifier));
        }
    }

    #[test]
    fn test_cycle_lengths() {
        assert_eq!(TimePeriodFamily::CalendarYear.cycle_len(), 1);
        assert_eq!(TimePeriodFamily::AcademicQuarters.cycle_len(), 4);
        assert_eq!(TimePeriodFamily::Months.cycle_len(), 12);
        assert_eq!(TimePeriodFamily::Weeks.cycle_len(), 52);
        assert_eq!(TimePeriodFamily::Terms.cycle_len(), 4);
        assert_eq!(TimePeriodFamily::FinancialYearParts.cycle_len(), 2);
    }

    #[test]
    fn test_cycle_matches_len_and_order() {
        for family in TimePeriodFamily::ALL {
            let cycle = family.cycle();
            assert_eq!(cycle.len() as u32, family.cycle_len());
            for (index, identifier) in cycle.iter().enumerate() {
                assert_eq!(identifier.position(), index as u32);
                assert_eq!(identifier.family(), family);
            }
        }
    }

    #[test]
    fn test_identifier_at_rejects_out_of_cycle_positions() {
        for family in TimePeriodFamily::ALL {
            assert_eq!(family.identifier_at(family.cycle_len()), None);
        }
    }

    #[test]
    fn test_week_53_is_rejected() {
        assert!(WeekNumber::new(53).is_none());
        assert!("W53".parse::<TimeIdentifier>().is_err());
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        for code in ["", "XY", "Q1", "M0", "M13", "W0", "T4", "P3", "CYQ5", "AYQ0", "Mx"] {
            assert!(code.parse::<TimeIdentifier>().is_err(), "{code}");
        }
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let identifier = TimeIdentifier::AcademicQuarter(Quarter::Q2);
        let json = serde_json::to_string(&identifier).unwrap();
        assert_eq!(json, "\"AYQ2\"");
        let parsed: TimeIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identifier);
    }

    #[test]
    fn test_period_labels() {
        let calendar = TimePeriod::new(2019, TimeIdentifier::CalendarYear);
        assert_eq!(calendar.label(), "2019");

        let academic = TimePeriod::new(2019, TimeIdentifier::AcademicYear);
        assert_eq!(academic.label(), "2019/20");

        let term = TimePeriod::new(2019, TimeIdentifier::Term(TermPeriod::Autumn));
        assert_eq!(term.label(), "2019/20 Autumn term");

        let week = TimePeriod::new(2019, TimeIdentifier::Week(WeekNumber::new(51).unwrap()));
        assert_eq!(week.label(), "2019 Week 51");

        let month = TimePeriod::new(2020, TimeIdentifier::Month(MonthOfYear::May));
        assert_eq!(month.label(), "2020 May");
    }

    #[test]
    fn test_fiscal_year_label_wraps_century() {
        let academic = TimePeriod::new(1999, TimeIdentifier::AcademicYear);
        assert_eq!(academic.label(), "1999/00");
    }

    #[test]
    fn test_all_identifier_count() {
        // 5 whole-year + 4 quarter families of 4 + 12 months + 52 weeks
        // + 4 terms + 2 parts
        assert_eq!(TimeIdentifier::all().len(), 5 + 16 + 12 + 52 + 4 + 2);
    }
}
