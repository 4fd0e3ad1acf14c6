pub mod location;
pub mod option_tree;
pub mod time;

pub use location::{GeographicLevel, LocationAttribute, LocationId, LocationRow};
pub use option_tree::LocationOptionNode;
pub use time::{
    MonthOfYear, Quarter, TermPeriod, TimeIdentifier, TimePeriod, TimePeriodFamily, WeekNumber,
    YearHalf,
};
