use anyhow::{Context, Result};
use tabled::{settings::Style, Table, Tabled};

use statfacet_core::models::TimeIdentifier;
use statfacet_core::periods::{TimePeriodQuery, TimePeriodRange};

use crate::cli::RangeArgs;
use crate::output::OutputWriter;

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Label")]
    label: String,
}

pub fn run(args: &RangeArgs, output: &OutputWriter) -> Result<()> {
    let start_code: TimeIdentifier = args
        .start_code
        .parse()
        .with_context(|| format!("Invalid start period code '{}'", args.start_code))?;
    let end_code: TimeIdentifier = args
        .end_code
        .parse()
        .with_context(|| format!("Invalid end period code '{}'", args.end_code))?;

    let query = TimePeriodQuery::new(args.start_year, start_code, args.end_year, end_code);
    let range = TimePeriodRange::expand(&query)?;

    if output.is_json() {
        let periods: Vec<serde_json::Value> = range
            .iter()
            .map(|period| {
                serde_json::json!({
                    "year": period.year,
                    "code": period.code,
                    "label": period.label(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&periods)?);
    } else {
        output.success(format!("{} periods", range.len()));
        let rows: Vec<PeriodRow> = range
            .iter()
            .map(|period| PeriodRow {
                year: period.year.to_string(),
                code: period.code.as_code(),
                label: period.label(),
            })
            .collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
    Ok(())
}
