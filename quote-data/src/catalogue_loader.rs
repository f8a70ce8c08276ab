use std::io::Read;

use quote_core::{Catalogue, CatalogueError, Course, CourseDuration};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when loading a catalogue file.
#[derive(Debug, Error)]
pub enum CatalogueLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid duration '{value}' on row {row} (expected '6 months' or '6 weeks')")]
    InvalidDuration { value: String, row: usize },

    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),
}

impl From<csv::Error> for CatalogueLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogueLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a catalogue CSV file.
///
/// - `id`: unique course id (e.g. `first-aid`)
/// - `title`: display name
/// - `fee`: course fee; an empty cell is read as a missing fee
/// - `duration`: `6 months` / `6 weeks` (or `6-month` / `6-week`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub fee: Option<Decimal>,
    pub duration: String,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for catalogue CSV files.
pub struct CatalogueLoader;

impl CatalogueLoader {
    /// Parse course records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CourseRecord>, CatalogueLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: CourseRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a [`Catalogue`] from parsed records.
    ///
    /// A record with no fee is priced at zero rather than rejected.
    pub fn build(records: Vec<CourseRecord>) -> Result<Catalogue, CatalogueLoaderError> {
        let mut courses = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let row = index + 1;
            let duration = CourseDuration::parse(&record.duration).ok_or_else(|| {
                CatalogueLoaderError::InvalidDuration {
                    value: record.duration.clone(),
                    row,
                }
            })?;

            let fee = record.fee.unwrap_or_else(|| {
                warn!(course_id = %record.id, row, "course has no fee; pricing it at 0");
                Decimal::ZERO
            });

            courses.push(Course::new(record.id, record.title, fee, duration));
        }

        Ok(Catalogue::from_courses(courses)?)
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<Catalogue, CatalogueLoaderError> {
        Self::build(Self::parse(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = "id,title,fee,duration
first-aid,First Aid,1500,6 months
cooking,Cooking,750,6 weeks
";

    #[test]
    fn test_parse_csv_records() {
        let records = CatalogueLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            CourseRecord {
                id: "first-aid".to_string(),
                title: "First Aid".to_string(),
                fee: Some(dec!(1500)),
                duration: "6 months".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_csv_empty_fee_is_none() {
        let csv = "id,title,fee,duration\nsewing,Sewing,,6 months";

        let records = CatalogueLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records[0].fee, None);
    }

    #[test]
    fn test_parse_csv_trims_cells() {
        let csv = "id,title,fee,duration\n cooking , Cooking , 750 , 6 weeks ";

        let records = CatalogueLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records[0].id, "cooking");
        assert_eq!(records[0].fee, Some(dec!(750)));
    }

    #[test]
    fn test_parse_csv_invalid_fee() {
        let csv = "id,title,fee,duration\nsewing,Sewing,lots,6 months";

        let result = CatalogueLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(CatalogueLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_build_missing_fee_is_zero() {
        let csv = "id,title,fee,duration\nsewing,Sewing,,6 months";

        let catalogue = CatalogueLoader::load(csv.as_bytes()).unwrap();

        assert_eq!(catalogue.require("sewing").unwrap().fee, dec!(0));
    }

    #[test]
    fn test_build_parses_durations() {
        let catalogue = CatalogueLoader::load(TEST_CSV.as_bytes()).unwrap();

        assert_eq!(
            catalogue.require("cooking").unwrap().duration,
            CourseDuration::SixWeeks
        );
        assert_eq!(catalogue.group(CourseDuration::SixMonths).count(), 1);
    }

    #[test]
    fn test_build_invalid_duration_reports_row() {
        let csv = "id,title,fee,duration\na,A,1,6 weeks\nb,B,1,fortnight";

        let result = CatalogueLoader::load(csv.as_bytes());

        match result {
            Err(CatalogueLoaderError::InvalidDuration { value, row }) => {
                assert_eq!(value, "fortnight");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidDuration, got {other:?}"),
        }
    }

    #[test]
    fn test_build_duplicate_id() {
        let csv = "id,title,fee,duration\na,A,1,6 weeks\na,A,2,6 weeks";

        let result = CatalogueLoader::load(csv.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogueLoaderError::Catalogue(CatalogueError::DuplicateCourse(id))) if id == "a"
        ));
    }

    #[test]
    fn test_build_fee_above_limit() {
        let csv = "id,title,fee,duration\nbig,Big,79228162514264337593543950335,6 weeks";

        let result = CatalogueLoader::load(csv.as_bytes());

        assert!(matches!(
            result,
            Err(CatalogueLoaderError::Catalogue(CatalogueError::FeeOutOfRange { id, .. })) if id == "big"
        ));
    }
}
