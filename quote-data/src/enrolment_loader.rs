use std::io::Read;

use quote_core::validation::ContactDetails;
use quote_core::{Catalogue, Selection};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading enrolment requests.
#[derive(Debug, Error)]
pub enum EnrolmentLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown course '{id}' on row {row}")]
    UnknownCourse { id: String, row: usize },
}

impl From<csv::Error> for EnrolmentLoaderError {
    fn from(err: csv::Error) -> Self {
        EnrolmentLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of an enrolment CSV file.
///
/// `courses` holds course ids separated by `;`, e.g. `first-aid;sewing`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EnrolmentRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub courses: String,
}

impl EnrolmentRecord {
    /// The non-empty course ids listed in this row.
    pub fn course_ids(&self) -> impl Iterator<Item = &str> {
        self.courses
            .split(';')
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// An enrolment row resolved against a catalogue.
///
/// Contact details are carried as given; they are validated when the
/// request is submitted, so one bad row does not stop a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrolmentRequest {
    pub row: usize,
    pub contact: ContactDetails,
    pub selection: Selection,
}

/// Loader for enrolment CSV files.
pub struct EnrolmentLoader;

impl EnrolmentLoader {
    /// Parse enrolment records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<EnrolmentRecord>, EnrolmentLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: EnrolmentRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Resolve course ids in each record to courses in `catalogue`.
    ///
    /// Rows are numbered from 1, not counting the header.
    pub fn resolve(
        records: Vec<EnrolmentRecord>,
        catalogue: &Catalogue,
    ) -> Result<Vec<EnrolmentRequest>, EnrolmentLoaderError> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Self::resolve_row(record, index + 1, catalogue))
            .collect()
    }

    /// Parse and resolve in one step.
    pub fn load<R: Read>(
        reader: R,
        catalogue: &Catalogue,
    ) -> Result<Vec<EnrolmentRequest>, EnrolmentLoaderError> {
        Self::resolve(Self::parse(reader)?, catalogue)
    }

    fn resolve_row(
        record: EnrolmentRecord,
        row: usize,
        catalogue: &Catalogue,
    ) -> Result<EnrolmentRequest, EnrolmentLoaderError> {
        let mut selection = Selection::new();
        for id in record.course_ids() {
            let course = catalogue
                .get(id)
                .ok_or_else(|| EnrolmentLoaderError::UnknownCourse {
                    id: id.to_string(),
                    row,
                })?;
            selection.insert(course.clone());
        }

        debug!(row, courses = selection.len(), "resolved enrolment row");

        Ok(EnrolmentRequest {
            row,
            contact: ContactDetails::new(record.name, record.email, record.phone),
            selection,
        })
    }
}
