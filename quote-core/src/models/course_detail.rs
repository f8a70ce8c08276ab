use serde::{Deserialize, Serialize};

/// Long-form description shown on a course's detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetail {
    pub purpose: String,
    pub content: Vec<String>,
    /// Descriptive schedule, e.g. `"6 months (12 weeks)"`.
    pub schedule: String,
}

impl CourseDetail {
    pub fn new(
        purpose: &str,
        content: &[&str],
        schedule: &str,
    ) -> Self {
        Self {
            purpose: purpose.to_string(),
            content: content.iter().map(|line| line.to_string()).collect(),
            schedule: schedule.to_string(),
        }
    }
}
