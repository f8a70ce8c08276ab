//! The fixed course catalogue.
//!
//! The standard catalogue holds seven courses split into two duration groups:
//!
//! | Group      | Courses                                          | Fee  |
//! |------------|--------------------------------------------------|------|
//! | 6 months   | First Aid, Sewing, Landscaping, Life Skills      | 1500 |
//! | 6 weeks    | Child Minding, Cooking, Garden Maintenance       | 750  |
//!
//! It is built once per process and handed out as a `&'static` reference.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{Catalogue, CourseDuration};
//!
//! let catalogue = Catalogue::standard();
//!
//! assert_eq!(catalogue.courses().len(), 7);
//! assert_eq!(catalogue.require("first-aid").unwrap().fee, dec!(1500));
//! assert_eq!(catalogue.group(CourseDuration::SixWeeks).count(), 3);
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Course, CourseDetail, CourseDuration};

/// Errors raised while building or querying a catalogue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("unknown course '{0}'")]
    UnknownCourse(String),

    #[error("course '{0}' appears more than once")]
    DuplicateCourse(String),

    #[error("course '{id}' has a negative fee of {fee}")]
    NegativeFee { id: String, fee: Decimal },

    #[error("course '{id}' has a fee of {fee}, above the limit of {}", max_fee())]
    FeeOutOfRange { id: String, fee: Decimal },
}

/// Largest fee a catalogue accepts (10^15 rand). Quotes over any
/// selection of such courses stay well inside `Decimal`'s range.
pub fn max_fee() -> Decimal {
    Decimal::new(1_000_000_000_000_000, 0)
}

#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    courses: Vec<Course>,
    details: HashMap<String, CourseDetail>,
}

static STANDARD: OnceLock<Catalogue> = OnceLock::new();

impl Catalogue {
    /// Returns the built-in catalogue, initialising it on first use.
    pub fn standard() -> &'static Catalogue {
        STANDARD.get_or_init(seed::standard_catalogue)
    }

    /// Builds a catalogue from an arbitrary course list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if:
    /// - two courses share an id
    /// - a course has a negative fee
    /// - a course has a fee above [`max_fee`]
    pub fn from_courses(courses: Vec<Course>) -> Result<Self, CatalogueError> {
        let mut seen = Vec::with_capacity(courses.len());
        for course in &courses {
            if course.fee < Decimal::ZERO {
                return Err(CatalogueError::NegativeFee {
                    id: course.id.clone(),
                    fee: course.fee,
                });
            }
            if course.fee > max_fee() {
                return Err(CatalogueError::FeeOutOfRange {
                    id: course.id.clone(),
                    fee: course.fee,
                });
            }
            if seen.contains(&course.id.as_str()) {
                return Err(CatalogueError::DuplicateCourse(course.id.clone()));
            }
            seen.push(course.id.as_str());
        }

        Ok(Self {
            courses,
            details: HashMap::new(),
        })
    }

    /// Attaches detail records. Details for ids that are not in the
    /// catalogue are dropped.
    pub fn with_details<I>(
        mut self,
        details: I,
    ) -> Self
    where
        I: IntoIterator<Item = (String, CourseDetail)>,
    {
        for (id, detail) in details {
            if self.get(&id).is_some() {
                self.details.insert(id, detail);
            } else {
                tracing::warn!(course_id = %id, "dropping detail for course not in catalogue");
            }
        }
        self
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Like [`Catalogue::get`] but fails with [`CatalogueError::UnknownCourse`].
    pub fn require(
        &self,
        id: &str,
    ) -> Result<&Course, CatalogueError> {
        self.get(id)
            .ok_or_else(|| CatalogueError::UnknownCourse(id.to_string()))
    }

    /// All courses in catalogue order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn group(
        &self,
        duration: CourseDuration,
    ) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(move |c| c.duration == duration)
    }

    pub fn detail(
        &self,
        id: &str,
    ) -> Option<&CourseDetail> {
        self.details.get(id)
    }
}

mod seed {
    use rust_decimal::Decimal;

    use super::Catalogue;
    use crate::models::{Course, CourseDetail, CourseDuration};

    const SIX_MONTH_FEE: i64 = 1500;
    const SIX_WEEK_FEE: i64 = 750;
    const SIX_MONTH_SCHEDULE: &str = "6 months (12 weeks)";
    const SIX_WEEK_SCHEDULE: &str = "6 weeks";

    fn six_month(
        id: &str,
        title: &str,
    ) -> Course {
        Course::new(id, title, Decimal::from(SIX_MONTH_FEE), CourseDuration::SixMonths)
    }

    fn six_week(
        id: &str,
        title: &str,
    ) -> Course {
        Course::new(id, title, Decimal::from(SIX_WEEK_FEE), CourseDuration::SixWeeks)
    }

    fn courses() -> Vec<Course> {
        vec![
            six_month("first-aid", "First Aid"),
            six_month("sewing", "Sewing"),
            six_month("landscaping", "Landscaping"),
            six_month("life-skills", "Life Skills"),
            six_week("child-minding", "Child Minding"),
            six_week("cooking", "Cooking"),
            six_week("garden-maintenance", "Garden Maintenance"),
        ]
    }

    fn details() -> Vec<(String, CourseDetail)> {
        let entries = [
            (
                "first-aid",
                CourseDetail::new(
                    "To provide first aid awareness and basic life support.",
                    &[
                        "Wounds and bleeding",
                        "Burns and fractures",
                        "Emergency scene management",
                        "Cardio-Pulmonary Resuscitation (CPR)",
                        "Respiratory distress e.g., Choking, blocked airway",
                    ],
                    SIX_MONTH_SCHEDULE,
                ),
            ),
            (
                "sewing",
                CourseDetail::new(
                    "To provide alterations and new garment tailoring services",
                    &[
                        "Types of stitches",
                        "Threading a sewing machine",
                        "Sewing buttons, zips, hems and seams",
                        "Alterations",
                        "Designing and sewing new garments",
                    ],
                    SIX_MONTH_SCHEDULE,
                ),
            ),
            (
                "landscaping",
                CourseDetail::new(
                    "To provide landscaping services for new and established gardens",
                    &[
                        "Indigenous and exotic plants and trees",
                        "Fixed structures (fountains, statues, benches, tables, built-in braai)",
                        "Balancing of plants and trees in a garden",
                        "Aesthetics of plant shapes and colours",
                        "Garden layout",
                    ],
                    SIX_MONTH_SCHEDULE,
                ),
            ),
            (
                "life-skills",
                CourseDetail::new(
                    "To provide skills to navigate basic life necessities",
                    &[
                        "Opening a bank account",
                        "Basic labour law (know your rights)",
                        "Basic reading and writing literacy",
                        "Basic numeric literacy",
                    ],
                    SIX_MONTH_SCHEDULE,
                ),
            ),
            (
                "child-minding",
                CourseDetail::new(
                    "To provide basic child and baby care",
                    &[
                        "Birth to six-month old baby needs",
                        "Seven-month to one year old needs",
                        "Toddler needs",
                        "Educational toys",
                    ],
                    SIX_WEEK_SCHEDULE,
                ),
            ),
            (
                "cooking",
                CourseDetail::new(
                    "To prepare and cook nutritious family meals",
                    &[
                        "Nutritional requirements for a healthy body",
                        "Types of protein, carbohydrates and vegetables",
                        "Planning meals",
                        "Tasty and nutritious recipes",
                        "Preparation and cooking of meals",
                    ],
                    SIX_WEEK_SCHEDULE,
                ),
            ),
            (
                "garden-maintenance",
                CourseDetail::new(
                    "To provide basic knowledge of watering, pruning and planting in a domestic garden.",
                    &[
                        "Water restrictions and the watering requirements of indigenous and exotic plants",
                        "Pruning and propagation of plants",
                        "Planting techniques for different plant types",
                    ],
                    SIX_WEEK_SCHEDULE,
                ),
            ),
        ];

        entries
            .into_iter()
            .map(|(id, detail)| (id.to_string(), detail))
            .collect()
    }

    pub(super) fn standard_catalogue() -> Catalogue {
        // Seed ids are distinct and fees non-negative; covered by the tests below.
        Catalogue {
            courses: courses(),
            details: Default::default(),
        }
        .with_details(details())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // standard catalogue tests
    // =========================================================================

    #[test]
    fn standard_catalogue_has_seven_courses_in_seed_order() {
        let ids: Vec<&str> = Catalogue::standard()
            .courses()
            .iter()
            .map(|c| c.id.as_str())
            .collect();

        assert_eq!(
            ids,
            vec![
                "first-aid",
                "sewing",
                "landscaping",
                "life-skills",
                "child-minding",
                "cooking",
                "garden-maintenance",
            ]
        );
    }

    #[test]
    fn six_month_group_is_four_courses_at_1500() {
        let group: Vec<&Course> = Catalogue::standard()
            .group(CourseDuration::SixMonths)
            .collect();

        assert_eq!(group.len(), 4);
        assert!(group.iter().all(|c| c.fee == dec!(1500)));
    }

    #[test]
    fn six_week_group_is_three_courses_at_750() {
        let group: Vec<&Course> = Catalogue::standard()
            .group(CourseDuration::SixWeeks)
            .collect();

        assert_eq!(group.len(), 3);
        assert!(group.iter().all(|c| c.fee == dec!(750)));
    }

    #[test]
    fn every_standard_course_has_detail() {
        let catalogue = Catalogue::standard();

        for course in catalogue.courses() {
            assert!(
                catalogue.detail(&course.id).is_some(),
                "missing detail for {}",
                course.id
            );
        }
    }

    #[test]
    fn detail_carries_schedule_and_content() {
        let detail = Catalogue::standard().detail("first-aid").unwrap();

        assert_eq!(detail.schedule, "6 months (12 weeks)");
        assert_eq!(detail.content.len(), 5);
    }

    #[test]
    fn standard_courses_pass_catalogue_checks() {
        let courses = Catalogue::standard().courses().to_vec();

        assert!(Catalogue::from_courses(courses).is_ok());
    }

    #[test]
    fn standard_returns_same_instance() {
        assert!(std::ptr::eq(Catalogue::standard(), Catalogue::standard()));
    }

    // =========================================================================
    // lookup tests
    // =========================================================================

    #[test]
    fn require_reports_unknown_course() {
        let result = Catalogue::standard().require("pottery");

        assert_eq!(
            result,
            Err(CatalogueError::UnknownCourse("pottery".to_string()))
        );
    }

    #[test]
    fn detail_is_none_for_unknown_course() {
        assert!(Catalogue::standard().detail("pottery").is_none());
    }

    // =========================================================================
    // from_courses tests
    // =========================================================================

    #[test]
    fn from_courses_rejects_duplicate_ids() {
        let courses = vec![
            Course::new("a", "A", dec!(10), CourseDuration::SixWeeks),
            Course::new("a", "A again", dec!(20), CourseDuration::SixWeeks),
        ];

        let result = Catalogue::from_courses(courses);

        assert_eq!(
            result.err(),
            Some(CatalogueError::DuplicateCourse("a".to_string()))
        );
    }

    #[test]
    fn from_courses_rejects_negative_fee() {
        let courses = vec![Course::new("a", "A", dec!(-1), CourseDuration::SixWeeks)];

        let result = Catalogue::from_courses(courses);

        assert_eq!(
            result.err(),
            Some(CatalogueError::NegativeFee {
                id: "a".to_string(),
                fee: dec!(-1),
            })
        );
    }

    #[test]
    fn from_courses_rejects_fee_above_limit() {
        let courses = vec![Course::new("big", "Big", Decimal::MAX, CourseDuration::SixWeeks)];

        let result = Catalogue::from_courses(courses);

        assert_eq!(
            result.err(),
            Some(CatalogueError::FeeOutOfRange {
                id: "big".to_string(),
                fee: Decimal::MAX,
            })
        );
    }

    #[test]
    fn from_courses_accepts_fee_at_limit() {
        let courses = vec![Course::new("top", "Top", max_fee(), CourseDuration::SixMonths)];

        let catalogue = Catalogue::from_courses(courses).unwrap();

        assert_eq!(catalogue.require("top").unwrap().fee, max_fee());
    }

    #[test]
    fn with_details_drops_unknown_ids() {
        let catalogue = Catalogue::from_courses(vec![Course::new(
            "a",
            "A",
            dec!(10),
            CourseDuration::SixWeeks,
        )])
        .unwrap()
        .with_details(vec![
            ("a".to_string(), CourseDetail::new("p", &["x"], "6 weeks")),
            ("b".to_string(), CourseDetail::new("q", &["y"], "6 weeks")),
        ]);

        assert!(catalogue.detail("a").is_some());
        assert!(catalogue.detail("b").is_none());
    }
}
