use serde::{Deserialize, Serialize};

use crate::catalogue::{Catalogue, CatalogueError};
use crate::models::{Course, CourseDuration};

/// The courses a user has picked, keyed by course id.
///
/// Insertion order is kept for display, but a course id can only appear once:
/// inserting the same course twice never double-counts its fee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    courses: Vec<Course>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from course ids looked up in `catalogue`.
    ///
    /// Repeated ids collapse into one entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::UnknownCourse`] for the first id that is not
    /// in the catalogue.
    pub fn from_ids<I, S>(
        catalogue: &Catalogue,
        ids: I,
    ) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.insert(catalogue.require(id.as_ref())?.clone());
        }
        Ok(selection)
    }

    /// Adds a course. Returns `false` if a course with the same id was
    /// already selected.
    pub fn insert(
        &mut self,
        course: Course,
    ) -> bool {
        if self.contains(&course.id) {
            return false;
        }
        self.courses.push(course);
        true
    }

    /// Removes the course with `id`, returning it if it was selected.
    pub fn remove(
        &mut self,
        id: &str,
    ) -> Option<Course> {
        let index = self.courses.iter().position(|c| c.id == id)?;
        Some(self.courses.remove(index))
    }

    /// Selects `course` if absent, deselects it otherwise. Returns whether
    /// the course is selected afterwards.
    pub fn toggle(
        &mut self,
        course: &Course,
    ) -> bool {
        if self.remove(&course.id).is_some() {
            false
        } else {
            self.courses.push(course.clone());
            true
        }
    }

    /// Selects every catalogue course of the given duration group.
    /// Returns the number of newly added courses.
    pub fn extend_group(
        &mut self,
        catalogue: &Catalogue,
        duration: CourseDuration,
    ) -> usize {
        catalogue
            .group(duration)
            .filter(|course| self.insert((*course).clone()))
            .count()
    }

    pub fn contains(
        &self,
        id: &str,
    ) -> bool {
        self.courses.iter().any(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    pub fn ids(&self) -> Vec<String> {
        self.courses.iter().map(|c| c.id.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}
