//! The recurring course entity.
//!
//! A `Course` describes one weekly class occurrence: a name, the weekday it
//! falls on, and the inclusive range of class sections it occupies. A class
//! taught on several days is modeled as several `Course` values, one per day.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{TimetableError, TimetableResult};
use crate::sections::Section;

/// One recurring weekly class occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub day_of_week: Weekday,
    /// First section occupied, 1-based.
    pub start_section: Section,
    /// Last section occupied, inclusive, `>= start_section`.
    pub end_section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

impl Course {
    /// Build a course without descriptive fields. Validates structurally.
    pub fn new(
        name: impl Into<String>,
        day_of_week: Weekday,
        start_section: Section,
        end_section: Section,
    ) -> TimetableResult<Self> {
        let course = Course {
            name: name.into(),
            day_of_week,
            start_section,
            end_section,
            location: None,
            instructor: None,
        };
        course.validate()?;
        Ok(course)
    }

    /// Structural validation: non-empty name, 1-based sections, ordered range.
    pub fn validate(&self) -> TimetableResult<()> {
        if self.name.trim().is_empty() {
            return Err(TimetableError::InvalidCourse(
                "course name must not be empty".into(),
            ));
        }
        if self.start_section == 0 {
            return Err(TimetableError::InvalidCourse(format!(
                "'{}': sections are 1-based, got start section 0",
                self.name
            )));
        }
        if self.start_section > self.end_section {
            return Err(TimetableError::InvalidCourse(format!(
                "'{}': start section {} is after end section {}",
                self.name, self.start_section, self.end_section
            )));
        }
        Ok(())
    }

    /// Whether this course's section range contains `section`.
    pub fn occupies(&self, section: Section) -> bool {
        self.start_section <= section && section <= self.end_section
    }

    /// Whether two courses collide: same day, section ranges sharing at least
    /// one section.
    pub fn overlaps(&self, other: &Course) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_section <= other.end_section
            && other.start_section <= self.end_section
    }
}
