//! Stateless resolution from wall-clock time to the current / next course.
//!
//! Both queries read a borrowed course snapshot and never take ownership; the
//! store delegates here with its live sequence. A miss (break, free period,
//! nothing later today) is `None`, not an error.

use chrono::{NaiveTime, Weekday};

use crate::course::Course;
use crate::sections::SectionTable;

/// The course on `day` occupying the section that contains `time`, if any.
///
/// Panics if two courses claim the same section: the store's overlap invariant
/// was violated out-of-band, and a loud fault beats a silently wrong schedule.
pub fn current_course<'a>(
    table: &SectionTable,
    day: Weekday,
    time: NaiveTime,
    courses: &'a [Course],
) -> Option<&'a Course> {
    let section = table.section_for_time(time)?;

    let mut hit: Option<&Course> = None;
    for course in courses.iter().filter(|c| c.day_of_week == day) {
        if course.occupies(section) {
            if let Some(first) = hit {
                panic!(
                    "schedule invariant violated: '{}' and '{}' both occupy section {} on {}",
                    first.name, course.name, section, day
                );
            }
            hit = Some(course);
        }
    }
    hit
}

/// The earliest course on `day` starting strictly after the current or
/// just-passed section, or the day's first course when `time` precedes the
/// whole grid. `None` when the rest of the day is free.
pub fn next_course<'a>(
    table: &SectionTable,
    day: Weekday,
    time: NaiveTime,
    courses: &'a [Course],
) -> Option<&'a Course> {
    let reference = table.section_at_or_before(time);

    let mut day_courses: Vec<&Course> =
        courses.iter().filter(|c| c.day_of_week == day).collect();
    // Stable sort: equal start sections keep insertion order.
    day_courses.sort_by_key(|c| c.start_section);

    day_courses
        .into_iter()
        .find(|c| reference.map_or(true, |section| c.start_section > section))
}
