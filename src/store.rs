//! The schedule store: the owned, ordered collection of courses.
//!
//! The store is host-owned (constructed by whatever composes the application,
//! passed by reference, never a global) and single-threaded: mutators take
//! `&mut self`, so Rust's ownership rules enforce the single-writer model.
//!
//! Addressing is positional: `add` returns the index the course landed at, and
//! `remove` shifts every later entry down by one. Indices are live positions,
//! not permanent IDs: a cached index must be re-resolved after any removal.

use chrono::{Datelike, Local, NaiveTime, Weekday};

use crate::course::Course;
use crate::error::{TimetableError, TimetableResult};
use crate::resolver;
use crate::sections::SectionTable;

/// Zero-argument change listener, fired once per successful mutation.
///
/// Listeners are `Fn`, not `FnMut`, and receive no store reference: a listener
/// cannot re-enter a mutator, so reentrant mutation is unrepresentable.
type ChangeListener = Box<dyn Fn()>;

/// Ordered collection of courses with overlap checking, positional
/// addressing, and synchronous change notification.
#[derive(Default)]
pub struct ScheduleStore {
    courses: Vec<Course>,
    listeners: Vec<ChangeListener>,
    dirty: bool,
}

impl std::fmt::Debug for ScheduleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleStore")
            .field("courses", &self.courses)
            .field("listeners", &self.listeners.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk construction, replaying the same validation as `add`. Used by the
    /// persistence gateway so a bad record never yields a half-filled store.
    pub fn from_courses(courses: Vec<Course>) -> TimetableResult<Self> {
        let mut store = Self::new();
        for course in courses {
            store.insert_checked(course, None)?;
        }
        store.dirty = false;
        Ok(store)
    }

    /// Add a course. Returns the index it was assigned.
    ///
    /// Rejects structurally invalid courses and any course whose section range
    /// collides with an existing entry on the same day; on rejection the store
    /// is unchanged and no notification fires.
    pub fn add(&mut self, course: Course) -> TimetableResult<usize> {
        let index = self.insert_checked(course, None)?;
        self.touch();
        Ok(index)
    }

    /// Replace the course at `index` wholesale. The index stays valid.
    ///
    /// Validation matches `add`, except the slot being replaced is excluded
    /// from the overlap scan, so editing an entry to its current value (or
    /// shifting it within its own footprint) succeeds.
    pub fn edit(&mut self, index: usize, course: Course) -> TimetableResult<()> {
        if index >= self.courses.len() {
            return Err(TimetableError::NotFound(index));
        }
        course.validate()?;
        self.check_overlap(&course, Some(index))?;
        self.courses[index] = course;
        self.touch();
        Ok(())
    }

    /// Remove and return the course at `index`.
    ///
    /// Every entry after `index` shifts down by one position.
    pub fn remove(&mut self, index: usize) -> TimetableResult<Course> {
        if index >= self.courses.len() {
            return Err(TimetableError::NotFound(index));
        }
        let removed = self.courses.remove(index);
        log::debug!("removed course '{}' at index {index}", removed.name);
        self.touch();
        Ok(removed)
    }

    /// That day's courses, ordered by start section ascending. Snapshot at
    /// call time; references die at the next mutation.
    pub fn courses_by_day(&self, day: Weekday) -> Vec<&Course> {
        let mut day_courses: Vec<&Course> = self
            .courses
            .iter()
            .filter(|c| c.day_of_week == day)
            .collect();
        day_courses.sort_by_key(|c| c.start_section);
        day_courses
    }

    /// Read-only view of the full sequence in insertion order.
    pub fn all_courses(&self) -> &[Course] {
        &self.courses
    }

    /// The course occupying the section containing `time` on `day`, if any.
    pub fn current_course(
        &self,
        table: &SectionTable,
        day: Weekday,
        time: NaiveTime,
    ) -> Option<&Course> {
        resolver::current_course(table, day, time, &self.courses)
    }

    /// The earliest course on `day` later than the current or just-passed
    /// section, if any.
    pub fn next_course(
        &self,
        table: &SectionTable,
        day: Weekday,
        time: NaiveTime,
    ) -> Option<&Course> {
        resolver::next_course(table, day, time, &self.courses)
    }

    /// `current_course` against the local wall clock.
    pub fn current_course_now(&self, table: &SectionTable) -> Option<&Course> {
        let now = Local::now();
        self.current_course(table, now.weekday(), now.time())
    }

    /// `next_course` against the local wall clock.
    pub fn next_course_now(&self, table: &SectionTable) -> Option<&Course> {
        let now = Local::now();
        self.next_course(table, now.weekday(), now.time())
    }

    /// Register a change listener. Fired synchronously, exactly once per
    /// successful `add`/`edit`/`remove`, after the state change.
    pub fn on_change(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Whether mutations have happened since the last `mark_saved`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the current state has been flushed to storage.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Validate and append, skipping `exclude` in the overlap scan.
    fn insert_checked(
        &mut self,
        course: Course,
        exclude: Option<usize>,
    ) -> TimetableResult<usize> {
        course.validate()?;
        self.check_overlap(&course, exclude)?;
        self.courses.push(course);
        Ok(self.courses.len() - 1)
    }

    fn check_overlap(&self, course: &Course, exclude: Option<usize>) -> TimetableResult<()> {
        for (i, existing) in self.courses.iter().enumerate() {
            if Some(i) == exclude {
                continue;
            }
            if course.overlaps(existing) {
                return Err(TimetableError::Overlap {
                    day: course.day_of_week,
                    new: course.name.clone(),
                    existing: existing.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.dirty = true;
        for listener in &self.listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn course(name: &str, day: Weekday, start: u8, end: u8) -> Course {
        Course::new(name, day, start, end).unwrap()
    }

    fn counted(store: &mut ScheduleStore) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let hook = Rc::clone(&count);
        store.on_change(move || hook.set(hook.get() + 1));
        count
    }

    #[test]
    fn test_add_assigns_sequential_indices() {
        let mut store = ScheduleStore::new();
        assert_eq!(store.add(course("A", Weekday::Mon, 1, 2)).unwrap(), 0);
        assert_eq!(store.add(course("B", Weekday::Mon, 3, 4)).unwrap(), 1);
        assert_eq!(store.add(course("C", Weekday::Tue, 1, 2)).unwrap(), 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_rejects_overlap_and_leaves_store_unchanged() {
        let mut store = ScheduleStore::new();
        store.add(course("A", Weekday::Mon, 1, 2)).unwrap();
        let notifications = counted(&mut store);

        let err = store.add(course("B", Weekday::Mon, 2, 3)).unwrap_err();
        assert!(matches!(err, TimetableError::Overlap { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.all_courses()[0].name, "A");
        // Failed validation never notifies.
        assert_eq!(notifications.get(), 0);

        // Same sections on another day are fine.
        assert!(store.add(course("B", Weekday::Tue, 2, 3)).is_ok());
        assert_eq!(notifications.get(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_course() {
        let mut store = ScheduleStore::new();
        let bad = Course {
            name: String::new(),
            day_of_week: Weekday::Mon,
            start_section: 1,
            end_section: 2,
            location: None,
            instructor: None,
        };
        assert!(matches!(
            store.add(bad),
            Err(TimetableError::InvalidCourse(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_replaces_in_place_and_excludes_own_slot() {
        let mut store = ScheduleStore::new();
        store.add(course("A", Weekday::Mon, 1, 2)).unwrap();
        store.add(course("B", Weekday::Mon, 3, 4)).unwrap();

        // Growing within the slot's own footprint is allowed.
        store.edit(0, course("A", Weekday::Mon, 1, 1)).unwrap();
        assert_eq!(store.all_courses()[0].end_section, 1);

        // Colliding with the *other* entry is not.
        let err = store.edit(0, course("A", Weekday::Mon, 1, 3)).unwrap_err();
        assert!(matches!(err, TimetableError::Overlap { .. }));

        assert!(matches!(
            store.edit(9, course("X", Weekday::Fri, 1, 1)),
            Err(TimetableError::NotFound(9))
        ));
    }

    #[test]
    fn test_edit_to_same_value_notifies_exactly_once() {
        let mut store = ScheduleStore::new();
        store.add(course("A", Weekday::Mon, 1, 2)).unwrap();
        let before: Vec<Course> = store.all_courses().to_vec();
        let notifications = counted(&mut store);

        store.edit(0, course("A", Weekday::Mon, 1, 2)).unwrap();

        assert_eq!(store.all_courses(), before.as_slice());
        assert_eq!(notifications.get(), 1);
    }

    #[test]
    fn test_remove_shifts_later_indices_down() {
        let mut store = ScheduleStore::new();
        store.add(course("A", Weekday::Mon, 1, 2)).unwrap();
        store.add(course("B", Weekday::Tue, 1, 2)).unwrap();
        store.add(course("C", Weekday::Wed, 1, 2)).unwrap();

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.name, "B");
        // The entry previously at index 2 is now at index 1.
        assert_eq!(store.all_courses()[1].name, "C");
        assert_eq!(store.len(), 2);

        assert!(matches!(store.remove(5), Err(TimetableError::NotFound(5))));
    }

    #[test]
    fn test_add_then_remove_restores_prior_sequence() {
        let mut store = ScheduleStore::new();
        store.add(course("A", Weekday::Mon, 1, 2)).unwrap();
        store.add(course("B", Weekday::Tue, 1, 2)).unwrap();
        let before: Vec<Course> = store.all_courses().to_vec();

        let index = store.add(course("C", Weekday::Wed, 1, 2)).unwrap();
        store.remove(index).unwrap();

        assert_eq!(store.all_courses(), before.as_slice());
    }

    #[test]
    fn test_courses_by_day_sorted_by_start_section() {
        let mut store = ScheduleStore::new();
        store.add(course("Late", Weekday::Mon, 5, 6)).unwrap();
        store.add(course("Early", Weekday::Mon, 1, 2)).unwrap();
        store.add(course("Other", Weekday::Tue, 1, 2)).unwrap();

        let monday: Vec<&str> = store
            .courses_by_day(Weekday::Mon)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(monday, vec!["Early", "Late"]);
        assert!(store.courses_by_day(Weekday::Sun).is_empty());
    }

    #[test]
    fn test_current_and_next_delegate_to_resolver() {
        let table = SectionTable::default();
        let mut store = ScheduleStore::new();
        store.add(course("Calculus", Weekday::Mon, 1, 2)).unwrap();
        store.add(course("Physics", Weekday::Mon, 3, 4)).unwrap();

        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

        let current = store.current_course(&table, Weekday::Mon, at(8, 20));
        assert_eq!(current.map(|c| c.name.as_str()), Some("Calculus"));

        let next = store.next_course(&table, Weekday::Mon, at(8, 20));
        assert_eq!(next.map(|c| c.name.as_str()), Some("Physics"));

        assert!(store.current_course(&table, Weekday::Mon, at(12, 0)).is_none());
        assert!(store.next_course(&table, Weekday::Mon, at(17, 0)).is_none());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut store = ScheduleStore::new();
        assert!(!store.is_dirty());

        store.add(course("A", Weekday::Mon, 1, 2)).unwrap();
        assert!(store.is_dirty());

        store.mark_saved();
        assert!(!store.is_dirty());

        // Rejected mutations do not dirty the store.
        let _ = store.add(course("B", Weekday::Mon, 1, 2));
        assert!(!store.is_dirty());

        store.remove(0).unwrap();
        assert!(store.is_dirty());
    }

    #[test]
    fn test_from_courses_rejects_overlapping_records() {
        let ok = ScheduleStore::from_courses(vec![
            course("A", Weekday::Mon, 1, 2),
            course("B", Weekday::Mon, 3, 4),
        ])
        .unwrap();
        assert_eq!(ok.len(), 2);
        assert!(!ok.is_dirty());

        let err = ScheduleStore::from_courses(vec![
            course("A", Weekday::Mon, 1, 2),
            course("B", Weekday::Mon, 2, 3),
        ]);
        assert!(matches!(err, Err(TimetableError::Overlap { .. })));
    }

    #[test]
    fn test_every_mutation_notifies_once() {
        let mut store = ScheduleStore::new();
        let notifications = counted(&mut store);

        store.add(course("A", Weekday::Mon, 1, 2)).unwrap();
        assert_eq!(notifications.get(), 1);

        store.edit(0, course("A2", Weekday::Mon, 1, 2)).unwrap();
        assert_eq!(notifications.get(), 2);

        store.remove(0).unwrap();
        assert_eq!(notifications.get(), 3);
    }
}
