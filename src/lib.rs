//! Schedule store and time-resolution core for a personal timetable assistant.
//!
//! This crate is the embedded core behind a weekly course timetable UI:
//! - [`Course`]: one recurring weekly class occurrence
//! - [`ScheduleStore`]: the owned course collection, with validated
//!   add/edit/remove, positional addressing, and a synchronous change
//!   notification per mutation
//! - [`SectionTable`] + [`resolver`]: mapping wall-clock time to an ordinal
//!   class section and from there to the current / next course
//! - [`ScheduleFile`]: versioned, atomic load/save of the course sequence
//!
//! The host owns the store, subscribes to its change notification to redraw,
//! and flushes it through [`ScheduleFile`]. Rendering, menus, and any other UI
//! plumbing stay on the host's side of this boundary.

pub mod course;
pub mod error;
pub mod resolver;
pub mod schedule_file;
pub mod sections;
pub mod store;

pub use course::Course;
pub use error::{TimetableError, TimetableResult};
pub use schedule_file::{ScheduleFile, FORMAT_VERSION};
pub use sections::{Section, SectionSpan, SectionTable};
pub use store::ScheduleStore;
