// 🗓️ Semester - one term's enrollment
//
// Courses are kept in enrollment order and a course id appears at most once.
// Credits are always summed on demand so the total can never go stale.

use super::course::Course;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum credits for a full-time term
pub const FULL_TIME_CREDITS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemesterStatus {
    Added,
    AlreadyAdded,
    Dropped,
    NoSuchCourse,
}

impl SemesterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemesterStatus::Added => "Course added",
            SemesterStatus::AlreadyAdded => "Course already added",
            SemesterStatus::Dropped => "Course dropped",
            SemesterStatus::NoSuchCourse => "No such course",
        }
    }
}

impl fmt::Display for SemesterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    courses: Vec<Course>,
}

impl Semester {
    pub fn new() -> Self {
        Semester::default()
    }

    pub fn add_course(&mut self, course: Course) -> SemesterStatus {
        if self.contains(course.id()) {
            return SemesterStatus::AlreadyAdded;
        }
        self.courses.push(course);
        SemesterStatus::Added
    }

    pub fn drop_course(&mut self, course: &Course) -> SemesterStatus {
        match self.remove(course.id()) {
            Some(_) => SemesterStatus::Dropped,
            None => SemesterStatus::NoSuchCourse,
        }
    }

    /// Remove a course by id, handing it back to the caller
    pub fn remove(&mut self, id: &str) -> Option<Course> {
        let index = self.courses.iter().position(|c| c.id() == id)?;
        Some(self.courses.remove(index))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.courses.iter().any(|c| c.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    /// Courses in enrollment order
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn total_credits(&self) -> u32 {
        self.courses.iter().map(Course::credits).sum()
    }

    pub fn is_full_time(&self) -> bool {
        self.total_credits() >= FULL_TIME_CREDITS
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.courses.is_empty() {
            return f.write_str("No courses");
        }
        let ids: Vec<&str> = self.courses.iter().map(Course::id).collect();
        f.write_str(&ids.join("; "))
    }
}
