// 📚 Course + Catalog
//
// A Course is an immutable value identified by its id: two courses with the
// same id are the same course no matter what name or credits they carry.
// The Catalog maps id → Course, and its key always equals the course id.

use crate::error::{RecordsError, Result};
use crate::parser::{parse_catalog, parse_catalog_str};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// COURSE ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    id: String,
    name: String,
    credits: u32,
}

impl Course {
    pub fn new(id: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Course {
            id: id.into(),
            name: name.into(),
            credits,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.id, self.credits, self.name)
    }
}

// ============================================================================
// CATALOG STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogStatus {
    Added,
    AlreadyAdded,
    Removed,
    NotFound,
}

impl CatalogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogStatus::Added => "Course added successfully",
            CatalogStatus::AlreadyAdded => "Course already added",
            CatalogStatus::Removed => "Course removed successfully",
            CatalogStatus::NotFound => "Course not found",
        }
    }
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Records inserted as new courses
    pub added: usize,

    /// Well-formed records whose id was already present
    pub duplicates: usize,

    /// Malformed records dropped by the parser
    pub skipped: usize,
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    offerings: HashMap<String, Course>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Catalog {
            offerings: HashMap::new(),
        }
    }

    /// Insert a course unless its id is already offered.
    /// A duplicate leaves the stored course untouched.
    pub fn add(&mut self, id: &str, name: &str, credits: u32) -> CatalogStatus {
        if self.offerings.contains_key(id) {
            return CatalogStatus::AlreadyAdded;
        }
        self.offerings
            .insert(id.to_string(), Course::new(id, name, credits));
        CatalogStatus::Added
    }

    pub fn remove(&mut self, id: &str) -> CatalogStatus {
        match self.offerings.remove(id) {
            Some(_) => CatalogStatus::Removed,
            None => CatalogStatus::NotFound,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.offerings.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.offerings.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// All offered courses, sorted by id
    pub fn courses(&self) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.offerings.values().collect();
        courses.sort_by(|a, b| a.id.cmp(&b.id));
        courses
    }

    // ========================================================================
    // BULK LOAD
    // ========================================================================

    /// Load `id,name,credits` records from a reader.
    /// Malformed records are dropped silently and only counted in the report.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<LoadReport> {
        let parsed = parse_catalog(reader)?;
        Ok(self.absorb(parsed.records, parsed.skipped))
    }

    pub fn load_str(&mut self, text: &str) -> Result<LoadReport> {
        let parsed = parse_catalog_str(text)?;
        Ok(self.absorb(parsed.records, parsed.skipped))
    }

    pub fn load_path(&mut self, path: &Path) -> Result<LoadReport> {
        let file = File::open(path).map_err(|source| RecordsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let report = self.load_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            added = report.added,
            duplicates = report.duplicates,
            skipped = report.skipped,
            "catalog loaded"
        );
        Ok(report)
    }

    fn absorb(&mut self, records: Vec<crate::parser::CatalogRecord>, skipped: usize) -> LoadReport {
        let mut report = LoadReport {
            skipped,
            ..LoadReport::default()
        };

        for record in records {
            match self.add(&record.id, &record.name, record.credits) {
                CatalogStatus::Added => report.added += 1,
                _ => {
                    debug!(id = %record.id, line = record.line_number, "duplicate catalog record ignored");
                    report.duplicates += 1;
                }
            }
        }

        report
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_course_display() {
        let course = Course::new("CMPSC132", "Programming in Python II", 3);
        assert_eq!(course.to_string(), "CMPSC132(3): Programming in Python II");
    }

    #[test]
    fn test_course_equality_by_id() {
        let c1 = Course::new("CMPSC132", "Programming in Python II", 3);
        let c2 = Course::new("CMPSC360", "Discrete Mathematics", 3);
        let c3 = Course::new("CMPSC132", "Renamed", 4);

        assert_ne!(c1, c2);
        assert_eq!(c1, c3);
    }

    #[test]
    fn test_catalog_add_and_duplicate() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        assert_eq!(catalog.add("MATH 230", "Calculus", 4), CatalogStatus::Added);
        assert_eq!(catalog.add("MATH 230", "Other", 2), CatalogStatus::AlreadyAdded);

        let stored = catalog.get("MATH 230").unwrap();
        assert_eq!(stored.name(), "Calculus");
        assert_eq!(stored.credits(), 4);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_catalog_key_matches_course_id() {
        let mut catalog = Catalog::new();
        catalog.add("PHYS 213", "General Physics", 2);

        for (key, course) in &catalog.offerings {
            assert_eq!(key, course.id());
        }
    }

    #[test]
    fn test_catalog_remove() {
        let mut catalog = Catalog::new();
        catalog.add("CMPSC 360", "Discrete Mathematics", 3);

        assert_eq!(catalog.remove("CMPSC 360"), CatalogStatus::Removed);
        assert_eq!(catalog.remove("CMPSC 360"), CatalogStatus::NotFound);
        assert!(!catalog.contains("CMPSC 360"));
    }

    #[test]
    fn test_catalog_status_strings() {
        assert_eq!(CatalogStatus::Added.to_string(), "Course added successfully");
        assert_eq!(CatalogStatus::AlreadyAdded.to_string(), "Course already added");
        assert_eq!(CatalogStatus::Removed.to_string(), "Course removed successfully");
        assert_eq!(CatalogStatus::NotFound.to_string(), "Course not found");
    }

    #[test]
    fn test_load_str_counts() {
        let mut catalog = Catalog::new();
        let text = "CMPSC 132,Programming and Computation II,3\n\
                    MATH 230,Calculus and Vector Analysis,4\n\
                    PHYS 213,General Physics,2\n\
                    broken line without enough fields\n";

        let report = catalog.load_str(text).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(report.added, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.duplicates, 0);
    }

    #[test]
    fn test_load_keeps_first_duplicate() {
        let mut catalog = Catalog::new();
        let report = catalog.load_str("MATH 230,Calculus,4\nMATH 230,Calculus Again,5\n").unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(catalog.get("MATH 230").unwrap().credits(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let mut catalog = Catalog::new();
        let err = catalog
            .load_path(Path::new("/nonexistent/catalog.csv"))
            .unwrap_err();

        assert!(matches!(err, RecordsError::Io { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_courses_sorted() {
        let mut catalog = Catalog::new();
        catalog.add("PHYS 213", "General Physics", 2);
        catalog.add("CMPSC 132", "Programming", 3);

        let ids: Vec<&str> = catalog.courses().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["CMPSC 132", "PHYS 213"]);
    }

    proptest! {
        #[test]
        fn prop_course_equality_ignores_name_and_credits(
            id in "[A-Z]{2,5} [0-9]{3}",
            name_a in "[a-zA-Z ]{1,20}",
            name_b in "[a-zA-Z ]{1,20}",
            credits_a in 0u32..10,
            credits_b in 0u32..10,
        ) {
            let a = Course::new(id.clone(), name_a, credits_a);
            let b = Course::new(id, name_b, credits_b);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_course_equality_requires_same_id(
            id_a in "[A-Z]{2,5} [0-9]{3}",
            id_b in "[A-Z]{2,5} [0-9]{3}",
        ) {
            let a = Course::new(id_a.clone(), "Same", 3);
            let b = Course::new(id_b.clone(), "Same", 3);
            prop_assert_eq!(a == b, id_a == id_b);
        }
    }
}
