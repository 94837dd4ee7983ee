// 🪪 Person - shared identity for staff and students
//
// "Name is a VALUE, secret id is IDENTITY"
//
// - Two persons are equal iff their secret ids match, whatever their names
// - The secret id only leaves this type through `secret_id()`
// - Display forms show the last four digits only

use super::staff::Staff;
use super::student::Student;
use crate::error::{RecordsError, Result};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Person {
    name: String,
    secret_id: String,
}

impl Person {
    /// Create a person without checking the secret id format
    pub fn new(name: impl Into<String>, secret_id: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            secret_id: secret_id.into(),
        }
    }

    /// Create a person, rejecting secret ids not shaped NNN-NN-NNNN
    pub fn try_new(name: impl Into<String>, secret_id: impl Into<String>) -> Result<Self> {
        let secret_id = secret_id.into();
        if !is_well_formed_secret_id(&secret_id) {
            return Err(RecordsError::InvalidSecretId);
        }
        Ok(Person::new(name, secret_id))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// Last four characters of the secret id
    pub fn last_four(&self) -> &str {
        last_four(&self.secret_id)
    }

    /// "***-**-2890"
    pub fn masked_secret_id(&self) -> String {
        format!("***-**-{}", self.last_four())
    }

    /// Lowercase first letter of every whitespace-separated token
    ///
    /// Example: "Jason Lee" → "jl"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.secret_id == other.secret_id
    }
}

impl Eq for Person {}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person({}, {})", self.name, self.masked_secret_id())
    }
}

fn last_four(secret_id: &str) -> &str {
    let count = secret_id.chars().count();
    if count <= 4 {
        return secret_id;
    }
    match secret_id.char_indices().nth(count - 4) {
        Some((start, _)) => &secret_id[start..],
        None => secret_id,
    }
}

/// NNN-NN-NNNN
pub fn is_well_formed_secret_id(secret_id: &str) -> bool {
    let groups: Vec<&str> = secret_id.split('-').collect();
    groups.len() == 3
        && groups
            .iter()
            .zip([3, 2, 4])
            .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_digit()))
}

// ============================================================================
// PARTY - any person-like record
// ============================================================================

/// Tagged union over the person-like records.
///
/// Staff operations that only make sense on a particular kind of party accept
/// a `Party` and return `None` (no side effect) on the wrong kind.
#[derive(Debug)]
pub enum Party {
    Person(Person),
    Staff(Staff),
    Student(Student),
}

impl Party {
    pub fn person(&self) -> &Person {
        match self {
            Party::Person(person) => person,
            Party::Staff(staff) => staff.person(),
            Party::Student(student) => student.person(),
        }
    }

    pub fn as_staff(&self) -> Option<&Staff> {
        match self {
            Party::Staff(staff) => Some(staff),
            _ => None,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Party::Student(student) => Some(student),
            _ => None,
        }
    }

    pub fn as_student_mut(&mut self) -> Option<&mut Student> {
        match self {
            Party::Student(student) => Some(student),
            _ => None,
        }
    }
}

impl PartialEq for Party {
    fn eq(&self, other: &Self) -> bool {
        self.person() == other.person()
    }
}

impl From<Person> for Party {
    fn from(person: Person) -> Self {
        Party::Person(person)
    }
}

impl From<Staff> for Party {
    fn from(staff: Staff) -> Self {
        Party::Staff(staff)
    }
}

impl From<Student> for Party {
    fn from(student: Student) -> Self {
        Party::Student(student)
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Person(person) => fmt::Display::fmt(person, f),
            Party::Staff(staff) => fmt::Display::fmt(staff, f),
            Party::Student(student) => fmt::Display::fmt(student, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::student::ClassCode;
    use proptest::prelude::*;

    #[test]
    fn test_person_display_masks_secret() {
        let p1 = Person::new("Jason Lee", "204-99-2890");
        let p2 = Person::new("Karen Lee", "247-01-2670");

        assert_eq!(p1.to_string(), "Person(Jason Lee, ***-**-2890)");
        assert_eq!(p2.to_string(), "Person(Karen Lee, ***-**-2670)");
        assert!(!p1.to_string().contains("204-99"));
    }

    #[test]
    fn test_person_equality_by_secret_id() {
        let p1 = Person::new("Jason Lee", "204-99-2890");
        let p2 = Person::new("Karen Lee", "247-01-2670");
        let p3 = Person::new("Karen Smith", "247-01-2670");

        assert_eq!(p2, p3);
        assert_ne!(p1, p2);
    }

    #[test]
    fn test_initials() {
        assert_eq!(Person::new("Jason Lee", "204-99-2890").initials(), "jl");
        assert_eq!(Person::new("  mary  Ann   Smith ", "204-99-2890").initials(), "mas");
        assert_eq!(Person::new("", "204-99-2890").initials(), "");
    }

    #[test]
    fn test_last_four() {
        assert_eq!(last_four("204-99-2890"), "2890");
        assert_eq!(last_four("123"), "123");
        assert_eq!(last_four(""), "");
    }

    #[test]
    fn test_try_new_validates_format() {
        assert!(Person::try_new("Jason Lee", "204-99-2890").is_ok());
        assert!(matches!(
            Person::try_new("Jason Lee", "204992890"),
            Err(RecordsError::InvalidSecretId)
        ));
        assert!(Person::try_new("Jason Lee", "2a4-99-2890").is_err());
        assert!(Person::try_new("Jason Lee", "204-999-890").is_err());
    }

    #[test]
    fn test_party_equality_across_kinds() {
        let person = Party::from(Person::new("Karen Lee", "247-01-2670"));
        let student = Party::from(Student::new("Karen Smith", "247-01-2670", ClassCode::Freshman));
        let staff = Party::from(Staff::new("Jane Doe", "214-49-2890"));

        assert_eq!(person, student);
        assert_ne!(person, staff);
        assert!(student.as_student().is_some());
        assert!(person.as_staff().is_none());
    }

    proptest! {
        #[test]
        fn prop_person_equality_ignores_name(
            secret in "[0-9]{3}-[0-9]{2}-[0-9]{4}",
            name_a in "[A-Za-z]{1,10} [A-Za-z]{1,10}",
            name_b in "[A-Za-z]{1,10} [A-Za-z]{1,10}",
        ) {
            let a = Person::new(name_a, secret.clone());
            let b = Person::new(name_b, secret);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_display_never_shows_full_secret(
            secret in "[0-9]{3}-[0-9]{2}-[0-9]{4}",
        ) {
            let person = Person::new("Test Person", secret.clone());
            prop_assert!(!person.to_string().contains(&secret));
            let tail = format!("{})", &secret[7..]);
            prop_assert!(person.to_string().ends_with(&tail));
        }
    }
}
