// 🧑‍🏫 Staff - supervises students, toggles holds, creates student records
//
// A staff member never owns its supervisor. The supervisory chain is a key
// into a StaffRegistry, so supervisors can change independently of the
// people they supervise.

use super::person::{Party, Person};
use super::student::{ClassCode, Student};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// Prefix of every staff display id
pub const STAFF_ID_PREFIX: &str = "905";

/// Stable registry key (never changes, unlike name or display id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffKey(Uuid);

impl StaffKey {
    fn new() -> Self {
        StaffKey(Uuid::new_v4())
    }
}

impl fmt::Display for StaffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffStatus {
    Completed,
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Completed!")
    }
}

// ============================================================================
// STAFF ENTITY
// ============================================================================

#[derive(Debug, Clone)]
pub struct Staff {
    key: StaffKey,
    person: Person,
    supervisor: Option<StaffKey>,
}

impl Staff {
    pub fn new(name: impl Into<String>, secret_id: impl Into<String>) -> Self {
        Staff::from_person(Person::new(name, secret_id))
    }

    pub fn from_person(person: Person) -> Self {
        Staff {
            key: StaffKey::new(),
            person,
            supervisor: None,
        }
    }

    /// Builder: start out supervised by `supervisor`
    pub fn with_supervisor(mut self, supervisor: &Staff) -> Self {
        self.supervisor = Some(supervisor.key);
        self
    }

    pub fn key(&self) -> StaffKey {
        self.key
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    /// "905" + initials + last four of the secret id, e.g. "905jd2890"
    pub fn id(&self) -> String {
        format!(
            "{}{}{}",
            STAFF_ID_PREFIX,
            self.person.initials(),
            self.person.last_four()
        )
    }

    pub fn supervisor(&self) -> Option<StaffKey> {
        self.supervisor
    }

    pub fn set_supervisor(&mut self, supervisor: &Staff) {
        self.supervisor = Some(supervisor.key);
    }

    /// Accepts any party; anything other than staff is silently ignored
    pub fn set_supervisor_from(&mut self, party: &Party) {
        if let Some(staff) = party.as_staff() {
            self.set_supervisor(staff);
        }
    }

    // ========================================================================
    // STUDENT ADMINISTRATION
    // ========================================================================

    pub fn apply_hold(&self, student: &mut Student) -> StaffStatus {
        student.set_hold(true);
        info!(staff = %self.id(), student = %student.id(), "hold applied");
        StaffStatus::Completed
    }

    pub fn remove_hold(&self, student: &mut Student) -> StaffStatus {
        student.set_hold(false);
        info!(staff = %self.id(), student = %student.id(), "hold removed");
        StaffStatus::Completed
    }

    pub fn unenroll_student(&self, student: &mut Student) -> StaffStatus {
        student.set_active(false);
        info!(staff = %self.id(), student = %student.id(), "student unenrolled");
        StaffStatus::Completed
    }

    /// Hold on a party that may not be a student; `None` means nothing happened
    pub fn apply_hold_to(&self, party: &mut Party) -> Option<StaffStatus> {
        party.as_student_mut().map(|student| self.apply_hold(student))
    }

    pub fn remove_hold_to(&self, party: &mut Party) -> Option<StaffStatus> {
        party.as_student_mut().map(|student| self.remove_hold(student))
    }

    pub fn unenroll_party(&self, party: &mut Party) -> Option<StaffStatus> {
        party.as_student_mut().map(|student| self.unenroll_student(student))
    }

    /// New Freshman record carrying the person's name and secret id
    pub fn create_student(&self, person: &Person) -> Student {
        let student = Student::new(person.name(), person.secret_id(), ClassCode::Freshman);
        info!(staff = %self.id(), student = %student.id(), "student record created");
        student
    }
}

impl PartialEq for Staff {
    fn eq(&self, other: &Self) -> bool {
        self.person == other.person
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Staff({}, {})", self.person.name(), self.id())
    }
}

// ============================================================================
// STAFF REGISTRY
// ============================================================================

/// In-memory directory of staff, used to resolve supervisory keys
#[derive(Debug, Default)]
pub struct StaffRegistry {
    staff: HashMap<StaffKey, Staff>,
}

impl StaffRegistry {
    pub fn new() -> Self {
        StaffRegistry {
            staff: HashMap::new(),
        }
    }

    /// Register a staff member, returning its key. Re-registering replaces.
    pub fn register(&mut self, staff: Staff) -> StaffKey {
        let key = staff.key;
        self.staff.insert(key, staff);
        key
    }

    pub fn get(&self, key: StaffKey) -> Option<&Staff> {
        self.staff.get(&key)
    }

    pub fn get_mut(&mut self, key: StaffKey) -> Option<&mut Staff> {
        self.staff.get_mut(&key)
    }

    /// Resolve the supervisor of `staff`. `None` if unsupervised or the
    /// supervisor is no longer registered.
    pub fn supervisor_of(&self, staff: &Staff) -> Option<&Staff> {
        staff.supervisor.and_then(|key| self.staff.get(&key))
    }

    /// Walk the supervisory chain upward from `staff` (excluding itself).
    /// Stops on a cycle.
    pub fn chain_of(&self, staff: &Staff) -> Vec<&Staff> {
        let mut chain: Vec<&Staff> = Vec::new();
        let mut current = self.supervisor_of(staff);
        while let Some(next) = current {
            if next.key == staff.key || chain.iter().any(|s| s.key == next.key) {
                break;
            }
            chain.push(next);
            current = self.supervisor_of(next);
        }
        chain
    }

    pub fn find_by_id(&self, display_id: &str) -> Option<&Staff> {
        self.staff.values().find(|s| s.id() == display_id)
    }

    pub fn remove(&mut self, key: StaffKey) -> Option<Staff> {
        self.staff.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.staff.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_display_id() {
        let jane = Staff::new("Jane Doe", "214-49-2890");
        let john = Staff::new("John Doe", "614-49-6590");

        assert_eq!(jane.id(), "905jd2890");
        assert_eq!(john.id(), "905jd6590");
        assert_eq!(jane.to_string(), "Staff(Jane Doe, 905jd2890)");
        assert_ne!(jane, john);
    }

    #[test]
    fn test_supervisor_resolution() {
        let mut registry = StaffRegistry::new();
        let jane = Staff::new("Jane Doe", "214-49-2890");
        assert!(jane.supervisor().is_none());

        let john = Staff::new("John Doe", "614-49-6590").with_supervisor(&jane);
        registry.register(jane.clone());
        let john_key = registry.register(john);

        let john = registry.get(john_key).unwrap();
        let supervisor = registry.supervisor_of(john).unwrap();
        assert_eq!(supervisor.to_string(), "Staff(Jane Doe, 905jd2890)");
    }

    #[test]
    fn test_removed_supervisor_resolves_to_none() {
        let mut registry = StaffRegistry::new();
        let jane = Staff::new("Jane Doe", "214-49-2890");
        let john = Staff::new("John Doe", "614-49-6590").with_supervisor(&jane);
        let jane_key = registry.register(jane);

        registry.remove(jane_key);

        assert_eq!(john.supervisor(), Some(jane_key));
        assert!(registry.supervisor_of(&john).is_none());
    }

    #[test]
    fn test_set_supervisor_ignores_non_staff() {
        let jane = Staff::new("Jane Doe", "214-49-2890");
        let mut john = Staff::new("John Doe", "614-49-6590");

        john.set_supervisor_from(&Party::from(Person::new("Jason Smith", "221-11-2629")));
        assert!(john.supervisor().is_none());

        john.set_supervisor_from(&Party::from(jane.clone()));
        assert_eq!(john.supervisor(), Some(jane.key()));
    }

    #[test]
    fn test_chain_stops_on_cycle() {
        let mut registry = StaffRegistry::new();
        let mut a = Staff::new("Ann Alpha", "111-11-1111");
        let b = Staff::new("Bob Beta", "222-22-2222").with_supervisor(&a);
        a.set_supervisor(&b);
        registry.register(a.clone());
        registry.register(b);

        let chain = registry.chain_of(&a);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].name(), "Bob Beta");
    }

    #[test]
    fn test_find_by_display_id() {
        let mut registry = StaffRegistry::new();
        registry.register(Staff::new("Jane Doe", "214-49-2890"));

        assert!(registry.find_by_id("905jd2890").is_some());
        assert!(registry.find_by_id("905xx0000").is_none());
    }

    #[test]
    fn test_create_student_is_freshman() {
        let staff = Staff::new("Jane Doe", "214-49-2890");
        let person = Person::new("Jason Smith", "221-11-2629");

        let student = staff.create_student(&person);

        assert_eq!(student.class_code(), ClassCode::Freshman);
        assert_eq!(student.person(), &person);
        assert!(student.is_active());
        assert!(student.account().is_some());
    }

    #[test]
    fn test_hold_guards_on_party_kind() {
        let staff = Staff::new("Jane Doe", "214-49-2890");
        let mut person = Party::from(Person::new("Jason Smith", "221-11-2629"));
        let mut student = Party::from(Student::new("Jason Smith", "221-11-2629", ClassCode::Freshman));

        assert_eq!(staff.apply_hold_to(&mut person), None);
        assert_eq!(staff.unenroll_party(&mut person), None);
        assert_eq!(staff.apply_hold_to(&mut student), Some(StaffStatus::Completed));
        assert!(student.as_student().unwrap().has_hold());

        assert_eq!(staff.remove_hold_to(&mut student), Some(StaffStatus::Completed));
        assert!(!student.as_student().unwrap().has_hold());

        assert_eq!(staff.unenroll_party(&mut student), Some(StaffStatus::Completed));
        assert!(!student.as_student().unwrap().is_active());
    }

    #[test]
    fn test_completed_status_string() {
        assert_eq!(StaffStatus::Completed.to_string(), "Completed!");
    }
}
