// 🎓 Student - the enrollment state machine
//
// Gates:
// - register / enroll: active AND no hold
// - drop:              blocked only when on hold AND inactive at the same time
// - loan:              active, and the current term is full-time
//
// Every successful enroll charges the account, every drop refunds half.

use super::account::StudentAccount;
use super::course::Catalog;
use super::loan::{Loan, LoanIdGenerator};
use super::person::Person;
use super::semester::Semester;
use crate::error::{RecordsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Tuition per credit hour
pub const CREDIT_PRICE: f64 = 1000.0;

// ============================================================================
// CLASS CODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassCode {
    Freshman,
    Sophomore,
    Junior,
    Senior,
}

impl ClassCode {
    /// Standing after registering semester number `semester` (1-based)
    pub fn for_semester(semester: u32) -> Self {
        match semester {
            0..=2 => ClassCode::Freshman,
            3..=4 => ClassCode::Sophomore,
            5..=6 => ClassCode::Junior,
            _ => ClassCode::Senior,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassCode::Freshman => "Freshman",
            ClassCode::Sophomore => "Sophomore",
            ClassCode::Junior => "Junior",
            ClassCode::Senior => "Senior",
        }
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassCode {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "freshman" => Ok(ClassCode::Freshman),
            "sophomore" => Ok(ClassCode::Sophomore),
            "junior" => Ok(ClassCode::Junior),
            "senior" => Ok(ClassCode::Senior),
            _ => Err(RecordsError::UnknownClassCode(s.to_string())),
        }
    }
}

// ============================================================================
// STATUS
// ============================================================================

/// Outcome of a student action. Callers branch on the variant; `Display`
/// gives the human-readable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    Registered { semester: u32 },
    CourseAdded,
    CourseDropped,
    LoanIssued { loan_id: u32 },
    Unsuccessful,
    CourseNotFound,
    AlreadyEnrolled,
    NotFullTime,
    /// Enroll/drop/loan attempted before any semester was registered
    NoActiveSemester,
}

impl StudentStatus {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            StudentStatus::Registered { .. }
                | StudentStatus::CourseAdded
                | StudentStatus::CourseDropped
                | StudentStatus::LoanIssued { .. }
        )
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentStatus::Registered { semester } => write!(f, "Semester {} registered", semester),
            StudentStatus::CourseAdded => f.write_str("Course added successfully"),
            StudentStatus::CourseDropped => f.write_str("Course dropped successfully"),
            StudentStatus::LoanIssued { loan_id } => write!(f, "Loan {} issued", loan_id),
            StudentStatus::Unsuccessful => f.write_str("Unsuccessful operation"),
            StudentStatus::CourseNotFound => f.write_str("Course not found"),
            StudentStatus::AlreadyEnrolled => f.write_str("Course already enrolled"),
            StudentStatus::NotFullTime => f.write_str("Not full-time"),
            StudentStatus::NoActiveSemester => f.write_str("No active semester"),
        }
    }
}

// ============================================================================
// STUDENT ENTITY
// ============================================================================

/// Not `Clone`: the account belongs to exactly one student record.
#[derive(Debug)]
pub struct Student {
    person: Person,
    class_code: ClassCode,
    semesters: BTreeMap<u32, Semester>,
    hold: bool,
    active: bool,
    account: Option<StudentAccount>,
}

impl Student {
    /// Active student with no hold and a fresh account
    pub fn new(name: impl Into<String>, secret_id: impl Into<String>, class_code: ClassCode) -> Self {
        Student::with_status(name, secret_id, class_code, true)
    }

    /// Construct with an explicit `active` flag.
    /// An account is opened only when the student starts out active.
    pub fn with_status(
        name: impl Into<String>,
        secret_id: impl Into<String>,
        class_code: ClassCode,
        active: bool,
    ) -> Self {
        let person = Person::new(name, secret_id);
        let account = if active {
            Some(StudentAccount::new(person.name(), display_id(&person)))
        } else {
            None
        };

        Student {
            person,
            class_code,
            semesters: BTreeMap::new(),
            hold: false,
            active,
            account,
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    /// Initials + last four of the secret id, e.g. "jl2890"
    pub fn id(&self) -> String {
        display_id(&self.person)
    }

    pub fn class_code(&self) -> ClassCode {
        self.class_code
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_hold(&self) -> bool {
        self.hold
    }

    pub(crate) fn set_hold(&mut self, hold: bool) {
        self.hold = hold;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn account(&self) -> Option<&StudentAccount> {
        self.account.as_ref()
    }

    pub fn balance(&self) -> Option<f64> {
        self.account.as_ref().map(StudentAccount::balance)
    }

    pub fn semesters(&self) -> &BTreeMap<u32, Semester> {
        &self.semesters
    }

    pub fn semester(&self, number: u32) -> Option<&Semester> {
        self.semesters.get(&number)
    }

    pub fn semester_count(&self) -> u32 {
        self.current_number()
    }

    /// Highest-numbered semester, if any has been registered
    pub fn current_semester(&self) -> Option<&Semester> {
        self.semesters.values().next_back()
    }

    fn current_number(&self) -> u32 {
        self.semesters.keys().next_back().copied().unwrap_or(0)
    }

    fn current_semester_mut(&mut self) -> Option<&mut Semester> {
        self.semesters.values_mut().next_back()
    }

    fn can_register(&self) -> bool {
        self.active && !self.hold
    }

    fn can_drop(&self) -> bool {
        !(self.hold && !self.active)
    }

    // ========================================================================
    // STATE TRANSITIONS
    // ========================================================================

    /// Open the next semester and recompute the class code
    pub fn register_semester(&mut self) -> StudentStatus {
        if !self.can_register() {
            warn!(student = %self.id(), hold = self.hold, active = self.active, "registration blocked");
            return StudentStatus::Unsuccessful;
        }

        let next = self.current_number() + 1;
        self.semesters.insert(next, Semester::new());
        self.class_code = ClassCode::for_semester(next);

        info!(student = %self.id(), semester = next, class_code = %self.class_code, "semester registered");
        StudentStatus::Registered { semester: next }
    }

    /// Enroll in a catalog course for the current semester, charging
    /// `credits × CREDIT_PRICE`
    pub fn enroll_course(&mut self, course_id: &str, catalog: &Catalog) -> StudentStatus {
        if !self.can_register() {
            warn!(student = %self.id(), course = course_id, "enrollment blocked");
            return StudentStatus::Unsuccessful;
        }

        let course = match catalog.get(course_id) {
            Some(course) => course.clone(),
            None => return StudentStatus::CourseNotFound,
        };

        let student_id = self.id();
        let semester = match self.current_semester_mut() {
            Some(semester) => semester,
            None => return StudentStatus::NoActiveSemester,
        };

        if semester.contains(course.id()) {
            return StudentStatus::AlreadyEnrolled;
        }

        let charge = f64::from(course.credits()) * CREDIT_PRICE;
        semester.add_course(course);

        if let Some(account) = self.account.as_mut() {
            account.charge_account(charge);
        }

        info!(student = %student_id, course = course_id, charge, "course added");
        StudentStatus::CourseAdded
    }

    /// Drop a course from the current semester, refunding half its tuition.
    ///
    /// The refund goes through as a payment, so it is refused (and the balance
    /// left alone) if it would take the balance below zero. The course is
    /// dropped either way.
    pub fn drop_course(&mut self, course_id: &str) -> StudentStatus {
        if !self.can_drop() {
            warn!(student = %self.id(), course = course_id, "drop blocked");
            return StudentStatus::Unsuccessful;
        }

        let student_id = self.id();
        let semester = match self.current_semester_mut() {
            Some(semester) => semester,
            None => return StudentStatus::NoActiveSemester,
        };

        let course = match semester.remove(course_id) {
            Some(course) => course,
            None => return StudentStatus::CourseNotFound,
        };

        let refund = f64::from(course.credits()) * CREDIT_PRICE / 2.0;
        if let Some(account) = self.account.as_mut() {
            if account.make_payment(refund).is_err() {
                warn!(student = %student_id, course = course_id, refund, "drop refund not applied");
            }
        }

        info!(student = %student_id, course = course_id, refund, "course dropped");
        StudentStatus::CourseDropped
    }

    /// Take out a loan for a full-time semester; proceeds are paid into the
    /// account. A hold does not block loans.
    pub fn get_loan<G: LoanIdGenerator + ?Sized>(&mut self, amount: f64, ids: &mut G) -> StudentStatus {
        if !self.active {
            warn!(student = %self.id(), "loan blocked: inactive");
            return StudentStatus::Unsuccessful;
        }

        let full_time = match self.current_semester() {
            Some(semester) => semester.is_full_time(),
            None => return StudentStatus::NoActiveSemester,
        };
        if !full_time {
            return StudentStatus::NotFullTime;
        }

        let student_id = self.id();
        let account = match self.account.as_mut() {
            Some(account) => account,
            None => return StudentStatus::Unsuccessful,
        };

        let loan = Loan::new(amount, ids);
        let loan_id = loan.id();
        account.record_loan(loan);
        if account.make_payment(amount).is_err() {
            warn!(student = %student_id, loan_id, amount, "loan proceeds exceed balance; not applied");
        }

        info!(student = %student_id, loan_id, amount, "loan issued");
        StudentStatus::LoanIssued { loan_id }
    }

    /// Direct payment toward the account balance
    pub fn make_payment(&mut self, amount: f64) -> Result<f64> {
        let student_id = self.id();
        self.account
            .as_mut()
            .ok_or(RecordsError::NoAccount(student_id))?
            .make_payment(amount)
    }

    // ========================================================================
    // SUMMARY
    // ========================================================================

    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            name: self.name().to_string(),
            id: self.id(),
            class_code: self.class_code,
            active: self.active,
            hold: self.hold,
            semesters: self
                .semesters
                .iter()
                .map(|(number, semester)| SemesterSummary {
                    number: *number,
                    courses: semester.courses().iter().map(|c| c.id().to_string()).collect(),
                    total_credits: semester.total_credits(),
                    full_time: semester.is_full_time(),
                })
                .collect(),
            balance: self.balance(),
            loans: self
                .account
                .as_ref()
                .map(|account| account.loans().into_iter().cloned().collect())
                .unwrap_or_default(),
            generated_at: Utc::now(),
        }
    }
}

fn display_id(person: &Person) -> String {
    format!("{}{}", person.initials(), person.last_four())
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.person == other.person
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Student({}, {}, {})", self.name(), self.id(), self.class_code)
    }
}

/// Serializable snapshot of a student (secret id never included)
#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub name: String,
    pub id: String,
    pub class_code: ClassCode,
    pub active: bool,
    pub hold: bool,
    pub semesters: Vec<SemesterSummary>,
    pub balance: Option<f64>,
    pub loans: Vec<Loan>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SemesterSummary {
    pub number: u32,
    pub courses: Vec<String>,
    pub total_credits: u32,
    pub full_time: bool,
}

// ============================================================================
// TESTS
// ============================================================================
