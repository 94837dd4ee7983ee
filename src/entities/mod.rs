// Entity Models
//
// - Course / Catalog: immutable course values keyed by id
// - Semester: one term's enrollment
// - Person / Staff / Student: identity by secret id, display by initials
// - StudentAccount / Loan: tuition charges, payments, loan proceeds

pub mod account;
pub mod course;
pub mod loan;
pub mod person;
pub mod semester;
pub mod staff;
pub mod student;

pub use account::StudentAccount;
pub use course::{Catalog, CatalogStatus, Course, LoadReport};
pub use loan::{Loan, LoanIdGenerator, RandomLoanIds, SeededLoanIds, SequenceLoanIds};
pub use person::{Party, Person};
pub use semester::{Semester, SemesterStatus, FULL_TIME_CREDITS};
pub use staff::{Staff, StaffKey, StaffRegistry, StaffStatus};
pub use student::{ClassCode, Student, StudentStatus, StudentSummary, CREDIT_PRICE};
