// Acadmix - Academic Records Core Library
// Exposes the entity models for the console walkthrough and tests

pub mod config;
pub mod entities;
pub mod error;
pub mod parser;

// Re-export commonly used types
pub use config::DemoConfig;
pub use entities::{
    Catalog, CatalogStatus, Course, LoadReport,
    Semester, SemesterStatus, FULL_TIME_CREDITS,
    Loan, LoanIdGenerator, RandomLoanIds, SeededLoanIds, SequenceLoanIds,
    Party, Person,
    Staff, StaffKey, StaffRegistry, StaffStatus,
    ClassCode, Student, StudentStatus, StudentSummary, CREDIT_PRICE,
    StudentAccount,
};
pub use error::{RecordsError, Result};
pub use parser::{parse_catalog, parse_catalog_str, CatalogRecord, ParsedCatalog, SAMPLE_CATALOG};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
