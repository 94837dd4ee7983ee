// 💳 Student Account - balance + loans for exactly one student
//
// Problem solved:
// - Tuition is charged with no upper bound (balance may be anything)
// - Payments never overdraw: a payment larger than the balance is refused
// - Loans are kept by id; their proceeds arrive as payments
//
// The account does not hold a reference back to its student. It keeps the
// owner's name and display id, which never change after construction.

use super::loan::Loan;
use crate::error::{RecordsError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct StudentAccount {
    owner_name: String,
    owner_id: String,
    balance: f64,
    loans: HashMap<u32, Loan>,
}

impl StudentAccount {
    /// Open an empty account for a student
    pub fn new(owner_name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        StudentAccount {
            owner_name: owner_name.into(),
            owner_id: owner_id.into(),
            balance: 0.0,
            loans: HashMap::new(),
        }
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Add a charge and return the new balance
    pub fn charge_account(&mut self, amount: f64) -> f64 {
        self.balance += amount;
        self.balance
    }

    /// Apply a payment and return the new balance.
    ///
    /// Refused (balance untouched) when `amount` exceeds the balance.
    pub fn make_payment(&mut self, amount: f64) -> Result<f64> {
        if amount > self.balance {
            warn!(
                owner = %self.owner_id,
                requested = amount,
                balance = self.balance,
                "payment refused: would overdraw"
            );
            return Err(RecordsError::InsufficientBalance {
                requested: amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        Ok(self.balance)
    }

    // ========================================================================
    // LOANS
    // ========================================================================

    /// Store a loan under its id. A later loan with the same id replaces it.
    pub fn record_loan(&mut self, loan: Loan) {
        self.loans.insert(loan.id(), loan);
    }

    pub fn loan(&self, id: u32) -> Option<&Loan> {
        self.loans.get(&id)
    }

    /// Loans ordered by id
    pub fn loans(&self) -> Vec<&Loan> {
        let mut loans: Vec<&Loan> = self.loans.values().collect();
        loans.sort_by_key(|loan| loan.id());
        loans
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub fn total_loans(&self) -> f64 {
        self.loans.values().map(Loan::amount).sum()
    }

    /// Negative balance (credit owed back to the student)
    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0.0
    }
}

impl fmt::Display for StudentAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.owner_name)?;
        writeln!(f, "ID: {}", self.owner_id)?;
        write!(f, "Balance: ${}", self.balance)
    }
}

// ============================================================================
// TESTS
// ============================================================================
