// 💵 Loan + loan id generation
//
// A Loan pairs an amount with an id drawn from [10000, 99999]. Where the id
// comes from is injectable so callers can get reproducible ids without any
// process-wide seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LOAN_ID_MIN: u32 = 10_000;
pub const LOAN_ID_MAX: u32 = 99_999;

// ============================================================================
// ID GENERATORS
// ============================================================================

/// Source of loan ids
pub trait LoanIdGenerator {
    /// Next id, always within `LOAN_ID_MIN..=LOAN_ID_MAX`
    fn next_id(&mut self) -> u32;
}

/// Default generator backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomLoanIds;

impl LoanIdGenerator for RandomLoanIds {
    fn next_id(&mut self) -> u32 {
        rand::thread_rng().gen_range(LOAN_ID_MIN..=LOAN_ID_MAX)
    }
}

/// Deterministic generator for reproducible runs
#[derive(Debug, Clone)]
pub struct SeededLoanIds {
    rng: StdRng,
}

impl SeededLoanIds {
    pub fn new(seed: u64) -> Self {
        SeededLoanIds {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl LoanIdGenerator for SeededLoanIds {
    fn next_id(&mut self) -> u32 {
        self.rng.gen_range(LOAN_ID_MIN..=LOAN_ID_MAX)
    }
}

/// Replays a fixed list of ids, cycling when exhausted.
/// Values outside the valid range are clamped into it.
#[derive(Debug, Clone)]
pub struct SequenceLoanIds {
    ids: Vec<u32>,
    cursor: usize,
}

impl SequenceLoanIds {
    pub fn new(ids: Vec<u32>) -> Self {
        SequenceLoanIds { ids, cursor: 0 }
    }
}

impl LoanIdGenerator for SequenceLoanIds {
    fn next_id(&mut self) -> u32 {
        if self.ids.is_empty() {
            return LOAN_ID_MIN;
        }
        let id = self.ids[self.cursor % self.ids.len()];
        self.cursor += 1;
        id.clamp(LOAN_ID_MIN, LOAN_ID_MAX)
    }
}

// ============================================================================
// LOAN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    id: u32,
    amount: f64,
}

impl Loan {
    pub fn new<G: LoanIdGenerator + ?Sized>(amount: f64, ids: &mut G) -> Self {
        Loan {
            id: ids.next_id(),
            amount,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Balance: ${}", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_display() {
        let mut ids = SequenceLoanIds::new(vec![17412]);
        let loan = Loan::new(4000.0, &mut ids);

        assert_eq!(loan.to_string(), "Balance: $4000");
        assert_eq!(loan.id(), 17412);
        assert_eq!(loan.amount(), 4000.0);
    }

    #[test]
    fn test_random_ids_in_range() {
        let mut ids = RandomLoanIds;
        for _ in 0..1000 {
            let id = ids.next_id();
            assert!((LOAN_ID_MIN..=LOAN_ID_MAX).contains(&id));
        }
    }

    #[test]
    fn test_seeded_ids_are_reproducible() {
        let mut a = SeededLoanIds::new(2);
        let mut b = SeededLoanIds::new(2);

        let first: Vec<u32> = (0..5).map(|_| a.next_id()).collect();
        let second: Vec<u32> = (0..5).map(|_| b.next_id()).collect();

        assert_eq!(first, second);
        assert!(first.iter().all(|id| (LOAN_ID_MIN..=LOAN_ID_MAX).contains(id)));
    }

    #[test]
    fn test_sequence_cycles_and_clamps() {
        let mut ids = SequenceLoanIds::new(vec![22004, 5, 200_000]);

        assert_eq!(ids.next_id(), 22004);
        assert_eq!(ids.next_id(), LOAN_ID_MIN);
        assert_eq!(ids.next_id(), LOAN_ID_MAX);
        assert_eq!(ids.next_id(), 22004);
    }

    #[test]
    fn test_generator_as_trait_object() {
        let mut ids: Box<dyn LoanIdGenerator> = Box::new(SequenceLoanIds::new(vec![21124]));
        let loan = Loan::new(1000.0, ids.as_mut());
        assert_eq!(loan.id(), 21124);
    }
}
