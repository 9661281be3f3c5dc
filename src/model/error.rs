use thiserror::Error;

use crate::model::Party;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{party} round weights must have {expected} values, got {actual}")]
    WrongLength {
        party: Party,
        expected: usize,
        actual: usize,
    },

    #[error("{party} round weights must be finite, with a finite sum")]
    NonFiniteWeight { party: Party },

    #[error("{party} round weights must be non-negative")]
    NegativeWeight { party: Party },

    #[error("{party} round weights must not all be zero")]
    ZeroWeights { party: Party },

    #[error("the contest must be scheduled for at least one round")]
    NoRounds,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("sum of probabilities cannot be zero")]
    ZeroSum,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Domain(#[from] DomainError),
}
