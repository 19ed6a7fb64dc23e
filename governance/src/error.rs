use dnsdao_store::StoreError;
use dnsdao_types::DaoTypesError;
use thiserror::Error;

use crate::expected::{BankError, RegistryError};

#[derive(Debug, Error)]
pub enum GovernanceError {
    // ── Validation ───────────────────────────────────────────────────────
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid proposal content: {0}")]
    InvalidProposalContent(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // ── State conflicts ──────────────────────────────────────────────────
    #[error("proposal {0} not found")]
    ProposalNotFound(u64),

    #[error("proposal {id} not in voting period (current status: {status})")]
    InactiveProposal { id: u64, status: String },

    #[error("proposal {id}: voting period ended at block {voting_end}")]
    VotingPeriodEnded { id: u64, voting_end: u64 },

    #[error("voter {voter} already voted on proposal {id}")]
    AlreadyVoted { id: u64, voter: String },

    #[error("vote by {voter} on proposal {id} not found")]
    VoteNotFound { id: u64, voter: String },

    #[error("voter {0} has no voting power")]
    NoVotingPower(String),

    #[error("an identical proposal is already in its voting period (proposal {0})")]
    DuplicateActiveProposal(u64),

    #[error("unauthorized: expected {expected}, got {got}")]
    Unauthorized { expected: String, got: String },

    // ── Collaborators ────────────────────────────────────────────────────
    #[error("bank: {0}")]
    Bank(#[from] BankError),

    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    // ── Tally-time ───────────────────────────────────────────────────────
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    #[error("cannot unpack proposal content: {0}")]
    ContentUnpack(String),

    // ── Infrastructure ───────────────────────────────────────────────────
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid params: {0}")]
    Params(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<bincode::Error> for GovernanceError {
    fn from(e: bincode::Error) -> Self {
        GovernanceError::Serialization(e.to_string())
    }
}

impl From<DaoTypesError> for GovernanceError {
    fn from(e: DaoTypesError) -> Self {
        match e {
            DaoTypesError::InvalidAddress(msg) => GovernanceError::InvalidAddress(msg),
            DaoTypesError::InvalidParams(msg) => GovernanceError::Params(msg),
            other => GovernanceError::InvalidRequest(other.to_string()),
        }
    }
}
