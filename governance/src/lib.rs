//! DAO governance core for the dnsblockchain application chain.
//!
//! Accounts submit proposals against a deposit, cast votes weighted by their
//! voting power, and once per block the module decides, executes and settles
//! every proposal whose voting window has closed.
//!
//! Lifecycle: `VotingPeriod` → `Rejected` | `Failed` | `Passed` → `Executed` | `Failed`.
//! `Passed` is replaced by the execution outcome in the same block.
//!
//! Voting power starts out as the spendable balance of the voting denom. The
//! first executed token grant creates a decaying lot, and from then on only
//! lots count.

pub mod config;
pub mod content;
pub mod end_block;
pub mod error;
pub mod events;
pub mod execution;
pub mod expected;
pub mod genesis;
pub mod host;
pub mod intake;
pub mod keeper;
pub mod lot;
pub mod power;
pub mod proposal;
pub mod query;
pub mod settlement;
pub mod submit;
pub mod tally;
pub mod vote;

pub use config::GovernanceConfig;
pub use content::{ContentEnvelope, ProposalContent};
pub use end_block::FinalizedProposal;
pub use error::GovernanceError;
pub use events::{BlockContext, GovernanceEvent};
pub use expected::{Bank, BankError, RegistryError, TldRegistry};
pub use genesis::GenesisState;
pub use host::open_keeper;
pub use intake::MsgVote;
pub use keeper::{Keeper, MODULE_NAME};
pub use lot::VotingPowerLot;
pub use power::VotingPowerMode;
pub use proposal::{Proposal, ProposalStatus};
pub use query::{PageRequest, PageResponse, ProposalsFilter};
pub use settlement::Settlement;
pub use submit::MsgSubmitProposal;
pub use tally::{TallyDecision, TallyResult};
pub use vote::{Vote, VoteOption};
