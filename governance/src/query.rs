//! Read-only queries.

use serde::{Deserialize, Serialize};

use dnsdao_types::{AccountAddress, DaoParams};

use crate::keeper::Keeper;
use crate::proposal::{Proposal, ProposalStatus};
use crate::tally::TallyResult;
use crate::vote::Vote;
use crate::GovernanceError;

/// Page size used when a request leaves the limit at zero.
pub const DEFAULT_LIMIT: u64 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: u64,
    /// Zero means [`DEFAULT_LIMIT`].
    pub limit: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Matching records before paging.
    pub total: u64,
}

/// Offset/limit window over an in-memory result set.
fn paginate<T>(items: Vec<T>, page: Option<PageRequest>) -> (Vec<T>, PageResponse) {
    let page = page.unwrap_or_default();
    let limit = if page.limit == 0 { DEFAULT_LIMIT } else { page.limit };
    let total = items.len() as u64;
    let start = usize::try_from(page.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let window = items.into_iter().skip(start).take(limit).collect();
    (window, PageResponse { total })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProposalsFilter {
    /// Empty disables the filter. An unparseable address matches nothing.
    pub proposer: String,
    /// `Unspecified` disables the filter.
    pub status: ProposalStatus,
}

impl ProposalsFilter {
    fn matches(&self, proposer: Option<&AccountAddress>, proposal: &Proposal) -> bool {
        if !self.proposer.is_empty() {
            match proposer {
                Some(addr) if *addr == proposal.proposer => {}
                _ => return false,
            }
        }
        self.status == ProposalStatus::Unspecified || self.status == proposal.status
    }
}

impl Keeper {
    pub fn query_params(&self) -> Result<DaoParams, GovernanceError> {
        self.params()
    }

    pub fn query_proposal(&self, id: u64) -> Result<Proposal, GovernanceError> {
        self.get_proposal(id)?
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    pub fn query_proposals(
        &self,
        filter: &ProposalsFilter,
        page: Option<PageRequest>,
    ) -> Result<(Vec<Proposal>, PageResponse), GovernanceError> {
        let proposer = AccountAddress::parse(&filter.proposer).ok();
        let mut matching = Vec::new();
        for (_, proposal) in self.all_proposals()? {
            let proposal = proposal?;
            if filter.matches(proposer.as_ref(), &proposal) {
                matching.push(proposal);
            }
        }
        Ok(paginate(matching, page))
    }

    pub fn query_vote(&self, proposal_id: u64, voter: &str) -> Result<Vote, GovernanceError> {
        if voter.is_empty() {
            return Err(GovernanceError::InvalidRequest("voter address cannot be empty".into()));
        }
        let voter_addr = AccountAddress::parse(voter)
            .map_err(|_| GovernanceError::InvalidAddress(format!("invalid voter address: {voter}")))?;
        self.get_vote(proposal_id, &voter_addr)?
            .ok_or_else(|| GovernanceError::VoteNotFound {
                id: proposal_id,
                voter: voter.to_string(),
            })
    }

    pub fn query_votes(
        &self,
        proposal_id: u64,
        page: Option<PageRequest>,
    ) -> Result<(Vec<Vote>, PageResponse), GovernanceError> {
        Ok(paginate(self.votes_for(proposal_id)?, page))
    }

    /// The sums stored on the proposal. These stay zero until the end-of-block
    /// pass finalizes it.
    pub fn query_tally(&self, proposal_id: u64) -> Result<TallyResult, GovernanceError> {
        let proposal = self.query_proposal(proposal_id)?;
        Ok(TallyResult {
            yes: proposal.yes_votes,
            no: proposal.no_votes,
            abstain: proposal.abstain_votes,
        })
    }
}
