//! Hosting the keeper on LMDB: configuration → open → lifecycle → reopen.

use std::sync::Arc;

use dnsdao_governance::{
    open_keeper, BlockContext, GenesisState, GovernanceConfig, GovernanceError, MsgSubmitProposal,
    MsgVote, ProposalContent, ProposalStatus, VoteOption,
};
use dnsdao_nullables::{NullBank, NullRegistry};
use dnsdao_types::{AccountAddress, BlockHeight, Coin, Coins, DaoParams};

const AUTHORITY: &str = "dns1qqqqqqqqqqqq";

fn config_in(dir: &tempfile::TempDir) -> GovernanceConfig {
    GovernanceConfig {
        data_dir: dir.path().join("lmdb"),
        lmdb_map_size: 16 * 1024 * 1024,
        ..GovernanceConfig::new(AUTHORITY)
    }
}

#[test]
fn fresh_store_gets_default_genesis() {
    let dir = tempfile::tempdir().expect("temp dir");
    let keeper = open_keeper(
        &config_in(&dir),
        Arc::new(NullBank::new()),
        Arc::new(NullRegistry::new()),
    )
    .unwrap();
    assert_eq!(keeper.query_params().unwrap(), DaoParams::default());
    assert_eq!(keeper.module_name(), "dao");
}

#[test]
fn configured_genesis_file_is_loaded() {
    let dir = tempfile::tempdir().expect("temp dir");
    let genesis = GenesisState {
        params: DaoParams {
            voting_period_blocks: 7,
            ..DaoParams::default()
        },
        next_proposal_id: 5,
        ..GenesisState::default()
    };
    let path = dir.path().join("genesis.json");
    std::fs::write(&path, genesis.to_json_string().unwrap()).unwrap();

    let config = GovernanceConfig {
        genesis_file: Some(path),
        ..config_in(&dir)
    };
    let keeper = open_keeper(&config, Arc::new(NullBank::new()), Arc::new(NullRegistry::new())).unwrap();
    assert_eq!(keeper.query_params().unwrap().voting_period_blocks, 7);
    assert_eq!(keeper.export_genesis().unwrap().next_proposal_id, 5);
}

#[test]
fn invalid_config_is_refused() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = GovernanceConfig {
        module_account: " ".into(),
        ..config_in(&dir)
    };
    let result = open_keeper(&config, Arc::new(NullBank::new()), Arc::new(NullRegistry::new()));
    match result {
        Err(GovernanceError::Config(_)) => {}
        Err(other) => panic!("expected Config error, got {other:?}"),
        Ok(_) => panic!("expected Config error"),
    }
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config_in(&dir);
    let bank = Arc::new(NullBank::new());
    let registry = Arc::new(NullRegistry::new());
    let alice = AccountAddress::parse("dns1qqqqqqqqp").unwrap();
    bank.fund(&alice, Coin::new("stake", 100_000_000));
    bank.fund(&alice, Coin::new("udnsc", 10));

    let id = {
        let keeper = open_keeper(&config, bank.clone(), registry.clone()).unwrap();
        let mut ctx = BlockContext::new(BlockHeight::new(3));
        let msg = MsgSubmitProposal::new(alice.to_string(), "dnsx", "permit dnsx", &ProposalContent::add_tld("dnsx"))
            .unwrap()
            .with_initial_deposit(Coins::empty());
        let id = keeper.submit_proposal(&mut ctx, msg).unwrap();
        keeper
            .vote(&mut ctx, MsgVote::new(id, alice.to_string(), VoteOption::Yes))
            .unwrap();
        keeper
            .update_params(
                AUTHORITY,
                DaoParams {
                    voting_period_blocks: 9,
                    ..keeper.query_params().unwrap()
                },
            )
            .unwrap();
        id
    };

    let keeper = open_keeper(&config, bank.clone(), registry.clone()).unwrap();
    // Existing params are kept, not replaced by genesis.
    assert_eq!(keeper.query_params().unwrap().voting_period_blocks, 9);
    let proposal = keeper.query_proposal(id).unwrap();
    assert_eq!(proposal.status, ProposalStatus::VotingPeriod);
    assert_eq!(keeper.query_vote(id, alice.as_str()).unwrap().voting_power, 10);

    let mut ctx = BlockContext::new(proposal.voting_end_block.next());
    let finalized = keeper.end_block(&mut ctx).unwrap();
    assert_eq!(finalized[0].status, ProposalStatus::Executed);
    assert_eq!(registry.permitted(), vec!["dnsx".to_string()]);
}
