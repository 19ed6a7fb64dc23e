//! Wiring a keeper to durable storage from a [`GovernanceConfig`].

use std::sync::Arc;

use dnsdao_store::StoreError;
use dnsdao_store_lmdb::LmdbEnvironment;

use crate::config::GovernanceConfig;
use crate::expected::{Bank, TldRegistry};
use crate::genesis::GenesisState;
use crate::keeper::Keeper;
use crate::GovernanceError;

/// Room for every governance database plus headroom for future ones.
const MAX_DBS: u32 = 8;

/// Open the LMDB store named by `config` and build a keeper on it.
///
/// A store without params is treated as fresh: the configured genesis file is
/// loaded, or the default genesis if none is configured.
pub fn open_keeper(
    config: &GovernanceConfig,
    bank: Arc<dyn Bank + Send + Sync>,
    registry: Arc<dyn TldRegistry + Send + Sync>,
) -> Result<Keeper, GovernanceError> {
    config.validate()?;

    let env = LmdbEnvironment::open(&config.data_dir, MAX_DBS, config.lmdb_map_size)
        .map_err(StoreError::from)?;
    let store = Arc::new(env.governance_store());
    let keeper = Keeper::new(store, bank, registry, &config.authority)
        .with_module_name(config.module_account.clone());

    if keeper.store.get_params()?.is_none() {
        let genesis = match &config.genesis_file {
            Some(path) => GenesisState::from_json_file(path)?,
            None => GenesisState::default(),
        };
        keeper.init_genesis(&genesis)?;
    }

    tracing::info!(
        data_dir = %config.data_dir.display(),
        module_account = keeper.module_name(),
        "governance keeper ready"
    );
    Ok(keeper)
}
