//! Nullable bank: an in-memory token ledger for testing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use dnsdao_governance::{Bank, BankError};
use dnsdao_types::{AccountAddress, Coin, Coins};

/// Ledger key: regular accounts by address, module accounts by name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Holder {
    Account(String),
    Module(String),
}

#[derive(Default)]
struct Ledger {
    balances: BTreeMap<(Holder, String), u128>,
    supply: BTreeMap<String, u128>,
    supply_override: BTreeMap<String, u128>,
    minted: BTreeMap<String, u128>,
    burned: BTreeMap<String, u128>,
    blocked: BTreeSet<String>,
    fail_mints: bool,
    fail_burns: bool,
}

impl Ledger {
    fn balance(&self, holder: &Holder, denom: &str) -> u128 {
        self.balances
            .get(&(holder.clone(), denom.to_string()))
            .copied()
            .unwrap_or(0)
    }

    fn ensure_covers(&self, holder: &Holder, amount: &Coins) -> Result<(), BankError> {
        for coin in amount {
            if self.balance(holder, &coin.denom) < coin.amount {
                let account = match holder {
                    Holder::Account(a) => a.clone(),
                    Holder::Module(m) => format!("module {m}"),
                };
                return Err(BankError::InsufficientFunds {
                    account,
                    needed: amount.to_string(),
                });
            }
        }
        Ok(())
    }

    fn credit(&mut self, holder: &Holder, coin: &Coin) {
        *self
            .balances
            .entry((holder.clone(), coin.denom.clone()))
            .or_insert(0) += coin.amount;
    }

    fn debit(&mut self, holder: &Holder, coin: &Coin) {
        if let Some(balance) = self.balances.get_mut(&(holder.clone(), coin.denom.clone())) {
            *balance -= coin.amount;
        }
    }

    fn transfer(&mut self, from: &Holder, to: &Holder, amount: &Coins) -> Result<(), BankError> {
        self.ensure_covers(from, amount)?;
        for coin in amount {
            self.debit(from, coin);
            self.credit(to, coin);
        }
        Ok(())
    }
}

/// A deterministic token ledger.
///
/// Supply tracks funding, minting and burning, and can be pinned to a fixed
/// figure per denom with [`NullBank::set_supply`].
pub struct NullBank {
    ledger: Mutex<Ledger>,
}

impl NullBank {
    pub fn new() -> Self {
        Self {
            ledger: Mutex::new(Ledger::default()),
        }
    }

    /// Credit an account out of thin air (genesis allocation). Counts toward supply.
    pub fn fund(&self, account: &AccountAddress, coin: Coin) {
        let mut ledger = self.ledger.lock().unwrap();
        *ledger.supply.entry(coin.denom.clone()).or_insert(0) += coin.amount;
        ledger.credit(&Holder::Account(account.to_string()), &coin);
    }

    pub fn balance(&self, account: &AccountAddress, denom: &str) -> u128 {
        self.ledger
            .lock()
            .unwrap()
            .balance(&Holder::Account(account.to_string()), denom)
    }

    pub fn module_balance(&self, module: &str, denom: &str) -> u128 {
        self.ledger
            .lock()
            .unwrap()
            .balance(&Holder::Module(module.to_string()), denom)
    }

    /// Pin the reported supply of `denom`, regardless of actual balances.
    pub fn set_supply(&self, denom: &str, amount: u128) {
        self.ledger
            .lock()
            .unwrap()
            .supply_override
            .insert(denom.to_string(), amount);
    }

    /// Refuse every transfer into `account`.
    pub fn block_recipient(&self, account: &AccountAddress) {
        self.ledger.lock().unwrap().blocked.insert(account.to_string());
    }

    pub fn fail_mints(&self, fail: bool) {
        self.ledger.lock().unwrap().fail_mints = fail;
    }

    pub fn fail_burns(&self, fail: bool) {
        self.ledger.lock().unwrap().fail_burns = fail;
    }

    pub fn total_minted(&self, denom: &str) -> u128 {
        self.ledger.lock().unwrap().minted.get(denom).copied().unwrap_or(0)
    }

    pub fn total_burned(&self, denom: &str) -> u128 {
        self.ledger.lock().unwrap().burned.get(denom).copied().unwrap_or(0)
    }
}

impl Default for NullBank {
    fn default() -> Self {
        Self::new()
    }
}

impl Bank for NullBank {
    fn spendable_balance(&self, account: &AccountAddress, denom: &str) -> Result<u128, BankError> {
        Ok(self.balance(account, denom))
    }

    fn supply(&self, denom: &str) -> Result<u128, BankError> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger
            .supply_override
            .get(denom)
            .or_else(|| ledger.supply.get(denom))
            .copied()
            .unwrap_or(0))
    }

    fn send_account_to_module(
        &self,
        from: &AccountAddress,
        module: &str,
        amount: &Coins,
    ) -> Result<(), BankError> {
        self.ledger.lock().unwrap().transfer(
            &Holder::Account(from.to_string()),
            &Holder::Module(module.to_string()),
            amount,
        )
    }

    fn send_module_to_account(
        &self,
        module: &str,
        to: &AccountAddress,
        amount: &Coins,
    ) -> Result<(), BankError> {
        let mut ledger = self.ledger.lock().unwrap();
        if ledger.blocked.contains(to.as_str()) {
            return Err(BankError::BlockedAddress(to.to_string()));
        }
        ledger.transfer(
            &Holder::Module(module.to_string()),
            &Holder::Account(to.to_string()),
            amount,
        )
    }

    fn mint(&self, module: &str, amount: &Coins) -> Result<(), BankError> {
        let mut ledger = self.ledger.lock().unwrap();
        if ledger.fail_mints {
            return Err(BankError::Backend("injected mint failure".into()));
        }
        let holder = Holder::Module(module.to_string());
        for coin in amount {
            ledger.credit(&holder, coin);
            *ledger.supply.entry(coin.denom.clone()).or_insert(0) += coin.amount;
            *ledger.minted.entry(coin.denom.clone()).or_insert(0) += coin.amount;
        }
        Ok(())
    }

    fn burn(&self, module: &str, amount: &Coins) -> Result<(), BankError> {
        let mut ledger = self.ledger.lock().unwrap();
        if ledger.fail_burns {
            return Err(BankError::Backend("injected burn failure".into()));
        }
        let holder = Holder::Module(module.to_string());
        ledger.ensure_covers(&holder, amount)?;
        for coin in amount {
            ledger.debit(&holder, coin);
            if let Some(supply) = ledger.supply.get_mut(&coin.denom) {
                *supply = supply.saturating_sub(coin.amount);
            }
            *ledger.burned.entry(coin.denom.clone()).or_insert(0) += coin.amount;
        }
        Ok(())
    }
}
