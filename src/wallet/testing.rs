//! Minimal wallet for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::wallet::events::{ChangeListener, Emitter, Subscription, WalletChange};
use crate::wallet::features::{Feature, StandardConnect, StandardEvents};
use crate::wallet::standard::Wallet;
use crate::wallet::types::{ConnectInput, ConnectOutput, WalletAccount, WalletResult};

pub(crate) struct TestWallet {
    name: String,
    accounts: Mutex<Vec<WalletAccount>>,
    extra: Vec<Feature>,
    pub(crate) events: Emitter<WalletChange>,
}

impl TestWallet {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            accounts: Mutex::new(Vec::new()),
            extra: Vec::new(),
            events: Emitter::new(),
        }
    }

    pub(crate) fn with_accounts(self, addresses: &[&str]) -> Self {
        *self.accounts.lock().unwrap() = addresses.iter().map(|a| account(a)).collect();
        self
    }

    pub(crate) fn with_feature(mut self, feature: Feature) -> Self {
        self.extra.push(feature);
        self
    }

    pub(crate) fn arc(self) -> Arc<dyn Wallet> {
        Arc::new(self)
    }
}

pub(crate) fn account(address: &str) -> WalletAccount {
    WalletAccount::new(address, vec![0u8; 32]).with_chains(vec!["test:local".to_string()])
}

impl Wallet for TestWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn chains(&self) -> Vec<String> {
        vec!["test:local".to_string()]
    }

    fn accounts(&self) -> Vec<WalletAccount> {
        self.accounts.lock().unwrap().clone()
    }

    fn connect_feature(&self) -> Option<&dyn StandardConnect> {
        Some(self)
    }

    fn events_feature(&self) -> Option<&dyn StandardEvents> {
        Some(self)
    }

    fn additional_features(&self) -> Vec<Feature> {
        self.extra.clone()
    }
}

#[async_trait]
impl StandardConnect for TestWallet {
    async fn connect(&self, _input: ConnectInput) -> WalletResult<ConnectOutput> {
        Ok(ConnectOutput {
            accounts: self.accounts(),
        })
    }
}

impl StandardEvents for TestWallet {
    fn on_change(&self, listener: ChangeListener) -> Subscription {
        self.events.subscribe(listener)
    }
}
