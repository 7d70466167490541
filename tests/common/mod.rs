//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use wallet_kit::registry::{Registration, WalletRegistry};
use wallet_kit::wallet::events::{ChangeListener, Emitter, Subscription, WalletChange};
use wallet_kit::wallet::features::{
    Feature, FeatureSet, SignAndExecuteTransaction, SignPersonalMessage, SignTransaction,
    StandardConnect, StandardDisconnect, StandardEvents,
};
use wallet_kit::wallet::types::{
    ConnectInput, ConnectOutput, ExecutedTransaction, SignAndExecuteTransactionInput,
    SignPersonalMessageInput, SignTransactionInput, SignedMessage, SignedTransaction,
};
use wallet_kit::{Wallet, WalletAccount, WalletError, WalletResult};

pub const MOCK_CHAIN: &str = "mock:devnet";

static ACCOUNT_COUNTER: AtomicU32 = AtomicU32::new(0);

/// An account with a unique address.
pub fn create_mock_account() -> WalletAccount {
    let n = ACCOUNT_COUNTER.fetch_add(1, Ordering::SeqCst);
    WalletAccount::new(format!("0x{:040x}", n + 1), vec![n as u8; 32])
        .with_chains(vec![MOCK_CHAIN.to_string()])
}

/// Configurable in-memory wallet.
pub struct MockWallet {
    name: String,
    features: FeatureSet,
    accounts: Mutex<Vec<WalletAccount>>,
    pub events: Emitter<WalletChange>,
    /// Emitted synchronously from inside `on_change`.
    emit_on_subscribe: Option<WalletChange>,
    failure: Mutex<Option<WalletError>>,
    disconnect_failure: Option<WalletError>,
    /// `connect` waits here before answering.
    connect_gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<String>>,
    last_transaction: Mutex<Option<SignTransactionInput>>,
    last_message: Mutex<Option<SignPersonalMessageInput>>,
}

impl MockWallet {
    /// A wallet with connect and events, and no accounts.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            features: [Feature::Connect, Feature::Events].into_iter().collect(),
            accounts: Mutex::new(Vec::new()),
            events: Emitter::new(),
            emit_on_subscribe: None,
            failure: Mutex::new(None),
            disconnect_failure: None,
            connect_gate: None,
            calls: Mutex::new(Vec::new()),
            last_transaction: Mutex::new(None),
            last_message: Mutex::new(None),
        }
    }

    /// A wallet supporting every typed feature.
    pub fn full(name: &str) -> Self {
        Self::new(name).with_features(&[
            Feature::Disconnect,
            Feature::SignPersonalMessage,
            Feature::SignTransaction,
            Feature::SignAndExecuteTransaction,
        ])
    }

    pub fn with_features(mut self, features: &[Feature]) -> Self {
        self.features.extend(features.iter().cloned());
        self
    }

    pub fn without_feature(mut self, feature: Feature) -> Self {
        self.features.remove(&feature);
        self
    }

    pub fn with_accounts(self, accounts: Vec<WalletAccount>) -> Self {
        *self.accounts.lock().unwrap() = accounts;
        self
    }

    pub fn emitting_on_subscribe(mut self, change: WalletChange) -> Self {
        self.emit_on_subscribe = Some(change);
        self
    }

    pub fn failing_disconnect(mut self, error: WalletError) -> Self {
        self.disconnect_failure = Some(error);
        self
    }

    /// Hold `connect` until `gate` is notified. A gate nobody notifies makes
    /// `connect` hang.
    pub fn with_connect_gate(mut self, gate: Arc<Notify>) -> Self {
        self.connect_gate = Some(gate);
        self
    }

    /// Make every subsequent wallet call fail with `error`.
    pub fn fail_with(&self, error: WalletError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn set_accounts(&self, accounts: Vec<WalletAccount>) {
        *self.accounts.lock().unwrap() = accounts.clone();
        self.events.emit(&WalletChange::accounts(accounts));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_transaction(&self) -> Option<SignTransactionInput> {
        self.last_transaction.lock().unwrap().clone()
    }

    pub fn last_message(&self) -> Option<SignPersonalMessageInput> {
        self.last_message.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> WalletResult<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn has(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

impl Wallet for MockWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn chains(&self) -> Vec<String> {
        vec![MOCK_CHAIN.to_string()]
    }

    fn accounts(&self) -> Vec<WalletAccount> {
        self.accounts.lock().unwrap().clone()
    }

    fn connect_feature(&self) -> Option<&dyn StandardConnect> {
        self.has(Feature::Connect).then_some(self as &dyn StandardConnect)
    }

    fn disconnect_feature(&self) -> Option<&dyn StandardDisconnect> {
        self.has(Feature::Disconnect).then_some(self as &dyn StandardDisconnect)
    }

    fn events_feature(&self) -> Option<&dyn StandardEvents> {
        self.has(Feature::Events).then_some(self as &dyn StandardEvents)
    }

    fn sign_personal_message_feature(&self) -> Option<&dyn SignPersonalMessage> {
        self.has(Feature::SignPersonalMessage)
            .then_some(self as &dyn SignPersonalMessage)
    }

    fn sign_transaction_feature(&self) -> Option<&dyn SignTransaction> {
        self.has(Feature::SignTransaction)
            .then_some(self as &dyn SignTransaction)
    }

    fn sign_and_execute_transaction_feature(&self) -> Option<&dyn SignAndExecuteTransaction> {
        self.has(Feature::SignAndExecuteTransaction)
            .then_some(self as &dyn SignAndExecuteTransaction)
    }

    fn additional_features(&self) -> Vec<Feature> {
        self.features
            .iter()
            .filter(|f| matches!(f, Feature::Custom(_)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StandardConnect for MockWallet {
    async fn connect(&self, _input: ConnectInput) -> WalletResult<ConnectOutput> {
        self.record("connect")?;
        if let Some(gate) = &self.connect_gate {
            gate.notified().await;
        }
        Ok(ConnectOutput {
            accounts: self.accounts(),
        })
    }
}

#[async_trait]
impl StandardDisconnect for MockWallet {
    async fn disconnect(&self) -> WalletResult<()> {
        self.record("disconnect")?;
        match &self.disconnect_failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl StandardEvents for MockWallet {
    fn on_change(&self, listener: ChangeListener) -> Subscription {
        if let Some(change) = &self.emit_on_subscribe {
            listener(change);
        }
        self.events.subscribe(listener)
    }
}

#[async_trait]
impl SignPersonalMessage for MockWallet {
    async fn sign_personal_message(
        &self,
        input: SignPersonalMessageInput,
    ) -> WalletResult<SignedMessage> {
        self.record("sign_personal_message")?;
        let signed = SignedMessage {
            bytes: String::from_utf8_lossy(&input.message).into_owned(),
            signature: format!("signed-by-{}", input.account.address),
        };
        *self.last_message.lock().unwrap() = Some(input);
        Ok(signed)
    }
}

#[async_trait]
impl SignTransaction for MockWallet {
    async fn sign_transaction(
        &self,
        input: SignTransactionInput,
    ) -> WalletResult<SignedTransaction> {
        self.record("sign_transaction")?;
        let signed = SignedTransaction {
            transaction_bytes: format!("{:?}", input.transaction),
            signature: format!("signed-by-{}", input.account.address),
        };
        *self.last_transaction.lock().unwrap() = Some(input);
        Ok(signed)
    }
}

#[async_trait]
impl SignAndExecuteTransaction for MockWallet {
    async fn sign_and_execute_transaction(
        &self,
        input: SignAndExecuteTransactionInput,
    ) -> WalletResult<ExecutedTransaction> {
        self.record("sign_and_execute_transaction")?;
        Ok(ExecutedTransaction {
            digest: format!("digest-{}", input.account.address),
            raw: json!({ "requestType": input.request_type, "options": input.options }),
        })
    }
}

/// Register `wallet`, returning both the concrete and the trait-object handle.
pub fn register_mock_wallet(
    registry: &WalletRegistry,
    wallet: MockWallet,
) -> (Arc<MockWallet>, Arc<dyn Wallet>, Registration) {
    let wallet = Arc::new(wallet);
    let handle: Arc<dyn Wallet> = wallet.clone();
    let registration = registry
        .register(handle.clone())
        .expect("mock wallet registration failed");
    (wallet, handle, registration)
}
