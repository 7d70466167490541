//! Async mutation handle with status tracking.
//!
//! # States
//! ```text
//! Idle → Pending → Success | Error
//! Pending → Idle   (mutate future dropped before settling)
//! reset() → Idle
//! ```
//!
//! # Design Decisions
//! - No retries and no in-flight de-duplication
//! - The result of `mutate` is returned unchanged; the handle only records it
//! - Callbacks run after the state is updated and outside any lock

use std::fmt;
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use serde_json::Value;
use uuid::Uuid;

use crate::hooks::keys::MutationKey;
use crate::observability::metrics;
use crate::wallet::types::{WalletError, WalletResult};

/// Lifecycle of a mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// What the handle last observed.
#[derive(Debug, Clone)]
pub struct MutationState<V, T> {
    pub status: MutationStatus,
    pub data: Option<T>,
    pub error: Option<WalletError>,
    pub variables: Option<V>,
    /// ID of the most recent `mutate` call.
    pub last_mutation_id: Option<Uuid>,
}

impl<V, T> Default for MutationState<V, T> {
    fn default() -> Self {
        Self {
            status: MutationStatus::Idle,
            data: None,
            error: None,
            variables: None,
            last_mutation_id: None,
        }
    }
}

type SuccessCallback<V, T> = Arc<dyn Fn(&T, &V) + Send + Sync>;
type ErrorCallback<V> = Arc<dyn Fn(&WalletError, &V) + Send + Sync>;
type SettledCallback<V, T> = Arc<dyn Fn(Result<&T, &WalletError>, &V) + Send + Sync>;

/// Pass-through mutation configuration.
pub struct MutationOptions<V, T> {
    /// Extra key parts appended after the wallet scope.
    pub mutation_key: Vec<Value>,
    pub on_success: Option<SuccessCallback<V, T>>,
    pub on_error: Option<ErrorCallback<V>>,
    pub on_settled: Option<SettledCallback<V, T>>,
}

impl<V, T> MutationOptions<V, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mutation_key(mut self, parts: Vec<Value>) -> Self {
        self.mutation_key = parts;
        self
    }

    pub fn on_success(mut self, f: impl Fn(&T, &V) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&WalletError, &V) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    pub fn on_settled(
        mut self,
        f: impl Fn(Result<&T, &WalletError>, &V) + Send + Sync + 'static,
    ) -> Self {
        self.on_settled = Some(Arc::new(f));
        self
    }
}

impl<V, T> Default for MutationOptions<V, T> {
    fn default() -> Self {
        Self {
            mutation_key: Vec::new(),
            on_success: None,
            on_error: None,
            on_settled: None,
        }
    }
}

impl<V, T> Clone for MutationOptions<V, T> {
    fn clone(&self) -> Self {
        Self {
            mutation_key: self.mutation_key.clone(),
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            on_settled: self.on_settled.clone(),
        }
    }
}

type MutationFn<V, T> = Arc<dyn Fn(V) -> BoxFuture<'static, WalletResult<T>> + Send + Sync>;

/// Handle around an async, side-effecting operation.
pub struct Mutation<V, T> {
    key: MutationKey,
    mutation_fn: MutationFn<V, T>,
    options: MutationOptions<V, T>,
    state: Arc<Mutex<MutationState<V, T>>>,
}

impl<V, T> Clone for Mutation<V, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            mutation_fn: self.mutation_fn.clone(),
            options: self.options.clone(),
            state: self.state.clone(),
        }
    }
}

impl<V, T> Mutation<V, T>
where
    V: Clone + Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn new(
        key: MutationKey,
        options: MutationOptions<V, T>,
        mutation_fn: impl Fn(V) -> BoxFuture<'static, WalletResult<T>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            mutation_fn: Arc::new(mutation_fn),
            options,
            state: Arc::new(Mutex::new(MutationState::default())),
        }
    }

    /// Run the mutation and record its outcome.
    pub async fn mutate(&self, variables: V) -> WalletResult<T> {
        let id = Uuid::new_v4();
        self.update(|state| {
            state.status = MutationStatus::Pending;
            state.data = None;
            state.error = None;
            state.variables = Some(variables.clone());
            state.last_mutation_id = Some(id);
        });
        tracing::debug!(mutation_id = %id, key = %self.key, "Mutation started");

        let guard = PendingGuard {
            state: self.state.clone(),
            id,
            armed: true,
        };
        let result = (self.mutation_fn)(variables.clone()).await;
        guard.disarm();

        match &result {
            Ok(data) => {
                self.update(|state| {
                    state.status = MutationStatus::Success;
                    state.data = Some(data.clone());
                });
                tracing::debug!(mutation_id = %id, entity = self.key.entity(), "Mutation succeeded");
                metrics::record_mutation(self.key.entity(), "success");
                if let Some(on_success) = &self.options.on_success {
                    on_success(data, &variables);
                }
            }
            Err(error) => {
                self.update(|state| {
                    state.status = MutationStatus::Error;
                    state.error = Some(error.clone());
                });
                tracing::warn!(mutation_id = %id, entity = self.key.entity(), error = %error, "Mutation failed");
                metrics::record_mutation(self.key.entity(), "error");
                if let Some(on_error) = &self.options.on_error {
                    on_error(error, &variables);
                }
            }
        }

        if let Some(on_settled) = &self.options.on_settled {
            on_settled(result.as_ref(), &variables);
        }

        result
    }

    /// Back to idle, forgetting data and error.
    pub fn reset(&self) {
        self.update(|state| *state = MutationState::default());
    }

    pub fn key(&self) -> &MutationKey {
        &self.key
    }

    pub fn snapshot(&self) -> MutationState<V, T> {
        self.state.lock().expect("mutation state mutex poisoned").clone()
    }

    pub fn status(&self) -> MutationStatus {
        self.state.lock().expect("mutation state mutex poisoned").status
    }

    pub fn is_idle(&self) -> bool {
        self.status() == MutationStatus::Idle
    }

    pub fn is_pending(&self) -> bool {
        self.status() == MutationStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status() == MutationStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status() == MutationStatus::Error
    }

    pub fn data(&self) -> Option<T> {
        self.state.lock().expect("mutation state mutex poisoned").data.clone()
    }

    pub fn error(&self) -> Option<WalletError> {
        self.state.lock().expect("mutation state mutex poisoned").error.clone()
    }

    pub fn variables(&self) -> Option<V> {
        self.state
            .lock()
            .expect("mutation state mutex poisoned")
            .variables
            .clone()
    }

    fn update(&self, f: impl FnOnce(&mut MutationState<V, T>)) {
        let mut state = self.state.lock().expect("mutation state mutex poisoned");
        f(&mut state);
    }
}

/// Returns the handle to idle if `mutate` is dropped while pending.
struct PendingGuard<V, T> {
    state: Arc<Mutex<MutationState<V, T>>>,
    id: Uuid,
    armed: bool,
}

impl<V, T> PendingGuard<V, T> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<V, T> Drop for PendingGuard<V, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        // A newer mutate owns the state now.
        if state.last_mutation_id == Some(self.id) && state.status == MutationStatus::Pending {
            *state = MutationState::default();
            tracing::debug!(mutation_id = %self.id, "Mutation cancelled");
        }
    }
}

impl<V, T> fmt::Debug for Mutation<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation").field("key", &self.key).finish()
    }
}
