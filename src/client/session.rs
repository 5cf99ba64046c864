//! Query-builder widget session
//!
//! A session owns everything one widget instance needs: the API it talks
//! to, its registry, the current [`BuilderState`], the bearer token and the
//! slot holding the last execution outcome. Nothing is shared between
//! sessions.
//!
//! Each run is tagged with a generation number. Only the newest run may
//! write the outcome slot, so a slow response can never overwrite a newer
//! one.

use super::executor::QueryExecutor;
use super::response::GraphQLResponse;
use crate::config::ApiConfig;
use crate::core::{
    BuilderAction, BuilderState, ExecutionError, QueryBuilderError, SchemaRegistry, SchemaRoot,
    ValidationIssue, compile, reduce, validate_executable,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

/// Result of the latest run
pub type Outcome = Result<GraphQLResponse, ExecutionError>;

struct Prepared {
    query: String,
    token: Option<String>,
    issues: Vec<ValidationIssue>,
}

#[derive(Default)]
struct OutcomeSlot {
    generation: u64,
    outcome: Option<Outcome>,
}

pub struct QuerySession {
    api: ApiConfig,
    registry: SchemaRegistry,
    state: RwLock<BuilderState>,
    token: RwLock<Option<String>>,
    executor: QueryExecutor,
    generation: AtomicU64,
    slot: Mutex<OutcomeSlot>,
}

impl QuerySession {
    /// Create a session positioned on the API's first root
    pub fn new(api: ApiConfig, executor: QueryExecutor) -> Result<Self, QueryBuilderError> {
        let registry = api.registry();
        let state = BuilderState::initial(&registry).ok_or_else(|| {
            QueryBuilderError::Config(format!("API '{}' declares no schema roots", api.name))
        })?;

        Ok(Self {
            api,
            registry,
            state: RwLock::new(state),
            token: RwLock::new(None),
            executor,
            generation: AtomicU64::new(0),
            slot: Mutex::new(OutcomeSlot::default()),
        })
    }

    /// Session over the default HTTPS transport
    #[cfg(feature = "http")]
    pub fn http(api: ApiConfig) -> anyhow::Result<Self> {
        let executor = QueryExecutor::http(crate::config::ExecutorConfig::from(&api))?;
        Ok(Self::new(api, executor)?)
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Snapshot of the current state
    pub fn state(&self) -> BuilderState {
        self.read_state().clone()
    }

    pub fn active_root(&self) -> Result<&SchemaRoot, QueryBuilderError> {
        self.registry.require(&self.read_state().root_id)
    }

    /// Apply one action through the reducer
    pub fn dispatch(&self, action: BuilderAction) -> Result<(), QueryBuilderError> {
        let root_changed = matches!(action, BuilderAction::SelectRoot(_));
        {
            let mut state = self
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let next = reduce(&state, &action, &self.registry)?;
            *state = next;
        }

        if root_changed {
            // Results for the previous root are stale
            self.executor.cancel();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *self.lock_slot() = OutcomeSlot {
                generation,
                outcome: None,
            };
        }
        Ok(())
    }

    pub fn select_root(&self, root_id: &str) -> Result<(), QueryBuilderError> {
        self.dispatch(BuilderAction::SelectRoot(root_id.to_string()))
    }

    pub fn toggle(&self, path: &str) -> Result<(), QueryBuilderError> {
        self.dispatch(BuilderAction::Toggle(path.to_string()))
    }

    pub fn set_parameter(&self, name: &str, value: &str) -> Result<(), QueryBuilderError> {
        self.dispatch(BuilderAction::SetParameter {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn reset(&self) -> Result<(), QueryBuilderError> {
        self.dispatch(BuilderAction::Reset)
    }

    /// Set or clear the bearer token
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) =
            token.filter(|t| !t.trim().is_empty());
    }

    /// Query text for the current state, recomputed on every call
    pub fn compiled(&self) -> Result<String, QueryBuilderError> {
        let state = self.read_state();
        let root = self.registry.require(&state.root_id)?;
        Ok(compile(root, &state.selection, &state.parameters))
    }

    /// Everything that keeps the current query from being sent
    pub fn validate(&self) -> Result<Vec<ValidationIssue>, QueryBuilderError> {
        self.prepare().map(|prepared| prepared.issues)
    }

    /// Compile, check and execute the current query
    ///
    /// A newer `run` (or a root change) supersedes this one: its outcome is
    /// returned to the caller but not recorded.
    pub async fn run(&self) -> Result<GraphQLResponse, QueryBuilderError> {
        let Prepared {
            query,
            token,
            issues,
        } = self.prepare()?;
        if !issues.is_empty() {
            return Err(QueryBuilderError::NotExecutable(issues));
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = self.executor.execute(&query, token.as_deref()).await;
        self.record(generation, &outcome);
        outcome.map_err(QueryBuilderError::from)
    }

    /// Compile once and validate that exact text against one state snapshot
    fn prepare(&self) -> Result<Prepared, QueryBuilderError> {
        let token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let state = self.read_state();
        let root = self.registry.require(&state.root_id)?;
        let query = compile(root, &state.selection, &state.parameters);
        let mut issues = validate_executable(root, &state.parameters, &query);
        drop(state);

        if self.api.requires_auth && token.is_none() {
            issues.push(ValidationIssue::MissingCredential);
        }
        Ok(Prepared {
            query,
            token,
            issues,
        })
    }

    fn record(&self, generation: u64, outcome: &Outcome) {
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding outcome of superseded run");
            return;
        }

        let mut slot = self.lock_slot();
        if slot.generation <= generation {
            *slot = OutcomeSlot {
                generation,
                outcome: Some(outcome.clone()),
            };
        }
    }

    /// Outcome of the newest completed run, if any
    pub fn outcome(&self) -> Option<Outcome> {
        self.lock_slot().outcome.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.executor.is_busy()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, BuilderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_slot(&self) -> MutexGuard<'_, OutcomeSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
