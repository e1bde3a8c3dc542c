use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_fit::scoring::{
    ConfigStore, PlanTier, ScoredCandidate, ScoringEventStore, StoreError, StoredScoringConfig,
    TenantId, ValidatedOverride,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryConfigStore {
    records: Arc<Mutex<HashMap<TenantId, StoredScoringConfig>>>,
}

impl InMemoryConfigStore {
    pub(crate) fn seed(
        &self,
        tenant: TenantId,
        plan: PlanTier,
        overrides: Option<ValidatedOverride>,
    ) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("config store lock poisoned".to_string()))?;
        guard.insert(
            tenant,
            StoredScoringConfig {
                plan: Some(plan),
                overrides,
            },
        );
        Ok(())
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load(&self, tenant: &TenantId) -> Result<StoredScoringConfig, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("config store lock poisoned".to_string()))?;
        guard.get(tenant).cloned().ok_or(StoreError::NotFound)
    }

    fn replace_override(
        &self,
        tenant: &TenantId,
        overrides: ValidatedOverride,
    ) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("config store lock poisoned".to_string()))?;
        guard.entry(tenant.clone()).or_default().overrides = Some(overrides);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEventStore {
    events: Arc<Mutex<Vec<(TenantId, ScoredCandidate)>>>,
}

impl ScoringEventStore for InMemoryEventStore {
    fn record(&self, tenant: &TenantId, scored: ScoredCandidate) -> Result<(), StoreError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| StoreError::Unavailable("event store lock poisoned".to_string()))?;
        guard.push((tenant.clone(), scored));
        Ok(())
    }
}

impl InMemoryEventStore {
    #[cfg(test)]
    pub(crate) fn events(&self) -> Vec<(TenantId, ScoredCandidate)> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_plan(raw: &str) -> Result<PlanTier, String> {
    PlanTier::parse(raw)
        .ok_or_else(|| format!("unknown plan '{raw}', expected free, pro or enterprise"))
}
