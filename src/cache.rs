//! In-memory store for open booking flows using moka
//!
//! Flows are transient: nothing is persisted, and a flow nobody touches for
//! the idle timeout is dropped along with its draft.

use moka::future::Cache;
use moka::ops::compute::Op;
use serde::Serialize;
use std::future::ready;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::booking::{BookingError, BookingFlow, FlowState};

/// Open booking flows keyed by flow id
#[derive(Clone)]
pub struct FlowCache {
    flows: Cache<Uuid, BookingFlow>,
}

impl FlowCache {
    /// Create a store that evicts flows idle for longer than `idle`
    pub fn new(max_capacity: u64, idle: Duration) -> Self {
        Self {
            flows: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_idle(idle)
                .build(),
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<BookingFlow> {
        let flow = self.flows.get(&id).await;
        debug!(flow = %id, hit = flow.is_some(), "Flow lookup");
        flow
    }

    /// Store a flow, replacing any previous value for its id
    pub async fn put(&self, flow: BookingFlow) {
        self.flows.insert(flow.id, flow).await;
    }

    /// Run a transition on a stored flow while holding its key.
    ///
    /// Transitions on the same flow are serialized, so two submits can never
    /// both see it open. On success the flow is written back while it is
    /// still open and dropped once it is closed; on error the stored flow is
    /// left as it was. Returns `None` when no such flow exists.
    pub async fn update<T, F>(&self, id: Uuid, transition: F) -> Option<Result<T, BookingError>>
    where
        F: FnOnce(&mut BookingFlow) -> Result<T, BookingError>,
    {
        let mut outcome = None;

        self.flows
            .entry(id)
            .and_compute_with(|entry| {
                let op = match entry {
                    Some(entry) => {
                        let mut flow = entry.into_value();
                        let result = transition(&mut flow);
                        let op = match (&result, flow.state()) {
                            (Err(_), _) => Op::Nop,
                            (Ok(_), FlowState::Closed) => Op::Remove,
                            (Ok(_), _) => Op::Put(flow),
                        };
                        outcome = Some(result);
                        op
                    }
                    None => Op::Nop,
                };
                ready(op)
            })
            .await;

        debug!(flow = %id, found = outcome.is_some(), "Flow transition");
        outcome
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> FlowCacheStats {
        FlowCacheStats {
            open_flows: self.flows.entry_count(),
        }
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct FlowCacheStats {
    pub open_flows: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingDraft, LoggingReservationBackend, TimeSlot, TranslatorOffering};
    use chrono::NaiveDate;

    fn flow() -> BookingFlow {
        BookingFlow::open(TranslatorOffering {
            id: "1".to_string(),
            price_per_hour: 50.0,
        })
        .unwrap()
    }

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            date: NaiveDate::from_ymd_opt(2025, 1, 1),
            time: Some(TimeSlot::Ten),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_update_writes_back_open_flow() {
        let cache = FlowCache::new(10, Duration::from_secs(60));
        let flow = flow();
        let id = flow.id;
        cache.put(flow).await;

        let evaluation = cache
            .update(id, |flow| flow.edit(complete_draft()))
            .await
            .unwrap()
            .unwrap();
        assert!(evaluation.is_submittable);
        assert_eq!(cache.get(id).await.unwrap().draft(), &complete_draft());
    }

    #[tokio::test]
    async fn test_update_drops_closed_flow() {
        let cache = FlowCache::new(10, Duration::from_secs(60));
        let flow = flow();
        let id = flow.id;
        cache.put(flow).await;

        cache
            .update(id, |flow| {
                flow.cancel();
                Ok(())
            })
            .await
            .unwrap()
            .unwrap();
        assert!(cache.get(id).await.is_none());
        assert!(cache.update(id, |flow| flow.edit(complete_draft())).await.is_none());
    }

    #[tokio::test]
    async fn test_failed_transition_leaves_flow_untouched() {
        let cache = FlowCache::new(10, Duration::from_secs(60));
        let flow = flow();
        let id = flow.id;
        cache.put(flow).await;

        let result = cache
            .update(id, |flow| flow.submit(today(), &LoggingReservationBackend))
            .await
            .unwrap();
        assert!(matches!(result, Err(BookingError::MissingFields(_))));

        let stored = cache.get(id).await.unwrap();
        assert_eq!(stored.state(), FlowState::Open);
        assert_eq!(stored.draft(), &BookingDraft::default());
    }

    #[tokio::test]
    async fn test_unknown_flow_is_absent() {
        let cache = FlowCache::new(10, Duration::from_secs(60));
        assert!(cache.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_flows_expire() {
        let cache = FlowCache::new(10, Duration::from_millis(50));
        let flow = flow();
        let id = flow.id;

        cache.put(flow).await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get(id).await.is_none());
    }
}
