//! Engine service - async boundary around the risk engine.
//!
//! The engine runs on its own task and owns its snapshots; callers
//! talk to it through a cloneable handle. Every assessment carries an
//! explicit deadline, and the caller always learns which of the three
//! outcomes happened: a verdict, a timeout, or no engine.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::logic::engine::{EngineStatusReport, RiskEngine, Verdict};

const SERVICE_QUEUE_DEPTH: usize = 64;

// ============================================================================
// MESSAGES
// ============================================================================

enum ServiceRequest {
    Assess {
        id: Uuid,
        url: String,
        page_url: String,
        reply: oneshot::Sender<Verdict>,
    },
    Report {
        url: String,
    },
    Status {
        reply: oneshot::Sender<EngineStatusReport>,
    },
}

/// Tri-state result of a deadline-bounded assessment
#[derive(Debug, Clone, PartialEq)]
pub enum AssessOutcome {
    /// The engine answered within the deadline
    Verdict(Verdict),
    /// The engine is gone (not spawned, or its task ended)
    Absent,
    /// The deadline expired before an answer arrived
    TimedOut,
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct EngineService;

impl EngineService {
    /// Move the engine onto its own task and hand back the caller side.
    pub fn spawn(engine: RiskEngine) -> EngineHandle {
        let (tx, mut rx) = mpsc::channel::<ServiceRequest>(SERVICE_QUEUE_DEPTH);

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                match request {
                    ServiceRequest::Assess {
                        id,
                        url,
                        page_url,
                        reply,
                    } => {
                        let verdict = engine.assess(&url, &page_url);
                        if reply.send(verdict).is_err() {
                            // Caller gave up (deadline); the verdict is dropped
                            log::debug!("assessment {} finished after caller left", id);
                        }
                    }
                    ServiceRequest::Report { url } => {
                        log::info!("link reported by user: {}", url);
                    }
                    ServiceRequest::Status { reply } => {
                        let _ = reply.send(engine.status());
                    }
                }
            }
            log::info!("engine service stopped");
        });

        EngineHandle { tx }
    }
}

#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<ServiceRequest>,
}

impl EngineHandle {
    /// Assess a link, waiting at most `deadline` for the verdict.
    pub async fn assess(&self, url: &str, page_url: &str, deadline: Duration) -> AssessOutcome {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = ServiceRequest::Assess {
            id: Uuid::new_v4(),
            url: url.to_string(),
            page_url: page_url.to_string(),
            reply: reply_tx,
        };

        if self.tx.send(request).await.is_err() {
            return AssessOutcome::Absent;
        }

        match tokio::time::timeout(deadline, reply_rx).await {
            Ok(Ok(verdict)) => AssessOutcome::Verdict(verdict),
            Ok(Err(_)) => AssessOutcome::Absent,
            Err(_) => {
                log::warn!("assessment deadline ({:?}) expired for {}", deadline, url);
                AssessOutcome::TimedOut
            }
        }
    }

    /// Fire-and-forget user report. A full queue drops the report.
    pub fn report(&self, url: &str) {
        let request = ServiceRequest::Report {
            url: url.to_string(),
        };
        if self.tx.try_send(request).is_err() {
            log::warn!("report dropped, engine queue unavailable");
        }
    }

    pub async fn status(&self) -> Option<EngineStatusReport> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .tx
            .send(ServiceRequest::Status { reply: reply_tx })
            .await
            .is_err()
        {
            return None;
        }
        reply_rx.await.ok()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::engine::RiskLevel;
    use crate::logic::feed::FeedSnapshot;

    fn spawn_engine() -> EngineHandle {
        let feed = FeedSnapshot::from_entries(
            vec!["evil.example.net".to_string()],
            "test feed",
        );
        EngineService::spawn(RiskEngine::new(feed, None))
    }

    #[tokio::test]
    async fn test_assess_roundtrip() {
        let handle = spawn_engine();
        let outcome = handle
            .assess(
                "https://example.com/page",
                "https://example.com",
                Duration::from_secs(1),
            )
            .await;

        match outcome {
            AssessOutcome::Verdict(v) => assert_eq!(v.level, RiskLevel::Safe),
            other => panic!("expected verdict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_feed_hit_through_service() {
        let handle = spawn_engine();
        let outcome = handle
            .assess("https://evil.example.net/x", "", Duration::from_secs(1))
            .await;

        match outcome {
            AssessOutcome::Verdict(v) => {
                assert_eq!(v.level, RiskLevel::Dangerous);
                assert_eq!(v.score, 5);
            }
            other => panic!("expected verdict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_closed_channel_is_absent() {
        let handle = {
            let (tx, rx) = mpsc::channel(1);
            drop(rx);
            EngineHandle { tx }
        };

        let outcome = handle
            .assess("https://example.com", "", Duration::from_secs(1))
            .await;
        assert_eq!(outcome, AssessOutcome::Absent);
        assert!(handle.status().await.is_none());
    }

    #[tokio::test]
    async fn test_unserved_request_times_out() {
        // A channel nobody drains: the send succeeds, no reply ever comes
        let (tx, _rx) = mpsc::channel(1);
        let handle = EngineHandle { tx };

        let outcome = handle
            .assess("https://example.com", "", Duration::from_millis(20))
            .await;
        assert_eq!(outcome, AssessOutcome::TimedOut);
    }

    #[tokio::test]
    async fn test_status_reports_feed_size() {
        let handle = spawn_engine();
        let report = handle.status().await.unwrap();
        assert_eq!(report.feed.total_entries, 1);
        assert!(!report.model.loaded);
    }
}
