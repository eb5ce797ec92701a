//! Navigation Gate - Link-activation decision state machine
//!
//! Pure state machine decoupled from any rendering:
//! `Idle -> Assessing -> {Blocked, Allowed}`. Rendering is a
//! subscriber reacting to state transitions; side effects come back to
//! the caller as explicit `GateEffect`s.
//!
//! Policy: never trap the user. If no verdict arrives before the
//! deadline, the gate fails open and the navigation proceeds
//! unassessed.

use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;

use super::engine::Verdict;
use crate::api::service::{AssessOutcome, EngineHandle};

// ============================================================================
// STATES, EVENTS, EFFECTS
// ============================================================================

/// Gate states for one navigation intent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GateState {
    /// No navigation in flight
    Idle,
    /// Waiting on the engine's verdict
    Assessing { url: String, page_url: String },
    /// Verdict received; navigation held for acknowledgment
    Blocked { url: String, verdict: Verdict },
    /// Navigation released (user proceeded, or fail-open)
    Allowed { url: String, assessed: bool },
}

impl GateState {
    pub fn name(&self) -> &'static str {
        match self {
            GateState::Idle => "idle",
            GateState::Assessing { .. } => "assessing",
            GateState::Blocked { .. } => "blocked",
            GateState::Allowed { .. } => "allowed",
        }
    }
}

/// Inputs driving the gate
#[derive(Debug, Clone)]
pub enum GateEvent {
    /// A link was activated on a page
    LinkActivated { url: String, page_url: String },
    /// The engine answered within the deadline
    VerdictReceived(Verdict),
    /// Deadline expired or the channel failed: no verdict
    NoVerdict,
    /// User chose to continue to the link
    Proceed,
    /// User went back / dismissed the warning
    GoBack,
    /// User reported the link (side channel; state unchanged)
    Report,
}

/// Side effects for the caller to perform
#[derive(Debug, Clone, PartialEq)]
pub enum GateEffect {
    /// Ask the engine for a verdict on this link
    RequestAssessment { url: String, page_url: String },
    /// Show the verdict and wait for acknowledgment
    PresentVerdict(Verdict),
    /// Perform the navigation
    Navigate { url: String },
    /// Forward a report of this link (fire-and-forget)
    SendReport { url: String },
}

// ============================================================================
// NAVIGATION GATE
// ============================================================================

type Subscriber = Box<dyn Fn(&GateState) + Send + Sync>;

pub struct NavigationGate {
    state: GateState,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl NavigationGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Register a renderer reacting to state transitions
    pub fn subscribe(&self, subscriber: Subscriber) {
        self.subscribers.write().push(subscriber);
    }

    /// Feed one event through the machine. Returns the effects the
    /// caller must perform; invalid events in the current state are
    /// ignored (no transition, no effects).
    pub fn handle_event(&mut self, event: GateEvent) -> Vec<GateEffect> {
        let (next, effects) = transition(&self.state, event);

        if let Some(next) = next {
            log::debug!("gate: {} -> {}", self.state.name(), next.name());
            self.state = next;
            for subscriber in self.subscribers.read().iter() {
                subscriber(&self.state);
            }
        }

        effects
    }
}

impl Default for NavigationGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure transition function: (state, event) -> (next state, effects)
fn transition(state: &GateState, event: GateEvent) -> (Option<GateState>, Vec<GateEffect>) {
    match (state, event) {
        (GateState::Idle, GateEvent::LinkActivated { url, page_url }) => (
            Some(GateState::Assessing {
                url: url.clone(),
                page_url: page_url.clone(),
            }),
            vec![GateEffect::RequestAssessment { url, page_url }],
        ),

        (GateState::Assessing { url, .. }, GateEvent::VerdictReceived(verdict)) => (
            Some(GateState::Blocked {
                url: url.clone(),
                verdict: verdict.clone(),
            }),
            vec![GateEffect::PresentVerdict(verdict)],
        ),

        // Fail open: availability over strict safety
        (GateState::Assessing { url, .. }, GateEvent::NoVerdict) => (
            Some(GateState::Allowed {
                url: url.clone(),
                assessed: false,
            }),
            vec![GateEffect::Navigate { url: url.clone() }],
        ),

        (GateState::Blocked { url, .. }, GateEvent::Proceed) => (
            Some(GateState::Allowed {
                url: url.clone(),
                assessed: true,
            }),
            vec![GateEffect::Navigate { url: url.clone() }],
        ),

        (GateState::Blocked { .. }, GateEvent::GoBack) => (Some(GateState::Idle), vec![]),

        // Report is a side channel; the navigation state stays Blocked
        (GateState::Blocked { url, .. }, GateEvent::Report) => (
            None,
            vec![GateEffect::SendReport { url: url.clone() }],
        ),

        // A finished navigation resets on the next activation
        (GateState::Allowed { .. }, GateEvent::LinkActivated { url, page_url }) => (
            Some(GateState::Assessing {
                url: url.clone(),
                page_url: page_url.clone(),
            }),
            vec![GateEffect::RequestAssessment { url, page_url }],
        ),

        _ => (None, vec![]),
    }
}

// ============================================================================
// ASYNC DRIVER
// ============================================================================

/// Bridge one link activation across the engine boundary.
///
/// Issues the assessment with an explicit deadline and maps the
/// tri-state outcome onto gate events: a verdict blocks, anything else
/// fails open. Returns all effects produced along the way.
pub async fn drive_link_activation(
    gate: &mut NavigationGate,
    engine: &EngineHandle,
    url: &str,
    page_url: &str,
    deadline: Duration,
) -> Vec<GateEffect> {
    let mut effects = gate.handle_event(GateEvent::LinkActivated {
        url: url.to_string(),
        page_url: page_url.to_string(),
    });

    let requested = effects
        .iter()
        .any(|e| matches!(e, GateEffect::RequestAssessment { .. }));
    if !requested {
        return effects;
    }

    let followup = match engine.assess(url, page_url, deadline).await {
        AssessOutcome::Verdict(verdict) => gate.handle_event(GateEvent::VerdictReceived(verdict)),
        AssessOutcome::Absent | AssessOutcome::TimedOut => gate.handle_event(GateEvent::NoVerdict),
    };

    effects.extend(followup);
    effects
}

// ============================================================================
// TESTS
// ============================================================================
