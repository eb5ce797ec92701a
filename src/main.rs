//! LinkShield Core - Main Entry Point

mod api;
mod logic;
pub mod constants;

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use api::{AssessOutcome, EngineHandle, EngineService, Request, Response};
use logic::engine::RiskEngine;
use logic::feed::FeedSnapshot;
use logic::gate::{drive_link_activation, GateEffect, GateEvent, NavigationGate};
use logic::model;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    // Snapshots load concurrently; order between them is irrelevant
    let feed_path = constants::feed_path();
    let model_path = constants::model_path();
    let (feed, model) = tokio::join!(
        tokio::task::spawn_blocking({
            let path = feed_path.clone();
            move || FeedSnapshot::load(&path)
        }),
        tokio::task::spawn_blocking({
            let path = model_path.clone();
            move || model::load_model(&path)
        }),
    );
    let feed = feed.unwrap_or_else(|_| FeedSnapshot::empty());
    let model = model.ok().flatten();

    log::info!(
        "Offline feed: {} entries from {}",
        feed.len(),
        feed_path.display()
    );
    if model.is_some() {
        log::info!("URL model loaded from {}", model_path.display());
    } else {
        log::info!("URL model not found - using heuristics only");
    }

    let engine = RiskEngine::new(feed, model);
    let handle = EngineService::spawn(engine);
    let deadline = constants::assess_timeout();

    let mut gate = NavigationGate::new();
    gate.subscribe(Box::new(|state| {
        log::debug!("gate state: {}", state.name());
    }));

    log::info!("Reading requests from stdin (one JSON object or URL per line)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('{') {
            let response = dispatch(&handle, line, deadline).await;
            print_response(&response);
        } else {
            // Bare "URL [PAGE_URL]" lines go through the navigation gate
            let mut parts = line.split_whitespace();
            let url = parts.next().unwrap_or_default();
            let page_url = parts.next().unwrap_or_default();
            run_gate(&mut gate, &handle, url, page_url, deadline).await;
        }
    }

    log::info!("stdin closed, shutting down");
}

/// Handle one JSON request line
async fn dispatch(handle: &EngineHandle, line: &str, deadline: Duration) -> Response {
    let id = Uuid::new_v4().to_string();

    let request: Request = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            return Response::Error {
                id,
                message: format!("invalid request: {}", e),
            }
        }
    };

    match request {
        Request::AssessLink { url, page_url } => {
            match handle.assess(&url, &page_url, deadline).await {
                AssessOutcome::Verdict(verdict) => Response::Verdict { id, verdict },
                AssessOutcome::TimedOut => Response::Error {
                    id,
                    message: "assessment timed out".to_string(),
                },
                AssessOutcome::Absent => Response::Error {
                    id,
                    message: "engine unavailable".to_string(),
                },
            }
        }
        Request::ReportLink { url } => {
            handle.report(&url);
            Response::Ack { id }
        }
        Request::EngineStatus => match handle.status().await {
            Some(report) => Response::Status { id, report },
            None => Response::Error {
                id,
                message: "engine unavailable".to_string(),
            },
        },
    }
}

/// Drive one link activation through the gate and log the outcome
async fn run_gate(
    gate: &mut NavigationGate,
    handle: &EngineHandle,
    url: &str,
    page_url: &str,
    deadline: Duration,
) {
    let effects = drive_link_activation(gate, handle, url, page_url, deadline).await;
    for effect in effects {
        match effect {
            GateEffect::PresentVerdict(verdict) => {
                log::info!(
                    "{} -> {} (score {}): {}",
                    url,
                    verdict.level.as_str(),
                    verdict.score,
                    verdict.reasons.join(" ")
                );
                // No interactive user here; release the gate for the next line
                gate.handle_event(GateEvent::GoBack);
            }
            GateEffect::Navigate { url } => {
                log::info!("navigation allowed: {}", url);
            }
            GateEffect::RequestAssessment { .. } | GateEffect::SendReport { .. } => {}
        }
    }
}

fn print_response(response: &Response) {
    match serde_json::to_string(response) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("failed to serialize response: {}", e),
    }
}
