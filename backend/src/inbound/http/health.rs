//! Health endpoints driven by a single server lifecycle phase.
use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

/// Where the server is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Phase {
    /// Adapters and schema are still being built.
    Starting = 0,
    /// Accepting GraphQL traffic.
    Serving = 1,
    /// Shutting down; both endpoints fail.
    Draining = 2,
}

impl Phase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Shared health state, registered as app data.
#[derive(Debug)]
pub struct HealthState(AtomicU8);

impl Default for HealthState {
    fn default() -> Self {
        Self(AtomicU8::new(Phase::Starting as u8))
    }
}

impl HealthState {
    /// Start in [`Phase::Starting`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to [`Phase::Serving`] unless already draining.
    pub fn mark_ready(&self) {
        let _ = self.0.compare_exchange(
            Phase::Starting as u8,
            Phase::Serving as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Move to [`Phase::Draining`]; there is no way back.
    pub fn mark_draining(&self) {
        self.0.store(Phase::Draining as u8, Ordering::Release);
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.0.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Serving
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.phase() != Phase::Draining
    }
}

#[derive(Serialize)]
struct PhaseBody {
    phase: Phase,
}

fn phase_response(ok: bool, phase: Phase) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(PhaseBody { phase })
}

/// 200 while serving GraphQL, 503 before that and once draining.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    phase_response(state.is_ready(), state.phase())
}

/// 200 until the server starts draining.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    phase_response(state.is_alive(), state.phase())
}
