//! Correlation id shared by a GraphQL request, its log lines and any error
//! it returns.
//!
//! [`Trace`](crate::middleware::Trace) opens the scope; code underneath asks
//! [`TraceId::current`]. The value lives in a tokio task-local, which a
//! `tokio::spawn` or `spawn_blocking` closure does not see unless it is
//! re-entered with [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header used to accept and echo the correlation id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID correlating one request end to end.
///
/// # Examples
/// ```
/// use bookshelf::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::from_header(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ").unwrap();
/// assert_eq!(TraceId::current(), None);
/// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id for a request that did not bring one.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept a caller-supplied header value when it holds a UUID.
    #[must_use]
    pub fn from_header(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    /// Id of the request being handled on this task.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Drive `fut` with `id` visible to [`TraceId::current`].
    pub async fn scope<F: Future>(id: Self, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
