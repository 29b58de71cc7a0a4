//! Prometheus request metrics behind the `metrics` feature.
//!
//! Registry construction may fail; the server then runs without `/metrics`
//! rather than refusing to start.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// Metric name prefix.
pub(crate) const METRICS_NAMESPACE: &str = "bookshelf";
/// Scrape endpoint served by the middleware itself.
pub(crate) const METRICS_PATH: &str = "/metrics";

/// Build the default registry, logging and returning `None` on failure.
pub(crate) fn prometheus_metrics() -> Option<PrometheusMetrics> {
    build_or_warn(|| {
        PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
            .endpoint(METRICS_PATH)
            .build()
    })
}

fn build_or_warn<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    build()
        .inspect_err(|e| {
            warn!(error = %e, "metrics initialisation failed; continuing without /metrics");
        })
        .ok()
}

/// Middleware that records metrics when a registry was built and passes
/// requests straight through otherwise.
///
/// Both branches box the inner service so the app type does not depend on
/// whether metrics are active.
#[derive(Clone)]
pub(crate) struct MetricsLayer(Option<PrometheusMetrics>);

impl MetricsLayer {
    #[must_use]
    pub(crate) const fn new(metrics: Option<PrometheusMetrics>) -> Self {
        Self(metrics)
    }

    #[cfg(test)]
    const fn is_enabled(&self) -> bool {
        self.0.is_some()
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Some(metrics) = self.0.clone() else {
            let passthrough = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
            return Box::pin(async move { Ok(boxed::service(passthrough)) });
        };
        let fut = Compat::new(metrics).new_transform(service);
        Box::pin(async move { Ok(boxed::service(fut.await?)) })
    }
}
