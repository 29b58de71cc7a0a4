//! Request correlation middleware.
//!
//! A caller-supplied `trace-id` header is kept when it holds a UUID; any other
//! request gets a fresh one. The id is put in task-local scope, attached to a
//! per-request tracing span and echoed on the response.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Correlation middleware; wrap the whole app with it.
///
/// Handlers and domain errors read the id via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bookshelf::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn inbound_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    let raw = req.headers().get(TRACE_ID_HEADER)?.to_str().ok()?;
    TraceId::from_header(raw)
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(TraceId::generate);
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = req.path(),
        );
        let fut = self.service.call(req);
        let handled = async move {
            let mut res = fut.await?;
            // A hyphenated UUID is always a valid header value.
            if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
                res.response_mut()
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            debug!(status = res.status().as_u16(), "request completed");
            Ok(res)
        };
        Box::pin(TraceId::scope(trace_id, handled.instrument(span)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    const CALLER_TRACE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn echo_scope(inbound: Option<&str>) -> (String, String) {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let scoped = TraceId::current().map(|id| id.to_string());
                HttpResponse::Ok().body(scoped.unwrap_or_default())
            }),
        ))
        .await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = inbound {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        let body = test::read_body(res).await;
        (header, String::from_utf8(body.to_vec()).expect("utf8 body"))
    }

    #[rstest]
    #[case::absent(None)]
    #[case::garbage(Some("not-a-uuid"))]
    #[case::empty(Some(""))]
    #[actix_web::test]
    async fn generates_an_id_when_none_is_usable(#[case] inbound: Option<&str>) {
        let (header, scoped) = echo_scope(inbound).await;
        assert!(header.parse::<TraceId>().is_ok());
        assert_ne!(Some(header.as_str()), inbound);
        assert_eq!(header, scoped);
    }

    #[rstest]
    #[case::canonical(CALLER_TRACE)]
    #[case::padded(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
    #[actix_web::test]
    async fn keeps_a_caller_supplied_uuid(#[case] inbound: &str) {
        let (header, scoped) = echo_scope(Some(inbound)).await;
        assert_eq!(header, CALLER_TRACE);
        assert_eq!(scoped, CALLER_TRACE);
    }

    #[actix_web::test]
    async fn domain_errors_capture_the_request_trace_id() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let error = DomainError::internal("boom");
                HttpResponse::Ok().body(error.trace_id().unwrap_or_default().to_owned())
            }),
        ))
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((TRACE_ID_HEADER, CALLER_TRACE))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, CALLER_TRACE.as_bytes());
    }
}
