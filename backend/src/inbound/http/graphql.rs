//! GraphQL endpoint handlers.
//!
//! ```text
//! POST /graphql
//! Authorization: Bearer <token>
//! {"query":"{ me { username bookCount } }"}
//! ```

use actix_web::http::header;
use actix_web::{HttpRequest, web};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use tracing::debug;

use super::auth::derive_context;
use super::state::HttpState;

/// Path serving GraphQL requests.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Execute one GraphQL request with the caller identity derived from the
/// `Authorization` header.
pub async fn graphql(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: GraphQLRequest,
) -> GraphQLResponse {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => value.to_str().ok().or_else(|| {
            debug!("authorization header is not valid ASCII");
            None
        }),
        None => None,
    };
    let context = derive_context(authorization, state.tokens.as_ref());
    if let Some(identity) = context.identity() {
        debug!(user_id = %identity.id, "executing GraphQL request as authenticated user");
    }
    state
        .schema
        .execute(body.into_inner().data(context))
        .await
        .into()
}

/// GraphiQL explorer for local development.
#[cfg(debug_assertions)]
pub async fn graphiql() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            async_graphql::http::GraphiQLSource::build()
                .endpoint(GRAPHQL_PATH)
                .finish(),
        )
}

/// Register the GraphQL resource. The explorer is only mounted in debug builds.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bookshelf::inbound::http::graphql::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    let resource = web::resource(GRAPHQL_PATH).route(web::post().to(graphql));
    #[cfg(debug_assertions)]
    let resource = resource.route(web::get().to(graphiql));
    cfg.service(resource);
}
