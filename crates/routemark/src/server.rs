//! Route registration and the per-request adapter.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::response::Response;
use axum::routing::{MethodFilter, on};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use routemark_core::HttpMethod;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{debug, error, warn};

use crate::context::{ContextFunc, DefaultContext};
use crate::handler::{HandleFunc, HandleFuncWrap, apply_wraps};
use crate::options::Options;
use crate::request::{BindFunc, BoxedRequest};

const TRACE_ID_HEADER: &str = "trace-id";

/// Routing engine the generated `register_routes` methods register on.
pub struct Server {
    router: Router,
    catch_panic: bool,
    wraps: Vec<HandleFuncWrap>,
    shared: Arc<Shared>,
}

struct Shared {
    error_header: HeaderName,
    bind: BindFunc,
    context: ContextFunc,
    body_limit: usize,
}

impl Default for Server {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Server {
    pub fn new(options: Options) -> Self {
        let Options {
            router,
            error_header,
            wraps,
            bind,
            context,
            body_limit,
        } = options;
        let catch_panic = router.is_none();
        Self {
            router: router.unwrap_or_default(),
            catch_panic,
            wraps,
            shared: Arc::new(Shared {
                error_header,
                bind,
                context,
                body_limit,
            }),
        }
    }

    /// Register `handle` for `method` and `path`.
    ///
    /// `new_request` creates the zero value each request is bound onto.
    /// Panics like [`Router::route`] when the same method is registered twice
    /// on one path.
    pub fn route(
        &mut self,
        method: HttpMethod,
        path: &str,
        new_request: fn() -> BoxedRequest,
        handle: HandleFunc,
    ) {
        let adapter = Adapter {
            new_request,
            handle: apply_wraps(&self.wraps, handle),
            shared: Arc::clone(&self.shared),
        };
        let router = std::mem::take(&mut self.router);
        self.router = router.route(
            path,
            on(method_filter(method), move |request: Request| adapter.clone().call(request)),
        );
        debug!(%method, path, "route registered");
    }

    /// The router with every registered route.
    pub fn into_router(self) -> Router {
        if self.catch_panic {
            self.router.layer(CatchPanicLayer::new())
        } else {
            self.router
        }
    }

    /// Bind `addr` and serve until the listener fails.
    pub async fn serve(self, addr: impl ToSocketAddrs) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.into_router()).await
    }
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Patch => MethodFilter::PATCH,
        HttpMethod::Delete => MethodFilter::DELETE,
        HttpMethod::Head => MethodFilter::HEAD,
        HttpMethod::Options => MethodFilter::OPTIONS,
        HttpMethod::Trace => MethodFilter::TRACE,
    }
}

#[derive(Clone)]
struct Adapter {
    new_request: fn() -> BoxedRequest,
    handle: HandleFunc,
    shared: Arc<Shared>,
}

impl Adapter {
    async fn call(self, request: Request) -> Response {
        let (parts, body) = request.into_parts();
        let body = match axum::body::to_bytes(body, self.shared.body_limit).await {
            Ok(body) => body,
            Err(err) => {
                warn!(uri = %parts.uri, %err, "failed to read request body");
                return self.reject(StatusCode::BAD_REQUEST, &err.to_string());
            }
        };

        let mut req = (self.new_request)();
        if let Err(err) = (self.shared.bind)(req.as_mut(), &parts, &body) {
            warn!(uri = %parts.uri, %err, "failed to bind request");
            return self.reject(StatusCode::BAD_REQUEST, &err.to_string());
        }

        let ctx = (self.shared.context)(&parts);
        let result = (self.handle)(req, Arc::clone(&ctx)).await;

        let mut headers = HeaderMap::new();
        if let Some(ctx) = (*ctx).downcast_ref::<DefaultContext>() {
            insert_header(&mut headers, HeaderName::from_static(TRACE_ID_HEADER), &ctx.trace_id);
        }
        match result {
            Ok(reply) => {
                headers.extend(reply.headers());
                match reply.to_json() {
                    Ok(json) => respond(StatusCode::OK, headers, json),
                    Err(err) => {
                        error!(uri = %parts.uri, %err, "failed to serialize response");
                        insert_header(&mut headers, self.shared.error_header.clone(), &err.to_string());
                        respond(StatusCode::INTERNAL_SERVER_ERROR, headers, b"null".to_vec())
                    }
                }
            }
            Err(err) => {
                let status = err.status_or_internal();
                if status.is_server_error() {
                    error!(uri = %parts.uri, %status, %err, "handler failed");
                } else {
                    debug!(uri = %parts.uri, %status, %err, "handler returned an error");
                }
                insert_header(&mut headers, self.shared.error_header.clone(), &err.to_string());
                respond(status, headers, b"null".to_vec())
            }
        }
    }

    fn reject(&self, status: StatusCode, message: &str) -> Response {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, self.shared.error_header.clone(), message);
        let mut response = Response::new(Body::empty());
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

fn respond(status: StatusCode, mut headers: HeaderMap, json: Vec<u8>) -> Response {
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut response = Response::new(Body::from(json));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Control characters are replaced by spaces; values that still cannot be
/// encoded are dropped.
fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    let sanitized: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    match HeaderValue::from_bytes(sanitized.as_bytes()) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(err) => warn!(header = %name, %err, "dropping unencodable header value"),
    }
}
