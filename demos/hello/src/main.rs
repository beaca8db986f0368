//! Demo server whose routes come from `@RequestMapping` annotations.
//!
//! ```sh
//! cargo run -p hello-demo
//! curl 'localhost:8080/hello?name=ada'
//! ```

mod api;
mod models;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use routemark::{
    BoxedContext, BoxedRequest, DefaultContext, HandleFunc, HandleResult, Options, Server,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

type CallFuture = Pin<Box<dyn Future<Output = HandleResult> + Send>>;

/// Logs every handler call with its trace id and duration.
fn log_calls(next: HandleFunc) -> HandleFunc {
    Arc::new(move |req: BoxedRequest, ctx: BoxedContext| -> CallFuture {
        let trace_id = (*ctx)
            .downcast_ref::<DefaultContext>()
            .map(|ctx| ctx.trace_id.clone())
            .unwrap_or_default();
        let started = Instant::now();
        let call = next(req, ctx);
        Box::pin(async move {
            let result = call.await;
            info!(%trace_id, ok = result.is_ok(), elapsed = ?started.elapsed(), "handled");
            result
        })
    })
}

fn server() -> Server {
    let mut server = Server::new(Options::new().wrap(log_calls));
    Arc::new(api::Greeter).register_routes(&mut server);
    Arc::new(api::PetStore::default()).register_routes(&mut server);
    server
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let addr = "127.0.0.1:8080";
    info!("listening on {addr}");
    server().serve(addr).await
}
