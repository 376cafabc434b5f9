use http::Method;
use micro_http_client::{HttpAdapter, RequestHeaders};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let uri = std::env::args().nth(1).unwrap_or_else(|| "http://127.0.0.1:8080/".to_owned());

    let adapter = HttpAdapter::new();
    let headers = RequestHeaders::from([("Accept", "*/*")]);
    match adapter.make_request(Method::GET, uri.as_str(), None, headers).await {
        Ok(response) => {
            info!(status = %response.status(), headers = response.headers().len(), body_size = response.body().len(), "got response");
            println!("{}", String::from_utf8_lossy(response.body()));
        }
        Err(e) => error!(cause = %e, "request failed"),
    }
}
