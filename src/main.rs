use dotenv::dotenv;

use marg::cli;
use marg::engine::Engine;
use marg::external::open_route_service::OpenRouteService;
use marg::server::serve;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let provider = OpenRouteService::from_env();
    let engine = Engine::new(provider).await;

    match std::env::args().nth(1).as_deref() {
        Some("serve") => serve(engine).await,
        _ => cli::run(&engine).await.unwrap(),
    }
}
