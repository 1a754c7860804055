mod api;
mod error;
mod ledger;
mod metrics;
mod miner;
mod sim;
mod transaction;

use std::env;
use std::time::Duration;

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use api::AppState;
use ledger::DEFAULT_DIFFICULTY;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let difficulty: u32 = env::var("DIFFICULTY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DIFFICULTY);

    println!("⛓️ Starting ledger node at http://{host}:{port} (difficulty {difficulty})");

    let state = web::Data::new(AppState::new(difficulty));

    if env::args().nth(1).as_deref() == Some("simulate") {
        let config = sim::SimConfig::from_env(&format!("http://{host}:{port}"));
        let sim_state = state.clone();
        tokio::spawn(async move {
            // Give the server a moment to start accepting connections.
            tokio::time::sleep(Duration::from_secs(2)).await;
            sim::run(config, sim_state).await;
        });
    }

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(from_fn(api::count_requests))
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
