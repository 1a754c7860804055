use std::time::Duration;

use actix_web::web;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::Client;
use serde_json::json;
use tokio::task::JoinSet;

use crate::api::AppState;

/// Load-generation parameters, overridable through the environment
/// (`SIM_CLIENTS`, `SIM_TRANSACTIONS`, `SIM_URL`).
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub clients: u32,
    pub total_transactions: u32,
    pub base_url: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            clients: 100,
            total_transactions: 1000,
            base_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_env(fallback_url: &str) -> Self {
        let defaults = Self::default();
        Self {
            clients: env_parse("SIM_CLIENTS").unwrap_or(defaults.clients),
            total_transactions: env_parse("SIM_TRANSACTIONS").unwrap_or(defaults.total_transactions),
            base_url: std::env::var("SIM_URL").unwrap_or_else(|_| fallback_url.to_string()),
        }
    }

    /// How many transactions each simulated client sends.
    pub fn transactions_per_client(&self) -> u32 {
        if self.clients == 0 {
            0
        } else {
            self.total_transactions / self.clients
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Spawn one task per simulated client and wait for all of them. The server
/// keeps running after the simulation completes.
pub async fn run(config: SimConfig, state: web::Data<AppState>) {
    state.events.record(format!(
        "Simulation started: {} clients, {} transactions total.",
        config.clients, config.total_transactions
    ));
    info!(
        "simulation: {} clients x {} transactions against {}",
        config.clients,
        config.transactions_per_client(),
        config.base_url
    );

    let http = Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
        .expect("build http client");
    let post_url = format!("{}/transactions/new", config.base_url.trim_end_matches('/'));
    let per_client = config.transactions_per_client();

    let mut clients = JoinSet::new();
    for client_id in 1..=config.clients {
        let http = http.clone();
        let post_url = post_url.clone();
        let state = state.clone();
        let peer_count = config.clients;
        clients.spawn(async move {
            simulate_client(client_id, per_client, peer_count, &post_url, &http, &state).await;
        });
    }
    while clients.join_next().await.is_some() {}

    state.events.record("Simulation finished.");
    info!("simulation finished");
}

/// POST `transactions` randomized transactions with small delays in between.
/// A failed request is recorded and skipped; the client keeps going.
async fn simulate_client(
    client_id: u32,
    transactions: u32,
    peer_count: u32,
    post_url: &str,
    http: &Client,
    state: &web::Data<AppState>,
) {
    let mut rng = StdRng::from_entropy();
    for i in 0..transactions {
        let body = json!({
            "sender": format!("client_{client_id}"),
            "recipient": format!("client_{}", rng.gen_range(1..=peer_count)),
            "amount": (rng.gen_range(1.0..100.0f64) * 100.0).round() / 100.0,
        });
        if let Err(err) = http.post(post_url).json(&body).send().await {
            warn!("client {client_id}: transaction {i} failed: {err}");
            state.events.record(format!(
                "Client {client_id} failed to send transaction {i}: {err}."
            ));
        }
        tokio::time::sleep(Duration::from_millis(rng.gen_range(10..50))).await;
    }
}

#[cfg(test)]
mod tests {
    use super::SimConfig;

    #[test]
    fn transactions_are_split_evenly_across_clients() {
        let config = SimConfig {
            clients: 100,
            total_transactions: 1000,
            base_url: String::new(),
        };
        assert_eq!(config.transactions_per_client(), 10);
    }

    #[test]
    fn zero_clients_send_nothing() {
        let config = SimConfig {
            clients: 0,
            total_transactions: 1000,
            base_url: String::new(),
        };
        assert_eq!(config.transactions_per_client(), 0);
    }

    #[test]
    fn defaults_match_the_served_address() {
        let config = SimConfig::default();
        assert_eq!(config.clients, 100);
        assert_eq!(config.total_transactions, 1000);
        assert!(config.base_url.starts_with("http://127.0.0.1"));
    }
}
