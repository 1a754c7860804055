use actix_web::{HttpResponse, Responder, get, web};
use log::{error, warn};

use super::models::{AppState, MessageResponse, MineResponse};
use crate::error::LedgerError;

/// Mine the pending pool into a new block.
#[get("/mine")]
pub async fn mine(state: web::Data<AppState>) -> impl Responder {
    match state.miner.mine(&state.ledger) {
        Ok(block) => {
            state.metrics.record_block();
            state.events.record(format!(
                "Block {} mined with {} transactions.",
                block.index,
                block.transactions.len()
            ));
            HttpResponse::Ok().json(MineResponse {
                message: "New block mined.".to_string(),
                block,
            })
        }
        Err(LedgerError::EmptyPool) => {
            warn!("mine request with empty pool");
            state
                .events
                .record("Mine request with no pending transactions.");
            HttpResponse::BadRequest().json(MessageResponse {
                message: "No pending transactions to mine.".to_string(),
            })
        }
        Err(err) => {
            error!("mining failed: {err}");
            HttpResponse::InternalServerError().json(MessageResponse {
                message: err.to_string(),
            })
        }
    }
}
