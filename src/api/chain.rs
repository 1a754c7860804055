use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse, ValidateResponse};

/// Get the full chain.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let (chain, length) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        (ledger.snapshot(), ledger.len())
    };
    HttpResponse::Ok().json(ChainResponse { chain, length })
}

/// Validate the whole chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: ledger.is_valid_chain(),
        length: ledger.len(),
        difficulty: ledger.difficulty(),
    })
}
