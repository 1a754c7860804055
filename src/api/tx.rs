use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{AppState, MessageResponse, NewTransactionRequest};

/// Submit a transaction into the pending pool.
///
/// The index in the success message is where the transaction is expected to
/// land on the next mine; submissions racing before that mine share it.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> impl Responder {
    let (sender, recipient, amount) = match body.into_inner().into_fields() {
        Ok(fields) => fields,
        Err(err) => {
            warn!("rejected transaction: {err}");
            state.events.record("Rejected transaction with missing fields.");
            return HttpResponse::BadRequest().json(MessageResponse {
                message: err.to_string(),
            });
        }
    };

    let expected_index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.add_transaction(sender.clone(), recipient.clone(), amount)
    };
    state.metrics.record_transaction();
    state
        .events
        .record(format!("New transaction: {sender} -> {recipient} ({amount})."));
    info!("accepted transaction {sender} -> {recipient} ({amount})");

    HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be included in block {expected_index}."),
    })
}
