mod chain;
mod dashboard;
mod mine;
pub mod models;
mod tx;

use actix_web::Error;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(dashboard::dashboard)
        .service(tx::new_transaction)
        .service(mine::mine)
        .service(chain::get_chain)
        .service(chain::validate_chain);
}

/// Counts every incoming request, whatever the route or outcome.
pub async fn count_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if let Some(state) = req.app_data::<web::Data<AppState>>() {
        state.metrics.record_request();
    }
    next.call(req).await
}

#[cfg(test)]
mod tests {
    use actix_web::middleware::from_fn;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::{AppState, count_requests, init_routes};

    // Low difficulty keeps the proof search fast in tests.
    fn test_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(1))
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .wrap(from_fn(count_requests))
                    .configure(init_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn submit_then_mine_links_to_genesis() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(json!({"sender": "A", "recipient": "B", "amount": 10.0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            "Transaction will be included in block 2."
        );

        let req = test::TestRequest::get().uri("/mine").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        let block = &body["block"];
        assert_eq!(block["index"], 2);
        assert_eq!(block["transactions"][0]["sender"], "A");
        assert_eq!(block["transactions"][0]["recipient"], "B");
        assert_eq!(block["transactions"][0]["amount"], 10.0);

        let req = test::TestRequest::get().uri("/chain").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 2);
        assert_eq!(body["chain"][1]["previous_hash"], body["chain"][0]["hash"]);

        assert_eq!(state.metrics.snapshot().transactions_received, 1);
        assert_eq!(state.metrics.snapshot().blocks_mined, 1);
    }

    #[actix_web::test]
    async fn mine_with_empty_pool_leaves_the_chain_alone() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/mine").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let req = test::TestRequest::get().uri("/chain").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 1);
        assert_eq!(state.metrics.snapshot().blocks_mined, 0);
    }

    #[actix_web::test]
    async fn missing_amount_is_rejected_without_state_changes() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(json!({"sender": "A", "recipient": "B"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "missing transaction field: amount");

        assert!(state.ledger.lock().unwrap().pending().is_empty());
        assert_eq!(state.metrics.snapshot().transactions_received, 0);
    }

    #[actix_web::test]
    async fn every_request_is_counted() {
        let state = test_state();
        let app = test_app!(state);

        for _ in 0..3 {
            let req = test::TestRequest::get().uri("/chain").to_request();
            test::call_service(&app, req).await;
        }
        assert_eq!(state.metrics.snapshot().requests_count, 3);
    }

    #[actix_web::test]
    async fn validate_reports_a_consistent_chain() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(json!({"sender": "A", "recipient": "B", "amount": 1.0}))
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::get().uri("/mine").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/validate").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);
        assert_eq!(body["length"], 2);
        assert_eq!(body["difficulty"], 1);
    }

    #[actix_web::test]
    async fn dashboard_renders_the_current_state() {
        let state = test_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Ledger Dashboard"));
        assert!(html.contains("Genesis block created."));
    }
}
