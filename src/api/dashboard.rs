use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use super::models::{AppState, MessageResponse};

/// Read-only HTML projection of the ledger, the counters and the event log.
#[get("/")]
pub async fn dashboard(state: web::Data<AppState>) -> impl Responder {
    let (chain_length, pending_count, last_block) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        let last_block = match ledger.last_block() {
            Ok(block) => serde_json::to_string_pretty(block).expect("serialize block"),
            Err(err) => {
                error!("dashboard: {err}");
                return HttpResponse::InternalServerError().json(MessageResponse {
                    message: err.to_string(),
                });
            }
        };
        (ledger.len(), ledger.pending().len(), last_block)
    };
    let metrics = state.metrics.snapshot();
    let events = state
        .events
        .newest_first()
        .iter()
        .map(|entry| format!("        <p>{entry}</p>\n"))
        .collect::<String>();

    let page = format!(
        r#"<!doctype html>
<html>
<head>
    <meta charset="utf-8">
    <title>Ledger Dashboard</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }}
        h1, h2 {{ color: #333; }}
        .metrics, .log, .block-data {{ margin-top: 20px; background: #fff; padding: 15px; border-radius: 5px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        .metrics table {{ border-collapse: collapse; width: 100%; }}
        .metrics th, .metrics td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
        .metrics th {{ background-color: #f2f2f2; }}
        .log {{ height: 200px; overflow-y: scroll; }}
        pre {{ background: #eee; padding: 10px; border-radius: 5px; }}
    </style>
</head>
<body>
    <h1>Ledger Dashboard</h1>
    <div class="metrics">
        <h2>System metrics</h2>
        <table>
            <tr><th>Description</th><th>Value</th></tr>
            <tr><td>Total blocks</td><td>{chain_length}</td></tr>
            <tr><td>Pending transactions</td><td>{pending_count}</td></tr>
            <tr><td>Transactions received</td><td>{transactions_received}</td></tr>
            <tr><td>Blocks mined</td><td>{blocks_mined}</td></tr>
            <tr><td>Total requests</td><td>{requests_count}</td></tr>
        </table>
    </div>
    <div class="block-data">
        <h2>Last block</h2>
        <pre>{last_block}</pre>
    </div>
    <div class="log">
        <h2>Event log</h2>
{events}    </div>
</body>
</html>
"#,
        transactions_received = metrics.transactions_received,
        blocks_mined = metrics.blocks_mined,
        requests_count = metrics.requests_count,
    );

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}
