use std::sync::Arc;

use serde_json::json;
use webstub::auth::AuthProvider;
use webstub::config::ENV_STRIPE_PUBLISHABLE_KEY;
use webstub::env::EnvSource;
use webstub::fetch::{FetchProvider, Request, RequestInit, Response, ResponseInit};
use webstub::payments::PaymentGateway;
use webstub::router::Router;
use webstub::TestHarness;

// The code under test: a checkout flow written the way an application would
// write it, against the trait seams instead of concrete services. In a real
// project this lives in the application crate; the harness only supplies the
// doubles behind the seams.
async fn place_order(
    fetch: Arc<dyn FetchProvider>,
    payments: Arc<dyn PaymentGateway>,
    router: Arc<dyn Router>,
    env: Arc<dyn EnvSource>,
    amount: u64,
) -> anyhow::Result<String> {
    let key = env
        .var(ENV_STRIPE_PUBLISHABLE_KEY)
        .ok_or_else(|| anyhow::anyhow!("publishable key not configured"))?;

    payments.load(&key).await?;
    let method = payments.create_payment_method("card").await?;
    let confirmation = payments.confirm_payment(&method.id, amount).await?;

    let request = Request::new(
        "https://app.test/api/orders",
        RequestInit {
            method: Some("POST".to_string()),
            body: json!({ "payment_intent": confirmation.id, "amount": amount }).into(),
            ..Default::default()
        },
    );
    let response = fetch.fetch(request).await?;
    let order = response.json().await?;
    let order_id = order["id"].as_str().unwrap_or_default().to_string();

    router.push(&format!("/orders/{order_id}"))?;
    Ok(order_id)
}

fn main() -> anyhow::Result<()> {
    // Build a harness positioned for this scenario. Everything not set here
    // falls back to the canned defaults (signed-in test user, mock keys).
    let harness = TestHarness::builder()
        .location("/checkout", "step=payment")
        .build();

    // Script the backend the flow will talk to. The last registration for a
    // method/url pair wins, so a test can layer a failure over a default.
    harness.fetch().on_post(
        "https://app.test/api/orders",
        Response::from_json(
            &json!({ "id": "order-123", "state": "created" }),
            ResponseInit::default(),
        )?,
    );

    // Drive the flow on the harness runtime.
    let order_id = harness.block_on(place_order(
        harness.fetch_provider(),
        harness.payment_gateway(),
        harness.router_handle(),
        harness.env_source(),
        1999,
    ))?;
    println!("placed order: {order_id}");

    // Inspect what the doubles recorded.
    for call in harness.fetch().calls() {
        println!("[fetch] {} {}", call.method, call.url);
    }
    for confirmation in harness.payments().confirmations() {
        println!(
            "[payments] confirmed {} for {} cents",
            confirmation.id, confirmation.amount
        );
    }
    for event in harness.router().events() {
        println!("[router] {:?}", event);
    }
    println!(
        "signed in as: {:?}",
        harness.auth().current_user().map(|user| user.id)
    );

    Ok(())
}
