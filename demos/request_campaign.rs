use anyhow::Result;
use chrono::{Duration, Utc};
use rust_marketo_api::campaigns::{CampaignRequest, ScheduleOptions};
use rust_marketo_api::client::MarketoClient;
use rust_marketo_api::config::Config;
use rust_marketo_api::errors::MarketoError;
use rust_marketo_api::soap::SoapTransport;
use serde_json::{json, Map, Value};

/// Transport that prints what it would send instead of calling Marketo.
struct DryRunTransport;

impl SoapTransport for DryRunTransport {
    async fn call(&self, method: &str, params: Map<String, Value>) -> Result<Value, MarketoError> {
        println!("  → {} {}", method, Value::Object(params));
        Ok(json!({ "success": true }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== Marketo campaign requests (dry run) ===\n");

    let config = Config::from_env()?;
    println!("SOAP endpoint: {} (API {})\n", config.soap_endpoint, config.api_version);

    let client = MarketoClient::new(DryRunTransport);
    let campaigns = client.campaigns();

    println!("[1/3] Looking up Marketo campaigns named 'Earth Day'");
    campaigns.for_marketo(Some("Earth Day"), Some(true)).await?;

    println!("[2/3] Requesting campaign 42 for a lead");
    let request = CampaignRequest {
        lead: Some(json!({ "keyType": "EMAIL", "keyValue": "lead@example.com" })),
        campaign_id: Some(42),
        ..Default::default()
    };
    campaigns.request(request).await?;

    println!("[3/3] Scheduling the Earth Day campaign for tomorrow");
    let options = ScheduleOptions::default().run_at(Utc::now() + Duration::days(1));
    campaigns
        .schedule("Earth Day Program", "Earth Day", options)
        .await?;

    println!("\n✓ All requests constructed and dispatched");
    Ok(())
}
