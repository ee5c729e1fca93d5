/// Integration tests with a stubbed SOAP transport
/// Tests the complete call path without hitting a real Marketo endpoint
use rust_marketo_api::campaigns::CampaignRequest;
use rust_marketo_api::client::MarketoClient;
use rust_marketo_api::errors::MarketoError;
use rust_marketo_api::soap::SoapTransport;
use serde_json::{json, Map, Value};
use std::sync::Mutex;

/// Transport stub that records every call and replies with a canned body.
struct RecordingTransport {
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
    response: Value,
}

impl RecordingTransport {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: json!({ "success": true }),
        }
    }

    fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SoapTransport for RecordingTransport {
    async fn call(
        &self,
        method: &str,
        params: Map<String, Value>,
    ) -> Result<Value, MarketoError> {
        self.calls.lock().unwrap().push((method.to_string(), params));
        Ok(self.response.clone())
    }
}

/// Transport stub that always fails, for error propagation tests.
struct FailingTransport;

impl SoapTransport for FailingTransport {
    async fn call(
        &self,
        _method: &str,
        _params: Map<String, Value>,
    ) -> Result<Value, MarketoError> {
        Err(MarketoError::Transport("connection reset".to_string()))
    }
}

#[tokio::test]
async fn test_for_marketo_dispatches_wire_call() {
    let transport = RecordingTransport::new();
    let client = MarketoClient::new(transport);

    let response = client.campaigns().for_marketo(None, None).await.unwrap();
    assert_eq!(response, json!({ "success": true }));

    let calls = client_calls(&client);
    assert_eq!(calls.len(), 1);
    let (method, params) = &calls[0];
    assert_eq!(method, "get_campaigns_for_source");
    assert_eq!(Value::Object(params.clone()), json!({ "source": "MKTOWS" }));
}

#[tokio::test]
async fn test_for_sales_dispatches_wire_call() {
    let transport = RecordingTransport::new();
    let client = MarketoClient::new(transport);

    client.campaigns().for_sales(None, None).await.unwrap();

    let calls = client_calls(&client);
    let (method, params) = &calls[0];
    assert_eq!(method, "get_campaigns_for_source");
    assert_eq!(Value::Object(params.clone()), json!({ "source": "SALES" }));
}

#[tokio::test]
async fn test_request_marketo_overrides_source() {
    let transport = RecordingTransport::new();
    let client = MarketoClient::new(transport);

    // Source already set to Sales: the specialized variant must win
    let request = CampaignRequest {
        lead: Some(json!(3)),
        campaign_id: Some(3),
        source: Some("sales".parse().unwrap()),
        ..Default::default()
    };
    client.campaigns().request_marketo(request).await.unwrap();

    let calls = client_calls(&client);
    let (method, params) = &calls[0];
    assert_eq!(method, "request_campaign");
    assert_eq!(params["source"], json!("MKTOWS"));
}

#[tokio::test]
async fn test_request_sales_overrides_source() {
    let transport = RecordingTransport::new();
    let client = MarketoClient::new(transport);

    let request = CampaignRequest {
        lead: Some(json!(3)),
        campaign_id: Some(3),
        ..Default::default()
    };
    client.campaigns().request_sales(request).await.unwrap();

    let calls = client_calls(&client);
    assert_eq!(calls[0].1["source"], json!("SALES"));
}

#[tokio::test]
async fn test_invalid_request_never_reaches_transport() {
    let transport = RecordingTransport::new();
    let client = MarketoClient::new(transport);

    let result = client.campaigns().request(CampaignRequest::default()).await;
    assert!(matches!(result, Err(MarketoError::InvalidArgument(_))));
    assert!(client_calls(&client).is_empty());
}

#[tokio::test]
async fn test_schedule_dispatches_wire_call() {
    let transport = RecordingTransport::new();
    let client = MarketoClient::new(transport);

    client
        .campaigns()
        .schedule("program", "campaign", Default::default())
        .await
        .unwrap();

    let calls = client_calls(&client);
    let (method, params) = &calls[0];
    assert_eq!(method, "schedule_campaign");
    assert_eq!(
        Value::Object(params.clone()),
        json!({ "programName": "program", "campaignName": "campaign" })
    );
}

#[tokio::test]
async fn test_transport_failure_carries_context() {
    let client = MarketoClient::new(FailingTransport);

    let err = client
        .campaigns()
        .for_marketo(None, None)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "SOAP call get_campaigns_for_source failed: SOAP transport error: connection reset"
    );
}

fn client_calls(client: &MarketoClient<RecordingTransport>) -> Vec<(String, Map<String, Value>)> {
    client.transport().calls()
}
