use crate::errors::{MarketoError, ResultExt};
use crate::soap::{SoapRequest, SoapTransport};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Wire method for campaign lookup by source.
pub const GET_CAMPAIGNS_FOR_SOURCE: &str = "get_campaigns_for_source";
/// Wire method for adding leads to a campaign.
pub const REQUEST_CAMPAIGN: &str = "request_campaign";
/// Wire method for scheduling a campaign run.
pub const SCHEDULE_CAMPAIGN: &str = "schedule_campaign";

/// Campaign origin recognized by the Marketo SOAP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Marketo,
    Sales,
}

impl Source {
    /// Token the wire protocol expects for this source.
    pub fn wire_token(self) -> &'static str {
        match self {
            Source::Marketo => "MKTOWS",
            Source::Sales => "SALES",
        }
    }
}

impl FromStr for Source {
    type Err = MarketoError;

    /// Resolves the friendly tags as well as the wire tokens themselves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marketo" | "MKTOWS" => Ok(Source::Marketo),
            "sales" | "SALES" => Ok(Source::Sales),
            other => Err(MarketoError::InvalidArgument(format!(
                "Invalid source {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_token())
    }
}

/// Arguments for a lead-to-campaign request.
///
/// One field per wire parameter. `build` validates the combination and
/// produces the request shape the API expects; lead keys and program
/// tokens are opaque values passed through unchanged.
#[derive(Debug, Clone, Default)]
pub struct CampaignRequest {
    /// Single lead key, appended after `leads` when both are given.
    pub lead: Option<Value>,
    /// Lead keys, forwarded in order.
    pub leads: Vec<Value>,
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub program_name: Option<String>,
    pub program_tokens: Option<Vec<Value>>,
    /// Defaults to `Source::Marketo` when absent.
    pub source: Option<Source>,
}

impl CampaignRequest {
    /// Validates the argument combination and constructs the wire request.
    ///
    /// Rules, checked in order:
    /// 1. at least one of `lead`/`leads`;
    /// 2. at least one of `campaign_id`/`campaign_name`/`program_name`,
    ///    with `campaign_id` and `campaign_name` mutually exclusive;
    /// 3. `program_tokens` only together with `program_name`.
    pub fn build(self) -> Result<SoapRequest, MarketoError> {
        if self.lead.is_none() && self.leads.is_empty() {
            return Err(MarketoError::InvalidArgument(
                "lead or leads must be provided".to_string(),
            ));
        }

        if self.campaign_id.is_none()
            && self.campaign_name.is_none()
            && self.program_name.is_none()
        {
            return Err(MarketoError::InvalidArgument(
                "campaignId, campaignName, or programName must be provided".to_string(),
            ));
        }
        if self.campaign_id.is_some() && self.campaign_name.is_some() {
            return Err(MarketoError::InvalidArgument(
                "campaignId and campaignName are mutually exclusive".to_string(),
            ));
        }

        if self.program_tokens.is_some() && self.program_name.is_none() {
            return Err(MarketoError::MissingKey(
                "programName must be provided when using programTokens".to_string(),
            ));
        }

        let source = self.source.unwrap_or(Source::Marketo);

        // leads first, the single lead appended last, no deduplication
        let mut lead_list = self.leads;
        if let Some(lead) = self.lead {
            lead_list.push(lead);
        }

        let mut params = Map::new();
        params.insert("source".to_string(), wire_source(source));
        params.insert("leadList".to_string(), Value::Array(lead_list));
        if let Some(id) = self.campaign_id {
            params.insert("campaignId".to_string(), Value::from(id));
        }
        if let Some(name) = self.campaign_name {
            params.insert("campaignName".to_string(), Value::String(name));
        }
        if let Some(name) = self.program_name {
            params.insert("programName".to_string(), Value::String(name));
        }
        if let Some(tokens) = self.program_tokens {
            params.insert("programTokenList".to_string(), Value::Array(tokens));
        }

        Ok(SoapRequest {
            method: REQUEST_CAMPAIGN,
            params,
        })
    }
}

/// Optional parameters for [`schedule`].
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptions {
    /// Opaque wire value for the `campaignRunAt` field.
    pub run_at: Option<Value>,
    /// Passed through as given, not concatenated.
    pub program_tokens: Option<Vec<Value>>,
}

impl ScheduleOptions {
    /// Sets the run time from a concrete timestamp, rendered the way the
    /// API expects it.
    pub fn run_at(mut self, at: DateTime<Utc>) -> Self {
        self.run_at = Some(Value::String(
            at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
        self
    }
}

/// Builds the campaign lookup request for `source`.
///
/// `exact_name` is emitted whenever it was supplied, `false` included;
/// presence governs inclusion, not truthiness.
pub fn for_source(source: Source, name: Option<&str>, exact_name: Option<bool>) -> SoapRequest {
    let mut params = Map::new();
    params.insert("source".to_string(), wire_source(source));
    if let Some(name) = name {
        params.insert("name".to_string(), Value::String(name.to_string()));
    }
    if let Some(exact) = exact_name {
        params.insert("exactName".to_string(), Value::Bool(exact));
    }
    SoapRequest {
        method: GET_CAMPAIGNS_FOR_SOURCE,
        params,
    }
}

/// Builds the schedule request for a program/campaign pair.
pub fn schedule(program_name: &str, campaign_name: &str, options: ScheduleOptions) -> SoapRequest {
    let mut params = Map::new();
    params.insert(
        "programName".to_string(),
        Value::String(program_name.to_string()),
    );
    params.insert(
        "campaignName".to_string(),
        Value::String(campaign_name.to_string()),
    );
    if let Some(run_at) = options.run_at {
        params.insert("campaignRunAt".to_string(), run_at);
    }
    if let Some(tokens) = options.program_tokens {
        params.insert("programTokenList".to_string(), Value::Array(tokens));
    }
    SoapRequest {
        method: SCHEDULE_CAMPAIGN,
        params,
    }
}

fn wire_source(source: Source) -> Value {
    Value::String(source.wire_token().to_string())
}

/// Campaign operations bound to a SOAP transport.
///
/// Each method builds the request, logs it, and delegates the call; the
/// response body is returned verbatim.
pub struct Campaigns<'c, T> {
    transport: &'c T,
}

impl<'c, T: SoapTransport> Campaigns<'c, T> {
    pub(crate) fn new(transport: &'c T) -> Self {
        Self { transport }
    }

    /// Fetches the campaigns available for `source`, optionally filtered
    /// by campaign name.
    pub async fn for_source(
        &self,
        source: Source,
        name: Option<&str>,
        exact_name: Option<bool>,
    ) -> Result<Value, MarketoError> {
        self.dispatch(for_source(source, name, exact_name)).await
    }

    /// `for_source` specialized to the Marketo source.
    pub async fn for_marketo(
        &self,
        name: Option<&str>,
        exact_name: Option<bool>,
    ) -> Result<Value, MarketoError> {
        self.for_source(Source::Marketo, name, exact_name).await
    }

    /// `for_source` specialized to the Sales source.
    pub async fn for_sales(
        &self,
        name: Option<&str>,
        exact_name: Option<bool>,
    ) -> Result<Value, MarketoError> {
        self.for_source(Source::Sales, name, exact_name).await
    }

    /// Requests that the given leads be run through a campaign.
    pub async fn request(&self, request: CampaignRequest) -> Result<Value, MarketoError> {
        self.dispatch(request.build()?).await
    }

    /// `request` with the source forced to Marketo, overriding any value
    /// already set on the request.
    pub async fn request_marketo(
        &self,
        mut request: CampaignRequest,
    ) -> Result<Value, MarketoError> {
        request.source = Some(Source::Marketo);
        self.request(request).await
    }

    /// `request` with the source forced to Sales.
    pub async fn request_sales(&self, mut request: CampaignRequest) -> Result<Value, MarketoError> {
        request.source = Some(Source::Sales);
        self.request(request).await
    }

    /// Schedules a run of `campaign_name` within `program_name`.
    pub async fn schedule(
        &self,
        program_name: &str,
        campaign_name: &str,
        options: ScheduleOptions,
    ) -> Result<Value, MarketoError> {
        self.dispatch(schedule(program_name, campaign_name, options))
            .await
    }

    async fn dispatch(&self, request: SoapRequest) -> Result<Value, MarketoError> {
        let method = request.method;
        tracing::debug!(
            "Dispatching SOAP call {} with {} parameter(s)",
            method,
            request.params.len()
        );
        self.transport
            .call(method, request.params)
            .await
            .with_context(|| format!("SOAP call {} failed", method))
    }
}
