use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{
    GraphQLError, GraphQLResponse, LatestReportData, Report, ReportQueryData, TokenResponse,
};
use super::queries;

const TOKEN_URL: &str = "https://www.warcraftlogs.com/oauth/token";
const API_URL: &str = "https://www.warcraftlogs.com/api/v2/client";
const REPORT_URL: &str = "https://www.warcraftlogs.com/reports";

/// Client-credentials pair for the Warcraft Logs API.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Errors that can occur while talking to Warcraft Logs.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Network or HTTP-level error from reqwest.
    #[error("could not reach Warcraft Logs: {0}")]
    Network(reqwest::Error),
    /// The token endpoint refused the client credentials.
    #[error("Warcraft Logs rejected the client credentials: {0}")]
    Auth(String),
    /// The GraphQL API returned one or more errors in the response body.
    #[error("Warcraft Logs API error: {}", join_messages(.0))]
    GraphQL(Vec<GraphQLError>),
    /// The response JSON could not be deserialized into the expected type.
    #[error("unexpected response from Warcraft Logs: {0}")]
    Deserialize(String),
    /// The response contained no `data` field and no `errors` field.
    #[error("empty response from Warcraft Logs")]
    EmptyResponse,
    #[error("report `{0}` not found")]
    ReportNotFound(String),
    #[error("no report id given and no guild configured for the latest report")]
    NoGuildConfigured,
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn report_url(code: &str) -> String {
    format!("{REPORT_URL}/{code}/")
}

/// Exchanges the client credentials for a bearer token.
///
/// Tokens are not reused; every query performs its own exchange.
pub async fn access_token(
    client: &reqwest::Client,
    credentials: &Credentials,
) -> Result<String, QueryError> {
    let response = client
        .post(TOKEN_URL)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(QueryError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(QueryError::Auth(format!("token endpoint returned {status}")));
    }

    let token: TokenResponse = response.json().await.map_err(QueryError::Network)?;
    Ok(token.access_token)
}

/// Execute a GraphQL query and return its deserialized `data` field.
pub async fn query<T: DeserializeOwned>(
    client: &reqwest::Client,
    credentials: &Credentials,
    query_str: &str,
    variables: &Value,
) -> Result<T, QueryError> {
    let response_text = send_query(client, credentials, query_str, variables).await?;
    parse_response(&response_text)
}

async fn send_query(
    client: &reqwest::Client,
    credentials: &Credentials,
    query_str: &str,
    variables: &Value,
) -> Result<String, QueryError> {
    let token = access_token(client, credentials).await?;

    let body = serde_json::json!({
        "query": query_str,
        "variables": variables,
    });

    let response = client
        .post(API_URL)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .map_err(QueryError::Network)?;

    response.text().await.map_err(QueryError::Network)
}

fn parse_response<T: DeserializeOwned>(response_text: &str) -> Result<T, QueryError> {
    let graphql_response: GraphQLResponse<Value> =
        serde_json::from_str(response_text).map_err(|e| QueryError::Deserialize(e.to_string()))?;

    if let Some(errors) = graphql_response.errors {
        if !errors.is_empty() {
            return Err(QueryError::GraphQL(errors));
        }
    }

    let data = graphql_response.data.ok_or(QueryError::EmptyResponse)?;
    serde_json::from_value(data).map_err(|e| QueryError::Deserialize(e.to_string()))
}

pub async fn latest_report_code(
    client: &reqwest::Client,
    credentials: &Credentials,
    guild_id: u64,
) -> Result<String, QueryError> {
    let data: LatestReportData = query(
        client,
        credentials,
        queries::LATEST_REPORT_QUERY,
        &serde_json::json!({ "guildId": guild_id }),
    )
    .await?;

    data.report_data
        .reports
        .data
        .into_iter()
        .next()
        .map(|r| r.code)
        .ok_or_else(|| QueryError::ReportNotFound(format!("latest report of guild {guild_id}")))
}

/// Fetches report `code`, or the guild's most recent report when no code is given.
pub async fn fetch_report(
    client: &reqwest::Client,
    credentials: &Credentials,
    code: Option<&str>,
    guild_id: Option<u64>,
) -> Result<Report, QueryError> {
    let code = match code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => code.to_string(),
        None => {
            let guild_id = guild_id.ok_or(QueryError::NoGuildConfigured)?;
            let code = latest_report_code(client, credentials, guild_id).await?;
            tracing::info!("No report id provided. Most recent log: {code}");
            code
        }
    };

    tracing::info!("Fetching report with id: {code}");
    let response_text = send_query(
        client,
        credentials,
        queries::REPORT_QUERY,
        &serde_json::json!({ "code": code }),
    )
    .await?;

    parse_report(&response_text, code)
}

/// Unknown codes come back as a GraphQL error next to `report: null`;
/// a null report means not found regardless of the accompanying errors.
fn parse_report(response_text: &str, code: String) -> Result<Report, QueryError> {
    let graphql_response: GraphQLResponse<Value> =
        serde_json::from_str(response_text).map_err(|e| QueryError::Deserialize(e.to_string()))?;

    let lookup = graphql_response
        .data
        .and_then(|data| serde_json::from_value::<ReportQueryData>(data).ok());

    match (lookup, graphql_response.errors) {
        (Some(ReportQueryData { report_data }), _) => report_data
            .report
            .ok_or(QueryError::ReportNotFound(code)),
        (None, Some(errors)) if !errors.is_empty() => Err(QueryError::GraphQL(errors)),
        (None, _) => Err(QueryError::EmptyResponse),
    }
}
