use serde::{Deserialize, Serialize};

use super::AiError;

const API_URL: &str = "https://api.openai.com/v1/completions";
const TEMPERATURE: f32 = 1.0;
const MAX_TOKENS: u32 = 128;

// --- Request types ---

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

// --- Response types ---

#[derive(Deserialize)]
struct Response {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

fn extract_text(response: Response) -> Result<String, AiError> {
    if let Some(err) = response.error {
        return Err(AiError::Api(err.message));
    }

    response
        .choices
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AiError::Api("empty completion".to_string()))
}

/// Sends `prompt` to the completion endpoint and returns the first choice.
pub async fn complete(
    client: &reqwest::Client,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String, AiError> {
    let request = Request {
        model,
        prompt,
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    };

    let resp = client
        .post(API_URL)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await?;

    let response: Response = resp.json().await?;
    extract_text(response)
}
