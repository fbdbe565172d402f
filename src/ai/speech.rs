use std::path::Path;

use serde::Deserialize;

use super::AiError;

/// Speech service settings for one recognition request.
pub struct SpeechConfig<'a> {
    pub key: &'a str,
    pub region: &'a str,
    pub language: &'a str,
}

impl SpeechConfig<'_> {
    fn endpoint(&self) -> String {
        format!(
            "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1?language={}",
            self.region, self.language
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Recognition {
    recognition_status: String,
    display_text: Option<String>,
}

fn interpret(recognition: Recognition) -> Option<String> {
    match recognition.recognition_status.as_str() {
        "Success" => {
            let text = recognition.display_text.unwrap_or_default();
            tracing::info!("RECOGNIZED: {text}");
            Some(text).filter(|t| !t.is_empty())
        }
        "NoMatch" => {
            tracing::info!("NOMATCH: Speech could not be recognized.");
            None
        }
        status => {
            tracing::warn!("CANCELED: {status}");
            None
        }
    }
}

/// Recognizes speech in a WAV clip. `Ok(None)` means the service heard
/// nothing it could transcribe.
pub async fn transcribe(
    client: &reqwest::Client,
    config: &SpeechConfig<'_>,
    wav: Vec<u8>,
) -> Result<Option<String>, AiError> {
    let resp = client
        .post(config.endpoint())
        .header("Ocp-Apim-Subscription-Key", config.key)
        .header(reqwest::header::CONTENT_TYPE, "audio/wav; codecs=audio/pcm; samplerate=16000")
        .header(reqwest::header::ACCEPT, "application/json")
        .body(wav)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        tracing::error!("CANCELED: ErrorCode={status} ErrorDetails={detail}");
        return Err(AiError::Api(format!("speech service returned {status}")));
    }

    let recognition: Recognition = resp.json().await?;
    Ok(interpret(recognition))
}

pub async fn transcribe_file(
    client: &reqwest::Client,
    config: &SpeechConfig<'_>,
    path: &Path,
) -> Result<Option<String>, AiError> {
    let wav = tokio::fs::read(path).await?;
    transcribe(client, config, wav).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognition(json: &str) -> Recognition {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_endpoint() {
        let config = SpeechConfig {
            key: "k",
            region: "westeurope",
            language: "en-US",
        };
        assert_eq!(
            config.endpoint(),
            "https://westeurope.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1?language=en-US"
        );
    }

    #[test]
    fn test_interpret_success() {
        let r = recognition(
            r#"{"RecognitionStatus": "Success", "DisplayText": "Pull the boss.", "Offset": 0, "Duration": 100}"#,
        );
        assert_eq!(interpret(r).as_deref(), Some("Pull the boss."));
    }

    #[test]
    fn test_interpret_no_match_and_silence() {
        assert!(interpret(recognition(r#"{"RecognitionStatus": "NoMatch"}"#)).is_none());
        assert!(
            interpret(recognition(r#"{"RecognitionStatus": "InitialSilenceTimeout"}"#)).is_none()
        );
    }

    #[tokio::test]
    async fn test_transcribe_missing_file() {
        let client = reqwest::Client::new();
        let config = SpeechConfig {
            key: "k",
            region: "r",
            language: "en-US",
        };
        let err = transcribe_file(&client, &config, Path::new("/nonexistent/clip.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Io(_)));
    }
}
