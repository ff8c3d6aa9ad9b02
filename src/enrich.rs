//! Gemini-backed app enrichment.
//!
//! [`Enricher`] is chosen once from the [`Config`]: with a `GEMINI_API_KEY`
//! it talks to the Gemini `generateContent` endpoint, without one every
//! method returns `Ok(None)` and never touches the network.
//!
//! All three operations are single-shot prompts; the model's text is
//! returned as-is with no parsing of its shape.

use crate::config::Config;
use crate::error::{HubError, Result};
use crate::playstore::REQUEST_TIMEOUT;
use crate::record::{AppRecord, truncate_chars};
use serde::{Deserialize, Serialize};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Characters of the store description embedded in the insights prompt
pub const DESCRIPTION_PROMPT_LIMIT: usize = 500;

pub enum Enricher {
    Gemini(GeminiClient),
    Disabled,
}

impl Enricher {
    pub fn from_config(config: &Config) -> Self {
        let Some(api_key) = config.gemini_api_key.as_deref() else {
            tracing::warn!("GEMINI_API_KEY not set; Gemini features are disabled");
            return Self::Disabled;
        };

        match GeminiClient::new(api_key, &config.gemini_model, &config.user_agent) {
            Ok(client) => {
                tracing::debug!("Gemini initialized with model {}", config.gemini_model);
                Self::Gemini(client)
            }
            Err(e) => {
                tracing::warn!("Failed to initialize Gemini: {}", e);
                Self::Disabled
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Gemini(_))
    }

    /// Short summary of purpose, audience and concerns
    pub async fn app_insights(&self, app: &AppRecord) -> Result<Option<String>> {
        match self {
            Self::Gemini(client) => client.generate(&insights_prompt(app)).await.map(Some),
            Self::Disabled => Ok(None),
        }
    }

    /// Numbered list of similar apps, optionally within a category
    pub async fn app_recommendations(
        &self,
        app_name: &str,
        category: Option<&str>,
    ) -> Result<Option<String>> {
        match self {
            Self::Gemini(client) => client
                .generate(&recommendations_prompt(app_name, category))
                .await
                .map(Some),
            Self::Disabled => Ok(None),
        }
    }

    /// Brief safety and privacy note
    pub async fn analyze_safety(&self, app: &AppRecord) -> Result<Option<String>> {
        match self {
            Self::Gemini(client) => client.generate(&safety_prompt(app)).await.map(Some),
            Self::Disabled => Ok(None),
        }
    }
}

pub fn insights_prompt(app: &AppRecord) -> String {
    let description = truncate_chars(
        app.description.as_deref().unwrap_or(""),
        DESCRIPTION_PROMPT_LIMIT,
        "",
    );

    format!(
        "Provide a brief, informative summary about the Android application '{}' \n\
         developed by {}. \n\
         \n\
         App Description: {}\n\
         \n\
         Please include:\n\
         1. Main purpose and features\n\
         2. Target audience\n\
         3. Notable aspects or concerns (if any)\n\
         \n\
         Keep the response concise (3-4 sentences).",
        app.title_or_unknown(),
        app.developer_or_unknown(),
        description
    )
}

pub fn recommendations_prompt(app_name: &str, category: Option<&str>) -> String {
    let scope = match category.filter(|c| !c.is_empty()) {
        Some(category) => format!("in the {} category", category),
        None => String::new(),
    };

    format!(
        "Suggest 3-5 similar Android applications to '{}' \n\
         {}.\n\
         \n\
         For each app, provide:\n\
         - App name\n\
         - Brief description (one sentence)\n\
         \n\
         Format as a numbered list.",
        app_name, scope
    )
}

pub fn safety_prompt(app: &AppRecord) -> String {
    format!(
        "Provide a brief safety and privacy analysis for the Android app '{}' \n\
         by {} with content rating: {}.\n\
         \n\
         Consider:\n\
         1. General safety concerns for this type of app\n\
         2. Privacy considerations\n\
         3. Recommendations for users\n\
         \n\
         Keep it brief (2-3 sentences) and factual.",
        app.title_or_unknown(),
        app.developer_or_unknown(),
        app.content_rating.as_deref().unwrap_or("Unknown")
    )
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    user_agent: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, joined
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            user_agent: user_agent.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    fn build_request(&self, prompt: &str) -> Result<reqwest::Request> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };

        Ok(self
            .client
            .post(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .build()?)
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt)?;
        tracing::debug!("POST {}", request.url());

        let response: GenerateResponse = self
            .client
            .execute(request)
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_text().ok_or(HubError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GEMINI_MODEL;

    fn sample_app() -> AppRecord {
        AppRecord {
            app_id: Some("com.whatsapp".to_string()),
            title: Some("WhatsApp Messenger".to_string()),
            developer: Some("WhatsApp LLC".to_string()),
            content_rating: Some("Everyone".to_string()),
            description: Some("x".repeat(800)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_without_key() {
        let tmp = tempfile::TempDir::new().unwrap();
        let enricher = Enricher::from_config(&Config::with_download_dir(tmp.path()));
        let app = sample_app();

        assert!(!enricher.is_available());
        assert_eq!(enricher.app_insights(&app).await.unwrap(), None);
        assert_eq!(enricher.analyze_safety(&app).await.unwrap(), None);
        assert_eq!(
            enricher.app_recommendations("WhatsApp", None).await.unwrap(),
            None
        );
    }

    #[test]
    fn test_available_with_key() {
        let mut config = Config::default();
        config.gemini_api_key = Some("test-key".to_string());
        assert!(Enricher::from_config(&config).is_available());
    }

    #[test]
    fn test_request_carries_configured_user_agent() {
        let mut config = Config::default();
        config.gemini_api_key = Some("test-key".to_string());
        config.user_agent = "apk-hub-tests/1.0".to_string();

        let Enricher::Gemini(client) = Enricher::from_config(&config) else {
            panic!("expected a Gemini enricher");
        };
        let request = client.build_request("hello").unwrap();

        assert_eq!(request.headers()[reqwest::header::USER_AGENT], "apk-hub-tests/1.0");
        assert_eq!(request.headers()["x-goog-api-key"], "test-key");
        assert_eq!(
            request.url().as_str(),
            format!("{}/models/{}:generateContent", GEMINI_API_BASE, DEFAULT_GEMINI_MODEL)
        );
        assert!(!request.url().as_str().contains("test-key"));
    }

    #[test]
    fn test_insights_prompt_truncates_description() {
        let prompt = insights_prompt(&sample_app());
        assert!(prompt.contains("'WhatsApp Messenger'"));
        assert!(prompt.contains("developed by WhatsApp LLC"));
        assert!(prompt.contains(&format!("App Description: {}\n", "x".repeat(500))));
        assert!(!prompt.contains(&"x".repeat(501)));
        assert!(prompt.contains("3-4 sentences"));
    }

    #[test]
    fn test_prompts_fall_back_to_unknown() {
        let prompt = safety_prompt(&AppRecord::default());
        assert!(prompt.contains("app 'Unknown'"));
        assert!(prompt.contains("by Unknown with content rating: Unknown."));
    }

    #[test]
    fn test_recommendations_prompt_category() {
        let scoped = recommendations_prompt("Spotify", Some("Music & Audio"));
        assert!(scoped.contains("'Spotify'"));
        assert!(scoped.contains("in the Music & Audio category"));
        assert!(scoped.contains("numbered list"));

        let unscoped = recommendations_prompt("Spotify", None);
        assert!(!unscoped.contains("category"));
        assert_eq!(unscoped, recommendations_prompt("Spotify", Some("")));
    }

    #[test]
    fn test_response_text_extraction() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("Hello world"));

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.into_text(), None);

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.into_text(), None);
    }
}
