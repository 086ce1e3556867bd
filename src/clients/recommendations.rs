use crate::clients::models::common::RecommendationKind;
use crate::clients::models::requests::ProfileSnapshot;
use crate::clients::models::responses::{RECOMMENDATION_ENVELOPE_KEY, RawRecommendation};
use crate::config::Config;
use anyhow::Result;
use reqwest::{Client, Url};
use serde_json::Value;

const RECOMMENDATIONS_ENDPOINT: &str = "/recommendations/";

#[derive(Clone)]
pub struct RecommendationClient {
    http: Client,
    base: Url,
    api_key: Option<String>,
}

impl RecommendationClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
                .build()?,
            base: Url::parse(&config.recommendation_api_url)?,
            api_key: config.recommendation_api_key.clone(),
        })
    }

    pub async fn fetch_recommendation(
        &self,
        kind: RecommendationKind,
        profile: &ProfileSnapshot,
    ) -> Result<RawRecommendation> {
        let url = self
            .base
            .join(&format!("{}{}", RECOMMENDATIONS_ENDPOINT, kind))?;

        tracing::debug!(%kind, url = %url, "recommendations.request");

        let mut request = self.http.post(url).json(profile);
        if let Some(api_key) = &self.api_key {
            request = request.header("api-key", api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                body
            ));
        }

        let body = response.text().await?;

        tracing::debug!(%kind, response_body = %body, "recommendations.response");

        read_recommendation_body(&body)
    }
}

fn read_recommendation_body(body: &str) -> Result<RawRecommendation> {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        // Plain text bodies are freeform schedules
        Err(_) => return Ok(RawRecommendation::Text(body.to_string())),
    };

    let payload = match json {
        Value::Object(mut fields) if fields.contains_key(RECOMMENDATION_ENVELOPE_KEY) => fields
            .remove(RECOMMENDATION_ENVELOPE_KEY)
            .unwrap_or(Value::Null),
        other => other,
    };

    match payload {
        Value::String(text) => Ok(RawRecommendation::Text(text)),
        Value::Object(fields) => Ok(RawRecommendation::Structured(fields)),
        other => Err(anyhow::anyhow!(
            "Unexpected recommendation payload: {}",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile() -> ProfileSnapshot {
        ProfileSnapshot {
            age: 41,
            gender: "male".to_string(),
            weight: 82.5,
            height: 180.0,
            fitness_level: "beginner".to_string(),
            activity_level: "sedentary".to_string(),
            goal: "lose weight".to_string(),
            dietary_preference: Some("vegan".to_string()),
            medical_conditions: None,
        }
    }

    fn client_for(server: &MockServer, api_key: Option<&str>) -> RecommendationClient {
        let config = Config {
            recommendation_api_url: server.uri(),
            recommendation_api_key: api_key.map(str::to_string),
            request_timeout_secs: 5,
            port: "0".to_string(),
        };
        RecommendationClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_structured_recommendation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recommendations/workout"))
            .and(header("api-key", "secret"))
            .and(body_partial_json(json!({ "age": 41, "goal": "lose weight" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "recommendation": {
                    "workout_overview": { "duration": "4 weeks" }
                }
            })))
            .mount(&server)
            .await;

        let raw = client_for(&server, Some("secret"))
            .fetch_recommendation(RecommendationKind::Workout, &profile())
            .await
            .unwrap();

        match raw {
            RawRecommendation::Structured(fields) => {
                assert_eq!(fields["workout_overview"]["duration"], "4 weeks");
            }
            other => panic!("expected structured recommendation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_text_recommendation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recommendations/workout"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("Monday: Squats - 3 sets of 5 reps"),
            )
            .mount(&server)
            .await;

        let raw = client_for(&server, None)
            .fetch_recommendation(RecommendationKind::Workout, &profile())
            .await
            .unwrap();

        assert_eq!(
            raw,
            RawRecommendation::Text("Monday: Squats - 3 sets of 5 reps".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recommendations/nutrition"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model offline"))
            .mount(&server)
            .await;

        let error = client_for(&server, None)
            .fetch_recommendation(RecommendationKind::Nutrition, &profile())
            .await
            .unwrap_err();

        let message = error.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("model offline"));
    }

    #[test]
    fn test_read_recommendation_body() {
        assert_eq!(
            read_recommendation_body(r#"{"recommendation": "Monday: Rest"}"#).unwrap(),
            RawRecommendation::Text("Monday: Rest".to_string())
        );
        assert!(matches!(
            read_recommendation_body(r#"{"nutrition_overview": "balanced"}"#).unwrap(),
            RawRecommendation::Structured(_)
        ));
        assert!(read_recommendation_body("[1, 2, 3]").is_err());
        assert!(read_recommendation_body(r#"{"recommendation": null}"#).is_err());
    }
}
