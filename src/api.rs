// Upstream stats API client.
//
// Every data request is a two-step exchange: obtain a short-lived temp token
// using the static API key, then call the player/stat endpoint with the
// token in a `tempToken` header. Tokens are short-lived enough that each
// fetch simply requests a fresh one. Failures surface as a single
// `FetchError` that the app renders as an error banner; nothing here is
// fatal to the dashboard.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::ApiConfig;
use crate::stats::GameLog;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("API key is not configured (set DUGOUT_API_KEY or config/credentials.toml)")]
    MissingApiKey,

    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Roster entry as returned by the players endpoint. Immutable after fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Player {
    #[serde(rename = "playerId")]
    pub player_id: u64,
    #[serde(rename = "playerFullName")]
    pub player_full_name: String,
    #[serde(rename = "playerImage", default)]
    pub player_image: String,
    #[serde(rename = "teamImage", default)]
    pub team_image: String,
}

impl Player {
    /// Short team code derived from the team image URL (the terminal UI has
    /// no use for the image itself, but its file name identifies the team).
    pub fn team_code(&self) -> String {
        self.team_image
            .rsplit('/')
            .next()
            .and_then(|name| name.split('.').next())
            .filter(|code| !code.is_empty())
            .map(|code| code.to_uppercase())
            .unwrap_or_else(|| "---".to_string())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Client for the upstream player/stat endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fetch the full season roster.
    pub async fn fetch_players(&self) -> Result<Vec<Player>, FetchError> {
        let token = self.temp_token().await?;
        let endpoint = format!("{}/mlb/players", self.base_url);
        self.get_json(&endpoint, "tempToken", &token).await
    }

    /// Fetch one player's per-game log for the season.
    pub async fn fetch_game_log(&self, player_id: u64) -> Result<GameLog, FetchError> {
        let token = self.temp_token().await?;
        let endpoint = format!("{}/mlb/player/{}", self.base_url, player_id);
        self.get_json(&endpoint, "tempToken", &token).await
    }

    /// Obtain a short-lived temp token using the static API key.
    async fn temp_token(&self) -> Result<String, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
        let endpoint = format!("{}/token", self.base_url);
        let response: TokenResponse = self.get_json(&endpoint, "apiKey", api_key).await?;
        debug!("obtained temp token");
        Ok(response.token)
    }

    /// GET `endpoint` with a single auth header and decode the JSON body.
    ///
    /// Non-2xx responses are decoded as an `{error}` body when possible so
    /// the upstream's own message reaches the error banner.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        header_name: &str,
        header_value: &str,
    ) -> Result<T, FetchError> {
        let response = self
            .http
            .get(endpoint)
            .header("Content-Type", "application/json")
            .header(header_name, header_value)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| FetchError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_deserializes_from_upstream_shape() {
        let player: Player = serde_json::from_str(
            r#"{
                "playerId": 665742,
                "playerFullName": "Juan Soto",
                "playerImage": "https://img.example.test/players/665742.png",
                "teamImage": "https://img.example.test/teams/sd.png"
            }"#,
        )
        .unwrap();
        assert_eq!(player.player_id, 665742);
        assert_eq!(player.player_full_name, "Juan Soto");
        assert_eq!(player.team_code(), "SD");
    }

    #[test]
    fn player_images_are_optional() {
        let player: Player =
            serde_json::from_str(r#"{"playerId": 1, "playerFullName": "Test Player"}"#).unwrap();
        assert_eq!(player.player_image, "");
        assert_eq!(player.team_code(), "---");
    }

    #[test]
    fn team_code_handles_odd_urls() {
        let mut player: Player =
            serde_json::from_str(r#"{"playerId": 1, "playerFullName": "X"}"#).unwrap();
        player.team_image = "nyy.svg".to_string();
        assert_eq!(player.team_code(), "NYY");
        player.team_image = "https://x.test/teams/".to_string();
        assert_eq!(player.team_code(), "---");
    }

    #[test]
    fn missing_key_error_names_the_remedy() {
        let err = FetchError::MissingApiKey;
        let message = err.to_string();
        assert!(message.contains("DUGOUT_API_KEY"));
        assert!(message.contains("credentials.toml"));
    }

    #[tokio::test]
    async fn fetch_without_key_fails_before_any_request() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "https://stats.example.test/api".to_string(),
            api_key: None,
        });
        match client.fetch_players().await {
            Err(FetchError::MissingApiKey) => {}
            other => panic!("expected MissingApiKey, got: {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "https://stats.example.test/api/".to_string(),
            api_key: Some("k".to_string()),
        });
        assert_eq!(client.base_url, "https://stats.example.test/api");
    }
}
