use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::auth::{AuthContext, UserProfile};
use crate::client::HttpApiClient;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: i64 = 30;
const ENV_PREFIX: &str = "VIKALP";
const CONFIG_FILE: &str = "vikalp";

/// Application settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Base URL of the prediction service
    pub api_base_url: String,
    /// Transport-level bound on a single request, in seconds
    pub request_timeout_secs: u64,
    /// Directory exported reports are written to
    pub output_dir: PathBuf,
    /// Send the signed-in user's ID token with service requests
    pub attach_id_token: bool,
    pub id_token: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Command-line values take precedence over every other source.
    pub fn apply_overrides(&mut self, api_url: Option<String>, output_dir: Option<PathBuf>) {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
    }

    /// Identity context described by the settings, anonymous when no user
    /// email is configured.
    pub fn auth_context(&self) -> AuthContext {
        let mut auth = AuthContext::anonymous();
        if let Some(email) = self.user_email.clone().filter(|e| !e.trim().is_empty()) {
            let profile = UserProfile {
                display_name: self.user_name.clone().unwrap_or_else(|| email.clone()),
                email,
                photo_url: None,
            };
            auth.sign_in(profile, self.id_token.clone());
        }
        auth
    }

    /// HTTP client for the configured service. The user's ID token is only
    /// attached when `attach_id_token` is enabled.
    pub fn http_client(&self, auth: &AuthContext) -> HttpApiClient {
        let client = HttpApiClient::new(&self.api_base_url, self.request_timeout());
        if self.attach_id_token {
            debug!("Attaching ID token to service requests");
            client.with_bearer_token(auth.id_token().map(str::to_string))
        } else {
            client
        }
    }
}

/// Load settings: defaults, then `vikalp.toml` if present, then `VIKALP_*`
/// environment variables (a `.env` file is read first).
pub fn load_settings() -> Result<Settings> {
    dotenvy::dotenv().ok();
    build_settings(Environment::with_prefix(ENV_PREFIX), true)
}

fn build_settings(environment: Environment, with_file: bool) -> Result<Settings> {
    let mut builder = Config::builder()
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("output_dir", ".")?
        .set_default("attach_id_token", false)?;

    if with_file {
        builder = builder.add_source(File::with_name(CONFIG_FILE).required(false));
    }

    let settings: Settings = builder
        .add_source(environment)
        .build()?
        .try_deserialize()?;

    debug!("API base URL: {}", settings.api_base_url);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = build_settings(environment(&[]), false).unwrap();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert!(!settings.attach_id_token);
        assert!(!settings.auth_context().is_signed_in());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let settings = build_settings(
            environment(&[
                ("VIKALP_API_BASE_URL", "https://api.vikalp.example"),
                ("VIKALP_REQUEST_TIMEOUT_SECS", "5"),
                ("VIKALP_ATTACH_ID_TOKEN", "true"),
                ("VIKALP_USER_EMAIL", "analyst@example.com"),
                ("VIKALP_ID_TOKEN", "abc"),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(settings.api_base_url, "https://api.vikalp.example");
        assert_eq!(settings.request_timeout_secs, 5);
        assert!(settings.attach_id_token);

        let auth = settings.auth_context();
        assert_eq!(auth.current_user().unwrap().display_name, "analyst@example.com");
        assert_eq!(auth.id_token(), Some("abc"));
    }

    #[test]
    fn test_command_line_overrides() {
        let mut settings = build_settings(environment(&[]), false).unwrap();
        settings.apply_overrides(Some("http://10.0.0.2:5000".to_string()), Some("out".into()));
        assert_eq!(settings.api_base_url, "http://10.0.0.2:5000");
        assert_eq!(settings.output_dir, PathBuf::from("out"));

        settings.apply_overrides(None, None);
        assert_eq!(settings.api_base_url, "http://10.0.0.2:5000");
    }
}
