use serde::Deserialize;

/// Connection settings a SOAP transport implementation needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub soap_endpoint: String,
    pub user_id: String,
    pub encryption_key: String,
    pub api_version: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            soap_endpoint: std::env::var("MARKETO_SOAP_ENDPOINT")
                .map_err(|_| {
                    anyhow::anyhow!("MARKETO_SOAP_ENDPOINT environment variable required")
                })
                .and_then(|endpoint| {
                    let parsed = url::Url::parse(&endpoint).map_err(|_| {
                        anyhow::anyhow!("MARKETO_SOAP_ENDPOINT must be a valid URL")
                    })?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!(
                            "MARKETO_SOAP_ENDPOINT must start with http:// or https://"
                        );
                    }
                    Ok(endpoint)
                })?,
            user_id: std::env::var("MARKETO_USER_ID")
                .map_err(|_| anyhow::anyhow!("MARKETO_USER_ID environment variable required"))
                .and_then(|user| {
                    if user.trim().is_empty() {
                        anyhow::bail!("MARKETO_USER_ID cannot be empty");
                    }
                    Ok(user)
                })?,
            encryption_key: std::env::var("MARKETO_ENCRYPTION_KEY")
                .map_err(|_| {
                    anyhow::anyhow!("MARKETO_ENCRYPTION_KEY environment variable required")
                })
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("MARKETO_ENCRYPTION_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            api_version: std::env::var("MARKETO_API_VERSION")
                .unwrap_or_else(|_| "2_3".to_string()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("SOAP endpoint: {}", config.soap_endpoint);
        tracing::debug!("API version: {}", config.api_version);
        tracing::debug!("User ID: {}", config.user_id);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations cannot race each other.
    #[test]
    fn test_from_env_validation() {
        std::env::remove_var("MARKETO_SOAP_ENDPOINT");
        std::env::remove_var("MARKETO_USER_ID");
        std::env::remove_var("MARKETO_ENCRYPTION_KEY");
        std::env::remove_var("MARKETO_API_VERSION");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("MARKETO_SOAP_ENDPOINT"));

        std::env::set_var("MARKETO_SOAP_ENDPOINT", "ftp://soap.example.com");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("http:// or https://"));

        std::env::set_var(
            "MARKETO_SOAP_ENDPOINT",
            "https://soap.example.com/soap/mktows/2_3",
        );
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("MARKETO_USER_ID"));

        std::env::set_var("MARKETO_USER_ID", "demo_user");
        std::env::set_var("MARKETO_ENCRYPTION_KEY", "  ");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("MARKETO_ENCRYPTION_KEY"));

        std::env::set_var("MARKETO_ENCRYPTION_KEY", "secret");
        let config = Config::from_env().unwrap();
        assert_eq!(config.user_id, "demo_user");
        assert_eq!(config.api_version, "2_3");

        std::env::set_var("MARKETO_API_VERSION", "2_9");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_version, "2_9");
    }
}
