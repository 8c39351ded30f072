use serde::{Deserialize, Serialize};

/// Client IP reported when the caller could not determine one.
pub const UNKNOWN_IP: &str = "unknown";

/// Values taken from the inbound request that triggered an authentication attempt.
///
/// Extraction from the HTTP layer is the caller's job; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub host: Option<String>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Request host, or an empty string.
    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or_default()
    }

    /// Client IP, or [`UNKNOWN_IP`].
    pub fn client_ip_or_default(&self) -> &str {
        self.client_ip
            .as_deref()
            .filter(|ip| !ip.is_empty())
            .unwrap_or(UNKNOWN_IP)
    }

    /// User agent header, or an empty string.
    pub fn user_agent_or_default(&self) -> &str {
        self.user_agent.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let request = RequestContext::new();
        assert_eq!(request.host_or_default(), "");
        assert_eq!(request.client_ip_or_default(), "unknown");
        assert_eq!(request.user_agent_or_default(), "");
    }

    #[test]
    fn test_empty_ip_is_unknown() {
        let request = RequestContext::new().with_client_ip("");
        assert_eq!(request.client_ip_or_default(), UNKNOWN_IP);
    }

    #[test]
    fn test_values_pass_through() {
        let request = RequestContext::new()
            .with_host("example.com")
            .with_client_ip("10.0.0.5")
            .with_user_agent("curl/8.0");

        assert_eq!(request.host_or_default(), "example.com");
        assert_eq!(request.client_ip_or_default(), "10.0.0.5");
        assert_eq!(request.user_agent_or_default(), "curl/8.0");
    }
}
