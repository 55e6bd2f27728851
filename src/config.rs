use crate::routes::RoutePolicy;
use std::env;

const DEFAULT_JSON_BODY_LIMIT: usize = 256 * 1024;

pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub route_policy: RoutePolicy,
    /// Largest accepted request body, in bytes.
    pub json_body_limit: usize,
}

impl Config {
    /// Reads `SERVER_HOST`, `SERVER_PORT`, `ROUTE_POLICY` and `JSON_BODY_LIMIT`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| format!("SERVER_PORT must be a number, got '{}'", port))?,
            None => 8080,
        };
        let route_policy = match lookup("ROUTE_POLICY") {
            Some(policy) => policy.parse()?,
            None => RoutePolicy::default(),
        };
        let json_body_limit = match lookup("JSON_BODY_LIMIT") {
            Some(limit) => limit
                .parse()
                .map_err(|_| format!("JSON_BODY_LIMIT must be a number of bytes, got '{}'", limit))?,
            None => DEFAULT_JSON_BODY_LIMIT,
        };

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port,
            route_policy,
            json_body_limit,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
