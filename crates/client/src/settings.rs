use serde::{Deserialize, Serialize};

/// Where the network collaborator should connect, and as whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login name.
    pub username: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 25565,
            username: "superbot".to_string(),
        }
    }
}

impl ConnectionSettings {
    /// `host:port` string.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
