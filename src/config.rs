use std::env;
use std::fmt;

/// Configuração do processo, lida uma vez no startup (env + .env)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database: String,
    pub collection: String,
    pub workers: usize,
    /// Conexões simultâneas por worker
    pub max_connections: usize,
    /// Vazio = qualquer origem
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value for {}: '{}'", self.key, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port_raw = var("PORT", "50051");
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError { key: "PORT", value: port_raw.clone() })?;

        let workers_raw = var("RPC_WORKERS", "10");
        let workers = match workers_raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => return Err(ConfigError { key: "RPC_WORKERS", value: workers_raw }),
        };

        let max_connections_raw = var("RPC_MAX_CONNECTIONS", "25000");
        let max_connections = match max_connections_raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => return Err(ConfigError { key: "RPC_MAX_CONNECTIONS", value: max_connections_raw }),
        };

        // `mongo` é o nome usado pelos deploys antigos (docker-compose)
        let mongo_uri = lookup("MONGO_URI")
            .or_else(|| lookup("mongo"))
            .unwrap_or_else(|| "mongodb://db:27017/".to_string());

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ServerConfig {
            host: var("HOST", "0.0.0.0"),
            port,
            mongo_uri,
            database: var("MONGO_DATABASE", "DressMeDB"),
            collection: var("MONGO_COLLECTION", "usuarios"),
            workers,
            max_connections,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
