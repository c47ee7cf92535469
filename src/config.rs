use std::env;
use std::net::SocketAddr;

const DEFAULT_HEALTH_ADDR: &str = "0.0.0.0:8080";

/// Ошибки конфигурации фатальны: процесс не стартует частично
#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    BadNamePool(String),
    BadHealthAddr(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{} must be set", name),
            ConfigError::BadNamePool(e) => write!(f, "Bad SWEET_NAMES: {}", e),
            ConfigError::BadHealthAddr(e) => write!(f, "Bad HEALTH_ADDR: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    /// Пул обращений к пользователю, минимум два имени
    pub sweet_names: Vec<String>,
    pub health_addr: SocketAddr,
}

impl Config {
    /// Токен бота (TELOXIDE_TOKEN) читает сам `Bot::from_env()`
    pub fn from_env() -> Result<Self, ConfigError> {
        let names = env::var("SWEET_NAMES").map_err(|_| ConfigError::MissingVar("SWEET_NAMES"))?;
        let health_addr = env::var("HEALTH_ADDR").ok();
        Self::parse(&names, health_addr.as_deref())
    }

    fn parse(names_json: &str, health_addr: Option<&str>) -> Result<Self, ConfigError> {
        let sweet_names: Vec<String> =
            serde_json::from_str(names_json).map_err(|e| ConfigError::BadNamePool(e.to_string()))?;
        if sweet_names.len() < 2 {
            return Err(ConfigError::BadNamePool(format!(
                "need at least 2 names, got {}",
                sweet_names.len()
            )));
        }

        let health_addr = health_addr
            .unwrap_or(DEFAULT_HEALTH_ADDR)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::BadHealthAddr(e.to_string()))?;

        Ok(Self {
            sweet_names,
            health_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_pool_and_default_addr() {
        let config = Config::parse(r#"["Солнышко", "Зайка"]"#, None).unwrap();
        assert_eq!(config.sweet_names, vec!["Солнышко", "Зайка"]);
        assert_eq!(config.health_addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn accepts_explicit_health_addr() {
        let config = Config::parse(r#"["Солнышко", "Зайка"]"#, Some("127.0.0.1:9000")).unwrap();
        assert_eq!(config.health_addr, "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn rejects_malformed_pool() {
        assert!(matches!(
            Config::parse("не json", None),
            Err(ConfigError::BadNamePool(_))
        ));
    }

    #[test]
    fn rejects_pool_with_fewer_than_two_names() {
        assert!(matches!(
            Config::parse(r#"["Солнышко"]"#, None),
            Err(ConfigError::BadNamePool(_))
        ));
        assert!(matches!(
            Config::parse("[]", None),
            Err(ConfigError::BadNamePool(_))
        ));
    }

    #[test]
    fn rejects_malformed_health_addr() {
        assert!(matches!(
            Config::parse(r#"["Солнышко", "Зайка"]"#, Some("не адрес")),
            Err(ConfigError::BadHealthAddr(_))
        ));
    }
}
