use std::net::SocketAddr;

use anyhow::{Context, bail};

/// Which [`Store`](crate::store::Store) backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Sql,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sql" => Ok(Self::Sql),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown store kind {other:?}, expected \"sql\" or \"memory\""),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub store: StoreKind,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let store = std::env::var("STORE")
            .unwrap_or_else(|_| "sql".to_string())
            .parse()
            .context("STORE")?;

        let database_url = resolve_database_url(|key| std::env::var(key).ok());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            store,
            database_url,
        })
    }
}

/// `DATABASE_URL` wins; otherwise any `DB_*` variable selects MySQL, and a
/// local SQLite file is the fallback.
pub fn resolve_database_url(var: impl Fn(&str) -> Option<String>) -> String {
    if let Some(url) = var("DATABASE_URL") {
        return url;
    }

    let host = var("DB_HOST");
    let user = var("DB_USER");
    let password = var("DB_PASSWORD");
    let name = var("DB_NAME");
    if host.is_none() && user.is_none() && password.is_none() && name.is_none() {
        return "sqlite://allonscinoche.db?mode=rwc".to_string();
    }

    let user = user.unwrap_or_else(|| "root".to_string());
    let password = password.unwrap_or_default();
    format!(
        "mysql://{}:{}@{}/{}",
        urlencoding::encode(&user),
        urlencoding::encode(&password),
        host.unwrap_or_else(|| "localhost".to_string()),
        name.unwrap_or_else(|| "allonscinoche".to_string()),
    )
}
