use foodgram_auth_types::token::DEFAULT_TOKEN_TTL;

/// Foodgram API configuration loaded from environment variables.
#[derive(Debug)]
pub struct FoodgramConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing auth tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8000). Env var: `FOODGRAM_PORT`.
    pub port: u16,
    /// Auth token lifetime in seconds (default 7 days). Env var: `TOKEN_TTL_SECS`.
    pub token_ttl_secs: u64,
}

impl FoodgramConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: lookup("JWT_SECRET").expect("JWT_SECRET"),
            port: lookup("FOODGRAM_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            token_ttl_secs: lookup("TOKEN_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL),
        }
    }
}
