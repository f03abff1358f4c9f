use chrono::Duration;

const DEFAULT_ACCESS_LIFETIME_SECS: i64 = 5 * 60;
const DEFAULT_REFRESH_LIFETIME_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    pub fn from_secs(access_secs: u64, refresh_secs: u64) -> Self {
        Self {
            access: Duration::seconds(access_secs as i64),
            refresh: Duration::seconds(refresh_secs as i64),
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::seconds(DEFAULT_ACCESS_LIFETIME_SECS),
            refresh: Duration::seconds(DEFAULT_REFRESH_LIFETIME_SECS),
        }
    }
}
