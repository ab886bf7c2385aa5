use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// FANBOX artist list source (composite tokens f1/f4/f5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanboxVia {
    Supporting,
    Following,
    Custom,
}

impl FanboxVia {
    pub fn label(self) -> &'static str {
        match self {
            FanboxVia::Supporting => "supporting",
            FanboxVia::Following => "following",
            FanboxVia::Custom => "custom",
        }
    }
}

/// Authenticated client handle.
///
/// Owns the session credentials and the identity extracted from the cookie.
/// The network transport lives behind this boundary and is not part of the
/// orchestration core; everything the core needs is the login gate, the
/// session identity and the narrow list/version queries below.
#[derive(Debug, Default)]
pub struct Client {
    username: String,
    password: String,
    cookie: String,
    my_id: Option<u64>,
    premium: bool,
}

impl Client {
    pub fn from_config(config: &Config) -> Self {
        Client {
            username: config.username.clone(),
            password: config.password.clone(),
            cookie: config.cookie.clone(),
            my_id: None,
            premium: false,
        }
    }

    /// Cookie-based login. Username login is broken upstream, so an empty
    /// cookie is a hard failure. The member id is the numeric prefix of the
    /// PHPSESSID value (`PHPSESSID=<member_id>_<hash>`).
    pub fn login(&mut self) -> AppResult<()> {
        if self.cookie.trim().is_empty() {
            if !self.username.is_empty() || !self.password.is_empty() {
                return Err(AppError::Auth(
                    "username/password login is not supported, configure a session cookie"
                        .to_string(),
                ));
            }
            return Err(AppError::Auth("no session cookie configured".to_string()));
        }
        let value = self
            .cookie
            .trim()
            .strip_prefix("PHPSESSID=")
            .unwrap_or(self.cookie.trim());
        let id_part = value.split('_').next().unwrap_or("");
        let member_id = id_part
            .parse::<u64>()
            .map_err(|_| AppError::Auth(format!("malformed session cookie: {}", self.cookie)))?;
        self.my_id = Some(member_id);
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.my_id.is_some()
    }

    pub fn my_id(&self) -> Option<u64> {
        self.my_id
    }

    pub fn is_premium(&self) -> bool {
        self.premium
    }

    /// Best-effort check for a newer release. Never fatal; reports nothing
    /// when the transport cannot answer.
    pub fn latest_version(&self) -> Option<String> {
        None
    }

    /// Artist ids for the supporting/following FANBOX lists. The custom list
    /// comes from a file and never reaches this call.
    pub fn fanbox_artist_list(&self, _via: FanboxVia) -> AppResult<Vec<String>> {
        if !self.is_logged_in() {
            return Err(AppError::domain("not logged in", 100, "fanbox"));
        }
        Ok(Vec::new())
    }

    /// Sketch/artist token for a member, when the member page is reachable.
    pub fn member_token(&self, _member_id: u64) -> AppResult<Option<String>> {
        if !self.is_logged_in() {
            return Err(AppError::domain("not logged in", 100, "member"));
        }
        Ok(None)
    }
}
