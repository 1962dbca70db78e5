use axum_extra::extract::cookie::{Cookie, CookieJar};
#[cfg(test)]
use std::collections::HashMap;

/// Key of the "visitor has opened the invitation" flag
pub const INVITATION_OPENED_KEY: &str = "invitationOpened";

/// Visitor-side durable key/value storage
pub trait FlagStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// Storage backed by the visitor's cookies: scoped to the origin, no expiry.
pub struct CookieStorage {
    jar: CookieJar,
}

impl CookieStorage {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    /// The jar to send back so writes reach the browser
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl FlagStorage for CookieStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|cookie| cookie.value().to_string())
    }

    fn set_item(&mut self, key: &str, value: &str) {
        let cookie = Cookie::build((key.to_string(), value.to_string()))
            .path("/")
            .http_only(true)
            .permanent();
        self.jar = self.jar.clone().add(cookie);
    }
}

/// Process-local storage
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

#[cfg(test)]
impl FlagStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}
