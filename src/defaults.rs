//! Default values used across the crate.

/// API origin and path conventions.
pub mod api {
    /// Origin of the v1.1 REST API.
    pub const API_URL: &str = "https://api.twitter.com";

    /// Path prefix shared by every v1.1 route.
    pub const VERSION_PREFIX: &str = "/1.1";

    /// Search route used by the `statuses` resource.
    pub const STATUSES_SEARCH_URL: &str = "/1.1/search/tweets.json";

    /// Reported total for `user_timeline` reads (the API only serves the latest 3200 tweets).
    pub const USER_TIMELINE_TOTAL: u64 = 3200;

    /// Reported total for `home_timeline` reads (the API only serves the latest 800 tweets).
    pub const HOME_TIMELINE_TOTAL: u64 = 800;
}

/// HTTP client defaults.
pub mod http {
    use std::time::Duration;

    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn user_agent() -> String {
        format!("twitter-webservice/{}", env!("CARGO_PKG_VERSION"))
    }
}
