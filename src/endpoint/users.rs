use super::EndpointSpec;

/// `users` resource. Read-only in practice; writes go through other resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsersEndpoint;

impl EndpointSpec for UsersEndpoint {
    fn name(&self) -> &str {
        "users"
    }

    fn display_field(&self) -> &str {
        "screen_name"
    }

    fn default_index(&self) -> &str {
        "show"
    }
}
