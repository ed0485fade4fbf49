//! Admin identity.

/// An authenticated administrator.
///
/// Only [`AdminCredentials`](crate::auth::AdminCredentials) hands these out,
/// so holding one proves the login check already happened. Every privileged
/// service operation takes one by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPrincipal {
    username: String,
}

impl AdminPrincipal {
    pub(crate) fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Principal for trusted local tooling with direct database access.
    #[must_use]
    pub fn local_operator() -> Self {
        Self::new("local-operator")
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}
