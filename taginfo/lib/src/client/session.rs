//! HTTP session management.
//!
//! A [`Session`] wraps a pooled `reqwest::Client`. Callers may share one
//! across many calls; otherwise the executor creates an ephemeral one per
//! call through a scoped guard that releases it on every exit path.

use std::time::Duration;

use reqwest::header::HeaderValue;
use tracing::trace;

use crate::error::CallError;

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent unless the caller configures another one.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "taginfo-rs/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/yankeeinlondon/taginfo-rs)"
);

/// Builder for configuring a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SessionBuilder {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds the [`Session`].
    ///
    /// ## Errors
    ///
    /// Returns [`CallError::Request`] if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Session, CallError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Session {
            client,
            user_agent: None,
        })
    }
}

/// A reusable HTTP session.
///
/// Cloning is cheap and shares the connection pool.
///
/// ## Examples
///
/// ```rust,no_run
/// use taginfo::{Session, TaginfoClient};
///
/// # fn main() -> Result<(), taginfo::TaginfoError> {
/// let session = Session::builder().build()?;
/// let client = TaginfoClient::builder().session(session).build();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    /// Attached per request; `None` leaves the client's own header alone.
    user_agent: Option<HeaderValue>,
}

impl Session {
    /// Creates a new builder for configuring a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Adopts a caller-built `reqwest::Client`.
    ///
    /// Requests go out with whatever `User-Agent` the client already sets.
    /// Call [`with_default_user_agent`](Self::with_default_user_agent) if the
    /// client does not set one.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            user_agent: None,
        }
    }

    /// Attaches [`DEFAULT_USER_AGENT`] to every request.
    ///
    /// Overrides any `User-Agent` configured on the wrapped client.
    pub fn with_default_user_agent(mut self) -> Self {
        self.user_agent = Some(HeaderValue::from_static(DEFAULT_USER_AGENT));
        self
    }

    /// Returns the wrapped `reqwest::Client`.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Starts a GET request, attaching the user agent when required.
    pub(crate) fn get(&self, url: url::Url) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.user_agent {
            Some(ua) => request.header(reqwest::header::USER_AGENT, ua.clone()),
            None => request,
        }
    }
}

/// A session borrowed from the caller or created for a single call.
///
/// An ephemeral session is dropped together with the guard, so it is
/// released whether the call succeeds, fails or is cancelled.
pub(crate) enum ScopedSession<'a> {
    Shared(&'a Session),
    Ephemeral(Session),
}

impl<'a> ScopedSession<'a> {
    /// Borrows `shared` if present, otherwise builds an ephemeral session.
    pub(crate) fn acquire(
        shared: Option<&'a Session>,
        builder: &SessionBuilder,
    ) -> Result<Self, CallError> {
        match shared {
            Some(session) => Ok(Self::Shared(session)),
            None => {
                trace!("acquiring ephemeral session");
                Ok(Self::Ephemeral(builder.clone().build()?))
            }
        }
    }

    pub(crate) fn session(&self) -> &Session {
        match self {
            Self::Shared(session) => session,
            Self::Ephemeral(session) => session,
        }
    }

    pub(crate) fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Ephemeral(_))
    }
}

impl Drop for ScopedSession<'_> {
    fn drop(&mut self) {
        if self.is_ephemeral() {
            trace!("releasing ephemeral session");
        }
    }
}
