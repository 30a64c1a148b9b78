//! Explicit session context
//!
//! Holds the authenticated user, the access/refresh token pair and a
//! counter of in-flight loading operations. The context is a cheap
//! cloneable handle; all clones observe the same state.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	pub id: String,
	pub username: String,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub full_name: Option<String>,
	#[serde(default)]
	pub roles: Vec<String>,
}

impl UserProfile {
	pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			username: username.into(),
			email: None,
			full_name: None,
			roles: Vec::new(),
		}
	}

	pub fn with_role(mut self, role: impl Into<String>) -> Self {
		self.roles.push(role.into());
		self
	}

	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r == role)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
	pub access_token: String,
	#[serde(default)]
	pub refresh_token: Option<String>,
}

impl AuthTokens {
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: access_token.into(),
			refresh_token: None,
		}
	}

	pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		self.refresh_token = Some(refresh_token.into());
		self
	}
}

#[derive(Debug, Default)]
struct SessionState {
	user: Option<UserProfile>,
	tokens: Option<AuthTokens>,
	loading: usize,
}

/// Shared session handle.
///
/// # Examples
///
/// ```
/// use steady_core::{AuthTokens, Session, UserProfile};
///
/// let session = Session::new();
/// assert!(!session.is_authenticated());
///
/// session.login(UserProfile::new("1", "admin"), AuthTokens::new("abc"));
/// assert_eq!(session.bearer_header().as_deref(), Some("Bearer abc"));
///
/// session.logout();
/// assert!(session.user().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
	inner: Arc<RwLock<SessionState>>,
}

impl Session {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn login(&self, user: UserProfile, tokens: AuthTokens) {
		let mut state = self.inner.write();
		tracing::debug!(username = %user.username, "session started");
		state.user = Some(user);
		state.tokens = Some(tokens);
	}

	pub fn set_user(&self, user: UserProfile) {
		self.inner.write().user = Some(user);
	}

	/// Replace the token pair after a refresh
	pub fn update_tokens(&self, tokens: AuthTokens) {
		self.inner.write().tokens = Some(tokens);
	}

	pub fn logout(&self) {
		let mut state = self.inner.write();
		state.user = None;
		state.tokens = None;
		tracing::debug!("session cleared");
	}

	pub fn is_authenticated(&self) -> bool {
		self.inner.read().tokens.is_some()
	}

	pub fn access_token(&self) -> Option<String> {
		self.inner
			.read()
			.tokens
			.as_ref()
			.map(|t| t.access_token.clone())
	}

	pub fn refresh_token(&self) -> Option<String> {
		self.inner
			.read()
			.tokens
			.as_ref()
			.and_then(|t| t.refresh_token.clone())
	}

	/// Value for an `Authorization` header, if a token is held
	pub fn bearer_header(&self) -> Option<String> {
		self.access_token().map(|token| format!("Bearer {}", token))
	}

	pub fn user(&self) -> Option<UserProfile> {
		self.inner.read().user.clone()
	}

	/// Mark an operation as in flight until the returned guard drops
	pub fn begin_loading(&self) -> LoadingGuard {
		self.inner.write().loading += 1;
		LoadingGuard {
			session: self.clone(),
		}
	}

	pub fn is_loading(&self) -> bool {
		self.inner.read().loading > 0
	}
}

/// Decrements the session's loading counter on drop.
#[derive(Debug)]
pub struct LoadingGuard {
	session: Session,
}

impl Drop for LoadingGuard {
	fn drop(&mut self) {
		let mut state = self.session.inner.write();
		state.loading = state.loading.saturating_sub(1);
	}
}
