//! Dispatcher login with a local failed-attempt throttle

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use rts_domain::model::{AuthRequest, LoginAttempts};
use rts_domain::repository::{LoginAttemptRepository, WorkflowGateway};
use rts_domain::service::{LoginThrottle, ThrottleDecision};

use super::wire_timestamp;

pub const MSG_LOGIN_OK: &str = "Anmeldung erfolgreich.";
pub const MSG_CREDENTIALS_REQUIRED: &str = "Benutzername und Passwort sind erforderlich.";
pub const MSG_LOGIN_REJECTED: &str = "Ungültiger Benutzername oder Passwort.";
pub const MSG_CONNECTION_FAILED: &str = "Verbindungsfehler. Bitte versuchen Sie es später erneut.";

/// Session state of the dispatcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated { token: String },
}

/// Result of one login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
    pub token: Option<String>,
}

impl AuthOutcome {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token: None,
        }
    }
}

pub struct AuthService {
    gateway: Arc<dyn WorkflowGateway>,
    attempts: Arc<dyn LoginAttemptRepository>,
    throttle: LoginThrottle,
    state: AuthState,
}

impl AuthService {
    pub fn new(
        gateway: Arc<dyn WorkflowGateway>,
        attempts: Arc<dyn LoginAttemptRepository>,
        throttle: LoginThrottle,
    ) -> Self {
        Self {
            gateway,
            attempts,
            throttle,
            state: AuthState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    pub fn session_token(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { token } => Some(token),
            _ => None,
        }
    }

    pub fn logout(&mut self) {
        if self.is_authenticated() {
            info!("Logged out");
        }
        self.state = AuthState::Unauthenticated;
    }

    pub fn authenticate(&mut self, username: &str, password: &str) -> AuthOutcome {
        self.authenticate_at(username, password, Utc::now())
    }

    /// Log in at a given instant
    pub fn authenticate_at(
        &mut self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> AuthOutcome {
        let stored = self.load_attempts();
        let attempts = match self.throttle.check(stored, now) {
            ThrottleDecision::Locked {
                retry_after_minutes,
            } => {
                warn!(
                    "Login locked after {} failed attempts, retry in {} min",
                    stored.count, retry_after_minutes
                );
                return AuthOutcome::failed(LoginThrottle::locked_message(retry_after_minutes));
            }
            ThrottleDecision::Allowed {
                attempts,
                was_reset,
            } => {
                if was_reset {
                    self.save_attempts(&attempts);
                }
                attempts
            }
        };

        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return AuthOutcome::failed(MSG_CREDENTIALS_REQUIRED);
        }

        self.state = AuthState::Authenticating;
        let request = AuthRequest {
            username: username.to_string(),
            password: password.to_string(),
            timestamp: wire_timestamp(now),
        };

        match self.gateway.authenticate(&request) {
            Ok(reply) if reply.is_success() => {
                let token = reply
                    .token
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                self.save_attempts(&LoginAttempts::reset());
                self.state = AuthState::Authenticated {
                    token: token.clone(),
                };
                info!("Login succeeded for {}", username);
                AuthOutcome {
                    success: true,
                    message: MSG_LOGIN_OK.to_string(),
                    token: Some(token),
                }
            }
            Ok(reply) => {
                self.record_failure(&attempts, now);
                info!("Login rejected for {} (HTTP {})", username, reply.status);
                AuthOutcome::failed(MSG_LOGIN_REJECTED)
            }
            Err(e) => {
                self.record_failure(&attempts, now);
                warn!("Login request failed: {}", e);
                AuthOutcome::failed(MSG_CONNECTION_FAILED)
            }
        }
    }

    fn record_failure(&mut self, attempts: &LoginAttempts, now: DateTime<Utc>) {
        self.save_attempts(&attempts.recorded(now.timestamp_millis()));
        self.state = AuthState::Unauthenticated;
    }

    fn load_attempts(&self) -> LoginAttempts {
        self.attempts.load().unwrap_or_else(|e| {
            warn!("Could not read login attempts, starting over: {}", e);
            LoginAttempts::reset()
        })
    }

    fn save_attempts(&self, attempts: &LoginAttempts) {
        if let Err(e) = self.attempts.save(attempts) {
            warn!("Could not store login attempts: {}", e);
        }
    }
}
