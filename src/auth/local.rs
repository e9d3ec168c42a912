//! Local authentication provider
//!
//! Accounts live in `users.json` with argon2id password hashes in PHC string
//! format. The signed-in identity is kept in `session.json` so it survives
//! between CLI invocations.

use std::path::PathBuf;
use std::sync::RwLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ExpensioError, ExpensioResult};
use crate::models::{Identity, UserId};
use crate::storage::{read_json, write_json_atomic};
use crate::validation::{SignInForm, SignUpForm};

use super::secret::SecretString;
use super::traits::AuthProvider;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub const EMAIL_TAKEN: &str = "An account with this email already exists.";

/// A pending password reset
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResetRequest {
    token: String,
    requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    id: UserId,
    /// Stored lowercase
    email: String,
    display_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    reset_requests: Vec<ResetRequest>,
}

impl UserRecord {
    fn identity(&self) -> Identity {
        Identity::new(self.id, self.email.clone(), self.display_name.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserData {
    users: Vec<UserRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    identity: Option<Identity>,
    signed_in_at: Option<DateTime<Utc>>,
}

fn hash_password(password: &SecretString) -> ExpensioResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ExpensioError::Auth(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &SecretString, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "stored password hash is unreadable");
            false
        }
    }
}

/// File-backed [`AuthProvider`]
pub struct LocalAuthProvider {
    users_path: PathBuf,
    session_path: PathBuf,
    session: RwLock<Option<Identity>>,
}

impl LocalAuthProvider {
    /// Open the provider, restoring any saved session
    pub fn open(users_path: PathBuf, session_path: PathBuf) -> ExpensioResult<Self> {
        let session: SessionData = read_json(&session_path)?;
        if let Some(identity) = &session.identity {
            debug!(user = %identity.user_id, "session restored");
        }

        Ok(Self {
            users_path,
            session_path,
            session: RwLock::new(session.identity),
        })
    }

    fn load_users(&self) -> ExpensioResult<UserData> {
        read_json(&self.users_path)
    }

    fn save_users(&self, data: &UserData) -> ExpensioResult<()> {
        write_json_atomic(&self.users_path, data)
    }

    fn set_session(&self, identity: Option<Identity>) -> ExpensioResult<()> {
        let data = SessionData {
            signed_in_at: identity.as_ref().map(|_| Utc::now()),
            identity: identity.clone(),
        };
        write_json_atomic(&self.session_path, &data)?;

        *self
            .session
            .write()
            .map_err(|e| ExpensioError::Auth(format!("Failed to acquire session lock: {}", e)))? =
            identity;
        Ok(())
    }
}

impl AuthProvider for LocalAuthProvider {
    fn current_identity(&self) -> Option<Identity> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    fn sign_up(&self, form: &SignUpForm) -> ExpensioResult<Identity> {
        let email = form.email().to_lowercase();
        let mut data = self.load_users()?;

        if data.users.iter().any(|u| u.email == email) {
            return Err(ExpensioError::Auth(EMAIL_TAKEN.into()));
        }

        let record = UserRecord {
            id: UserId::new(),
            email,
            display_name: form.name().to_string(),
            password_hash: hash_password(&form.password)?,
            created_at: Utc::now(),
            reset_requests: Vec::new(),
        };
        let identity = record.identity();

        data.users.push(record);
        self.save_users(&data)?;
        self.set_session(Some(identity.clone()))?;

        info!(user = %identity.user_id, "account created");
        Ok(identity)
    }

    fn sign_in(&self, form: &SignInForm) -> ExpensioResult<Identity> {
        let email = form.email().to_lowercase();
        let data = self.load_users()?;

        let record = data
            .users
            .iter()
            .find(|u| u.email == email)
            .filter(|u| verify_password(&form.password, &u.password_hash))
            .ok_or_else(|| ExpensioError::Auth(INVALID_CREDENTIALS.into()))?;

        let identity = record.identity();
        self.set_session(Some(identity.clone()))?;

        info!(user = %identity.user_id, "signed in");
        Ok(identity)
    }

    fn sign_out(&self) -> ExpensioResult<()> {
        if let Some(identity) = self.current_identity() {
            info!(user = %identity.user_id, "signed out");
        }
        self.set_session(None)
    }

    fn request_password_reset(&self, email: &str) -> ExpensioResult<()> {
        let email = email.trim().to_lowercase();
        let mut data = self.load_users()?;

        match data.users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                let token = Uuid::new_v4().simple().to_string();
                info!(user = %user.id, token = %token, "password reset requested");
                user.reset_requests.push(ResetRequest {
                    token,
                    requested_at: Utc::now(),
                });
                self.save_users(&data)?;
            }
            None => debug!("password reset requested for unknown email"),
        }

        Ok(())
    }
}
