//! Authentication service
//!
//! Validates sign-in and sign-up forms before anything reaches the provider.

use crate::auth::AuthProvider;
use crate::error::{ExpensioError, ExpensioResult};
use crate::models::Identity;
use crate::validation::{is_valid_email, SignInForm, SignUpForm, EMAIL_INVALID};

/// Service wrapping an [`AuthProvider`]
pub struct AuthService<'a, A: AuthProvider + ?Sized> {
    provider: &'a A,
}

impl<'a, A: AuthProvider + ?Sized> AuthService<'a, A> {
    pub fn new(provider: &'a A) -> Self {
        Self { provider }
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.provider.current_identity()
    }

    pub fn sign_up(&self, form: &SignUpForm) -> ExpensioResult<Identity> {
        form.validate()?;
        self.provider.sign_up(form)
    }

    pub fn sign_in(&self, form: &SignInForm) -> ExpensioResult<Identity> {
        form.validate()?;
        self.provider.sign_in(form)
    }

    pub fn sign_out(&self) -> ExpensioResult<()> {
        self.provider.sign_out()
    }

    pub fn request_password_reset(&self, email: &str) -> ExpensioResult<()> {
        if !is_valid_email(email) {
            return Err(ExpensioError::field("email", EMAIL_INVALID));
        }
        self.provider.request_password_reset(email)
    }
}
