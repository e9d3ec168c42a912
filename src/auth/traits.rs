//! Authentication provider contract

use crate::error::ExpensioResult;
use crate::models::Identity;
use crate::validation::{SignInForm, SignUpForm};

/// Identity source used by the CLI and views
///
/// Implementations may assume forms were already validated; failures carry a
/// message fit to show the user.
pub trait AuthProvider {
    /// The signed-in identity, if any
    fn current_identity(&self) -> Option<Identity>;

    /// Create an account and sign it in
    fn sign_up(&self, form: &SignUpForm) -> ExpensioResult<Identity>;

    fn sign_in(&self, form: &SignInForm) -> ExpensioResult<Identity>;

    fn sign_out(&self) -> ExpensioResult<()>;

    /// Ask for a reset link; succeeds whether or not the email is known
    fn request_password_reset(&self, email: &str) -> ExpensioResult<()>;
}
