//! Entry-time form checks
//!
//! Forms hold raw user input. Validation happens before anything is handed
//! to the record store or the auth provider, so a rejected form never causes
//! a partial submission.

use std::sync::OnceLock;

use regex::Regex;

use crate::auth::SecretString;
use crate::error::{ExpensioError, ExpensioResult, ValidationErrors};
use crate::models::{Money, NewExpense, UserId};

/// Minimum password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Largest amount the expense form accepts (one billion)
pub const MAX_AMOUNT: Money = Money::from_minor(100_000_000_000);

pub const TITLE_REQUIRED: &str = "Title cannot be empty.";
pub const CATEGORY_REQUIRED: &str = "Category cannot be empty.";
pub const AMOUNT_INVALID: &str = "Enter a valid amount greater than 0.";
pub const EMAIL_INVALID: &str = "Enter a valid email address.";
pub const SIGN_IN_PASSWORD_SHORT: &str = "Minimum 6 characters.";
pub const NAME_REQUIRED: &str = "Enter your full name.";
pub const SIGN_UP_PASSWORD_SHORT: &str = "Password must be at least 6 characters.";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match.";

/// Whether `email` looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

    PATTERN
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9+._%\-]{1,256}@[A-Za-z0-9][A-Za-z0-9\-]{0,64}(\.[A-Za-z0-9][A-Za-z0-9\-]{0,25})+$").ok()
        })
        .as_ref()
        .map(|re| re.is_match(email.trim()))
        .unwrap_or(false)
}

/// Raw input from the add-expense form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub title: String,
    pub category: String,
    pub amount: String,
}

/// An expense form that passed validation, not yet tied to an owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidExpense {
    pub title: String,
    pub category: String,
    pub amount: Money,
}

impl ValidExpense {
    pub fn for_owner(self, owner: UserId) -> NewExpense {
        NewExpense::new(owner, self.title, self.category, self.amount)
    }
}

impl ExpenseForm {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }

    /// Check fields in order and report only the first failure
    pub fn validate(&self) -> ExpensioResult<ValidExpense> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ExpensioError::field("title", TITLE_REQUIRED));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ExpensioError::field("category", CATEGORY_REQUIRED));
        }

        let amount = match Money::parse(&self.amount) {
            Ok(amount) if amount.is_positive() && amount <= MAX_AMOUNT => amount,
            _ => return Err(ExpensioError::field("amount", AMOUNT_INVALID)),
        };

        Ok(ValidExpense {
            title: title.to_string(),
            category: category.to_string(),
            amount,
        })
    }
}

/// Raw input from the sign-in form
#[derive(Debug, Clone)]
pub struct SignInForm {
    pub email: String,
    pub password: SecretString,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Email with surrounding whitespace removed
    pub fn email(&self) -> &str {
        self.email.trim()
    }

    /// Check every field and report all failures together
    pub fn validate(&self) -> ExpensioResult<()> {
        let mut errors = ValidationErrors::new();

        if !is_valid_email(&self.email) {
            errors.push("email", EMAIL_INVALID);
        }
        if self.password.char_len() < MIN_PASSWORD_LEN {
            errors.push("password", SIGN_IN_PASSWORD_SHORT);
        }

        errors.into_result()
    }
}

/// Raw input from the sign-up form
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl SignUpForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<SecretString>,
        confirm_password: impl Into<SecretString>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.trim()
    }

    pub fn email(&self) -> &str {
        self.email.trim()
    }

    /// Check every field and report all failures together
    pub fn validate(&self) -> ExpensioResult<()> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", NAME_REQUIRED);
        }
        if !is_valid_email(&self.email) {
            errors.push("email", EMAIL_INVALID);
        }
        if self.password.char_len() < MIN_PASSWORD_LEN {
            errors.push("password", SIGN_UP_PASSWORD_SHORT);
        }
        if !self.password.ct_eq(&self.confirm_password) {
            errors.push("confirm_password", PASSWORDS_DIFFER);
        }

        errors.into_result()
    }
}
