use crate::models::{ProfilePhoto, Registration};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static CONTACT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";
pub const MIN_PASSWORD_LEN: usize = 6;

/// Signup form input as entered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub user_name: String,
    pub user_email: String,
    pub user_password: String,
    pub confirm_password: String,
    pub user_contact_number: String,
    pub profile_photo: Option<ProfilePhoto>,
}

impl SignupForm {
    pub fn to_registration(&self) -> Registration {
        Registration {
            name: self.user_name.clone(),
            email: self.user_email.clone(),
            password: self.user_password.clone(),
            contact_number: self.user_contact_number.clone(),
            profile_photo: self.profile_photo.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignupField {
    UserName,
    UserEmail,
    UserContactNumber,
    UserPassword,
    ConfirmPassword,
}

impl fmt::Display for SignupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignupField::UserName => "Username",
            SignupField::UserEmail => "Email",
            SignupField::UserContactNumber => "Mobile Number",
            SignupField::UserPassword => "Password",
            SignupField::ConfirmPassword => "Confirm Password",
        };
        f.write_str(name)
    }
}

/// Validation messages keyed by field, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<SignupField, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: SignupField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignupField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: SignupField, message: &'static str) {
        self.0.insert(field, message);
    }
}

fn is_password_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c)
}

fn has_every_class(chars: &[char]) -> bool {
    chars.iter().any(|c| c.is_ascii_uppercase())
        && chars.iter().any(|c| c.is_ascii_lowercase())
        && chars.iter().any(|c| c.is_ascii_digit())
        && chars.iter().any(|c| PASSWORD_SYMBOLS.contains(*c))
}

/// Some position starts a stretch of at least six allowed characters and every
/// class appears from that position on
fn password_is_complex(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    (0..chars.len()).any(|start| {
        let run = chars[start..]
            .iter()
            .take_while(|c| is_password_char(**c))
            .count();
        run >= MIN_PASSWORD_LEN && has_every_class(&chars[start..])
    })
}

/// Check every field and collect all violations
pub fn validate(form: &SignupForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.user_name.trim().is_empty() {
        errors.insert(SignupField::UserName, "Please enter your Username");
    }

    if form.user_email.trim().is_empty() {
        errors.insert(SignupField::UserEmail, "Please enter your Email Address");
    } else if !EMAIL_PATTERN.is_match(&form.user_email) {
        errors.insert(SignupField::UserEmail, "Please enter a valid Email Address");
    }

    if !CONTACT_PATTERN.is_match(&form.user_contact_number) {
        errors.insert(
            SignupField::UserContactNumber,
            "Please enter a valid 10-digit Mobile Number",
        );
    }

    if form.user_password.trim().is_empty() {
        errors.insert(SignupField::UserPassword, "Please enter your Password");
    } else if form.user_password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            SignupField::UserPassword,
            "Password must be at least 6 characters long",
        );
    } else if !password_is_complex(&form.user_password) {
        errors.insert(
            SignupField::UserPassword,
            "Password must contain at least one uppercase letter, one lowercase letter, one digit, one special character, and be at least 6 characters long",
        );
    }

    if form.user_password != form.confirm_password {
        errors.insert(SignupField::ConfirmPassword, "Passwords do not match");
    }

    errors
}
