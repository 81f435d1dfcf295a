//! Customer details and the checkout form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{DEFAULT_COLOR, DEFAULT_SIZE};

/// Youngest accepted age.
pub const MIN_AGE: u32 = 1;

/// Oldest accepted age.
pub const MAX_AGE: u32 = 120;

/// Number of digits in a mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// Checkout validation failures, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name, age, mobile or email is empty.
    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    /// Email is not shaped like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Mobile is not exactly ten digits.
    #[error("Please enter a valid 10-digit mobile number")]
    InvalidMobile,

    /// Age is not a whole number between 1 and 120.
    #[error("Please enter a valid age")]
    InvalidAge,
}

/// Customer details as entered on the checkout form.
///
/// Every field keeps the raw text the shopper typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name
    pub name: String,

    /// Age in years
    pub age: String,

    /// Mobile number
    pub mobile: String,

    /// Email address
    pub email: String,

    /// Delivery address
    pub address: String,

    /// Postal (PIN) code
    pub pincode: String,

    /// Shoe size
    pub size: String,

    /// Shoe colour
    pub color: String,
}

impl Default for CustomerInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            mobile: String::new(),
            email: String::new(),
            address: String::new(),
            pincode: String::new(),
            size: DEFAULT_SIZE.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// A single checkout form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutField {
    /// Full name
    Name,
    /// Age in years
    Age,
    /// Mobile number
    Mobile,
    /// Email address
    Email,
    /// Delivery address
    Address,
    /// Postal (PIN) code
    Pincode,
    /// Shoe size
    Size,
    /// Shoe colour
    Color,
}

impl CheckoutField {
    /// Every field, in form order.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Age,
        Self::Mobile,
        Self::Email,
        Self::Address,
        Self::Pincode,
        Self::Size,
        Self::Color,
    ];

    /// Input name, as used in the persisted record.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Mobile => "mobile",
            Self::Email => "email",
            Self::Address => "address",
            Self::Pincode => "pincode",
            Self::Size => "size",
            Self::Color => "color",
        }
    }

    /// Whether the field must be filled before submission.
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::Age | Self::Mobile | Self::Email)
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a field name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown checkout field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for CheckoutField {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == value)
            .ok_or_else(|| UnknownFieldError(value.to_string()))
    }
}

/// Customer details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCustomer(CustomerInfo);

impl ValidatedCustomer {
    /// Validated details.
    pub fn info(&self) -> &CustomerInfo {
        &self.0
    }

    /// Unwrap into the underlying details.
    pub fn into_info(self) -> CustomerInfo {
        self.0
    }
}

/// Mutable checkout draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    draft: CustomerInfo,
}

impl CheckoutForm {
    /// Empty form with the default size and colour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft.
    pub fn draft(&self) -> &CustomerInfo {
        &self.draft
    }

    /// Current value of a field.
    pub fn value(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::Name => &self.draft.name,
            CheckoutField::Age => &self.draft.age,
            CheckoutField::Mobile => &self.draft.mobile,
            CheckoutField::Email => &self.draft.email,
            CheckoutField::Address => &self.draft.address,
            CheckoutField::Pincode => &self.draft.pincode,
            CheckoutField::Size => &self.draft.size,
            CheckoutField::Color => &self.draft.color,
        }
    }

    /// Replace one field, leaving the others untouched.
    pub fn update(&mut self, field: CheckoutField, value: impl Into<String>) {
        let slot = match field {
            CheckoutField::Name => &mut self.draft.name,
            CheckoutField::Age => &mut self.draft.age,
            CheckoutField::Mobile => &mut self.draft.mobile,
            CheckoutField::Email => &mut self.draft.email,
            CheckoutField::Address => &mut self.draft.address,
            CheckoutField::Pincode => &mut self.draft.pincode,
            CheckoutField::Size => &mut self.draft.size,
            CheckoutField::Color => &mut self.draft.color,
        };

        *slot = value.into();
    }

    /// Builder-style [`CheckoutForm::update`].
    #[must_use]
    pub fn with(mut self, field: CheckoutField, value: impl Into<String>) -> Self {
        self.update(field, value);
        self
    }

    /// Validate the draft.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the draft violates.
    pub fn validate(&self) -> Result<ValidatedCustomer, ValidationError> {
        validate(&self.draft)?;

        Ok(ValidatedCustomer(self.draft.clone()))
    }
}

/// Check customer details against the checkout rules.
///
/// # Errors
///
/// Returns the first [`ValidationError`] the details violate.
pub fn validate(info: &CustomerInfo) -> Result<(), ValidationError> {
    let required = [&info.name, &info.age, &info.mobile, &info.email];

    if required.iter().any(|value| value.is_empty()) {
        return Err(ValidationError::MissingRequiredFields);
    }

    if !is_valid_email(&info.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !is_valid_mobile(&info.mobile) {
        return Err(ValidationError::InvalidMobile);
    }

    parse_age(&info.age).ok_or(ValidationError::InvalidAge)?;

    Ok(())
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot in the domain with
/// text on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

/// Exactly ten ASCII digits.
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == MOBILE_DIGITS && mobile.bytes().all(|byte| byte.is_ascii_digit())
}

/// Parse an age, accepting whole numbers from [`MIN_AGE`] to [`MAX_AGE`].
pub fn parse_age(age: &str) -> Option<u32> {
    age.trim()
        .parse::<u32>()
        .ok()
        .filter(|years| (MIN_AGE..=MAX_AGE).contains(years))
}
