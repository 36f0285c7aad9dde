// 📐 Field Validation - name, age, phone rules
// Predicates return bool so the console can re-prompt; validate_details
// reports which field failed first.

use crate::member::MemberDetails;
use thiserror::Error;

/// Youngest accepted age.
pub const MIN_AGE: i32 = 1;
/// Oldest accepted age.
pub const MAX_AGE: i32 = 119;
/// Required phone number length.
pub const PHONE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidField {
    #[error("Invalid name. Use only letters.")]
    Name,
    #[error("Invalid age. Must be between 1 and 120.")]
    Age,
    #[error("Invalid phone number. Must be 10 digits.")]
    Phone,
}

/// ASCII letters and ASCII whitespace only. An empty name passes.
pub fn validate_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphabetic() || is_ascii_space(c))
}

/// Space, tab, newline, vertical tab, form feed, carriage return.
fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

pub fn validate_age(age: i32) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&age)
}

pub fn validate_phone(phone: &str) -> bool {
    phone.len() == PHONE_LEN && phone.chars().all(|c| c.is_ascii_digit())
}

/// Check name, age and phone in that order.
pub fn validate_details(details: &MemberDetails) -> Result<(), InvalidField> {
    if !validate_name(&details.name) {
        return Err(InvalidField::Name);
    }
    if !validate_age(details.age) {
        return Err(InvalidField::Age);
    }
    if !validate_phone(&details.phone) {
        return Err(InvalidField::Phone);
    }
    Ok(())
}
