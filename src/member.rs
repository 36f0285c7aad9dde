// 🏋️ Member Entity - Stable identity + replaceable details
//
// "Member id is IDENTITY (never changes), name/age/phone/plan are VALUES"
//
// The id and the registration date are stamped once by the registry.
// Everything else is swapped out as one MemberDetails value.

use serde::Serialize;

/// Identifier assigned by the registry, starting at 1.
pub type MemberId = u32;

// ============================================================================
// MEMBER DETAILS
// ============================================================================

/// The four mutable fields of a member, always replaced together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDetails {
    pub name: String,
    pub age: i32,
    pub phone: String,
    pub membership_type: String,
}

impl MemberDetails {
    pub fn new(
        name: impl Into<String>,
        age: i32,
        phone: impl Into<String>,
        membership_type: impl Into<String>,
    ) -> Self {
        MemberDetails {
            name: name.into(),
            age,
            phone: phone.into(),
            membership_type: membership_type.into(),
        }
    }
}

// ============================================================================
// MEMBER ENTITY
// ============================================================================

/// A registered member. Only `MemberRegistry::add` creates one.
///
/// Members serialize for display but cannot be rebuilt from JSON:
///
/// ```compile_fail
/// let member: gym_registry::Member = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    // ========================================================================
    // IDENTITY (never changes)
    // ========================================================================
    id: MemberId,
    registration_date: String,

    // ========================================================================
    // VALUES (replaced by update_details)
    // ========================================================================
    #[serde(flatten)]
    details: MemberDetails,
}

impl Member {
    pub(crate) fn new(id: MemberId, details: MemberDetails, registration_date: String) -> Self {
        Member {
            id,
            registration_date,
            details,
        }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn age(&self) -> i32 {
        self.details.age
    }

    pub fn phone(&self) -> &str {
        &self.details.phone
    }

    pub fn membership_type(&self) -> &str {
        &self.details.membership_type
    }

    pub fn registration_date(&self) -> &str {
        &self.registration_date
    }

    pub fn details(&self) -> &MemberDetails {
        &self.details
    }

    /// Replace name, age, phone and membership type in one step.
    ///
    /// No validation happens here; the registry checks the details first.
    pub(crate) fn update_details(&mut self, details: MemberDetails) {
        self.details = details;
    }
}

// ============================================================================
// TESTS
// ============================================================================
