// 🗂️ Member Registry - ordered in-memory store
//
// Owns every Member of the session. Ids come from a counter that is never
// reset, so an id is never handed out twice even after deletes.

use crate::member::{Member, MemberDetails, MemberId};
use crate::validation::{self, InvalidField};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Member not found: {0}")]
    NotFound(MemberId),
    #[error(transparent)]
    Invalid(#[from] InvalidField),
    #[error("Member ids exhausted")]
    IdsExhausted,
}

// ============================================================================
// MEMBER REGISTRY
// ============================================================================

/// Registry of all members in the current session.
///
/// Records keep insertion order. Lookup is a linear scan.
#[derive(Debug)]
pub struct MemberRegistry {
    members: Vec<Member>,
    next_id: MemberId,
}

impl MemberRegistry {
    /// Create an empty registry; the first member gets id 1.
    pub fn new() -> Self {
        MemberRegistry {
            members: Vec::new(),
            next_id: 1,
        }
    }

    pub fn validate_name(name: &str) -> bool {
        validation::validate_name(name)
    }

    pub fn validate_age(age: i32) -> bool {
        validation::validate_age(age)
    }

    pub fn validate_phone(phone: &str) -> bool {
        validation::validate_phone(phone)
    }

    /// Add a member and return its new id.
    ///
    /// Details are validated again here; a rejected add does not consume an id.
    /// `MemberId::MAX` is never handed out, so ids stay unique.
    pub fn add(
        &mut self,
        details: MemberDetails,
        registration_date: impl Into<String>,
    ) -> Result<MemberId, RegistryError> {
        if let Err(field) = validation::validate_details(&details) {
            debug!(?field, "rejected new member");
            return Err(field.into());
        }

        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or(RegistryError::IdsExhausted)?;
        self.members
            .push(Member::new(id, details, registration_date.into()));
        self.next_id = next_id;

        debug!(id, "member added");
        Ok(id)
    }

    /// All members in insertion order.
    pub fn list(&self) -> &[Member] {
        &self.members
    }

    pub fn find_by_id(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id() == id)
    }

    fn position(&self, id: MemberId) -> Option<usize> {
        self.members.iter().position(|m| m.id() == id)
    }

    /// Replace the four mutable fields of member `id`.
    ///
    /// Nothing is touched when the id is unknown or a field is invalid.
    pub fn update(&mut self, id: MemberId, details: MemberDetails) -> Result<(), RegistryError> {
        let index = self.position(id).ok_or(RegistryError::NotFound(id))?;

        if let Err(field) = validation::validate_details(&details) {
            debug!(id, ?field, "rejected member update");
            return Err(field.into());
        }

        self.members[index].update_details(details);
        debug!(id, "member updated");
        Ok(())
    }

    /// Remove member `id`, keeping the order of the others.
    pub fn delete(&mut self, id: MemberId) -> Result<Member, RegistryError> {
        let index = self.position(id).ok_or(RegistryError::NotFound(id))?;
        let removed = self.members.remove(index);

        debug!(id, remaining = self.members.len(), "member deleted");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for MemberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
