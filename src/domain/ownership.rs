//! Ownership guards shared by the book and review services

use super::{DomainError, UserId};

/// Only the owner may mutate a resource
pub fn ensure_owner(owner: UserId, requester: UserId) -> Result<(), DomainError> {
    if owner == requester {
        Ok(())
    } else {
        Err(DomainError::Unauthorized("User not authorized".to_string()))
    }
}

/// The owner of a book may not review it
pub fn ensure_not_owner(owner: UserId, requester: UserId) -> Result<(), DomainError> {
    if owner == requester {
        Err(DomainError::Forbidden(
            "You cannot review your own book".to_string(),
        ))
    } else {
        Ok(())
    }
}
