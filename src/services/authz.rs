use crate::auth::Principal;
use crate::services::ServiceError;

/// Fails with `Forbidden` unless the principal is `owner_id`.
pub fn ensure_owner(principal: &Principal, owner_id: &str, resource: &str) -> Result<(), ServiceError> {
    if principal.user_id == owner_id {
        return Ok(());
    }
    tracing::warn!("User {} denied access to {}", principal.user_id, resource);
    Err(ServiceError::Forbidden(format!("You do not have access to {resource}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str) -> Principal {
        Principal {
            user_id: id.to_string(),
            email: format!("{id}@example.com"),
            username: id.to_string(),
        }
    }

    #[test]
    fn owner_passes_and_others_are_forbidden() {
        assert!(ensure_owner(&principal("u1"), "u1", "binder b1").is_ok());
        assert!(matches!(
            ensure_owner(&principal("u2"), "u1", "binder b1"),
            Err(ServiceError::Forbidden(_))
        ));
    }
}
