//! Session/role resolution.
//!
//! A principal is an admin when either:
//! 1. its token carries an application-role claim inside the privileged
//!    set, or
//! 2. the `admin_profiles` table has a row for it whose role is in the set.
//!
//! The claim is checked first and short-circuits the table lookup. A claim
//! *outside* the set does not deny by itself - the table still gets a say,
//! matching how operators grant access in practice (profile rows first,
//! claims added later).

use spotlyt_core::{AdminRole, Principal};
use tracing::instrument;

use crate::backend::{Backend, BackendError};

/// Resolve a principal's admin role.
///
/// Returns `Ok(None)` for a plain denial (not an admin). A failed table
/// lookup is an error: the gate treats it as a denial too, but the message
/// is surfaced to the user and nothing is retried.
#[instrument(skip(backend, principal), fields(principal_id = %principal.id))]
pub async fn resolve_admin(
    backend: &dyn Backend,
    principal: &Principal,
) -> Result<Option<AdminRole>, BackendError> {
    if let Some(role) = principal.role_claim.as_deref().and_then(AdminRole::parse) {
        tracing::debug!(%role, "admitted via app-metadata role claim");
        return Ok(Some(role));
    }

    let profile_role = backend.admin_profile_role(principal.id).await?;
    let role = profile_role.as_deref().and_then(AdminRole::parse);
    match role {
        Some(role) => tracing::debug!(%role, "admitted via admin_profiles row"),
        None => tracing::debug!("principal is not an admin"),
    }
    Ok(role)
}
