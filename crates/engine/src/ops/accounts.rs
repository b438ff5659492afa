use sea_orm::{ConnectionTrait, EntityTrait};
use uuid::Uuid;

use crate::{AccountInfo, EngineError, EntryRole, Outcome, accounts};

use super::Engine;

impl Engine {
    /// Resolve one movement endpoint.
    ///
    /// The lookup happens fresh on every request: categories can change
    /// between requests and a cached category would silently corrupt the
    /// sign calculation. Missing and inactive accounts are equivalent here,
    /// an inactive account is not a valid endpoint.
    pub(crate) async fn resolve_endpoint<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: Uuid,
        role: EntryRole,
    ) -> Outcome<AccountInfo> {
        let model = accounts::Entity::find_by_id(account_id.to_string())
            .one(conn)
            .await?
            .ok_or_else(|| endpoint_not_found(role, account_id))?;

        let info = AccountInfo::try_from(model)?;
        if !info.active {
            return Err(endpoint_not_found(role, account_id));
        }
        Ok(info)
    }
}

fn endpoint_not_found(role: EntryRole, account_id: Uuid) -> EngineError {
    EngineError::NotFound(format!("{} account {account_id}", role.as_str()))
}
