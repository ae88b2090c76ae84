use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use roster_core::{AccountId, AccountStore, AccountStoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Block,
    Unblock,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOutcome {
    /// The mutation landed on this account.
    Applied,
    /// The account was absent from the store; skipped without error.
    Missing,
}

#[derive(Debug, Serialize)]
pub struct TargetReport {
    pub id: AccountId,
    pub outcome: TargetOutcome,
}

/// Result of one moderation batch.
#[derive(Debug, Serialize)]
pub struct ModerationReport {
    pub targets: Vec<TargetReport>,
    /// True when the actor blocked or deleted their own account; the caller
    /// must clear the actor's session immediately instead of leaving it for
    /// the access guard to catch on a later request.
    pub session_revoked: bool,
}

/// Error types for the moderation use case.
#[derive(Debug, thiserror::Error)]
pub enum ModerateError {
    #[error("Account store error: {0}")]
    Store(#[from] AccountStoreError),
}

/// Moderation use case - bulk block/unblock/delete over account ids.
///
/// Each action is a single atomic store mutation; a storage failure fails
/// the whole batch rather than leaving a silently half-applied one.
pub struct ModerateUseCase<'a, S>
where
    S: AccountStore,
{
    store: &'a S,
}

impl<'a, S> ModerateUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "ModerateUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        actor: AccountId,
        action: ModerationAction,
        targets: &[AccountId],
    ) -> Result<ModerationReport, ModerateError> {
        if targets.is_empty() {
            return Ok(ModerationReport {
                targets: Vec::new(),
                session_revoked: false,
            });
        }

        let applied: HashSet<AccountId> = match action {
            ModerationAction::Block => self.store.update_blocked(targets, true).await?,
            ModerationAction::Unblock => self.store.update_blocked(targets, false).await?,
            ModerationAction::Delete => self.store.delete_by_ids(targets).await?,
        }
        .into_iter()
        .collect();

        let targets_report = targets
            .iter()
            .map(|&id| TargetReport {
                id,
                outcome: if applied.contains(&id) {
                    TargetOutcome::Applied
                } else {
                    TargetOutcome::Missing
                },
            })
            .collect();

        // Unblocking cannot un-authorize the actor, so only destructive
        // actions revoke the actor's own session.
        let session_revoked = matches!(
            action,
            ModerationAction::Block | ModerationAction::Delete
        ) && targets.contains(&actor);

        Ok(ModerationReport {
            targets: targets_report,
            session_revoked,
        })
    }
}
