use chrono::{DateTime, Utc};

use crate::domain::{account_id::AccountId, credential::Credential, email::Email};

/// A registered identity with an optional credential and a moderation status.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    name: String,
    email: Email,
    credential: Option<Credential>,
    is_blocked: bool,
    last_seen_at: Option<DateTime<Utc>>,
}

/// Registration data handed to the store; the store assigns the id.
#[derive(Debug)]
pub struct NewAccount {
    pub name: String,
    pub email: Email,
    pub credential: Option<Credential>,
}

impl Account {
    pub fn new(
        id: AccountId,
        name: String,
        email: Email,
        credential: Option<Credential>,
        is_blocked: bool,
        last_seen_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            credential,
            is_blocked,
            last_seen_at,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_blocked(&self) -> bool {
        self.is_blocked
    }

    pub fn last_seen_at(&self) -> Option<DateTime<Utc>> {
        self.last_seen_at
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.is_blocked = blocked;
    }

    /// Record a successful authentication. Monotonic per account: a touch
    /// never moves the timestamp backwards.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        if self.last_seen_at.is_none_or(|prev| at > prev) {
            self.last_seen_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use secrecy::Secret;

    fn account() -> Account {
        let email = Email::try_from(Secret::from("ann@example.com".to_string())).unwrap();
        Account::new(AccountId::new(1), "Ann".to_string(), email, None, false, None)
    }

    #[test]
    fn touch_never_moves_backwards() {
        let mut account = account();
        let now = Utc::now();

        account.touch(now);
        assert_eq!(account.last_seen_at(), Some(now));

        account.touch(now - Duration::seconds(10));
        assert_eq!(account.last_seen_at(), Some(now));

        let later = now + Duration::seconds(10);
        account.touch(later);
        assert_eq!(account.last_seen_at(), Some(later));
    }
}
