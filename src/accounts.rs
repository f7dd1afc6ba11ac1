//! # Accounts
//!
//! Employee accounts and their profiles. Authentication and permission
//! checks live outside this crate; what is modelled here is the record of who
//! exists, which role they hold, and the work that must follow an account's
//! creation.
//!
//! Side effects of registration are explicit [`PostCreateHook`]s, run in
//! registration order right after the account is inserted. If any hook fails
//! the account is taken out again and the error is returned, so a registered
//! account always has every hook's effect applied.

use crate::error::LedgerError;
use crate::framework::normalize_name;
use crate::validation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u32);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account_{}", self.0)
    }
}

/// Administrators may change every herd record; employees only read them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Administrator,
    #[default]
    Employee,
}

impl Role {
    pub fn can_modify(self) -> bool {
        matches!(self, Role::Administrator)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub account: AccountId,
    pub role: Role,
}

/// Profiles keyed by account.
#[derive(Debug, Default)]
pub struct Profiles {
    rows: BTreeMap<AccountId, Profile>,
}

impl Profiles {
    pub fn get(&self, account: AccountId) -> Option<&Profile> {
        self.rows.get(&account)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inserts `profile` unless the account already has one.
    pub fn get_or_create(&mut self, profile: Profile) -> &Profile {
        self.rows.entry(profile.account).or_insert(profile)
    }

    fn remove(&mut self, account: AccountId) {
        self.rows.remove(&account);
    }
}

/// Work that must follow the creation of an account.
pub trait PostCreateHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn after_create(&self, account: &Account, profiles: &mut Profiles) -> Result<(), LedgerError>;
}

/// Gives every new account a profile carrying its role.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileProvisioner;

impl PostCreateHook for ProfileProvisioner {
    fn name(&self) -> &'static str {
        "ProfileProvisioner"
    }

    fn after_create(&self, account: &Account, profiles: &mut Profiles) -> Result<(), LedgerError> {
        profiles.get_or_create(Profile {
            account: account.id,
            role: account.role,
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct AccountDirectory {
    accounts: BTreeMap<AccountId, Account>,
    profiles: Profiles,
    hooks: Vec<Box<dyn PostCreateHook>>,
    next_id: u32,
}

impl AccountDirectory {
    /// A directory with the [`ProfileProvisioner`] installed.
    pub fn new() -> Self {
        let mut directory = Self::default();
        directory.add_hook(ProfileProvisioner);
        directory
    }

    pub fn add_hook(&mut self, hook: impl PostCreateHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn register(
        &mut self,
        username: &str,
        role: Option<Role>,
    ) -> Result<Account, LedgerError> {
        validation::not_blank("username", username)?;
        let key = normalize_name(username);
        if self
            .accounts
            .values()
            .any(|account| normalize_name(&account.username) == key)
        {
            return Err(LedgerError::conflict(
                "username",
                format!("account `{}` already exists", username.trim()),
            ));
        }

        self.next_id += 1;
        let account = Account {
            id: AccountId(self.next_id),
            username: username.trim().to_string(),
            role: role.unwrap_or_default(),
        };
        self.accounts.insert(account.id, account.clone());

        for hook in &self.hooks {
            debug!(hook = hook.name(), account = %account.id, "Running post-create hook");
            if let Err(e) = hook.after_create(&account, &mut self.profiles) {
                warn!(hook = hook.name(), account = %account.id, error = %e, "Post-create hook failed");
                self.accounts.remove(&account.id);
                self.profiles.remove(account.id);
                return Err(e);
            }
        }

        info!(account = %account.id, username = %account.username, role = ?account.role, "Account registered");
        Ok(account)
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn profile(&self, id: AccountId) -> Option<&Profile> {
        self.profiles.get(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
