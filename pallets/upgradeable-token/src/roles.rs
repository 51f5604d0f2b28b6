//! Role registry.
//!
//! A single bearer-set implementation shared by every [`Role`]. A role is either unmanaged,
//! where any bearer may add or remove bearers (including itself), or managed, where only the
//! role's manager may. Either way a role that has bearers can never lose its last one.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::DispatchError};
use scale_info::TypeInfo;

use crate::{BearerCount, Config, Error, Event, Pallet, RoleBearers, RoleManager};

/// Named capability held by a set of bearer accounts.
#[derive(
    Encode, Decode, DecodeWithMemTracking, MaxEncodedLen, TypeInfo, Clone, Copy, PartialEq, Eq, Debug,
)]
pub enum Role {
    /// May pause and unpause the ledger.
    Pauser,
}

impl<T: Config<I>, I: 'static> Pallet<T, I> {
    /// Whether `account` bears `role`. The null account cannot be queried.
    pub fn is_role(role: Role, account: &T::AccountId) -> Result<bool, DispatchError> {
        Self::ensure_not_null(account)?;
        Ok(RoleBearers::<T, I>::contains_key(role, account))
    }

    pub(crate) fn has_role(role: Role, account: &T::AccountId) -> bool {
        RoleBearers::<T, I>::contains_key(role, account)
    }

    pub(crate) fn ensure_role(role: Role, account: &T::AccountId) -> DispatchResult {
        ensure!(Self::has_role(role, account), Error::<T, I>::MissingRole);
        Ok(())
    }

    /// Managed roles answer to their manager only, unmanaged roles to their bearers.
    fn ensure_role_authority(role: Role, caller: &T::AccountId) -> DispatchResult {
        match RoleManager::<T, I>::get(role) {
            Some(manager) => ensure!(*caller == manager, Error::<T, I>::NotRoleManager),
            None => Self::ensure_role(role, caller)?,
        }
        Ok(())
    }

    pub(crate) fn insert_bearer(role: Role, account: &T::AccountId) {
        if !RoleBearers::<T, I>::contains_key(role, account) {
            RoleBearers::<T, I>::insert(role, account, ());
            BearerCount::<T, I>::mutate(role, |count| *count = count.saturating_add(1));
        }
    }

    pub(crate) fn do_add_role(
        caller: &T::AccountId,
        role: Role,
        account: &T::AccountId,
    ) -> DispatchResult {
        Self::ensure_role_authority(role, caller)?;
        Self::ensure_not_null_or_self(account)?;
        ensure!(!Self::has_role(role, account), Error::<T, I>::AlreadyBearer);

        Self::insert_bearer(role, account);
        Self::deposit_event(Event::RoleAdded { role, account: account.clone() });
        Ok(())
    }

    pub(crate) fn do_remove_role(
        caller: &T::AccountId,
        role: Role,
        account: &T::AccountId,
    ) -> DispatchResult {
        Self::ensure_role_authority(role, caller)?;
        Self::ensure_not_null(account)?;
        // The ledger account can never bear a role, so it is reported as a non-bearer.
        ensure!(Self::has_role(role, account), Error::<T, I>::NotBearer);

        let count = BearerCount::<T, I>::get(role);
        ensure!(count > 1, Error::<T, I>::LastBearer);

        RoleBearers::<T, I>::remove(role, account);
        BearerCount::<T, I>::insert(role, count - 1);
        Self::deposit_event(Event::RoleRemoved { role, account: account.clone() });
        Ok(())
    }

    pub(crate) fn do_set_role_manager(role: Role, manager: Option<T::AccountId>) -> DispatchResult {
        match manager {
            Some(ref manager) => {
                Self::ensure_not_null_or_self(manager)?;
                RoleManager::<T, I>::insert(role, manager);
            },
            None => RoleManager::<T, I>::remove(role),
        }

        log::info!(target: crate::LOG_TARGET, "Manager of role {:?} set to {:?}", role, manager);
        Self::deposit_event(Event::RoleManagerSet { role, manager });
        Ok(())
    }
}
