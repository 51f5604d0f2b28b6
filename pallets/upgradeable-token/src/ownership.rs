//! Single-owner access control.

use frame_support::{dispatch::DispatchResult, ensure};

use crate::{Config, Error, Event, Owner, Pallet};

impl<T: Config<I>, I: 'static> Pallet<T, I> {
    pub fn is_owner(who: &T::AccountId) -> bool {
        Owner::<T, I>::get().as_ref() == Some(who)
    }

    pub(crate) fn ensure_owner(who: &T::AccountId) -> DispatchResult {
        ensure!(Self::is_owner(who), Error::<T, I>::NotOwner);
        Ok(())
    }

    pub(crate) fn do_transfer_ownership(
        caller: &T::AccountId,
        new_owner: T::AccountId,
    ) -> DispatchResult {
        Self::ensure_owner(caller)?;
        Self::ensure_not_null_or_self(&new_owner)?;

        let previous_owner = Owner::<T, I>::get();
        Owner::<T, I>::put(&new_owner);

        log::info!(target: crate::LOG_TARGET, "Ownership transferred to {:?}", new_owner);
        Self::deposit_event(Event::OwnershipTransferred { previous_owner, new_owner });
        Ok(())
    }
}
