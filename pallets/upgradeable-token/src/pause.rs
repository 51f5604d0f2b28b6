//! Emergency pause switch.
//!
//! While paused, `transfer`, `approve`, `transfer_from`, `increase_allowance` and
//! `decrease_allowance` are rejected. Minting, burning and both sides of a migration are not
//! affected, so holders can always exit to the successor ledger.

use frame_support::{dispatch::DispatchResult, ensure};

use crate::{Config, Error, Event, IsPaused, Pallet, Role};

impl<T: Config<I>, I: 'static> Pallet<T, I> {
    pub(crate) fn do_pause(caller: &T::AccountId) -> DispatchResult {
        Self::ensure_role(Role::Pauser, caller)?;
        ensure!(!IsPaused::<T, I>::get(), Error::<T, I>::Paused);

        IsPaused::<T, I>::put(true);
        log::info!(target: crate::LOG_TARGET, "Ledger paused by {:?}", caller);
        Self::deposit_event(Event::Paused { account: caller.clone() });
        Ok(())
    }

    pub(crate) fn do_unpause(caller: &T::AccountId) -> DispatchResult {
        Self::ensure_role(Role::Pauser, caller)?;
        ensure!(IsPaused::<T, I>::get(), Error::<T, I>::NotPaused);

        IsPaused::<T, I>::put(false);
        log::info!(target: crate::LOG_TARGET, "Ledger unpaused by {:?}", caller);
        Self::deposit_event(Event::Unpaused { account: caller.clone() });
        Ok(())
    }
}
