//! One-way migration of value to a successor ledger.
//!
//! The upgrade master picks a successor (the upgrade agent). Holders then call `upgrade`,
//! which burns their balance here and has the agent mint the same amount to them. The agent
//! only trusts the predecessor it was pinned to at genesis.
//!
//! The state is never stored. It is derived from the agent, the amount migrated so far and
//! the remaining supply, and only ever moves forward:
//!
//! ```text
//! WaitingForAgent -> ReadyToUpgrade -> Upgrading -> UpgradeFinished
//! ```
//!
//! The one exception is a ledger in the middle of a chain: value arriving from its
//! predecessor after it finished migrating to its own successor takes it from
//! `UpgradeFinished` back to `Upgrading`.

use codec::{Decode, Encode};
use frame_support::{dispatch::DispatchResult, ensure};
use scale_info::TypeInfo;

use crate::{
    Config, Error, Event, Pallet, PreviousLedger, SuccessorLedger, TotalSupply, TotalUpgraded,
    UpgradeAgent, UpgradeMaster,
};

/// Migration progress of a ledger, in the order states are reached.
#[derive(Encode, Decode, TypeInfo, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum UpgradeState {
    /// No upgrade agent set.
    WaitingForAgent,
    /// Agent set, nothing migrated yet. The agent may still be replaced.
    ReadyToUpgrade,
    /// Some value migrated, some supply left.
    Upgrading,
    /// Agent set and the whole supply migrated.
    UpgradeFinished,
}

impl<T: Config<I>, I: 'static> Pallet<T, I> {
    pub fn upgrade_state() -> UpgradeState {
        if UpgradeAgent::<T, I>::get().is_none() {
            UpgradeState::WaitingForAgent
        } else if TotalUpgraded::<T, I>::get() == 0 {
            UpgradeState::ReadyToUpgrade
        } else if TotalSupply::<T, I>::get() == 0 {
            UpgradeState::UpgradeFinished
        } else {
            UpgradeState::Upgrading
        }
    }

    /// All value ever issued by this ledger and not burned outside a migration.
    pub fn original_supply() -> u128 {
        TotalSupply::<T, I>::get().saturating_add(TotalUpgraded::<T, I>::get())
    }

    fn ensure_upgrade_master(who: &T::AccountId) -> DispatchResult {
        ensure!(
            UpgradeMaster::<T, I>::get().as_ref() == Some(who),
            Error::<T, I>::NotUpgradeMaster
        );
        Ok(())
    }

    pub(crate) fn do_set_upgrade_agent(caller: &T::AccountId, agent: T::AccountId) -> DispatchResult {
        Self::ensure_upgrade_master(caller)?;
        Self::ensure_not_null_or_self(&agent)?;
        // Value already in flight must keep flowing to the same successor.
        ensure!(TotalUpgraded::<T, I>::get() == 0, Error::<T, I>::UpgradeAlreadyStarted);
        ensure!(
            T::Successors::original_supply(&agent).is_some(),
            Error::<T, I>::NotUpgradeAgent
        );

        UpgradeAgent::<T, I>::put(&agent);
        log::info!(target: crate::LOG_TARGET, "Upgrade agent set to {:?}", agent);
        Self::deposit_event(Event::UpgradeAgentSet { agent });
        Ok(())
    }

    pub(crate) fn do_set_upgrade_master(
        caller: &T::AccountId,
        master: T::AccountId,
    ) -> DispatchResult {
        Self::ensure_upgrade_master(caller)?;
        Self::ensure_not_null_or_self(&master)?;

        UpgradeMaster::<T, I>::put(&master);
        log::info!(target: crate::LOG_TARGET, "Upgrade master set to {:?}", master);
        Self::deposit_event(Event::UpgradeMasterSet { master });
        Ok(())
    }

    /// Burn `amount` from `holder` here and credit it to `holder` on the upgrade agent.
    ///
    /// All local bookkeeping is finished before the agent is called.
    pub(crate) fn do_upgrade(holder: &T::AccountId, amount: u128) -> DispatchResult {
        ensure!(
            matches!(
                Self::upgrade_state(),
                UpgradeState::ReadyToUpgrade | UpgradeState::Upgrading
            ),
            Error::<T, I>::UpgradeNotAllowed
        );
        ensure!(amount != 0, Error::<T, I>::ZeroAmount);
        ensure!(
            Self::balance_of(holder) >= amount,
            Error::<T, I>::InsufficientBalance
        );
        let agent = UpgradeAgent::<T, I>::get().ok_or(Error::<T, I>::UpgradeNotAllowed)?;

        Self::do_burn(holder, amount)?;
        let upgraded =
            TotalUpgraded::<T, I>::get().checked_add(amount).ok_or(Error::<T, I>::Overflow)?;
        TotalUpgraded::<T, I>::put(upgraded);

        T::Successors::upgrade_from(&agent, &Self::ledger_account(), holder, amount)?;

        log::debug!(
            target: crate::LOG_TARGET,
            "Upgraded {} from {:?} to agent {:?}",
            amount,
            holder,
            agent
        );
        Self::deposit_event(Event::Upgrade { from: holder.clone(), to: agent, value: amount });
        Ok(())
    }

    /// Receive side of a migration: mint `amount` to `holder` on behalf of `caller`, which must
    /// be the previous ledger this one was pinned to.
    pub fn upgrade_from_remote(
        caller: &T::AccountId,
        holder: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        Self::ensure_not_null_or_self(holder)?;
        let previous = PreviousLedger::<T, I>::get().ok_or(Error::<T, I>::PreviousLedgerNotSet)?;
        ensure!(*caller == previous, Error::<T, I>::NotPreviousLedger);

        Self::do_mint_migrated(holder, amount)
    }
}
