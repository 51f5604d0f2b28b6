//! Owner-only recovery of assets stranded on the ledger account.

use frame_support::{
    dispatch::DispatchResult,
    ensure,
    traits::{
        fungible::{Inspect, Mutate},
        tokens::{Fortitude, Preservation},
    },
};
use sp_runtime::{traits::Zero, SaturatedConversion};

use crate::{Config, Error, Event, ForeignLedger, ForeignOwnable, Pallet};

impl<T: Config<I>, I: 'static> Pallet<T, I> {
    /// Whether the ledger account currently owns `contract`.
    pub fn is_owner_remote(contract: &T::AccountId) -> bool {
        T::ForeignContracts::owner_of(contract) == Some(Self::ledger_account())
    }

    pub(crate) fn do_recover_native(caller: &T::AccountId) -> DispatchResult {
        Self::ensure_owner(caller)?;

        let ledger = Self::ledger_account();
        let amount =
            T::NativeCurrency::reducible_balance(&ledger, Preservation::Expendable, Fortitude::Polite);
        ensure!(!amount.is_zero(), Error::<T, I>::NoNativeToRecover);

        T::NativeCurrency::transfer(&ledger, caller, amount, Preservation::Expendable)?;

        let amount = amount.saturated_into::<u128>();
        log::info!(target: crate::LOG_TARGET, "Recovered {} native units to {:?}", amount, caller);
        Self::deposit_event(Event::NativeRecovered { to: caller.clone(), amount });
        Ok(())
    }

    pub(crate) fn do_recover_token(caller: &T::AccountId, foreign: &T::AccountId) -> DispatchResult {
        Self::ensure_owner(caller)?;

        let ledger = Self::ledger_account();
        let amount =
            T::ForeignLedgers::balance_of(foreign, &ledger).ok_or(Error::<T, I>::UnsupportedLedger)?;
        ensure!(amount != 0, Error::<T, I>::NoTokensToRecover);

        T::ForeignLedgers::transfer(foreign, &ledger, caller, amount).map_err(|e| {
            log::warn!(
                target: crate::LOG_TARGET,
                "Transfer of {} on ledger {:?} failed: {:?}",
                amount,
                foreign,
                e
            );
            Error::<T, I>::ForeignTransferFailed
        })?;

        log::info!(target: crate::LOG_TARGET, "Recovered {} from ledger {:?}", amount, foreign);
        Self::deposit_event(Event::TokenRecovered {
            ledger: foreign.clone(),
            to: caller.clone(),
            amount,
        });
        Ok(())
    }

    pub(crate) fn do_reclaim_contract(
        caller: &T::AccountId,
        contract: &T::AccountId,
    ) -> DispatchResult {
        Self::ensure_owner(caller)?;
        ensure!(T::ForeignContracts::is_ownable(contract), Error::<T, I>::NotOwnableContract);
        ensure!(Self::is_owner_remote(contract), Error::<T, I>::NotContractOwner);

        T::ForeignContracts::transfer_ownership(contract, &Self::ledger_account(), caller).map_err(
            |e| {
                log::warn!(
                    target: crate::LOG_TARGET,
                    "Ownership transfer of {:?} failed: {:?}",
                    contract,
                    e
                );
                Error::<T, I>::ForeignOwnershipTransferFailed
            },
        )?;

        log::info!(target: crate::LOG_TARGET, "Reclaimed contract {:?}", contract);
        Self::deposit_event(Event::ContractReclaimed { contract: contract.clone(), to: caller.clone() });
        Ok(())
    }
}
