//! Balance, allowance and supply bookkeeping.
//!
//! These are the primitives every call builds on. They validate before they write, and the
//! surrounding dispatchable's storage layer undoes any partial write if a later step fails.

use frame_support::{dispatch::DispatchResult, ensure};

use crate::{
    Allowances, Balances, Config, Error, Event, IsPaused, Pallet, TotalSupply, UpgradeState,
};

impl<T: Config<I>, I: 'static> Pallet<T, I> {
    pub(crate) fn ensure_unpaused() -> DispatchResult {
        ensure!(!IsPaused::<T, I>::get(), Error::<T, I>::Paused);
        Ok(())
    }

    fn set_balance(who: &T::AccountId, amount: u128) {
        if amount == 0 {
            Balances::<T, I>::remove(who);
        } else {
            Balances::<T, I>::insert(who, amount);
        }
    }

    fn set_allowance(owner: &T::AccountId, spender: &T::AccountId, amount: u128) {
        if amount == 0 {
            Allowances::<T, I>::remove(owner, spender);
        } else {
            Allowances::<T, I>::insert(owner, spender, amount);
        }
    }

    /// Move `amount` from `from` to `to`. Zero-value and self transfers are allowed.
    pub(crate) fn do_transfer(from: &T::AccountId, to: &T::AccountId, amount: u128) -> DispatchResult {
        Self::ensure_not_null(from)?;
        Self::ensure_not_null_or_self(to)?;

        let from_balance = Balances::<T, I>::get(from)
            .checked_sub(amount)
            .ok_or(Error::<T, I>::InsufficientBalance)?;

        if from != to {
            let to_balance =
                Balances::<T, I>::get(to).checked_add(amount).ok_or(Error::<T, I>::Overflow)?;
            Self::set_balance(from, from_balance);
            Self::set_balance(to, to_balance);
        }

        Self::deposit_event(Event::Transfer {
            from: Some(from.clone()),
            to: Some(to.clone()),
            value: amount,
        });
        Ok(())
    }

    /// Set the allowance of `spender` over `owner`'s balance to exactly `amount`.
    pub(crate) fn do_approve(
        owner: &T::AccountId,
        spender: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        Self::ensure_not_null(owner)?;
        Self::ensure_not_null(spender)?;

        Self::set_allowance(owner, spender, amount);
        Self::deposit_event(Event::Approval {
            owner: owner.clone(),
            spender: spender.clone(),
            value: amount,
        });
        Ok(())
    }

    pub(crate) fn do_transfer_from(
        spender: &T::AccountId,
        from: &T::AccountId,
        to: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        let remaining = Allowances::<T, I>::get(from, spender)
            .checked_sub(amount)
            .ok_or(Error::<T, I>::InsufficientAllowance)?;

        Self::do_transfer(from, to, amount)?;
        Self::do_approve(from, spender, remaining)
    }

    pub(crate) fn do_increase_allowance(
        owner: &T::AccountId,
        spender: &T::AccountId,
        delta: u128,
    ) -> DispatchResult {
        ensure!(delta != 0, Error::<T, I>::ZeroAmount);
        Self::ensure_not_null(spender)?;

        let allowance = Allowances::<T, I>::get(owner, spender)
            .checked_add(delta)
            .ok_or(Error::<T, I>::Overflow)?;
        Self::do_approve(owner, spender, allowance)
    }

    /// Lower an existing allowance by `delta`, clamping at zero.
    pub(crate) fn do_decrease_allowance(
        owner: &T::AccountId,
        spender: &T::AccountId,
        delta: u128,
    ) -> DispatchResult {
        let current = Allowances::<T, I>::get(owner, spender);
        ensure!(current != 0, Error::<T, I>::NoAllowance);
        ensure!(delta != 0, Error::<T, I>::ZeroAmount);

        Self::do_approve(owner, spender, current.saturating_sub(delta))
    }

    /// Privileged issuance. Refused once every unit has migrated out.
    pub(crate) fn do_mint(to: &T::AccountId, amount: u128) -> DispatchResult {
        Self::ensure_not_null_or_self(to)?;
        ensure!(amount != 0, Error::<T, I>::ZeroAmount);
        ensure!(
            Self::upgrade_state() != UpgradeState::UpgradeFinished,
            Error::<T, I>::UpgradeFinished
        );

        Self::issue(to, amount)
    }

    /// Credit value migrated in from the previous ledger. Allowed in every upgrade state: a
    /// ledger that has itself finished migrating to its own successor still has to accept
    /// what its predecessor sends, and returns to `Upgrading` when it does.
    pub(crate) fn do_mint_migrated(to: &T::AccountId, amount: u128) -> DispatchResult {
        Self::ensure_not_null_or_self(to)?;
        ensure!(amount != 0, Error::<T, I>::ZeroAmount);

        Self::issue(to, amount)
    }

    fn issue(to: &T::AccountId, amount: u128) -> DispatchResult {
        let supply = TotalSupply::<T, I>::get().checked_add(amount).ok_or(Error::<T, I>::Overflow)?;
        let balance = Balances::<T, I>::get(to).checked_add(amount).ok_or(Error::<T, I>::Overflow)?;

        TotalSupply::<T, I>::put(supply);
        Self::set_balance(to, balance);

        Self::deposit_event(Event::Transfer { from: None, to: Some(to.clone()), value: amount });
        Ok(())
    }

    pub(crate) fn do_burn(from: &T::AccountId, amount: u128) -> DispatchResult {
        Self::ensure_not_null_or_self(from)?;

        let balance = Balances::<T, I>::get(from)
            .checked_sub(amount)
            .ok_or(Error::<T, I>::InsufficientBalance)?;
        let supply = TotalSupply::<T, I>::get()
            .checked_sub(amount)
            .ok_or(Error::<T, I>::InsufficientBalance)?;

        TotalSupply::<T, I>::put(supply);
        Self::set_balance(from, balance);

        Self::deposit_event(Event::Transfer { from: Some(from.clone()), to: None, value: amount });
        Ok(())
    }

    /// Burn from `from` against `spender`'s allowance. The emitted `Approval` carries the
    /// allowance left after the burn, not the amount spent.
    pub(crate) fn do_burn_from(
        spender: &T::AccountId,
        from: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        Self::do_burn(from, amount)?;

        let remaining = Allowances::<T, I>::get(from, spender)
            .checked_sub(amount)
            .ok_or(Error::<T, I>::InsufficientAllowance)?;
        Self::do_approve(from, spender, remaining)
    }
}
