//! Interfaces to other ledgers and contracts.
//!
//! The runtime decides which accounts denote peers and how calls reach them. Every method
//! takes the peer's account first. Queries against an unknown account answer `None` or
//! `false`; calls against it fail.

use frame_support::dispatch::DispatchResult;
use sp_runtime::DispatchError;

/// A ledger able to receive value migrated from its predecessor.
pub trait SuccessorLedger<AccountId> {
    /// Capability probe. `None` if `agent` cannot receive migrations.
    fn original_supply(agent: &AccountId) -> Option<u128>;

    /// Credit `holder` with `amount` on `agent`, called as `predecessor`.
    fn upgrade_from(
        agent: &AccountId,
        predecessor: &AccountId,
        holder: &AccountId,
        amount: u128,
    ) -> DispatchResult;
}

/// A ledger whose balances can be queried and moved by their holder.
pub trait ForeignLedger<AccountId> {
    /// `None` if `ledger` does not support balance queries.
    fn balance_of(ledger: &AccountId, who: &AccountId) -> Option<u128>;

    fn transfer(ledger: &AccountId, from: &AccountId, to: &AccountId, amount: u128)
        -> DispatchResult;
}

/// A contract with a single transferable owner.
pub trait ForeignOwnable<AccountId> {
    /// Whether `contract` supports ownership transfer at all.
    fn is_ownable(contract: &AccountId) -> bool;

    fn owner_of(contract: &AccountId) -> Option<AccountId>;

    /// Hand ownership of `contract` to `new_owner`, called as `caller`.
    fn transfer_ownership(
        contract: &AccountId,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> DispatchResult;
}

impl<AccountId> SuccessorLedger<AccountId> for () {
    fn original_supply(_: &AccountId) -> Option<u128> {
        None
    }

    fn upgrade_from(_: &AccountId, _: &AccountId, _: &AccountId, _: u128) -> DispatchResult {
        Err(DispatchError::Other("no successor ledgers configured"))
    }
}

impl<AccountId> ForeignLedger<AccountId> for () {
    fn balance_of(_: &AccountId, _: &AccountId) -> Option<u128> {
        None
    }

    fn transfer(_: &AccountId, _: &AccountId, _: &AccountId, _: u128) -> DispatchResult {
        Err(DispatchError::Other("no foreign ledgers configured"))
    }
}

impl<AccountId> ForeignOwnable<AccountId> for () {
    fn is_ownable(_: &AccountId) -> bool {
        false
    }

    fn owner_of(_: &AccountId) -> Option<AccountId> {
        None
    }

    fn transfer_ownership(_: &AccountId, _: &AccountId, _: &AccountId) -> DispatchResult {
        Err(DispatchError::Other("no foreign contracts configured"))
    }
}
