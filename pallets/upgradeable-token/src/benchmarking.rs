//! Benchmarking setup for pallet-upgradeable-token
//!
//! `set_upgrade_agent`, `upgrade`, `recover_token` and `reclaim_contract` call into peer
//! ledgers the runtime supplies, so they are weighed in `weights.rs` without a benchmark here.

use super::*;

#[allow(unused)]
use crate::Pallet as UpgradeableToken;
use frame_benchmarking::v2::*;
use frame_support::traits::fungible::{Inspect, Mutate};
use frame_system::RawOrigin;
use sp_runtime::traits::{Saturating, Zero};

const SEED: u32 = 0;

#[instance_benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, SEED);
        Balances::<T, I>::insert(&caller, 10_000_000);
        TotalSupply::<T, I>::put(10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), 1_000_000);

        assert_eq!(Balances::<T, I>::get(&recipient), 1_000_000);
    }

    #[benchmark]
    fn approve() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 1_000_000);

        assert_eq!(Allowances::<T, I>::get(&caller, &spender), 1_000_000);
    }

    #[benchmark]
    fn transfer_from() {
        let owner: T::AccountId = account("owner", 0, SEED);
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, SEED);
        Balances::<T, I>::insert(&owner, 10_000_000);
        TotalSupply::<T, I>::put(10_000_000);
        Allowances::<T, I>::insert(&owner, &caller, 2_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), owner.clone(), recipient.clone(), 1_000_000);

        assert_eq!(Balances::<T, I>::get(&recipient), 1_000_000);
        assert_eq!(Allowances::<T, I>::get(&owner, &caller), 1_000_000);
    }

    #[benchmark]
    fn increase_allowance() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);
        Allowances::<T, I>::insert(&caller, &spender, 1_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 1_000);

        assert_eq!(Allowances::<T, I>::get(&caller, &spender), 2_000);
    }

    #[benchmark]
    fn decrease_allowance() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);
        Allowances::<T, I>::insert(&caller, &spender, 1_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 400);

        assert_eq!(Allowances::<T, I>::get(&caller, &spender), 600);
    }

    #[benchmark]
    fn mint() {
        let recipient: T::AccountId = account("recipient", 0, SEED);
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, recipient.clone(), 1_000_000);

        assert_eq!(Balances::<T, I>::get(&recipient), 1_000_000);
    }

    #[benchmark]
    fn burn() {
        let holder: T::AccountId = account("holder", 0, SEED);
        Balances::<T, I>::insert(&holder, 1_000_000);
        TotalSupply::<T, I>::mutate(|supply| *supply = supply.saturating_add(1_000_000));
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, holder.clone(), 1_000_000);

        assert_eq!(Balances::<T, I>::get(&holder), 0);
    }

    #[benchmark]
    fn burn_from() {
        let holder: T::AccountId = account("holder", 0, SEED);
        let spender: T::AccountId = account("spender", 0, SEED);
        Balances::<T, I>::insert(&holder, 1_000_000);
        TotalSupply::<T, I>::mutate(|supply| *supply = supply.saturating_add(1_000_000));
        Allowances::<T, I>::insert(&holder, &spender, 2_000_000);
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, spender.clone(), holder.clone(), 1_000_000);

        assert_eq!(Balances::<T, I>::get(&holder), 0);
        assert_eq!(Allowances::<T, I>::get(&holder, &spender), 1_000_000);
    }

    #[benchmark]
    fn add_role() {
        let caller: T::AccountId = whitelisted_caller();
        let account: T::AccountId = account("pauser", 0, SEED);
        RoleManager::<T, I>::remove(Role::Pauser);
        UpgradeableToken::<T, I>::insert_bearer(Role::Pauser, &caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), Role::Pauser, account.clone());

        assert!(RoleBearers::<T, I>::contains_key(Role::Pauser, &account));
    }

    #[benchmark]
    fn remove_role() {
        let caller: T::AccountId = whitelisted_caller();
        let account: T::AccountId = account("pauser", 0, SEED);
        RoleManager::<T, I>::remove(Role::Pauser);
        UpgradeableToken::<T, I>::insert_bearer(Role::Pauser, &caller);
        UpgradeableToken::<T, I>::insert_bearer(Role::Pauser, &account);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), Role::Pauser, account.clone());

        assert!(!RoleBearers::<T, I>::contains_key(Role::Pauser, &account));
    }

    #[benchmark]
    fn set_role_manager() {
        let manager: T::AccountId = account("manager", 0, SEED);
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, Role::Pauser, Some(manager.clone()));

        assert_eq!(RoleManager::<T, I>::get(Role::Pauser), Some(manager));
    }

    #[benchmark]
    fn pause() {
        let caller: T::AccountId = whitelisted_caller();
        UpgradeableToken::<T, I>::insert_bearer(Role::Pauser, &caller);
        IsPaused::<T, I>::put(false);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(IsPaused::<T, I>::get());
    }

    #[benchmark]
    fn unpause() {
        let caller: T::AccountId = whitelisted_caller();
        UpgradeableToken::<T, I>::insert_bearer(Role::Pauser, &caller);
        IsPaused::<T, I>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(!IsPaused::<T, I>::get());
    }

    #[benchmark]
    fn transfer_ownership() {
        let caller: T::AccountId = whitelisted_caller();
        let new_owner: T::AccountId = account("owner", 0, SEED);
        Owner::<T, I>::put(&caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), new_owner.clone());

        assert_eq!(Owner::<T, I>::get(), Some(new_owner));
    }

    #[benchmark]
    fn set_upgrade_master() {
        let caller: T::AccountId = whitelisted_caller();
        let master: T::AccountId = account("master", 0, SEED);
        UpgradeMaster::<T, I>::put(&caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), master.clone());

        assert_eq!(UpgradeMaster::<T, I>::get(), Some(master));
    }

    #[benchmark]
    fn upgrade_from() {
        let predecessor: T::AccountId = whitelisted_caller();
        let holder: T::AccountId = account("holder", 0, SEED);
        PreviousLedger::<T, I>::put(&predecessor);
        UpgradeAgent::<T, I>::kill();

        #[extrinsic_call]
        _(RawOrigin::Signed(predecessor), holder.clone(), 1_000_000);

        assert_eq!(Balances::<T, I>::get(&holder), 1_000_000);
    }

    #[benchmark]
    fn recover_native() {
        let caller: T::AccountId = whitelisted_caller();
        Owner::<T, I>::put(&caller);
        let ledger = UpgradeableToken::<T, I>::ledger_account();
        let amount = T::NativeCurrency::minimum_balance().saturating_mul(100u32.into());
        T::NativeCurrency::set_balance(&ledger, amount);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(T::NativeCurrency::balance(&ledger).is_zero());
    }

    #[benchmark]
    fn on_foreign_token_received() {
        let caller: T::AccountId = whitelisted_caller();
        let from: T::AccountId = account("from", 0, SEED);

        #[block]
        {
            let _ = UpgradeableToken::<T, I>::on_foreign_token_received(
                RawOrigin::Signed(caller).into(),
                from,
                1_000,
            );
        }
    }

    impl_benchmark_test_suite!(UpgradeableToken, crate::mock::new_test_ext(), crate::mock::Test);
}
