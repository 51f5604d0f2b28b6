//! # Upgradeable Token Pallet
//!
//! A fungible token ledger with administrative safety controls:
//!
//! - role-gated privileged operations ([`Role`]), with per-role bearer sets that can never be
//!   fully vacated and an optional manager account;
//! - an emergency pause switch that blocks holder-facing ledger mutations;
//! - single-account ownership, used by the recovery calls;
//! - a one-way migration protocol that burns balances here while minting the same value in a
//!   designated successor ledger ([`UpgradeState`]);
//! - recovery of native currency, foreign-ledger balances and foreign contract ownership that
//!   ended up on the ledger's own account.
//!
//! The pallet is instantiable: every ledger (a predecessor, its successor, any foreign ledger)
//! is one instance, identified by the sovereign account derived from its `PalletId`. Calls
//! between ledgers go through the [`SuccessorLedger`], [`ForeignLedger`] and [`ForeignOwnable`]
//! routers supplied by the runtime.
//!
//! Every dispatchable runs inside a storage layer: a failing call leaves no balance, allowance,
//! role or upgrade change behind, including changes made by nested calls into other ledgers.

#![cfg_attr(not(feature = "std"), no_std)]
// Storage getters are kept for the public query surface.
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use frame_support::{
    dispatch::DispatchResult,
    ensure,
    pallet_prelude::*,
    traits::{fungible, EnsureOrigin},
    PalletId,
};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::AccountIdConversion;
use sp_std::prelude::*;

pub use errors::ErrorKind;
pub use pallet::*;
pub use peers::{ForeignLedger, ForeignOwnable, SuccessorLedger};
pub use roles::Role;
pub use upgrade::UpgradeState;
pub use weights::WeightInfo;

mod errors;
mod ledger;
mod ownership;
mod pause;
mod peers;
mod recovery;
mod roles;
mod upgrade;

pub mod migrations;
pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// Log target used by every message this pallet emits.
pub const LOG_TARGET: &str = "runtime::upgradeable-token";

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config<I: 'static = ()>: frame_system::Config {
        type RuntimeEvent: From<Event<Self, I>>
            + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Origin allowed to mint, burn and manage role managers.
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        /// Identifier the ledger's own account is derived from.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Native currency that may get stranded on the ledger account.
        type NativeCurrency: fungible::Mutate<Self::AccountId>;

        /// Routes migrations to successor ledgers.
        type Successors: SuccessorLedger<Self::AccountId>;

        /// Routes balance queries and transfers on other ledgers.
        type ForeignLedgers: ForeignLedger<Self::AccountId>;

        /// Routes ownership queries and transfers on other contracts.
        type ForeignContracts: ForeignOwnable<Self::AccountId>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T, I = ()>(PhantomData<(T, I)>);

    /// Token name
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T: Config<I>, I: 'static = ()> =
        StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T: Config<I>, I: 'static = ()> =
        StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    /// Token decimals (e.g., 6 for USDC-style, 18 for ETH-style)
    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T: Config<I>, I: 'static = ()> = StorageValue<_, u8, ValueQuery>;

    /// Total token supply
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T: Config<I>, I: 'static = ()> = StorageValue<_, u128, ValueQuery>;

    /// Account balances. Zero balances are not stored.
    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config<I>, I: 'static = ()> =
        StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Spending allowances, keyed by (owner, spender).
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config<I>, I: 'static = ()> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        u128,
        ValueQuery,
    >;

    /// Whether holder-facing ledger mutations are currently blocked.
    #[pallet::storage]
    #[pallet::getter(fn paused)]
    pub type IsPaused<T: Config<I>, I: 'static = ()> = StorageValue<_, bool, ValueQuery>;

    /// Account allowed to run the recovery calls.
    #[pallet::storage]
    #[pallet::getter(fn owner)]
    pub type Owner<T: Config<I>, I: 'static = ()> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Bearers of each role.
    #[pallet::storage]
    pub type RoleBearers<T: Config<I>, I: 'static = ()> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        Role,
        Blake2_128Concat,
        T::AccountId,
        (),
        OptionQuery,
    >;

    /// Number of bearers of each role.
    #[pallet::storage]
    #[pallet::getter(fn bearer_count)]
    pub type BearerCount<T: Config<I>, I: 'static = ()> =
        StorageMap<_, Blake2_128Concat, Role, u32, ValueQuery>;

    /// Manager of a managed role. Unmanaged roles have no entry.
    #[pallet::storage]
    #[pallet::getter(fn role_manager)]
    pub type RoleManager<T: Config<I>, I: 'static = ()> =
        StorageMap<_, Blake2_128Concat, Role, T::AccountId, OptionQuery>;

    /// Account allowed to pick the upgrade agent.
    #[pallet::storage]
    #[pallet::getter(fn upgrade_master)]
    pub type UpgradeMaster<T: Config<I>, I: 'static = ()> =
        StorageValue<_, T::AccountId, OptionQuery>;

    /// Successor ledger receiving migrated value. Frozen once migration started.
    #[pallet::storage]
    #[pallet::getter(fn upgrade_agent)]
    pub type UpgradeAgent<T: Config<I>, I: 'static = ()> =
        StorageValue<_, T::AccountId, OptionQuery>;

    /// Cumulative value migrated out to the upgrade agent. Never decreases.
    #[pallet::storage]
    #[pallet::getter(fn total_upgraded)]
    pub type TotalUpgraded<T: Config<I>, I: 'static = ()> = StorageValue<_, u128, ValueQuery>;

    /// Predecessor ledger allowed to push migrated value into this one. Set at genesis only.
    #[pallet::storage]
    #[pallet::getter(fn previous_ledger)]
    pub type PreviousLedger<T: Config<I>, I: 'static = ()> =
        StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config<I>, I: 'static = ()> {
        /// Value moved between accounts. `from` is `None` when minting, `to` when burning.
        Transfer { from: Option<T::AccountId>, to: Option<T::AccountId>, value: u128 },
        /// Allowance of `spender` over `owner`'s balance set to `value`.
        Approval { owner: T::AccountId, spender: T::AccountId, value: u128 },
        RoleAdded { role: Role, account: T::AccountId },
        RoleRemoved { role: Role, account: T::AccountId },
        /// Role switched to managed (`Some`) or unmanaged (`None`).
        RoleManagerSet { role: Role, manager: Option<T::AccountId> },
        /// Ledger paused by `account`.
        Paused { account: T::AccountId },
        /// Ledger unpaused by `account`.
        Unpaused { account: T::AccountId },
        OwnershipTransferred { previous_owner: Option<T::AccountId>, new_owner: T::AccountId },
        UpgradeAgentSet { agent: T::AccountId },
        UpgradeMasterSet { master: T::AccountId },
        /// `value` migrated from holder `from` to successor ledger `to`.
        Upgrade { from: T::AccountId, to: T::AccountId, value: u128 },
        /// Native currency stranded on the ledger account sent to the owner.
        NativeRecovered { to: T::AccountId, amount: u128 },
        /// Balance held by the ledger account on a foreign ledger sent to the owner.
        TokenRecovered { ledger: T::AccountId, to: T::AccountId, amount: u128 },
        /// Ownership of a foreign contract handed from the ledger account to the owner.
        ContractReclaimed { contract: T::AccountId, to: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T, I = ()> {
        /// Caller is not the owner.
        NotOwner,
        /// Caller is not the upgrade master.
        NotUpgradeMaster,
        /// Caller does not have the required role.
        MissingRole,
        /// Caller is not the manager of a managed role.
        NotRoleManager,
        /// Migration can only be pushed by the previous ledger.
        NotPreviousLedger,
        /// The ledger account does not own the foreign contract.
        NotContractOwner,
        /// Account is the null account.
        NullAddress,
        /// Account is the ledger's own account.
        SelfReference,
        /// Value must be non-zero.
        ZeroAmount,
        /// Arithmetic overflow.
        Overflow,
        /// Balance too low.
        InsufficientBalance,
        /// Allowance too low.
        InsufficientAllowance,
        /// Ledger is paused.
        Paused,
        /// Ledger is not paused.
        NotPaused,
        /// Current allowance must not be 0.
        NoAllowance,
        /// At least one bearer must remain.
        LastBearer,
        /// Upgrade already started.
        UpgradeAlreadyStarted,
        /// Upgrade state does not allow upgrade.
        UpgradeNotAllowed,
        /// All value has been migrated out; no new value can be issued.
        UpgradeFinished,
        /// Previous ledger was not set.
        PreviousLedgerNotSet,
        /// No native currency to recover.
        NoNativeToRecover,
        /// No tokens to recover on the given ledger.
        NoTokensToRecover,
        /// Account already has the role.
        AlreadyBearer,
        /// Account does not have the role.
        NotBearer,
        /// Agent is not a ledger able to receive migrations.
        NotUpgradeAgent,
        /// Target does not support balance queries.
        UnsupportedLedger,
        /// Foreign ledger transfer failed.
        ForeignTransferFailed,
        /// Target does not support ownership transfer.
        NotOwnableContract,
        /// Foreign ownership transfer failed.
        ForeignOwnershipTransferFailed,
        /// Push-style token notifications are not supported; use `recover_token`.
        PushTransfersUnsupported,
    }

    #[pallet::hooks]
    impl<T: Config<I>, I: 'static> Hooks<BlockNumberFor<T>> for Pallet<T, I> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config<I>, I: 'static> Pallet<T, I> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::ensure_unpaused()?;
            Self::do_transfer(&sender, &to, amount)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(origin: OriginFor<T>, spender: T::AccountId, amount: u128) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::ensure_unpaused()?;
            Self::do_approve(&owner, &spender, amount)
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            from: T::AccountId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::ensure_unpaused()?;
            Self::do_transfer_from(&spender, &from, &to, amount)
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::increase_allowance())]
        pub fn increase_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            delta: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::ensure_unpaused()?;
            Self::do_increase_allowance(&owner, &spender, delta)
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::decrease_allowance())]
        pub fn decrease_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            delta: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::ensure_unpaused()?;
            Self::do_decrease_allowance(&owner, &spender, delta)
        }

        /// Issue new value. Not subject to pause.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_mint(&to, amount)
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(origin: OriginFor<T>, from: T::AccountId, amount: u128) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_burn(&from, amount)
        }

        /// Burn `amount` of `from`'s balance, spending `spender`'s allowance over it.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::burn_from())]
        pub fn burn_from(
            origin: OriginFor<T>,
            spender: T::AccountId,
            from: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_burn_from(&spender, &from, amount)
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::add_role())]
        pub fn add_role(origin: OriginFor<T>, role: Role, account: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_add_role(&caller, role, &account)
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::remove_role())]
        pub fn remove_role(
            origin: OriginFor<T>,
            role: Role,
            account: T::AccountId,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_remove_role(&caller, role, &account)
        }

        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::set_role_manager())]
        pub fn set_role_manager(
            origin: OriginFor<T>,
            role: Role,
            manager: Option<T::AccountId>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_set_role_manager(role, manager)
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::pause())]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_pause(&caller)
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::unpause())]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_unpause(&caller)
        }

        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::transfer_ownership())]
        pub fn transfer_ownership(origin: OriginFor<T>, new_owner: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_transfer_ownership(&caller, new_owner)
        }

        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::set_upgrade_agent())]
        pub fn set_upgrade_agent(origin: OriginFor<T>, agent: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_set_upgrade_agent(&caller, agent)
        }

        #[pallet::call_index(15)]
        #[pallet::weight(T::WeightInfo::set_upgrade_master())]
        pub fn set_upgrade_master(origin: OriginFor<T>, master: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_set_upgrade_master(&caller, master)
        }

        /// Migrate `amount` of the caller's balance to the upgrade agent. Not subject to pause.
        #[pallet::call_index(16)]
        #[pallet::weight(T::WeightInfo::upgrade())]
        pub fn upgrade(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            let holder = ensure_signed(origin)?;
            Self::do_upgrade(&holder, amount)
        }

        /// Receive side of a migration. Only the previous ledger's account may call this.
        #[pallet::call_index(17)]
        #[pallet::weight(T::WeightInfo::upgrade_from())]
        pub fn upgrade_from(origin: OriginFor<T>, holder: T::AccountId, amount: u128) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::upgrade_from_remote(&caller, &holder, amount)
        }

        #[pallet::call_index(18)]
        #[pallet::weight(T::WeightInfo::recover_native())]
        pub fn recover_native(origin: OriginFor<T>) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_recover_native(&caller)
        }

        #[pallet::call_index(19)]
        #[pallet::weight(T::WeightInfo::recover_token())]
        pub fn recover_token(origin: OriginFor<T>, ledger: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_recover_token(&caller, &ledger)
        }

        #[pallet::call_index(20)]
        #[pallet::weight(T::WeightInfo::reclaim_contract())]
        pub fn reclaim_contract(origin: OriginFor<T>, contract: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_reclaim_contract(&caller, &contract)
        }

        /// Always rejected. Value pushed at the ledger account can only be pulled back out
        /// through `recover_token`.
        #[pallet::call_index(21)]
        #[pallet::weight(T::WeightInfo::on_foreign_token_received())]
        pub fn on_foreign_token_received(
            _origin: OriginFor<T>,
            _from: T::AccountId,
            _amount: u128,
        ) -> DispatchResult {
            Err(Error::<T, I>::PushTransfersUnsupported.into())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config<I>, I: 'static = ()> {
        /// Receives the initial supply and becomes owner, upgrade master and first pauser
        pub deployer: Option<T::AccountId>,
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals
        pub decimals: u8,
        /// Value minted to the deployer
        pub initial_supply: u128,
        /// Ledger allowed to migrate value into this one
        pub previous_ledger: Option<T::AccountId>,
        /// Makes the pauser role a managed role
        pub pauser_manager: Option<T::AccountId>,
        #[serde(skip)]
        pub _phantom: PhantomData<I>,
    }

    #[pallet::genesis_build]
    impl<T: Config<I>, I: 'static> BuildGenesisConfig for GenesisConfig<T, I> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T, I>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T, I>::put(symbol);

            Decimals::<T, I>::put(self.decimals);

            let ledger = Pallet::<T, I>::ledger_account();

            if let Some(ref previous) = self.previous_ledger {
                assert!(
                    !Pallet::<T, I>::is_null(previous),
                    "Previous ledger must not be the null account"
                );
                assert!(*previous != ledger, "Previous ledger must not be this ledger");
                PreviousLedger::<T, I>::put(previous);
            }

            if let Some(ref manager) = self.pauser_manager {
                assert!(
                    !Pallet::<T, I>::is_null(manager),
                    "Pauser manager must not be the null account"
                );
                assert!(*manager != ledger, "Pauser manager must not be the ledger account");
                RoleManager::<T, I>::insert(Role::Pauser, manager);
            }

            assert!(
                self.deployer.is_some() || self.initial_supply == 0,
                "Initial supply requires a deployer"
            );

            if let Some(ref deployer) = self.deployer {
                assert!(
                    !Pallet::<T, I>::is_null(deployer),
                    "Deployer must not be the null account"
                );
                assert!(*deployer != ledger, "Deployer must not be the ledger account");
                Owner::<T, I>::put(deployer);
                UpgradeMaster::<T, I>::put(deployer);
                Pallet::<T, I>::insert_bearer(Role::Pauser, deployer);

                if self.initial_supply > 0 {
                    Balances::<T, I>::insert(deployer, self.initial_supply);
                    TotalSupply::<T, I>::put(self.initial_supply);
                }
            }
        }
    }
}

impl<T: Config<I>, I: 'static> Pallet<T, I> {
    /// The ledger's own account. Holds stray assets and identifies this ledger to its peers.
    pub fn ledger_account() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    /// Whether `who` is the all-zero account.
    pub fn is_null(who: &T::AccountId) -> bool {
        who.using_encoded(|bytes| bytes.iter().all(|b| *b == 0))
    }

    pub(crate) fn ensure_not_null(who: &T::AccountId) -> DispatchResult {
        ensure!(!Self::is_null(who), Error::<T, I>::NullAddress);
        Ok(())
    }

    /// Rejects the null account and any account aliasing the ledger itself.
    pub(crate) fn ensure_not_null_or_self(who: &T::AccountId) -> DispatchResult {
        Self::ensure_not_null(who)?;
        ensure!(*who != Self::ledger_account(), Error::<T, I>::SelfReference);
        Ok(())
    }

    /// Check the ledger's storage invariants.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        let sum = Balances::<T, I>::iter_values()
            .try_fold(0u128, |acc, balance| acc.checked_add(balance))
            .ok_or(sp_runtime::TryRuntimeError::Other("sum of balances overflows"))?;
        ensure!(sum == TotalSupply::<T, I>::get(), "sum of balances differs from total supply");

        for (role, count) in BearerCount::<T, I>::iter() {
            let bearers = RoleBearers::<T, I>::iter_prefix(role).count() as u32;
            ensure!(bearers == count, "bearer counter differs from bearer set");
        }

        Ok(())
    }
}
