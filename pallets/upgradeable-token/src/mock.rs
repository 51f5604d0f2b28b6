use crate as pallet_upgradeable_token;
use crate::{ForeignLedger, ForeignOwnable, SuccessorLedger};
use frame_support::{
    derive_impl,
    dispatch::DispatchResult,
    instances::{Instance1, Instance2},
    parameter_types,
    traits::{ConstU32, ConstU64},
    PalletId,
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage, DispatchError,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime with three ledgers: the legacy ledger under test (default
// instance), its successor, and an unrelated foreign ledger.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Balances: pallet_balances,
        LegacyToken: pallet_upgradeable_token,
        SuccessorToken: pallet_upgradeable_token::<Instance1>,
        ForeignToken: pallet_upgradeable_token::<Instance2>,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = pallet_balances::AccountData<u64>;
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
impl pallet_balances::Config for Test {
    type AccountStore = System;
}

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const CHARLIE: u64 = 3;
pub const DAVE: u64 = 4;
pub const EVE: u64 = 5;
pub const ADMIN: u64 = 100;

/// The null account.
pub const NULL: u64 = 0;

/// Deployed, but neither a ledger nor an ownable contract.
pub const NO_CAPABILITY_CONTRACT: u64 = 900;
/// Reports a balance for anyone but cannot move it, and has no owner.
pub const NO_TRANSFER_CONTRACT: u64 = 901;
pub const NO_TRANSFER_BALANCE: u128 = 10;

pub const LEGACY_SUPPLY: u128 = 1_000;
pub const FOREIGN_SUPPLY: u128 = 100;

parameter_types! {
    pub const AdminAccount: u64 = ADMIN;
    pub const LegacyPalletId: PalletId = PalletId(*b"lgcy/tkn");
    pub const SuccessorPalletId: PalletId = PalletId(*b"succ/tkn");
    pub const ForeignPalletId: PalletId = PalletId(*b"frgn/tkn");
}

pub struct EnsureAdmin;
impl frame_support::traits::EnsureOrigin<RuntimeOrigin> for EnsureAdmin {
    type Success = u64;

    fn try_origin(o: RuntimeOrigin) -> Result<Self::Success, RuntimeOrigin> {
        match o.clone().into() {
            Ok(frame_system::RawOrigin::Signed(account)) if account == AdminAccount::get() => {
                Ok(account)
            }
            _ => Err(o),
        }
    }

    #[cfg(feature = "runtime-benchmarks")]
    fn try_successful_origin() -> Result<RuntimeOrigin, ()> {
        Ok(RuntimeOrigin::signed(AdminAccount::get()))
    }
}

pub fn legacy_account() -> u64 {
    LegacyToken::ledger_account()
}

pub fn successor_account() -> u64 {
    SuccessorToken::ledger_account()
}

pub fn foreign_account() -> u64 {
    ForeignToken::ledger_account()
}

/// Routes peer calls to the ledger instance owning the target account, acting as the caller
/// the pallet hands in.
pub struct Ledgers;

impl SuccessorLedger<u64> for Ledgers {
    fn original_supply(agent: &u64) -> Option<u128> {
        match *agent {
            a if a == legacy_account() => Some(LegacyToken::original_supply()),
            a if a == successor_account() => Some(SuccessorToken::original_supply()),
            a if a == foreign_account() => Some(ForeignToken::original_supply()),
            _ => None,
        }
    }

    fn upgrade_from(agent: &u64, predecessor: &u64, holder: &u64, amount: u128) -> DispatchResult {
        let origin = RuntimeOrigin::signed(*predecessor);
        match *agent {
            a if a == legacy_account() => LegacyToken::upgrade_from(origin, *holder, amount),
            a if a == successor_account() => SuccessorToken::upgrade_from(origin, *holder, amount),
            a if a == foreign_account() => ForeignToken::upgrade_from(origin, *holder, amount),
            _ => Err(DispatchError::Other("not a ledger")),
        }
    }
}

impl ForeignLedger<u64> for Ledgers {
    fn balance_of(ledger: &u64, who: &u64) -> Option<u128> {
        match *ledger {
            l if l == legacy_account() => Some(LegacyToken::balance_of(who)),
            l if l == successor_account() => Some(SuccessorToken::balance_of(who)),
            l if l == foreign_account() => Some(ForeignToken::balance_of(who)),
            NO_TRANSFER_CONTRACT => Some(NO_TRANSFER_BALANCE),
            _ => None,
        }
    }

    fn transfer(ledger: &u64, from: &u64, to: &u64, amount: u128) -> DispatchResult {
        let origin = RuntimeOrigin::signed(*from);
        match *ledger {
            l if l == legacy_account() => LegacyToken::transfer(origin, *to, amount),
            l if l == successor_account() => SuccessorToken::transfer(origin, *to, amount),
            l if l == foreign_account() => ForeignToken::transfer(origin, *to, amount),
            _ => Err(DispatchError::Other("low-level call failed")),
        }
    }
}

impl ForeignOwnable<u64> for Ledgers {
    fn is_ownable(contract: &u64) -> bool {
        [legacy_account(), successor_account(), foreign_account()].contains(contract)
    }

    fn owner_of(contract: &u64) -> Option<u64> {
        match *contract {
            c if c == legacy_account() => LegacyToken::owner(),
            c if c == successor_account() => SuccessorToken::owner(),
            c if c == foreign_account() => ForeignToken::owner(),
            _ => None,
        }
    }

    fn transfer_ownership(contract: &u64, caller: &u64, new_owner: &u64) -> DispatchResult {
        let origin = RuntimeOrigin::signed(*caller);
        match *contract {
            c if c == legacy_account() => LegacyToken::transfer_ownership(origin, *new_owner),
            c if c == successor_account() => SuccessorToken::transfer_ownership(origin, *new_owner),
            c if c == foreign_account() => ForeignToken::transfer_ownership(origin, *new_owner),
            _ => Err(DispatchError::Other("not ownable")),
        }
    }
}

impl pallet_upgradeable_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type AdminOrigin = EnsureAdmin;
    type PalletId = LegacyPalletId;
    type NativeCurrency = Balances;
    type Successors = Ledgers;
    type ForeignLedgers = Ledgers;
    type ForeignContracts = Ledgers;
    type WeightInfo = ();
}

impl pallet_upgradeable_token::Config<Instance1> for Test {
    type RuntimeEvent = RuntimeEvent;
    type AdminOrigin = EnsureAdmin;
    type PalletId = SuccessorPalletId;
    type NativeCurrency = Balances;
    type Successors = Ledgers;
    type ForeignLedgers = Ledgers;
    type ForeignContracts = Ledgers;
    type WeightInfo = ();
}

impl pallet_upgradeable_token::Config<Instance2> for Test {
    type RuntimeEvent = RuntimeEvent;
    type AdminOrigin = EnsureAdmin;
    type PalletId = ForeignPalletId;
    type NativeCurrency = Balances;
    type Successors = Ledgers;
    type ForeignLedgers = Ledgers;
    type ForeignContracts = Ledgers;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
//
// - legacy: deployed by ALICE with LEGACY_SUPPLY, no predecessor
// - successor: deployed by DAVE with nothing minted, pinned to the legacy ledger, pauser
//   role managed by CHARLIE
// - foreign: deployed by EVE with FOREIGN_SUPPLY
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_balances::GenesisConfig::<Test> {
        balances: vec![(ALICE, 1_000), (BOB, 1_000), (CHARLIE, 1_000)],
        dev_accounts: None,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_upgradeable_token::GenesisConfig::<Test> {
        deployer: Some(ALICE),
        token_name: b"Legacy Token".to_vec(),
        token_symbol: b"LGC".to_vec(),
        decimals: 18,
        initial_supply: LEGACY_SUPPLY,
        previous_ledger: None,
        pauser_manager: None,
        _phantom: Default::default(),
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_upgradeable_token::GenesisConfig::<Test, Instance1> {
        deployer: Some(DAVE),
        token_name: b"Successor Token".to_vec(),
        token_symbol: b"SCC".to_vec(),
        decimals: 18,
        initial_supply: 0,
        previous_ledger: Some(legacy_account()),
        pauser_manager: Some(CHARLIE),
        _phantom: Default::default(),
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_upgradeable_token::GenesisConfig::<Test, Instance2> {
        deployer: Some(EVE),
        token_name: b"Foreign Token".to_vec(),
        token_symbol: b"FRN".to_vec(),
        decimals: 6,
        initial_supply: FOREIGN_SUPPLY,
        previous_ledger: None,
        pauser_manager: None,
        _phantom: Default::default(),
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
