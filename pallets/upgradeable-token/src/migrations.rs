//! Storage migrations for pallet-upgradeable-token.
//!
//! Each migration is versioned, checks the on-chain storage version before doing anything and
//! bumps it when done, so it is safe to leave wired into the runtime across upgrades.
//!
//! # Wiring Migrations in Runtime
//!
//! Add migrations to the `Executive` type, one entry per ledger instance:
//!
//! ```ignore
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     (
//!         pallet_upgradeable_token::migrations::v1::MigrateToV1<Runtime>,
//!         pallet_upgradeable_token::migrations::v1::MigrateToV1<Runtime, Instance1>,
//!     ),
//! >;
//! ```
//!
//! # Guidelines
//!
//! - **Never skip versions**: migrate sequentially (v1 → v2 → v3)
//! - **Idempotent migrations**: check the version before migrating to handle re-runs
//! - **Accurate weights**: return the weight of the reads and writes actually performed
//! - **Logging**: use `log::info!` with [`crate::LOG_TARGET`] to track progress

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::marker::PhantomData;

use crate::{BearerCount, Config, Pallet, RoleBearers};

/// Migration to version 1: role bearer counter repair.
///
/// Rebuilds `BearerCount` from `RoleBearers` on any ledger whose stored version is below 1,
/// so the "last bearer cannot leave" check compares against the actual bearer set. Ledgers
/// built from genesis already start at v1 and are left untouched.
pub mod v1 {
    use super::*;

    /// Rebuilds `BearerCount` from `RoleBearers` and sets the storage version to 1.
    pub struct MigrateToV1<T, I = ()>(PhantomData<(T, I)>);

    impl<T: Config<I>, I: 'static> OnRuntimeUpgrade for MigrateToV1<T, I> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T, I>::on_chain_storage_version();

            if on_chain_version < 1 {
                let cleared = BearerCount::<T, I>::clear(u32::MAX, None);

                let mut bearers: u64 = 0;
                for (role, _) in RoleBearers::<T, I>::iter_keys() {
                    BearerCount::<T, I>::mutate(role, |count| *count = count.saturating_add(1));
                    bearers += 1;
                }

                StorageVersion::new(1).put::<Pallet<T, I>>();

                log::info!(
                    target: crate::LOG_TARGET,
                    "Migrated to v1: recounted {} role bearers",
                    bearers
                );

                // version read + bearer reads, counter clears + counter updates + version write
                T::DbWeight::get().reads_writes(
                    1 + 2 * bearers,
                    u64::from(cleared.unique) + bearers + 1,
                )
            } else {
                log::info!(
                    target: crate::LOG_TARGET,
                    "Storage already at v{on_chain_version:?}, skipping v1 migration"
                );

                T::DbWeight::get().reads(1)
            }
        }

        #[cfg(feature = "try-runtime")]
        fn pre_upgrade() -> Result<sp_std::vec::Vec<u8>, sp_runtime::TryRuntimeError> {
            let on_chain_version = Pallet::<T, I>::on_chain_storage_version();
            let bearers = RoleBearers::<T, I>::iter_keys().count() as u32;
            log::info!(
                target: crate::LOG_TARGET,
                "Pre-upgrade: storage version {:?}, {} role bearers",
                on_chain_version,
                bearers
            );

            Ok(bearers.encode())
        }

        #[cfg(feature = "try-runtime")]
        fn post_upgrade(state: sp_std::vec::Vec<u8>) -> Result<(), sp_runtime::TryRuntimeError> {
            let pre_bearers: u32 = Decode::decode(&mut &state[..])
                .map_err(|_| sp_runtime::TryRuntimeError::Other("Failed to decode pre-state"))?;

            frame_support::ensure!(
                Pallet::<T, I>::on_chain_storage_version() >= 1,
                sp_runtime::TryRuntimeError::Other("Migration to v1 did not complete")
            );

            let counted: u32 = BearerCount::<T, I>::iter_values().sum();
            frame_support::ensure!(
                counted == pre_bearers,
                sp_runtime::TryRuntimeError::Other("Bearer counters do not match bearer set")
            );

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mock::{new_test_ext, Test, ALICE, BOB},
        Role,
    };
    use frame_support::traits::StorageVersion;

    #[test]
    fn migration_v1_recounts_bearers() {
        new_test_ext().execute_with(|| {
            // A pre-v1 ledger: bearers without a counter
            StorageVersion::new(0).put::<Pallet<Test>>();
            RoleBearers::<Test>::insert(Role::Pauser, BOB, ());
            BearerCount::<Test>::remove(Role::Pauser);

            let _weight = v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 1);
            // ALICE from genesis plus BOB
            assert_eq!(BearerCount::<Test>::get(Role::Pauser), 2);
            assert!(Pallet::<Test>::do_try_state().is_ok());
        });
    }

    #[test]
    fn migration_v1_corrects_stale_counter() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(0).put::<Pallet<Test>>();
            BearerCount::<Test>::insert(Role::Pauser, 7);
            assert!(Pallet::<Test>::do_try_state().is_err());

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(BearerCount::<Test>::get(Role::Pauser), 1);
            assert!(RoleBearers::<Test>::contains_key(Role::Pauser, ALICE));
            assert!(Pallet::<Test>::do_try_state().is_ok());
        });
    }

    #[test]
    fn migration_v1_idempotent() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(1).put::<Pallet<Test>>();
            BearerCount::<Test>::insert(Role::Pauser, 7);

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            // Already at v1: counters are left alone
            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 1);
            assert_eq!(BearerCount::<Test>::get(Role::Pauser), 7);
        });
    }

    #[test]
    fn migration_v1_skipped_on_higher_version() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(5).put::<Pallet<Test>>();

            v1::MigrateToV1::<Test>::on_runtime_upgrade();

            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 5);
        });
    }

    #[test]
    fn migration_v1_runs_once() {
        new_test_ext().execute_with(|| {
            StorageVersion::new(0).put::<Pallet<Test>>();

            v1::MigrateToV1::<Test>::on_runtime_upgrade();
            assert_eq!(Pallet::<Test>::on_chain_storage_version(), 1);

            // A later bogus counter survives a second run
            BearerCount::<Test>::insert(Role::Pauser, 3);
            v1::MigrateToV1::<Test>::on_runtime_upgrade();
            assert_eq!(BearerCount::<Test>::get(Role::Pauser), 3);
        });
    }
}
