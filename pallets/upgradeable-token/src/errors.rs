//! Coarse classification of pallet errors.

use crate::{Config, Error};

/// The class of failure a rejected call falls into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// Caller lacks the required role or ownership.
    AccessDenied,
    /// Null account, or the ledger's own account where it is not allowed.
    InvalidAddress,
    /// Zero where a positive value is required.
    InvalidAmount,
    Overflow,
    Underflow,
    /// Call not valid in the current pause, role or upgrade state.
    InvalidState,
    AlreadyExists,
    NotFound,
    /// A peer ledger or contract lacks a required capability or its call failed.
    ExternalCallFailure,
    /// Entry point that always fails.
    Unsupported,
}

impl<T: Config<I>, I: 'static> Error<T, I> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner |
            Self::NotUpgradeMaster |
            Self::MissingRole |
            Self::NotRoleManager |
            Self::NotPreviousLedger |
            Self::NotContractOwner => ErrorKind::AccessDenied,
            Self::NullAddress | Self::SelfReference => ErrorKind::InvalidAddress,
            Self::ZeroAmount => ErrorKind::InvalidAmount,
            Self::Overflow => ErrorKind::Overflow,
            Self::InsufficientBalance | Self::InsufficientAllowance => ErrorKind::Underflow,
            Self::AlreadyBearer => ErrorKind::AlreadyExists,
            Self::NotBearer => ErrorKind::NotFound,
            Self::NotUpgradeAgent |
            Self::UnsupportedLedger |
            Self::ForeignTransferFailed |
            Self::NotOwnableContract |
            Self::ForeignOwnershipTransferFailed => ErrorKind::ExternalCallFailure,
            Self::PushTransfersUnsupported => ErrorKind::Unsupported,
            Self::Paused |
            Self::NotPaused |
            Self::NoAllowance |
            Self::LastBearer |
            Self::UpgradeAlreadyStarted |
            Self::UpgradeNotAllowed |
            Self::UpgradeFinished |
            Self::PreviousLedgerNotSet |
            Self::NoNativeToRecover |
            Self::NoTokensToRecover => ErrorKind::InvalidState,
            Self::__Ignore(_, _) => unreachable!("`__Ignore` can never be constructed"),
        }
    }
}
