use num_traits::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    msg,
    program_error::{PrintProgramError, ProgramError},
};
use thiserror::Error;

/// Custom error types for the vault program
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Vault account already holds program state
    #[error("Vault already initialized")]
    AlreadyInitialized,

    /// A required co-signer did not sign the transaction
    #[error("Missing required signature")]
    MissingSignature,

    /// Signer is not the vault's recorded authority
    #[error("Unauthorized")]
    Unauthorized,

    /// Balance too low for the requested transfer
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Zero-lamport deposits and withdrawals are rejected
    #[error("Invalid amount")]
    InvalidAmount,

    /// Balance arithmetic would exceed u64::MAX
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Balance arithmetic would drop below zero
    #[error("Arithmetic underflow")]
    ArithmeticUnderflow,

    /// Vault account is not owned by this program or lacks the discriminator
    #[error("Vault not initialized")]
    VaultNotInitialized,

    /// Vault account does not match the derived program address
    #[error("Invalid vault address")]
    InvalidVaultAddress,

    /// Instruction data failed to deserialize
    #[error("Invalid instruction data")]
    InvalidInstructionData,
}

impl From<VaultError> for ProgramError {
    fn from(e: VaultError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for VaultError {
    fn type_of() -> &'static str {
        "VaultError"
    }
}

impl FromPrimitive for VaultError {
    fn from_i64(n: i64) -> Option<Self> {
        if n < 0 {
            return None;
        }
        Self::from_u64(n as u64)
    }

    fn from_u64(n: u64) -> Option<Self> {
        match n {
            0 => Some(VaultError::AlreadyInitialized),
            1 => Some(VaultError::MissingSignature),
            2 => Some(VaultError::Unauthorized),
            3 => Some(VaultError::InsufficientFunds),
            4 => Some(VaultError::InvalidAmount),
            5 => Some(VaultError::ArithmeticOverflow),
            6 => Some(VaultError::ArithmeticUnderflow),
            7 => Some(VaultError::VaultNotInitialized),
            8 => Some(VaultError::InvalidVaultAddress),
            9 => Some(VaultError::InvalidInstructionData),
            _ => None,
        }
    }
}

impl PrintProgramError for VaultError {
    fn print<E>(&self) {
        match self {
            VaultError::AlreadyInitialized => msg!("Error: Vault already initialized"),
            VaultError::MissingSignature => msg!("Error: Missing required signature"),
            VaultError::Unauthorized => msg!("Error: Signer is not the vault authority"),
            VaultError::InsufficientFunds => msg!("Error: Insufficient funds for transfer"),
            VaultError::InvalidAmount => msg!("Error: Amount must be greater than zero"),
            VaultError::ArithmeticOverflow => msg!("Error: Arithmetic overflow occurred"),
            VaultError::ArithmeticUnderflow => msg!("Error: Arithmetic underflow occurred"),
            VaultError::VaultNotInitialized => msg!("Error: Vault account not initialized"),
            VaultError::InvalidVaultAddress => msg!("Error: Vault address does not match derivation"),
            VaultError::InvalidInstructionData => msg!("Error: Invalid instruction data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_to_program_error() {
        let err: ProgramError = VaultError::Unauthorized.into();
        assert_eq!(err, ProgramError::Custom(VaultError::Unauthorized as u32));
    }

    #[test]
    fn test_error_code_round_trip() {
        for code in 0..10u64 {
            let err = VaultError::from_u64(code).unwrap();
            assert_eq!(err as u64, code);
        }
        assert!(VaultError::from_u64(10).is_none());
        assert!(VaultError::from_i64(-1).is_none());
    }
}
