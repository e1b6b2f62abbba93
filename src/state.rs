use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::error::VaultError;

/// Vault account (PDA)
/// Holds the withdrawal authority; the pooled lamport balance lives in the
/// account's native balance, not in this schema.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Vault {
    /// Fixed tag identifying this account as a vault
    pub discriminator: [u8; 8],
    /// The only key permitted to authorize withdrawals
    pub authority: Pubkey,
}

impl Vault {
    /// Account type tag written at initialization
    pub const DISCRIMINATOR: [u8; 8] = *b"vault\0\0\0";

    /// Size of Vault when serialized
    pub const SIZE: usize = 8 + 32; // 40 bytes

    /// Create a new Vault bound to the given authority
    pub fn new(authority: Pubkey) -> Self {
        Self {
            discriminator: Self::DISCRIMINATOR,
            authority,
        }
    }

    /// Whether the buffer carries this program's vault discriminator
    pub fn is_initialized(data: &[u8]) -> bool {
        data.len() >= 8 && data[..8] == Self::DISCRIMINATOR
    }

    /// Deserialize a vault from account data, checking size and discriminator
    pub fn unpack(data: &[u8]) -> Result<Self, ProgramError> {
        if data.len() != Self::SIZE {
            return Err(VaultError::VaultNotInitialized.into());
        }
        let vault = Vault::try_from_slice(data)
            .map_err(|_| ProgramError::from(VaultError::VaultNotInitialized))?;
        if vault.discriminator != Self::DISCRIMINATOR {
            return Err(VaultError::VaultNotInitialized.into());
        }
        Ok(vault)
    }

    /// Serialize the vault into an account data buffer
    pub fn pack(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        let serialized = self
            .try_to_vec()
            .map_err(|_| ProgramError::InvalidAccountData)?;
        if dst.len() < serialized.len() {
            return Err(ProgramError::AccountDataTooSmall);
        }
        dst[..serialized.len()].copy_from_slice(&serialized);
        Ok(())
    }
}
