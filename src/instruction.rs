use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::error::VaultError;

/// Instructions supported by the vault program
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub enum VaultInstruction {
    /// Initialize a new vault bound to the signing authority
    ///
    /// Accounts expected:
    /// 0. [signer, writable] Authority (pays the allocation)
    /// 1. [writable] Vault account (PDA)
    /// 2. [] System program
    InitializeVault,

    /// Deposit lamports into the vault
    ///
    /// Accounts expected:
    /// 0. [signer, writable] Payer account being debited
    /// 1. [writable] Vault account
    /// 2. [] System program
    Deposit { amount: u64 },

    /// Withdraw lamports from the vault, authority-gated
    ///
    /// Accounts expected:
    /// 0. [signer] Vault authority
    /// 1. [writable] Vault account
    /// 2. [writable] Recipient account
    Withdraw { amount: u64 },
}

impl VaultInstruction {
    /// Create an InitializeVault instruction
    pub fn initialize_vault(
        program_id: &Pubkey,
        authority: &Pubkey,
        vault: &Pubkey,
    ) -> Instruction {
        let accounts = vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ];

        Instruction {
            program_id: *program_id,
            accounts,
            data: VaultInstruction::InitializeVault.try_to_vec().unwrap(),
        }
    }

    /// Create a Deposit instruction
    pub fn deposit(
        program_id: &Pubkey,
        from: &Pubkey,
        vault: &Pubkey,
        amount: u64,
    ) -> Instruction {
        let accounts = vec![
            AccountMeta::new(*from, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ];

        Instruction {
            program_id: *program_id,
            accounts,
            data: VaultInstruction::Deposit { amount }.try_to_vec().unwrap(),
        }
    }

    /// Create a Withdraw instruction
    pub fn withdraw(
        program_id: &Pubkey,
        authority: &Pubkey,
        vault: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Instruction {
        let accounts = vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new(*to, false),
        ];

        Instruction {
            program_id: *program_id,
            accounts,
            data: VaultInstruction::Withdraw { amount }.try_to_vec().unwrap(),
        }
    }
}

/// Parse instruction data into VaultInstruction
pub fn unpack(input: &[u8]) -> Result<VaultInstruction, ProgramError> {
    if input.is_empty() {
        return Err(VaultError::InvalidInstructionData.into());
    }

    VaultInstruction::try_from_slice(input)
        .map_err(|_| VaultError::InvalidInstructionData.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_serialization() {
        let deposit = VaultInstruction::Deposit { amount: 1000 };
        let serialized = deposit.try_to_vec().unwrap();
        let deserialized = VaultInstruction::try_from_slice(&serialized).unwrap();
        assert_eq!(deposit, deserialized);
    }

    #[test]
    fn test_unpack_valid_instruction() {
        let instruction = VaultInstruction::InitializeVault;
        let data = instruction.try_to_vec().unwrap();
        let unpacked = unpack(&data).unwrap();
        assert_eq!(instruction, unpacked);
    }

    #[test]
    fn test_unpack_empty_data() {
        let result = unpack(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unpack_garbage_data() {
        let result = unpack(&[0xff, 0xff, 0xff]);
        assert!(result.is_err());
    }

    #[test]
    fn test_opcode_is_enum_tag() {
        // Callers identify instructions by the leading Borsh enum tag
        let init = VaultInstruction::InitializeVault.try_to_vec().unwrap();
        let deposit = VaultInstruction::Deposit { amount: 1 }.try_to_vec().unwrap();
        let withdraw = VaultInstruction::Withdraw { amount: 1 }.try_to_vec().unwrap();
        assert_eq!(init[0], 0);
        assert_eq!(deposit[0], 1);
        assert_eq!(withdraw[0], 2);
    }
}
