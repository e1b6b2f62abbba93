use solana_program::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_program,
};

use crate::error::VaultError;

/// Seed for vault PDA derivation
pub const VAULT_SEED: &[u8] = b"vault";

/// Derive the vault PDA for a given authority
pub fn derive_vault_pda(program_id: &Pubkey, authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, authority.as_ref()], program_id)
}

/// Verify a vault address against its derivation
pub fn verify_vault_pda(
    program_id: &Pubkey,
    vault: &Pubkey,
    authority: &Pubkey,
    bump: u8,
) -> Result<(), ProgramError> {
    let seeds = &[VAULT_SEED, authority.as_ref(), &[bump]];

    let expected = Pubkey::create_program_address(seeds, program_id)
        .map_err(|_| VaultError::InvalidVaultAddress)?;

    if expected != *vault {
        return Err(VaultError::InvalidVaultAddress.into());
    }

    Ok(())
}

/// Verify that an account signed the transaction
pub fn verify_signer(account: &AccountInfo) -> Result<(), ProgramError> {
    if !account.is_signer {
        return Err(VaultError::MissingSignature.into());
    }
    Ok(())
}

/// Verify that an account is writable
pub fn verify_writable(account: &AccountInfo) -> Result<(), ProgramError> {
    if !account.is_writable {
        msg!("Account {} must be writable", account.key);
        return Err(ProgramError::InvalidAccountData);
    }
    Ok(())
}

/// Verify that an account is owned by the expected program
pub fn verify_account_owner(
    account: &AccountInfo,
    expected_owner: &Pubkey,
) -> Result<(), ProgramError> {
    if account.owner != expected_owner {
        return Err(VaultError::VaultNotInitialized.into());
    }
    Ok(())
}

/// Verify that an account has never been allocated (system-owned, zero data)
pub fn verify_uninitialized_account(account: &AccountInfo) -> Result<(), ProgramError> {
    if account.owner != &system_program::id() || account.data_len() != 0 {
        return Err(VaultError::AlreadyInitialized.into());
    }
    Ok(())
}

/// Lamports the vault may release without dropping below its rent-exempt floor
pub fn available_lamports(vault: &AccountInfo, rent: &Rent) -> Result<u64, ProgramError> {
    let floor = rent.minimum_balance(vault.data_len());
    vault
        .lamports()
        .checked_sub(floor)
        .ok_or_else(|| VaultError::ArithmeticUnderflow.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_program::clock::Epoch;

    fn create_test_account_info<'a>(
        key: &'a Pubkey,
        is_signer: bool,
        is_writable: bool,
        lamports: &'a mut u64,
        data: &'a mut [u8],
        owner: &'a Pubkey,
    ) -> AccountInfo<'a> {
        AccountInfo {
            key,
            is_signer,
            is_writable,
            lamports: std::rc::Rc::new(std::cell::RefCell::new(lamports)),
            data: std::rc::Rc::new(std::cell::RefCell::new(data)),
            owner,
            executable: false,
            rent_epoch: Epoch::default(),
        }
    }

    #[test]
    fn test_vault_pda_derivation() {
        let program_id = crate::id();
        let authority = Pubkey::new_unique();

        let (pda, bump) = derive_vault_pda(&program_id, &authority);

        // The PDA must be recreatable from the same inputs
        assert!(verify_vault_pda(&program_id, &pda, &authority, bump).is_ok());
    }

    #[test]
    fn test_invalid_vault_pda_verification() {
        let program_id = crate::id();
        let authority = Pubkey::new_unique();
        let wrong_pda = Pubkey::new_unique();

        let (_, bump) = derive_vault_pda(&program_id, &authority);
        assert!(verify_vault_pda(&program_id, &wrong_pda, &authority, bump).is_err());
    }

    #[test]
    fn test_verify_signer() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = [];
        let owner = system_program::id();

        let signed = create_test_account_info(&key, true, false, &mut lamports, &mut data, &owner);
        assert!(verify_signer(&signed).is_ok());

        let mut lamports = 0;
        let mut data = [];
        let unsigned =
            create_test_account_info(&key, false, false, &mut lamports, &mut data, &owner);
        assert_eq!(
            verify_signer(&unsigned),
            Err(VaultError::MissingSignature.into())
        );
    }

    #[test]
    fn test_verify_writable() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = [];
        let owner = system_program::id();

        let account = create_test_account_info(&key, false, true, &mut lamports, &mut data, &owner);
        assert!(verify_writable(&account).is_ok());

        let mut lamports = 0;
        let mut data = [];
        let readonly =
            create_test_account_info(&key, false, false, &mut lamports, &mut data, &owner);
        assert!(verify_writable(&readonly).is_err());
    }

    #[test]
    fn test_verify_account_owner() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data = [];
        let owner = system_program::id();

        let account =
            create_test_account_info(&key, false, false, &mut lamports, &mut data, &owner);
        assert!(verify_account_owner(&account, &system_program::id()).is_ok());
        assert!(verify_account_owner(&account, &Pubkey::new_unique()).is_err());
    }

    #[test]
    fn test_verify_uninitialized_account() {
        let key = Pubkey::new_unique();
        let system = system_program::id();
        let other = Pubkey::new_unique();

        let mut lamports = 0;
        let mut data = [];
        let fresh = create_test_account_info(&key, false, false, &mut lamports, &mut data, &system);
        assert!(verify_uninitialized_account(&fresh).is_ok());

        let mut lamports = 0;
        let mut data = [0u8; 1];
        let allocated =
            create_test_account_info(&key, false, false, &mut lamports, &mut data, &system);
        assert_eq!(
            verify_uninitialized_account(&allocated),
            Err(VaultError::AlreadyInitialized.into())
        );

        let mut lamports = 0;
        let mut data = [];
        let owned = create_test_account_info(&key, false, false, &mut lamports, &mut data, &other);
        assert!(verify_uninitialized_account(&owned).is_err());
    }

    #[test]
    fn test_available_lamports() {
        let key = Pubkey::new_unique();
        let owner = crate::id();
        let rent = Rent::default();
        let floor = rent.minimum_balance(crate::state::Vault::SIZE);

        let mut lamports = floor + 500;
        let mut data = [0u8; crate::state::Vault::SIZE];
        let vault =
            create_test_account_info(&key, false, true, &mut lamports, &mut data, &owner);
        assert_eq!(available_lamports(&vault, &rent).unwrap(), 500);

        // Below the floor the subtraction must fail, not wrap
        let mut lamports = floor - 1;
        let mut data = [0u8; crate::state::Vault::SIZE];
        let vault =
            create_test_account_info(&key, false, true, &mut lamports, &mut data, &owner);
        assert_eq!(
            available_lamports(&vault, &rent),
            Err(VaultError::ArithmeticUnderflow.into())
        );
    }
}
