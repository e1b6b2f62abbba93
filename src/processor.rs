use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction, system_program,
    sysvar::Sysvar,
};

use crate::{
    error::VaultError,
    instruction::{unpack, VaultInstruction},
    state::Vault,
    utils::{
        available_lamports, derive_vault_pda, verify_account_owner, verify_signer,
        verify_uninitialized_account, verify_vault_pda, verify_writable, VAULT_SEED,
    },
};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = unpack(instruction_data)?;

    match instruction {
        VaultInstruction::InitializeVault => process_initialize_vault(program_id, accounts),
        VaultInstruction::Deposit { amount } => process_deposit(program_id, accounts, amount),
        VaultInstruction::Withdraw { amount } => process_withdraw(program_id, accounts, amount),
    }
}

/// Process InitializeVault instruction
/// Allocates the vault PDA, funds it to the rent-exempt minimum, and binds the
/// signing authority as the withdrawal key.
pub fn process_initialize_vault(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    if accounts.len() < 3 {
        msg!("InitializeVault: Insufficient accounts provided");
        return Err(ProgramError::NotEnoughAccountKeys);
    }

    // Expected accounts:
    // 0. [signer, writable] Authority (pays the allocation)
    // 1. [writable] Vault account (PDA)
    // 2. [] System program
    let authority_info = next_account_info(account_info_iter)?;
    let vault_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;

    // The authority pays for the allocation and is bound as withdrawal key,
    // so it must co-sign
    verify_signer(authority_info).map_err(|e| {
        msg!("InitializeVault: Authority must sign");
        e
    })?;
    verify_writable(authority_info)?;
    verify_writable(vault_info)?;

    if system_program_info.key != &system_program::id() {
        msg!("InitializeVault: Invalid System program");
        return Err(ProgramError::IncorrectProgramId);
    }

    // The vault address is fixed by derivation from the authority
    let (_, vault_bump) = derive_vault_pda(program_id, authority_info.key);
    verify_vault_pda(program_id, vault_info.key, authority_info.key, vault_bump).map_err(|e| {
        msg!("InitializeVault: Vault PDA mismatch for {}", vault_info.key);
        e
    })?;

    // Re-initialization is a terminal failure, never an overwrite
    verify_uninitialized_account(vault_info).map_err(|e| {
        msg!("InitializeVault: Vault account already initialized");
        e
    })?;

    let rent = Rent::get()?;
    let vault_lamports = rent.minimum_balance(Vault::SIZE);

    if authority_info.lamports() < vault_lamports {
        msg!(
            "InitializeVault: Insufficient lamports for rent exemption. Required: {}, Available: {}",
            vault_lamports,
            authority_info.lamports()
        );
        return Err(VaultError::InsufficientFunds.into());
    }

    let create_vault_ix = system_instruction::create_account(
        authority_info.key,
        vault_info.key,
        vault_lamports,
        Vault::SIZE as u64,
        program_id,
    );

    let vault_seeds = &[VAULT_SEED, authority_info.key.as_ref(), &[vault_bump]];

    invoke_signed(
        &create_vault_ix,
        &[
            authority_info.clone(),
            vault_info.clone(),
            system_program_info.clone(),
        ],
        &[vault_seeds],
    )
    .map_err(|e| {
        msg!("InitializeVault: Failed to create vault account: {}", e);
        e
    })?;

    let vault = Vault::new(*authority_info.key);
    let mut vault_data = vault_info.try_borrow_mut_data()?;
    vault.pack(&mut vault_data)?;

    msg!(
        "Vault initialized. Authority: {}, Vault: {}, Floor: {} lamports",
        authority_info.key,
        vault_info.key,
        vault_lamports
    );

    Ok(())
}

/// Process Deposit instruction
/// Moves lamports from the payer into the vault via the system program.
pub fn process_deposit(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    if accounts.len() < 3 {
        msg!("Deposit: Insufficient accounts provided");
        return Err(ProgramError::NotEnoughAccountKeys);
    }

    // Expected accounts:
    // 0. [signer, writable] Payer account being debited
    // 1. [writable] Vault account
    // 2. [] System program
    let from_info = next_account_info(account_info_iter)?;
    let vault_info = next_account_info(account_info_iter)?;
    let system_program_info = next_account_info(account_info_iter)?;

    if amount == 0 {
        msg!("Deposit: Amount must be greater than zero");
        return Err(VaultError::InvalidAmount.into());
    }

    // The payer is debited, so it must co-sign
    verify_signer(from_info).map_err(|e| {
        msg!("Deposit: Payer must sign");
        e
    })?;
    verify_writable(from_info)?;
    verify_writable(vault_info)?;

    if system_program_info.key != &system_program::id() {
        msg!("Deposit: Invalid System program");
        return Err(ProgramError::IncorrectProgramId);
    }

    verify_account_owner(vault_info, program_id).map_err(|e| {
        msg!("Deposit: Vault account not owned by program");
        e
    })?;

    {
        let vault_data = vault_info.try_borrow_data()?;
        if !Vault::is_initialized(&vault_data) {
            msg!("Deposit: Vault account not initialized");
            return Err(VaultError::VaultNotInitialized.into());
        }
    }

    if from_info.lamports() < amount {
        msg!(
            "Deposit: Insufficient payer balance. Required: {}, Available: {}",
            amount,
            from_info.lamports()
        );
        return Err(VaultError::InsufficientFunds.into());
    }

    // Reject rather than wrap if the credit would exceed u64::MAX
    vault_info
        .lamports()
        .checked_add(amount)
        .ok_or(VaultError::ArithmeticOverflow)?;

    let transfer_ix = system_instruction::transfer(from_info.key, vault_info.key, amount);

    invoke(
        &transfer_ix,
        &[
            from_info.clone(),
            vault_info.clone(),
            system_program_info.clone(),
        ],
    )
    .map_err(|e| {
        msg!("Deposit: Lamport transfer failed: {}", e);
        e
    })?;

    msg!(
        "Deposit successful. From: {}, Amount: {}, Vault balance: {}",
        from_info.key,
        amount,
        vault_info.lamports()
    );

    Ok(())
}

/// Process Withdraw instruction
/// Moves lamports from the vault to a recipient. Only the vault's recorded
/// authority may withdraw, and the vault balance never drops below its
/// rent-exempt floor.
pub fn process_withdraw(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    if accounts.len() < 3 {
        msg!("Withdraw: Insufficient accounts provided");
        return Err(ProgramError::NotEnoughAccountKeys);
    }

    // Expected accounts:
    // 0. [signer] Vault authority
    // 1. [writable] Vault account
    // 2. [writable] Recipient account
    let authority_info = next_account_info(account_info_iter)?;
    let vault_info = next_account_info(account_info_iter)?;
    let to_info = next_account_info(account_info_iter)?;

    if amount == 0 {
        msg!("Withdraw: Amount must be greater than zero");
        return Err(VaultError::InvalidAmount.into());
    }

    verify_signer(authority_info).map_err(|e| {
        msg!("Withdraw: Authority must sign");
        e
    })?;
    verify_writable(vault_info)?;
    verify_writable(to_info)?;

    verify_account_owner(vault_info, program_id).map_err(|e| {
        msg!("Withdraw: Vault account not owned by program");
        e
    })?;

    let vault = {
        let vault_data = vault_info.try_borrow_data()?;
        Vault::unpack(&vault_data)?
    };

    // Authority gating is a plain key comparison against the verified signer
    if vault.authority != *authority_info.key {
        msg!(
            "Withdraw: Signer is not the vault authority. Expected: {}, Got: {}",
            vault.authority,
            authority_info.key
        );
        return Err(VaultError::Unauthorized.into());
    }

    let rent = Rent::get()?;
    let available = available_lamports(vault_info, &rent)?;

    if amount > available {
        msg!(
            "Withdraw: Insufficient vault balance above rent floor. Required: {}, Available: {}",
            amount,
            available
        );
        return Err(VaultError::InsufficientFunds.into());
    }

    let new_to_lamports = to_info
        .lamports()
        .checked_add(amount)
        .ok_or(VaultError::ArithmeticOverflow)?;
    let new_vault_lamports = vault_info
        .lamports()
        .checked_sub(amount)
        .ok_or(VaultError::ArithmeticUnderflow)?;

    // The program owns the vault, so the runtime permits the direct debit
    **vault_info.try_borrow_mut_lamports()? = new_vault_lamports;
    **to_info.try_borrow_mut_lamports()? = new_to_lamports;

    msg!(
        "Withdraw successful. To: {}, Amount: {}, Vault balance: {}",
        to_info.key,
        amount,
        new_vault_lamports
    );

    Ok(())
}
