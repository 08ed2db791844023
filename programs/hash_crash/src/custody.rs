use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::HashCrashError;

/// Moves the wagered asset in and out of the house vault.
pub trait ValueCustody {
    /// Pulls exactly `amount` from `from` into the vault.
    fn receive(&mut self, from: &Pubkey, amount: u64) -> Result<()>;
    /// Pays `amount` from the vault to `to`.
    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Lamport custody backed by the house vault PDA.
///
/// Incoming value goes through a system program transfer signed by the payer.
/// Outgoing value is debited directly from the program-owned vault, so every
/// recipient must be among `accounts` and writable.
pub struct LamportCustody<'info> {
    vault: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    accounts: Vec<AccountInfo<'info>>,
}

impl<'info> LamportCustody<'info> {
    pub fn new(
        vault: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        accounts: Vec<AccountInfo<'info>>,
    ) -> Self {
        Self {
            vault,
            system_program,
            accounts,
        }
    }

    fn account(&self, key: &Pubkey) -> Option<&AccountInfo<'info>> {
        self.accounts.iter().find(|account| account.key == key)
    }
}

impl ValueCustody for LamportCustody<'_> {
    fn receive(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let payer = self
            .account(from)
            .ok_or(HashCrashError::TransferFailed)?
            .clone();
        require!(payer.is_signer, HashCrashError::TransferFailed);

        let before = self.vault.lamports();
        let transfer_ix = system_program::Transfer {
            from: payer,
            to: self.vault.clone(),
        };
        let cpi_ctx = CpiContext::new(self.system_program.clone(), transfer_ix);
        system_program::transfer(cpi_ctx, amount)?;

        let received = self
            .vault
            .lamports()
            .checked_sub(before)
            .ok_or(HashCrashError::InvalidReceive)?;
        require!(received == amount, HashCrashError::InvalidReceive);
        Ok(())
    }

    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let recipient = self.account(to).ok_or(HashCrashError::TransferFailed)?;
        require!(recipient.is_writable, HashCrashError::TransferFailed);

        let vault_balance = self
            .vault
            .lamports()
            .checked_sub(amount)
            .ok_or(HashCrashError::TransferFailed)?;
        let recipient_balance = recipient
            .lamports()
            .checked_add(amount)
            .ok_or(HashCrashError::Overflow)?;

        **self.vault.try_borrow_mut_lamports()? = vault_balance;
        **recipient.try_borrow_mut_lamports()? = recipient_balance;
        Ok(())
    }
}
