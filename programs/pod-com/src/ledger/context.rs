use std::collections::BTreeMap;

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::system_program;

use super::{Ledger, LedgerAccount};
use crate::errors::PodComError;
use crate::events::PodEvent;

/// Per-transaction view of the ledger.
///
/// Reads fall through to the committed ledger; writes stay in the overlay
/// until the ledger commits them after the handler returns `Ok`.
pub struct InvokeContext<'a> {
    base: &'a Ledger,
    signers: &'a [Pubkey],
    /// `None` marks an account closed in this transaction
    writes: BTreeMap<Pubkey, Option<LedgerAccount>>,
    events: Vec<PodEvent>,
}

impl<'a> InvokeContext<'a> {
    pub(crate) fn new(base: &'a Ledger, signers: &'a [Pubkey]) -> Self {
        Self {
            base,
            signers,
            writes: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<Pubkey, Option<LedgerAccount>>, Vec<PodEvent>) {
        (self.writes, self.events)
    }

    // ========================================================================
    // Transaction Environment
    // ========================================================================

    /// Fee payer and primary authority of the transaction
    pub fn signer(&self) -> Result<Pubkey> {
        self.signers
            .first()
            .copied()
            .ok_or_else(|| error!(PodComError::MissingSigner))
    }

    pub fn clock(&self) -> &Clock {
        self.base.clock()
    }

    pub fn now(&self) -> i64 {
        self.base.clock().unix_timestamp
    }

    pub fn rent(&self) -> &Rent {
        self.base.rent()
    }

    // ========================================================================
    // Account Access
    // ========================================================================

    fn get(&self, address: &Pubkey) -> Option<&LedgerAccount> {
        match self.writes.get(address) {
            Some(entry) => entry.as_ref(),
            None => self.base.account(address),
        }
    }

    fn get_mut(&mut self, address: &Pubkey) -> &mut LedgerAccount {
        let base = self.base;
        self.writes
            .entry(*address)
            .or_insert_with(|| base.account(address).cloned())
            .get_or_insert_with(LedgerAccount::wallet)
    }

    /// True when a program-owned record lives at `address`
    pub fn exists(&self, address: &Pubkey) -> bool {
        self.get(address)
            .is_some_and(|account| account.owner == crate::ID && !account.data.is_empty())
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.get(address).map_or(0, |account| account.lamports)
    }

    pub fn try_load<T: AccountDeserialize>(&self, address: &Pubkey) -> Result<Option<T>> {
        match self.get(address) {
            Some(account) if account.owner == crate::ID && !account.data.is_empty() => {
                let mut data: &[u8] = &account.data;
                T::try_deserialize(&mut data).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn load<T: AccountDeserialize>(&self, address: &Pubkey) -> Result<T> {
        self.try_load(address)?
            .ok_or_else(|| error!(ErrorCode::AccountNotInitialized))
    }

    /// Allocate `space` bytes at `address`, funded to rent exemption by the signer.
    pub fn create<T: AccountSerialize>(
        &mut self,
        address: &Pubkey,
        space: usize,
        record: &T,
    ) -> Result<()> {
        require!(
            !self.exists(address),
            ErrorCode::AccountDiscriminatorAlreadySet
        );
        let payer = self.signer()?;
        let rent = self.rent().minimum_balance(space);

        let mut data = Vec::with_capacity(space);
        record.try_serialize(&mut data)?;
        require!(data.len() <= space, ErrorCode::AccountDidNotSerialize);
        data.resize(space, 0);

        let payer_account = self.get_mut(&payer);
        payer_account.lamports = payer_account
            .lamports
            .checked_sub(rent)
            .ok_or(PodComError::InsufficientLamports)?;

        let target = self.get_mut(address);
        target.lamports = target
            .lamports
            .checked_add(rent)
            .ok_or(PodComError::Overflow)?;
        target.owner = crate::ID;
        target.data = data;
        Ok(())
    }

    /// Overwrite an existing record in place.
    pub fn store<T: AccountSerialize>(&mut self, address: &Pubkey, record: &T) -> Result<()> {
        require!(self.exists(address), ErrorCode::AccountNotInitialized);

        let mut data = Vec::new();
        record.try_serialize(&mut data)?;

        let account = self.get_mut(address);
        require!(
            data.len() <= account.data.len(),
            ErrorCode::AccountDidNotSerialize
        );
        let space = account.data.len();
        data.resize(space, 0);
        account.data = data;
        Ok(())
    }

    /// Remove a record and send all of its lamports to `recipient`.
    pub fn close(&mut self, address: &Pubkey, recipient: &Pubkey) -> Result<u64> {
        require!(self.exists(address), ErrorCode::AccountNotInitialized);

        let refund = self.lamports(address);
        let target = self.get_mut(recipient);
        target.lamports = target
            .lamports
            .checked_add(refund)
            .ok_or(PodComError::Overflow)?;
        self.writes.insert(*address, None);
        Ok(refund)
    }

    pub fn transfer_lamports(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        if amount == 0 || from == to {
            return Ok(());
        }
        require!(
            self.lamports(from) >= amount,
            PodComError::InsufficientFunds
        );
        require!(
            self.lamports(to).checked_add(amount).is_some(),
            PodComError::Overflow
        );

        self.get_mut(from).lamports -= amount;
        self.get_mut(to).lamports += amount;
        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn emit<E: Into<PodEvent>>(&mut self, event: E) {
        self.events.push(event.into());
    }
}

impl LedgerAccount {
    pub(crate) fn wallet() -> Self {
        Self {
            lamports: 0,
            owner: system_program::ID,
            data: Vec::new(),
        }
    }
}
