pub mod claim_channel_fees;
pub mod deposit_escrow;
pub mod withdraw_escrow;
