pub mod agent;
pub mod channel;
pub mod compression;
pub mod config;
pub mod escrow;
pub mod message;

pub use agent::*;
pub use channel::*;
pub use compression::*;
pub use config::*;
pub use escrow::*;
pub use message::*;

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

// ============================================================================
// Typed Decode
// ============================================================================

/// Any record owned by the program, decoded by discriminator
#[derive(Clone, Debug, PartialEq)]
pub enum ProgramAccount {
    Config(ProtocolConfig),
    Agent(AgentAccount),
    Message(MessageAccount),
    Channel(ChannelAccount),
    Participant(ChannelParticipant),
    Escrow(EscrowAccount),
    Invitation(ChannelInvitation),
    ChannelMessage(ChannelMessage),
    Compression(CompressionState),
}

impl ProgramAccount {
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut buf = data;
        let account = if data.starts_with(ProtocolConfig::DISCRIMINATOR) {
            Self::Config(ProtocolConfig::try_deserialize(&mut buf)?)
        } else if data.starts_with(AgentAccount::DISCRIMINATOR) {
            Self::Agent(AgentAccount::try_deserialize(&mut buf)?)
        } else if data.starts_with(MessageAccount::DISCRIMINATOR) {
            Self::Message(MessageAccount::try_deserialize(&mut buf)?)
        } else if data.starts_with(ChannelAccount::DISCRIMINATOR) {
            Self::Channel(ChannelAccount::try_deserialize(&mut buf)?)
        } else if data.starts_with(ChannelParticipant::DISCRIMINATOR) {
            Self::Participant(ChannelParticipant::try_deserialize(&mut buf)?)
        } else if data.starts_with(EscrowAccount::DISCRIMINATOR) {
            Self::Escrow(EscrowAccount::try_deserialize(&mut buf)?)
        } else if data.starts_with(ChannelInvitation::DISCRIMINATOR) {
            Self::Invitation(ChannelInvitation::try_deserialize(&mut buf)?)
        } else if data.starts_with(ChannelMessage::DISCRIMINATOR) {
            Self::ChannelMessage(ChannelMessage::try_deserialize(&mut buf)?)
        } else if data.starts_with(CompressionState::DISCRIMINATOR) {
            Self::Compression(CompressionState::try_deserialize(&mut buf)?)
        } else {
            return err!(ErrorCode::AccountDiscriminatorMismatch);
        };
        Ok(account)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "ProtocolConfig",
            Self::Agent(_) => "AgentAccount",
            Self::Message(_) => "MessageAccount",
            Self::Channel(_) => "ChannelAccount",
            Self::Participant(_) => "ChannelParticipant",
            Self::Escrow(_) => "EscrowAccount",
            Self::Invitation(_) => "ChannelInvitation",
            Self::ChannelMessage(_) => "ChannelMessage",
            Self::Compression(_) => "CompressionState",
        }
    }
}
