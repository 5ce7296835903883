pub mod initialize;
pub mod set_relay_authority;
pub mod update_authority;
