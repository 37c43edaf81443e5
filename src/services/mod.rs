//! Services bridging pure domain logic with persistence: the local
//! single-player driver and the shared-table multiplayer driver.

pub mod solo;
pub mod table_flow;
