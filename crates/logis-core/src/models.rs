//! Domain models exchanged with the rental API
//!
//! Rust names are English; the wire names are the server's French field names.

mod auth;
mod contract;
mod house;
mod profile;
mod room;

pub use auth::{LoginRequest, LoginUser, RefreshRequest, RefreshResponse, Registration, TokenPair};
pub use contract::{
    Contract, ContractDraft, ContractForm, ContractId, ContractPatch, ContractStatus, PaymentMode,
    Periodicity, TenantInfo,
};
pub use house::{House, HouseDraft, HouseId, HousePatch, HouseWithRooms};
pub use profile::{Profile, ProfileUpdate};
pub use room::{Room, RoomDraft, RoomId, RoomKind, RoomPatch};
