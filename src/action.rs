//! Versioned, immutable action payloads
//!
//! Each action kind is a tagged variant wrapping a version-suffixed payload
//! struct. The builder always constructs the newest variant; a decoder
//! elsewhere can still interpret older tags, which is why a payload struct
//! is never edited in place — a changed field layout gets a new version
//! number and a new struct.
//!
//! Fields are fully determined by constructor arguments and never mutated
//! after creation.

use crate::currency::CurrencyAmount;
use crate::registry::ActionKind;
use crate::types::{Address, ItemId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIdentityV2 {
    pub name: String,
    pub slot_index: i32,
    pub hair_index: i32,
    pub lens_index: i32,
    pub ear_index: i32,
    pub tail_index: i32,
}

impl CreateIdentityV2 {
    pub const VERSION: u16 = 2;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformCombatStageV4 {
    pub avatar_address: Address,
    pub world_id: i32,
    pub stage_id: i32,
    pub weekly_arena_address: Address,
    pub ranking_arena_address: Address,
    pub costume_ids: Vec<ItemId>,
    pub equipment_ids: Vec<ItemId>,
    pub consumable_ids: Vec<ItemId>,
}

impl PerformCombatStageV4 {
    pub const VERSION: u16 = 4;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineEquipmentV4 {
    pub avatar_address: Address,
    pub recipe_id: i32,
    pub slot_index: i32,
    /// Explicit "not provided" when absent; never a sentinel that could
    /// collide with a real sub-recipe id
    pub sub_recipe_id: Option<i32>,
}

impl CombineEquipmentV4 {
    pub const VERSION: u16 = 4;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceItemV5 {
    pub avatar_address: Address,
    pub item_id: ItemId,
    pub material_id: ItemId,
    pub slot_index: i32,
}

impl EnhanceItemV5 {
    pub const VERSION: u16 = 5;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyItemV4 {
    pub buyer_avatar_address: Address,
    pub seller_agent_address: Address,
    pub seller_avatar_address: Address,
    pub product_id: ItemId,
}

impl BuyItemV4 {
    pub const VERSION: u16 = 4;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellItemV3 {
    pub seller_avatar_address: Address,
    pub item_id: ItemId,
    pub price: CurrencyAmount,
}

impl SellItemV3 {
    pub const VERSION: u16 = 3;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDailyRewardV1 {
    pub avatar_address: Address,
}

impl ClaimDailyRewardV1 {
    pub const VERSION: u16 = 1;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineConsumableV3 {
    pub avatar_address: Address,
    pub recipe_id: i32,
    pub slot_index: i32,
}

impl CombineConsumableV3 {
    pub const VERSION: u16 = 3;
}

/// One intended mutation of ledger state, identified by (kind, version)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    CreateIdentity(CreateIdentityV2),
    PerformCombatStage(PerformCombatStageV4),
    CombineEquipment(CombineEquipmentV4),
    EnhanceItem(EnhanceItemV5),
    BuyItem(BuyItemV4),
    SellItem(SellItemV3),
    ClaimDailyReward(ClaimDailyRewardV1),
    CombineConsumable(CombineConsumableV3),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::CreateIdentity(_) => ActionKind::CreateIdentity,
            Action::PerformCombatStage(_) => ActionKind::PerformCombatStage,
            Action::CombineEquipment(_) => ActionKind::CombineEquipment,
            Action::EnhanceItem(_) => ActionKind::EnhanceItem,
            Action::BuyItem(_) => ActionKind::BuyItem,
            Action::SellItem(_) => ActionKind::SellItem,
            Action::ClaimDailyReward(_) => ActionKind::ClaimDailyReward,
            Action::CombineConsumable(_) => ActionKind::CombineConsumable,
        }
    }

    /// Version tag carried by this payload
    pub fn version(&self) -> u16 {
        match self {
            Action::CreateIdentity(_) => CreateIdentityV2::VERSION,
            Action::PerformCombatStage(_) => PerformCombatStageV4::VERSION,
            Action::CombineEquipment(_) => CombineEquipmentV4::VERSION,
            Action::EnhanceItem(_) => EnhanceItemV5::VERSION,
            Action::BuyItem(_) => BuyItemV4::VERSION,
            Action::SellItem(_) => SellItemV3::VERSION,
            Action::ClaimDailyReward(_) => ClaimDailyRewardV1::VERSION,
            Action::CombineConsumable(_) => CombineConsumableV3::VERSION,
        }
    }
}
