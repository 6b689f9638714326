//! Action builder: shapes validated arguments into versioned actions
//!
//! The builder is the only stage with a read-before-write: pricing a sell
//! order looks up the gold currency denomination in ledger state and
//! multiplies it by the requested integer price. Everything else is a pure
//! mapping from arguments to the registry's active payload version.

use crate::action::{
    Action, BuyItemV4, ClaimDailyRewardV1, CombineConsumableV3, CombineEquipmentV4,
    CreateIdentityV2, EnhanceItemV5, PerformCombatStageV4, SellItemV3,
};
use crate::currency::CurrencyDecoder;
use crate::error::DispatchError;
use crate::ledger::LedgerService;
use crate::registry::ActionKind;
use crate::types::{Address, ItemId};
use serde::Deserialize;
use std::sync::Arc;

/// Raw argument contracts, one per kind.
///
/// Field names are the wire names callers use (camelCase). Required fields
/// have no default; a missing one fails deserialization and becomes an
/// `Argument` error before any collaborator call. List fields default to
/// empty ordered sequences; optional scalars stay `Option`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateIdentityArgs {
    pub name: String,
    pub slot_index: i32,
    pub hair_index: i32,
    pub lens_index: i32,
    pub ear_index: i32,
    pub tail_index: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PerformCombatStageArgs {
    pub avatar_address: Address,
    pub world_id: i32,
    pub stage_id: i32,
    pub weekly_arena_address: Address,
    pub ranking_arena_address: Address,
    #[serde(default)]
    pub costume_ids: Vec<ItemId>,
    #[serde(default)]
    pub equipment_ids: Vec<ItemId>,
    #[serde(default)]
    pub consumable_ids: Vec<ItemId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CombineEquipmentArgs {
    pub avatar_address: Address,
    pub recipe_id: i32,
    pub slot_index: i32,
    #[serde(default)]
    pub sub_recipe_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnhanceItemArgs {
    pub avatar_address: Address,
    pub item_id: ItemId,
    pub material_id: ItemId,
    pub slot_index: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuyItemArgs {
    pub buyer_avatar_address: Address,
    pub seller_agent_address: Address,
    pub seller_avatar_address: Address,
    pub product_id: ItemId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SellItemArgs {
    pub seller_avatar_address: Address,
    pub item_id: ItemId,
    pub price: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClaimDailyRewardArgs {
    pub avatar_address: Address,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CombineConsumableArgs {
    pub avatar_address: Address,
    pub recipe_id: i32,
    pub slot_index: i32,
}

/// Typed arguments for one build request
#[derive(Debug, Clone)]
pub enum ActionArgs {
    CreateIdentity(CreateIdentityArgs),
    PerformCombatStage(PerformCombatStageArgs),
    CombineEquipment(CombineEquipmentArgs),
    EnhanceItem(EnhanceItemArgs),
    BuyItem(BuyItemArgs),
    SellItem(SellItemArgs),
    ClaimDailyReward(ClaimDailyRewardArgs),
    CombineConsumable(CombineConsumableArgs),
}

impl ActionArgs {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionArgs::CreateIdentity(_) => ActionKind::CreateIdentity,
            ActionArgs::PerformCombatStage(_) => ActionKind::PerformCombatStage,
            ActionArgs::CombineEquipment(_) => ActionKind::CombineEquipment,
            ActionArgs::EnhanceItem(_) => ActionKind::EnhanceItem,
            ActionArgs::BuyItem(_) => ActionKind::BuyItem,
            ActionArgs::SellItem(_) => ActionKind::SellItem,
            ActionArgs::ClaimDailyReward(_) => ActionKind::ClaimDailyReward,
            ActionArgs::CombineConsumable(_) => ActionKind::CombineConsumable,
        }
    }

    /// Shape raw JSON arguments into the typed contract for `kind`
    pub fn from_raw(kind: ActionKind, raw: serde_json::Value) -> Result<Self, DispatchError> {
        let argument = |e: serde_json::Error| DispatchError::Argument {
            operation: kind.name().to_string(),
            reason: e.to_string(),
        };
        let args = match kind {
            ActionKind::CreateIdentity => {
                ActionArgs::CreateIdentity(serde_json::from_value(raw).map_err(argument)?)
            }
            ActionKind::PerformCombatStage => {
                ActionArgs::PerformCombatStage(serde_json::from_value(raw).map_err(argument)?)
            }
            ActionKind::CombineEquipment => {
                ActionArgs::CombineEquipment(serde_json::from_value(raw).map_err(argument)?)
            }
            ActionKind::EnhanceItem => {
                ActionArgs::EnhanceItem(serde_json::from_value(raw).map_err(argument)?)
            }
            ActionKind::BuyItem => {
                ActionArgs::BuyItem(serde_json::from_value(raw).map_err(argument)?)
            }
            ActionKind::SellItem => {
                ActionArgs::SellItem(serde_json::from_value(raw).map_err(argument)?)
            }
            ActionKind::ClaimDailyReward => {
                ActionArgs::ClaimDailyReward(serde_json::from_value(raw).map_err(argument)?)
            }
            ActionKind::CombineConsumable => {
                ActionArgs::CombineConsumable(serde_json::from_value(raw).map_err(argument)?)
            }
        };
        Ok(args)
    }
}

/// Maps a validated request to one immutable action of the registry's
/// active version
pub struct ActionBuilder {
    ledger: Arc<dyn LedgerService>,
    decoder: Arc<dyn CurrencyDecoder>,
    currency_state_key: Address,
}

impl ActionBuilder {
    pub fn new(
        ledger: Arc<dyn LedgerService>,
        decoder: Arc<dyn CurrencyDecoder>,
        currency_state_key: Address,
    ) -> Self {
        Self {
            ledger,
            decoder,
            currency_state_key,
        }
    }

    /// Build the active-version action for `kind` from `args`.
    ///
    /// On success the action is fully formed and version-correct; on failure
    /// no partial action is observable.
    pub async fn build(
        &self,
        kind: ActionKind,
        args: ActionArgs,
    ) -> Result<Action, DispatchError> {
        if args.kind() != kind {
            return Err(DispatchError::Argument {
                operation: kind.name().to_string(),
                reason: format!("arguments are for {}", args.kind()),
            });
        }

        let action = match args {
            ActionArgs::CreateIdentity(a) => Action::CreateIdentity(CreateIdentityV2 {
                name: a.name,
                slot_index: a.slot_index,
                hair_index: a.hair_index,
                lens_index: a.lens_index,
                ear_index: a.ear_index,
                tail_index: a.tail_index,
            }),
            ActionArgs::PerformCombatStage(a) => {
                Action::PerformCombatStage(PerformCombatStageV4 {
                    avatar_address: a.avatar_address,
                    world_id: a.world_id,
                    stage_id: a.stage_id,
                    weekly_arena_address: a.weekly_arena_address,
                    ranking_arena_address: a.ranking_arena_address,
                    costume_ids: a.costume_ids,
                    equipment_ids: a.equipment_ids,
                    consumable_ids: a.consumable_ids,
                })
            }
            ActionArgs::CombineEquipment(a) => Action::CombineEquipment(CombineEquipmentV4 {
                avatar_address: a.avatar_address,
                recipe_id: a.recipe_id,
                slot_index: a.slot_index,
                sub_recipe_id: a.sub_recipe_id,
            }),
            ActionArgs::EnhanceItem(a) => Action::EnhanceItem(EnhanceItemV5 {
                avatar_address: a.avatar_address,
                item_id: a.item_id,
                material_id: a.material_id,
                slot_index: a.slot_index,
            }),
            ActionArgs::BuyItem(a) => Action::BuyItem(BuyItemV4 {
                buyer_avatar_address: a.buyer_avatar_address,
                seller_agent_address: a.seller_agent_address,
                seller_avatar_address: a.seller_avatar_address,
                product_id: a.product_id,
            }),
            ActionArgs::SellItem(a) => {
                let price = self.price_in_gold(a.price).await?;
                Action::SellItem(SellItemV3 {
                    seller_avatar_address: a.seller_avatar_address,
                    item_id: a.item_id,
                    price,
                })
            }
            ActionArgs::ClaimDailyReward(a) => Action::ClaimDailyReward(ClaimDailyRewardV1 {
                avatar_address: a.avatar_address,
            }),
            ActionArgs::CombineConsumable(a) => Action::CombineConsumable(CombineConsumableV3 {
                avatar_address: a.avatar_address,
                recipe_id: a.recipe_id,
                slot_index: a.slot_index,
            }),
        };

        debug_assert_eq!(action.version(), kind.active_version());
        Ok(action)
    }

    /// The one read-before-write: decode the stored gold denomination and
    /// multiply by the requested integer price. A missing or undecodable
    /// record fails the whole build; a zero amount is never defaulted.
    async fn price_in_gold(
        &self,
        price: i64,
    ) -> Result<crate::currency::CurrencyAmount, DispatchError> {
        let key = self.currency_state_key;
        let blob = self
            .ledger
            .read_state(&key)
            .await
            .map_err(|e| DispatchError::Unexpected(format!("currency state read failed: {}", e)))?
            .ok_or_else(|| DispatchError::StateDecode {
                key: key.to_hex(),
                reason: "currency record absent".to_string(),
            })?;

        let currency = self
            .decoder
            .decode_currency(&blob)
            .map_err(|e| DispatchError::StateDecode {
                key: key.to_hex(),
                reason: e.to_string(),
            })?;

        Ok(&currency * price)
    }
}
