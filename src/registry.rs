//! Action registry: the closed set of action kinds and their active versions
//!
//! Versions are append-only over the system's history. A version number is
//! never reused for a changed field layout, so old serialized actions stay
//! interpretable by the state machine as the registry evolves. The builder
//! always emits the currently active version listed here.

use crate::error::DispatchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of action kinds this node will dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    CreateIdentity,
    PerformCombatStage,
    CombineEquipment,
    EnhanceItem,
    BuyItem,
    SellItem,
    ClaimDailyReward,
    CombineConsumable,
}

/// All kinds, in registry order
pub const ALL_KINDS: [ActionKind; 8] = [
    ActionKind::CreateIdentity,
    ActionKind::PerformCombatStage,
    ActionKind::CombineEquipment,
    ActionKind::EnhanceItem,
    ActionKind::BuyItem,
    ActionKind::SellItem,
    ActionKind::ClaimDailyReward,
    ActionKind::CombineConsumable,
];

/// Field value shapes an action payload may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Address,
    Id,
    IdList,
    /// Currency amount, constructed from a decoded denomination
    Amount,
}

/// One field of an action version's contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

const fn req(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        ty,
        required: true,
    }
}

const fn opt(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        ty,
        required: false,
    }
}

impl ActionKind {
    /// Canonical wire name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::CreateIdentity => "create-identity",
            ActionKind::PerformCombatStage => "perform-combat-stage",
            ActionKind::CombineEquipment => "combine-equipment",
            ActionKind::EnhanceItem => "enhance-item",
            ActionKind::BuyItem => "buy-item",
            ActionKind::SellItem => "sell-item",
            ActionKind::ClaimDailyReward => "claim-daily-reward",
            ActionKind::CombineConsumable => "combine-consumable",
        }
    }

    /// Look up a kind by wire name; anything outside the closed set is
    /// rejected
    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| DispatchError::UnknownKind(name.to_string()))
    }

    /// Currently active payload version for new requests of this kind
    pub fn active_version(&self) -> u16 {
        match self {
            ActionKind::CreateIdentity => 2,
            ActionKind::PerformCombatStage => 4,
            ActionKind::CombineEquipment => 4,
            ActionKind::EnhanceItem => 5,
            ActionKind::BuyItem => 4,
            ActionKind::SellItem => 3,
            ActionKind::ClaimDailyReward => 1,
            ActionKind::CombineConsumable => 3,
        }
    }

    /// Field contract of the currently active version
    pub fn field_contract(&self) -> &'static [FieldSpec] {
        match self {
            ActionKind::CreateIdentity => const {
                &[
                    req("name", FieldType::String),
                    req("slotIndex", FieldType::Int),
                    req("hairIndex", FieldType::Int),
                    req("lensIndex", FieldType::Int),
                    req("earIndex", FieldType::Int),
                    req("tailIndex", FieldType::Int),
                ]
            },
            ActionKind::PerformCombatStage => const {
                &[
                    req("avatarAddress", FieldType::Address),
                    req("worldId", FieldType::Int),
                    req("stageId", FieldType::Int),
                    req("weeklyArenaAddress", FieldType::Address),
                    req("rankingArenaAddress", FieldType::Address),
                    opt("costumeIds", FieldType::IdList),
                    opt("equipmentIds", FieldType::IdList),
                    opt("consumableIds", FieldType::IdList),
                ]
            },
            ActionKind::CombineEquipment => const {
                &[
                    req("avatarAddress", FieldType::Address),
                    req("recipeId", FieldType::Int),
                    req("slotIndex", FieldType::Int),
                    opt("subRecipeId", FieldType::Int),
                ]
            },
            ActionKind::EnhanceItem => const {
                &[
                    req("avatarAddress", FieldType::Address),
                    req("itemId", FieldType::Id),
                    req("materialId", FieldType::Id),
                    req("slotIndex", FieldType::Int),
                ]
            },
            ActionKind::BuyItem => const {
                &[
                    req("buyerAvatarAddress", FieldType::Address),
                    req("sellerAgentAddress", FieldType::Address),
                    req("sellerAvatarAddress", FieldType::Address),
                    req("productId", FieldType::Id),
                ]
            },
            ActionKind::SellItem => const {
                &[
                    req("sellerAvatarAddress", FieldType::Address),
                    req("itemId", FieldType::Id),
                    req("price", FieldType::Amount),
                ]
            },
            ActionKind::ClaimDailyReward => const { &[req("avatarAddress", FieldType::Address)] },
            ActionKind::CombineConsumable => const {
                &[
                    req("avatarAddress", FieldType::Address),
                    req("recipeId", FieldType::Int),
                    req("slotIndex", FieldType::Int),
                ]
            },
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_lookup_round_trips_for_every_kind() {
        for kind in ALL_KINDS {
            assert_eq!(ActionKind::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = ActionKind::from_name("mint-gold").unwrap_err();
        assert_eq!(err.kind_name(), "unknown_kind");
    }

    #[test]
    fn field_contracts_cover_every_kind() {
        for kind in ALL_KINDS {
            assert!(!kind.field_contract().is_empty());
            assert!(kind.active_version() >= 1);
        }
    }

    #[test]
    fn combine_equipment_has_one_optional_scalar() {
        let contract = ActionKind::CombineEquipment.field_contract();
        let optional: Vec<_> = contract.iter().filter(|f| !f.required).collect();
        assert_eq!(optional.len(), 1);
        assert_eq!(optional[0].name, "subRecipeId");
        assert_eq!(optional[0].ty, FieldType::Int);
    }

    #[test]
    fn combat_stage_lists_are_optional() {
        let contract = ActionKind::PerformCombatStage.field_contract();
        for name in ["costumeIds", "equipmentIds", "consumableIds"] {
            let spec = contract.iter().find(|f| f.name == name).unwrap();
            assert!(!spec.required);
            assert_eq!(spec.ty, FieldType::IdList);
        }
    }
}
