//! Request façade: the API-facing boundary of the dispatch core
//!
//! One operation per action kind, plus a name-dispatched entry point for
//! callers that carry raw JSON arguments. Each invocation runs the
//! Builder → Assembler → Gateway pipeline as an independent unit of work
//! and short-circuits on the first error. Every failure is logged with the
//! operation name and request id, then returned to the caller unchanged in
//! kind — never swallowed, never downgraded.

use crate::assembler::TransactionAssembler;
use crate::builder::{
    ActionArgs, ActionBuilder, BuyItemArgs, ClaimDailyRewardArgs, CombineConsumableArgs,
    CombineEquipmentArgs, CreateIdentityArgs, EnhanceItemArgs, PerformCombatStageArgs,
    SellItemArgs,
};
use crate::config::DispatchConfig;
use crate::currency::CurrencyDecoder;
use crate::error::DispatchError;
use crate::gateway::SubmissionGateway;
use crate::keystore::Signer;
use crate::ledger::LedgerService;
use crate::observability::RequestContext;
use crate::registry::ActionKind;
use crate::types::TxId;
use std::sync::Arc;
use tracing::{error, info};

/// API-facing dispatcher owning the per-request pipeline
pub struct ActionDispatcher {
    builder: ActionBuilder,
    assembler: TransactionAssembler,
    gateway: SubmissionGateway,
}

impl ActionDispatcher {
    pub fn new(
        ledger: Arc<dyn LedgerService>,
        signer: Arc<dyn Signer>,
        decoder: Arc<dyn CurrencyDecoder>,
        config: &DispatchConfig,
    ) -> Self {
        Self {
            builder: ActionBuilder::new(
                ledger.clone(),
                decoder,
                config.ledger.currency_state_key,
            ),
            assembler: TransactionAssembler::new(ledger.clone(), signer),
            gateway: SubmissionGateway::new(ledger),
        }
    }

    /// Name-dispatched entry point for raw JSON arguments.
    ///
    /// Arguments are fully shaped before any collaborator call, so a
    /// missing required field never reaches the signer or the ledger.
    pub async fn handle(
        &self,
        kind_name: &str,
        raw_args: serde_json::Value,
    ) -> Result<TxId, DispatchError> {
        let ctx = RequestContext::new(kind_name);
        let kind = ActionKind::from_name(kind_name).map_err(|e| self.fail(&ctx, e))?;
        let args = ActionArgs::from_raw(kind, raw_args).map_err(|e| self.fail(&ctx, e))?;
        self.dispatch(&ctx, kind, args).await
    }

    pub async fn handle_create_identity(
        &self,
        args: CreateIdentityArgs,
    ) -> Result<TxId, DispatchError> {
        self.handle_typed(ActionKind::CreateIdentity, ActionArgs::CreateIdentity(args))
            .await
    }

    pub async fn handle_perform_combat_stage(
        &self,
        args: PerformCombatStageArgs,
    ) -> Result<TxId, DispatchError> {
        self.handle_typed(
            ActionKind::PerformCombatStage,
            ActionArgs::PerformCombatStage(args),
        )
        .await
    }

    pub async fn handle_combine_equipment(
        &self,
        args: CombineEquipmentArgs,
    ) -> Result<TxId, DispatchError> {
        self.handle_typed(
            ActionKind::CombineEquipment,
            ActionArgs::CombineEquipment(args),
        )
        .await
    }

    pub async fn handle_enhance_item(
        &self,
        args: EnhanceItemArgs,
    ) -> Result<TxId, DispatchError> {
        self.handle_typed(ActionKind::EnhanceItem, ActionArgs::EnhanceItem(args))
            .await
    }

    pub async fn handle_buy_item(&self, args: BuyItemArgs) -> Result<TxId, DispatchError> {
        self.handle_typed(ActionKind::BuyItem, ActionArgs::BuyItem(args))
            .await
    }

    pub async fn handle_sell_item(&self, args: SellItemArgs) -> Result<TxId, DispatchError> {
        self.handle_typed(ActionKind::SellItem, ActionArgs::SellItem(args))
            .await
    }

    pub async fn handle_claim_daily_reward(
        &self,
        args: ClaimDailyRewardArgs,
    ) -> Result<TxId, DispatchError> {
        self.handle_typed(
            ActionKind::ClaimDailyReward,
            ActionArgs::ClaimDailyReward(args),
        )
        .await
    }

    pub async fn handle_combine_consumable(
        &self,
        args: CombineConsumableArgs,
    ) -> Result<TxId, DispatchError> {
        self.handle_typed(
            ActionKind::CombineConsumable,
            ActionArgs::CombineConsumable(args),
        )
        .await
    }

    async fn handle_typed(
        &self,
        kind: ActionKind,
        args: ActionArgs,
    ) -> Result<TxId, DispatchError> {
        let ctx = RequestContext::new(kind.name());
        self.dispatch(&ctx, kind, args).await
    }

    /// Builder → Assembler → Gateway, short-circuiting on first error
    async fn dispatch(
        &self,
        ctx: &RequestContext,
        kind: ActionKind,
        args: ActionArgs,
    ) -> Result<TxId, DispatchError> {
        let action = self
            .builder
            .build(kind, args)
            .await
            .map_err(|e| self.fail(ctx, e))?;
        let envelope = self
            .assembler
            .assemble(vec![action])
            .await
            .map_err(|e| self.fail(ctx, e))?;
        let tx_id = self
            .gateway
            .submit(&envelope)
            .await
            .map_err(|e| self.fail(ctx, e))?;

        info!(
            request_id = %ctx.request_id,
            operation = %ctx.operation,
            tx_id = %tx_id,
            "action dispatched"
        );
        Ok(tx_id)
    }

    /// Record the failure for operators and hand it back unchanged in kind
    fn fail(&self, ctx: &RequestContext, err: DispatchError) -> DispatchError {
        error!(
            request_id = %ctx.request_id,
            operation = %ctx.operation,
            error_kind = err.kind_name(),
            error = %err,
            "action dispatch failed"
        );
        err
    }
}
