//! Order Lifecycle Service
//!
//! Drives player orders through draft, validation, publication and closure.
//! Every mutation runs under the order's lock, is saved through the
//! repository, and then has its drained events handed to the publisher.
//!
//! A validation pass holds the lock only while entering and leaving
//! `validating`. The fan-out itself runs unlocked so the order can still be
//! cancelled; cancelling fires the pass's token and its result is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::order_locks::OrderLocks;
use super::validation_aggregator::{ValidationAborted, ValidationAggregator};
use crate::application::dto::{
    BudgetFactorsRequest, CreateDraftRequest, GuaranteeSelectionRequest, UpdateBriefRequest,
};
use crate::application::ports::{
    EventPublisherPort, MarketIndexPort, RiskIntelPort, TemplateCatalogPort, UpstreamError,
};
use crate::domain::order_budget::{
    BudgetEngine, BudgetEstimate, BudgetFactors, FactorError, FactorInputs,
};
use crate::domain::order_guarantee::{GuaranteeError, GuaranteeSelection, GuaranteeSelector};
use crate::domain::order_validation::ValidationSummary;
use crate::domain::player_order::{
    OrderBrief, PlayerOrder, PlayerOrderError, PlayerOrderRepository, PlayerOrderStatus,
    PlayerOrderTemplate, TemplateCode,
};
use crate::domain::shared::OrderId;
use crate::observability;

const DEFAULT_CANCEL_REASON: &str = "withdrawn by issuer";

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// Lifecycle rule, brief or storage failure.
    #[error(transparent)]
    Order(#[from] PlayerOrderError),

    /// Budget input out of range.
    #[error(transparent)]
    Factor(#[from] FactorError),

    /// Guarantee terms malformed or below the risk floor.
    #[error(transparent)]
    Guarantee(#[from] GuaranteeError),

    /// The content service does not offer the template.
    #[error("Template '{code}' is not offered")]
    TemplateNotFound {
        /// Requested template.
        code: TemplateCode,
    },

    /// An upstream collaborator failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The validation pass was cancelled.
    #[error(transparent)]
    ValidationAborted(#[from] ValidationAborted),

    /// The validation task died.
    #[error("Validation task failed: {message}")]
    TaskFailed {
        /// Join error.
        message: String,
    },
}

impl LifecycleError {
    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Order(e) => e.code(),
            Self::Factor(e) => e.code(),
            Self::Guarantee(e) => e.code(),
            Self::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            Self::Upstream(_) => "UPSTREAM_UNAVAILABLE",
            Self::ValidationAborted(_) => "VALIDATION_ABORTED",
            Self::TaskFailed { .. } => "INTERNAL_ERROR",
        }
    }

    /// Suggested fix, when one exists.
    #[must_use]
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::Order(e) => e.remediation(),
            Self::Factor(_) => Some("Bring the factor back inside its permitted range"),
            Self::Guarantee(e) => e.remediation(),
            Self::TemplateNotFound { .. } => Some("Pick one of the offered templates"),
            Self::Upstream(_) | Self::ValidationAborted(_) => Some("Retry the request"),
            Self::TaskFailed { .. } => None,
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Upstream collaborators the lifecycle consults.
#[derive(Clone)]
pub struct LifecycleCollaborators {
    /// World and factions risk assessment.
    pub risk_intel: Arc<dyn RiskIntelPort>,
    /// Economy market index.
    pub market_index: Arc<dyn MarketIndexPort>,
    /// Content template catalog.
    pub templates: Arc<dyn TemplateCatalogPort>,
}

/// Service coordinating the player order lifecycle.
pub struct OrderLifecycleService<R, E>
where
    R: PlayerOrderRepository,
    E: EventPublisherPort,
{
    repository: Arc<R>,
    event_publisher: Arc<E>,
    budget_engine: BudgetEngine,
    guarantee_selector: GuaranteeSelector,
    aggregator: ValidationAggregator,
    collaborators: LifecycleCollaborators,
    locks: OrderLocks,
    in_flight: Mutex<HashMap<OrderId, CancellationToken>>,
}

impl<R, E> OrderLifecycleService<R, E>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    /// Create a service with default pricing.
    pub fn new(
        repository: Arc<R>,
        event_publisher: Arc<E>,
        aggregator: ValidationAggregator,
        collaborators: LifecycleCollaborators,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            budget_engine: BudgetEngine::default(),
            guarantee_selector: GuaranteeSelector::default(),
            aggregator,
            collaborators,
            locks: OrderLocks::new(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the budget engine.
    #[must_use]
    pub fn with_budget_engine(mut self, engine: BudgetEngine) -> Self {
        self.budget_engine = engine;
        self
    }

    /// Replace the guarantee selector.
    #[must_use]
    pub fn with_guarantee_selector(mut self, selector: GuaranteeSelector) -> Self {
        self.guarantee_selector = selector;
        self
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Open a new draft, optionally seeded from a template.
    ///
    /// A template fills in every brief field the request leaves out and
    /// prices a starting budget from its complexity factors.
    ///
    /// # Errors
    ///
    /// Returns error if the template is unknown, no title can be derived,
    /// or persistence fails.
    pub async fn create_draft(
        &self,
        request: &CreateDraftRequest,
    ) -> Result<PlayerOrder, LifecycleError> {
        let template = match request.template {
            Some(code) => Some(
                self.collaborators
                    .templates
                    .find_template(code)
                    .await?
                    .ok_or(LifecycleError::TemplateNotFound { code })?,
            ),
            None => None,
        };

        let brief = build_brief(request, template.as_ref())?;
        let mut order = PlayerOrder::create_draft(brief);

        if let Some(template) = &template {
            self.seed_budget(&mut order, template).await?;
        }

        self.persist(&mut order, PlayerOrderStatus::Draft).await?;
        tracing::info!(
            order_id = %order.id(),
            template = ?request.template,
            "Draft created"
        );
        Ok(order)
    }

    /// Patch the brief.
    ///
    /// # Errors
    ///
    /// Returns error if the order is missing or not editable, or the new
    /// brief is invalid.
    pub async fn update_brief(
        &self,
        order_id: &OrderId,
        request: &UpdateBriefRequest,
    ) -> Result<PlayerOrder, LifecycleError> {
        let _guard = self.locks.lock(order_id).await;
        let mut order = self.load(order_id).await?;
        if request.is_empty() {
            return Ok(order);
        }
        let before = order.status();
        let brief = request.apply_to(order.brief())?;
        order.revise_brief(brief)?;
        self.persist(&mut order, before).await?;
        Ok(order)
    }

    /// Replace the budget inputs and reprice the order.
    ///
    /// The market index is fetched from the economy service when the request
    /// does not carry one.
    ///
    /// # Errors
    ///
    /// Returns error if a factor is out of range, the index cannot be
    /// fetched, or the order is not editable.
    pub async fn update_budget_factors(
        &self,
        order_id: &OrderId,
        request: &BudgetFactorsRequest,
    ) -> Result<BudgetEstimate, LifecycleError> {
        let _guard = self.locks.lock(order_id).await;
        let mut order = self.load(order_id).await?;
        let before = order.status();

        let market_index = match request.market_index {
            Some(index) => index,
            None => {
                self.collaborators
                    .market_index
                    .market_index(order.brief().template_code())
                    .await?
            }
        };
        let factors = BudgetFactors::try_from(request.to_inputs(market_index))?;
        let estimate = self.budget_engine.compute_budget(&factors);
        observability::record_budget_computation(estimate.floored);

        let estimate = order
            .apply_budget(factors, estimate, &self.guarantee_selector)?
            .clone();
        self.persist(&mut order, before).await?;
        tracing::info!(
            order_id = %order_id,
            estimate = %estimate.estimate,
            floored = estimate.floored,
            "Budget updated"
        );
        Ok(estimate)
    }

    /// Attach guarantee terms after checking them against fresh risk intel.
    ///
    /// The effective risk level is the higher of the brief's declared level
    /// and the assessed one.
    ///
    /// # Errors
    ///
    /// Returns `GuaranteeBelowRiskFloor` if the terms are too weak for the
    /// assessed risk, or a lifecycle error if the order is not editable.
    pub async fn select_guarantees(
        &self,
        order_id: &OrderId,
        request: &GuaranteeSelectionRequest,
    ) -> Result<GuaranteeSelection, LifecycleError> {
        let requested = request.to_domain()?;
        let _guard = self.locks.lock(order_id).await;
        let mut order = self.load(order_id).await?;
        let before = order.status();

        let mut risk = self.collaborators.risk_intel.assess(order.brief()).await?;
        risk.risk_level = risk.risk_level.max(order.brief().risk_level());

        let accepted = order
            .select_guarantees(risk, &requested, &self.guarantee_selector)
            .inspect_err(|e| {
                tracing::info!(order_id = %order_id, code = e.code(), "Guarantees rejected");
            })?;
        self.persist(&mut order, before).await?;
        Ok(accepted)
    }

    /// Run a validation pass.
    ///
    /// The pass runs in its own task. Dropping the returned future, or
    /// firing `cancel`, aborts the fan-out and restores the status the order
    /// had before the pass.
    ///
    /// # Errors
    ///
    /// Returns error if validation cannot start, the pass is aborted, or
    /// persistence fails.
    pub async fn validate(
        self: &Arc<Self>,
        order_id: &OrderId,
        cancel: &CancellationToken,
    ) -> Result<ValidationSummary, LifecycleError> {
        let token = cancel.child_token();
        let _abort_on_drop = token.clone().drop_guard();
        let service = Arc::clone(self);
        let order_id = order_id.clone();
        tokio::spawn(async move { service.run_validation(order_id, token).await })
            .await
            .map_err(|e| LifecycleError::TaskFailed {
                message: e.to_string(),
            })?
    }

    /// Publish a validated order.
    ///
    /// # Errors
    ///
    /// Returns `NotValidated` unless the latest validation passed.
    pub async fn publish(&self, order_id: &OrderId) -> Result<PlayerOrder, LifecycleError> {
        let _guard = self.locks.lock(order_id).await;
        let mut order = self.load(order_id).await?;
        let before = order.status();
        order.publish()?;
        self.persist(&mut order, before).await?;
        tracing::info!(order_id = %order_id, "Order published");
        Ok(order)
    }

    /// Withdraw an order from any non-terminal status.
    ///
    /// A validation pass in flight is aborted.
    ///
    /// # Errors
    ///
    /// Returns `OrderClosed` if the order is already completed or cancelled.
    pub async fn cancel(
        &self,
        order_id: &OrderId,
        reason: Option<String>,
    ) -> Result<PlayerOrder, LifecycleError> {
        let _guard = self.locks.lock(order_id).await;
        let mut order = self.load(order_id).await?;
        let before = order.status();
        order.cancel(reason.unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string()))?;
        self.persist(&mut order, before).await?;

        let in_flight = self.in_flight.lock().remove(order_id);
        if let Some(token) = in_flight {
            token.cancel();
        }
        tracing::info!(order_id = %order_id, from = %before, "Order cancelled");
        Ok(order)
    }

    /// Mark a published order as fulfilled.
    ///
    /// # Errors
    ///
    /// Returns error unless the order is published.
    pub async fn complete(&self, order_id: &OrderId) -> Result<PlayerOrder, LifecycleError> {
        let _guard = self.locks.lock(order_id).await;
        let mut order = self.load(order_id).await?;
        let before = order.status();
        order.complete()?;
        self.persist(&mut order, before).await?;
        Ok(order)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Fetch an order, active or archived.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for unknown IDs.
    pub async fn get(&self, order_id: &OrderId) -> Result<PlayerOrder, LifecycleError> {
        self.load(order_id).await
    }

    /// Orders currently in `status`.
    ///
    /// # Errors
    ///
    /// Returns error if the repository query fails.
    pub async fn list_by_status(
        &self,
        status: PlayerOrderStatus,
    ) -> Result<Vec<PlayerOrder>, LifecycleError> {
        Ok(self.repository.find_by_status(status).await?)
    }

    /// Templates offered by the content service.
    ///
    /// # Errors
    ///
    /// Returns error if the catalog cannot be reached.
    pub async fn list_templates(&self) -> Result<Vec<PlayerOrderTemplate>, LifecycleError> {
        Ok(self.collaborators.templates.list_templates().await?)
    }

    // ========================================================================
    // Private Helpers
    // ========================================================================

    async fn run_validation(
        &self,
        order_id: OrderId,
        cancel: CancellationToken,
    ) -> Result<ValidationSummary, LifecycleError> {
        let (request, restore_to) = {
            let _guard = self.locks.lock(&order_id).await;
            let mut order = self.load(&order_id).await?;
            let before = order.status();
            let restore_to = order.begin_validation()?;

            let assessed = match self.collaborators.risk_intel.assess(order.brief()).await {
                Ok(mut profile) => {
                    profile.risk_level = profile.risk_level.max(order.brief().risk_level());
                    if order.refresh_risk_profile(profile) {
                        tracing::warn!(
                            order_id = %order_id,
                            "Guarantees no longer meet the assessed risk and were dropped"
                        );
                    }
                    true
                }
                Err(e) => {
                    tracing::warn!(order_id = %order_id, error = %e, "Risk assessment failed");
                    false
                }
            };
            let mut request = order.validation_request();
            if !assessed {
                request.risk_profile = None;
            }

            self.persist(&mut order, before).await?;
            self.in_flight.lock().insert(order_id.clone(), cancel.clone());
            (request, restore_to)
        };

        let outcome = self.aggregator.validate(request, &cancel).await;
        self.in_flight.lock().remove(&order_id);

        let _guard = self.locks.lock(&order_id).await;
        let mut order = self.load(&order_id).await?;
        let before = order.status();
        if before != PlayerOrderStatus::Validating {
            tracing::info!(
                order_id = %order_id,
                status = %before,
                "Order left validation during the pass; result dropped"
            );
            return Err(ValidationAborted.into());
        }

        match outcome {
            Ok(summary) => {
                let status = order.complete_validation(summary.clone())?;
                self.persist(&mut order, before).await?;
                tracing::info!(
                    order_id = %order_id,
                    status = %status,
                    issues = summary.checklist.len(),
                    "Validation completed"
                );
                Ok(summary)
            }
            Err(aborted) => {
                let status = order.abort_validation(restore_to)?;
                self.persist(&mut order, before).await?;
                tracing::info!(order_id = %order_id, restored = %status, "Validation aborted");
                Err(aborted.into())
            }
        }
    }

    async fn seed_budget(
        &self,
        order: &mut PlayerOrder,
        template: &PlayerOrderTemplate,
    ) -> Result<(), LifecycleError> {
        let market_index = match self
            .collaborators
            .market_index
            .market_index(Some(template.code))
            .await
        {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(
                    template = %template.code,
                    error = %e,
                    "Market index unavailable; draft created without a budget"
                );
                return Ok(());
            }
        };
        let factors = BudgetFactors::try_from(FactorInputs {
            complexity_factors: template.complexity_factors.clone(),
            risk_modifier: template.risk_modifier,
            market_index,
            time_modifier: template.time_modifier,
            bonuses: Vec::new(),
            penalties: Vec::new(),
        })?;
        let estimate = self.budget_engine.compute_budget(&factors);
        observability::record_budget_computation(estimate.floored);
        order.apply_budget(factors, estimate, &self.guarantee_selector)?;
        Ok(())
    }

    async fn load(&self, order_id: &OrderId) -> Result<PlayerOrder, LifecycleError> {
        self.repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| {
                PlayerOrderError::NotFound {
                    order_id: order_id.to_string(),
                }
                .into()
            })
    }

    /// Save, record the transition, then publish drained events.
    async fn persist(
        &self,
        order: &mut PlayerOrder,
        before: PlayerOrderStatus,
    ) -> Result<(), LifecycleError> {
        self.repository.save(order).await?;

        let after = order.status();
        if after != before {
            observability::record_transition(before.as_str(), after.as_str());
        }

        let events = order.drain_events();
        if !events.is_empty() {
            if let Err(e) = self.event_publisher.publish_order_events(events).await {
                tracing::error!(order_id = %order.id(), error = %e, "Failed to publish events");
            }
        }

        match self.repository.count_active().await {
            Ok(count) => observability::update_active_orders(count),
            Err(e) => tracing::warn!(error = %e, "Failed to count active orders"),
        }
        Ok(())
    }
}

fn build_brief(
    request: &CreateDraftRequest,
    template: Option<&PlayerOrderTemplate>,
) -> Result<OrderBrief, PlayerOrderError> {
    let title = request
        .title
        .clone()
        .or_else(|| template.map(|t| t.title.clone()))
        .ok_or_else(|| PlayerOrderError::InvalidBrief {
            field: "title".to_string(),
            message: "a title or a template is required".to_string(),
        })?;

    let mut brief = OrderBrief::new(title)?;
    if let Some(description) = request
        .description
        .clone()
        .or_else(|| template.map(|t| t.description.clone()))
    {
        brief.set_description(description);
    }
    brief.set_template_code(request.template);
    brief.set_zone_ids(request.zone_ids.iter().cloned());
    brief.set_faction_ids(request.faction_ids.iter().cloned());
    if let Some(level) = request.risk_level.or_else(|| template.map(|t| t.risk_level)) {
        brief.set_risk_level(level);
    }
    *brief.deadline_mut() = request.deadline;
    Ok(brief)
}
