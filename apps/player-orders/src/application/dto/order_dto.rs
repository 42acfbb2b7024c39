//! Player order DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_budget::{BudgetEstimate, FactorInputs};
use crate::domain::order_guarantee::{
    EscrowPolicy, GuaranteeError, GuaranteeQuote, GuaranteeSelection, InsuranceTier, RiskLevel,
    RiskProfile,
};
use crate::domain::order_validation::ValidationSummary;
use crate::domain::player_order::{
    OrderBrief, PlayerOrder, PlayerOrderError, PlayerOrderStatus, Publication, TemplateCode,
};
use crate::domain::shared::{FactionId, Money, Patch, Timestamp, ZoneId};

// ============================================================================
// Commands
// ============================================================================

/// Request to open a new draft.
///
/// Either `template` or `title` must be given; explicit fields override the
/// template's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDraftRequest {
    /// Template to start from.
    #[serde(default)]
    pub template: Option<TemplateCode>,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Target zones.
    #[serde(default)]
    pub zone_ids: Vec<ZoneId>,
    /// Target factions.
    #[serde(default)]
    pub faction_ids: Vec<FactionId>,
    /// Declared risk level.
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    /// Deadline.
    #[serde(default)]
    pub deadline: Option<Timestamp>,
}

impl CreateDraftRequest {
    /// Draft with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Draft from a template.
    #[must_use]
    pub fn from_template(template: TemplateCode) -> Self {
        Self {
            template: Some(template),
            ..Self::default()
        }
    }
}

/// Partial update of a brief. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBriefRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description; `null` clears it.
    #[serde(default)]
    pub description: Patch<String>,
    /// Template tag; `null` clears it.
    #[serde(default)]
    pub template: Patch<TemplateCode>,
    /// Replacement zone set.
    #[serde(default)]
    pub zone_ids: Option<Vec<ZoneId>>,
    /// Replacement faction set.
    #[serde(default)]
    pub faction_ids: Option<Vec<FactionId>>,
    /// Declared risk level.
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    /// Deadline; `null` clears it.
    #[serde(default)]
    pub deadline: Patch<Timestamp>,
}

impl UpdateBriefRequest {
    /// True when the request changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && !self.description.is_present()
            && !self.template.is_present()
            && self.zone_ids.is_none()
            && self.faction_ids.is_none()
            && self.risk_level.is_none()
            && !self.deadline.is_present()
    }

    /// Apply the update to a copy of `brief`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBrief` if the new title is rejected.
    pub fn apply_to(&self, brief: &OrderBrief) -> Result<OrderBrief, PlayerOrderError> {
        let mut revised = brief.clone();
        if let Some(title) = &self.title {
            revised.set_title(title.as_str())?;
        }
        let mut description = Some(revised.description().to_string());
        self.description.clone().apply_to(&mut description);
        revised.set_description(description.unwrap_or_default());

        let mut template = revised.template_code();
        self.template.clone().apply_to(&mut template);
        revised.set_template_code(template);

        if let Some(zones) = &self.zone_ids {
            revised.set_zone_ids(zones.iter().cloned());
        }
        if let Some(factions) = &self.faction_ids {
            revised.set_faction_ids(factions.iter().cloned());
        }
        if let Some(level) = self.risk_level {
            revised.set_risk_level(level);
        }
        self.deadline.clone().apply_to(revised.deadline_mut());
        Ok(revised)
    }
}

/// One named complexity weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityFactorDto {
    /// Name.
    pub name: String,
    /// Weight.
    pub weight: Decimal,
}

const fn unit_modifier() -> Decimal {
    Decimal::ONE
}

/// Budget inputs. `market_index` is fetched from the economy service when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetFactorsRequest {
    /// Complexity weights.
    pub complexity_factors: Vec<ComplexityFactorDto>,
    /// Risk multiplier.
    #[serde(default = "unit_modifier")]
    pub risk_modifier: Decimal,
    /// Market index override.
    #[serde(default)]
    pub market_index: Option<Decimal>,
    /// Urgency multiplier.
    #[serde(default = "unit_modifier")]
    pub time_modifier: Decimal,
    /// Flat additions.
    #[serde(default)]
    pub bonuses: Vec<Decimal>,
    /// Flat deductions.
    #[serde(default)]
    pub penalties: Vec<Decimal>,
}

impl BudgetFactorsRequest {
    /// Raw factor inputs with the resolved market index.
    #[must_use]
    pub fn to_inputs(&self, market_index: Decimal) -> FactorInputs {
        FactorInputs {
            complexity_factors: self
                .complexity_factors
                .iter()
                .map(|f| (f.name.clone(), f.weight))
                .collect(),
            risk_modifier: self.risk_modifier,
            market_index,
            time_modifier: self.time_modifier,
            bonuses: self.bonuses.clone(),
            penalties: self.penalties.clone(),
        }
    }
}

/// Requested guarantee terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuaranteeSelectionRequest {
    /// Escrow policy.
    pub escrow_policy: EscrowPolicy,
    /// Insurance tier.
    #[serde(default)]
    pub insurance_tier: InsuranceTier,
    /// Reputation bond.
    #[serde(default)]
    pub reputation_bond: bool,
    /// Performance bonus.
    #[serde(default)]
    pub performance_bonus: Decimal,
}

impl GuaranteeSelectionRequest {
    /// Convert to domain types.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGuaranteeTerms` for a negative bonus.
    pub fn to_domain(&self) -> Result<GuaranteeSelection, GuaranteeError> {
        GuaranteeSelection::try_new(
            self.escrow_policy,
            self.insurance_tier,
            self.reputation_bond,
            Money::new(self.performance_bonus),
        )
    }
}

impl From<&GuaranteeSelection> for GuaranteeSelectionRequest {
    fn from(selection: &GuaranteeSelection) -> Self {
        Self {
            escrow_policy: selection.escrow_policy(),
            insurance_tier: selection.insurance_tier(),
            reputation_bond: selection.reputation_bond(),
            performance_bonus: selection.performance_bonus().amount(),
        }
    }
}

/// Request to cancel an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    /// Reason shown to subscribers.
    #[serde(default)]
    pub reason: Option<String>,
}

// ============================================================================
// Views
// ============================================================================

/// Guarantees attached to an order.
#[derive(Debug, Clone, Serialize)]
pub struct GuaranteesDto {
    /// Accepted selection.
    pub selection: GuaranteeSelection,
    /// Price of the selection, once a budget exists.
    pub quote: Option<GuaranteeQuote>,
}

/// DTO representing a player order.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerOrderDto {
    /// Order ID.
    pub order_id: String,
    /// Status.
    pub status: PlayerOrderStatus,
    /// Brief.
    pub brief: OrderBrief,
    /// Budget estimate.
    pub budget: Option<BudgetEstimate>,
    /// Guarantees.
    pub guarantees: Option<GuaranteesDto>,
    /// Last assessed risk.
    pub risk_profile: Option<RiskProfile>,
    /// Latest validation.
    pub latest_validation: Option<ValidationSummary>,
    /// Publication details.
    pub publication: Option<Publication>,
    /// Created at.
    pub created_at: Timestamp,
    /// Updated at.
    pub updated_at: Timestamp,
}

impl PlayerOrderDto {
    /// Create from domain `PlayerOrder`.
    #[must_use]
    pub fn from_order(order: &PlayerOrder) -> Self {
        Self {
            order_id: order.id().to_string(),
            status: order.status(),
            brief: order.brief().clone(),
            budget: order.budget().map(|b| b.estimate.clone()),
            guarantees: order.guarantees().map(|g| GuaranteesDto {
                selection: g.selection.clone(),
                quote: g.quote.clone(),
            }),
            risk_profile: order.risk_profile().cloned(),
            latest_validation: order.latest_validation().cloned(),
            publication: order.publication().copied(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

impl From<&PlayerOrder> for PlayerOrderDto {
    fn from(order: &PlayerOrder) -> Self {
        Self::from_order(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_brief_distinguishes_null_from_absent() {
        let mut brief = OrderBrief::new("Escort the convoy").unwrap();
        brief.set_description("Through the badlands");
        *brief.deadline_mut() = Some(Timestamp::now());

        let keep: UpdateBriefRequest = serde_json::from_str(r#"{"title": "Escort the caravan"}"#).unwrap();
        let revised = keep.apply_to(&brief).unwrap();
        assert_eq!(revised.title(), "Escort the caravan");
        assert_eq!(revised.description(), "Through the badlands");
        assert!(revised.deadline().is_some());

        let clear: UpdateBriefRequest =
            serde_json::from_str(r#"{"deadline": null, "description": null}"#).unwrap();
        let revised = clear.apply_to(&brief).unwrap();
        assert!(revised.deadline().is_none());
        assert_eq!(revised.description(), "");
    }

    #[test]
    fn empty_update_is_detected() {
        let update: UpdateBriefRequest = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
        let update: UpdateBriefRequest = serde_json::from_str(r#"{"template": null}"#).unwrap();
        assert!(!update.is_empty());
    }

    #[test]
    fn budget_request_defaults_modifiers_to_one() {
        let request: BudgetFactorsRequest = serde_json::from_str(
            r#"{"complexity_factors": [{"name": "combat", "weight": "3"}]}"#,
        )
        .unwrap();
        assert_eq!(request.risk_modifier, Decimal::ONE);
        assert_eq!(request.time_modifier, Decimal::ONE);
        assert!(request.market_index.is_none());
        let inputs = request.to_inputs(Decimal::TEN);
        assert_eq!(inputs.market_index, Decimal::TEN);
        assert_eq!(inputs.complexity_factors.len(), 1);
    }

    #[test]
    fn negative_bonus_is_rejected() {
        let request = GuaranteeSelectionRequest {
            escrow_policy: EscrowPolicy::Standard,
            insurance_tier: InsuranceTier::Uninsured,
            reputation_bond: false,
            performance_bonus: Decimal::NEGATIVE_ONE,
        };
        assert!(matches!(
            request.to_domain(),
            Err(GuaranteeError::InvalidGuaranteeTerms { .. })
        ));
    }

    #[test]
    fn order_dto_reflects_draft() {
        let order = PlayerOrder::create_draft(OrderBrief::new("Escort the convoy").unwrap());
        let dto = PlayerOrderDto::from_order(&order);
        assert_eq!(dto.order_id, order.id().to_string());
        assert_eq!(dto.status, PlayerOrderStatus::Draft);
        assert!(dto.budget.is_none());
    }
}
