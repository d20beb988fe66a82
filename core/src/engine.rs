//! The commission engine — contract entries + agent status in,
//! commission breakdown out.
//!
//! DERIVATION ORDER (fixed):
//!   1. Converted premium per entry, summed raw.
//!   2. Effective converted = raw − expected clawback performance (≥ 0).
//!   3. Contract month from delegation month and `today`.
//!   4. Base performance rate from (contract month, effective converted).
//!   5. Initial-settlement uplift (0.75 − base) when eligible.
//!   6. Retention multipliers at the current month, 13th and 25th.
//!   7. Direct-recruit bonus points (tranche 1 only).
//!   8. Strategic-health count and unit bonus.
//!   9. Per-entry decomposition into tranches.
//!  10. Settlement guarantee against clawback-adjusted earnings.
//!
//! RULES:
//!   - `compute` is pure: no clock, no globals, no I/O besides logging.
//!   - Inputs are validated by `calculate` before `compute` runs;
//!     `compute` itself never fails.
//!   - Monetary aggregates are clamped to zero from below.

use crate::{
    clock::contract_month,
    config::{ProductCatalog, ProductConfig},
    context::AgentContext,
    diagnostics::{Component, Diagnostic, DiagnosticsBuilder, Reason},
    entry::ContractEntry,
    error::{CalcError, CalcResult},
    rates::{
        direct_recruit_bonus_points, direct_recruit_guarantee_add, guarantee_base,
        performance_rate, retention_factor, retention_factor_first_year_display,
        standard_retention, strategic_bonus_unit, strategic_unit_count,
        FIRST_YEAR_LAST_MONTH, INITIAL_SETTLEMENT_MAX_RATE,
        INITIAL_SETTLEMENT_MIN_CONVERTED, RETENTION_FEE_INSTALLMENTS, TRANCHE_SPLIT,
    },
    types::{ContractMonth, EntryId, Points, Premium, Won},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One contract resolved against its catalog product.
#[derive(Debug, Clone, Copy)]
pub struct PricedEntry<'a> {
    pub entry:   &'a ContractEntry,
    pub product: &'a ProductConfig,
}

/// The current-month particulars shown above the totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub contract_month:               ContractMonth,
    pub total_converted_raw:          Points,
    pub expected_clawback_performance: Points,
    pub effective_converted:          Points,
    pub standard_retention:           Option<u8>,
    pub current_retention:            u8,
    pub base_rate:                    f64,
    /// Tranche-1 performance rate as displayed: degrade-only retention
    /// factor plus direct-recruit points.
    pub performance_rate_display:     f64,
    /// Tranche-1 initial-settlement rate as displayed, degrade-only.
    pub initial_settlement_rate_display: f64,
    pub direct_recruit_bonus_points:  f64,
    pub strategic_count:              f64,
    pub strategic_unit_bonus:         Won,
    pub settlement_guarantee_amount:  Won,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryBreakdown {
    pub entry_id:         EntryId,
    pub product_id:       String,
    pub product_label:    String,
    pub payment_term:     String,
    pub premium:          Premium,
    pub strategic_health: bool,
    pub converted:        Points,
    /// Converted premium split 60/20/20 over contract years 1–3.
    pub tranches:         [Points; 3],
    pub recruitment_fee:  Won,
    pub performance_fee:  [Won; 3],
    pub initial_settlement_fee: [Won; 3],
    /// Paid monthly: installments 13–24, then 25–36.
    pub monthly_retention_fee: [Won; 2],
    pub strategic_bonus:  Won,
}

/// Next month's expected payout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub recruitment_fee:      Won,
    pub performance_fee_1:    Won,
    pub initial_settlement_1: Won,
    pub strategic_bonus:      Won,
    pub settlement_guarantee: Won,
    /// The guarantee line only exists for contract months 1–12.
    pub show_settlement_guarantee: bool,
    pub grand_total:          Won,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommissionResult {
    pub summary:     Summary,
    pub entries:     Vec<EntryBreakdown>,
    pub totals:      Totals,
    pub diagnostics: Vec<Diagnostic>,
}

impl CommissionResult {
    pub fn diagnostic(&self, component: Component) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.component == component)
    }

    /// One human-readable line per unpaid component.
    pub fn reason_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::to_string).collect()
    }
}

/// Validate inputs, resolve products, derive the contract month from
/// `today` and run the engine.
pub fn calculate(
    catalog: &ProductCatalog,
    ctx: &AgentContext,
    entries: &[ContractEntry],
    today: NaiveDate,
) -> CalcResult<CommissionResult> {
    ctx.validate()?;
    let priced: Vec<PricedEntry> = entries
        .iter()
        .map(|entry| {
            entry.validate(catalog)?;
            let product = catalog.get(&entry.product_id)?;
            Ok::<_, CalcError>(PricedEntry { entry, product })
        })
        .collect::<CalcResult<_>>()?;
    let month = contract_month(ctx.delegation, today)?;
    Ok(compute(ctx, month, &priced))
}

/// Aggregate inputs every entry is priced against.
#[derive(Debug, Clone)]
struct Derivation {
    total_converted_raw: Points,
    effective_converted: Points,
    standard_now:        Option<u8>,
    base_rate:           f64,
    initial_eligible:    bool,
    delta_rate:          f64,
    f1:                  f64,
    f13:                 f64,
    f25:                 f64,
    f1_display:          f64,
    dr:                  f64,
    strategic_count:     f64,
    strategic_unit:      Won,
}

fn converted_premium(p: &PricedEntry<'_>) -> Points {
    p.entry.premium as f64 * p.product.conversion_factor()
}

fn strategic_count_of(p: &PricedEntry<'_>) -> f64 {
    if p.product.strategic_health {
        strategic_unit_count(p.entry.premium)
    } else {
        0.0
    }
}

fn derive(ctx: &AgentContext, month: ContractMonth, entries: &[PricedEntry<'_>]) -> Derivation {
    let total_converted_raw: Points = entries.iter().map(converted_premium).sum();
    let effective_converted = (total_converted_raw - ctx.expected_clawback_performance).max(0.0);
    let base_rate = performance_rate(month, effective_converted);

    let initial_eligible = ctx.standard_activity
        && month <= FIRST_YEAR_LAST_MONTH
        && effective_converted >= INITIAL_SETTLEMENT_MIN_CONVERTED;
    let delta_rate = if initial_eligible {
        (INITIAL_SETTLEMENT_MAX_RATE - base_rate).max(0.0)
    } else {
        0.0
    };

    let standard_now = standard_retention(month);
    let r = &ctx.retention;
    let strategic_count: f64 = entries.iter().map(strategic_count_of).sum();

    let d = Derivation {
        total_converted_raw,
        effective_converted,
        standard_now,
        base_rate,
        initial_eligible,
        delta_rate,
        f1:  retention_factor(r.current, standard_now),
        f13: retention_factor(r.at_13th, standard_retention(13)),
        f25: retention_factor(r.at_25th, standard_retention(25)),
        f1_display: retention_factor_first_year_display(r.current, standard_now),
        dr: direct_recruit_bonus_points(ctx.direct_recruits),
        strategic_count,
        strategic_unit: strategic_bonus_unit(strategic_count),
    };
    log::debug!(
        "month={month} converted_raw={:.0} effective={:.0} base_rate={:.2} delta_rate={:.2} f=({:.2},{:.2},{:.2})",
        d.total_converted_raw, d.effective_converted, d.base_rate, d.delta_rate, d.f1, d.f13, d.f25
    );
    d
}

fn price_entry(d: &Derivation, p: &PricedEntry<'_>) -> EntryBreakdown {
    let converted = converted_premium(p);
    let [y1, y2, y3] = TRANCHE_SPLIT.map(|share| converted * share);

    let strategic_bonus = if p.product.strategic_health {
        (strategic_count_of(p) * d.strategic_unit).floor()
    } else {
        0.0
    };

    EntryBreakdown {
        entry_id:         p.entry.id,
        product_id:       p.product.product_id.clone(),
        product_label:    p.product.label.clone(),
        payment_term:     p.entry.payment_term.clone(),
        premium:          p.entry.premium,
        strategic_health: p.product.strategic_health,
        converted,
        tranches:         [y1, y2, y3],
        recruitment_fee:  y1,
        performance_fee: [
            y1 * (d.base_rate * d.f1 + d.dr),
            y2 * d.base_rate * d.f13,
            y3 * d.base_rate * d.f25,
        ],
        initial_settlement_fee: [
            y1 * d.delta_rate * d.f1,
            y2 * d.delta_rate * d.f13,
            y3 * d.delta_rate * d.f25,
        ],
        monthly_retention_fee: [
            y2 / RETENTION_FEE_INSTALLMENTS,
            y3 / RETENTION_FEE_INSTALLMENTS,
        ],
        strategic_bonus,
    }
}

/// Run the engine on pre-validated inputs. Total and deterministic.
pub fn compute(
    ctx: &AgentContext,
    month: ContractMonth,
    entries: &[PricedEntry<'_>],
) -> CommissionResult {
    let d = derive(ctx, month, entries);
    let breakdowns: Vec<EntryBreakdown> = entries.iter().map(|p| price_entry(&d, p)).collect();

    let recruitment_fee: Won = breakdowns.iter().map(|b| b.recruitment_fee).sum();
    let performance_fee_1: Won = breakdowns.iter().map(|b| b.performance_fee[0]).sum();
    let initial_settlement_1: Won = breakdowns.iter().map(|b| b.initial_settlement_fee[0]).sum();
    let strategic_bonus: Won = breakdowns.iter().map(|b| b.strategic_bonus).sum();

    // ── Settlement guarantee ───────────────────────────────────
    let in_first_year = month <= FIRST_YEAR_LAST_MONTH;
    let guarantee = guarantee_base(d.effective_converted)
        + direct_recruit_guarantee_add(ctx.direct_recruits);
    let retention_ok = d.standard_now.is_none_or(|s| ctx.retention.current >= s);
    let guarantee_eligible =
        in_first_year && ctx.standard_activity && retention_ok && guarantee > 0.0;

    let base_comp = recruitment_fee + performance_fee_1 + initial_settlement_1;
    let base_comp_after_clawback = (base_comp - ctx.expected_clawback_amount).max(0.0);
    let settlement_guarantee = if guarantee_eligible {
        (guarantee - base_comp_after_clawback).max(0.0)
    } else {
        0.0
    };

    let grand_total = recruitment_fee
        + performance_fee_1
        + initial_settlement_1
        + strategic_bonus
        + if in_first_year { settlement_guarantee } else { 0.0 };

    // ── Diagnostics ────────────────────────────────────────────
    let mut diag = DiagnosticsBuilder::default();
    diag.component(
        Component::PerformanceFee,
        &[(
            performance_fee_1 <= 0.0 && d.base_rate <= 0.0,
            Reason::BelowPerformanceFloor,
        )],
    );
    if d.initial_eligible {
        diag.component(
            Component::InitialSettlement,
            &[(d.delta_rate <= 0.0, Reason::BaseRateAtMaximum)],
        );
    } else {
        diag.component(
            Component::InitialSettlement,
            &[
                (!ctx.standard_activity, Reason::StandardActivityNotMet),
                (!in_first_year, Reason::BeyondFirstYear),
                (
                    d.effective_converted < INITIAL_SETTLEMENT_MIN_CONVERTED,
                    Reason::BelowInitialSettlementThreshold,
                ),
            ],
        );
    }
    if settlement_guarantee <= 0.0 {
        diag.component(
            Component::SettlementGuarantee,
            &[
                (guarantee <= 0.0, Reason::BelowGuaranteeBracket),
                (!ctx.standard_activity, Reason::StandardActivityNotMet),
                (!in_first_year, Reason::BeyondFirstYear),
                (!retention_ok, Reason::RetentionBelowStandard),
                (guarantee_eligible, Reason::EarningsExceedGuarantee),
            ],
        );
    }

    let result = CommissionResult {
        summary: Summary {
            contract_month: month,
            total_converted_raw: d.total_converted_raw,
            expected_clawback_performance: ctx.expected_clawback_performance,
            effective_converted: d.effective_converted,
            standard_retention: d.standard_now,
            current_retention: ctx.retention.current,
            base_rate: d.base_rate,
            performance_rate_display: d.base_rate * d.f1_display + d.dr,
            initial_settlement_rate_display: d.delta_rate * d.f1_display,
            direct_recruit_bonus_points: d.dr,
            strategic_count: d.strategic_count,
            strategic_unit_bonus: d.strategic_unit,
            settlement_guarantee_amount: guarantee,
        },
        entries: breakdowns,
        totals: Totals {
            recruitment_fee,
            performance_fee_1,
            initial_settlement_1,
            strategic_bonus,
            settlement_guarantee,
            show_settlement_guarantee: in_first_year,
            grand_total,
        },
        diagnostics: diag.finish(),
    };

    log::info!(
        "commission: month={month} entries={} total={:.0} unpaid_components={}",
        result.entries.len(),
        result.totals.grand_total,
        result.diagnostics.len()
    );
    result
}
