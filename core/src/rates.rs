//! Rate and threshold tables.
//!
//! Every table is a monotonic step function: thresholds are inclusive
//! lower bounds and the highest qualifying tier wins.

use crate::types::{ContractMonth, Points, Premium, Won};

/// Share of converted premium allocated to each contract year (60/20/20).
pub const TRANCHE_SPLIT: [f64; 3] = [0.6, 0.2, 0.2];

/// Maximum performance rate the initial-settlement fee tops up to.
pub const INITIAL_SETTLEMENT_MAX_RATE: f64 = 0.75;

/// Effective converted premium needed for the initial-settlement fee.
pub const INITIAL_SETTLEMENT_MIN_CONVERTED: Points = 1_000_000.0;

/// Last contract month of the first-year programmes
/// (initial-settlement fee, settlement guarantee).
pub const FIRST_YEAR_LAST_MONTH: ContractMonth = 12;

/// Monthly retention fees are paid flat over a 12-installment window.
pub const RETENTION_FEE_INSTALLMENTS: f64 = 12.0;

/// Months 1–12 performance tiers: (threshold, rate).
const FIRST_YEAR_TIERS: [(Points, f64); 5] = [
    (10_000_000.0, 0.75),
    (5_000_000.0, 0.72),
    (2_000_000.0, 0.70),
    (1_000_000.0, 0.60),
    (700_000.0, 0.35),
];

/// Thresholds shared by every bracket after month 12.
const LATER_THRESHOLDS: [Points; 3] = [10_000_000.0, 7_000_000.0, 3_000_000.0];

/// Rates for months 13–24, 25–36 and 37+: [≥10M, ≥7M, ≥3M, below].
const MONTHS_13_24_RATES: [f64; 4] = [0.70, 0.65, 0.60, 0.55];
const MONTHS_25_36_RATES: [f64; 4] = [0.75, 0.70, 0.65, 0.60];
const MONTHS_37_PLUS_RATES: [f64; 4] = [0.80, 0.75, 0.70, 0.65];

/// Settlement-guarantee floor by effective converted premium.
const GUARANTEE_BRACKETS: [(Points, Won); 7] = [
    (5_000_000.0, 5_000_000.0),
    (4_000_000.0, 4_500_000.0),
    (3_000_000.0, 4_000_000.0),
    (2_500_000.0, 3_500_000.0),
    (2_000_000.0, 3_000_000.0),
    (1_500_000.0, 2_500_000.0),
    (1_000_000.0, 1_500_000.0),
];

/// Per-unit strategic bonus by summed strategic count.
const STRATEGIC_UNIT_TIERS: [(f64, Won); 4] = [
    (5.0, 70_000.0),
    (3.0, 60_000.0),
    (2.0, 55_000.0),
    (1.0, 50_000.0),
];

/// Standard retention rate for a contract month, in percent.
/// Months 1–2 have no standard.
pub fn standard_retention(month_index: ContractMonth) -> Option<u8> {
    match month_index {
        0..=2  => None,
        3..=6  => Some(93),
        7..=12 => Some(90),
        _      => Some(85),
    }
}

/// Multiplier applied for the distance between an agent's retention
/// and the standard. Rewards over-performance and penalises shortfall.
pub fn retention_factor(user_rate: u8, standard_rate: Option<u8>) -> f64 {
    let Some(standard) = standard_rate else {
        return 1.0;
    };
    let delta = user_rate as i32 - standard as i32;
    if delta >= 10 {
        1.20
    } else if delta >= 5 {
        1.10
    } else if delta >= 0 {
        1.00
    } else if delta > -5 {
        0.85
    } else {
        0.70
    }
}

/// Degrade-only variant of [`retention_factor`], used for the tranche-1
/// percentages shown in the summary. Never exceeds 1.00.
pub fn retention_factor_first_year_display(user_rate: u8, standard_rate: Option<u8>) -> f64 {
    let Some(standard) = standard_rate else {
        return 1.0;
    };
    let delta = user_rate as i32 - standard as i32;
    if delta >= 0 {
        1.00
    } else if delta > -5 {
        0.85
    } else {
        0.70
    }
}

/// Base performance-fee rate (fraction) for a contract month and
/// effective converted premium.
pub fn performance_rate(contract_month: ContractMonth, effective_converted: Points) -> f64 {
    if contract_month <= FIRST_YEAR_LAST_MONTH {
        return FIRST_YEAR_TIERS
            .iter()
            .find(|(threshold, _)| effective_converted >= *threshold)
            .map(|(_, rate)| *rate)
            .unwrap_or(0.0);
    }

    let rates = match contract_month {
        13..=24 => &MONTHS_13_24_RATES,
        25..=36 => &MONTHS_25_36_RATES,
        _       => &MONTHS_37_PLUS_RATES,
    };
    let tier = LATER_THRESHOLDS
        .iter()
        .position(|threshold| effective_converted >= *threshold)
        .unwrap_or(LATER_THRESHOLDS.len());
    rates[tier]
}

/// Strategic-health count contributed by one contract.
pub fn strategic_unit_count(premium: Premium) -> f64 {
    if premium >= 50_000 {
        1.0
    } else if premium >= 30_000 {
        0.5
    } else {
        0.0
    }
}

/// Bonus paid per strategic unit, by the agent's total strategic count.
pub fn strategic_bonus_unit(total_count: f64) -> Won {
    STRATEGIC_UNIT_TIERS
        .iter()
        .find(|(threshold, _)| total_count >= *threshold)
        .map(|(_, unit)| *unit)
        .unwrap_or(0.0)
}

/// Additive bonus to the tranche-1 performance rate (fraction).
pub fn direct_recruit_bonus_points(direct_recruits: u32) -> f64 {
    match direct_recruits {
        0 => 0.0,
        1 => 0.05,
        2 => 0.10,
        _ => 0.15,
    }
}

/// Guaranteed floor before the direct-recruit add-on.
pub fn guarantee_base(effective_converted: Points) -> Won {
    GUARANTEE_BRACKETS
        .iter()
        .find(|(threshold, _)| effective_converted >= *threshold)
        .map(|(_, amount)| *amount)
        .unwrap_or(0.0)
}

/// Guarantee add-on for direct recruits made this month.
pub fn direct_recruit_guarantee_add(direct_recruits: u32) -> Won {
    match direct_recruits {
        0 => 0.0,
        1 => 1_000_000.0,
        _ => 2_000_000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_retention_brackets() {
        assert_eq!(standard_retention(1), None);
        assert_eq!(standard_retention(2), None);
        assert_eq!(standard_retention(3), Some(93));
        assert_eq!(standard_retention(6), Some(93));
        assert_eq!(standard_retention(7), Some(90));
        assert_eq!(standard_retention(12), Some(90));
        assert_eq!(standard_retention(13), Some(85));
        assert_eq!(standard_retention(25), Some(85));
    }

    #[test]
    fn retention_factor_steps() {
        assert_eq!(retention_factor(100, None), 1.0);
        assert_eq!(retention_factor(100, Some(90)), 1.20);
        assert_eq!(retention_factor(95, Some(90)), 1.10);
        assert_eq!(retention_factor(90, Some(90)), 1.00);
        assert_eq!(retention_factor(86, Some(90)), 0.85);
        assert_eq!(retention_factor(85, Some(90)), 0.70);
        assert_eq!(retention_factor(0, Some(93)), 0.70);
    }

    #[test]
    fn display_factor_never_rewards() {
        assert_eq!(retention_factor_first_year_display(100, Some(85)), 1.00);
        assert_eq!(retention_factor_first_year_display(88, Some(90)), 0.85);
        assert_eq!(retention_factor_first_year_display(80, Some(90)), 0.70);
        assert_eq!(retention_factor_first_year_display(0, None), 1.00);
    }

    #[test]
    fn first_year_performance_tiers() {
        assert_eq!(performance_rate(1, 699_999.0), 0.00);
        assert_eq!(performance_rate(1, 700_000.0), 0.35);
        assert_eq!(performance_rate(5, 1_000_000.0), 0.60);
        assert_eq!(performance_rate(12, 2_000_000.0), 0.70);
        assert_eq!(performance_rate(12, 5_000_000.0), 0.72);
        assert_eq!(performance_rate(12, 10_000_000.0), 0.75);
    }

    #[test]
    fn later_performance_brackets_are_disjoint() {
        assert_eq!(performance_rate(13, 0.0), 0.55);
        assert_eq!(performance_rate(24, 3_000_000.0), 0.60);
        assert_eq!(performance_rate(25, 0.0), 0.60);
        assert_eq!(performance_rate(36, 7_000_000.0), 0.70);
        assert_eq!(performance_rate(37, 0.0), 0.65);
        assert_eq!(performance_rate(120, 10_000_000.0), 0.80);
    }

    #[test]
    fn strategic_tables() {
        assert_eq!(strategic_unit_count(29_999), 0.0);
        assert_eq!(strategic_unit_count(30_000), 0.5);
        assert_eq!(strategic_unit_count(50_000), 1.0);

        assert_eq!(strategic_bonus_unit(0.5), 0.0);
        assert_eq!(strategic_bonus_unit(1.0), 50_000.0);
        assert_eq!(strategic_bonus_unit(2.5), 55_000.0);
        assert_eq!(strategic_bonus_unit(3.0), 60_000.0);
        assert_eq!(strategic_bonus_unit(5.0), 70_000.0);
    }

    #[test]
    fn direct_recruit_tables() {
        assert_eq!(direct_recruit_bonus_points(0), 0.0);
        assert_eq!(direct_recruit_bonus_points(1), 0.05);
        assert_eq!(direct_recruit_bonus_points(2), 0.10);
        assert_eq!(direct_recruit_bonus_points(7), 0.15);

        assert_eq!(direct_recruit_guarantee_add(0), 0.0);
        assert_eq!(direct_recruit_guarantee_add(1), 1_000_000.0);
        assert_eq!(direct_recruit_guarantee_add(4), 2_000_000.0);
    }

    #[test]
    fn guarantee_bracket_lower_bounds_are_inclusive() {
        assert_eq!(guarantee_base(999_999.0), 0.0);
        assert_eq!(guarantee_base(1_000_000.0), 1_500_000.0);
        assert_eq!(guarantee_base(1_500_000.0), 2_500_000.0);
        assert_eq!(guarantee_base(2_000_000.0), 3_000_000.0);
        assert_eq!(guarantee_base(2_500_000.0), 3_500_000.0);
        assert_eq!(guarantee_base(3_000_000.0), 4_000_000.0);
        assert_eq!(guarantee_base(4_000_000.0), 4_500_000.0);
        assert_eq!(guarantee_base(9_000_000.0), 5_000_000.0);
    }
}
