//! Ineligibility reasons.
//!
//! A component that pays nothing always carries the reasons why.
//! Every failing condition is reported, not just the first.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    PerformanceFee,
    InitialSettlement,
    SettlementGuarantee,
}

impl Component {
    pub fn label(&self) -> &'static str {
        match self {
            Component::PerformanceFee      => "Performance fee",
            Component::InitialSettlement   => "Initial-settlement fee",
            Component::SettlementGuarantee => "Settlement-guarantee fee",
        }
    }

    /// Label as printed on the Korean form.
    pub fn label_ko(&self) -> &'static str {
        match self {
            Component::PerformanceFee      => "성과수수료",
            Component::InitialSettlement   => "초기정착수수료2",
            Component::SettlementGuarantee => "정착보장 수수료",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Effective converted premium below the 700k performance floor.
    BelowPerformanceFloor,
    /// Effective converted premium below 1,000,000.
    BelowInitialSettlementThreshold,
    /// Effective converted premium (and direct recruits) reach no bracket.
    BelowGuaranteeBracket,
    StandardActivityNotMet,
    /// Contract month 13 or later.
    BeyondFirstYear,
    RetentionBelowStandard,
    /// Base rate already at the initial-settlement maximum.
    BaseRateAtMaximum,
    /// Earnings after clawback already cover the guaranteed floor.
    EarningsExceedGuarantee,
}

impl Reason {
    pub fn label_ko(&self) -> &'static str {
        match self {
            Reason::BelowPerformanceFloor           => "유효환산 70만원 미만",
            Reason::BelowInitialSettlementThreshold => "유효환산 100만원 미만",
            Reason::BelowGuaranteeBracket           => "유효환산 구간 미달",
            Reason::StandardActivityNotMet          => "표준활동 미달성",
            Reason::BeyondFirstYear                 => "위임 13차월 이상",
            Reason::RetentionBelowStandard          => "당월 유지율 기준 미달",
            Reason::BaseRateAtMaximum               => "성과수수료 지급률 최고구간",
            Reason::EarningsExceedGuarantee         => "제반수수료가 보장금액 이상",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::BelowPerformanceFloor =>
                "effective converted premium below 700,000",
            Reason::BelowInitialSettlementThreshold =>
                "effective converted premium below 1,000,000",
            Reason::BelowGuaranteeBracket =>
                "effective converted premium below the lowest guarantee bracket",
            Reason::StandardActivityNotMet =>
                "standard activity not met",
            Reason::BeyondFirstYear =>
                "contract month is 13 or later",
            Reason::RetentionBelowStandard =>
                "current retention below standard",
            Reason::BaseRateAtMaximum =>
                "base performance rate already at maximum",
            Reason::EarningsExceedGuarantee =>
                "earnings after clawback already meet the guarantee",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub component: Component,
    pub reasons:   Vec<Reason>,
}

impl Diagnostic {
    pub fn has(&self, reason: Reason) -> bool {
        self.reasons.contains(&reason)
    }

    pub fn message_ko(&self) -> String {
        let reasons: Vec<&str> = self.reasons.iter().map(Reason::label_ko).collect();
        format!("＊ {} 비대상: {}", self.component.label_ko(), reasons.join(", "))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons: Vec<String> = self.reasons.iter().map(Reason::to_string).collect();
        write!(f, "{} not paid: {}", self.component.label(), reasons.join(", "))
    }
}

/// Collects reasons per component, dropping components with none.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticsBuilder {
    out: Vec<Diagnostic>,
}

impl DiagnosticsBuilder {
    pub(crate) fn component(&mut self, component: Component, checks: &[(bool, Reason)]) {
        let reasons: Vec<Reason> = checks
            .iter()
            .filter(|(failed, _)| *failed)
            .map(|(_, reason)| *reason)
            .collect();
        if !reasons.is_empty() {
            self.out.push(Diagnostic { component, reasons });
        }
    }

    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_reasons_are_concatenated() {
        let d = Diagnostic {
            component: Component::InitialSettlement,
            reasons: vec![Reason::StandardActivityNotMet, Reason::BelowInitialSettlementThreshold],
        };
        assert_eq!(
            d.to_string(),
            "Initial-settlement fee not paid: standard activity not met, \
             effective converted premium below 1,000,000"
        );
        assert_eq!(
            d.message_ko(),
            "＊ 초기정착수수료2 비대상: 표준활동 미달성, 유효환산 100만원 미만"
        );
    }

    #[test]
    fn builder_skips_components_without_failures() {
        let mut b = DiagnosticsBuilder::default();
        b.component(Component::PerformanceFee, &[(false, Reason::BelowPerformanceFloor)]);
        b.component(
            Component::SettlementGuarantee,
            &[(true, Reason::BeyondFirstYear), (false, Reason::StandardActivityNotMet)],
        );
        let out = b.finish();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].reasons, vec![Reason::BeyondFirstYear]);
    }
}
