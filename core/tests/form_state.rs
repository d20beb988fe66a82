//! Front-end form state driven by FormCommand.

use chrono::NaiveDate;
use commission_core::{
    clock::DelegationMonth,
    command::FormCommand,
    config::ProductCatalog,
    context::RetentionInputs,
    error::CalcError,
    form::{Applied, FormState},
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
}

fn new_form() -> FormState {
    FormState::new(DelegationMonth::new(2025, 8).unwrap(), today())
}

#[test]
fn new_form_seeds_retention_for_current_month() {
    let form = new_form();
    // Month 5: standard 93; later installments anchored at 85.
    assert_eq!(
        form.context.retention,
        RetentionInputs { current: 93, at_13th: 85, at_25th: 85 }
    );
    assert!(form.entries.is_empty());
}

#[test]
fn delegation_change_reseeds_retention() {
    let catalog = ProductCatalog::builtin();
    let mut form = new_form();
    form.apply(
        &catalog,
        &FormCommand::SetRetention { current: 70, at_13th: 60, at_25th: 55 },
        today(),
    )
    .unwrap();

    // Same delegation month: sliders keep the agent's values.
    form.apply(&catalog, &FormCommand::SetDelegation { year: 2025, month: 8 }, today())
        .unwrap();
    assert_eq!(form.context.retention.current, 70);

    // Month 1 has no standard, so the current slider resets to 0.
    form.apply(&catalog, &FormCommand::SetDelegation { year: 2025, month: 12 }, today())
        .unwrap();
    assert_eq!(
        form.context.retention,
        RetentionInputs { current: 0, at_13th: 85, at_25th: 85 }
    );
}

#[test]
fn commands_build_and_edit_entries() {
    let catalog = ProductCatalog::builtin();
    let mut form = new_form();

    let added = form
        .apply(&catalog, &FormCommand::AddEntry { product_id: "health_2504".into() }, today())
        .unwrap();
    assert_eq!(added, Applied::EntryAdded(1));
    form.apply(&catalog, &FormCommand::AddEntry { product_id: "health_2504".into() }, today())
        .unwrap();

    form.apply(&catalog, &FormCommand::SetPremium { id: 1, premium: 60_000 }, today())
        .unwrap();
    form.apply(
        &catalog,
        &FormCommand::SetProduct { id: 2, product_id: "whole_life_700_2506".into() },
        today(),
    )
    .unwrap();
    form.apply(
        &catalog,
        &FormCommand::SetPaymentTerm { id: 2, payment_term: "30년".into() },
        today(),
    )
    .unwrap();

    let entries = form.entries.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].premium, 60_000);
    assert_eq!(entries[1].product_id, "whole_life_700_2506");
    assert_eq!(entries[1].payment_term, "30년");

    form.apply(&catalog, &FormCommand::RemoveEntry { id: 1 }, today()).unwrap();
    assert_eq!(form.entries.entries()[0].id, 2);
}

#[test]
fn rejected_command_leaves_state_untouched() {
    let catalog = ProductCatalog::builtin();
    let mut form = new_form();
    let before = form.clone();

    let err = form
        .apply(&catalog, &FormCommand::SetDirectRecruits { count: 150 }, today())
        .unwrap_err();
    assert!(matches!(err, CalcError::DirectRecruitsOutOfRange { value: 150 }));

    let err = form
        .apply(
            &catalog,
            &FormCommand::SetRetention { current: 101, at_13th: 85, at_25th: 85 },
            today(),
        )
        .unwrap_err();
    assert!(matches!(err, CalcError::RetentionOutOfRange { .. }));

    assert!(form
        .apply(&catalog, &FormCommand::SetDelegation { year: 2026, month: 1 }, today())
        .is_err());
    assert!(form
        .apply(&catalog, &FormCommand::SetClawback { performance: -5.0, amount: 0.0 }, today())
        .is_err());

    assert_eq!(form, before);
}

#[test]
fn calculate_command_runs_on_a_snapshot() {
    let catalog = ProductCatalog::builtin();
    let mut form = new_form();
    for cmd in [
        FormCommand::AddEntry { product_id: "health_2504".into() },
        FormCommand::SetPremium { id: 1, premium: 60_000 },
        FormCommand::SetStandardActivity { achieved: true },
    ] {
        form.apply(&catalog, &cmd, today()).unwrap();
    }

    assert_eq!(
        form.apply(&catalog, &FormCommand::Calculate, today()).unwrap(),
        Applied::CalculateRequested
    );
    let result = form.calculate(&catalog, today()).unwrap();
    assert_eq!(result.summary.contract_month, 5);
    assert_eq!(result.totals.strategic_bonus, 50_000.0);
}

#[test]
fn commands_round_trip_through_json() {
    let cmd: FormCommand =
        serde_json::from_str(r#"{"cmd":"set_premium","id":3,"premium":45000}"#).unwrap();
    assert_eq!(cmd, FormCommand::SetPremium { id: 3, premium: 45_000 });

    let calc: FormCommand = serde_json::from_str(r#"{"cmd":"calculate"}"#).unwrap();
    assert_eq!(calc, FormCommand::Calculate);
}
