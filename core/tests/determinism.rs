//! Same inputs, same result — byte for byte.
//!
//! The engine holds no state between calls. Any divergence here means
//! hidden state crept in.

use chrono::NaiveDate;
use commission_core::{
    clock::DelegationMonth,
    config::ProductCatalog,
    context::{AgentContext, RetentionInputs},
    engine::calculate,
    entry::ContractEntry,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

fn random_inputs(rng: &mut Pcg64Mcg, catalog: &ProductCatalog) -> (AgentContext, Vec<ContractEntry>) {
    let mut ctx = AgentContext::new(
        DelegationMonth::new(rng.gen_range(2022..=2025), rng.gen_range(1..=12)).unwrap(),
    );
    ctx.standard_activity = rng.gen_bool(0.5);
    ctx.retention = RetentionInputs {
        current: rng.gen_range(0..=100),
        at_13th: rng.gen_range(50..=100),
        at_25th: rng.gen_range(50..=100),
    };
    ctx.expected_clawback_performance = rng.gen_range(0..2_000_000) as f64;
    ctx.expected_clawback_amount = rng.gen_range(0..1_000_000) as f64;
    ctx.direct_recruits = rng.gen_range(0..4);

    let products = catalog.products();
    let entries = (1..=rng.gen_range(0..6))
        .map(|id| {
            let p = &products[rng.gen_range(0..products.len())];
            ContractEntry {
                id,
                product_id: p.product_id.clone(),
                payment_term: p.payment_terms[rng.gen_range(0..p.payment_terms.len())].clone(),
                premium: rng.gen_range(0..1_500_000),
            }
        })
        .collect();
    (ctx, entries)
}

#[test]
fn repeated_calculation_is_identical() {
    const SEED: u64 = 0xC0FF_EE15_600D;
    let _ = env_logger::builder().is_test(true).try_init();
    let catalog = ProductCatalog::builtin();
    let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let mut rng = Pcg64Mcg::seed_from_u64(SEED);

    for case in 0..200 {
        let (ctx, entries) = random_inputs(&mut rng, &catalog);

        let a = calculate(&catalog, &ctx, &entries, today).expect("run a");
        let b = calculate(&catalog, &ctx, &entries, today).expect("run b");

        assert_eq!(a, b, "case {case}: results diverged");
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap(),
            "case {case}: serialized results diverged"
        );
    }
}

#[test]
fn entry_order_does_not_change_totals() {
    let catalog = ProductCatalog::builtin();
    let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let mut rng = Pcg64Mcg::seed_from_u64(17);

    for _ in 0..100 {
        let (ctx, entries) = random_inputs(&mut rng, &catalog);
        let mut reversed = entries.clone();
        reversed.reverse();

        let a = calculate(&catalog, &ctx, &entries, today).unwrap();
        let b = calculate(&catalog, &ctx, &reversed, today).unwrap();

        assert_eq!(a.summary.base_rate, b.summary.base_rate);
        assert_eq!(a.summary.strategic_count, b.summary.strategic_count);
        assert!((a.totals.grand_total - b.totals.grand_total).abs() < 1e-3);
        assert_eq!(a.diagnostics, b.diagnostics);
    }
}
