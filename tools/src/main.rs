//! commission-calc: headless front-end for the commission engine.
//!
//! Usage:
//!   commission-calc --input request.json [--today 2025-10-15] [--json]
//!   commission-calc --ipc-mode [--delegation 2025-08] [--data-dir ./data]

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use commission_core::{
    clock::DelegationMonth,
    command::FormCommand,
    config::ProductCatalog,
    context::AgentContext,
    engine::{calculate, CommissionResult},
    entry::ContractEntry,
    form::{Applied, FormState},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// One-shot calculation request read from `--input`.
#[derive(serde::Deserialize)]
struct CalcRequest {
    context: AgentContext,
    #[serde(default)]
    entries: Vec<ContractEntry>,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Form { command: FormCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    today:  NaiveDate,
    form:   &'a FormState,
    result: Option<&'a CommissionResult>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json_out = args.iter().any(|a| a == "--json");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let today = match flag_value(&args, "--today") {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("--today expects YYYY-MM-DD, got {s}"))?,
        None => Local::now().date_naive(),
    };

    let catalog = load_catalog(data_dir)?;

    if ipc_mode {
        let delegation = match flag_value(&args, "--delegation") {
            Some(s) => parse_delegation(s)?,
            None => DelegationMonth::new(today.year(), today.month())?,
        };
        return run_ipc_loop(&catalog, FormState::new(delegation, today), today);
    }

    let input = flag_value(&args, "--input")
        .context("either --input <file.json> or --ipc-mode is required")?;
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Cannot read {input}"))?;
    let request: CalcRequest = serde_json::from_str(&content)
        .with_context(|| format!("Cannot parse {input}"))?;

    let result = calculate(&catalog, &request.context, &request.entries, today)?;
    if json_out {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }
    Ok(())
}

fn load_catalog(data_dir: &str) -> Result<ProductCatalog> {
    let path = format!("{data_dir}/products/product_catalog.json");
    if Path::new(&path).exists() {
        ProductCatalog::load(data_dir)
    } else {
        log::info!("{path} not found, using builtin product catalog");
        Ok(ProductCatalog::builtin())
    }
}

fn run_ipc_loop(catalog: &ProductCatalog, mut form: FormState, today: NaiveDate) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut last_result: Option<CommissionResult> = None;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Form { command } => match form.apply(catalog, &command, today) {
                Ok(Applied::CalculateRequested) => match form.calculate(catalog, today) {
                    Ok(result) => last_result = Some(result),
                    Err(e) => {
                        write_error(&mut stdout, &e.to_string())?;
                        continue;
                    }
                },
                Ok(_) => {
                    // Any edit invalidates the last calculation.
                    last_result = None;
                }
                Err(e) => {
                    log::warn!("form command rejected: {e}");
                    write_error(&mut stdout, &e.to_string())?;
                    continue;
                }
            },
        }

        let state = UiState { today, form: &form, result: last_result.as_ref() };
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_summary(result: &CommissionResult) {
    let s = &result.summary;
    let t = &result.totals;

    println!("=== 당월 수당 관련 제반 사항 ===");
    println!("  contract month:         {}", s.contract_month);
    println!("  converted premium:      {}P", won(s.total_converted_raw));
    println!("  expected clawback:      {}P", won(s.expected_clawback_performance));
    println!("  effective converted:    {}P", won(s.effective_converted));
    match s.standard_retention {
        Some(std) => println!("  standard retention:     {std}%"),
        None => println!("  standard retention:     n/a"),
    }
    println!("  current retention:      {}%", s.current_retention);
    println!("  performance rate:       {:.1}%", s.performance_rate_display * 100.0);
    println!("  initial-settlement rate:{:>6.1}%", s.initial_settlement_rate_display * 100.0);
    println!(
        "  strategic count (unit): {}건 ({}원)",
        s.strategic_count,
        won(s.strategic_unit_bonus)
    );
    println!("  guarantee amount:       {}원", won(s.settlement_guarantee_amount));

    for d in &result.diagnostics {
        println!("  {}", d.message_ko());
    }

    println!();
    println!("=== 익월 예상 수수료 ===");
    println!("  recruitment fee:        {}원", won(t.recruitment_fee));
    println!("  performance fee 1:      {}원", won(t.performance_fee_1));
    println!("  initial settlement 2-1: {}원", won(t.initial_settlement_1));
    println!("  strategic bonus:        {}원", won(t.strategic_bonus));
    if t.show_settlement_guarantee {
        println!("  settlement guarantee:   {}원", won(t.settlement_guarantee));
    }
    println!("  TOTAL:                  {}원", won(t.grand_total));

    for e in &result.entries {
        println!();
        println!("--- #{} {} ({}) {}원", e.entry_id, e.product_label, e.payment_term, won(e.premium as f64));
        println!(
            "  year 1: recruitment {} | performance {} | initial settlement {}{}",
            won(e.recruitment_fee),
            won(e.performance_fee[0]),
            won(e.initial_settlement_fee[0]),
            if e.strategic_bonus > 0.0 {
                format!(" | strategic {}", won(e.strategic_bonus))
            } else {
                String::new()
            }
        );
        for year in 1..3 {
            println!(
                "  year {}: retention {}/month | performance {} | initial settlement {}",
                year + 1,
                won(e.monthly_retention_fee[year - 1]),
                won(e.performance_fee[year]),
                won(e.initial_settlement_fee[year]),
            );
        }
    }
}

/// Round to whole won with thousands separators.
fn won(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        out.insert(0, '-');
    }
    out
}

fn parse_delegation(s: &str) -> Result<DelegationMonth> {
    let (year, month) = s
        .split_once('-')
        .with_context(|| format!("--delegation expects YYYY-MM, got {s}"))?;
    Ok(DelegationMonth::new(year.parse()?, month.parse()?)?)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
