use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::fmt::{format_amount, format_percent, truncate};
use crate::assistant::{self, AssistantRequest, AssistantResponse, ChatMessage};
use crate::budget::{CategoryStatus, DashboardSummary};
use crate::categorize::RuleTable;
use crate::import::{CsvImporter, ImportBatch};
use crate::models::BudgetCategory;
use crate::store::{FinanceStore, KeyValueStore};

pub(crate) fn as_cli<S: KeyValueStore>(
    args: &[String],
    store: &mut FinanceStore<S>,
    rules: &RuleTable,
) -> Result<()> {
    let result = match args[1].as_str() {
        "import" | "i" => cli_import(&args[2..], store, rules),
        "summary" | "s" => cli_summary(store),
        "budget" | "b" => cli_budget(store),
        "set-budget" => cli_set_budget(&args[2..], store),
        "transactions" | "t" => cli_transactions(&args[2..], store),
        "export" => cli_export(&args[2..], store),
        "ask" => cli_ask(&args[2..], store),
        "categorize" => cli_categorize(&args[2..], rules),
        "rules" => {
            cli_rules(rules);
            Ok(())
        }
        "clear" => {
            store.clear();
            println!("Cleared all stored data");
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pennywise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            Err(anyhow::anyhow!("Unknown command: {other}"))
        }
    };

    for event in store.take_diagnostics() {
        eprintln!("Warning: {event}");
    }
    result
}

pub(crate) fn print_usage() {
    println!("PennyWise: personal finance dashboard core");
    println!();
    println!("Usage: pennywise <command>");
    println!();
    println!("Commands:");
    println!("  import <file.csv>...          Import one or more CSV files");
    println!("  summary                       Show spending against the monthly budget");
    println!("  budget                        Show per-category budget status");
    println!("  set-budget <monthly>          Set the monthly budget");
    println!("    --category <name>=<amount>  Set a category allocation (repeatable)");
    println!("  transactions                  List stored transactions");
    println!("    --search <text>             Only descriptions containing <text>");
    println!("    --category <name>           Only transactions in <name>");
    println!("  export [path]                 Export transactions to CSV");
    println!("  ask <question>                Ask the assistant about your spending");
    println!("  categorize <description>      Show the category a description gets");
    println!("  rules                         List the keyword rules in priority order");
    println!("  clear                         Delete all stored data");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_import<S: KeyValueStore>(
    args: &[String],
    store: &mut FinanceStore<S>,
    rules: &RuleTable,
) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: pennywise import <file.csv>...");
    }

    let importer = CsvImporter::with_rules(rules.clone());
    let mut failed = 0;
    for file in args {
        let batch: ImportBatch = match importer.parse_file(Path::new(file)) {
            Ok(batch) => batch,
            Err(e) => {
                eprintln!("{file}: {e}");
                failed += 1;
                continue;
            }
        };

        let count = batch.transactions.len();
        let data = store.append_transactions(batch.transactions);
        if batch.skipped_rows > 0 {
            println!(
                "{file}: Imported {count} transactions ({} rows skipped)",
                batch.skipped_rows
            );
        } else {
            println!("{file}: Imported {count} transactions");
        }
        tracing::debug!(file = %file, total = data.transactions().len(), "file imported");
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} files could not be imported", args.len());
    }
    Ok(())
}

fn cli_summary<S: KeyValueStore>(store: &mut FinanceStore<S>) -> Result<()> {
    let data = store.load();
    let summary = DashboardSummary::from_data(&data);

    println!("PennyWise summary");
    println!("{}", "─".repeat(40));
    println!("  Monthly budget: {}", format_amount(data.monthly_budget()));
    println!("  Total spent:    {}", format_amount(summary.total_spent));
    println!("  Remaining:      {}", format_amount(summary.remaining));
    println!("  Avg per day:    {}", format_amount(summary.avg_daily));
    println!("  Transactions:   {}", summary.transaction_count);
    match &summary.top_category {
        Some((name, amount)) => println!("  Top category:   {name} ({})", format_amount(*amount)),
        None => println!("  Top category:   none"),
    }
    if summary.over_budget {
        println!();
        println!("Over budget by {}", format_amount(-summary.remaining));
    }
    Ok(())
}

fn cli_budget<S: KeyValueStore>(store: &mut FinanceStore<S>) -> Result<()> {
    let data = store.load();

    println!(
        "{:<20} {:>12} {:>12} {:>12} {:>6}",
        "Category", "Allocated", "Spent", "Remaining", "Used"
    );
    println!("{}", "─".repeat(66));
    for status in CategoryStatus::all(&data) {
        println!(
            "{:<20} {:>12} {:>12} {:>12} {:>6}{}",
            truncate(&status.name, 20),
            format_amount(status.allocated),
            format_amount(status.spent),
            format_amount(status.remaining),
            format_percent(status.percent_used),
            if status.is_over_budget { "  over" } else { "" },
        );
    }
    println!();
    println!("Monthly budget: {}", format_amount(data.monthly_budget()));
    Ok(())
}

fn cli_set_budget<S: KeyValueStore>(args: &[String], store: &mut FinanceStore<S>) -> Result<()> {
    let monthly = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .ok_or_else(|| {
            anyhow::anyhow!("Usage: pennywise set-budget <monthly> [--category <name>=<amount>]...")
        })?;
    let monthly = parse_money(monthly)?;
    let allocations = parse_allocations(&args[1..])?;

    let data = store.load();
    let mut categories = data.budget_categories().to_vec();
    for (name, allocated) in allocations {
        match categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.allocated = allocated,
            None => categories.push(BudgetCategory::new(name, allocated)),
        }
    }
    // Categories added here start with the spend already on file.
    crate::budget::recompute_spent(data.transactions(), &mut categories);

    let data = store.replace_budget(monthly, categories);
    println!(
        "Monthly budget set to {} across {} categories",
        format_amount(data.monthly_budget()),
        data.budget_categories().len()
    );
    Ok(())
}

fn cli_transactions<S: KeyValueStore>(args: &[String], store: &mut FinanceStore<S>) -> Result<()> {
    let search = flag_value(args, "--search");
    let category = flag_value(args, "--category");

    let data = store.load();
    let shown: Vec<_> = data
        .transactions()
        .iter()
        .filter(|t| t.matches(search, category))
        .collect();

    if shown.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<12} {:<32} {:<20} {:>12}",
        "Date", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(79));
    for txn in &shown {
        let amount = if txn.is_income() {
            txn.amount
        } else {
            -txn.amount
        };
        println!(
            "{:<12} {:<32} {:<20} {:>12}",
            truncate(&txn.date, 12),
            truncate(&txn.description, 32),
            truncate(&txn.category, 20),
            format_amount(amount),
        );
    }
    println!();
    println!("{} of {} transactions", shown.len(), data.transactions().len());
    if let Some(budget) =
        category.and_then(|name| BudgetCategory::find_by_name(data.budget_categories(), name))
    {
        println!(
            "{}: {} spent of {}",
            budget.name,
            format_amount(budget.spent),
            format_amount(budget.allocated)
        );
    }
    Ok(())
}

fn cli_export<S: KeyValueStore>(args: &[String], store: &mut FinanceStore<S>) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/pennywise-export.csv")
        });

    let data = store.load();
    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    let count = crate::import::export_transactions(data.transactions(), file)?;
    println!("Exported {count} transactions to {output_path}");
    Ok(())
}

fn cli_ask<S: KeyValueStore>(args: &[String], store: &mut FinanceStore<S>) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: pennywise ask <question>");
    }
    let question = args.join(" ");

    let request = AssistantRequest {
        messages: vec![ChatMessage::user(&question)],
        transactions: store.load().transactions().to_vec(),
    };
    match assistant::respond(&request) {
        AssistantResponse::Message { message } => {
            println!("{message}");
            Ok(())
        }
        AssistantResponse::Error { error, details } => anyhow::bail!("{error}: {details}"),
    }
}

fn cli_categorize(args: &[String], rules: &RuleTable) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: pennywise categorize <description>");
    }
    println!("{}", rules.categorize(&args.join(" ")));
    Ok(())
}

fn cli_rules(rules: &RuleTable) {
    for (i, rule) in rules.rules().iter().enumerate() {
        println!(
            "{:>2}. {:<20} {}",
            i + 1,
            rule.category.as_str(),
            rule.keywords().join(", ")
        );
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_money(raw: &str) -> Result<Decimal> {
    let value = Decimal::from_str(raw.trim().trim_start_matches('$'))
        .with_context(|| format!("Invalid amount: {raw}"))?;
    if value.is_sign_negative() {
        anyhow::bail!("Amount must not be negative: {raw}");
    }
    Ok(value)
}

/// Collect every `--category <name>=<amount>` pair.
fn parse_allocations(args: &[String]) -> Result<Vec<(String, Decimal)>> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg != "--category" {
            anyhow::bail!("Unexpected argument: {arg}");
        }
        let pair = iter
            .next()
            .ok_or_else(|| anyhow::anyhow!("--category needs <name>=<amount>"))?;
        let (name, amount) = pair
            .rsplit_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected <name>=<amount>, got: {pair}"))?;
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Category name is empty in: {pair}");
        }
        out.push((name.to_string(), parse_money(amount)?));
    }
    Ok(out)
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
