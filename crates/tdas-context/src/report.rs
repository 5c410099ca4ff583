use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use tdas_models::Table;

const SAMPLE_ROWS: usize = 5;

/// Columns printed for each sample trade row, when present.
const TRADE_SAMPLE_COLUMNS: [&str; 6] = [
    "PortfolioName",
    "TradeTypeName",
    "SecurityType",
    "Name",
    "Quantity",
    "Price",
];

/// Columns printed for each sample holding row, when present.
const HOLDING_SAMPLE_COLUMNS: [&str; 6] = [
    "ShortName",
    "PortfolioName",
    "SecurityTypeName",
    "SecName",
    "Qty",
    "PL_YTD",
];

/// Build the data context report over the loaded tables.
///
/// Pure and deterministic: identical inputs produce byte-identical
/// output. Either table may be absent or empty, which skips that whole
/// section; a missing column skips only the aggregation steps that need
/// it. Malformed numeric cells never fail the report, they just
/// contribute nothing to the sums.
pub fn summarize(trades: Option<&Table>, holdings: Option<&Table>) -> String {
    let mut summary = String::from("=== TRADING DATA SUMMARY ===\n\n");

    if let Some(trades) = trades.filter(|t| !t.is_empty()) {
        push_trades_section(&mut summary, trades);
    }
    if let Some(holdings) = holdings.filter(|t| !t.is_empty()) {
        push_holdings_section(&mut summary, holdings);
    }

    summary
}

fn push_trades_section(out: &mut String, trades: &Table) {
    out.push_str("--- TRADES DATA ---\n");
    out.push_str(&format!("Total number of trades: {}\n", trades.len()));
    out.push_str(&format!("Columns: {}\n\n", trades.columns().join(", ")));

    if trades.has_column("PortfolioName") {
        out.push_str("Trades count by portfolio:\n");
        for (portfolio, count) in count_by(trades, "PortfolioName") {
            out.push_str(&format!("  - {portfolio}: {count} trades\n"));
        }
        out.push('\n');

        out.push_str(&format!(
            "Unique portfolios in trades: {}\n\n",
            distinct_values(trades, "PortfolioName").join(", ")
        ));
    }

    out.push_str("Sample trades (first 5 rows):\n");
    for idx in 0..trades.len().min(SAMPLE_ROWS) {
        out.push_str(&format!("\nTrade {}:\n", idx + 1));
        for col in TRADE_SAMPLE_COLUMNS {
            if let Some(value) = trades.value(idx, col) {
                out.push_str(&format!("  {col}: {value}\n"));
            }
        }
    }
    out.push('\n');
}

fn push_holdings_section(out: &mut String, holdings: &Table) {
    out.push_str("--- HOLDINGS DATA ---\n");
    out.push_str(&format!("Total number of holdings: {}\n", holdings.len()));
    out.push_str(&format!("Columns: {}\n\n", holdings.columns().join(", ")));

    if holdings.has_column("PortfolioName") {
        out.push_str("Holdings count by portfolio:\n");
        for (portfolio, count) in count_by(holdings, "PortfolioName") {
            out.push_str(&format!("  - {portfolio}: {count} holdings\n"));
        }
        out.push('\n');
    }

    if holdings.has_column("ShortName") {
        out.push_str("Holdings count by fund (ShortName):\n");
        for (fund, count) in count_by(holdings, "ShortName") {
            out.push_str(&format!("  - {fund}: {count} holdings\n"));
        }
        out.push('\n');
    }

    if holdings.has_column("ShortName") && holdings.has_column("PL_YTD") {
        let sums = sum_by(holdings, "ShortName", "PL_YTD");

        out.push_str("Year-to-Date Profit & Loss (PL_YTD) by fund:\n");
        for (fund, total) in sorted_descending(&sums) {
            out.push_str(&format!("  - {fund}: {}\n", format_amount(total)));
        }
        out.push('\n');

        if let (Some((best, best_total)), Some((worst, worst_total))) =
            (max_entry(&sums), min_entry(&sums))
        {
            out.push_str(&format!(
                "Best performing fund: {best} with PL_YTD of {}\n",
                format_amount(best_total)
            ));
            out.push_str(&format!(
                "Worst performing fund: {worst} with PL_YTD of {}\n\n",
                format_amount(worst_total)
            ));
        }
    }

    if holdings.has_column("PortfolioName") && holdings.has_column("PL_YTD") {
        let sums = sum_by(holdings, "PortfolioName", "PL_YTD");
        out.push_str("Year-to-Date Profit & Loss (PL_YTD) by portfolio:\n");
        for (portfolio, total) in sorted_descending(&sums) {
            out.push_str(&format!("  - {portfolio}: {}\n", format_amount(total)));
        }
        out.push('\n');
    }

    if holdings.has_column("ShortName") {
        out.push_str(&format!(
            "Unique funds (ShortName): {}\n",
            distinct_values(holdings, "ShortName").join(", ")
        ));
    }
    if holdings.has_column("PortfolioName") {
        out.push_str(&format!(
            "Unique portfolios: {}\n\n",
            distinct_values(holdings, "PortfolioName").join(", ")
        ));
    }

    out.push_str("Sample holdings (first 5 rows):\n");
    for idx in 0..holdings.len().min(SAMPLE_ROWS) {
        out.push_str(&format!("\nHolding {}:\n", idx + 1));
        for col in HOLDING_SAMPLE_COLUMNS {
            if let Some(value) = holdings.value(idx, col) {
                out.push_str(&format!("  {col}: {value}\n"));
            }
        }
    }
    out.push('\n');
}

/// Per-value row counts for a column, keyed ascending. Rows with an empty
/// cell are excluded from the grouping.
fn count_by(table: &Table, column: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    if let Some(values) = table.column_values(column) {
        for value in values {
            if !value.is_empty() {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Distinct non-empty values of a column, sorted ascending.
pub fn distinct_values(table: &Table, column: &str) -> Vec<String> {
    count_by(table, column).into_keys().collect()
}

/// Per-key sums of a numeric column, keyed ascending. Every non-empty key
/// gets an entry; cells that fail numeric coercion contribute zero.
fn sum_by(table: &Table, key_column: &str, value_column: &str) -> BTreeMap<String, Decimal> {
    let mut sums = BTreeMap::new();
    let (Some(keys), Some(values)) = (
        table.column_values(key_column),
        table.column_values(value_column),
    ) else {
        return sums;
    };

    for (key, cell) in keys.into_iter().zip(values) {
        if key.is_empty() {
            continue;
        }
        let amount = parse_decimal(cell).unwrap_or(Decimal::ZERO);
        *sums.entry(key.to_string()).or_insert(Decimal::ZERO) += amount;
    }

    sums
}

/// Sum of all numeric cells in a column. `None` when the column is
/// absent; unparseable cells contribute zero.
pub fn column_total(table: &Table, column: &str) -> Option<Decimal> {
    let values = table.column_values(column)?;
    Some(
        values
            .into_iter()
            .filter_map(parse_decimal)
            .sum::<Decimal>(),
    )
}

/// Coerce a raw cell to a number. Unparseable values become `None`.
fn parse_decimal(cell: &str) -> Option<Decimal> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Entries ordered by value descending. The sort is stable over the
/// ascending-key map iteration, so equal sums keep ascending key order.
fn sorted_descending(sums: &BTreeMap<String, Decimal>) -> Vec<(&str, Decimal)> {
    let mut entries: Vec<(&str, Decimal)> =
        sums.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Largest entry; ties go to the first key in ascending order.
fn max_entry(sums: &BTreeMap<String, Decimal>) -> Option<(&str, Decimal)> {
    let mut best: Option<(&str, Decimal)> = None;
    for (key, value) in sums {
        if best.map_or(true, |(_, current)| *value > current) {
            best = Some((key.as_str(), *value));
        }
    }
    best
}

/// Smallest entry; ties go to the first key in ascending order.
fn min_entry(sums: &BTreeMap<String, Decimal>) -> Option<(&str, Decimal)> {
    let mut worst: Option<(&str, Decimal)> = None;
    for (key, value) in sums {
        if worst.map_or(true, |(_, current)| *value < current) {
            worst = Some((key.as_str(), *value));
        }
    }
    worst
}

/// Format an amount with thousands separators and two decimal places
/// (`1234567.5` -> `1,234,567.50`). Rounds half-even.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let text = format!("{rounded:.2}");
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}
