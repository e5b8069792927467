//! Command handlers. Each takes its parsed arguments and writes its report
//! to `out`, returning the computed value so callers and tests can inspect it.

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use ledger_core::calculations::common::format_amount;
use ledger_core::{
    DetailRow, DetailTable, ManagementForm, MonthsRemaining, WithholdingCalculator,
    WithholdingResults,
};
use ledger_forms::{FormData, csv_loader, formset, withholding_form};
use tracing::{debug, info};

use crate::cli::{DetailsArgs, WithholdingArgs};
use crate::config::FormsetConfig;

// ─── withholding ─────────────────────────────────────────────────────────────

/// Runs the withholding calculator.
///
/// Fields come from `--form` when given, then individual flags override
/// them. Without a month count the months left in the year of `--as-of`
/// (or `today`) are used. With `--emit` the results are also written as a
/// `name,value` CSV keyed by display target id.
pub fn run_withholding(
    args: &WithholdingArgs,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<WithholdingResults> {
    let mut data = match &args.form {
        Some(path) => FormData::from_csv_file(path)
            .with_context(|| format!("failed to read form '{}'", path.display()))?,
        None => FormData::new(),
    };
    for (field, value) in args.overrides() {
        data.set(field.as_str(), value);
    }

    let fallback = MonthsRemaining::through_year_end(args.as_of.unwrap_or(today));
    let input = withholding_form::read_inputs(&data, Some(fallback))?;
    debug!(months_remaining = input.months_remaining.get(), "withholding inputs read");

    let results = WithholdingCalculator::new().calculate(&input);
    for (target, text) in withholding_form::render(&results) {
        writeln!(out, "{:<16}{:>12}  {}", target.id(), text, target.label())?;
    }

    if let Some(path) = &args.emit {
        let file = File::create(path)
            .with_context(|| format!("cannot create '{}'", path.display()))?;
        withholding_form::render_form_data(&results)
            .write_csv(file)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        info!(path = %path.display(), "withholding results written");
    }

    info!("withholding projection written");
    Ok(results)
}

// ─── details ─────────────────────────────────────────────────────────────────

fn load_table(
    args: &DetailsArgs,
    prefix: &str,
    max_rows: usize,
) -> Result<DetailTable> {
    if let Some(path) = &args.form {
        let data = FormData::from_csv_file(path)
            .with_context(|| format!("failed to read form '{}'", path.display()))?;
        return formset::decode(&data, prefix, max_rows)
            .with_context(|| format!("invalid formset in '{}'", path.display()));
    }

    if let Some(path) = &args.rows {
        let rows = csv_loader::load_from_file(path)
            .with_context(|| format!("failed to load rows from '{}'", path.display()))?;
        if rows.len() > max_rows {
            bail!(
                "'{}' holds {} rows, more than the limit of {max_rows}",
                path.display(),
                rows.len()
            );
        }
        let management = ManagementForm {
            max_num_forms: max_rows,
            ..ManagementForm::default()
        };
        return Ok(DetailTable::with_management(prefix, rows, management));
    }

    Ok(DetailTable::for_new_transaction(prefix, max_rows))
}

/// Applies `--remove`, then `--add`, then `--set` to `table`.
///
/// Removal indices refer to the table as loaded; rows are removed from
/// the highest index down so earlier removals do not shift later ones.
/// Stops at the first edit that cannot be applied; edits before it stay.
pub fn apply_edits(
    table: &mut DetailTable,
    args: &DetailsArgs,
) -> Result<()> {
    let mut removals = args.remove.clone();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for index in removals {
        table
            .remove_row(index)
            .with_context(|| format!("cannot remove row {index}"))?;
    }
    for _ in 0..args.add {
        table.add_row().context("cannot add row")?;
    }
    for edit in &args.set {
        table
            .set_field(edit.index, edit.field, edit.value.as_str())
            .with_context(|| format!("cannot set {} of row {}", edit.field.as_str(), edit.index))?;
    }
    Ok(())
}

fn write_table(
    table: &DetailTable,
    out: &mut impl Write,
) -> Result<()> {
    let management = table.management();
    writeln!(
        out,
        "{}: {} rows (TOTAL_FORMS={}, MIN_NUM_FORMS={}, MAX_NUM_FORMS={}), delete {}",
        table.prefix(),
        table.len(),
        management.total_forms,
        management.min_num_forms,
        management.max_num_forms,
        if table.delete_enabled() { "enabled" } else { "disabled" },
    )?;
    writeln!(out, "{:>4}  {:<12}{:>12}{:>12}  notes", "#", "account", "debit", "credit")?;
    for row in table.rows().iter().filter(|r| !r.is_blank()) {
        write_row(row, out)?;
    }

    let totals = table.totals();
    let balance = if totals.is_balanced() {
        "balanced".to_string()
    } else {
        format!("out of balance by {}", format_amount(totals.difference()))
    };
    writeln!(
        out,
        "{:>4}  {:<12}{:>12}{:>12}  {balance}",
        "",
        "total",
        totals.debit_display(),
        totals.credit_display(),
    )?;
    Ok(())
}

fn write_row(
    row: &DetailRow,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(
        out,
        "{:>4}  {:<12}{:>12}{:>12}  {}",
        row.index,
        row.account.as_deref().unwrap_or("-"),
        row.debit,
        row.credit,
        row.notes
    )?;
    Ok(())
}

/// Loads a detail table, applies the requested edits and reports it.
///
/// Blank rows are counted but not listed. With `--emit` the resulting
/// submission is written as a `name,value` CSV.
pub fn run_details(
    args: &DetailsArgs,
    settings: &FormsetConfig,
    out: &mut impl Write,
) -> Result<DetailTable> {
    let prefix = args.prefix.as_deref().unwrap_or(&settings.prefix);
    let max_rows = args.max_rows.unwrap_or(settings.max_rows);

    let mut table = load_table(args, prefix, max_rows)?;
    apply_edits(&mut table, args)?;
    write_table(&table, out)?;

    if let Some(path) = &args.emit {
        let file = File::create(path)
            .with_context(|| format!("cannot create '{}'", path.display()))?;
        formset::encode(&table)
            .write_csv(file)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        info!(path = %path.display(), rows = table.len(), "submission written");
    }

    Ok(table)
}
