use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ledger_core::DetailField;
use ledger_forms::WithholdingField;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Withholding calculator and transaction detail editor.
#[derive(Debug, Parser)]
#[command(name = "ledger", version)]
pub struct Cli {
    /// TOML settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,ledger_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project extra monthly withholding and year-end refunds.
    Withholding(WithholdingArgs),
    /// Edit the detail rows of a transaction and show their totals.
    Details(DetailsArgs),
}

#[derive(Debug, Default, Args)]
pub struct WithholdingArgs {
    /// Submitted form as a `name,value` CSV. Flags below override its fields.
    #[arg(long)]
    pub form: Option<PathBuf>,

    #[arg(long)]
    pub monthly_state_burden: Option<String>,
    #[arg(long)]
    pub monthly_federal_burden: Option<String>,
    #[arg(long)]
    pub state_burden_ytd: Option<String>,
    #[arg(long)]
    pub federal_burden_ytd: Option<String>,
    #[arg(long)]
    pub state_paid_ytd: Option<String>,
    #[arg(long)]
    pub federal_paid_ytd: Option<String>,
    #[arg(long)]
    pub monthly_state_payment: Option<String>,
    #[arg(long)]
    pub monthly_federal_payment: Option<String>,

    /// Whole months left in the tax year, at least 1.
    #[arg(long)]
    pub months_remaining: Option<String>,

    /// Date used to count the months left when none are given. Defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,

    /// Write the results as a `name,value` CSV keyed by display target id.
    #[arg(long)]
    pub emit: Option<PathBuf>,
}

impl WithholdingArgs {
    /// Form fields given on the command line.
    pub fn overrides(&self) -> Vec<(WithholdingField, &str)> {
        let flags = [
            (WithholdingField::MonthlyStateBurden, &self.monthly_state_burden),
            (WithholdingField::MonthlyFederalBurden, &self.monthly_federal_burden),
            (WithholdingField::StateBurdenYtd, &self.state_burden_ytd),
            (WithholdingField::FederalBurdenYtd, &self.federal_burden_ytd),
            (WithholdingField::StatePaidYtd, &self.state_paid_ytd),
            (WithholdingField::FederalPaidYtd, &self.federal_paid_ytd),
            (WithholdingField::MonthlyStatePayment, &self.monthly_state_payment),
            (WithholdingField::MonthlyFederalPayment, &self.monthly_federal_payment),
            (WithholdingField::MonthsRemaining, &self.months_remaining),
        ];

        flags
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .collect()
    }
}

#[derive(Debug, Default, Args)]
pub struct DetailsArgs {
    /// Submitted form as a `name,value` CSV.
    #[arg(long, conflicts_with = "rows")]
    pub form: Option<PathBuf>,

    /// Detail rows as an `account,debit,credit,notes` CSV.
    #[arg(long)]
    pub rows: Option<PathBuf>,

    /// Form prefix of the rows. Overrides the config file.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Row limit. Overrides the config file.
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Delete the row at this index of the table as loaded. Repeatable;
    /// applied before any other edit.
    #[arg(long, value_name = "INDEX")]
    pub remove: Vec<usize>,

    /// Append this many rows after removals.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    pub add: usize,

    /// Change one control, applied last. Repeatable.
    #[arg(long, value_name = "INDEX:FIELD=VALUE", value_parser = parse_field_edit)]
    pub set: Vec<FieldEdit>,

    /// Write the resulting submission as a `name,value` CSV.
    #[arg(long)]
    pub emit: Option<PathBuf>,
}

/// One `--set` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub index: usize,
    pub field: DetailField,
    pub value: String,
}

/// Parses `INDEX:FIELD=VALUE`. The value may be empty or contain `=`.
pub fn parse_field_edit(arg: &str) -> Result<FieldEdit, String> {
    let (target, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX:FIELD=VALUE, got '{arg}'"))?;
    let (index, field) = target
        .split_once(':')
        .ok_or_else(|| format!("expected INDEX:FIELD before '=', got '{target}'"))?;

    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row index '{index}': {e}"))?;
    let field = DetailField::parse(field.trim()).ok_or_else(|| {
        format!("unknown field '{field}', expected one of account, debit, credit, notes")
    })?;

    Ok(FieldEdit {
        index,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_field_edit_splits_on_first_separator() {
        let edit = parse_field_edit("3:notes=a=b").unwrap();

        assert_eq!(
            edit,
            FieldEdit {
                index: 3,
                field: DetailField::Notes,
                value: "a=b".to_string(),
            }
        );
    }

    #[test]
    fn parse_field_edit_allows_clearing_a_value() {
        let edit = parse_field_edit("0:account=").unwrap();

        assert_eq!(edit.field, DetailField::Account);
        assert_eq!(edit.value, "");
    }

    #[test]
    fn parse_field_edit_rejects_unknown_field() {
        let err = parse_field_edit("0:DELETE=on").unwrap_err();

        assert!(err.contains("unknown field"), "got {err}");
    }

    #[test]
    fn parse_field_edit_rejects_missing_index() {
        assert!(parse_field_edit("debit=5").is_err());
        assert!(parse_field_edit("x:debit=5").is_err());
    }

    #[test]
    fn details_flags_collect_in_order() {
        let cli = Cli::try_parse_from([
            "ledger", "details", "--remove", "2", "--remove", "0", "--add", "3", "--set",
            "1:debit=10",
        ])
        .unwrap();

        let Command::Details(args) = cli.command else {
            panic!("expected details command");
        };
        assert_eq!(args.remove, vec![2, 0]);
        assert_eq!(args.add, 3);
        assert_eq!(args.set.len(), 1);
    }

    #[test]
    fn form_and_rows_conflict() {
        let result =
            Cli::try_parse_from(["ledger", "details", "--form", "a.csv", "--rows", "b.csv"]);

        assert!(result.is_err());
    }

    #[test]
    fn withholding_overrides_list_only_given_flags() {
        let cli = Cli::try_parse_from([
            "ledger",
            "withholding",
            "--monthly-state-burden",
            "500",
            "--months-remaining",
            "6",
            "--as-of",
            "2026-07-01",
        ])
        .unwrap();

        let Command::Withholding(args) = cli.command else {
            panic!("expected withholding command");
        };
        assert_eq!(
            args.overrides(),
            vec![
                (WithholdingField::MonthlyStateBurden, "500"),
                (WithholdingField::MonthsRemaining, "6"),
            ]
        );
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2026, 7, 1));
    }
}
