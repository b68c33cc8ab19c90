use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use gstbill::application::engine::BillingEngine;
use gstbill::config::Config;
use gstbill::domain::document_number::{DocumentKind, PrefixPolicy, next_number_with_policy};
use gstbill::domain::fiscal::FiscalYear;
use gstbill::domain::money::{Money, amount_in_words};
use gstbill::domain::statement::build_statement;
use gstbill::domain::tax::SupplyContext;
use gstbill::infrastructure::in_memory::InMemorySequenceStore;
use gstbill::interfaces::csv::breakdown_writer::BreakdownWriter;
use gstbill::interfaces::csv::ledger_reader::LedgerReader;
use gstbill::interfaces::csv::line_item_reader::LineItemReader;
use gstbill::interfaces::csv::statement_writer::StatementWriter;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file (home state, tax rates, numbering series)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the GST breakdown and totals for a CSV of line items
    Totals {
        /// Line items CSV: description,quantity,rate,tax_rate
        input: PathBuf,

        /// State of the buyer (place of supply)
        #[arg(long)]
        buyer_state: String,

        /// State of the supplier; defaults to the configured home state
        #[arg(long)]
        supplier_state: Option<String>,

        /// Also print the grand total in words
        #[arg(long)]
        words: bool,
    },
    /// Print the document number that follows the last issued one
    NextNumber {
        /// Last issued number; omit for the first document of a series
        #[arg(long)]
        last: Option<String>,

        /// Series to use from the configuration
        #[arg(long, value_enum, default_value_t = KindArg::Invoice)]
        kind: KindArg,

        /// Prefix overriding the configured series
        #[arg(long)]
        prefix: Option<String>,

        /// Zero-padding width overriding the configured series
        #[arg(long)]
        width: Option<usize>,

        /// Restart at 1 when the last number carries a different prefix
        #[arg(long)]
        restart_on_mismatch: bool,
    },
    /// Build a statement of accounts from a ledger CSV
    Statement {
        /// Ledger CSV: date,kind,reference,amount
        input: PathBuf,

        /// Balance carried in from before the first entry
        #[arg(long, default_value_t = Decimal::ZERO)]
        opening: Decimal,

        /// Restrict to the fiscal year starting in April of this year
        #[arg(long)]
        fiscal_year: Option<i32>,

        /// Restrict to the current fiscal year
        #[arg(long, conflicts_with = "fiscal_year")]
        current: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Estimate,
    Invoice,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Estimate => DocumentKind::Estimate,
            KindArg::Invoice => DocumentKind::Invoice,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_ref()).into_diagnostic()?;
    let engine = BillingEngine::new(config, Box::new(InMemorySequenceStore::new()));

    match cli.command {
        Command::Totals {
            input,
            buyer_state,
            supplier_state,
            words,
        } => {
            let ctx = match supplier_state {
                Some(supplier) => SupplyContext::new(supplier, buyer_state),
                None => engine.supply_context(&buyer_state),
            };

            let file = File::open(input).into_diagnostic()?;
            let mut items = Vec::new();
            for item_result in LineItemReader::new(file).items() {
                let checked = item_result.and_then(|item| engine.check_item(&item).map(|_| item));
                match checked {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        debug!(error = ?e, "skipping line item");
                        eprintln!("Error reading line item: {}", e);
                    }
                }
            }

            let totals = engine.totals_for(&ctx, &items).into_diagnostic()?;
            info!(lines = items.len(), jurisdiction = ?ctx.jurisdiction(), "computed totals");

            let stdout = io::stdout();
            let mut writer = BreakdownWriter::new(stdout.lock());
            writer.write_totals(&totals).into_diagnostic()?;
            let mut out = writer.into_inner().into_diagnostic()?;
            if words {
                writeln!(out, "{}", amount_in_words(totals.grand_total)).into_diagnostic()?;
            }
        }
        Command::NextNumber {
            last,
            kind,
            prefix,
            width,
            restart_on_mismatch,
        } => {
            let config = engine.config();
            let series = config.series(kind.into());
            let prefix = prefix.unwrap_or_else(|| series.prefix.clone());
            let width = width.unwrap_or(series.width);
            let policy = if restart_on_mismatch {
                PrefixPolicy::Restart
            } else {
                config.on_prefix_mismatch
            };

            let next = next_number_with_policy(last.as_deref(), &prefix, width, policy)
                .into_diagnostic()?;
            println!("{}", next);
        }
        Command::Statement {
            input,
            opening,
            fiscal_year,
            current,
        } => {
            let period = if current {
                Some(FiscalYear::containing(Local::now().date_naive()))
            } else {
                fiscal_year.map(FiscalYear::starting)
            };

            let file = File::open(input).into_diagnostic()?;
            let mut entries = Vec::new();
            for entry_result in LedgerReader::new(file).entries() {
                match entry_result {
                    Ok(entry) => entries.push(entry),
                    Err(e) => {
                        debug!(error = ?e, "skipping ledger entry");
                        eprintln!("Error reading ledger entry: {}", e);
                    }
                }
            }

            let statement = build_statement(Money::new(opening), &entries, period);
            let stdout = io::stdout();
            StatementWriter::new(stdout.lock())
                .write_statement(&statement)
                .into_diagnostic()?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable. Filter with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
