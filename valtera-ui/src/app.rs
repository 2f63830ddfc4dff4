//! Command handlers behind the `valtera` binary.
//!
//! Each handler restores the calculator's saved fields, applies any field
//! flags, computes and presents, then saves the fields back. Saving is best
//! effort and never fails a command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use valtera_core::calculations::FrankingError;
use valtera_core::db::{DbConfig, MemoryRepository, MemoryRepositoryFactory, RepositoryRegistry};
use valtera_core::forms::{CompoundForm, FrankingForm, TaxForm};
use valtera_core::persistence::{load_or_default, save_persisted};
use valtera_core::{CalculatorRepository, FinancialYear, RepositoryError};
use valtera_db_sqlite::SqliteRepositoryFactory;

use crate::chart::Chart;
use crate::controllers::{CompoundController, FrankingController, Outcome, TaxController};

/// Registry with every backend this binary ships: `sqlite` and `memory`.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry.register(Box::new(MemoryRepositoryFactory));
    registry
}

/// Opens the configured storage. When it cannot be opened the commands run
/// against an in-process store holding the reference table, and inputs are
/// not kept between runs.
pub async fn open_repository(
    registry: &RepositoryRegistry,
    config: &DbConfig,
) -> Box<dyn CalculatorRepository> {
    match registry.create(config).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::warn!(
                backend = %config.backend,
                error = %e,
                "storage unavailable, inputs will not be saved"
            );
            Box::new(MemoryRepository::new())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CalculatorKind {
    Compound,
    Franking,
    Tax,
}

/// Field overrides for the compound projector. Values are taken verbatim,
/// exactly as if typed into the field.
#[derive(Debug, Clone, Default, Args)]
pub struct CompoundArgs {
    /// Starting balance
    #[arg(long, allow_hyphen_values = true)]
    pub initial: Option<String>,

    /// Contribution added at the end of each month
    #[arg(long, allow_hyphen_values = true)]
    pub monthly: Option<String>,

    /// Projection horizon in years
    #[arg(long, allow_hyphen_values = true)]
    pub years: Option<String>,

    /// Expected annual return, percent
    #[arg(long = "return", allow_hyphen_values = true)]
    pub annual_return: Option<String>,

    /// Expected annual inflation, percent
    #[arg(long, allow_hyphen_values = true)]
    pub inflation: Option<String>,
}

impl CompoundArgs {
    pub fn apply(
        &self,
        form: &mut CompoundForm,
    ) {
        overwrite(&mut form.initial, &self.initial);
        overwrite(&mut form.monthly, &self.monthly);
        overwrite(&mut form.years, &self.years);
        overwrite(&mut form.annual_return, &self.annual_return);
        overwrite(&mut form.inflation, &self.inflation);
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FrankingArgs {
    /// Cash dividend received
    #[arg(long, allow_hyphen_values = true)]
    pub dividend: Option<String>,

    /// How much of the dividend is franked, percent
    #[arg(long, allow_hyphen_values = true)]
    pub franking_pct: Option<String>,

    /// Company tax rate, percent
    #[arg(long, allow_hyphen_values = true)]
    pub tax_rate: Option<String>,

    /// Your marginal tax rate, percent; pass an empty value to clear it
    #[arg(long, allow_hyphen_values = true)]
    pub personal_rate: Option<String>,
}

impl FrankingArgs {
    pub fn apply(
        &self,
        form: &mut FrankingForm,
    ) {
        overwrite(&mut form.dividend, &self.dividend);
        overwrite(&mut form.franking_pct, &self.franking_pct);
        overwrite(&mut form.tax_rate, &self.tax_rate);
        overwrite(&mut form.personal_rate, &self.personal_rate);
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct TaxArgs {
    /// Financial year, e.g. 2024-25
    #[arg(long)]
    pub fy: Option<String>,

    /// Gross annual salary
    #[arg(long, allow_hyphen_values = true)]
    pub salary: Option<String>,

    /// Employer super guarantee, percent
    #[arg(long, allow_hyphen_values = true)]
    pub super_pct: Option<String>,

    /// Add the approximate Medicare levy
    #[arg(long)]
    pub include_medicare: Option<bool>,
}

impl TaxArgs {
    pub fn apply(
        &self,
        form: &mut TaxForm,
    ) {
        overwrite(&mut form.fy, &self.fy);
        overwrite(&mut form.salary, &self.salary);
        overwrite(&mut form.super_pct, &self.super_pct);
        if let Some(include) = self.include_medicare {
            form.include_medicare = include;
        }
    }
}

fn overwrite(
    field: &mut String,
    value: &Option<String>,
) {
    if let Some(value) = value {
        field.clone_from(value);
    }
}

pub async fn run_compound(
    repo: &dyn CalculatorRepository,
    args: &CompoundArgs,
    chart: Option<Chart>,
) -> Outcome {
    let mut form: CompoundForm = load_or_default(repo).await;
    args.apply(&mut form);

    let mut controller = CompoundController::new(form, chart);
    save_persisted(repo, controller.form()).await;
    controller.update()
}

/// # Errors
///
/// The franking inputs were rejected. The fields are saved regardless, so
/// the next run starts from what was entered.
pub async fn run_franking(
    repo: &dyn CalculatorRepository,
    args: &FrankingArgs,
    chart: Option<Chart>,
) -> Result<Outcome, FrankingError> {
    let mut form: FrankingForm = load_or_default(repo).await;
    args.apply(&mut form);

    let mut controller = FrankingController::new(form, chart);
    save_persisted(repo, controller.form()).await;
    controller.update()
}

/// # Errors
///
/// No bracket table is stored for the selected financial year, or the
/// storage backend failed while fetching it.
pub async fn run_tax(
    repo: &dyn CalculatorRepository,
    args: &TaxArgs,
    chart: Option<Chart>,
) -> Result<Outcome> {
    let mut form: TaxForm = load_or_default(repo).await;
    args.apply(&mut form);

    let mut controller = TaxController::new(form, chart);
    save_persisted(repo, controller.form()).await;
    estimate(repo, &mut controller).await
}

async fn estimate(
    repo: &dyn CalculatorRepository,
    controller: &mut TaxController,
) -> Result<Outcome> {
    let financial_year = controller.request().financial_year;
    let table = match repo.get_bracket_table(financial_year).await {
        Ok(table) => table,
        Err(RepositoryError::NotFound) => {
            let available = list_periods(repo).await.unwrap_or_default();
            anyhow::bail!(
                "no tax brackets stored for {financial_year}; available: {}",
                join_labels(&available)
            );
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load tax brackets for {financial_year}"));
        }
    };

    Ok(controller.update(&table))
}

/// Restores a calculator's default fields, saves them and recomputes.
///
/// The franking defaults have no dividend, so resetting it yields the
/// invalid-input error.
pub async fn run_reset(
    repo: &dyn CalculatorRepository,
    kind: CalculatorKind,
    chart: Option<Chart>,
) -> Result<Outcome> {
    tracing::info!(calculator = ?kind, "resetting inputs");
    match kind {
        CalculatorKind::Compound => {
            let mut controller = CompoundController::new(load_or_default(repo).await, chart);
            controller.reset();
            save_persisted(repo, controller.form()).await;
            Ok(controller.update())
        }
        CalculatorKind::Franking => {
            let mut controller = FrankingController::new(load_or_default(repo).await, chart);
            controller.reset();
            save_persisted(repo, controller.form()).await;
            Ok(controller.update()?)
        }
        CalculatorKind::Tax => {
            let mut controller = TaxController::new(load_or_default(repo).await, chart);
            controller.reset();
            save_persisted(repo, controller.form()).await;
            estimate(repo, &mut controller).await
        }
    }
}

/// Financial years with a stored bracket table, newest first.
pub async fn list_periods(repo: &dyn CalculatorRepository) -> Result<Vec<FinancialYear>> {
    repo.list_financial_years()
        .await
        .context("failed to list financial years")
}

pub fn join_labels(years: &[FinancialYear]) -> String {
    if years.is_empty() {
        return "none".to_string();
    }
    years
        .iter()
        .map(FinancialYear::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use valtera_core::persistence::load_persisted;

    use super::*;

    // ========================================================================
    // Registry
    // ========================================================================

    #[test]
    fn registry_offers_both_backends() {
        let registry = build_registry();

        assert_eq!(registry.available_backends(), vec!["memory", "sqlite"]);
    }

    #[tokio::test]
    async fn memory_backend_is_seeded() {
        let registry = build_registry();
        let config = DbConfig {
            backend: "memory".to_string(),
            connection_string: String::new(),
        };

        let repo = registry.create(&config).await.unwrap();

        assert_eq!(
            list_periods(&*repo).await.unwrap(),
            vec![FinancialYear::REFERENCE]
        );
    }

    // ========================================================================
    // Field overrides
    // ========================================================================

    #[test]
    fn only_given_fields_are_overwritten() {
        let mut form = CompoundForm::default();
        let args = CompoundArgs {
            years: Some("30".to_string()),
            ..CompoundArgs::default()
        };

        args.apply(&mut form);

        assert_eq!(form.years, "30");
        assert_eq!(form.initial, CompoundForm::default().initial);
    }

    #[test]
    fn empty_personal_rate_clears_field() {
        let mut form = FrankingForm {
            personal_rate: "37".to_string(),
            ..FrankingForm::default()
        };
        let args = FrankingArgs {
            personal_rate: Some(String::new()),
            ..FrankingArgs::default()
        };

        args.apply(&mut form);

        assert_eq!(form.personal_rate, "");
    }

    #[test]
    fn medicare_flag_overrides_saved_choice() {
        let mut form = TaxForm::default();
        let args = TaxArgs {
            include_medicare: Some(false),
            ..TaxArgs::default()
        };

        args.apply(&mut form);

        assert!(!form.include_medicare);
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    #[tokio::test]
    async fn overrides_are_saved_for_next_run() {
        let repo = MemoryRepository::new();
        let args = CompoundArgs {
            monthly: Some("1000".to_string()),
            ..CompoundArgs::default()
        };

        run_compound(&repo, &args, None).await;
        let outcome = run_compound(&repo, &CompoundArgs::default(), None).await;

        let saved: CompoundForm = load_persisted(&repo).await.unwrap();
        assert_eq!(saved.monthly, "1000");
        assert_eq!(outcome.cards[0].value, "$125,000");
    }

    #[tokio::test]
    async fn rejected_franking_inputs_are_still_saved() {
        let repo = MemoryRepository::new();
        let args = FrankingArgs {
            dividend: Some("-5".to_string()),
            ..FrankingArgs::default()
        };

        let result = run_franking(&repo, &args, None).await;

        assert!(matches!(result, Err(FrankingError::NonPositiveDividend(_))));
        let saved: FrankingForm = load_persisted(&repo).await.unwrap();
        assert_eq!(saved.dividend, "-5");
    }

    #[tokio::test]
    async fn oversized_dividend_is_rejected_not_panicking() {
        let repo = MemoryRepository::new();
        let args = FrankingArgs {
            dividend: Some("70000000000000000000000000000".to_string()),
            tax_rate: Some("99".to_string()),
            ..FrankingArgs::default()
        };

        let result = run_franking(&repo, &args, None).await;

        assert!(matches!(result, Err(FrankingError::Overflow(_))));
    }

    #[tokio::test]
    async fn tax_for_unknown_year_reports_available_years() {
        let repo = MemoryRepository::new();
        let args = TaxArgs {
            fy: Some("2019-20".to_string()),
            ..TaxArgs::default()
        };

        let err = run_tax(&repo, &args, None).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "no tax brackets stored for 2019-20; available: 2024-25"
        );
    }

    #[tokio::test]
    async fn reset_tax_restores_defaults() {
        let repo = MemoryRepository::new();
        let args = TaxArgs {
            salary: Some("150000".to_string()),
            ..TaxArgs::default()
        };
        run_tax(&repo, &args, None).await.unwrap();

        let outcome = run_reset(&repo, CalculatorKind::Tax, None).await.unwrap();

        assert_eq!(outcome.cards[0].value, "$90,000");
        let saved: TaxForm = load_persisted(&repo).await.unwrap();
        assert_eq!(saved, TaxForm::default());
    }

    #[tokio::test]
    async fn reset_franking_reports_missing_dividend() {
        let repo = MemoryRepository::new();

        let result = run_reset(&repo, CalculatorKind::Franking, None).await;

        assert!(result.is_err());
    }

    #[test]
    fn labels_join_or_say_none() {
        assert_eq!(join_labels(&[]), "none");
        assert_eq!(
            join_labels(&[FinancialYear::new(2024), FinancialYear::new(2023)]),
            "2024-25, 2023-24"
        );
    }
}
