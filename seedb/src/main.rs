//! Database seeding tool.
//!
//! Connects to a database, reads its schema (or a saved schema file),
//! lets the user choose tables and inserts generated rows into each one.
//!
//! # Security Guarantees
//! - The password is read from the environment or a hidden prompt
//! - Credentials are never logged; connection URLs are redacted
//! - Generated values are bound as parameters

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use seedb::cli::{Cli, Command, SeedArgs, resolve_selection, selected_relations};
use seedb::prompt::{prompt_db_options, prompt_password, select_tables};
use seedb_core::config::DEFAULT_RECORD_COUNT;
use seedb_core::logging::init_logging;
use seedb_core::schema_file::{self, DEFAULT_SCHEMA_FILE};
use seedb_core::{
    ConsoleReporter, DatabaseSeeder, DbOptions, DryRunExecutor, Reporter, SchemaModel,
    SeedConfig, Seeder, SelectedTables, TracingReporter, connect,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

/// Everything a run needs once the arguments or prompts are resolved.
struct RunPlan {
    options: Option<DbOptions>,
    config: SeedConfig,
    tables: Vec<String>,
    exclude: Vec<String>,
    schema_file: Option<PathBuf>,
    schema_out: Option<PathBuf>,
    interactive: bool,
}

impl RunPlan {
    fn from_args(args: SeedArgs, interactive: bool) -> Result<Self> {
        let options = if args.is_offline() {
            None
        } else {
            let password = match args.password.clone() {
                Some(password) => password,
                None => prompt_password()?,
            };
            Some(args.db_options(password))
        };
        let schema_out = args.schema_output().map(Path::to_path_buf);

        Ok(Self {
            options,
            config: args.seed_config(),
            interactive: interactive && args.tables.is_empty(),
            tables: args.tables,
            exclude: args.exclude,
            schema_file: args.schema_file,
            schema_out,
        })
    }

    fn from_prompts() -> Result<Self> {
        Ok(Self {
            options: Some(prompt_db_options()?),
            config: SeedConfig::new(DEFAULT_RECORD_COUNT),
            tables: Vec::new(),
            exclude: Vec::new(),
            schema_file: None,
            schema_out: Some(PathBuf::from(DEFAULT_SCHEMA_FILE)),
            interactive: true,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let reporter: Box<dyn Reporter> = if cli.global.quiet {
        Box::new(TracingReporter)
    } else {
        Box::new(ConsoleReporter::new())
    };
    let interactive = !cli.global.quiet && Term::stdout().is_term();

    let plan = match cli.command {
        Some(Command::Seed(args)) => RunPlan::from_args(args, interactive),
        None => RunPlan::from_prompts(),
    };

    let result = match plan {
        Ok(plan) => run(plan, reporter.as_ref()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(plan: RunPlan, reporter: &dyn Reporter) -> Result<()> {
    let mut seeder = match &plan.options {
        Some(options) => {
            info!("Connecting to {}", options);
            let seeder = connect(options).await?;
            reporter.success(&format!("Successfully pinged {} server", options.engine));
            Some(seeder)
        }
        None => None,
    };

    let schema = match &plan.schema_file {
        Some(path) => schema_file::load(path)
            .await
            .with_context(|| format!("Cannot use schema file {}", path.display()))?,
        None => {
            let seeder = seeder
                .as_mut()
                .context("A database connection is required to introspect the schema")?;
            introspect_and_save(seeder.as_mut(), plan.schema_out.as_deref(), reporter).await?
        }
    };

    let available = match seeder.as_mut() {
        Some(seeder) => seeder.list_tables().await?,
        None => schema.table_names(),
    };

    let selection = choose_tables(&plan, &available)?;
    if selection.is_empty() {
        reporter.error("No tables selected, nothing to seed");
        return close(seeder).await;
    }

    let relations = selected_relations(&schema, &selection);
    if relations > 0 {
        warn!(
            "Selected tables declare {} foreign key(s); generated values do not follow them and some inserts may be rejected",
            relations
        );
    }

    let mut runner = Seeder::new(plan.config.clone());
    if let Some(options) = &plan.options {
        runner = runner.with_schema_name(&options.schema);
    }

    let report = if plan.config.dry_run {
        let mut executor = DryRunExecutor::new();
        let report = runner
            .run(&schema, &selection, &mut executor, reporter)
            .await;
        for statement in executor.statements() {
            println!("{}", statement);
        }
        report
    } else {
        let seeder = seeder
            .as_mut()
            .context("A database connection is required to insert records")?;
        runner
            .run(&schema, &selection, seeder.as_mut(), reporter)
            .await
    };

    info!(
        "Seeding finished: {} row(s) inserted, {} failed, {} table(s) skipped",
        report.total_inserted(),
        report.total_failed(),
        report.skipped.len()
    );
    for summary in report.tables.iter().filter(|summary| !summary.errors.is_empty()) {
        for error in &summary.errors {
            debug!("{}: {}", summary.table, error);
        }
    }

    close(seeder).await
}

async fn introspect_and_save(
    seeder: &mut dyn DatabaseSeeder,
    schema_out: Option<&Path>,
    reporter: &dyn Reporter,
) -> Result<SchemaModel> {
    let schema = seeder
        .introspect_schema()
        .await
        .context("An error occurred while generating the schema")?;

    match schema_out {
        Some(path) => {
            schema_file::save(path, &schema).await?;
            reporter.success(&format!(
                "Schema generated successfully at {}",
                path.display()
            ));
        }
        None => debug!("Dry run: introspected schema not written"),
    }

    Ok(schema)
}

fn choose_tables(plan: &RunPlan, available: &[String]) -> Result<SelectedTables> {
    if plan.interactive && !available.is_empty() {
        let chosen = select_tables(available)?;
        return Ok(resolve_selection(&chosen, &[], &plan.exclude));
    }
    Ok(resolve_selection(available, &plan.tables, &plan.exclude))
}

async fn close(seeder: Option<Box<dyn DatabaseSeeder>>) -> Result<()> {
    if let Some(seeder) = seeder {
        seeder.close().await?;
    }
    Ok(())
}
