//! Command-line arguments and the pure helpers behind them.

use clap::{Args, Parser, Subcommand};
use seedb_core::config::DEFAULT_RECORD_COUNT;
use seedb_core::schema_file::DEFAULT_SCHEMA_FILE;
use seedb_core::{DatabaseEngine, DbOptions, SchemaModel, SeedConfig, SelectedTables};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "seedb")]
#[command(about = "Automatically seed database tables with initial/random data")]
#[command(version)]
#[command(long_about = "
seedb - Schema-driven database seeder

Reads the schema of a database, generates plausible random rows for each
selected table and inserts a fixed number of them. Tables named users,
orders and products get realistic usernames, emails, prices and dates;
other columns get values by declared type.

Generated foreign-key values are random and may be rejected by the
database. Rejected rows are counted and reported, never retried.

Run without a subcommand for an interactive session.

EXAMPLES:
  seedb seed -d shop -u admin -H localhost
  seedb seed -d shop --tables users,products --records 50
  seedb seed -d shop --schema-file schema.json --dry-run
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Seed tables of a database
    Seed(SeedArgs),
}

#[derive(Args)]
pub struct SeedArgs {
    /// Database engine
    #[arg(
        short,
        long,
        default_value = "postgres",
        help = "Database engine (postgres, mysql, mongodb, cockroachdb, sqlite)"
    )]
    pub engine: DatabaseEngine,

    /// Database name
    #[arg(short, long, help = "Name of the database to seed")]
    pub database: String,

    /// Database schema
    #[arg(short, long, default_value = "public", help = "Database schema to seed")]
    pub schema: String,

    /// Database user
    #[arg(short, long, default_value = "root", help = "Database username")]
    pub user: String,

    /// Database host
    #[arg(short = 'H', long, default_value = "127.0.0.1", help = "Database host")]
    pub host: String,

    /// Database port
    #[arg(short, long, help = "Database port (defaults to the engine's port)")]
    pub port: Option<u16>,

    /// Database password
    #[arg(
        long,
        env = "SEEDB_PASSWORD",
        hide_env_values = true,
        help = "Database password (prompted for when not set)"
    )]
    pub password: Option<String>,

    /// Records per table
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_RECORD_COUNT,
        help = "Number of records to insert into each table"
    )]
    pub records: usize,

    /// Tables to seed
    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated tables to seed (default: all, chosen interactively in a terminal)"
    )]
    pub tables: Vec<String>,

    /// Tables to leave alone
    #[arg(long, value_delimiter = ',', help = "Comma-separated tables to skip")]
    pub exclude: Vec<String>,

    /// Existing schema file
    #[arg(long, help = "Read the schema from this file instead of the database")]
    pub schema_file: Option<PathBuf>,

    /// Where to write the introspected schema
    #[arg(
        long,
        default_value = DEFAULT_SCHEMA_FILE,
        help = "Where to write the introspected schema (not written on --dry-run)"
    )]
    pub schema_out: PathBuf,

    /// RNG seed
    #[arg(long, help = "Seed the random generator for reproducible values")]
    pub seed: Option<u64>,

    /// Print statements instead of executing them
    #[arg(
        long,
        help = "Print the INSERT statements without executing them or writing any file"
    )]
    pub dry_run: bool,
}

impl SeedArgs {
    /// Connection options from the flags, with `password` filled in.
    pub fn db_options(&self, password: String) -> DbOptions {
        DbOptions::new(self.engine, &self.database)
            .with_user(&self.user)
            .with_password(password)
            .with_host(&self.host)
            .with_port(self.port.unwrap_or_else(|| self.engine.default_port()))
            .with_schema(&self.schema)
    }

    pub fn seed_config(&self) -> SeedConfig {
        let config = SeedConfig::new(self.records).with_dry_run(self.dry_run);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Where to save the introspected schema; dry runs write nothing.
    pub fn schema_output(&self) -> Option<&Path> {
        if self.dry_run {
            None
        } else {
            Some(&self.schema_out)
        }
    }

    /// True when the run never needs a database connection.
    pub fn is_offline(&self) -> bool {
        self.dry_run && self.schema_file.is_some()
    }
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(
        short,
        long,
        global = true,
        help = "Suppress all output except errors"
    )]
    pub quiet: bool,
}

/// Builds the selection from the available tables and the flags.
///
/// `tables` replaces `available` when given (unknown names are kept so
/// the run reports them); `exclude` is removed last.
pub fn resolve_selection(
    available: &[String],
    tables: &[String],
    exclude: &[String],
) -> SelectedTables {
    let mut selection: SelectedTables = if tables.is_empty() {
        available.iter().cloned().collect()
    } else {
        tables.iter().cloned().collect()
    };

    for name in exclude {
        selection.remove(name);
    }

    selection
}

/// Number of relations carried by the selected tables.
pub fn selected_relations(schema: &SchemaModel, selection: &SelectedTables) -> usize {
    selection
        .iter()
        .filter_map(|name| schema.lookup_table(name).ok())
        .map(|table| table.relations.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedb_core::{Column, Relation, Table};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("seedb").chain(args.iter().copied())).unwrap()
    }

    fn seed_args(cli: Cli) -> SeedArgs {
        match cli.command {
            Some(Command::Seed(args)) => args,
            None => panic!("expected seed subcommand"),
        }
    }

    #[test]
    fn test_seed_defaults() {
        let args = seed_args(parse(&["seed", "-d", "shop"]));

        assert_eq!(args.engine, DatabaseEngine::Postgres);
        assert_eq!(args.schema, "public");
        assert_eq!(args.user, "root");
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, None);
        assert_eq!(args.records, 10);
        assert_eq!(args.schema_out, PathBuf::from("schema.json"));
        assert!(args.tables.is_empty());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_short_flags() {
        let args = seed_args(parse(&[
            "seed", "-e", "postgres", "-d", "shop", "-s", "sales", "-u", "admin", "-H",
            "db.example.com", "-p", "6543",
        ]));

        let options = args.db_options("secret".to_string());
        assert_eq!(options.schema, "sales");
        assert_eq!(options.user(), "admin");
        assert_eq!(options.host, "db.example.com");
        assert_eq!(options.port, 6543);
        assert!(options.validate().is_ok());
        assert!(!options.to_string().contains("secret"));
    }

    #[test]
    fn test_port_defaults_to_engine_port() {
        let args = seed_args(parse(&["seed", "-e", "mysql", "-d", "shop"]));
        assert_eq!(args.db_options(String::new()).port, 3306);
    }

    #[test]
    fn test_invalid_engine_is_rejected_by_parser() {
        let Err(err) = Cli::try_parse_from(["seedb", "seed", "-e", "oracle", "-d", "shop"]) else {
            panic!("oracle must be rejected");
        };
        assert!(err.to_string().contains("oracle"), "{err}");
    }

    #[test]
    fn test_database_is_required() {
        assert!(Cli::try_parse_from(["seedb", "seed"]).is_err());
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = parse(&["-vv"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn test_seed_config_from_flags() {
        let args = seed_args(parse(&[
            "seed", "-d", "shop", "--records", "25", "--seed", "7", "--dry-run",
        ]));
        let config = args.seed_config();
        assert_eq!(config.record_count, 25);
        assert_eq!(config.rng_seed, Some(7));
        assert!(config.dry_run);
        assert!(!args.is_offline());
    }

    #[test]
    fn test_dry_run_never_writes_schema_file() {
        let args = seed_args(parse(&["seed", "-d", "shop", "--dry-run"]));
        assert_eq!(args.schema_output(), None);

        let args = seed_args(parse(&[
            "seed", "-d", "shop", "--dry-run", "--schema-out", "out.json",
        ]));
        assert_eq!(args.schema_output(), None);

        let args = seed_args(parse(&["seed", "-d", "shop", "--schema-out", "out.json"]));
        assert_eq!(args.schema_output(), Some(Path::new("out.json")));
    }

    #[test]
    fn test_offline_needs_schema_file_and_dry_run() {
        let args = seed_args(parse(&[
            "seed",
            "-d",
            "shop",
            "--schema-file",
            "schema.json",
            "--dry-run",
        ]));
        assert!(args.is_offline());
    }

    #[test]
    fn test_resolve_selection() {
        let available = vec![
            "orders".to_string(),
            "products".to_string(),
            "users".to_string(),
        ];

        let all = resolve_selection(&available, &[], &[]);
        assert_eq!(all.iter().collect::<Vec<_>>(), ["orders", "products", "users"]);

        let narrowed = resolve_selection(
            &available,
            &["users".to_string(), "ghosts".to_string()],
            &[],
        );
        assert_eq!(narrowed.iter().collect::<Vec<_>>(), ["users", "ghosts"]);

        let excluded = resolve_selection(&available, &[], &["orders".to_string()]);
        assert_eq!(excluded.iter().collect::<Vec<_>>(), ["products", "users"]);
    }

    #[test]
    fn test_selected_relations() {
        let schema = SchemaModel::new(vec![
            Table::new("users", vec![Column::new("id", "serial")]),
            Table::new("orders", vec![Column::new("user_id", "int4")]).with_relations(vec![
                Relation {
                    name: "orders_user_id_fkey".to_string(),
                    column: "user_id".to_string(),
                    ref_table: "users".to_string(),
                    ref_column: "id".to_string(),
                    on_delete: None,
                    on_update: None,
                },
            ]),
        ]);

        let users_only: SelectedTables = ["users"].into_iter().collect();
        assert_eq!(selected_relations(&schema, &users_only), 0);

        let both: SelectedTables = ["users", "orders", "ghosts"].into_iter().collect();
        assert_eq!(selected_relations(&schema, &both), 1);
    }
}
