//! extractkit command line: the extract form as subcommands.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use extractkit::actions::{insert_upload, run_extract, save_extract};
use extractkit::ast::SourceKind;
use extractkit::config::Settings;
use extractkit::gateway::{Gateway, SqlGateway};
use extractkit::transpiler::{BuildOptions, Dialect};
use extractkit::upload::Upload;
use extractkit::{ExtractConfig, extend_filters, parse_rule};

const UPLOAD_PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "extractkit", version, about = "Build, preview and save SQL extracts")]
struct Cli {
    /// Database connection URL
    #[arg(long, global = true, env = "EXTRACTKIT_DATABASE_URL")]
    database_url: Option<String>,

    /// Settings file (defaults to ./extractkit.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Schema to list and describe sources in
    #[arg(long, global = true)]
    schema: Option<String>,

    /// Log debug output, including generated SQL
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List tables or views
    Sources {
        #[arg(long, default_value = "table")]
        kind: SourceKind,
    },
    /// List the columns of a table or view
    Columns {
        source: String,
        #[arg(long, default_value = "table")]
        kind: SourceKind,
    },
    /// Print the composed SQL without touching the database
    Preview {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Execute the extract and print the rows
    Run {
        #[command(flatten)]
        form: FormArgs,
        /// Send values as bound parameters
        #[arg(long)]
        bind: bool,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save the extract as a view named <name>_<suffix>
    Save {
        #[command(flatten)]
        form: FormArgs,
        /// Configuration name (overrides the file's `name`)
        #[arg(long)]
        name: Option<String>,
    },
    /// Insert the rows of a CSV file (with header) into a table
    Insert { table: String, file: PathBuf },
}

/// Form state: an extract file, or the same fields given as flags.
#[derive(Args)]
struct FormArgs {
    /// Extract configuration TOML
    extract: Option<PathBuf>,

    /// Source table or view (when no extract file is given)
    #[arg(long)]
    source: Option<String>,

    #[arg(long, default_value = "table")]
    kind: SourceKind,

    /// Filter such as "age > 30" or "OR id IN 1,2,3"; repeatable
    #[arg(long = "where", value_name = "FILTER")]
    filters: Vec<String>,

    /// CASE rule such as "status = active THEN Y ELSE N AS is_active"
    #[arg(long = "rule", value_name = "RULE")]
    rules: Vec<String>,

    /// Lower-case both sides of filters not marked /cs
    #[arg(long)]
    case_sensitivity: bool,

    /// Keep the WHERE filter when a CASE column is present
    #[arg(long)]
    filter_with_case: bool,

    /// Quote table, column and alias names (keeps mixed case on Postgres)
    #[arg(long)]
    quote_identifiers: bool,
}

impl FormArgs {
    fn to_config(&self) -> Result<ExtractConfig> {
        let mut config = match &self.extract {
            Some(path) => ExtractConfig::load(path)?,
            None => {
                let source = self
                    .source
                    .as_deref()
                    .context("give an extract file or --source")?;
                ExtractConfig::new(self.kind, source)
            }
        };
        extend_filters(&mut config.filters, &self.filters)?;
        for rule in &self.rules {
            config.rules.push(parse_rule(rule)?);
        }
        config.validate()?;
        Ok(config)
    }

    fn options(&self, settings: &Settings) -> BuildOptions {
        let defaults = settings.builder;
        BuildOptions {
            honor_case_sensitivity: self.case_sensitivity || defaults.honor_case_sensitivity,
            apply_filter_with_case: self.filter_with_case || defaults.apply_filter_with_case,
            quote_identifiers: self.quote_identifiers || defaults.quote_identifiers,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "✗".red(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "extractkit=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(url) = cli.database_url {
        settings.database.url = Some(url);
    }
    if let Some(schema) = cli.schema {
        settings.database.schema = Some(schema);
    }

    match cli.command {
        Command::Sources { kind } => {
            let gateway = connect(&settings).await?;
            let sources = gateway.list_sources(kind).await?;
            println!("{} {}", kind.plural().cyan().bold(), format!("({})", sources.len()).dimmed());
            for name in sources {
                println!("  {}", name);
            }
        }
        Command::Columns { source, kind } => {
            let gateway = connect(&settings).await?;
            for column in gateway.describe_columns(kind, &source).await? {
                println!("{}", column);
            }
        }
        Command::Preview { form } => {
            let config = form.to_config()?;
            let dialect = match settings.database.url.as_deref() {
                Some(url) => Dialect::from_url(url)?,
                None => Dialect::default(),
            };
            let sql = config.to_sql(form.options(&settings), dialect)?;
            println!("{}", sql);
        }
        Command::Run { form, bind, json } => {
            let config = form.to_config()?;
            let gateway = connect(&settings).await?;
            let (sql, rows) = run_extract(&gateway, &config, form.options(&settings), bind).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows.to_json())?);
            } else {
                eprintln!("{}", sql.dimmed());
                println!("{}", rows);
            }
        }
        Command::Save { form, name } => {
            let config = form.to_config()?;
            if name.is_none() && config.name.is_none() {
                bail!("enter a configuration name with --name or `name` in the extract file");
            }
            let gateway = connect(&settings).await?;
            let options = form.options(&settings);
            let saved = save_extract(&gateway, &config, name.as_deref(), options).await?;
            println!(
                "{} Configuration saved as view: {} {}",
                "✓".green(),
                saved.name.green().bold(),
                format!("at {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")).dimmed()
            );
        }
        Command::Insert { table, file } => {
            let upload = Upload::read_path(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            println!("{}", upload.head(UPLOAD_PREVIEW_ROWS));
            let gateway = connect(&settings).await?;
            let inserted = insert_upload(&gateway, &table, &upload).await?;
            println!("{} Inserted {} rows into {}", "✓".green(), inserted, table.yellow());
        }
    }
    Ok(())
}

async fn connect(settings: &Settings) -> Result<SqlGateway> {
    let url = settings.database_url()?;
    let gateway = SqlGateway::connect(url, settings.database.schema.clone())
        .await
        .context("failed to connect")?;
    Ok(gateway)
}
