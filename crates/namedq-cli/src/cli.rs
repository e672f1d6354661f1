use namedq::BindStyle;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Compile,
    Check,
    Drivers,
    Run,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Compile(CompileArgs),
    Check(CheckArgs),
    Drivers,
    Run(RunArgs),
}

/// Where the compile dialect comes from; the catalog file is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    Catalog,
    Driver(String),
    Style(BindStyle),
}

#[derive(Debug, Clone)]
pub struct CompileArgs {
    pub catalog: PathBuf,
    pub style: StyleSource,
    pub statements: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub catalog: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub catalog: PathBuf,
    pub database: PathBuf,
    pub schema: Option<PathBuf>,
    pub statement: String,
    pub params: Vec<(String, String)>,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    let rest = it.map(|s| s.as_str());
    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help(HelpTopic::Root)),
        "compile" => parse_compile(rest),
        "check" => parse_check(rest),
        "drivers" => parse_drivers(rest),
        "run" => parse_run(rest),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

/// `--flag value` or `--flag=value`; `None` when `token` is not this flag.
fn flag_value<'a>(
    flag: &str,
    token: &'a str,
    it: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<Option<&'a str>> {
    if token == flag {
        let Some(v) = it.next() else {
            anyhow::bail!("{flag} requires a value");
        };
        return Ok(Some(v));
    }
    Ok(token
        .strip_prefix(flag)
        .and_then(|rest| rest.strip_prefix('=')))
}

fn require_catalog(catalog: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    catalog.ok_or_else(|| anyhow::anyhow!("--catalog is required"))
}

fn parse_compile<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut catalog: Option<PathBuf> = None;
    let mut style = StyleSource::Catalog;
    let mut statements = Vec::new();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Compile));
        }
        if let Some(v) = flag_value("--catalog", token, &mut it)? {
            catalog = Some(PathBuf::from(v));
            continue;
        }
        if let Some(v) = flag_value("--driver", token, &mut it)? {
            if matches!(style, StyleSource::Style(_)) {
                anyhow::bail!("--driver and --style are mutually exclusive");
            }
            style = StyleSource::Driver(v.to_string());
            continue;
        }
        if let Some(v) = flag_value("--style", token, &mut it)? {
            if matches!(style, StyleSource::Driver(_)) {
                anyhow::bail!("--driver and --style are mutually exclusive");
            }
            let parsed = v.parse::<BindStyle>().map_err(|e| anyhow::anyhow!(e))?;
            style = StyleSource::Style(parsed);
            continue;
        }
        if token.starts_with('-') {
            anyhow::bail!("unknown argument: {token}");
        }
        statements.push(token.to_string());
    }

    Ok(Command::Compile(CompileArgs {
        catalog: require_catalog(catalog)?,
        style,
        statements,
    }))
}

fn parse_check<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut catalog: Option<PathBuf> = None;

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Check));
        }
        if let Some(v) = flag_value("--catalog", token, &mut it)? {
            catalog = Some(PathBuf::from(v));
            continue;
        }
        anyhow::bail!("unknown argument: {token}");
    }

    Ok(Command::Check(CheckArgs {
        catalog: require_catalog(catalog)?,
    }))
}

fn parse_drivers<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    match it.next() {
        None => Ok(Command::Drivers),
        Some("-h" | "--help") => Ok(Command::Help(HelpTopic::Drivers)),
        Some(other) => anyhow::bail!("unknown argument: {other}"),
    }
}

fn parse_run<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut catalog: Option<PathBuf> = None;
    let mut database: Option<PathBuf> = None;
    let mut schema: Option<PathBuf> = None;
    let mut statement: Option<String> = None;
    let mut params = Vec::new();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Run));
        }
        if let Some(v) = flag_value("--catalog", token, &mut it)? {
            catalog = Some(PathBuf::from(v));
            continue;
        }
        if let Some(v) = flag_value("--database", token, &mut it)? {
            database = Some(PathBuf::from(v));
            continue;
        }
        if let Some(v) = flag_value("--schema", token, &mut it)? {
            schema = Some(PathBuf::from(v));
            continue;
        }
        if token.starts_with('-') {
            anyhow::bail!("unknown argument: {token}");
        }
        if statement.is_none() {
            statement = Some(token.to_string());
            continue;
        }
        let Some((key, value)) = token.split_once('=') else {
            anyhow::bail!("expected key=value, got: {token}");
        };
        if key.is_empty() {
            anyhow::bail!("empty parameter name in: {token}");
        }
        params.push((key.to_string(), value.to_string()));
    }

    let Some(database) = database else {
        anyhow::bail!("--database is required");
    };
    let Some(statement) = statement else {
        anyhow::bail!("missing STATEMENT");
    };

    Ok(Command::Run(RunArgs {
        catalog: require_catalog(catalog)?,
        database,
        schema,
        statement,
        params,
    }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
namedq - compile, check and run `:name` SQL catalogs

USAGE:
  namedq <COMMAND> [OPTIONS]

COMMANDS:
  compile       Print compiled SQL and parameter names
  check         Compile every statement under every dialect
  drivers       List known drivers and their placeholder dialect
  run           Execute a statement against a SQLite database

Run `namedq <command> --help` for more."
            );
        }
        HelpTopic::Compile => {
            println!(
                "\
USAGE:
  namedq compile --catalog <FILE> [OPTIONS] [STATEMENT...]

OPTIONS:
  --catalog <FILE>      Catalog file (TOML)
  --driver <NAME>       Resolve the dialect from a driver name
  --style <STYLE>       Dialect: question, dollar, named, at, unknown
  -h, --help            Print help

Without --driver/--style the catalog's own `bind_style`/`driver` is used.
Without STATEMENT every statement is printed."
            );
        }
        HelpTopic::Check => {
            println!(
                "\
USAGE:
  namedq check --catalog <FILE>

OPTIONS:
  --catalog <FILE>      Catalog file (TOML)
  -h, --help            Print help"
            );
        }
        HelpTopic::Drivers => {
            println!(
                "\
USAGE:
  namedq drivers

Unlisted drivers use `?` placeholders."
            );
        }
        HelpTopic::Run => {
            println!(
                "\
USAGE:
  namedq run --catalog <FILE> --database <PATH> [--schema <FILE>] <STATEMENT> [key=value...]

OPTIONS:
  --catalog <FILE>      Catalog file (TOML)
  --database <PATH>     SQLite database file (created if missing)
  --schema <FILE>       SQL script applied before the statement
  -h, --help            Print help

Values: integers bind as integers, `null` as NULL, anything else as text.
SELECT/WITH/PRAGMA/VALUES statements print rows; others print the affected-row count."
            );
        }
    }
}
