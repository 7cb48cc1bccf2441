use boltview::api::{BoltApi, ConfigAction, HostFunction};
use boltview::commands::config as config_cmd;
use boltview::config::{BoltConfig, KEYS};
use boltview::editor::{edit_lines, text_to_lines};
use boltview::error::{BoltError, Result};
use boltview::host::BufferHost;
use boltview::model::PutMode;
use boltview::store::db::RedbStore;
use clap::Parser;
use directories::ProjectDirs;
use std::io::Read;
use std::path::{Path, PathBuf};

mod args;
mod print;
use args::{Cli, Commands};
use print::{print_buckets_json, print_lines, print_messages};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "boltview=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// The store plus a scratch buffer loaded from it. The buffer stands in for
/// the editor's, so line numbers given to `call` match `list` output.
struct AppContext {
    api: BoltApi<RedbStore>,
    host: BufferHost,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = resolve_config_dir(cli.config_dir.clone())?;

    if let Some(Commands::Config { key, value }) = cli.command {
        return handle_config(&config_dir, key, value);
    }

    let mut ctx = init_context(cli.db.as_deref(), &config_dir)?;

    match cli.command.unwrap_or(Commands::List { json: false }) {
        Commands::List { json } => handle_list(&ctx, json),
        Commands::CreateBucket { name } => handle_create_bucket(&mut ctx, name),
        Commands::CreateEntry {
            bucket,
            key,
            value,
            anyway,
        } => handle_create_entry(&mut ctx, bucket, key, value, anyway),
        Commands::DeleteEntry { bucket, key } => handle_delete_entry(&mut ctx, bucket, key),
        Commands::DeleteBucket { name } => handle_delete_bucket(&mut ctx, name),
        Commands::Edit => handle_edit(&mut ctx),
        Commands::Apply { file } => handle_apply(&mut ctx, &file),
        Commands::Call { function, args } => handle_call(&mut ctx, function, args),
        Commands::Config { .. } => unreachable!("handled before opening the store"),
    }
}

fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "boltview", "boltview")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BoltError::Api("Could not determine config dir".to_string()))
}

fn init_context(db: Option<&Path>, config_dir: &Path) -> Result<AppContext> {
    let db = db.ok_or_else(|| BoltError::Api("No store file given".to_string()))?;
    let config = BoltConfig::load(config_dir)?;

    let mut host = BufferHost::for_path(db);
    let api = BoltApi::open_for_host(&host, config)?;
    api.load(&mut host)?;

    Ok(AppContext { api, host })
}

fn handle_list(ctx: &AppContext, json: bool) -> Result<()> {
    let result = ctx.api.list()?;
    if json {
        print_buckets_json(&result.listed_buckets)
    } else {
        print_lines(&result.lines);
        Ok(())
    }
}

fn handle_create_bucket(ctx: &mut AppContext, name: String) -> Result<()> {
    let result = ctx.api.create_bucket(&[name])?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_create_entry(
    ctx: &mut AppContext,
    bucket: String,
    key: String,
    value: String,
    anyway: bool,
) -> Result<()> {
    let mode = if anyway {
        PutMode::Overwrite
    } else {
        PutMode::CreateOnly
    };
    let result = ctx.api.create_entry(&[bucket, key, value], mode)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete_entry(ctx: &mut AppContext, bucket: String, key: String) -> Result<()> {
    let result = ctx.api.delete_entry(&[bucket, key])?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete_bucket(ctx: &mut AppContext, name: String) -> Result<()> {
    let result = ctx.api.delete_bucket(&[name])?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext) -> Result<()> {
    let edited = edit_lines(ctx.host.lines(), &ctx.api.config().filetype)?;
    let result = ctx.api.apply(&edited)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_apply(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let text = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };

    let result = ctx.api.apply(&text_to_lines(&text))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_call(ctx: &mut AppContext, function: String, args: Vec<String>) -> Result<()> {
    let result = ctx.api.call(&mut ctx.host, &function, &args)?;
    if function.parse::<HostFunction>()? == HostFunction::Load {
        print_lines(ctx.host.lines());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = config_cmd::run(dir, action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            for key in KEYS {
                if let Some(value) = config.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}
