use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use agri_sahayak::core::config;
use agri_sahayak::core::i18n::{self, Language};
use agri_sahayak::core::store::{LANGUAGE_KEY, Store, USER_ID_KEY, USER_NAME_KEY};
use agri_sahayak::tui;

#[derive(Parser)]
#[command(name = "agri-sahayak", about = "Farming advisory chat client")]
struct Args {
    /// User id to sign in as (remembered for later runs)
    #[arg(short, long)]
    user: Option<String>,

    /// Display name shown until the profile loads
    #[arg(long)]
    name: Option<String>,

    /// Advisory server origin
    #[arg(short, long)]
    server_url: Option<String>,

    /// Interface language
    #[arg(short, long, value_enum)]
    language: Option<Language>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to agri-sahayak.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("agri-sahayak.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(&file_config, args.server_url.as_deref(), args.language);
    log::info!("Agri-Sahayak starting against {}", resolved.server_url);

    let mut store = Store::open();

    // Identity: CLI flag wins and is remembered; otherwise the stored id
    let user_id = match args.user.or_else(|| store.get(USER_ID_KEY).map(str::to_string)) {
        Some(id) => id,
        None => {
            eprintln!("No user id found. Sign in with: agri-sahayak --user <id>");
            std::process::exit(1);
        }
    };
    store.set(USER_ID_KEY, &user_id);
    if let Some(name) = &args.name {
        store.set(USER_NAME_KEY, name);
    }

    // Locale: explicit config/CLI override, else stored value, else LANG
    match resolved.language {
        Some(lang) => i18n::set_language(lang),
        None => i18n::init(store.get(LANGUAGE_KEY)),
    }

    tui::run(resolved, store, user_id)
}
