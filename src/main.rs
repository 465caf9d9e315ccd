use clap::Parser;
use dish_explorer::utils::error::{DishError, ErrorSeverity};
use dish_explorer::utils::logger::{self, LogFormat};
use dish_explorer::utils::validation::Validate;
use dish_explorer::{create_router, AppConfig, CliConfig, LiveExplorer};

fn load_config(cli: &CliConfig) -> Result<AppConfig, DishError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            // ${VAR} 替換也要看得到 .env 裡的值
            dotenvy::dotenv().ok();
            AppConfig::from_file(path)?
        }
        None => AppConfig::from_env()?,
    };

    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }

    config.validate()?;
    Ok(config)
}

fn exit_with(e: &DishError) -> ! {
    tracing::error!(
        "❌ dish-explorer failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(cli.verbose, format);

    tracing::info!("Starting dish-explorer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = load_config(&cli).unwrap_or_else(|e| exit_with(&e));
    let explorer = LiveExplorer::from_config(&config).unwrap_or_else(|e| exit_with(&e));
    let app = create_router(explorer);

    let listener = tokio::net::TcpListener::bind(config.server.bind_address.as_str())
        .await
        .unwrap_or_else(|e| exit_with(&DishError::IoError(e)));
    tracing::info!("🍜 Listening on http://{}", config.server.bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        exit_with(&DishError::IoError(e));
    }
}
