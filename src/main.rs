use clap::Parser;
use goldprime::utils::error::ErrorSeverity;
use goldprime::utils::{logger, validation::Validate};
use goldprime::{app_router, build_state, CliArgs, PriceError, ServiceConfig};
use std::path::Path;

fn load_config(args: &CliArgs) -> Result<ServiceConfig, PriceError> {
    let mut config = ServiceConfig::from_file_or_default(&args.config)?;
    args.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn exit_with(e: &PriceError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &ServiceConfig) {
    tracing::info!("==========================================================");
    tracing::info!("   GOLDPRIME SERVER");
    tracing::info!("   * Listen:  {}", config.server.listen_addr);
    tracing::info!("   * Cache:   {}", config.cache.path);
    tracing::info!(
        "   * Expiry:  {} seconds",
        config.cache.freshness_window_seconds
    );
    tracing::info!(
        "   * Band:    {} < price < {}",
        config.pricing.min_valid_price,
        config.pricing.max_valid_price
    );
    tracing::info!("   * Anchor:  ₹{}", config.pricing.failsafe_anchor_price);
    tracing::info!("   * Sources: {}", config.scraper.sources.len());
    for (i, source) in config.scraper.sources.iter().enumerate() {
        tracing::info!("       {}. {}", i + 1, source);
    }
    if let Some(file) = &config.logging.file {
        tracing::info!("   * Logs:    {}", file);
    }
    tracing::info!("==========================================================");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let _log_guard = match logger::init_logger(
        args.verbose,
        config.logging.format,
        config.logging.file.as_deref().map(Path::new),
    ) {
        Ok(guard) => guard,
        Err(e) => exit_with(&e),
    };

    if !Path::new(&args.config).exists() {
        tracing::warn!("⚠️ Config file '{}' not found, using defaults", args.config);
    }
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - configuration is valid, not starting the server");
        return Ok(());
    }

    let state = match build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(
                "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&e);
        }
    };

    // 啟動時先解析一次，過期就會在背景更新
    let initial_price = state.resolver.resolve().await;
    tracing::info!("🚀 Initialization complete. Current price: {}", initial_price);

    let listen_addr = config.listen_addr()?;
    let router = app_router(state, &config.server);

    tracing::info!("Listening on {}", listen_addr);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
