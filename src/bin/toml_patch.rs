use clap::Parser;
use fixlog_patch::config::toml_config::TomlConfig;
use fixlog_patch::core::Pipeline;
use fixlog_patch::utils::{logger, validation::Validate};
use fixlog_patch::{LocalStorage, PatchEngine, SimplePipeline};

#[derive(Parser)]
#[command(name = "toml-patch")]
#[command(about = "Source patch tool with TOML job file support")]
struct Args {
    /// Path to TOML job file
    #[arg(short, long, default_value = "patch-job.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from job file
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - report occurrences without writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based patch tool");
    tracing::info!("📁 Loading job from: {}", args.config);

    // 載入 TOML 工作檔
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load job file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證工作設定
    if let Err(e) = config.validate() {
        tracing::error!("❌ Job validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Job loaded and validated successfully");

    display_job_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - target file will not be modified");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和補丁管道
    let storage = LocalStorage::new(config.target_root().to_string());
    let pipeline = SimplePipeline::new(storage, config);

    // 創建補丁引擎並運行
    let engine = PatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Patch applied successfully!");
            println!("📁 Patched file: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Patch process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                fixlog_patch::utils::error::ErrorSeverity::Low => 0,
                fixlog_patch::utils::error::ErrorSeverity::Medium => 2,
                fixlog_patch::utils::error::ErrorSeverity::High => 1,
                fixlog_patch::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_job_summary(config: &TomlConfig, args: &Args) {
    tracing::info!("📋 Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("🎯 Target: {}", config.target.path);
    tracing::info!(
        "🔤 Search: {} chars, replacement: {} chars",
        config.patch.search.len(),
        config.patch.replacement.len()
    );
    if args.dry_run {
        tracing::info!("🔍 Mode: dry run");
    }
}

async fn perform_dry_run(config: &TomlConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = LocalStorage::new(config.target_root().to_string());
    let pipeline = SimplePipeline::new(storage, config.clone());

    let document = pipeline.extract().await?;
    let result = pipeline.transform(document).await?;

    if result.occurrences == 0 {
        println!("🔍 Search text not found - nothing would change");
    } else {
        println!(
            "🔍 Would replace {} occurrence(s) in {}",
            result.occurrences, config.target.path
        );
    }

    Ok(())
}
