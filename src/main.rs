use anyhow::Context;
use clap::Parser;
use storefront_cart::config::CartSettings;
use storefront_cart::core::ConfigProvider;
use storefront_cart::utils::error::ErrorSeverity;
use storefront_cart::utils::{logger, validation::Validate};
use storefront_cart::{
    Cart, CartCommand, CartError, CartManager, CliConfig, ConsoleNotifier, HttpStorefrontApi,
    LocalStorage, UpdateProductAmount,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = cli.resolve().context("failed to load configuration")?;

    // 初始化日誌
    logger::init_logger(
        logger::LogFormat::from_settings(settings.log_json),
        settings.verbose,
    );
    tracing::debug!("Resolved settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    if let Err(e) = run(&cli.command, &settings).await {
        tracing::debug!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        // 庫存不足等操作錯誤已由 ConsoleNotifier 顯示
        if !e.is_out_of_stock() {
            eprintln!("💡 {}", e.recovery_suggestion());
        }
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn run(command: &CartCommand, settings: &CartSettings) -> storefront_cart::Result<()> {
    let storage = LocalStorage::new(settings.storage_path().to_string());
    let api = HttpStorefrontApi::from_config(settings)
        .inspect_err(|e| eprintln!("❌ {}", e.user_friendly_message()))?;
    let mut manager =
        CartManager::restore_with_key(storage, api, ConsoleNotifier, settings.storage_key())
            .await
            .inspect_err(|e| eprintln!("❌ {}", e.user_friendly_message()))?;

    match *command {
        CartCommand::Show => {}
        CartCommand::Add { product_id } => {
            manager.add_product(product_id).await?;
        }
        CartCommand::Remove { product_id } => {
            manager.remove_product(product_id).await?;
        }
        CartCommand::Update { product_id, amount } => {
            manager
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await?;
        }
    }

    print_cart(manager.cart());
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    println!("🛒 {} products, {} items", cart.len(), cart.total_units());
    for entry in cart {
        let title = entry
            .details
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown");
        println!("  #{:<6} x{:<4} {}", entry.id, entry.amount, title);
    }
}

fn exit_code(error: &CartError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 1,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
