use crate::commands::CommandResult;
use crmsuite_core::config::{AppConfig, LoadOptions, StoreBackend};
use crmsuite_db::{connect_with_settings, migrations, unsupported_url_reason};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "migrate",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    if config.database.backend == StoreBackend::Memory {
        return CommandResult::success("migrate", "memory backend has no migrations to apply");
    }
    let Some(url) = config.database.url_value() else {
        return CommandResult::failure(
            "migrate",
            "config_validation",
            "DATABASE_URL is not set; nothing to migrate",
            2,
        );
    };
    if let Some(reason) = unsupported_url_reason(url) {
        return CommandResult::failure("migrate", "config_validation", reason, 2);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "migrate",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;
        pool.close().await;
        Ok::<(), (&'static str, String, u8)>(())
    });

    match result {
        Ok(()) => CommandResult::success("migrate", "applied pending migrations"),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("migrate", error_class, message, exit_code)
        }
    }
}
