use vitrina_app::{config::AppConfig, database};

pub(crate) async fn run(config: &AppConfig) -> Result<(), String> {
    let Some(database_url) = &config.storage.database_url else {
        return Err("DATABASE_URL is required to run migrations".to_string());
    };

    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}
