use dotenvy::dotenv;

use fitness_tracker::models::config::Settings;
use fitness_tracker::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::load();

    run(settings).await
}
