use recommendation_console::{
    config::Config,
    console::{self, Command},
    services::HttpRecommendationApi,
    RecommendationController,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, the view is printed on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommendation_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let api = HttpRecommendationApi::new(&config)?;
    tracing::info!(collection_url = %api.collection_url(), "Starting recommendation console");

    let mut controller = RecommendationController::new(api);

    if let Err(e) = controller.health().await {
        tracing::warn!(error = %e, "Recommendation service health check failed");
    }

    println!("{}", console::help_text());
    print!("{}", console::render_view(&controller));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", console::help_text()),
            Ok(command) => {
                console::execute(&mut controller, command).await;
                print!("{}", console::render_view(&controller));
            }
            Err(message) => println!("{}", message),
        }
    }

    tracing::info!("Recommendation console stopped");
    Ok(())
}
