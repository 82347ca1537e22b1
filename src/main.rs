use anyhow::Context;
use enrollease::api::{self, app_state::AppState};
use enrollease::config::loader::ConfigLoader;
use enrollease::models::intent::IntentCorpus;
use enrollease::observability::{
    AppMetrics, HealthCheckResult, ObservabilityState, create_observability_router, init_tracing,
};
use enrollease::services::{
    FormGate, GreetingShortcut, Responder, ResponderOptions, create_chat_session_service,
    sweep_idle_sessions,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config)?;

    init_tracing(&config.logging.level);
    info!("Starting {} ({})", config.app_name, config.environment);

    let corpus = IntentCorpus::load(&config.corpus.path)
        .with_context(|| format!("failed to load corpus {}", config.corpus.path.display()))?;
    info!(
        "Corpus loaded: {} intents, {} patterns",
        corpus.intents.len(),
        corpus.pattern_count()
    );

    let responder = Arc::new(Responder::from_corpus(
        &corpus,
        ResponderOptions::from(config.chatbot.clone()),
    )?);
    info!("Responder initialized");

    let greeter = config.chatbot.greeting_shortcut.then(|| {
        info!("Greeting shortcut enabled");
        Arc::new(GreetingShortcut::new(config.chatbot.greeting_seed))
    });

    let metrics = Arc::new(AppMetrics::default());
    let form_gate = FormGate::from(config.form.clone());
    let chat_service = create_chat_session_service(
        responder.clone(),
        greeter,
        form_gate.clone(),
        metrics.clone(),
        Duration::from_secs(config.session.idle_timeout),
    );
    let app_state = AppState::new(chat_service, form_gate);
    info!("Application state created");

    tokio::spawn(sweep_idle_sessions(
        app_state.chat_service.clone(),
        Duration::from_secs(config.session.sweep_interval),
    ));
    info!(
        "Idle session sweep every {}s (timeout {}s)",
        config.session.sweep_interval, config.session.idle_timeout
    );

    // 创建可观测性状态并集成路由
    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
    ));
    observability_state
        .add_health_check(HealthCheckResult {
            name: "corpus".to_string(),
            healthy: responder.pattern_count() > 0,
            message: format!("{} patterns indexed", responder.pattern_count()),
        })
        .await;

    let router = create_observability_router(observability_state)
        .merge(api::create_router(app_state))
        .layer(CorsLayer::permissive());
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
