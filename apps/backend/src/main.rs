use actix_web::{web, App, HttpServer};
use cheers_backend::config::Config;
use cheers_backend::extractors::JsonLimit;
use cheers_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use cheers_backend::routes;
use cheers_backend::state::StateBuilder;
use cheers_backend::telemetry;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting party game backend on http://{}:{}",
        config.host, config.port
    );

    let app_state = StateBuilder::from_config(&config).build();
    let pours = app_state.pours.clone();
    info!(
        capacity = config.room.capacity,
        min_players = config.room.min_players,
        liveness_timeout_secs = config.room.liveness_timeout.whole_seconds(),
        "room ready"
    );

    let data = web::Data::new(app_state);
    let json_limit = config.max_json_payload_size;

    let served = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(TraceSpan)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(JsonLimit(json_limit))
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    info!("server stopped; stopping all pumps");
    pours.emergency_stop();
    served
}
