use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use clap::Parser;

use collab_server::config::Config;
use collab_server::handlers::root;
use collab_server::server::spawn_server;

fn cors(config: &Config) -> Cors {
    let cors = match &config.allowed_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allow_any_method().allow_any_header()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let srv_tx = spawn_server();

    let address = (config.host.clone(), config.port);
    log::info!("Server started on {}:{}", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&config))
            .wrap(middleware::Logger::default())
            .data(srv_tx.clone())
            .data(config.relay_settings())
            .data(config.execution_settings())
            .configure(root)
    })
    .bind(address)?
    .run()
    .await
}
