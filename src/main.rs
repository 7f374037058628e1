use log::info;
use sdweb::http::Response;
use sdweb::{server, App, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    init_logging(&cfg.logging.level);

    let mut app = App::new(&cfg);
    register_routes(&mut app);

    match &cfg.static_files.root {
        Some(root) => info!("serving static files from {root}"),
        None => info!("no static root configured, serving registered routes only"),
    }

    server::run(&mut app, &cfg)
}

fn init_logging(level: &str) {
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_env("RUST_LOG")
        .init();
}

fn register_routes(app: &mut App) {
    let cache = app.cache().clone();
    app.on("GET", "/api/status", move |_req| {
        let status = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "cache": {
                "entries": cache.len(),
                "recorded_bytes": cache.total_bytes(),
            },
        });
        Response::json(status.to_string())
    });
}
