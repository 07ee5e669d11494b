use std::net::SocketAddr;

use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use url::Url;

use crate::app::{Config, create_app};

mod app;
mod error;
mod index;
mod news;
mod template;
mod weather;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "WEATHER_CITY", default_value = "Toronto")]
    city: String,

    #[arg(long, env = "WEATHER_URL", default_value = weather::OPENWEATHER_URL)]
    weather_url: String,

    #[arg(long, env = "NEWS_URL", default_value = "https://dev.to/")]
    news_url: Url,

    #[arg(short, long, env = "KEY_FILE_PATH")]
    key_file_path: Option<String>,

    #[arg(short, long, env = "CERT_FILE_PATH")]
    cert_file_path: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    let app = create_app(Config {
        city: args.city,
        api_key: args.api_key,
        weather_url: args.weather_url,
        news_url: args.news_url,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    log::info!("listening on {}", addr);
    if let Some(key_file_path) = args.key_file_path {
        let cert_file_path = args.cert_file_path.unwrap();
        log::info!(
            "using tls with key file {} and cert file {}",
            key_file_path,
            cert_file_path
        );
        let tls = RustlsConfig::from_pem_file(cert_file_path, key_file_path)
            .await
            .unwrap();
        axum_server::bind_rustls(addr, tls)
            .serve(app.into_make_service())
            .await
            .unwrap();
    } else {
        axum_server::bind(addr)
            .serve(app.into_make_service())
            .await
            .unwrap();
    }
}
