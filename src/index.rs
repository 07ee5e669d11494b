use askama::Template;
use axum::extract::State;

use crate::app::AppState;
use crate::error::PageError;
use crate::news::{self, NewsItem};
use crate::template::HtmlTemplate;
use crate::weather::{self, WeatherSnapshot};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    icon: String,
    weather: WeatherSnapshot,
    news: Vec<NewsItem>,
}

pub async fn get_index(
    State(state): State<AppState>,
) -> Result<HtmlTemplate<IndexTemplate>, PageError> {
    let weather = weather::fetch_weather(
        &state.http,
        &state.config.weather_url,
        &state.config.city,
        &state.config.api_key,
    )
    .await?;
    let news = news::fetch_news(&state.http, &state.config.news_url, &state.extractor).await?;
    log::debug!(
        "rendering homepage with icon {} and {} stories",
        weather.icon,
        news.len()
    );
    Ok(HtmlTemplate(IndexTemplate {
        icon: weather.icon.clone(),
        weather,
        news,
    }))
}
