use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use aisle_classify::{ClassificationResult, Suggestion};
use aisle_core::{Category, Error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::state::ServiceState;

const DEFAULT_SUGGEST_LIMIT: usize = 5;
const MAX_SUGGEST_LIMIT: usize = 50;

#[derive(Deserialize)]
struct ClassifyRequest {
    text: Option<String>,
}

#[derive(Deserialize)]
struct SuggestRequest {
    text: Option<String>,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct CategoryResponse {
    #[serde(flatten)]
    result: ClassificationResult,
    emoji: &'static str,
}

#[derive(Serialize)]
struct SuggestResponse {
    suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    catalog_size: usize,
    dimension: usize,
    encoder_configured: bool,
    model_loaded: bool,
}

#[derive(Serialize)]
struct CategoryCount {
    category: Category,
    emoji: &'static str,
    count: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<ServiceState>, host: &str, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::from(state.clone()))
                .configure(configure)
        })
        .bind((host, port))?
        .run()
        .await
    }
}

/// Register the API routes. Expects `web::Data<ServiceState>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/category", web::post().to(classify))
        .route("/api/suggest", web::post().to(suggest))
        .route("/api/health", web::get().to(health))
        .route("/api/categories", web::get().to(list_categories))
        .route("/api/catalog/reload", web::post().to(reload_catalog));
}

fn error_json(message: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn error_response(e: &Error) -> HttpResponse {
    match e {
        Error::DimensionMismatch { .. }
        | Error::InvalidConfig(_)
        | Error::Schema(_)
        | Error::Serialization(_) => HttpResponse::BadRequest().json(error_json(e)),
        Error::EncoderUnavailable(_) => HttpResponse::ServiceUnavailable().json(error_json(e)),
        Error::Io(_) => {
            error!("Request failed: {}", e);
            HttpResponse::InternalServerError().json(error_json(e))
        }
    }
}

fn blocking_failed(e: actix_web::error::BlockingError) -> HttpResponse {
    error!("Blocking task failed: {}", e);
    HttpResponse::InternalServerError().json(error_json("Internal error"))
}

async fn classify(
    state: web::Data<ServiceState>,
    req: web::Json<ClassifyRequest>,
) -> ActixResult<HttpResponse> {
    let text = match req.into_inner().text {
        Some(text) => text,
        None => return Ok(HttpResponse::BadRequest().json(error_json("Text is required"))),
    };

    let engine = state.engine();
    let outcome = web::block(move || engine.classify_text(&text)).await;

    Ok(match outcome {
        Ok(Ok(result)) => {
            let emoji = result.category.emoji();
            HttpResponse::Ok().json(CategoryResponse { result, emoji })
        }
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    })
}

async fn suggest(
    state: web::Data<ServiceState>,
    req: web::Json<SuggestRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let text = match req.text {
        Some(text) => text,
        None => return Ok(HttpResponse::BadRequest().json(error_json("Text is required"))),
    };
    let limit = req
        .limit
        .unwrap_or(DEFAULT_SUGGEST_LIMIT)
        .min(MAX_SUGGEST_LIMIT);

    let engine = state.engine();
    let outcome = web::block(move || engine.suggest_text(&text, limit)).await;

    Ok(match outcome {
        Ok(Ok(suggestions)) => HttpResponse::Ok().json(SuggestResponse { suggestions }),
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    })
}

async fn health(state: web::Data<ServiceState>) -> ActixResult<HttpResponse> {
    let engine = state.engine();
    let probe = engine.clone();
    let model_loaded = web::block(move || probe.encoder_ready())
        .await
        .unwrap_or(false);

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        catalog_size: engine.catalog().len(),
        dimension: engine.catalog().dimension(),
        encoder_configured: engine.has_encoder(),
        model_loaded,
    }))
}

async fn list_categories(state: web::Data<ServiceState>) -> ActixResult<HttpResponse> {
    let counts: Vec<CategoryCount> = state
        .engine()
        .catalog()
        .category_counts()
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category,
            emoji: category.emoji(),
            count,
        })
        .collect();
    Ok(HttpResponse::Ok().json(counts))
}

async fn reload_catalog(state: web::Data<ServiceState>) -> ActixResult<HttpResponse> {
    let state = state.clone();
    let outcome = web::block(move || state.reload().map(|engine| engine.catalog().len())).await;

    Ok(match outcome {
        Ok(Ok(size)) => HttpResponse::Ok().json(serde_json::json!({
            "result": true,
            "catalogSize": size,
        })),
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    })
}
