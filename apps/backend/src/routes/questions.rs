use actix_web::web;
use serde::Deserialize;

use crate::error::AppError;
use crate::questions::{Category, Question};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct QuestionQuery {
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// GET /api/questions/{category}?type=
async fn random_question(
    path: web::Path<String>,
    query: web::Query<QuestionQuery>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Question>, AppError> {
    let category = Category::parse(&path)?;
    let question = app_state
        .questions
        .pick(category, query.kind.as_deref(), &mut rand::rng())?
        .clone();
    Ok(web::Json(question))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{category}", web::get().to(random_question));
}
