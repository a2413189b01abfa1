use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{categories_by_id, get_all_categories},
            questions::{count_questions, get_questions_for_category, last_category_of},
        },
        Question,
    },
    server::app::AppState,
};

use super::{ApiError, ApiPath, ApiResponse};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions: i64,
    #[serde(rename = "currentCategories")]
    current_category: Option<i64>,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = get_all_categories(&pool).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: categories_by_id(categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<CategoryQuestionsResponse>> {
    let questions = get_questions_for_category(&pool, id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        current_category: last_category_of(&questions),
        total_questions: count_questions(&pool).await?,
        questions,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
}
