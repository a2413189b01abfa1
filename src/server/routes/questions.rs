use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::{self, count_questions, last_category_of},
        },
        Category, NewQuestion, Question, QuestionWriteError,
    },
    pagination::paginate,
    server::app::AppState,
    telemetry::record_mutation,
};

use super::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResponse, PageQuery};

// fields stay untyped here: a value the datastore cannot take is a failed
// insert, not a malformed request
#[derive(Deserialize)]
struct QuestionsBody {
    #[serde(default, rename = "searchTerm")]
    search_term: Option<Value>,
    #[serde(default)]
    question: Option<Value>,
    #[serde(default)]
    answer: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    difficulty: Option<Value>,
}

impl QuestionsBody {
    fn into_new_question(self) -> Result<NewQuestion, QuestionWriteError> {
        Ok(NewQuestion {
            question: text_field("question", self.question)?,
            answer: text_field("answer", self.answer)?,
            category: integer_field("category", self.category)?,
            difficulty: integer_field("difficulty", self.difficulty)?,
        })
    }
}

fn text_field(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<String>, QuestionWriteError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => {
            Ok(Some(scalar.to_string()))
        }
        Some(_) => Err(QuestionWriteError::InvalidField(field)),
    }
}

/// Integers, or strings holding one.
fn integer_field(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<i64>, QuestionWriteError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or(QuestionWriteError::InvalidField(field)),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| QuestionWriteError::InvalidField(field)),
        Some(_) => Err(QuestionWriteError::InvalidField(field)),
    }
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions: i64,
    categories: Vec<Category>,
    #[serde(rename = "currentCategories")]
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions: i64,
    #[serde(rename = "currentCategories")]
    current_category: Option<String>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    question: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions: i64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
}

/// Type of the category the last of `questions` belongs to.
async fn current_category_name(
    pool: &SqlitePool,
    questions: &[Question],
) -> sqlx::Result<Option<String>> {
    match last_category_of(questions) {
        Some(id) => Ok(get_category(pool, id).await?.map(|c| c.kind)),
        None => Ok(None),
    }
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let selection = questions::get_questions_ordered_by_category(&pool).await?;
    let page = paginate(&selection, query.page());
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    let questions = page.to_vec();
    Ok(Json(QuestionsPage {
        success: true,
        current_category: current_category_name(&pool, &questions).await?,
        total_questions: count_questions(&pool).await?,
        categories: get_all_categories(&pool).await?,
        questions,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<Deleted>> {
    let result = questions::delete_question(&pool, id).await;
    record_mutation("delete", &result);
    if let Err(error) = result {
        tracing::warn!(%error, "Cannot delete question");
        return Err(ApiError::Unprocessable);
    }
    tracing::info!(id, "Deleted question");

    let remaining = async {
        let selection = questions::get_all_questions(&pool).await?;
        let total = count_questions(&pool).await?;
        Ok::<_, sqlx::Error>((paginate(&selection, query.page()).to_vec(), total))
    }
    .await;
    let (page, total_questions) = remaining.map_err(|error| {
        tracing::warn!(%error, "Cannot list questions after delete");
        ApiError::Unprocessable
    })?;

    Ok(Json(Deleted {
        success: true,
        deleted: id,
        question: page,
        total_questions,
    }))
}

async fn create_or_search(
    State(pool): State<SqlitePool>,
    ApiJson(mut body): ApiJson<QuestionsBody>,
) -> ApiResponse<Response> {
    match body.search_term.take() {
        Some(Value::Null) | None => Ok(create(&pool, body).await?.into_response()),
        Some(Value::String(term)) => Ok(search(&pool, &term).await?.into_response()),
        Some(term) => Ok(search(&pool, &term.to_string()).await?.into_response()),
    }
}

async fn search(pool: &SqlitePool, term: &str) -> ApiResponse<Json<SearchResults>> {
    let questions = questions::search_questions(pool, term).await?;
    tracing::debug!(term, found = questions.len(), "Searched questions");
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResults {
        success: true,
        current_category: current_category_name(pool, &questions).await?,
        total_questions: count_questions(pool).await?,
        questions,
    }))
}

async fn create(pool: &SqlitePool, body: QuestionsBody) -> ApiResponse<Json<Created>> {
    let result = match body.into_new_question() {
        Ok(new_question) => questions::create_question(pool, new_question).await,
        Err(error) => Err(error),
    };
    record_mutation("create", &result);
    match result {
        Ok(id) => {
            tracing::info!(id, "Created question");
            Ok(Json(Created { success: true }))
        }
        Err(error) => {
            tracing::warn!(%error, "Cannot create question");
            Err(ApiError::Unprocessable)
        }
    }
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
}
