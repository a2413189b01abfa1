use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    quiz::{pick_unseen, QuizScope},
    server::{app::AppState, deserializers::deserialize_quiz_scope},
    telemetry::QUIZ_ROUNDS,
};

use super::{ApiJson, ApiResponse};

#[derive(Deserialize)]
struct QuizRound {
    #[serde(default = "any_category", deserialize_with = "deserialize_quiz_scope")]
    quiz_category: QuizScope,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    previous_questions: Vec<i64>,
}

fn any_category() -> QuizScope {
    QuizScope::Any
}

#[derive(Serialize)]
struct NextQuestion {
    question: Option<Question>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    ApiJson(round): ApiJson<QuizRound>,
) -> ApiResponse<Json<NextQuestion>> {
    let candidates = questions::get_question_ids(&pool, round.quiz_category.category()).await?;
    let picked = pick_unseen(&candidates, &round.previous_questions, &mut rand::rng());
    let question = match picked {
        Some(id) => questions::get_question(&pool, id).await?,
        None => None,
    };
    let outcome = if question.is_some() {
        "question"
    } else {
        "exhausted"
    };
    QUIZ_ROUNDS.with_label_values(&[outcome]).inc();
    tracing::debug!(
        scope = ?round.quiz_category,
        asked = round.previous_questions.len(),
        outcome,
        "Quiz round"
    );
    Ok(Json(NextQuestion { question }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(play_quiz))
}
