use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Fields of a question to insert. Missing values are passed through to the
/// datastore, which rejects them.
#[derive(Debug, Default)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionWriteError {
    #[error("question {0} does not exist")]
    Missing(i64),
    #[error("{0} cannot be stored")]
    InvalidField(&'static str),
    #[error("failed to insert question")]
    InsertFailed(#[source] sqlx::Error),
    #[error("failed to delete question {id}")]
    DeleteFailed {
        id: i64,
        #[source]
        source: sqlx::Error,
    },
}

/// Category of the last question in the list.
pub fn last_category_of(questions: &[Question]) -> Option<i64> {
    questions.last().map(|q| q.category)
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_ordered_by_category(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY category, id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE category = ?1 ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        "SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

/// Ids of every question, or of the questions in `category` when given.
pub async fn get_question_ids(pool: &SqlitePool, category: Option<i64>) -> sqlx::Result<Vec<i64>> {
    match category {
        Some(category) => {
            sqlx::query_scalar("SELECT id FROM questions WHERE category = ?1 ORDER BY id")
                .bind(category)
                .fetch_all(pool)
                .await
        }
        None => {
            sqlx::query_scalar("SELECT id FROM questions ORDER BY id")
                .fetch_all(pool)
                .await
        }
    }
}

/// Case-insensitive substring search on the question text.
///
/// Matching happens here rather than with SQLite `LIKE`, which only folds
/// ASCII case. The term is matched literally.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let needle = term.to_lowercase();
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect())
}

pub async fn create_question(
    pool: &SqlitePool,
    question: NewQuestion,
) -> Result<i64, QuestionWriteError> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question.question)
    .bind(question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(pool)
    .await
    .map_err(QuestionWriteError::InsertFailed)?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<(), QuestionWriteError> {
    let deleted = sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|source| QuestionWriteError::DeleteFailed { id, source })?
        .rows_affected();
    if deleted == 0 {
        return Err(QuestionWriteError::Missing(id));
    }
    Ok(())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(id) DO UPDATE SET
    question = excluded.question,
    answer = excluded.answer,
    category = excluded.category,
    difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
