//! CSV import and export of the trivia tables.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: &Path, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}

pub async fn export_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(path)?
    }
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Exporting to {}",
        path.display()
    );
    write_to(&path.join(CATEGORIES_FILE), categories)?;
    write_to(&path.join(QUESTIONS_FILE), questions)?;
    Ok(())
}

/// Categories go in first so questions can reference them.
pub async fn import_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(&path.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&path.join(QUESTIONS_FILE))?;
    tracing::info!(
        categories = categories.len(),
        questions = questions.len(),
        "Importing from {}",
        path.display()
    );
    import_categories(pool, categories)
        .await
        .context("Failed to import categories")?;
    import_questions(pool, questions)
        .await
        .context("Failed to import questions")?;
    Ok(())
}
