use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::quiz::QuizScope;

// clients send the selected category as {"type": ..., "id": ...}, with the id
// either a number or a string, and id 0 for "all categories"
#[derive(Deserialize)]
struct CategoryRef {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

pub fn deserialize_quiz_scope<'de, D>(deserializer: D) -> Result<QuizScope, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<CategoryRef>::deserialize(deserializer)?;
    Ok(value
        .map(|category| QuizScope::from_category_id(category.id))
        .unwrap_or(QuizScope::Any))
}
