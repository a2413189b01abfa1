use prometheus::register_counter_vec;
use prometheus::CounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_ROUNDS: CounterVec = register_counter_vec!(
        "quiz_rounds_total",
        "Number of quiz rounds served",
        &["outcome"]
    )
    .unwrap();
    pub static ref QUESTION_MUTATIONS: CounterVec = register_counter_vec!(
        "questions_mutations_total",
        "Number of question inserts and deletes",
        &["operation", "result"]
    )
    .unwrap();
}

pub fn record_mutation<T, E>(operation: &str, result: &Result<T, E>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    QUESTION_MUTATIONS
        .with_label_values(&[operation, outcome])
        .inc();
}

pub fn init_tracing() {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_mutation_counts_by_outcome() {
        let before_ok = QUESTION_MUTATIONS
            .with_label_values(&["telemetry-test", "ok"])
            .get();
        let before_err = QUESTION_MUTATIONS
            .with_label_values(&["telemetry-test", "error"])
            .get();

        record_mutation::<(), ()>("telemetry-test", &Ok(()));
        record_mutation::<(), ()>("telemetry-test", &Err(()));
        record_mutation::<(), ()>("telemetry-test", &Err(()));

        assert_eq!(
            QUESTION_MUTATIONS
                .with_label_values(&["telemetry-test", "ok"])
                .get(),
            before_ok + 1.0
        );
        assert_eq!(
            QUESTION_MUTATIONS
                .with_label_values(&["telemetry-test", "error"])
                .get(),
            before_err + 2.0
        );
    }
}
