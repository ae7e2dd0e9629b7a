use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};
use std::time::Instant;

lazy_static! {
    /// Post operations segmented by operation and outcome (ok, not_found, invalid, error).
    pub static ref POST_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "post_operations_total",
        "Post operations segmented by operation and outcome",
        &["operation", "result"]
    )
    .expect("failed to register post_operations_total");

    /// Time spent in the repository per operation.
    pub static ref POST_REPOSITORY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "post_repository_duration_seconds",
        "Repository call duration segmented by operation",
        &["operation"]
    )
    .expect("failed to register post_repository_duration_seconds");
}

/// Starts a repository timer; the duration is recorded when the guard drops.
pub fn repository_timer(operation: &'static str) -> RepositoryTimer {
    RepositoryTimer {
        operation,
        started: Instant::now(),
    }
}

pub struct RepositoryTimer {
    operation: &'static str,
    started: Instant,
}

impl Drop for RepositoryTimer {
    fn drop(&mut self) {
        POST_REPOSITORY_DURATION_SECONDS
            .with_label_values(&[self.operation])
            .observe(self.started.elapsed().as_secs_f64());
    }
}

/// Records the outcome label for an operation.
pub fn record_outcome<T>(operation: &str, outcome: &crate::error::Result<T>) {
    use crate::error::AppError;

    let result = match outcome {
        Ok(_) => "ok",
        Err(AppError::NotFound(_)) => "not_found",
        Err(AppError::ValidationError(_))
        | Err(AppError::InvalidNodePayload(_))
        | Err(AppError::UnsupportedNodeType(_))
        | Err(AppError::BadRequest(_)) => "invalid",
        Err(_) => "error",
    };
    POST_OPERATIONS_TOTAL
        .with_label_values(&[operation, result])
        .inc();
}
