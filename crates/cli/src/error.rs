use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the CLI, one variant per failure domain so the exit
/// path can report which step went wrong.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("browser session failed: {0}")]
    Session(#[from] extlaunch::Error),

    #[error("captcha solve failed: {0}")]
    Solver(#[from] extlaunch_solver::SolverError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_keep_the_underlying_step() {
        let inner = extlaunch::Error::NavigationFailed {
            url: "https://example.com".to_string(),
            reason: "net::ERR_CONNECTION_REFUSED".to_string(),
        };
        let error = CliError::from(inner);
        let text = error.to_string();
        assert!(text.starts_with("browser session failed"));
        assert!(text.contains("net::ERR_CONNECTION_REFUSED"));
    }

    #[test]
    fn solver_errors_are_labeled() {
        let inner = extlaunch_solver::SolverError::PollExhausted {
            task_id: "task-1".to_string(),
            attempts: 24,
        };
        let text = CliError::from(inner).to_string();
        assert!(text.starts_with("captcha solve failed"));
        assert!(text.contains("task-1"));
    }
}
