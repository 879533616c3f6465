/// Stack Error Types
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// The working directory is not inside a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    /// libgit2 errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// A `git` subprocess exited unsuccessfully
    #[error("git {command} failed: {stderr}")]
    Command {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Checking out a branch failed
    #[error("Could not checkout '{branch}': {reason}")]
    Checkout { branch: String, reason: String },

    /// Branch name rejected locally or by `git check-ref-format`
    #[error("Invalid branch name '{name}': {reason}")]
    InvalidBranchName { name: String, reason: String },

    /// `down` from an untracked branch
    #[error("No parent available for '{0}'")]
    NoParent(String),

    /// `up` from a branch without children
    #[error("No child branches available for '{0}'")]
    NoChildren(String),

    /// A rebase stopped on conflicts. Expected and recoverable via `gt cont`.
    #[error(
        "Rebase of '{child}' onto '{parent}' stopped: {cause}. \
         Resolve the conflicts, then run 'gt cont'"
    )]
    RebasePaused {
        parent: String,
        child: String,
        cause: String,
    },

    /// The user dismissed an interactive prompt
    #[error("Selection cancelled")]
    Cancelled,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Relationship store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl StackError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        StackError::Config(msg.into())
    }

    pub fn store<S: Into<String>>(msg: S) -> Self {
        StackError::Store(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        StackError::Validation(msg.into())
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        StackError::Network(msg.into())
    }

    pub fn auth<S: Into<String>>(msg: S) -> Self {
        StackError::Auth(msg.into())
    }

    pub fn checkout<S: Into<String>, R: Into<String>>(branch: S, reason: R) -> Self {
        StackError::Checkout {
            branch: branch.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_branch_name<S: Into<String>, R: Into<String>>(name: S, reason: R) -> Self {
        StackError::InvalidBranchName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn github_api(status: u16, message: String) -> Self {
        StackError::Network(format!("GitHub API error: {status} - {message}"))
    }

    /// True when the error is the recoverable conflict pause rather than a failure
    pub fn is_paused(&self) -> bool {
        matches!(self, StackError::RebasePaused { .. })
    }

    /// Exit code of a failed `git` subprocess, if this is one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            StackError::Command { code, .. } => *code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StackError>;
