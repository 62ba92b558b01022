pub mod comment;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod publish;

pub use comment::{render_comment, ValidationOutcome, MARKER};
pub use config::CommentEnv;
pub use error::GlossbotError;
pub use github::{EventContext, RepoInfo, SelectedToken, TokenSource};
