use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PalisadeError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(palisade::io))]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    #[diagnostic(code(palisade::config))]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(palisade::serde))]
    Serde(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    #[diagnostic(code(palisade::db))]
    Db(#[from] sea_orm::DbErr),

    #[error("A rule already exists for `{action}` `{path}` with entity `{entity}`")]
    #[diagnostic(
        code(palisade::rule_conflict),
        help("Rules are immutable; the stored rule keeps its original allowed flag")
    )]
    RuleConflict {
        path: String,
        action: String,
        entity: String,
    },

    #[error("`{actor}` is already a member of group `{group}`")]
    #[diagnostic(code(palisade::membership_conflict))]
    MembershipConflict { actor: String, group: String },

    #[error("Invalid input: {0}")]
    #[diagnostic(code(palisade::validation))]
    Validation(String),

    #[error("Unknown filter `{0}`")]
    #[diagnostic(
        code(palisade::unknown_filter),
        help("Known filters: `actor_blocklist`, `path_prefix`")
    )]
    UnknownFilter(String),
}
