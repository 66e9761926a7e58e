use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::errors::PalisadeError;
use crate::storage;

/// A (path, action) pair the actor is effectively restricted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeniedAction {
    pub path: String,
    pub action: String,
}

/// Where a decision came from, reported in the post-decision trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecisionSource {
    Individual,
    GroupDeny,
    Default,
}

struct Decision {
    allowed: bool,
    source: DecisionSource,
}

/// Check whether `actor` may perform `action` on `path`.
///
/// An individual rule is final in either direction: it can grant access a
/// group denies, or deny access a group grants. With no individual rule,
/// any matching group rule with `allowed = false` denies. With no matching
/// rule at all the answer is `true` (see the module docs on fail-open).
///
/// Each call performs fresh lookups; nothing is cached. Store failures
/// propagate unchanged and never substitute a default decision.
pub async fn evaluate(
    db: &DatabaseConnection,
    actor: &str,
    path: &str,
    action: &str,
) -> Result<bool, PalisadeError> {
    let decision = decide(db, actor, path, action).await?;
    // Observability only: emitted after the decision is made, never on the
    // decision path itself.
    tracing::debug!(
        actor,
        path,
        action,
        allowed = decision.allowed,
        source = ?decision.source,
        "access decision"
    );
    Ok(decision.allowed)
}

async fn decide(
    db: &DatabaseConnection,
    actor: &str,
    path: &str,
    action: &str,
) -> Result<Decision, PalisadeError> {
    if let Some(rule) = storage::get_rule(db, path, action, actor).await? {
        return Ok(Decision {
            allowed: rule.allowed,
            source: DecisionSource::Individual,
        });
    }

    for group in storage::get_groups(db, actor).await? {
        if let Some(rule) = storage::get_rule(db, path, action, &group).await? {
            // Deny-overrides: the first explicit deny is sufficient and no
            // later allow can reverse it.
            if !rule.allowed {
                return Ok(Decision {
                    allowed: false,
                    source: DecisionSource::GroupDeny,
                });
            }
        }
    }

    Ok(Decision {
        allowed: true,
        source: DecisionSource::Default,
    })
}

/// Consolidated "what can't I do" view for an actor.
///
/// For each of the actor's groups, one rule keyed by that group is fetched
/// and its (path, action) reported whenever the individual-level decision
/// for that pair resolves to deny. A group with no rule of its own, or an
/// actor with no groups, falls back to scanning the actor's own deny rules.
///
/// The result is a list, not a set: the same pair reported through two
/// groups appears twice.
pub async fn effective_denials(
    db: &DatabaseConnection,
    actor: &str,
) -> Result<Vec<DeniedAction>, PalisadeError> {
    let mut denials = Vec::new();
    let groups = storage::get_groups(db, actor).await?;

    if groups.is_empty() {
        push_individual_denies(db, actor, &mut denials).await?;
    } else {
        for group in &groups {
            match storage::get_rule_for_entity(db, group).await? {
                Some(rule) => {
                    let individual = evaluate(db, actor, &rule.path, &rule.action).await?;
                    if !individual {
                        denials.push(DeniedAction {
                            path: rule.path,
                            action: rule.action,
                        });
                    }
                }
                None => push_individual_denies(db, actor, &mut denials).await?,
            }
        }
    }

    tracing::debug!(actor, count = denials.len(), "effective denials computed");
    Ok(denials)
}

async fn push_individual_denies(
    db: &DatabaseConnection,
    actor: &str,
    denials: &mut Vec<DeniedAction>,
) -> Result<(), PalisadeError> {
    for rule in storage::list_rules_for_entity(db, actor).await? {
        if !rule.allowed {
            denials.push(DeniedAction {
                path: rule.path,
                action: rule.action,
            });
        }
    }
    Ok(())
}
