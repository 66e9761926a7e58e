use crate::entities;
use crate::errors::PalisadeError;
use crate::settings::Database as DbCfg;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use serde::{Deserialize, Serialize};

/// A stored authorization rule. `entity` is either an actor id or a group
/// name; which one is decided by the lookup performed, not by the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub path: String,
    pub action: String,
    pub entity: String,
    pub allowed: bool,
    pub created_at: i64,
}

impl From<entities::rule::Model> for Rule {
    fn from(model: entities::rule::Model) -> Self {
        Self {
            path: model.path,
            action: model.action,
            entity: model.entity,
            allowed: model.allowed,
            created_at: model.created_at,
        }
    }
}

pub async fn init(cfg: &DbCfg) -> Result<DatabaseConnection, PalisadeError> {
    let db = Database::connect(&cfg.url).await?;
    Ok(db)
}

/// Persist a new rule. The (path, action, entity) triple is the natural key;
/// a second insert for the same triple fails with `RuleConflict` and leaves
/// the stored rule untouched. The primary key makes this exactly-once even
/// under concurrent inserts.
pub async fn add_rule(
    db: &DatabaseConnection,
    path: &str,
    action: &str,
    entity: &str,
    allowed: bool,
) -> Result<Rule, PalisadeError> {
    require_non_empty("path", path)?;
    require_non_empty("action", action)?;
    require_non_empty("entity", entity)?;

    let created_at = Utc::now().timestamp();
    let rule = entities::rule::ActiveModel {
        path: Set(path.to_string()),
        action: Set(action.to_string()),
        entity: Set(entity.to_string()),
        allowed: Set(allowed),
        created_at: Set(created_at),
    };

    match entities::Rule::insert(rule).exec_without_returning(db).await {
        Ok(_) => Ok(Rule {
            path: path.to_string(),
            action: action.to_string(),
            entity: entity.to_string(),
            allowed,
            created_at,
        }),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(PalisadeError::RuleConflict {
                path: path.to_string(),
                action: action.to_string(),
                entity: entity.to_string(),
            }),
            _ => Err(err.into()),
        },
    }
}

/// Exact-match lookup; no wildcard, prefix, or hierarchy matching. Absence
/// is `None`, never an error.
pub async fn get_rule(
    db: &DatabaseConnection,
    path: &str,
    action: &str,
    entity: &str,
) -> Result<Option<Rule>, PalisadeError> {
    use entities::rule::{Column, Entity};

    let found = Entity::find()
        .filter(Column::Path.eq(path))
        .filter(Column::Action.eq(action))
        .filter(Column::Entity.eq(entity))
        .one(db)
        .await?;
    Ok(found.map(Rule::from))
}

/// One rule keyed only by entity, first in (path, action) order. The denial
/// reporter considers a single rule per group; a group holding several rules
/// only ever surfaces the first.
pub async fn get_rule_for_entity(
    db: &DatabaseConnection,
    entity: &str,
) -> Result<Option<Rule>, PalisadeError> {
    use entities::rule::{Column, Entity};

    let found = Entity::find()
        .filter(Column::Entity.eq(entity))
        .order_by_asc(Column::Path)
        .order_by_asc(Column::Action)
        .one(db)
        .await?;
    Ok(found.map(Rule::from))
}

/// Every rule whose entity matches, ordered by (path, action). Covers both
/// "rules granted to this actor" and "rules granted to this group".
pub async fn list_rules_for_entity(
    db: &DatabaseConnection,
    entity: &str,
) -> Result<Vec<Rule>, PalisadeError> {
    use entities::rule::{Column, Entity};

    let rules = Entity::find()
        .filter(Column::Entity.eq(entity))
        .order_by_asc(Column::Path)
        .order_by_asc(Column::Action)
        .all(db)
        .await?;
    Ok(rules.into_iter().map(Rule::from).collect())
}

/// Record that `actor` belongs to `group_name`. A duplicate membership fails
/// with `MembershipConflict`.
pub async fn add_membership(
    db: &DatabaseConnection,
    actor: &str,
    group_name: &str,
) -> Result<(), PalisadeError> {
    require_non_empty("actor", actor)?;
    require_non_empty("group name", group_name)?;

    let member = entities::group_member::ActiveModel {
        actor: Set(actor.to_string()),
        group_name: Set(group_name.to_string()),
        created_at: Set(Utc::now().timestamp()),
    };

    match entities::GroupMember::insert(member)
        .exec_without_returning(db)
        .await
    {
        Ok(_) => Ok(()),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(PalisadeError::MembershipConflict {
                actor: actor.to_string(),
                group: group_name.to_string(),
            }),
            _ => Err(err.into()),
        },
    }
}

/// Group names the actor belongs to; empty if none (not an error).
pub async fn get_groups(
    db: &DatabaseConnection,
    actor: &str,
) -> Result<Vec<String>, PalisadeError> {
    use entities::group_member::{Column, Entity};

    let rows = Entity::find()
        .filter(Column::Actor.eq(actor))
        .order_by_asc(Column::GroupName)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| m.group_name).collect())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), PalisadeError> {
    if value.trim().is_empty() {
        return Err(PalisadeError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
