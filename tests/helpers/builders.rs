use palisade::storage;
use sea_orm::DatabaseConnection;

/// Builder for creating test rules
pub struct RuleBuilder {
    path: String,
    action: String,
    entity: String,
    allowed: bool,
}

impl RuleBuilder {
    pub fn new(entity: &str) -> Self {
        Self {
            path: "/articles".to_string(),
            action: "POST".to_string(),
            entity: entity.to_string(),
            allowed: false,
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    pub fn allow(mut self) -> Self {
        self.allowed = true;
        self
    }

    pub async fn create(self, db: &DatabaseConnection) -> storage::Rule {
        storage::add_rule(db, &self.path, &self.action, &self.entity, self.allowed)
            .await
            .expect("Failed to create test rule")
    }
}
