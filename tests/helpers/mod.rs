pub mod builders;
pub mod db;

pub use builders::RuleBuilder;
pub use db::TestDb;
