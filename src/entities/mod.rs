pub mod group_member;
pub mod rule;

pub use group_member::Entity as GroupMember;
pub use rule::Entity as Rule;
