//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod module_access_repo;
pub mod module_repo;
pub mod user_group_membership_repo;
pub mod user_group_repo;
pub mod user_repo;

pub use module_access_repo::ModuleAccessRepo;
pub use module_repo::ModuleRepo;
pub use user_group_membership_repo::UserGroupMembershipRepo;
pub use user_group_repo::UserGroupRepo;
pub use user_repo::UserRepo;
