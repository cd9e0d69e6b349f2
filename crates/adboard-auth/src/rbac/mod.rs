//! Role-based access control: role lookups and cached permission checks.

pub mod memory;
pub mod provider;
pub mod resolver;

pub use memory::MemoryRoleProvider;
pub use provider::RoleProvider;
pub use resolver::PermissionResolver;
