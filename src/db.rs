pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
pub mod entity_repo;
pub use entity_repo::EntityRepository;
