pub mod disposal;
pub mod memory;
pub mod user;

pub use disposal::PostgresDisposalRepository;
pub use memory::InMemoryDisposalRepository;
pub use memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
