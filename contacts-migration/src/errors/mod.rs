mod migration;
mod publish;

pub use migration::MigrationError;
pub use publish::PublishError;
