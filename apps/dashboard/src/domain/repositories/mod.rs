// Ports the application core depends on
// Implementations live in the infrastructure layer

pub mod session_storage;
pub mod user_directory;

pub use session_storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY};
pub use user_directory::UserDirectory;
