// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_user_directory;

pub use in_memory_user_directory::InMemoryUserDirectory;
