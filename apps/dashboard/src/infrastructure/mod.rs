// Infrastructure layer module
// Adapters behind the domain ports: bundled data, account directory, session storage

pub mod mock_data;
pub mod repositories;
pub mod storage;
