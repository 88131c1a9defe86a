pub mod http;
pub mod identity;
pub mod progress;
pub mod quran;
pub mod records;
pub mod stories;
pub mod words;

pub use http::ApiClient;
pub use identity::EnvIdentity;
pub use progress::HttpProgressSink;
pub use quran::HttpExampleSource;
pub use stories::HttpStorySource;
pub use words::HttpWordSource;
