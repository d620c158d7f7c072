//! Generation provider implementations.

pub mod bedrock;
pub mod http;

#[cfg(test)]
pub(crate) mod test_server;

pub use bedrock::BedrockClient;
pub use http::HttpGenerationClient;
