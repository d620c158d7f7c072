//! Generation provider identifiers.

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Amazon Bedrock through the AWS SDK
    Bedrock,
    /// Bedrock-compatible REST endpoint with bearer auth
    Http,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bedrock" => Some(Self::Bedrock),
            "http" => Some(Self::Http),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bedrock => "bedrock",
            Self::Http => "http",
        }
    }
}
