//! Cry classification - sends a clip to an external multimodal model and
//! returns a typed judgment.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - `ClassificationResult` and friends
//! - **API DTOs** (`gemini/dto.rs`) - Exact request/response shapes
//! - **Adapter** (`gemini/adapter.rs`) - Converts and validates DTOs
//! - **Client** (`gemini/client.rs`) - HTTP client for Gemini
//! - **Prompt** (`prompt.rs`) - Fixed instruction and response schema
//! - **Service** (`service.rs`) - The gateway the rest of the app calls
//!
//! # Usage
//!
//! ```ignore
//! use classifier::{ClassificationGateway, ClassifierConfig};
//!
//! let config = ClassifierConfig {
//!     api_key: "your-api-key".to_string(),
//!     ..Default::default()
//! };
//! let gateway = ClassificationGateway::from_config(&config)?;
//! let result = gateway.classify(clip).await?;
//! println!("{} ({:.0}%)", result.reason, result.confidence);
//! ```

pub mod domain;
pub mod gemini;
pub mod prompt;
pub mod service;
pub mod traits;

pub use domain::{ClassificationError, ClassificationResult, CryReason, Urgency};
pub use service::{ClassificationGateway, ClassifierConfig};
pub use traits::ClassifierApi;
