pub mod config;
pub mod error;
pub mod record;

pub use config::RelayConfig;
pub use error::RelayError;
pub use record::{RawRecord, SnsEnvelope, TopicInfo, TopicType};
