// Gym Membership Registry - Core Library
// Exposes the registry for the console binary and for tests

pub mod member;
pub mod validation;
pub mod registry;
pub mod config;
pub mod console;

// Only compile the browser when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use member::{Member, MemberDetails, MemberId};
pub use validation::{
    validate_name, validate_age, validate_phone, validate_details, InvalidField,
};
pub use registry::{MemberRegistry, RegistryError};
pub use config::{RegistryConfig, DateSource, ConfigError};
pub use console::{Console, Browser, format_table};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
