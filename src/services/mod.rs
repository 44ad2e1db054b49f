pub mod overrides;
pub mod placeholder;
pub mod redaction;
pub mod settings_store;
pub mod validator;

pub use overrides::apply_overrides;
pub use placeholder::{substitute, substitute_str, PlaceholderError};
pub use redaction::{SecretScrubber, REDACTED};
pub use settings_store::SettingsStore;
pub use validator::validate;
