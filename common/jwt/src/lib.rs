pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod token;

pub use claims::{Claim, Header, Payload};
pub use config::{ConfigResolver, FnSource, SettingNames, SettingsSource, TokenConfig};
pub use error::{TokenError, TokenResult};
pub use token::JwtAuthority;
