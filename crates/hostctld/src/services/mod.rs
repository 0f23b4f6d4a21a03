//! The four control-plane services.

mod clock;
mod credential;
mod display;
mod network;

pub use self::clock::ClockService;
pub use self::credential::CredentialService;
pub use self::display::DisplayService;
pub use self::network::NetworkService;
