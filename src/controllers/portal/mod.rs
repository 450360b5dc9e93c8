//! Captive portal controller
//!
//! Serves the credential form on the provisioning access point, persists
//! what the user submits and hands it to the provisioning flow.

mod http;
mod page;

use backfire_core::WifiCredentials;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

pub use http::PortalHttpController;

/// Raised once credentials have been stored
pub type PortalSignal = Signal<CriticalSectionRawMutex, WifiCredentials>;
