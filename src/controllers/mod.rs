pub mod portal;

pub use portal::{PortalHttpController, PortalSignal};
