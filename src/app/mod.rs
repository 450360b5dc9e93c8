mod fire;
mod provisioning;

pub use fire::init_fire_loop;
pub use provisioning::{ProvisioningError, auto_connect, clear_credentials};
