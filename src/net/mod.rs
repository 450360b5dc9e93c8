//! HTTP/1.1 server for the provisioning portal
pub(crate) mod http;
