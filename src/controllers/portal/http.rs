use core::fmt::Write as _;

use backfire_core::{FormError, commit_credentials, parse_credentials_form};
use embassy_net::Ipv4Address;
use heapless::String;
use log::{info, warn};
use serde::Serialize;

use super::{
    PortalSignal,
    page::{FORM_PAGE, SAVED_PAGE},
};
use crate::{
    config::{AppConfig, BUILD_VERSION, LED_COUNT},
    net::http::{Error as HttpError, HttpConnection, HttpHandler, HttpMethod, HttpResult, ResponseHeaders},
    infrastructure::types::CredentialStore,
};

#[derive(Serialize)]
struct PortalInfo<'a> {
    ap_name: &'a str,
    firmware_version: &'a str,
    led_count: usize,
}

pub struct PortalHttpController {
    config: &'static AppConfig,
    store: &'static CredentialStore,
    saved: &'static PortalSignal,
    /// Absolute URL of the form, target of every captive redirect
    home: String<32>,
}

impl PortalHttpController {
    pub fn new(
        config: &'static AppConfig,
        store: &'static CredentialStore,
        saved: &'static PortalSignal,
    ) -> Self {
        Self {
            config,
            store,
            saved,
            home: home_url(config.portal.ip_address),
        }
    }

    async fn handle_save(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let parsed = match conn.read_body().await {
            Ok(body) => parse_credentials_form(body),
            Err(HttpError::NoData) => Err(FormError::MissingSsid),
            Err(HttpError::TooLarge) => {
                return conn
                    .write_text(ResponseHeaders::from_code(413), "Form too large")
                    .await;
            }
            Err(e) => return Err(e),
        };
        let credentials = match parsed {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!("portal: rejected form: {:?}", e);
                return conn
                    .write_text(ResponseHeaders::bad_request(), form_error_message(e))
                    .await;
            }
        };

        info!("portal: saving credentials for '{}'", credentials.ssid.as_str());
        // The flow is woken before answering, the client may already be gone
        if let Err(e) = commit_credentials(self.store, self.saved, credentials).await {
            warn!("portal: failed to store credentials: {:?}", e);
            return conn
                .write_text(ResponseHeaders::internal_error(), "Could not save credentials")
                .await;
        }

        conn.write_html(ResponseHeaders::success(), SAVED_PAGE).await
    }

    async fn handle_get_info(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let info = PortalInfo {
            ap_name: self.config.portal.ap_name,
            firmware_version: BUILD_VERSION,
            led_count: LED_COUNT,
        };
        conn.write_json(&info).await
    }
}

impl HttpHandler for PortalHttpController {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        match conn.route() {
            (HttpMethod::Get, "/") => conn.write_html(ResponseHeaders::success(), FORM_PAGE).await,
            (HttpMethod::Post, "/wifisave") => self.handle_save(conn).await,
            (HttpMethod::Get, "/api/info") => self.handle_get_info(conn).await,
            _ => conn.redirect(&self.home).await,
        }
    }
}

fn home_url(address: Ipv4Address) -> String<32> {
    let mut url = String::new();
    // "http://255.255.255.255/" is 23 bytes
    let _ = write!(url, "http://{}/", address);
    url
}

fn form_error_message(error: FormError) -> &'static str {
    match error {
        FormError::MissingSsid => "Network name is required",
        FormError::ValueTooLong => "Network name or password is too long",
        FormError::InvalidEncoding => "Malformed form data",
    }
}
