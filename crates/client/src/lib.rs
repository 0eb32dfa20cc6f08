//! REST client for the FinTrack server: transport, envelope parsing, cookie
//! sessions with token refresh, and typed endpoints.

pub use api::FinTrackApi;
pub use auth::AuthClient;
pub use convert::{
    investment_from_view, investment_new, investment_update, register_request,
    transaction_from_view, transaction_to_new, transactions_from_views,
};
pub use envelope::{error_message, parse_envelope, parse_response, parse_unit};
pub use error::ClientError;
pub use guard::{ACCESS_COOKIE, PUBLIC_ROUTES, RouteDecision, guard};
pub use market::{DEFAULT_RATES_URL, FALLBACK_USD_TRY_RATE, PublicRates, usd_try_from_feed};
pub use session::{SavedSession, Session, SessionStore, StoredCookie};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

mod api;
mod auth;
mod convert;
mod envelope;
mod error;
mod guard;
mod market;
mod session;
mod transport;
