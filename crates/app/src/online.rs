//! Commands that talk to the FinTrack server.
//!
//! Cookies and the signed-in user are kept in the session file between runs.

use std::time::Duration;

use api_types::{auth::LoginRequest, transaction::TransactionQuery};
use chrono::NaiveDate;
use client::{
    ACCESS_COOKIE, AuthClient, FinTrackApi, PublicRates, ReqwestTransport, RouteDecision,
    SavedSession, Session, SessionStore, guard, investment_from_view, register_request,
    transactions_from_views,
};
use engine::{InvestmentAsset, MonthKey, PortfolioTotals, RegisterDraft, validate_login};
use serde::Serialize;

use crate::{
    config::{AppConfig, OnlineCommand},
    error::{AppError, Result},
    render::{self, Rendered},
};

const PASSWORD_VAR: &str = "FINTRACK_PASSWORD";

fn password() -> Result<String> {
    std::env::var(PASSWORD_VAR).map_err(|_| AppError::MissingPassword(PASSWORD_VAR))
}

struct Online {
    api: FinTrackApi<ReqwestTransport>,
    store: SessionStore,
}

impl Online {
    /// Builds the client and restores the saved session, if any.
    fn connect(settings: &AppConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(
            &settings.base_url,
            Duration::from_secs(settings.timeout_secs),
        )?;
        let store = SessionStore::new(&settings.session_path);
        let saved = store.load()?;
        transport.import_cookies(&saved.cookies);
        let auth = AuthClient::new(transport, &settings.api_prefix, Session::with_user(saved.user));
        Ok(Self {
            api: FinTrackApi::new(auth),
            store,
        })
    }

    fn transport(&self) -> &ReqwestTransport {
        self.api.auth().transport()
    }

    fn route(&self, path: &str) -> RouteDecision {
        guard(path, self.transport().has_cookie("/", ACCESS_COOKIE))
    }

    fn require_session(&self) -> Result<()> {
        match self.route("/") {
            RouteDecision::Allow => Ok(()),
            _ => Err(AppError::SignedOut),
        }
    }

    /// Writes the current user and cookies back, or removes the file once
    /// signed out.
    async fn persist(&self) -> Result<()> {
        let Some(user) = self.api.auth().session().current_user().await else {
            self.store.clear()?;
            return Ok(());
        };
        let refresh_path = self.api.auth().auth_path("refresh");
        let cookies = self.transport().export_cookies(&["/", &refresh_path]);
        self.store.save(&SavedSession {
            user: Some(user),
            cookies,
        })?;
        tracing::debug!(path = %self.store.path().display(), "session saved");
        Ok(())
    }

    async fn login(&self, username: &str) -> Result<Rendered> {
        if self.route("/login") == RouteDecision::RedirectToHome {
            if let Some(user) = self.api.auth().session().current_user().await {
                return Ok(Rendered::message(format!(
                    "Already signed in as {}.",
                    user.username
                )));
            }
        }
        let password = password()?;
        validate_login(username, &password)?;
        let user = self
            .api
            .auth()
            .login(&LoginRequest {
                username: username.trim().to_string(),
                password,
            })
            .await?;
        Ok(Rendered::message(format!("Signed in as {}.", user.username)))
    }

    async fn register(&self, username: &str, email: &str, salary_usd: &str) -> Result<Rendered> {
        let draft = RegisterDraft {
            username: username.to_string(),
            email: email.to_string(),
            password: password()?,
            net_salary_usd: salary_usd.to_string(),
        };
        let registration = draft.validate()?;
        let user = self.api.auth().register(&register_request(&registration)).await?;
        Ok(Rendered::message(format!("Registered {}.", user.username)))
    }

    async fn logout(&self) -> Result<Rendered> {
        self.api.auth().sign_out().await;
        Ok(Rendered::message("Signed out."))
    }

    async fn transactions(&self, month: MonthKey, size: u32) -> Result<Rendered> {
        self.require_session()?;
        let query = TransactionQuery {
            month: month.month(),
            year: month.year(),
            page: 0,
            size,
            expanded: true,
        };
        let page = self.api.transactions(&query).await?;
        let transactions = transactions_from_views(&page.content)?;
        let mut text = render::transactions(&transactions);
        if page.has_next {
            text.push_str(&format!("\n({} of {} shown)", page.content.len(), page.total_elements));
        }
        Rendered::new(&transactions, text)
    }

    async fn summary(&self, start: NaiveDate, end: NaiveDate) -> Result<Rendered> {
        self.require_session()?;
        let view = self.api.report_summary(start, end).await?;
        Rendered::new(&view, render::server_report(&view))
    }

    async fn portfolio(&self) -> Result<Rendered> {
        self.require_session()?;
        let views = self.api.investments().await?;
        let assets: Vec<InvestmentAsset> = views.iter().map(investment_from_view).collect();
        let totals = PortfolioTotals::from_assets(&assets);

        #[derive(Serialize)]
        struct Portfolio<'a> {
            assets: &'a [InvestmentAsset],
            totals: &'a PortfolioTotals,
        }
        Rendered::new(
            &Portfolio {
                assets: &assets,
                totals: &totals,
            },
            render::portfolio(&assets, &totals),
        )
    }

    async fn rate(&self) -> Result<Rendered> {
        self.require_session()?;
        let rate = self.api.usd_try_rate().await?;
        Ok(rate_message(rate))
    }
}

/// Runs a server command and saves the session afterwards; a refresh or a
/// sign-out may have happened even when the command failed.
pub async fn run(settings: &AppConfig, command: OnlineCommand) -> Result<Rendered> {
    if let OnlineCommand::Rate { public: true } = command {
        return public_rate(settings).await;
    }
    let online = Online::connect(settings)?;
    let result = match command {
        OnlineCommand::Login { username } => online.login(&username).await,
        OnlineCommand::Logout => online.logout().await,
        OnlineCommand::Register {
            username,
            email,
            salary_usd,
        } => online.register(&username, &email, &salary_usd).await,
        OnlineCommand::Transactions { month, size } => online.transactions(month, size).await,
        OnlineCommand::Summary { start, end } => online.summary(start, end).await,
        OnlineCommand::Portfolio => online.portfolio().await,
        OnlineCommand::Rate { .. } => online.rate().await,
    };
    online.persist().await?;
    result
}

/// USD/TRY from the public feed; needs no session.
async fn public_rate(settings: &AppConfig) -> Result<Rendered> {
    let rates = PublicRates::new(&settings.rates_url, Duration::from_secs(settings.timeout_secs))?;
    Ok(rate_message(rates.usd_try().await))
}

fn rate_message(rate: f64) -> Rendered {
    Rendered {
        text: format!("USD/TRY {rate:.4}"),
        json: serde_json::json!({ "usdTry": rate }),
    }
}
