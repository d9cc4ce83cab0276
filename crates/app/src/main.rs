//! Theradmin - admin console client for the therapist/patient platform
//!
//! Entry point: loads configuration, restores the session and runs one
//! console action.
//!
//! ```text
//! theradmin [status|dashboard|logout]
//! theradmin login <email>        # password from THERADMIN_PASSWORD
//! ```

use anyhow::{bail, Context, Result};
use theradmin_infra::{config, init_tracing};
use theradmin_lib::pages::auth::{self, LoginForm};
use theradmin_lib::pages::dashboard;
use theradmin_lib::AppContext;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = config::load().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialise logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => warn!(error = %e, "no .env file loaded"),
    }

    let ctx = AppContext::new(config).context("failed to build application context")?;
    let restored = ctx.start().await?;

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "status".to_string());

    match command.as_str() {
        "status" => match ctx.session.admin() {
            Some(admin) if restored => info!(admin = %admin.display_name(), "signed in"),
            _ if restored => info!("signed in"),
            _ => info!("not signed in"),
        },
        "login" => {
            let email = args.next().context("usage: theradmin login <email>")?;
            let password =
                std::env::var("THERADMIN_PASSWORD").context("THERADMIN_PASSWORD is not set")?;
            let admin = auth::login(&ctx, &LoginForm { email, password }).await?;
            info!(admin = %admin.display_name(), "login complete");
        }
        "logout" => auth::logout(&ctx).await?,
        "dashboard" => {
            ctx.require_session()?;
            let view = dashboard::load(&ctx).await?;
            for card in &view.cards {
                info!(title = card.title, value = %card.value, "kpi");
            }
            info!(
                new_users = view.new_users.len(),
                activity = view.activity.items().len(),
                "dashboard loaded"
            );
        }
        other => bail!("unknown command `{other}`"),
    }

    ctx.shutdown();
    Ok(())
}
