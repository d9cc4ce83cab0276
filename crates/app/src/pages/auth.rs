//! Login and logout.

use theradmin_common::validation::validate_login;
use theradmin_core::{EndReason, Notifier};
use theradmin_domain::constants::{LOGIN_SUCCESS, LOGOUT_SUCCESS};
use theradmin_domain::{AdminLoginRequest, AdminProfile};

use super::PageError;
use crate::context::AppContext;
use crate::utils::execute_action;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Sign in and persist the session.
///
/// A form that fails validation never reaches the backend. A rejected login
/// is shown as an error toast and leaves the session untouched.
pub async fn login(ctx: &AppContext, form: &LoginForm) -> Result<AdminProfile, PageError> {
    execute_action("auth::login", || async {
        validate_login(&form.email, &form.password)?;

        let request =
            AdminLoginRequest { email: form.email.clone(), password: form.password.clone() };
        let login = match ctx.api.login(&request).await.into_data("Login failed") {
            Ok(login) => login,
            Err(err) => {
                ctx.notifier.error(&err.to_string());
                return Err(err.into());
            }
        };

        ctx.session.establish(login.token, Some(login.admin.clone())).await?;
        ctx.notifier.success(LOGIN_SUCCESS);
        Ok(login.admin)
    })
    .await
}

/// End the session and drop everything cached for it.
pub async fn logout(ctx: &AppContext) -> Result<(), PageError> {
    execute_action("auth::logout", || async {
        ctx.session.teardown(EndReason::Logout).await?;
        ctx.cache().clear();
        ctx.notifier.success(LOGOUT_SUCCESS);
        Ok(())
    })
    .await
}
