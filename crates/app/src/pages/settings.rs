//! Settings page: admin profile, password, new admins and data export.

use theradmin_common::validation::{
    validate_email, validate_password, validate_password_change, validate_password_match,
    PhoneValidator, Validator, EMAIL_MESSAGE, PASSWORD_MESSAGE, PASSWORD_MISMATCH_MESSAGE,
};
use theradmin_domain::{
    AdminError, AdminProfile, ChangePasswordRequest, CreateAdminRequest, ExportData,
    UpdateProfileRequest,
};

use super::PageError;
use crate::context::AppContext;
use crate::utils::execute_action;

/// Editable copy of the admin profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub timezone: String,
}

impl From<&AdminProfile> for ProfileForm {
    fn from(profile: &AdminProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone().unwrap_or_default(),
            timezone: profile.timezone.clone().unwrap_or_default(),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ProfileForm {
    fn to_request(&self) -> UpdateProfileRequest {
        UpdateProfileRequest {
            first_name: optional(&self.first_name),
            last_name: optional(&self.last_name),
            email: optional(&self.email),
            phone_number: optional(&self.phone_number),
            timezone: optional(&self.timezone),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAdminForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    pub timezone: String,
}

pub async fn load_profile(ctx: &AppContext) -> Result<AdminProfile, PageError> {
    execute_action("settings::load_profile", || async {
        Ok(ctx.queries.admin_profile().await?)
    })
    .await
}

/// Save the profile and refresh the copy kept with the session.
pub async fn save_profile(ctx: &AppContext, form: &ProfileForm) -> Result<AdminProfile, PageError> {
    execute_action("settings::save_profile", || async {
        let mut v = Validator::new();
        v.check("email", form.email.trim().is_empty() || validate_email(&form.email), EMAIL_MESSAGE)
            .validate_field("phoneNumber", form.phone_number.as_str(), &PhoneValidator);
        v.finish()?;

        let profile = ctx.queries.update_admin_profile(form.to_request()).await?;
        ctx.session.update_admin(profile.clone()).await?;
        Ok(profile)
    })
    .await
}

/// Change the signed-in admin's password.
pub async fn change_password(
    ctx: &AppContext,
    form: &PasswordForm,
) -> Result<Option<String>, PageError> {
    execute_action("settings::change_password", || async {
        validate_password_change(
            &form.current_password,
            &form.new_password,
            &form.confirm_password,
        )?;

        let email = ctx
            .session
            .admin()
            .map(|admin| admin.email)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AdminError::Unauthorized("Please sign in to continue".to_string()))?;

        let request = ChangePasswordRequest {
            email,
            current_password: form.current_password.clone(),
            new_password: form.new_password.clone(),
        };
        Ok(ctx.queries.change_admin_password(request).await?)
    })
    .await
}

pub async fn create_admin(ctx: &AppContext, form: &NewAdminForm) -> Result<AdminProfile, PageError> {
    execute_action("settings::create_admin", || async {
        let mut v = Validator::new();
        v.check("firstName", !form.first_name.trim().is_empty(), "First name is required")
            .check("lastName", !form.last_name.trim().is_empty(), "Last name is required")
            .check("email", validate_email(&form.email), EMAIL_MESSAGE)
            .check("password", validate_password(&form.password), PASSWORD_MESSAGE)
            .check(
                "confirmPassword",
                validate_password_match(&form.password, &form.confirm_password),
                PASSWORD_MISMATCH_MESSAGE,
            )
            .validate_field("phoneNumber", form.phone_number.as_str(), &PhoneValidator);
        v.finish()?;

        let request = CreateAdminRequest {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            phone_number: optional(&form.phone_number),
            timezone: optional(&form.timezone),
        };
        Ok(ctx.queries.create_admin(request).await?)
    })
    .await
}

/// Request a data export; the result carries the download link if any.
pub async fn export_data(ctx: &AppContext) -> Result<ExportData, PageError> {
    execute_action("settings::export_data", || async {
        ctx.require_session()?;
        Ok(ctx.queries.export_admin_data().await?)
    })
    .await
}
