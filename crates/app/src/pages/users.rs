//! User-management page: the searchable user table and per-row actions.

use theradmin_common::validation::{
    validate_email, validate_password, Validator, EMAIL_MESSAGE, PASSWORD_MESSAGE,
};
use theradmin_common::ValidationError;
use theradmin_core::view::{derive_user_list, select_user_source, Filter, UserListState};
use theradmin_domain::{
    MessageChannel, ResetPasswordRequest, SendMessageRequest, SuspendUserRequest,
    UpdateUserRequest, UserRole, UserRow, UserType,
};

use super::PageError;
use crate::context::AppContext;
use crate::utils::execute_action;

/// Reason sent with suspend and unsuspend from the table.
pub const SUSPEND_REASON: &str = "Admin action";
pub const DEFAULT_MESSAGE_SUBJECT: &str = "Important Notice";

/// Message composed from the row's action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub channel: MessageChannel,
    pub subject: String,
    pub message: String,
}

impl MessageDraft {
    /// Draft with the default subject.
    pub fn new(channel: MessageChannel, message: impl Into<String>) -> Self {
        Self { channel, subject: DEFAULT_MESSAGE_SUBJECT.to_string(), message: message.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserManagementPage {
    pub state: UserListState,
}

impl UserManagementPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page opened from a dashboard card with its role filter applied.
    pub fn with_role(role: UserRole) -> Self {
        Self { state: UserListState { role: Filter::Only(role), ..Default::default() } }
    }

    /// Rows the table shows for the current state.
    ///
    /// Only the collection the state selects is fetched.
    pub async fn rows(&self, ctx: &AppContext) -> Result<Vec<UserRow>, PageError> {
        execute_action("users::rows", || async {
            let queries = &ctx.queries;
            let search = self.state.search.as_str();

            let (mut therapists, mut patients, mut all) = (None, None, None);
            if search.is_empty() {
                all = Some(queries.all_patients().await?);
            } else {
                match self.state.role {
                    Filter::Only(UserRole::Therapist) => {
                        therapists = queries.search_therapists(search).await?;
                    }
                    Filter::Only(UserRole::Patient) => {
                        patients = queries.search_patients(search).await?;
                    }
                    _ => {}
                }
            }

            let source = select_user_source(
                &self.state,
                therapists.as_deref(),
                patients.as_deref(),
                all.as_deref(),
            );
            Ok(derive_user_list(&source, &self.state))
        })
        .await
    }
}

/// Account type for the row's actions; admin rows have none.
fn user_type(row: &UserRow) -> Result<UserType, PageError> {
    row.role.user_type().ok_or_else(|| {
        ValidationError::field("userType", "Admin accounts cannot be managed here").into()
    })
}

/// Verify or revoke a therapist.
pub async fn verify(ctx: &AppContext, row: &UserRow, verified: bool) -> Result<(), PageError> {
    execute_action("users::verify", || async {
        if row.role != UserRole::Therapist {
            return Err(ValidationError::field("role", "Only therapists can be verified").into());
        }
        ctx.queries.verify_therapist(&row.id, verified).await?;
        Ok(())
    })
    .await
}

pub async fn set_suspended(
    ctx: &AppContext,
    row: &UserRow,
    suspended: bool,
) -> Result<(), PageError> {
    execute_action("users::set_suspended", || async {
        let request = SuspendUserRequest {
            user_id: row.id.clone(),
            user_type: user_type(row)?,
            suspended,
            reason: Some(SUSPEND_REASON.to_string()),
        };
        ctx.queries.suspend_user(request).await?;
        Ok(())
    })
    .await
}

/// Set a new password for the row's account.
pub async fn reset_password(
    ctx: &AppContext,
    row: &UserRow,
    new_password: &str,
) -> Result<Option<String>, PageError> {
    execute_action("users::reset_password", || async {
        let mut v = Validator::new();
        v.check("newPassword", validate_password(new_password), PASSWORD_MESSAGE);
        v.finish()?;

        let request = ResetPasswordRequest {
            user_id: row.id.clone(),
            user_type: user_type(row)?,
            new_password: new_password.to_string(),
        };
        Ok(ctx.queries.reset_user_password(request).await?)
    })
    .await
}

pub async fn send_message(
    ctx: &AppContext,
    row: &UserRow,
    draft: &MessageDraft,
) -> Result<Option<String>, PageError> {
    execute_action("users::send_message", || async {
        let mut v = Validator::new();
        v.check("subject", !draft.subject.trim().is_empty(), "Subject is required")
            .check("message", !draft.message.trim().is_empty(), "Message is required");
        v.finish()?;

        let request = SendMessageRequest {
            user_id: row.id.clone(),
            user_type: user_type(row)?,
            message_type: draft.channel,
            subject: draft.subject.clone(),
            message: draft.message.clone(),
        };
        Ok(ctx.queries.send_message(request).await?)
    })
    .await
}

/// Save the edit dialog. The request's user type picks the endpoint.
pub async fn save(ctx: &AppContext, request: UpdateUserRequest) -> Result<Option<String>, PageError> {
    execute_action("users::save", || async {
        let mut v = Validator::new();
        v.check("fullName", !request.full_name.trim().is_empty(), "Full name is required")
            .check("email", validate_email(&request.email), EMAIL_MESSAGE);
        v.finish()?;

        Ok(ctx.queries.update_user(request).await?)
    })
    .await
}
