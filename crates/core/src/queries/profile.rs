use theradmin_domain::{
    AdminProfile, ChangePasswordRequest, CreateAdminRequest, ExportData, Result,
    UpdateProfileRequest,
};

use super::AdminQueries;
use crate::query::{keys, run_mutation, MutationEffects, QueryOptions};

impl AdminQueries {
    /// The signed-in admin's profile.
    pub async fn admin_profile(&self) -> Result<AdminProfile> {
        self.read(keys::admin_profile(), QueryOptions::default(), |api| async move {
            api.get_profile(None).await.into_data("Failed to fetch admin profile")
        })
        .await
    }

    /// Save profile edits and refetch the cached profile.
    pub async fn update_admin_profile(&self, request: UpdateProfileRequest) -> Result<AdminProfile> {
        let operation = async {
            self.api.update_profile(&request, None).await.into_data("Failed to update profile")
        };
        run_mutation(&self.client, self.notifier.as_ref(), "update_admin_profile", operation, |_| {
            MutationEffects::new()
                .invalidate(keys::admin_profile())
                .toast("Profile updated successfully")
        })
        .await
    }

    /// Change the signed-in admin's password. Touches no cached data.
    pub async fn change_admin_password(
        &self,
        request: ChangePasswordRequest,
    ) -> Result<Option<String>> {
        let operation = async {
            self.api.change_password(&request).await.into_message("Failed to change password")
        };
        run_mutation(&self.client, self.notifier.as_ref(), "change_admin_password", operation, |_| {
            MutationEffects::new().toast("Password changed successfully")
        })
        .await
    }

    /// Create another admin account.
    pub async fn create_admin(&self, request: CreateAdminRequest) -> Result<AdminProfile> {
        let operation = async {
            self.api.create_admin(&request).await.into_data("Failed to create admin user")
        };
        run_mutation(&self.client, self.notifier.as_ref(), "create_admin", operation, |_| {
            MutationEffects::new().toast("Admin user created successfully")
        })
        .await
    }

    /// Request an export; the result carries the download link when the
    /// backend provides one.
    pub async fn export_admin_data(&self) -> Result<ExportData> {
        let operation =
            async { self.api.export_admin_data().await.into_data("Failed to export data") };
        run_mutation(&self.client, self.notifier.as_ref(), "export_admin_data", operation, |_| {
            MutationEffects::new().toast("Data exported successfully")
        })
        .await
    }
}
