use theradmin_domain::{
    AdminError, ChangePatientPasswordRequest, ResetPasswordRequest, Result,
    SendMessageRequest, SuspendUserRequest, UpdatePatientRequest, UpdateUserRequest, User,
    UserType, VerifyTherapistRequest,
};
use tracing::debug;

use super::AdminQueries;
use crate::query::{keys, run_mutation, MutationEffects, QueryOptions};

impl AdminQueries {
    /// Therapists matching `query`; `None` while the query is empty.
    pub async fn search_therapists(&self, query: &str) -> Result<Option<Vec<User>>> {
        if query.is_empty() {
            return Ok(None);
        }
        let q = query.to_string();
        self.read(keys::search_therapists(query), QueryOptions::default(), move |api| {
            let q = q.clone();
            async move { api.search_therapists(&q).await.into_data("Failed to search therapists") }
        })
        .await
        .map(Some)
    }

    /// Patients matching `query`; `None` while the query is empty.
    pub async fn search_patients(&self, query: &str) -> Result<Option<Vec<User>>> {
        if query.is_empty() {
            return Ok(None);
        }
        let q = query.to_string();
        self.read(keys::search_patients(query), QueryOptions::default(), move |api| {
            let q = q.clone();
            async move { api.search_patients(&q).await.into_data("Failed to search patients") }
        })
        .await
        .map(Some)
    }

    pub async fn all_patients(&self) -> Result<Vec<User>> {
        self.read(keys::patients(), QueryOptions::default(), |api| async move {
            api.get_all_patients().await.into_data("Failed to fetch all patients")
        })
        .await
    }

    pub async fn all_therapists(&self) -> Result<Vec<User>> {
        self.read(keys::therapists().with("all"), QueryOptions::default(), |api| async move {
            api.get_all_therapists().await.into_data("Failed to fetch all therapists")
        })
        .await
    }

    /// `None` while `id` is empty.
    pub async fn patient_by_id(&self, id: &str) -> Result<Option<User>> {
        if id.is_empty() {
            return Ok(None);
        }
        let id_owned = id.to_string();
        self.read(keys::patient_by_id(id), QueryOptions::default(), move |api| {
            let id = id_owned.clone();
            async move { api.get_patient_by_id(&id).await.into_data("Failed to fetch patient") }
        })
        .await
        .map(Some)
    }

    /// Patients who registered recently.
    pub async fn new_registered_patients(&self) -> Result<Vec<User>> {
        self.read(keys::new_registered_patients(), QueryOptions::default(), |api| async move {
            api.get_new_registered_patients()
                .await
                .into_data("Failed to fetch new registered patients")
        })
        .await
    }

    /// A user of either role, tagged with the role it was found under.
    ///
    /// The patient lookup is tried first, then the therapist search, where
    /// only an exact id match counts. Never retried.
    pub async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        if id.is_empty() {
            return Ok(None);
        }
        let id_owned = id.to_string();
        self.read(keys::user(id), QueryOptions::no_retry(), move |api| {
            let id = id_owned.clone();
            async move {
                let patient = api.get_patient_by_id(&id).await;
                if let (true, Some(user)) = (patient.success, patient.data) {
                    return Ok(user.with_role(UserType::Patient));
                }
                debug!(user_id = %id, "not found as patient, trying therapist search");

                let therapists = api.get_therapist_by_id(&id).await;
                if therapists.success {
                    if let Some(user) =
                        therapists.data.into_iter().flatten().find(|t| t.id == id)
                    {
                        return Ok(user.with_role(UserType::Therapist));
                    }
                }
                Err(AdminError::NotFound("User not found".to_string()))
            }
        })
        .await
        .map(Some)
    }

    /// Save patient edits, then invalidate the patient lists and that patient's detail.
    pub async fn update_patient(&self, request: UpdatePatientRequest) -> Result<User> {
        let operation =
            async { self.api.update_patient(&request).await.into_data("Failed to update patient") };
        run_mutation(&self.client, self.notifier.as_ref(), "update_patient", operation, |user| {
            let id = if user.id.is_empty() { request.id.as_str() } else { user.id.as_str() };
            MutationEffects::new()
                .invalidate(keys::patients())
                .invalidate(keys::patient_by_id(id))
                .invalidate(keys::new_registered_patients())
                .toast("Patient updated successfully")
        })
        .await
    }

    /// Set a new password for a patient.
    pub async fn change_patient_password(
        &self,
        request: ChangePatientPasswordRequest,
    ) -> Result<Option<String>> {
        let operation = async {
            self.api
                .change_patient_password(&request)
                .await
                .into_message("Failed to change password")
        };
        run_mutation(&self.client, self.notifier.as_ref(), "change_patient_password", operation, |_| {
            MutationEffects::new().toast("Password changed successfully")
        })
        .await
    }

    /// Grant or revoke a therapist's verified badge.
    pub async fn verify_therapist(&self, therapist_id: &str, verified: bool) -> Result<()> {
        let request = VerifyTherapistRequest { therapist_id: therapist_id.to_string(), verified };
        let operation = async {
            self.api
                .verify_therapist(&request)
                .await
                .into_message("Failed to verify therapist")
                .map(|_| ())
        };
        run_mutation(&self.client, self.notifier.as_ref(), "verify_therapist", operation, |_| {
            let verb = if verified { "verified" } else { "unverified" };
            MutationEffects::new()
                .invalidate(keys::therapists())
                .invalidate(keys::user(therapist_id))
                .toast(format!("Therapist {verb} successfully"))
        })
        .await
    }

    /// Suspend or reinstate a user. Every user list is refetched.
    pub async fn suspend_user(&self, request: SuspendUserRequest) -> Result<()> {
        let operation = async {
            self.api.suspend_user(&request).await.into_message("Failed to suspend user").map(|_| ())
        };
        run_mutation(&self.client, self.notifier.as_ref(), "suspend_user", operation, |_| {
            let verb = if request.suspended { "suspended" } else { "unsuspended" };
            MutationEffects::new()
                .invalidate(keys::users())
                .invalidate(keys::user(&request.user_id))
                .toast(format!("User {verb} successfully"))
        })
        .await
    }

    /// Reset a user's password; returns the backend's message.
    pub async fn reset_user_password(&self, request: ResetPasswordRequest) -> Result<Option<String>> {
        let operation = async {
            self.api.reset_user_password(&request).await.into_message("Failed to reset password")
        };
        run_mutation(&self.client, self.notifier.as_ref(), "reset_user_password", operation, |_| {
            MutationEffects::new().toast("Password reset successfully")
        })
        .await
    }

    pub async fn send_message(&self, request: SendMessageRequest) -> Result<Option<String>> {
        let operation = async {
            self.api.send_message_to_user(&request).await.into_message("Failed to send message")
        };
        run_mutation(&self.client, self.notifier.as_ref(), "send_message", operation, |_| {
            MutationEffects::new().toast("Message sent successfully")
        })
        .await
    }

    /// Save edits to a user of either role.
    pub async fn update_user(&self, request: UpdateUserRequest) -> Result<Option<String>> {
        let operation =
            async { self.api.update_user(&request).await.into_message("Failed to update user") };
        run_mutation(&self.client, self.notifier.as_ref(), "update_user", operation, |_| {
            MutationEffects::new()
                .invalidate(keys::users())
                .invalidate(keys::patients())
                .invalidate(keys::therapists())
                .invalidate(keys::user(&request.id))
                .toast("User updated successfully")
        })
        .await
    }
}
