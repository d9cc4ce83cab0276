//! Payloads for user-management mutations

use serde::{Deserialize, Serialize};

use super::form::{Attachment, FormPayload, ToForm};
use super::user::UserType;
use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTherapistRequest {
    pub therapist_id: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendUserRequest {
    pub user_id: String,
    pub user_type: UserType,
    pub suspended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub user_id: String,
    pub user_type: UserType,
    pub new_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    Email,
    Sms,
}

impl_domain_status_conversions!(MessageChannel {
    Email => "email",
    Sms => "sms",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub user_id: String,
    pub user_type: UserType,
    pub message_type: MessageChannel,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePatientPasswordRequest {
    pub email: String,
    pub old_password: String,
    pub new_password: String,
}

/// Edit from the user table. Routed to the therapist or patient update
/// endpoint by `user_type` (patient when unset).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub active: Option<String>,
    pub user_type: Option<UserType>,
}

impl ToForm for UpdateUserRequest {
    fn to_form(&self) -> FormPayload {
        FormPayload::new()
            .text("id", &self.id)
            .text("fullName", &self.full_name)
            .text("email", &self.email)
            .text_opt("phone", self.phone.as_deref())
            .text_opt("city", self.city.as_deref())
            .text_opt("country", self.country.as_deref())
            .text_opt("gender", self.gender.as_deref())
            .text_opt("active", self.active.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePatientRequest {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub gender: String,
    pub active: String,
}

impl ToForm for UpdatePatientRequest {
    fn to_form(&self) -> FormPayload {
        FormPayload::new()
            .text("id", &self.id)
            .text("fullName", &self.full_name)
            .text("email", &self.email)
            .text("phone", &self.phone)
            .text("city", &self.city)
            .text("country", &self.country)
            .text("gender", &self.gender)
            .text("active", &self.active)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePatientRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub gender: String,
    pub country: String,
    pub city: String,
    pub postal_code: String,
    pub address: String,
    pub active: String,
    pub profile_picture: Option<Attachment>,
}

impl ToForm for CreatePatientRequest {
    fn to_form(&self) -> FormPayload {
        FormPayload::new()
            .text("fullName", &self.full_name)
            .text("email", &self.email)
            .text("password", &self.password)
            .text("phone", &self.phone)
            .text("gender", &self.gender)
            .text("country", &self.country)
            .text("city", &self.city)
            .text("postalCode", &self.postal_code)
            .text("address", &self.address)
            .text("active", &self.active)
            .file_opt("profilePicture", self.profile_picture.as_ref())
    }
}

/// Therapist profile fields plus the credential documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TherapistForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub title: String,
    pub specialization: String,
    pub therapy_field: String,
    pub gender: String,
    pub country: String,
    pub city: String,
    pub postal_code: String,
    pub address: String,
    pub experience: String,
    pub consultation_fee: String,
    pub profile_img: Option<Attachment>,
    pub highest_degree: Option<Attachment>,
    pub insurance_certificate: Option<Attachment>,
    pub dbs_check_certificate: Option<Attachment>,
}

impl TherapistForm {
    fn append_to(&self, form: FormPayload) -> FormPayload {
        form.text("fullName", &self.full_name)
            .text("email", &self.email)
            .text("phoneNumber", &self.phone_number)
            .text("title", &self.title)
            .text("specialization", &self.specialization)
            .text("therapyField", &self.therapy_field)
            .text("gender", &self.gender)
            .text("country", &self.country)
            .text("city", &self.city)
            .text("postalCode", &self.postal_code)
            .text("address", &self.address)
            .text("experience", &self.experience)
            .text("consultationFee", &self.consultation_fee)
            .file_opt("profileImg", self.profile_img.as_ref())
            .file_opt("highestDegree", self.highest_degree.as_ref())
            .file_opt("insuranceCertificate", self.insurance_certificate.as_ref())
            .file_opt("dbsCheckCertificate", self.dbs_check_certificate.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTherapistRequest {
    pub password: String,
    pub profile: TherapistForm,
}

impl ToForm for CreateTherapistRequest {
    fn to_form(&self) -> FormPayload {
        self.profile.append_to(FormPayload::new()).text("password", &self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTherapistRequest {
    pub id: String,
    pub profile: TherapistForm,
}

impl ToForm for UpdateTherapistRequest {
    fn to_form(&self) -> FormPayload {
        self.profile.append_to(FormPayload::new().text("id", &self.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    #[serde(default)]
    pub download_url: Option<String>,
}
