use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

mod de;

/// A visa offering as stored by the remote API.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Visa {
    #[serde(rename = "_id")]
    pub id: String,
    pub country_name: String,
    pub country_image: String,
    pub visa_type: VisaType,
    // The field name is misspelled in the API.
    #[serde(rename = "proccessing_time", alias = "processing_time")]
    pub processing_time: String,
    #[serde(deserialize_with = "de::number")]
    pub fee: f64,
    /// Validity in months
    #[serde(deserialize_with = "de::number")]
    pub validity: u32,
    pub application_method: ApplicationMethod,
    #[serde(
        default,
        deserialize_with = "de::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age_restriction: Option<u32>,
    pub description: String,
    #[serde(default, deserialize_with = "de::one_or_many")]
    pub required_documents: Vec<String>,
    /// Email address of the user who added the listing.
    #[serde(rename = "addedBy")]
    pub added_by: String,
}

/// Payload for creating or updating a listing.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewVisa {
    pub country_name: String,
    pub country_image: String,
    pub visa_type: VisaType,
    #[serde(rename = "proccessing_time")]
    pub processing_time: String,
    pub fee: f64,
    pub validity: u32,
    pub application_method: ApplicationMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_restriction: Option<u32>,
    pub description: String,
    pub required_documents: Vec<String>,
    #[serde(rename = "addedBy")]
    pub added_by: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
pub enum VisaType {
    #[serde(rename = "Tourist Visa")]
    Tourist,
    #[serde(rename = "Business Visa")]
    Business,
    #[serde(rename = "Student Visa")]
    Student,
    #[serde(rename = "Work Visa")]
    Work,
    #[serde(rename = "Immigrant Visa")]
    Immigrant,
}

impl VisaType {
    pub const ALL: [Self; 5] = [
        Self::Tourist,
        Self::Business,
        Self::Student,
        Self::Work,
        Self::Immigrant,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tourist => "Tourist Visa",
            Self::Business => "Business Visa",
            Self::Student => "Student Visa",
            Self::Work => "Work Visa",
            Self::Immigrant => "Immigrant Visa",
        }
    }
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
pub enum ApplicationMethod {
    Online,
    Offline,
    Both,
}

impl ApplicationMethod {
    pub const ALL: [Self; 3] = [Self::Online, Self::Offline, Self::Both];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Both => "Both",
        }
    }
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Processing,
}

impl ApplicationStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Processing,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Processing => "processing",
        }
    }
}

/// A submitted application as returned by the API.
///
/// `visa_info` is the copy of the listing taken at submission time,
/// it does not follow later edits of the listing.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct VisaApplication {
    #[serde(rename = "_id")]
    pub id: String,
    pub visa_info: Visa,
    pub applicant_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    pub passport_expiry: String,
    #[serde(deserialize_with = "de::number")]
    pub fee: f64,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339", alias = "applied_date")]
    pub applied_date: OffsetDateTime,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewVisaApplication {
    pub visa_info: Visa,
    pub applicant_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    pub passport_expiry: String,
    pub fee: f64,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub applied_date: OffsetDateTime,
}

/// Response body of every write request.
///
/// A missing `acknowledged` flag is read as `false`.
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct WriteAck {
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<u64>,
}

/// The authenticated user as provided by the identity provider.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub providers: Vec<String>,
    /// Account creation as milliseconds since the unix epoch.
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// A signed in user together with the tokens of the identity provider.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub id_token: String,
    pub refresh_token: String,
    /// Validity of `id_token` in seconds, counted from when it was issued.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// `None` keeps the current photo, `Some(None)` removes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<Option<String>>,
}

/// Error returned by the API for non-2xx responses.
#[derive(Serialize, Deserialize, thiserror::Error)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
#[cfg_attr(not(feature = "extra-derive"), derive(Debug))]
#[error("{message}")]
pub struct Error {
    #[serde(default)]
    pub http_status: u16,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value: {0}")]
pub struct UnknownValue(String);

impl FromStr for VisaType {
    type Err = UnknownValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_owned()))
    }
}

impl FromStr for ApplicationMethod {
    type Err = UnknownValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_owned()))
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_owned()))
    }
}

impl fmt::Display for VisaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ApplicationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Visa> for NewVisa {
    fn from(from: Visa) -> Self {
        let Visa {
            id: _,
            country_name,
            country_image,
            visa_type,
            processing_time,
            fee,
            validity,
            application_method,
            age_restriction,
            description,
            required_documents,
            added_by,
        } = from;
        Self {
            country_name,
            country_image,
            visa_type,
            processing_time,
            fee,
            validity,
            application_method,
            age_restriction,
            description,
            required_documents,
            added_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISA_JSON: &str = r#"{
        "_id": "65a1",
        "country_name": "Japan",
        "country_image": "https://example.com/japan.jpg",
        "visa_type": "Tourist Visa",
        "proccessing_time": "10 business days",
        "fee": "120",
        "validity": 3,
        "application_method": "Online",
        "age_restriction": "",
        "description": "Short stay",
        "required_documents": "Valid passport",
        "addedBy": "owner@example.com"
    }"#;

    #[test]
    fn read_visa_with_string_numbers() {
        let visa: Visa = serde_json::from_str(VISA_JSON).unwrap();
        assert_eq!(visa.id, "65a1");
        assert_eq!(visa.visa_type, VisaType::Tourist);
        assert!((visa.fee - 120.0).abs() < f64::EPSILON);
        assert_eq!(visa.validity, 3);
        assert_eq!(visa.age_restriction, None);
        assert_eq!(visa.required_documents, vec!["Valid passport".to_string()]);
        assert_eq!(visa.processing_time, "10 business days");
    }

    #[test]
    fn reject_unknown_visa_type() {
        let json = VISA_JSON.replace("Tourist Visa", "Space Visa");
        assert!(serde_json::from_str::<Visa>(&json).is_err());
    }

    #[test]
    fn reject_non_numeric_fee() {
        let json = VISA_JSON.replace("\"120\"", "\"cheap\"");
        assert!(serde_json::from_str::<Visa>(&json).is_err());
    }

    #[test]
    fn write_new_visa_uses_api_field_names() {
        let visa: Visa = serde_json::from_str(VISA_JSON).unwrap();
        let json = serde_json::to_value(NewVisa::from(visa)).unwrap();
        assert_eq!(json["proccessing_time"], "10 business days");
        assert_eq!(json["addedBy"], "owner@example.com");
        assert_eq!(json["visa_type"], "Tourist Visa");
        assert!(json.get("age_restriction").is_none());
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn missing_acknowledgement_flag_is_false() {
        let ack: WriteAck = serde_json::from_str(r#"{"insertedId":"x"}"#).unwrap();
        assert!(!ack.acknowledged);
        assert_eq!(ack.inserted_id.as_deref(), Some("x"));
    }

    #[test]
    fn stored_session_without_token_lifetime() {
        let json = r#"{
            "user": {"uid": "u1", "email": "jane@example.com"},
            "idToken": "id",
            "refreshToken": "refresh"
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.refresh_token, "refresh");
        assert_eq!(session.expires_in, None);
    }

    #[test]
    fn parse_select_values() {
        assert_eq!("Work Visa".parse::<VisaType>(), Ok(VisaType::Work));
        assert_eq!("Both".parse::<ApplicationMethod>(), Ok(ApplicationMethod::Both));
        assert_eq!(
            "processing".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Processing)
        );
        assert!("All Visa Types".parse::<VisaType>().is_err());
    }

    #[test]
    fn read_application_with_rfc3339_date() {
        let json = format!(
            r#"{{
                "_id": "a1",
                "visaInfo": {VISA_JSON},
                "applicantId": "uid-1",
                "email": "me@example.com",
                "firstName": "Jane",
                "lastName": "Doe",
                "passportNumber": "AB123456",
                "passportExpiry": "2031-01-01",
                "fee": 120,
                "status": "pending",
                "appliedDate": "2024-05-01T10:00:00.000Z"
            }}"#
        );
        let app: VisaApplication = serde_json::from_str(&json).unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.applied_date.year(), 2024);
        assert_eq!(app.visa_info.country_name, "Japan");
    }
}
