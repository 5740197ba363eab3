use time::OffsetDateTime;

use vm_boundary::{ApplicationMethod, NewVisa, Visa, VisaType};

use crate::validate::{FieldErrors, Rule, Validate};

/// The standard documents a listing can require.
pub const DOCUMENT_OPTIONS: [&str; 8] = [
    "Valid passport",
    "Visa application form",
    "Recent passport-sized photograph",
    "Proof of accommodation",
    "Travel itinerary",
    "Financial statements",
    "Letter of invitation",
    "Health insurance",
];

pub const DESCRIPTION_MIN_LEN: usize = 50;

/// Raw input of the add/edit listing form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisaForm {
    pub country_image: String,
    pub country_name: String,
    pub visa_type: String,
    pub processing_time: String,
    pub required_documents: Vec<String>,
    pub description: String,
    pub age_restriction: String,
    pub fee: String,
    pub validity: String,
    pub application_method: String,
    /// Email of the signed in user, not editable.
    pub added_by: String,
}

impl VisaForm {
    #[must_use]
    pub fn new(added_by: impl Into<String>) -> Self {
        Self {
            added_by: added_by.into(),
            ..Default::default()
        }
    }

    /// Prefills the form with an existing listing.
    #[must_use]
    pub fn from_visa(visa: &Visa) -> Self {
        Self {
            country_image: visa.country_image.clone(),
            country_name: visa.country_name.clone(),
            visa_type: visa.visa_type.to_string(),
            processing_time: visa.processing_time.clone(),
            required_documents: visa.required_documents.clone(),
            description: visa.description.clone(),
            age_restriction: visa
                .age_restriction
                .map(|age| age.to_string())
                .unwrap_or_default(),
            fee: visa.fee.to_string(),
            validity: visa.validity.to_string(),
            application_method: visa.application_method.to_string(),
            added_by: visa.added_by.clone(),
        }
    }

    #[must_use]
    pub fn has_document(&self, doc: &str) -> bool {
        self.required_documents.iter().any(|d| d == doc)
    }

    /// Checks or unchecks a document, keeping the order of [`DOCUMENT_OPTIONS`].
    pub fn toggle_document(&mut self, doc: &str) {
        if self.has_document(doc) {
            self.required_documents.retain(|d| d != doc);
            return;
        }
        self.required_documents.push(doc.to_owned());
        self.required_documents.sort_by_key(|d| {
            DOCUMENT_OPTIONS
                .iter()
                .position(|o| o == d)
                .unwrap_or(DOCUMENT_OPTIONS.len())
        });
    }
}

impl Validate for VisaForm {
    type Output = NewVisa;

    fn validate(&self, _: OffsetDateTime) -> Result<NewVisa, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors
            .check(
                "country_image",
                &self.country_image,
                &[Rule::Required("Image URL is required")],
            )
            .check(
                "country_name",
                &self.country_name,
                &[Rule::Required("Country name is required")],
            )
            .check(
                "visa_type",
                &self.visa_type,
                &[Rule::Required("Visa type is required")],
            )
            .check(
                "processing_time",
                &self.processing_time,
                &[Rule::Required("Processing time is required")],
            )
            .check(
                "description",
                &self.description,
                &[
                    Rule::Required("Description is required"),
                    Rule::MinLength(
                        DESCRIPTION_MIN_LEN,
                        "Description should be at least 50 characters",
                    ),
                ],
            )
            .check(
                "age_restriction",
                &self.age_restriction,
                &[
                    Rule::Required("Age restriction is required"),
                    Rule::Min(0.0, "Age must be positive"),
                ],
            )
            .check(
                "fee",
                &self.fee,
                &[
                    Rule::Required("Fee is required"),
                    Rule::Min(0.0, "Fee must be positive"),
                ],
            )
            .check(
                "validity",
                &self.validity,
                &[
                    Rule::Required("Validity is required"),
                    Rule::Min(1.0, "Validity must be at least 1 month"),
                ],
            )
            .check(
                "application_method",
                &self.application_method,
                &[Rule::Required("Application method is required")],
            );

        let visa_type = errors.parse::<VisaType>("visa_type", &self.visa_type, "Unknown visa type");
        let age_restriction =
            errors.parse::<u32>("age_restriction", &self.age_restriction, "Age must be a whole number");
        let fee = errors.parse::<f64>("fee", &self.fee, "Fee must be a number");
        let validity =
            errors.parse::<u32>("validity", &self.validity, "Validity must be a whole number of months");
        let application_method = errors.parse::<ApplicationMethod>(
            "application_method",
            &self.application_method,
            "Unknown application method",
        );

        errors.finish(|| {
            Some(NewVisa {
                country_name: self.country_name.trim().to_owned(),
                country_image: self.country_image.trim().to_owned(),
                visa_type: visa_type?,
                processing_time: self.processing_time.trim().to_owned(),
                fee: fee?,
                validity: validity?,
                application_method: application_method?,
                age_restriction: Some(age_restriction?),
                description: self.description.trim().to_owned(),
                required_documents: self.required_documents.clone(),
                added_by: self.added_by.clone(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Blocked, Form};

    fn valid() -> VisaForm {
        VisaForm {
            country_image: "https://example.com/jp.png".into(),
            country_name: " Japan ".into(),
            visa_type: "Tourist Visa".into(),
            processing_time: "10 days".into(),
            required_documents: vec!["Valid passport".into()],
            description: "A".repeat(DESCRIPTION_MIN_LEN),
            age_restriction: "0".into(),
            fee: "120.5".into(),
            validity: "3".into(),
            application_method: "Online".into(),
            added_by: "owner@example.com".into(),
        }
    }

    fn now() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH
    }

    #[test]
    fn valid_form_yields_payload() {
        let visa = valid().validate(now()).unwrap();
        assert_eq!(visa.country_name, "Japan");
        assert_eq!(visa.visa_type, VisaType::Tourist);
        assert!((visa.fee - 120.5).abs() < f64::EPSILON);
        assert_eq!(visa.validity, 3);
        assert_eq!(visa.age_restriction, Some(0));
        assert_eq!(visa.application_method, ApplicationMethod::Online);
        assert_eq!(visa.added_by, "owner@example.com");
    }

    #[test]
    fn short_description_blocks_submission() {
        let mut fields = valid();
        fields.description = "A".repeat(DESCRIPTION_MIN_LEN - 1);
        let mut form = Form::new(fields);
        let Err(Blocked::Invalid(errors)) = form.submit(now()) else {
            panic!("submission must be blocked");
        };
        assert_eq!(
            errors.get("description"),
            Some("Description should be at least 50 characters")
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(form.submissions(), 0);
        assert!(!form.is_submitting());
    }

    #[test]
    fn numeric_bounds() {
        let mut fields = valid();
        fields.fee = "-1".into();
        fields.validity = "0".into();
        fields.age_restriction = "-5".into();
        let errors = fields.validate(now()).unwrap_err();
        assert_eq!(errors.get("fee"), Some("Fee must be positive"));
        assert_eq!(errors.get("validity"), Some("Validity must be at least 1 month"));
        assert_eq!(errors.get("age_restriction"), Some("Age must be positive"));
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = VisaForm::new("a@b.c").validate(now()).unwrap_err();
        for field in [
            "country_image",
            "country_name",
            "visa_type",
            "processing_time",
            "description",
            "age_restriction",
            "fee",
            "validity",
            "application_method",
        ] {
            assert!(errors.contains(field), "{field}");
        }
    }

    #[test]
    fn fractional_validity_is_rejected() {
        let mut fields = valid();
        fields.validity = "1.5".into();
        let errors = fields.validate(now()).unwrap_err();
        assert_eq!(
            errors.get("validity"),
            Some("Validity must be a whole number of months")
        );
    }

    #[test]
    fn toggle_documents_in_standard_order() {
        let mut form = VisaForm::default();
        form.toggle_document("Health insurance");
        form.toggle_document("Valid passport");
        assert_eq!(form.required_documents, vec!["Valid passport", "Health insurance"]);
        form.toggle_document("Valid passport");
        assert_eq!(form.required_documents, vec!["Health insurance"]);
    }

    #[test]
    fn prefill_from_listing() {
        let new = valid().validate(now()).unwrap();
        let visa = Visa {
            id: "1".into(),
            country_name: new.country_name,
            country_image: new.country_image,
            visa_type: new.visa_type,
            processing_time: new.processing_time,
            fee: new.fee,
            validity: new.validity,
            application_method: new.application_method,
            age_restriction: new.age_restriction,
            description: new.description,
            required_documents: new.required_documents,
            added_by: new.added_by,
        };
        let form = VisaForm::from_visa(&visa);
        assert_eq!(form.visa_type, "Tourist Visa");
        assert_eq!(form.fee, "120.5");
        assert_eq!(NewVisa::from(visa), form.validate(now()).unwrap());
    }
}
