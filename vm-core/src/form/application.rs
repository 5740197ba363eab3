use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;

use vm_boundary::{ApplicationStatus, NewVisaApplication, User, Visa, WriteAck};

use crate::{
    form::{Blocked, Form, Submission},
    notify::Level,
    ticket::Ticket,
    validate::{parse_date, FieldErrors, Rule, Validate},
};

lazy_static! {
    static ref PASSPORT_NUMBER_REGEX: Regex = Regex::new(r"^[A-Z0-9]{6,12}$").unwrap();
}

/// Raw input of the apply dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationForm {
    visa: Visa,
    applicant_id: String,
    pub email: String,
    pub fee: String,
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    /// `YYYY-MM-DD`
    pub passport_expiry: String,
}

impl ApplicationForm {
    /// Prefills the form with the fee of the listing and the email of the applicant.
    #[must_use]
    pub fn new(visa: Visa, applicant: &User) -> Self {
        Self {
            fee: visa.fee.to_string(),
            visa,
            applicant_id: applicant.uid.clone(),
            email: applicant.email.clone(),
            first_name: String::new(),
            last_name: String::new(),
            passport_number: String::new(),
            passport_expiry: String::new(),
        }
    }

    #[must_use]
    pub const fn visa(&self) -> &Visa {
        &self.visa
    }
}

impl Validate for ApplicationForm {
    type Output = NewVisaApplication;

    fn validate(&self, now: OffsetDateTime) -> Result<NewVisaApplication, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors
            .check(
                "email",
                &self.email,
                &[
                    Rule::Required("Email is required"),
                    Rule::Email("Invalid email address"),
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
                "first_name",
                &self.first_name,
                &[
                    Rule::Required("First name is required"),
                    Rule::MinLength(2, "Minimum 2 characters"),
                ],
            )
            .check(
                "last_name",
                &self.last_name,
                &[
                    Rule::Required("Last name is required"),
                    Rule::MinLength(2, "Minimum 2 characters"),
                ],
            )
            .check(
                "passport_number",
                &self.passport_number,
                &[
                    Rule::Required("Passport number is required"),
                    Rule::Pattern(&PASSPORT_NUMBER_REGEX, "Invalid passport number format"),
                ],
            )
            .check(
                "passport_expiry",
                &self.passport_expiry,
                &[
                    Rule::Required("Passport expiry date is required"),
                    Rule::DateAfter(now.date(), "Passport must be valid"),
                ],
            );
        let fee = errors.parse::<f64>("fee", &self.fee, "Fee must be a number");
        let expiry = parse_date(&self.passport_expiry);

        errors.finish(|| {
            Some(NewVisaApplication {
                visa_info: self.visa.clone(),
                applicant_id: self.applicant_id.clone(),
                email: self.email.trim().to_owned(),
                first_name: self.first_name.trim().to_owned(),
                last_name: self.last_name.trim().to_owned(),
                passport_number: self.passport_number.trim().to_owned(),
                passport_expiry: crate::validate::format_date(expiry?),
                fee: fee?,
                status: ApplicationStatus::Pending,
                applied_date: now,
            })
        })
    }
}

/// The modal dialog on the listing details page.
#[derive(Debug, Clone)]
pub struct ApplyDialog {
    open: bool,
    form: Form<ApplicationForm>,
}

impl ApplyDialog {
    #[must_use]
    pub fn new(visa: Visa, applicant: &User) -> Self {
        Self {
            open: false,
            form: Form::new(ApplicationForm::new(visa, applicant)),
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub const fn form(&self) -> &Form<ApplicationForm> {
        &self.form
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut ApplicationForm)) {
        self.form.edit(f);
    }

    pub fn submit(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<Submission<NewVisaApplication>, Blocked> {
        self.form.submit(now)
    }

    /// Applies the response of the server and returns the toast to show.
    ///
    /// Success closes the dialog and clears the fields.
    /// Failure keeps the dialog open.
    /// A response of a superseded submission yields no toast.
    pub fn settle<E>(
        &mut self,
        ticket: Ticket,
        result: Result<WriteAck, E>,
    ) -> Option<(Level, String)>
    where
        E: std::fmt::Display,
    {
        match self.form.settle(ticket, result)? {
            Ok(_) => {
                self.open = false;
                Some((Level::Success, "Application submitted successfully!".to_owned()))
            }
            Err(err) => Some((Level::Error, format!("Failed to submit application: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{macros::datetime, Duration};

    use vm_boundary::{ApplicationMethod, VisaType};

    use super::*;
    use crate::validate::format_date;

    fn visa() -> Visa {
        Visa {
            id: "v1".into(),
            country_name: "Japan".into(),
            country_image: "https://example.com/jp.png".into(),
            visa_type: VisaType::Tourist,
            processing_time: "10 days".into(),
            fee: 120.0,
            validity: 3,
            application_method: ApplicationMethod::Online,
            age_restriction: None,
            description: "Short stay".into(),
            required_documents: vec![],
            added_by: "owner@example.com".into(),
        }
    }

    fn user() -> User {
        User {
            uid: "u1".into(),
            email: "jane@example.com".into(),
            display_name: None,
            photo_url: None,
            email_verified: true,
            providers: vec![],
            created_at: None,
        }
    }

    fn now() -> OffsetDateTime {
        datetime!(2025-03-10 12:00 UTC)
    }

    fn fill(form: &mut ApplicationForm) {
        form.first_name = "Jane".into();
        form.last_name = "Doe".into();
        form.passport_number = "AB123456".into();
        form.passport_expiry = format_date((now() + Duration::days(1)).date());
    }

    #[test]
    fn prefilled_from_listing_and_user() {
        let form = ApplicationForm::new(visa(), &user());
        assert_eq!(form.email, "jane@example.com");
        assert_eq!(form.fee, "120");
    }

    #[test]
    fn payload_embeds_listing_snapshot_and_pending_status() {
        let mut form = ApplicationForm::new(visa(), &user());
        fill(&mut form);
        let app = form.validate(now()).unwrap();
        assert_eq!(app.visa_info, visa());
        assert_eq!(app.applicant_id, "u1");
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(app.applied_date, now());
        assert_eq!(app.passport_expiry, "2025-03-11");
    }

    #[test]
    fn expiry_must_be_strictly_after_today() {
        for expiry in ["2025-03-10", "2025-03-09"] {
            let mut dialog = ApplyDialog::new(visa(), &user());
            dialog.open();
            dialog.edit(|f| {
                fill(f);
                f.passport_expiry = expiry.into();
            });
            let Err(Blocked::Invalid(errors)) = dialog.submit(now()) else {
                panic!("expiry {expiry} must be rejected");
            };
            assert_eq!(errors.get("passport_expiry"), Some("Passport must be valid"));
            assert_eq!(dialog.form().submissions(), 0);
            assert!(dialog.is_open());
        }
    }

    #[test]
    fn passport_number_format() {
        let mut form = ApplicationForm::new(visa(), &user());
        fill(&mut form);
        form.passport_number = "ab12".into();
        let errors = form.validate(now()).unwrap_err();
        assert_eq!(
            errors.get("passport_number"),
            Some("Invalid passport number format")
        );
    }

    #[test]
    fn names_need_two_characters() {
        let mut form = ApplicationForm::new(visa(), &user());
        fill(&mut form);
        form.first_name = "J".into();
        let errors = form.validate(now()).unwrap_err();
        assert_eq!(errors.get("first_name"), Some("Minimum 2 characters"));
    }

    #[test]
    fn acknowledged_submission_closes_clears_and_notifies_once() {
        let mut dialog = ApplyDialog::new(visa(), &user());
        dialog.open();
        dialog.edit(fill);
        let sub = dialog.submit(now()).unwrap();
        assert!(dialog.form().is_submitting());

        let ack = WriteAck {
            acknowledged: true,
            inserted_id: Some("a1".into()),
            ..Default::default()
        };
        let toast = dialog.settle::<String>(sub.ticket, Ok(ack.clone()));

        assert_eq!(
            toast,
            Some((Level::Success, "Application submitted successfully!".into()))
        );
        assert!(!dialog.is_open());
        assert!(!dialog.form().is_submitting());
        assert!(dialog.form().fields().first_name.is_empty());
        assert!(dialog.form().fields().passport_number.is_empty());
        assert_eq!(dialog.form().fields().email, "jane@example.com");
        assert_eq!(dialog.settle::<String>(sub.ticket, Ok(ack)), None);
    }

    #[test]
    fn failed_submission_keeps_dialog_open() {
        let mut dialog = ApplyDialog::new(visa(), &user());
        dialog.open();
        dialog.edit(fill);
        let sub = dialog.submit(now()).unwrap();
        let toast = dialog.settle(sub.ticket, Err("Passport already used"));
        assert_eq!(
            toast,
            Some((
                Level::Error,
                "Failed to submit application: Passport already used".into()
            ))
        );
        assert!(dialog.is_open());
        assert!(!dialog.form().is_submitting());
        assert_eq!(dialog.form().fields().first_name, "Jane");
    }
}
