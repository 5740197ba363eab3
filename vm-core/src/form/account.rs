use time::OffsetDateTime;

use vm_boundary::{Credentials, ProfileUpdate, User};

use crate::validate::{FieldErrors, Rule, Validate};

pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Keep the session after the browser has been closed.
    pub remember_me: bool,
}

impl Validate for LoginForm {
    type Output = Credentials;

    fn validate(&self, _: OffsetDateTime) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors
            .check("email", &self.email, &[Rule::Required("Email is required")])
            .check(
                "password",
                &self.password,
                &[Rule::Required("Password is required")],
            );
        errors.finish(|| {
            Some(Credentials {
                email: self.email.trim().to_owned(),
                password: self.password.clone(),
            })
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub photo_url: String,
    pub password: String,
    pub confirm_password: String,
}

/// A new account followed by the initial profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub credentials: Credentials,
    pub profile: ProfileUpdate,
}

impl Validate for RegisterForm {
    type Output = Registration;

    fn validate(&self, _: OffsetDateTime) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors
            .check("name", &self.name, &[Rule::Required("Name is required")])
            .check(
                "email",
                &self.email,
                &[
                    Rule::Required("Email is required"),
                    Rule::Email("Invalid email address"),
                ],
            )
            .check(
                "photo_url",
                &self.photo_url,
                &[Rule::WebUrl("Photo URL must start with http:// or https://")],
            )
            .check(
                "password",
                &self.password,
                &[
                    Rule::Required("Password is required"),
                    Rule::MinLength(
                        PASSWORD_MIN_LEN,
                        "Password must be at least 6 characters",
                    ),
                ],
            )
            .check(
                "confirm_password",
                &self.confirm_password,
                &[Rule::EqualTo(&self.password, "Passwords do not match")],
            );
        errors.finish(|| {
            Some(Registration {
                credentials: Credentials {
                    email: self.email.trim().to_owned(),
                    password: self.password.clone(),
                },
                profile: ProfileUpdate {
                    display_name: Some(self.name.trim().to_owned()),
                    photo_url: non_blank(&self.photo_url).map(Some),
                },
            })
        })
    }
}

/// Editable part of the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub display_name: String,
    pub photo_url: String,
}

impl ProfileForm {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            display_name: user.display_name.clone().unwrap_or_default(),
            photo_url: user.photo_url.clone().unwrap_or_default(),
        }
    }
}

impl Validate for ProfileForm {
    type Output = ProfileUpdate;

    fn validate(&self, _: OffsetDateTime) -> Result<ProfileUpdate, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors
            .check(
                "display_name",
                &self.display_name,
                &[
                    Rule::Required("Name is required"),
                    Rule::MaxLength(100, "Name is too long"),
                ],
            )
            .check(
                "photo_url",
                &self.photo_url,
                &[Rule::WebUrl("Photo URL must start with http:// or https://")],
            );
        errors.finish(|| {
            Some(ProfileUpdate {
                display_name: Some(self.display_name.trim().to_owned()),
                // A blank field removes the photo
                photo_url: Some(non_blank(&self.photo_url)),
            })
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH
    }

    fn register() -> RegisterForm {
        RegisterForm {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            photo_url: String::new(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate(now()).unwrap_err();
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
    }

    #[test]
    fn register_without_photo() {
        let reg = register().validate(now()).unwrap();
        assert_eq!(reg.credentials.email, "jane@example.com");
        assert_eq!(reg.profile.display_name.as_deref(), Some("Jane Doe"));
        // nothing to set or remove on a new account
        assert_eq!(reg.profile.photo_url, None);
    }

    #[test]
    fn register_rules() {
        let mut form = register();
        form.email = "jane".into();
        form.photo_url = "javascript:alert(1)".into();
        form.password = "12345".into();
        form.confirm_password = "12345".into();
        let errors = form.validate(now()).unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert!(errors.contains("photo_url"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert!(!errors.contains("confirm_password"));
    }

    #[test]
    fn passwords_must_match() {
        let mut form = register();
        form.confirm_password = "secret2".into();
        let errors = form.validate(now()).unwrap_err();
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn profile_from_user() {
        let user = User {
            uid: "u".into(),
            email: "a@b.c".into(),
            display_name: Some("A".into()),
            photo_url: None,
            email_verified: false,
            providers: vec![],
            created_at: None,
        };
        let form = ProfileForm::from_user(&user);
        assert_eq!(form.display_name, "A");
        assert_eq!(form.photo_url, "");
    }

    #[test]
    fn blank_photo_url_removes_the_photo() {
        let form = ProfileForm {
            display_name: "Jane".into(),
            photo_url: "   ".into(),
        };
        let update = form.validate(now()).unwrap();
        assert_eq!(update.photo_url, Some(None));

        let form = ProfileForm {
            display_name: "Jane".into(),
            photo_url: " https://example.com/me.png ".into(),
        };
        let update = form.validate(now()).unwrap();
        assert_eq!(
            update.photo_url,
            Some(Some("https://example.com/me.png".into()))
        );
    }
}
