mod add_visa;
mod all_visas;
mod edit_visa;
mod home;
mod login;
mod my_applications;
mod my_visas;
mod not_found;
mod profile;
mod register;
mod visa_details;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    AllVisas,
    VisaDetails,
    AddVisa,
    EditVisa,
    MyVisas,
    MyApplications,
    Login,
    Register,
    Profile,
}

impl Page {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::AllVisas => "/all-visas",
            Self::VisaDetails => "/visa/:id",
            Self::AddVisa => "/add-visa",
            Self::EditVisa => "/update-visa/:id",
            Self::MyVisas => "/my-added-visas",
            Self::MyApplications => "/my-visa-applications",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Profile => "/profile",
        }
    }

    pub fn visa_details(id: &str) -> String {
        format!("/visa/{id}")
    }

    pub fn edit_visa(id: &str) -> String {
        format!("/update-visa/{id}")
    }
}

pub use self::{
    add_visa::*, all_visas::*, edit_visa::*, home::*, login::*, my_applications::*, my_visas::*,
    not_found::*, profile::*, register::*, visa_details::*,
};
