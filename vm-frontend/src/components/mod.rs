mod application_card;
mod apply_modal;
mod fetch_view;
mod fields;
mod footer;
mod navbar;
mod protected;
mod spinner;
mod toasts;
mod visa_card;
mod visa_form;

pub use self::{
    application_card::*, apply_modal::*, fetch_view::*, fields::*, footer::*, navbar::*,
    protected::*, spinner::*, toasts::*, visa_card::*, visa_form::*,
};
