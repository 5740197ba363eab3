use leptos::*;
use leptos_router::*;

use vm_boundary::Session;
use vm_core::{
    form::{Form, RegisterForm, Registration},
    gate::with_return_path,
};
use vm_frontend_api::{Error, IdentityApi, IdentityError};

use super::login::{leave_when_signed_in, use_return_path};
use crate::{
    components::{bind, FormError, SubmitButton, TextField},
    form,
    pages::Page,
    storage::Persistence,
    AppState,
};

#[component]
pub fn Register(app: AppState) -> impl IntoView {
    let form = RwSignal::new(Form::<RegisterForm>::default());
    let target = use_return_path();

    leave_when_signed_in(app, target);

    let busy = Signal::derive(move || form.with(Form::is_submitting));
    let error = Signal::derive(move || form.with(|f| f.error().map(ToOwned::to_owned)));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        form::submit(
            form,
            move |submission| async move {
                let result = register(app.identity_api, &submission.payload).await;
                if let Err(err @ Error::Identity(IdentityError::EmailExists)) = &result {
                    form.try_update(|f| f.reject_field("email", err.to_string()));
                }
                result
            },
            move |outcome| match outcome {
                Ok(session) => {
                    app.sign_in(session, Persistence::default());
                    app.success("Registration successful!");
                }
                Err(err) => {
                    log::warn!("Unable to register: {err}");
                    app.error(err);
                }
            },
        );
    };

    let login_href = move || with_return_path(Page::Login.path(), &target.get());

    view! {
      <section class="container mx-auto px-6 py-12">
        <div class="max-w-md mx-auto p-8 rounded-xl shadow-md bg-white dark:bg-gray-800">
          <h1 class="text-2xl font-bold mb-2">"Register"</h1>
          <p class="mb-6 text-gray-500">"Create your VisaMaster account"</p>
          <form on:submit = on_submit>
            <FormError error />
            <TextField
              label="Full name"
              binding=bind(form, "name", |f| f.name.as_str(), |f, v| f.name = v)
              disabled=busy
            />
            <TextField
              label="Email"
              binding=bind(form, "email", |f| f.email.as_str(), |f, v| f.email = v)
              input_type="email"
              disabled=busy
            />
            <TextField
              label="Photo URL"
              binding=bind(form, "photo_url", |f| f.photo_url.as_str(), |f, v| f.photo_url = v)
              placeholder="https://"
              disabled=busy
            />
            <TextField
              label="Password"
              binding=bind(form, "password", |f| f.password.as_str(), |f, v| f.password = v)
              input_type="password"
              disabled=busy
            />
            <TextField
              label="Confirm password"
              binding=bind(form, "confirm_password", |f| f.confirm_password.as_str(), |f, v| f.confirm_password = v)
              input_type="password"
              disabled=busy
            />
            <SubmitButton label="Register" busy_label="Creating account..." busy />
          </form>
          <p class="mt-6 text-sm text-center text-gray-500">
            "Already have an account? "
            <A href=login_href class="text-blue-600 hover:underline".to_string()>"Login"</A>
          </p>
        </div>
      </section>
    }
}

/// Creates the account and sets up the profile.
async fn register(api: IdentityApi, registration: &Registration) -> Result<Session, Error> {
    log::info!("Register {}", registration.credentials.email);
    let session = api.sign_up(&registration.credentials).await?;
    match api.update_profile(&session, &registration.profile).await {
        Ok(session) => Ok(session),
        Err(err) => {
            // The account exists anyway.
            log::warn!("Unable to set up profile: {err}");
            Ok(session)
        }
    }
}
