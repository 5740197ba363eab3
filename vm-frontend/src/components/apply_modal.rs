use leptos::*;

use vm_core::{
    form::{ApplicationForm, ApplyDialog, Blocked},
    validate::Field,
};

use crate::{now, AppState, FieldBinding, FormError, SubmitButton, TextField};

/// The dialog to apply for a listing.
///
/// Nothing is rendered while the dialog is closed.
#[component]
pub fn ApplyModal(app: AppState, dialog: RwSignal<ApplyDialog>) -> impl IntoView {
    let busy = Signal::derive(move || dialog.with(|d| d.form().is_submitting()));
    let error = Signal::derive(move || dialog.with(|d| d.form().error().map(ToOwned::to_owned)));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match dialog.try_update(|d| d.submit(now())) {
            Some(Ok(submission)) => {
                log::debug!("Submit application {}", submission.idempotency_key);
                spawn_local(async move {
                    let result = match app.user_api().await {
                        Ok(api) => {
                            api.apply(&submission.payload, &submission.idempotency_key)
                                .await
                        }
                        Err(err) => Err(err),
                    };
                    let toast = dialog
                        .try_update(|d| d.settle(submission.ticket, result))
                        .flatten();
                    if let Some((level, message)) = toast {
                        app.toasts.update(|toasts| {
                            toasts.push(level, message);
                        });
                    }
                });
            }
            Some(Err(Blocked::InFlight)) => log::debug!("Application is already being submitted"),
            Some(Err(Blocked::Invalid(errors))) => log::debug!("Invalid application: {errors}"),
            None => {}
        }
    };

    let on_close = move |_| dialog.update(ApplyDialog::close);

    move || {
        if !dialog.with(ApplyDialog::is_open) {
            return ().into_view();
        }
        let (country, visa_type) = dialog.with_untracked(|d| {
            let visa = d.form().fields().visa();
            (visa.country_name.clone(), visa.visa_type)
        });
        view! {
          <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/50 p-4">
            <div class="w-full max-w-lg max-h-full overflow-y-auto rounded-xl p-6 bg-white dark:bg-gray-800">
              <div class="flex justify-between items-center mb-4">
                <h2 class="text-xl font-bold">{ format!("Apply for {country} ({visa_type})") }</h2>
                <button class="text-2xl leading-none" title="Close" on:click=on_close>"×"</button>
              </div>
              <form on:submit=on_submit>
                <FormError error />
                <TextField
                  label="Email"
                  binding=bind(dialog, "email", |f| f.email.as_str(), |f, v| f.email = v)
                  readonly=true
                />
                <div class="grid grid-cols-2 gap-4">
                  <TextField
                    label="First name"
                    binding=bind(dialog, "first_name", |f| f.first_name.as_str(), |f, v| f.first_name = v)
                    disabled=busy
                  />
                  <TextField
                    label="Last name"
                    binding=bind(dialog, "last_name", |f| f.last_name.as_str(), |f, v| f.last_name = v)
                    disabled=busy
                  />
                </div>
                <TextField
                  label="Passport number"
                  binding=bind(dialog, "passport_number", |f| f.passport_number.as_str(), |f, v| f.passport_number = v)
                  placeholder="A1234567"
                  disabled=busy
                />
                <TextField
                  label="Passport expiry"
                  binding=bind(dialog, "passport_expiry", |f| f.passport_expiry.as_str(), |f, v| f.passport_expiry = v)
                  input_type="date"
                  disabled=busy
                />
                <TextField
                  label="Fee (USD)"
                  binding=bind(dialog, "fee", |f| f.fee.as_str(), |f, v| f.fee = v)
                  readonly=true
                />
                <SubmitButton label="Apply" busy_label="Submitting..." busy />
              </form>
            </div>
          </div>
        }
        .into_view()
    }
}

fn bind(
    dialog: RwSignal<ApplyDialog>,
    name: Field,
    get: fn(&ApplicationForm) -> &str,
    set: fn(&mut ApplicationForm, String),
) -> FieldBinding {
    FieldBinding {
        name,
        value: Signal::derive(move || dialog.with(|d| get(d.form().fields()).to_owned())),
        on_input: Callback::new(move |value| dialog.update(|d| d.edit(|f| set(f, value)))),
        error: Signal::derive(move || {
            dialog.with(|d| d.form().field_error(name).map(ToOwned::to_owned))
        }),
    }
}
