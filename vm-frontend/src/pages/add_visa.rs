use leptos::*;
use leptos_router::*;

use vm_boundary::Session;
use vm_core::form::{Form, VisaForm};

use crate::{components::VisaEditor, form, pages::Page, AppState};

#[component]
pub fn AddVisa(app: AppState, session: Session) -> impl IntoView {
    let form = RwSignal::new(Form::new(VisaForm::new(session.user.email)));
    let navigate = use_navigate();

    let on_submit = move || {
        let navigate = navigate.clone();
        form::submit(
            form,
            move |submission| async move {
                let api = app.user_api().await?;
                api.create_visa(&submission.payload, &submission.idempotency_key)
                    .await
            },
            move |outcome| match outcome {
                Ok(ack) => {
                    log::info!("Added visa {}", ack.inserted_id.unwrap_or_default());
                    app.success("Visa added successfully!");
                    navigate(Page::MyVisas.path(), NavigateOptions::default());
                }
                Err(err) => app.error(format!("Failed to add visa: {err}")),
            },
        );
    };

    view! {
      <section class="container mx-auto px-6 py-12">
        <h1 class="text-3xl font-bold mb-8 text-center">"Add Visa"</h1>
        <VisaEditor form on_submit submit_label="Add Visa" />
      </section>
    }
}
