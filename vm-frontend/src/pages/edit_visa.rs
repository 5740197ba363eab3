use leptos::*;
use leptos_router::*;

use vm_boundary::{Session, Visa};
use vm_core::{
    fetch::Fetch,
    form::{Form, VisaForm},
};

use crate::{
    components::{ErrorBox, FetchView, VisaEditor},
    fetch, form,
    pages::Page,
    AppState,
};

/// Lets the owner change a listing.
#[component]
pub fn EditVisa(app: AppState, session: Session) -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));

    let visa = RwSignal::new(Fetch::<Visa>::default());

    let request = move || {
        let id = id.get_untracked();
        async move { app.public_api.visa(&id).await }
    };

    Effect::new(move |_| {
        id.track();
        fetch::load_optional(visa, request());
    });

    let on_retry = Callback::new(move |()| fetch::retry_optional(visa, request));
    let owner = session.user.email;

    view! {
      <section class="container mx-auto px-6 py-12">
        <h1 class="text-3xl font-bold mb-8 text-center">"Update Visa"</h1>
        <FetchView
          state = visa
          on_retry
          not_found = "Visa not found"
          ready = move |visa: Visa| {
            if visa.added_by != owner {
              log::warn!("{owner} is not the owner of visa {}", visa.id);
              return view! {
                <ErrorBox message = "You can only update visas you have added.".to_string() />
              }
              .into_view();
            }
            view! { <EditForm app visa /> }.into_view()
          }
        />
      </section>
    }
}

#[component]
fn EditForm(app: AppState, visa: Visa) -> impl IntoView {
    let form = RwSignal::new(Form::new(VisaForm::from_visa(&visa)));
    let navigate = use_navigate();
    let id = visa.id;

    let on_submit = move || {
        let id = id.clone();
        let navigate = navigate.clone();
        form::submit(
            form,
            move |submission| async move {
                let api = app.user_api().await?;
                api.update_visa(&id, &submission.payload, &submission.idempotency_key)
                    .await
            },
            move |outcome| match outcome {
                Ok(_) => {
                    app.success("Visa updated successfully!");
                    navigate(Page::MyVisas.path(), NavigateOptions::default());
                }
                Err(err) => app.error(format!("Failed to update visa: {err}")),
            },
        );
    };

    view! { <VisaEditor form on_submit submit_label="Update Visa" /> }
}
