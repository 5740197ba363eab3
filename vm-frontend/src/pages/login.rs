use leptos::*;
use leptos_router::*;

use vm_core::{
    form::{Form, LoginForm},
    gate::{return_path, with_return_path, FROM_PARAM},
};

use crate::{
    components::{bind, FormError, SubmitButton, TextField},
    form,
    pages::Page,
    storage::Persistence,
    AppState,
};

/// Where to go after signing in.
pub(crate) fn use_return_path() -> Memo<String> {
    let query = use_query_map();
    create_memo(move |_| query.with(|q| return_path(q.get(FROM_PARAM).map(String::as_str))))
}

/// Leaves the page as soon as a user is signed in.
pub(crate) fn leave_when_signed_in(app: AppState, target: Memo<String>) {
    let navigate = use_navigate();
    Effect::new(move |_| {
        if app.auth.with(|auth| auth.user().is_some()) {
            let target = target.get_untracked();
            log::debug!("Signed in, continue with {target}");
            navigate(
                &target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}

#[component]
pub fn Login(app: AppState) -> impl IntoView {
    let form = RwSignal::new(Form::<LoginForm>::default());
    let target = use_return_path();

    leave_when_signed_in(app, target);

    let busy = Signal::derive(move || form.with(Form::is_submitting));
    let error = Signal::derive(move || form.with(|f| f.error().map(ToOwned::to_owned)));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let persistence = Persistence::new(form.with_untracked(|f| f.fields().remember_me));
        form::submit(
            form,
            move |submission| async move {
                log::info!("Logging in with {}", submission.payload.email);
                app.identity_api.sign_in(&submission.payload).await
            },
            move |outcome| match outcome {
                Ok(session) => {
                    app.sign_in(session, persistence);
                    app.success("Login successful");
                }
                Err(err) => {
                    log::warn!("Unable to login: {err}");
                    app.error(err);
                }
            },
        );
    };

    let register_href = move || with_return_path(Page::Register.path(), &target.get());

    view! {
      <section class="container mx-auto px-6 py-12">
        <div class="max-w-md mx-auto p-8 rounded-xl shadow-md bg-white dark:bg-gray-800">
          <h1 class="text-2xl font-bold mb-2">"Login"</h1>
          <p class="mb-6 text-gray-500">"Please login to your account"</p>
          <form on:submit = on_submit>
            <FormError error />
            <TextField
              label="Email"
              binding=bind(form, "email", |f| f.email.as_str(), |f, v| f.email = v)
              input_type="email"
              disabled=busy
            />
            <TextField
              label="Password"
              binding=bind(form, "password", |f| f.password.as_str(), |f, v| f.password = v)
              input_type="password"
              disabled=busy
            />
            <label class="flex items-center gap-2 mb-6 text-sm">
              <input
                type="checkbox"
                prop:checked = move || form.with(|f| f.fields().remember_me)
                on:change = move |ev| {
                  let checked = event_target_checked(&ev);
                  form.update(|f| f.edit(|fields| fields.remember_me = checked));
                }
              />
              "Remember me"
            </label>
            <SubmitButton label="Log in" busy_label="Logging in..." busy />
          </form>
          <p class="mt-6 text-sm text-center text-gray-500">
            "Don't have an account? "
            <A href=register_href class="text-blue-600 hover:underline".to_string()>"Register"</A>
          </p>
        </div>
      </section>
    }
}
