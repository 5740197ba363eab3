use leptos::*;

use vm_boundary::{Session, User};
use vm_core::{
    form::{Form, ProfileForm},
    profile::{account_age_years, display_name, short_uid},
};

use crate::{
    components::{bind, FormError, SubmitButton, TextField},
    form, now, AppState,
};

#[component]
pub fn Profile(app: AppState, session: Session) -> impl IntoView {
    let form = RwSignal::new(Form::new(ProfileForm::from_user(&session.user)));

    // The session is replaced after every profile update.
    let user = create_memo(move |_| app.session().map(|s| s.user));

    let busy = Signal::derive(move || form.with(Form::is_submitting));
    let error = Signal::derive(move || form.with(|f| f.error().map(ToOwned::to_owned)));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        form::submit(
            form,
            move |submission| async move {
                let session = app.fresh_session().await?;
                app.identity_api
                    .update_profile(&session, &submission.payload)
                    .await
            },
            move |outcome| match outcome {
                Ok(session) => {
                    let fields = ProfileForm::from_user(&session.user);
                    app.refresh_session(session);
                    form.update(|f| f.reinitialize(fields));
                    app.success("Profile updated successfully!");
                }
                Err(err) => app.error(format!("Failed to update profile: {err}")),
            },
        );
    };

    view! {
      <section class="container mx-auto px-6 py-12">
        <div class="max-w-2xl mx-auto grid gap-8">
          {move || user.get().map(|user| view! { <ProfileCard user /> })}
          <form class="p-8 rounded-xl shadow-md bg-white dark:bg-gray-800" on:submit = on_submit>
            <h2 class="text-xl font-semibold mb-4">"Edit profile"</h2>
            <FormError error />
            <TextField
              label="Display name"
              binding=bind(form, "display_name", |f| f.display_name.as_str(), |f, v| f.display_name = v)
              disabled=busy
            />
            <TextField
              label="Photo URL"
              binding=bind(form, "photo_url", |f| f.photo_url.as_str(), |f, v| f.photo_url = v)
              placeholder="https://"
              disabled=busy
            />
            <SubmitButton label="Save" busy_label="Saving..." busy />
          </form>
        </div>
      </section>
    }
}

#[component]
fn ProfileCard(user: User) -> impl IntoView {
    let name = display_name(&user).to_owned();
    let uid = short_uid(&user.uid);
    let age = account_age_years(&user, now()).map(|years| match years {
        0 => "Less than a year".to_string(),
        1 => "1 year".to_string(),
        n => format!("{n} years"),
    });
    let providers = if user.providers.is_empty() {
        "-".to_string()
    } else {
        user.providers.join(", ")
    };
    let User {
        email,
        photo_url,
        email_verified,
        ..
    } = user;

    view! {
      <div class="p-8 rounded-xl shadow-md bg-white dark:bg-gray-800 text-center">
        {match photo_url {
            Some(url) => view! {
              <img src=url alt=name.clone() class="w-28 h-28 mx-auto mb-4 rounded-full object-cover" />
            }
            .into_view(),
            None => view! {
              <div class="w-28 h-28 mx-auto mb-4 rounded-full flex items-center justify-center text-4xl font-bold bg-blue-600 text-white">
                { name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default() }
              </div>
            }
            .into_view(),
        }}
        <h1 class="text-2xl font-bold">{ name.clone() }</h1>
        <p class="text-gray-500 mb-4">{ email }</p>
        {if email_verified {
            view! { <span class="px-2 py-1 rounded text-xs font-semibold bg-green-100 text-green-800">"Verified"</span> }
        } else {
            view! { <span class="px-2 py-1 rounded text-xs font-semibold bg-yellow-100 text-yellow-800">"Not verified"</span> }
        }}
        <dl class="grid grid-cols-3 gap-4 mt-6 text-sm">
          <div>
            <dt class="text-gray-500">"User ID"</dt>
            <dd class="font-mono" title=user.uid>{ uid }</dd>
          </div>
          <div>
            <dt class="text-gray-500">"Sign in with"</dt>
            <dd>{ providers }</dd>
          </div>
          <div>
            <dt class="text-gray-500">"Member for"</dt>
            <dd>{ age.unwrap_or_else(|| "-".to_string()) }</dd>
          </div>
        </dl>
      </div>
    }
}
