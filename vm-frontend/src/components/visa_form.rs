use leptos::*;

use vm_boundary::{ApplicationMethod, VisaType};
use vm_core::form::{Form, VisaForm, DOCUMENT_OPTIONS};

use crate::{bind, FormError, SelectField, SubmitButton, TextArea, TextField};

/// The form to add or edit a listing.
#[component]
pub fn VisaEditor<F>(
    form: RwSignal<Form<VisaForm>>,
    on_submit: F,
    submit_label: &'static str,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    let busy = Signal::derive(move || form.with(Form::is_submitting));
    let error = Signal::derive(move || form.with(|f| f.error().map(ToOwned::to_owned)));

    let visa_types = std::iter::once(("", "Select a visa type"))
        .chain(VisaType::ALL.iter().map(|t| (t.as_str(), t.as_str())))
        .collect::<Vec<_>>();
    let methods = std::iter::once(("", "Select a method"))
        .chain(ApplicationMethod::ALL.iter().map(|m| (m.as_str(), m.as_str())))
        .collect::<Vec<_>>();

    view! {
      <form
        class="max-w-3xl mx-auto p-6 rounded-xl shadow-md bg-white dark:bg-gray-800"
        on:submit = move |ev| {
          ev.prevent_default();
          on_submit();
        }
      >
        <FormError error />
        <div class="grid md:grid-cols-2 gap-x-6">
          <TextField
            label="Country image URL"
            binding=bind(form, "country_image", |f| f.country_image.as_str(), |f, v| f.country_image = v)
            placeholder="https://"
            disabled=busy
          />
          <TextField
            label="Country name"
            binding=bind(form, "country_name", |f| f.country_name.as_str(), |f, v| f.country_name = v)
            disabled=busy
          />
          <SelectField
            label="Visa type"
            binding=bind(form, "visa_type", |f| f.visa_type.as_str(), |f, v| f.visa_type = v)
            options=visa_types
            disabled=busy
          />
          <TextField
            label="Processing time"
            binding=bind(form, "processing_time", |f| f.processing_time.as_str(), |f, v| f.processing_time = v)
            placeholder="e.g. 5-7 business days"
            disabled=busy
          />
          <TextField
            label="Fee (USD)"
            binding=bind(form, "fee", |f| f.fee.as_str(), |f, v| f.fee = v)
            input_type="number"
            disabled=busy
          />
          <TextField
            label="Validity (months)"
            binding=bind(form, "validity", |f| f.validity.as_str(), |f, v| f.validity = v)
            input_type="number"
            disabled=busy
          />
          <TextField
            label="Age restriction"
            binding=bind(form, "age_restriction", |f| f.age_restriction.as_str(), |f, v| f.age_restriction = v)
            input_type="number"
            disabled=busy
          />
          <SelectField
            label="Application method"
            binding=bind(form, "application_method", |f| f.application_method.as_str(), |f, v| f.application_method = v)
            options=methods
            disabled=busy
          />
        </div>
        <fieldset class="mb-4">
          <legend class="mb-2 text-sm font-medium">"Required documents"</legend>
          <div class="grid sm:grid-cols-2 gap-2">
            {DOCUMENT_OPTIONS
                .into_iter()
                .map(|doc| view! { <DocumentCheckbox form doc /> })
                .collect_view()}
          </div>
        </fieldset>
        <TextArea
          label="Description"
          binding=bind(form, "description", |f| f.description.as_str(), |f, v| f.description = v)
          disabled=busy
        />
        <TextField
          label="Added by"
          binding=bind(form, "added_by", |f| f.added_by.as_str(), |f, v| f.added_by = v)
          readonly=true
        />
        <SubmitButton label=submit_label busy_label="Saving..." busy />
      </form>
    }
}

#[component]
fn DocumentCheckbox(form: RwSignal<Form<VisaForm>>, doc: &'static str) -> impl IntoView {
    view! {
      <label class="flex items-center gap-2 text-sm">
        <input
          type="checkbox"
          prop:checked = move || form.with(|f| f.fields().has_document(doc))
          on:change = move |_| form.update(|f| f.edit(|fields| fields.toggle_document(doc)))
        />
        { doc }
      </label>
    }
}
