use leptos::*;

use vm_core::{form::Form, validate::Field};

const INPUT_CLASS: &str = "block w-full px-3 py-2 rounded-lg border bg-gray-50 text-gray-900 dark:bg-gray-700 dark:text-white focus:outline-none focus:ring-2 focus:ring-blue-500";

/// Connects an input element with one field of a [`Form`].
#[derive(Clone, Copy)]
pub struct FieldBinding {
    pub name: Field,
    pub value: Signal<String>,
    pub on_input: Callback<String>,
    pub error: Signal<Option<String>>,
}

pub fn bind<T>(
    form: RwSignal<Form<T>>,
    name: Field,
    get: fn(&T) -> &str,
    set: fn(&mut T, String),
) -> FieldBinding
where
    T: Clone + 'static,
{
    FieldBinding {
        name,
        value: Signal::derive(move || form.with(|f| get(f.fields()).to_owned())),
        on_input: Callback::new(move |value| form.update(|f| f.edit(|fields| set(fields, value)))),
        error: Signal::derive(move || form.with(|f| f.field_error(name).map(ToOwned::to_owned))),
    }
}

fn input_class(error: Signal<Option<String>>) -> impl Fn() -> String {
    move || {
        if error.with(Option::is_some) {
            format!("{INPUT_CLASS} border-red-500")
        } else {
            format!("{INPUT_CLASS} border-gray-300 dark:border-gray-600")
        }
    }
}

#[component]
pub fn TextField(
    label: &'static str,
    binding: FieldBinding,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] readonly: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let FieldBinding {
        name,
        value,
        on_input,
        error,
    } = binding;
    view! {
      <div class="mb-4">
        <label for=name class="block mb-1 text-sm font-medium">{ label }</label>
        <input
          id=name
          name=name
          type=input_type
          placeholder=placeholder
          readonly=readonly
          class=input_class(error)
          prop:value = move || value.get()
          prop:disabled = move || disabled.get()
          on:input = move |ev| on_input.call(event_target_value(&ev))
        />
        <FieldError error />
      </div>
    }
}

#[component]
pub fn TextArea(
    label: &'static str,
    binding: FieldBinding,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let FieldBinding {
        name,
        value,
        on_input,
        error,
    } = binding;
    view! {
      <div class="mb-4">
        <label for=name class="block mb-1 text-sm font-medium">{ label }</label>
        <textarea
          id=name
          name=name
          rows="4"
          placeholder=placeholder
          class=input_class(error)
          prop:value = move || value.get()
          prop:disabled = move || disabled.get()
          on:input = move |ev| on_input.call(event_target_value(&ev))
        />
        <FieldError error />
      </div>
    }
}

/// A select box, the first option is shown if the value is empty.
#[component]
pub fn SelectField(
    label: &'static str,
    binding: FieldBinding,
    /// Pairs of value and label.
    options: Vec<(&'static str, &'static str)>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let FieldBinding {
        name,
        value,
        on_input,
        error,
    } = binding;
    view! {
      <div class="mb-4">
        <label for=name class="block mb-1 text-sm font-medium">{ label }</label>
        <select
          id=name
          name=name
          class=input_class(error)
          prop:disabled = move || disabled.get()
          on:change = move |ev| on_input.call(event_target_value(&ev))
        >
          {options
              .into_iter()
              .map(|(v, l)| view! {
                <option value=v prop:selected = move || value.with(|x| x.as_str() == v)>{ l }</option>
              })
              .collect_view()}
        </select>
        <FieldError error />
      </div>
    }
}

#[component]
pub fn FieldError(error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|err| {
            view! { <p class="mt-1 text-sm text-red-600 dark:text-red-400">{ err }</p> }
        })
    }
}

/// The message of a failed submission.
#[component]
pub fn FormError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|err| {
            view! {
              <div class="mb-4 p-3 rounded-lg bg-red-50 text-red-700 dark:bg-red-900/30 dark:text-red-300" role="alert">
                { err }
              </div>
            }
        })
    }
}

#[component]
pub fn SubmitButton(
    label: &'static str,
    busy_label: &'static str,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    view! {
      <button
        type="submit"
        class="w-full px-5 py-2.5 rounded-lg text-white font-medium bg-blue-600 hover:bg-blue-700 disabled:opacity-50"
        prop:disabled = move || busy.get()
      >
        {move || if busy.get() { busy_label } else { label }}
      </button>
    }
}
