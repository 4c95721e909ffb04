use crate::admin::forms::Notification;
use crate::models::SearchResult;
use crate::utils::{format_number, format_rating};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NotificationBannerProps {
    pub notification: Option<Notification>,
}

#[function_component(NotificationBanner)]
pub fn notification_banner(props: &NotificationBannerProps) -> Html {
    let Some(notification) = &props.notification else {
        return html! {};
    };

    let (icon, frame, text) = if notification.is_success() {
        ("✅", "bg-green-900/20 border-green-500/50", "text-green-300")
    } else {
        ("⚠️", "bg-red-900/20 border-red-500/50", "text-red-300")
    };

    html! {
        <div class={classes!("mb-6", "p-4", "rounded-xl", "border", "flex", "items-center", "gap-3", frame)}>
            <span class="text-xl">{ icon }</span>
            <p class={classes!("font-medium", text)}>{ &notification.message }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub error_message: Option<String>,
}

#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    if let Some(msg) = &props.error_message {
        html! {
            <div class="bg-red-900/20 border border-red-500/50 text-red-300 px-4 py-3 rounded-xl mb-6">
                <h3 class="font-semibold">{"Error Loading Stats"}</h3>
                <p class="text-sm">{ msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}

#[derive(Properties, PartialEq)]
pub struct PageHeaderProps {
    pub title: AttrValue,
    pub subtitle: AttrValue,
}

#[function_component(PageHeader)]
pub fn page_header(props: &PageHeaderProps) -> Html {
    html! {
        <div class="mb-8">
            <h1 class="text-3xl font-bold text-white mb-2">{ props.title.clone() }</h1>
            <p class="text-gray-400">{ props.subtitle.clone() }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: u64,
    pub icon: AttrValue,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-[#1A1A1A] p-6 rounded-xl border border-[#333333]">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-gray-400 text-sm font-medium">{ props.title.clone() }</h2>
                <div class="text-2xl">{ props.icon.clone() }</div>
            </div>
            <p class="text-4xl font-bold text-[#21A9A9]">{ format_number(props.value) }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            on_change.emit(input_value);
        })
    };

    html! {
        <div class="flex flex-col">
            <label class="text-gray-300 text-sm mb-2 font-medium">
                { props.label.clone() }
                { if props.required { html! { <span class="text-red-400">{" *"}</span> } } else { html! {} } }
            </label>
            <input
                type={props.input_type.clone()}
                class="p-3 rounded-lg bg-[#262626] border border-[#333333] text-white focus:outline-none focus:border-[#21A9A9]"
                placeholder={props.placeholder.clone()}
                value={props.value.clone()}
                oninput={on_input}
                disabled={props.disabled}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultCardProps {
    pub result: SearchResult,
    pub action_label: AttrValue,
    pub on_select: Callback<SearchResult>,
}

#[function_component(ResultCard)]
pub fn result_card(props: &ResultCardProps) -> Html {
    let result = &props.result;
    let on_click = {
        let on_select = props.on_select.clone();
        let result = result.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(result.clone()))
    };

    html! {
        <div class="bg-[#1A1A1A] rounded-xl overflow-hidden border border-[#333333]">
            <div class="relative aspect-[2/3] bg-zinc-900">
                {
                    match result.poster_url() {
                        Some(src) => html! { <img src={src} alt={result.display_title().to_string()} class="w-full h-full object-cover" /> },
                        None => html! { <div class="w-full h-full flex items-center justify-center text-4xl">{"🎬"}</div> },
                    }
                }
                <span class="absolute top-2 left-2 px-2 py-1 rounded bg-black/70 text-xs text-white">
                    { result.kind().label() }
                </span>
                {
                    if result.rating() > 0.0 {
                        html! {
                            <span class="absolute top-2 right-2 px-2 py-1 rounded bg-black/70 text-xs text-yellow-400">
                                { format!("⭐ {}", format_rating(result.rating())) }
                            </span>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
            <div class="p-3">
                <h3 class="text-white font-semibold truncate">{ result.display_title() }</h3>
                <p class="text-gray-400 text-sm mb-3">{ result.year() }</p>
                <button
                    onclick={on_click}
                    class="w-full bg-[#21A9A9] hover:bg-teal-600 text-black font-semibold py-2 rounded-lg"
                >
                    { props.action_label.clone() }
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LinkModalProps {
    pub heading: AttrValue,
    pub confirm_label: AttrValue,
    pub hint: AttrValue,
    pub result: SearchResult,
    pub download_url: String,
    pub saving: bool,
    pub on_input: Callback<String>,
    pub on_cancel: Callback<()>,
    pub on_confirm: Callback<()>,
}

#[function_component(LinkModal)]
pub fn link_modal(props: &LinkModalProps) -> Html {
    let result = &props.result;
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };
    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            on_input.emit(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    html! {
        <div class="fixed inset-0 bg-black/80 z-50 flex items-center justify-center p-4">
            <div class="bg-[#1A1A1A] rounded-xl w-full max-w-lg border border-[#333333]">
                <div class="p-6 border-b border-[#333333] flex justify-between items-start">
                    <div>
                        <h2 class="text-xl font-bold text-white">{ props.heading.clone() }</h2>
                        <p class="text-gray-400 text-sm">{ result.display_title() }</p>
                    </div>
                    <button onclick={on_cancel.clone()} class="text-gray-400 hover:text-white">{"✕"}</button>
                </div>

                <div class="p-6 space-y-4">
                    <div class="flex gap-4">
                        {
                            match result.poster_url() {
                                Some(src) => html! { <img src={src} alt={result.display_title().to_string()} class="w-24 rounded-lg" /> },
                                None => html! { <div class="w-24 h-36 bg-zinc-900 rounded-lg flex items-center justify-center text-3xl">{"🎬"}</div> },
                            }
                        }
                        <div>
                            <h3 class="text-white font-semibold">{ result.display_title() }</h3>
                            <p class="text-gray-400 text-sm">{ result.year() }</p>
                            <p class="text-teal-400 text-sm">{ result.kind().label() }</p>
                        </div>
                    </div>

                    <div class="flex flex-col">
                        <label class="text-gray-300 text-sm mb-2 font-medium">{"Download URL"}</label>
                        <input
                            type="text"
                            class="p-3 rounded-lg bg-[#262626] border border-[#333333] text-white focus:outline-none focus:border-[#21A9A9]"
                            placeholder="https://example.com/download/..."
                            value={props.download_url.clone()}
                            oninput={on_input}
                            disabled={props.saving}
                        />
                        <p class="text-xs text-gray-500 mt-1">{ props.hint.clone() }</p>
                    </div>
                </div>

                <div class="p-6 border-t border-[#333333] flex gap-3">
                    <button
                        onclick={on_cancel}
                        class="flex-1 py-3 rounded-lg border border-[#333333] text-gray-300 hover:bg-zinc-900"
                    >
                        {"Cancel"}
                    </button>
                    <button
                        onclick={on_confirm}
                        disabled={props.saving || props.download_url.trim().is_empty()}
                        class="flex-1 py-3 rounded-lg bg-[#21A9A9] hover:bg-teal-600 text-black font-semibold disabled:opacity-50"
                    >
                        { if props.saving { AttrValue::Static("Saving...") } else { props.confirm_label.clone() } }
                    </button>
                </div>
            </div>
        </div>
    }
}
