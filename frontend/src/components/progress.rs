use leptos::*;
use crate::UploadUiState;

/// Upload progress bar, rendered right after the file input.
#[component]
pub fn ProgressBar(state: RwSignal<UploadUiState>) -> impl IntoView {
    let percent = move || state.with(|s| s.progress_percent);

    view! {
        <div
            class="progress mt-2"
            class:d-none=move || !state.with(|s| s.progress_visible)
        >
            <div
                class="progress-bar progress-bar-striped progress-bar-animated"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=move || percent().to_string()
                style:width=move || format!("{}%", percent())
            >
                {move || format!("{}%", percent())}
            </div>
        </div>
    }
}
