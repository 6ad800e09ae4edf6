use yew::prelude::*;

#[function_component]
pub fn Footer() -> Html {
    html! {
        <footer class="border-t border-neutral-200 dark:border-neutral-700 mt-auto">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-4 text-center">
                <p class="text-sm text-neutral-500 dark:text-neutral-400">
                    {"Propiedades, subastas y vehículos"}
                </p>
            </div>
        </footer>
    }
}
