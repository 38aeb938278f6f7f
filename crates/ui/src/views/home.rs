use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let settings = ctx.quiz_loop().settings();
    let total_questions = settings.total_questions();
    let shape_count = settings.shape_count();

    rsx! {
        div { class: "page",
            h2 { "Pentatonic Shapes Quiz" }
            p { "Name the shape on screen by its number." }
            p { class: "home-config",
                "{total_questions} questions over shapes 1-{shape_count}."
            }
            Link { class: "btn btn-primary", to: Route::Quiz {}, "Start Quiz" }
        }
    }
}
