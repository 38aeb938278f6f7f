use dioxus::prelude::*;

use quiz_core::model::{QuizReport, ShapeReport};

#[component]
pub fn ResultsPanel(report: QuizReport, on_restart: EventHandler<()>) -> Element {
    let overall = format!(
        "Overall: {}/{} correct ({:.1}%)",
        report.total_correct(),
        report.total_questions(),
        report.overall_accuracy() * 100.0
    );
    let lines: Vec<String> = report.shapes().iter().map(shape_result_line).collect();

    rsx! {
        div { class: "results",
            h3 { "Results Summary" }
            p { class: "results-overall", "{overall}" }
            ul { class: "results-shapes",
                for line in lines {
                    li { "{line}" }
                }
            }
            button {
                class: "btn btn-primary",
                id: "results-restart",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Start New Quiz"
            }
        }
    }
}

fn shape_result_line(shape: &ShapeReport) -> String {
    match shape.accuracy {
        Some(accuracy) => format!(
            "Shape {}: {}/{} correct ({:.1}%)",
            shape.shape,
            shape.correct,
            shape.shown,
            accuracy * 100.0
        ),
        None => format!("Shape {}: Not shown in this quiz", shape.shape),
    }
}
