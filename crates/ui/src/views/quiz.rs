use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ResultsPanel, ViewError};
use crate::vm::{QuizIntent, QuizVm, QuizVmPhase};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let mut vm = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || QuizVm::start(&quiz_loop)
    });
    let mut guess_text = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let outcome = match intent {
            QuizIntent::Submit(raw) => vm.write().submit(&quiz_loop, &raw),
            QuizIntent::Next => vm.write().next(&quiz_loop),
            QuizIntent::RetryImage => vm.write().retry_image(&quiz_loop),
            QuizIntent::Restart => {
                vm.set(QuizVm::start(&quiz_loop));
                Ok(())
            }
        };
        match outcome {
            Ok(()) => {
                error.set(None);
                guess_text.set(String::new());
            }
            Err(err) => error.set(Some(err)),
        }
    });

    let phase = vm.read().phase();
    let progress = vm.read().progress();
    let question = vm.read().question().cloned();
    let feedback = vm.read().feedback().copied();
    let report = vm.read().report();
    let asset_error = vm.read().asset_error();
    let shape_count = vm.read().shape_count();

    let progress_label = if progress.is_complete && phase == QuizVmPhase::Complete {
        "Quiz Complete!".to_string()
    } else {
        format!("Question {} of {}", progress.question, progress.total)
    };
    // On the last question the next step is the report, not another image.
    let next_label = if progress.is_complete {
        "Show Results"
    } else {
        "Next Question"
    };

    // Enter submits while a guess is pending and advances once the verdict
    // is on screen, mirroring the phase the session reports.
    let on_key = move |evt: Event<KeyboardData>| {
        if evt.data.key() != Key::Enter {
            return;
        }
        evt.prevent_default();
        match vm.read().phase() {
            QuizVmPhase::Prompt => {
                let raw = guess_text.read().clone();
                dispatch_intent.call(QuizIntent::Submit(raw));
            }
            QuizVmPhase::Feedback => dispatch_intent.call(QuizIntent::Next),
            QuizVmPhase::Complete => {}
        }
    };

    rsx! {
        div { class: "page quiz-page", tabindex: "0", onkeydown: on_key,
            p { class: "quiz-progress", "{progress_label}" }

            if phase == QuizVmPhase::Complete {
                if let Some(report) = report {
                    ResultsPanel {
                        report,
                        on_restart: move |()| dispatch_intent.call(QuizIntent::Restart),
                    }
                }
            } else {
                div { class: "quiz-image-frame",
                    if let Some(question) = question.as_ref() {
                        img {
                            class: if question.image.flipped() { "quiz-image flipped" } else { "quiz-image" },
                            src: "{question.image.uri().display_string()}",
                            alt: "Shape to identify",
                        }
                    } else if asset_error {
                        div { class: "quiz-image-missing",
                            p { "{ViewError::AssetUnavailable.message()}" }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| dispatch_intent.call(QuizIntent::RetryImage),
                                "Retry"
                            }
                        }
                    }
                }

                p { class: "quiz-question",
                    "Which pentatonic shape is this? (Enter 1-{shape_count})"
                }

                div { class: "quiz-answer-row",
                    input {
                        class: "quiz-answer-input",
                        id: "quiz-answer",
                        r#type: "text",
                        value: "{guess_text}",
                        disabled: phase != QuizVmPhase::Prompt,
                        autofocus: true,
                        oninput: move |evt| guess_text.set(evt.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        id: "quiz-submit",
                        r#type: "button",
                        disabled: phase != QuizVmPhase::Prompt,
                        onclick: move |_| {
                            let raw = guess_text.read().clone();
                            dispatch_intent.call(QuizIntent::Submit(raw));
                        },
                        "Submit"
                    }
                }

                if let Some(feedback) = feedback {
                    p {
                        class: if feedback.is_correct() { "quiz-feedback quiz-feedback--correct" } else { "quiz-feedback quiz-feedback--wrong" },
                        "{feedback.message()}"
                    }
                }

                if let Some(err) = *error.read() {
                    p { class: "quiz-error", "{err.message()}" }
                }

                if phase == QuizVmPhase::Feedback {
                    button {
                        class: "btn btn-next",
                        id: "quiz-next",
                        r#type: "button",
                        onclick: move |_| dispatch_intent.call(QuizIntent::Next),
                        "{next_label}"
                    }
                }
            }
        }
    }
}
