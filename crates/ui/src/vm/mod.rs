mod quiz_vm;

pub use quiz_vm::{AnswerFeedback, QuizIntent, QuizVm, QuizVmPhase};
