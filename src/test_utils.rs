use crate::models::domain::{Question, Quiz, Segment};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard four-option arithmetic question worth `marks`.
    pub fn test_question(marks: i32) -> Question {
        Question::new(
            vec![Segment::text("What is 2+2?")],
            vec!["3".into(), "4".into(), "5".into(), "6".into()],
            1,
            "Basic addition.",
            marks,
        )
    }

    /// Creates a question mixing text and code segments.
    pub fn test_code_question() -> Question {
        Question::new(
            vec![
                Segment::text("What does this print?"),
                Segment::code("print(2 ** 3)", "python"),
            ],
            vec!["5".into(), "6".into(), "8".into(), "9".into()],
            2,
            "2 ** 3 is 8.",
            1,
        )
    }

    /// Creates an endless quiz owned by `creator` with the given questions.
    pub fn test_quiz(creator: &str, questions: Vec<Question>) -> Quiz {
        Quiz::new(
            Quiz::generate_id(),
            creator,
            "Sample Quiz",
            "General Knowledge",
            true,
            None,
            questions,
        )
    }
}
