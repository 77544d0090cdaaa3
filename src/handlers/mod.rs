pub mod generation_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod upload_handler;

pub use generation_handler::generate_quiz;
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{create_quiz, delete_quiz, get_quiz, list_quizzes};
pub use upload_handler::{begin_upload_session, get_session_files};
