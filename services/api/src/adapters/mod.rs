pub mod db;
pub mod vocab_llm;

pub use db::DbAdapter;
pub use vocab_llm::OpenAiVocabAdapter;
