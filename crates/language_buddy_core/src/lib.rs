pub mod domain;
pub mod library;
pub mod ports;
pub mod quiz;

pub use domain::{
    AddVocabSetResult, Language, NewQuizResult, NewVocabSet, QuestionKind, QuizAnswer,
    QuizQuestion, QuizResult, VocabItem, VocabRequest, VocabResponse, VocabSet,
    DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES,
};
pub use library::VocabLibrary;
pub use ports::{
    PortError, PortResult, QuizResultStore, SettingsStore, VocabularyGenerationService,
    VocabularyStore,
};
