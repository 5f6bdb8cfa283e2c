use api_lib::web::protocol::{ClientMessage, ServerMessage};
use api_lib::web::ws_handler::{handle_client_message, NOTHING_TO_QUIZ_MESSAGE};
use language_buddy_core::domain::{NewVocabSet, VocabItem};
use language_buddy_core::quiz::QuizSession;

mod common;

fn start(set_id: Option<&str>, question_count: Option<usize>) -> ClientMessage {
    ClientMessage::StartQuiz {
        set_id: set_id.map(str::to_string),
        question_count,
    }
}

fn answer(text: &str) -> ClientMessage {
    ClientMessage::SubmitAnswer {
        answer: text.to_string(),
    }
}

#[tokio::test]
async fn test_empty_library_has_nothing_to_quiz() {
    let state = common::test_state().await;
    let mut session: Option<QuizSession> = None;

    let replies = handle_client_message(&state, &mut session, start(None, None)).await;
    assert_eq!(replies.len(), 1);
    assert!(matches!(
        &replies[0],
        ServerMessage::NothingToQuiz { message } if message == NOTHING_TO_QUIZ_MESSAGE
    ));
    assert!(session.is_none());
}

#[tokio::test]
async fn test_answers_without_a_quiz_are_rejected() {
    let state = common::test_state().await;
    let mut session: Option<QuizSession> = None;

    let replies = handle_client_message(&state, &mut session, answer("pain")).await;
    assert!(matches!(&replies[..], [ServerMessage::Error { .. }]));

    let replies = handle_client_message(&state, &mut session, start(Some("nope"), None)).await;
    assert!(matches!(&replies[..], [ServerMessage::Error { .. }]));
}

#[tokio::test]
async fn test_full_quiz_is_recorded() {
    let state = common::test_state().await;
    state
        .library
        .add_vocab_set(NewVocabSet {
            topic: "Food".to_string(),
            language: "french".to_string(),
            vocab_list: vec![
                VocabItem::new("pain", "bread"),
                VocabItem::new("lait", "milk"),
                VocabItem::new("eau", "water"),
            ],
        })
        .await
        .unwrap();
    let set_id = state.library.sets().await.unwrap()[0].id;
    let mut session: Option<QuizSession> = None;

    let replies = handle_client_message(
        &state,
        &mut session,
        start(Some(&set_id.to_string()), Some(5)),
    )
    .await;
    assert!(matches!(
        &replies[..],
        [
            ServerMessage::QuizStarted { total: 3, title: Some(title) },
            ServerMessage::Question { index: 0, total: 3, .. },
        ] if title == "Food"
    ));

    // Right, wrong, right.
    let mut completed = None;
    for round in 0..3 {
        let correct = session
            .as_ref()
            .and_then(|s| s.current_question())
            .map(|q| q.correct_answer.clone())
            .unwrap();
        let submitted = if round == 1 { "definitely wrong".to_string() } else { correct.clone() };

        let replies = handle_client_message(&state, &mut session, answer(&submitted)).await;
        match &replies[0] {
            ServerMessage::AnswerChecked {
                is_correct,
                correct_answer,
                ..
            } => {
                assert_eq!(*is_correct, round != 1);
                assert_eq!(correct_answer, &correct);
            }
            other => panic!("unexpected reply {:?}", other),
        }

        if round < 2 {
            assert!(matches!(
                &replies[1],
                ServerMessage::Question { index, .. } if *index == round + 1
            ));
        } else {
            completed = replies.into_iter().nth(1);
        }
    }

    match completed {
        Some(ServerMessage::QuizCompleted { result, feedback }) => {
            assert_eq!(result.score, 2);
            assert_eq!(result.total, 3);
            assert_eq!(result.vocab_set_id, Some(set_id));
            assert_eq!(result.vocab_set_title.as_deref(), Some("Food"));
            assert_eq!(result.answers.len(), 3);
            assert!(!feedback.is_empty());
        }
        other => panic!("expected a completed quiz, got {:?}", other),
    }
    assert!(session.is_none());

    let history = state.results.get_all().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].score, 2);
}

#[tokio::test]
async fn test_abandoned_quiz_is_not_recorded() {
    let state = common::test_state().await;
    state
        .library
        .add_vocab_set(NewVocabSet {
            topic: "Colors".to_string(),
            language: "french".to_string(),
            vocab_list: vec![VocabItem::new("rouge", "red"), VocabItem::new("bleu", "blue")],
        })
        .await
        .unwrap();
    let mut session: Option<QuizSession> = None;

    let replies = handle_client_message(&state, &mut session, start(Some("all"), None)).await;
    assert!(matches!(
        &replies[0],
        ServerMessage::QuizStarted { total: 2, title: Some(title) } if title == "All Sets"
    ));
    assert!(session.is_some());

    let replies = handle_client_message(&state, &mut session, ClientMessage::AbandonQuiz).await;
    assert!(replies.is_empty());
    assert!(session.is_none());
    assert!(state.results.get_all().await.unwrap().is_empty());
}
