use interactive_page::{AnimationSession, BoxAnimation, ModalAnimation, Page, PageConfig};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseResult};

const CONTROLLER_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/controller_property_fuzz_test.txt";
const DEFAULT_CONTROLLER_PROPTEST_CASES: u32 = 128;

const CONTROLLER_PAGE_HTML: &str = r#"
<body>
  <div id="animated-box" class="box"></div>
  <button id="animate" data-action="animate" data-animation="bounce">a</button>
  <div id="animated-modal" class="modal">
    <div class="modal-content">
      <h2 id="modal-title"></h2>
      <p id="modal-text"></p>
      <button id="close" data-action="close-modal">x</button>
    </div>
  </div>
  <div id="loading-spinner"></div>
  <p id="loading-text"></p>
  <button id="start" data-action="start-loading">start</button>
  <button id="stop" data-action="stop-loading">stop</button>
  <button id="complete" data-action="complete-loading">complete</button>
</body>
"#;

const ANIMATION_NAMES: [&str; 7] = [
    "bounce", "shake", "flip", "glow", "wiggle", "", "Bounce",
];
const MODAL_NAMES: [&str; 5] = ["slideIn", "fadeIn", "zoomIn", "spin", "fadein"];

#[derive(Clone, Debug)]
enum PageAction {
    TriggerBox(&'static str),
    PressKey(&'static str),
    ClickAnimate,
    OpenModal(&'static str),
    ClickClose,
    ClickBackdrop,
    ClickModalTitle,
    StartLoading,
    StopLoading,
    CompleteLoading,
    Advance(i64),
    RunNextTimer,
}

fn env_proptest_cases(var_name: &str, default_cases: u32) -> u32 {
    std::env::var(var_name)
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default_cases)
}

fn controller_proptest_cases() -> u32 {
    std::env::var("INTERACTIVE_PAGE_CONTROLLER_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or_else(|| {
            env_proptest_cases(
                "INTERACTIVE_PAGE_PROPTEST_CASES",
                DEFAULT_CONTROLLER_PROPTEST_CASES,
            )
        })
}

fn page_action_strategy() -> BoxedStrategy<PageAction> {
    prop_oneof![
        3 => prop::sample::select(&ANIMATION_NAMES[..]).prop_map(PageAction::TriggerBox),
        1 => prop::sample::select(&["1", "2", "3", "4", "Escape", "Enter"][..])
            .prop_map(PageAction::PressKey),
        1 => Just(PageAction::ClickAnimate),
        3 => prop::sample::select(&MODAL_NAMES[..]).prop_map(PageAction::OpenModal),
        2 => Just(PageAction::ClickClose),
        1 => Just(PageAction::ClickBackdrop),
        1 => Just(PageAction::ClickModalTitle),
        2 => Just(PageAction::StartLoading),
        2 => Just(PageAction::StopLoading),
        1 => Just(PageAction::CompleteLoading),
        4 => (0i64..=6_000).prop_map(PageAction::Advance),
        1 => Just(PageAction::RunNextTimer),
    ]
    .boxed()
}

fn page_action_sequence_strategy() -> BoxedStrategy<Vec<PageAction>> {
    vec(page_action_strategy(), 1..=40).boxed()
}

fn run_action(page: &mut Page, action: &PageAction) -> interactive_page::Result<()> {
    match action {
        PageAction::TriggerBox(name) => {
            page.trigger_box_animation(name);
            Ok(())
        }
        PageAction::PressKey(key) => page.press_key(key),
        PageAction::ClickAnimate => page.click("#animate"),
        PageAction::OpenModal(name) => {
            page.open_modal(name);
            Ok(())
        }
        PageAction::ClickClose => page.click("#close"),
        PageAction::ClickBackdrop => page.click("#animated-modal"),
        PageAction::ClickModalTitle => page.click("#modal-title"),
        PageAction::StartLoading => page.click("#start"),
        PageAction::StopLoading => page.click("#stop"),
        PageAction::CompleteLoading => page.click("#complete"),
        PageAction::Advance(delta_ms) => page.advance_time(*delta_ms),
        PageAction::RunNextTimer => page.run_next_timer().map(|_| ()),
    }
}

fn count_classes(page: &Page, selector: &str, known: &[&str]) -> usize {
    page.class_list(selector)
        .map(|classes| {
            classes
                .iter()
                .filter(|class_name| known.contains(&class_name.as_str()))
                .count()
        })
        .unwrap_or(0)
}

fn assert_session_invariants(page: &Page, step: usize, action: &PageAction) -> TestCaseResult {
    let pending = page.pending_timers();
    for session in page.sessions() {
        let owned = pending
            .iter()
            .filter(|timer| timer.session == Some(session.id()))
            .collect::<Vec<_>>();
        prop_assert!(
            owned.len() <= 1,
            "session {} owns {} timers after step {step}: {action:?}",
            session.id(),
            owned.len()
        );
        prop_assert_eq!(
            owned.first().map(|timer| timer.id),
            session.pending_timer(),
            "session {} handle out of sync after step {}: {:?}",
            session.id(),
            step,
            action
        );
    }

    let box_classes = BoxAnimation::ALL.map(BoxAnimation::class_name);
    prop_assert!(
        count_classes(page, "#animated-box", &box_classes) <= 1,
        "more than one box animation class after step {step}: {action:?}"
    );

    let modal_open = page.modal_session().is_some_and(AnimationSession::is_open);
    prop_assert_eq!(
        page.has_class("#animated-modal", "show").unwrap_or(false),
        modal_open,
        "show class and open state disagree after step {}: {:?}",
        step,
        action
    );
    let modal_classes = ModalAnimation::ALL.map(ModalAnimation::class_name);
    prop_assert!(count_classes(page, "#animated-modal", &modal_classes) <= 1);
    Ok(())
}

fn assert_controller_sequence_is_consistent(actions: &[PageAction]) -> TestCaseResult {
    let mut page = Page::from_html_with_config(CONTROLLER_PAGE_HTML, PageConfig::default())
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;

    for (step, action) in actions.iter().enumerate() {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            run_action(&mut page, action)
        }));
        match outcome {
            Err(_) => {
                prop_assert!(
                    false,
                    "action panicked at step {step}: {action:?}, actions={actions:?}"
                );
            }
            Ok(Err(error)) => {
                prop_assert!(
                    false,
                    "action returned error at step {step}: {action:?}, error={error:?}, actions={actions:?}"
                );
            }
            Ok(Ok(())) => {}
        }
        assert_session_invariants(&page, step, action)?;
    }

    page.flush()
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
    prop_assert!(page.pending_timers().is_empty());
    let box_classes = BoxAnimation::ALL.map(BoxAnimation::class_name);
    prop_assert_eq!(count_classes(&page, "#animated-box", &box_classes), 0);
    if !page.modal_session().is_some_and(AnimationSession::is_open) {
        let modal_classes = ModalAnimation::ALL.map(ModalAnimation::class_name);
        prop_assert_eq!(count_classes(&page, "#animated-modal", &modal_classes), 0);
    }
    prop_assert!(!page.has_class("#loading-spinner", "active").unwrap_or(true));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: controller_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(CONTROLLER_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn controller_interaction_sequences_keep_session_invariants(
        actions in page_action_sequence_strategy()
    ) {
        assert_controller_sequence_is_consistent(&actions)?;
    }
}
