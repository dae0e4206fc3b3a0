use super::*;

fn entrance_classes(page: &Page) -> Result<Vec<String>> {
    Ok(page
        .class_list("#animated-modal")?
        .into_iter()
        .filter(|class_name| ModalAnimation::parse(class_name).is_some())
        .collect())
}

#[test]
fn open_modal_shows_entrance_class_copy_and_locks_scroll() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#open-fade")?;

    page.assert_class("#animated-modal", "show", true)?;
    page.assert_class("#animated-modal", "fadeIn", true)?;
    page.assert_text("#modal-title", "fadeIn Animation Modal")?;
    page.assert_text(
        "#modal-text",
        "This modal appeared using the \"fadeIn\" animation effect! The animation is triggered by JavaScript adding CSS classes.",
    )?;
    page.assert_style("body", "overflow", "hidden")?;
    assert!(page.modal_session().is_some_and(AnimationSession::is_open));
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn close_then_400ms_leaves_modal_closed_without_entrance_classes() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#open-fade")?;
    page.click("#modal-close")?;

    page.assert_class("#animated-modal", "show", false)?;
    // The entrance class stays for the exit transition.
    page.assert_class("#animated-modal", "fadeIn", true)?;
    page.assert_style("body", "overflow", "auto")?;
    assert_eq!(page.pending_timers().len(), 1);

    page.advance_time(400)?;
    assert!(entrance_classes(&page)?.is_empty());
    assert!(!page.modal_session().is_some_and(AnimationSession::is_open));
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn exit_cleanup_runs_exactly_at_300ms() -> Result<()> {
    let mut page = animation_page()?;
    page.open_modal("zoomIn");
    page.close_modal();
    page.advance_time(299)?;
    page.assert_class("#animated-modal", "zoomIn", true)?;
    page.advance_time(1)?;
    page.assert_class("#animated-modal", "zoomIn", false)?;
    Ok(())
}

#[test]
fn closing_twice_equals_closing_once() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#open-fade")?;
    page.close_modal();
    let after_first = page.pending_timers();
    let classes_after_first = page.class_list("#animated-modal")?;

    page.close_modal();
    page.press_key("Escape")?;
    assert_eq!(page.pending_timers(), after_first);
    assert_eq!(page.class_list("#animated-modal")?, classes_after_first);
    Ok(())
}

#[test]
fn reopening_replaces_the_entrance_class() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#open-fade")?;
    page.click("#open-zoom")?;
    assert_eq!(entrance_classes(&page)?, vec!["zoomIn".to_string()]);
    page.assert_text("#modal-title", "zoomIn Animation Modal")?;
    Ok(())
}

#[test]
fn reopen_during_exit_cancels_the_cleanup() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#open-fade")?;
    page.click("#modal-close")?;
    page.advance_time(100)?;
    page.click("#open-zoom")?;
    assert!(page.pending_timers().is_empty());

    page.advance_time(1_000)?;
    page.assert_class("#animated-modal", "zoomIn", true)?;
    page.assert_class("#animated-modal", "show", true)?;
    Ok(())
}

#[test]
fn rapid_open_close_never_leaves_more_than_one_timer() -> Result<()> {
    let mut page = animation_page()?;
    let steps = [
        "#open-fade",
        "#modal-close",
        "#open-zoom",
        "#modal-close",
        "#modal-close",
        "#open-fade",
        "#open-spin",
        "#modal-close",
    ];
    for selector in steps {
        page.click(selector)?;
        let session = page.modal_session().expect("modal session exists");
        assert!(page.session_pending_timer_count(session.id()) <= 1);
    }
    page.flush()?;
    assert!(entrance_classes(&page)?.is_empty());
    Ok(())
}

#[test]
fn backdrop_click_closes_but_content_click_does_not() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#open-fade")?;

    page.click("#modal-title")?;
    page.assert_class("#animated-modal", "show", true)?;

    page.click("#animated-modal")?;
    page.assert_class("#animated-modal", "show", false)?;
    assert_eq!(page.pending_timers().len(), 1);
    Ok(())
}

#[test]
fn escape_closes_an_open_modal() -> Result<()> {
    let mut page = animation_page()?;
    page.press_key("Escape")?;
    assert!(page.pending_timers().is_empty());

    page.click("#open-fade")?;
    page.press_key("Escape")?;
    page.assert_class("#animated-modal", "show", false)?;
    page.assert_style("body", "overflow", "auto")?;
    Ok(())
}

#[test]
fn unknown_entrance_animation_opens_with_show_only() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#open-spin")?;
    page.assert_class("#animated-modal", "show", true)?;
    assert!(entrance_classes(&page)?.is_empty());
    assert_eq!(
        page.modal_session().and_then(AnimationSession::active_class),
        None
    );
    page.assert_text("#modal-title", "spin Animation Modal")?;
    Ok(())
}

#[test]
fn open_modal_button_without_animation_uses_fade_in() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#open-default")?;
    assert_eq!(entrance_classes(&page)?, vec!["fadeIn".to_string()]);
    Ok(())
}

#[test]
fn modal_without_title_elements_still_opens() -> Result<()> {
    let mut page = Page::from_html(
        "<body><div id='animated-modal' class='modal'></div><button id='open' data-action='open-modal' data-animation='slideIn'>o</button></body>",
    )?;
    page.click("#open")?;
    page.assert_class("#animated-modal", "slideIn", true)?;
    page.assert_class("#animated-modal", "show", true)?;
    Ok(())
}
