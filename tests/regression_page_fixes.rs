use interactive_page::{Error, LoadingPhase, Page, Result, TimerId};

const PAGE_HTML: &str = r#"
<body>
  <div id="animated-box"></div>
  <button id="bounce" data-action="animate" data-animation="bounce">b</button>
  <div id="animated-modal" class="modal">
    <div class="modal-content">
      <button id="close" data-action="close-modal">x</button>
    </div>
  </div>
  <button id="open" data-action="open-modal" data-animation="slideIn">open</button>
  <div id="loading-spinner"></div>
  <p id="loading-text"></p>
  <button id="start" data-action="start-loading">start</button>
  <div id="particle-container"><span id="inside">tap</span></div>
</body>
"#;

#[test]
fn advancing_to_i64_max_does_not_overflow() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.click("#bounce")?;
    page.advance_time(i64::MAX)?;
    assert_eq!(page.now_ms(), i64::MAX);
    assert!(!page.has_class("#animated-box", "bounce")?);

    // Scheduling at the end of the clock saturates instead of wrapping.
    page.click("#bounce")?;
    page.advance_time(0)?;
    assert!(!page.has_class("#animated-box", "bounce")?);
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn close_button_inside_modal_schedules_a_single_cleanup() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.click("#open")?;
    page.click("#close")?;
    page.press_key("Escape")?;
    page.click("#animated-modal")?;
    assert_eq!(page.pending_timers().len(), 1);
    page.advance_time(300)?;
    assert_eq!(page.class_list("#animated-modal")?, vec!["modal".to_string()]);
    Ok(())
}

#[test]
fn clearing_a_session_timer_externally_releases_the_session_handle() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.click("#start")?;
    let timer = page.pending_timers()[0].id;
    let session = page
        .loading_session()
        .map(|session| session.id())
        .ok_or_else(|| Error::Timer("loading session missing".into()))?;
    assert!(page.clear_timer(timer));
    assert_eq!(
        page.loading_session().and_then(|session| session.pending_timer()),
        None
    );
    assert_eq!(page.session_pending_timer_count(session), 0);
    assert!(page
        .take_trace_logs()
        .iter()
        .any(|line| line.contains(&format!("released cancelled timer={timer}"))));

    // Without its timeout the session stays in Loading until restarted.
    page.advance_time(60_000)?;
    assert_eq!(
        page.loading_session().and_then(|session| session.loading_phase()),
        Some(LoadingPhase::Loading)
    );

    page.click("#start")?;
    assert_eq!(page.session_pending_timer_count(session), 1);
    page.advance_time(5_000)?;
    assert_eq!(
        page.loading_session().and_then(|session| session.loading_phase()),
        Some(LoadingPhase::Completed)
    );
    Ok(())
}

#[test]
fn clearing_all_timers_releases_every_session_handle() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.click("#bounce")?;
    page.click("#start")?;
    assert_eq!(page.pending_timers().len(), 2);

    assert_eq!(page.clear_all_timers(), 2);
    assert!(page.pending_timers().is_empty());
    assert_eq!(
        page.box_session().and_then(|session| session.pending_timer()),
        None
    );
    assert_eq!(
        page.loading_session().and_then(|session| session.pending_timer()),
        None
    );

    // A fresh request schedules normally and runs to completion.
    page.click("#bounce")?;
    assert_eq!(page.pending_timers().len(), 1);
    page.advance_time(100)?;
    assert!(page.has_class("#animated-box", "bounce")?);
    page.advance_time(2_000)?;
    assert!(!page.has_class("#animated-box", "bounce")?);
    Ok(())
}

#[test]
fn clicks_inside_the_particle_container_burst_from_the_container() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.click_at("#inside", 20.0, 30.0)?;
    assert_eq!(page.count("#particle-container .particle")?, 15);
    assert_eq!(page.count("#inside .particle")?, 0);
    Ok(())
}

#[test]
fn fired_timers_can_no_longer_be_cleared() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    page.click("#bounce")?;
    let apply: TimerId = page.pending_timers()[0].id;
    page.advance_time(50)?;
    assert!(!page.clear_timer(apply));
    assert!(page.has_class("#animated-box", "bounce")?);

    page.advance_time(950)?;
    assert!(!page.has_class("#animated-box", "bounce")?);
    Ok(())
}

#[test]
fn missing_selectors_surface_as_errors() -> Result<()> {
    let mut page = Page::from_html(PAGE_HTML)?;
    match page.click("#does-not-exist") {
        Err(Error::SelectorNotFound(selector)) => assert_eq!(selector, "#does-not-exist"),
        other => panic!("expected SelectorNotFound, got: {other:?}"),
    }
    Ok(())
}
