use super::*;

#[test]
fn advance_time_rejects_negative_delta() -> Result<()> {
    let mut page = animation_page()?;
    match page.advance_time(-1) {
        Err(Error::Timer(msg)) => assert!(msg.contains("non-negative")),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn advance_time_to_rejects_going_backwards() -> Result<()> {
    let mut page = animation_page()?;
    page.advance_time(100)?;
    assert!(matches!(page.advance_time_to(99), Err(Error::Timer(_))));
    page.advance_time_to(100)?;
    assert_eq!(page.now_ms(), 100);
    Ok(())
}

#[test]
fn flush_runs_chained_steps_and_moves_the_clock() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#start-btn")?;
    page.flush()?;
    assert_eq!(page.now_ms(), 8_000);
    page.assert_text("#loading-text", "Ready to load again...")?;
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn run_next_timer_steps_one_task_at_a_time() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#bounce-btn")?;

    assert!(page.run_next_timer()?);
    assert_eq!(page.now_ms(), 50);
    page.assert_class("#animated-box", "bounce", true)?;

    assert!(page.run_next_timer()?);
    assert_eq!(page.now_ms(), 1_000);
    page.assert_class("#animated-box", "bounce", false)?;

    assert!(!page.run_next_timer()?);
    Ok(())
}

#[test]
fn run_due_timers_does_not_move_the_clock() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#bounce-btn")?;
    assert_eq!(page.run_due_timers()?, 0);
    assert_eq!(page.now_ms(), 0);
    assert_eq!(page.pending_timers().len(), 1);
    Ok(())
}

#[test]
fn pending_timers_are_ordered_by_due_time_and_owner() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#start-btn")?;
    page.click("#bounce-btn")?;
    page.click("#open-fade")?;
    page.click("#modal-close")?;

    let pending = page.pending_timers();
    let due = pending.iter().map(|timer| timer.due_at).collect::<Vec<_>>();
    assert_eq!(due, vec![50, 300, 5_000]);
    let box_id = page.box_session().map(AnimationSession::id);
    let modal_id = page.modal_session().map(AnimationSession::id);
    let loading_id = page.loading_session().map(AnimationSession::id);
    assert_eq!(pending[0].session, box_id);
    assert_eq!(pending[1].session, modal_id);
    assert_eq!(pending[2].session, loading_id);
    Ok(())
}

#[test]
fn clear_timer_is_idempotent() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#start-btn")?;
    let id = page.pending_timers()[0].id;
    assert!(page.clear_timer(id));
    assert!(!page.clear_timer(id));
    page.advance_time(10_000)?;
    page.assert_text("#loading-text", "Loading... Please wait")?;
    Ok(())
}

#[test]
fn clear_all_timers_reports_how_many_were_dropped() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#start-btn")?;
    page.click("#bounce-btn")?;
    assert_eq!(page.clear_all_timers(), 2);
    assert!(page.pending_timers().is_empty());
    Ok(())
}

#[test]
fn timer_step_limit_stops_runaway_flushes() -> Result<()> {
    let mut page = animation_page()?;
    assert!(matches!(page.set_timer_step_limit(0), Err(Error::Timer(_))));

    page.set_timer_step_limit(1)?;
    page.click("#bounce-btn")?;
    match page.flush() {
        Err(Error::Timer(msg)) => {
            assert!(msg.contains("limit=1"), "{msg}");
            assert!(msg.contains("clear-box-animation"), "{msg}");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn zero_step_limit_in_config_is_rejected() {
    let config = PageConfig {
        timer_step_limit: 0,
        ..PageConfig::default()
    };
    assert!(matches!(
        Page::from_html_with_config(ANIMATION_PAGE_HTML, config),
        Err(Error::Timer(_))
    ));
}

#[test]
fn trace_log_records_events_timers_and_sessions() -> Result<()> {
    let mut page = animation_page()?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.click("#bounce-btn")?;
    page.advance_time(1_000)?;
    page.click("#bounce-btn")?;
    page.click("#shake-btn")?;
    page.flush()?;

    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line.starts_with("[event] click target=button#bounce-btn")));
    assert!(logs.iter().any(|line| line.starts_with("[timer] schedule id=1 due_at=50")));
    assert!(logs.iter().any(|line| line.starts_with("[timer] run id=1")));
    assert!(logs.iter().any(|line| line.starts_with("[timer] clear id=")));
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn trace_categories_can_be_switched_off() -> Result<()> {
    let mut page = animation_page()?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_trace_timers(false);
    page.set_trace_events(false);
    page.set_trace_sessions(false);
    page.click("#wiggle-btn")?;
    page.click("#bounce-btn")?;
    page.flush()?;
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn trace_log_limit_keeps_the_newest_lines() -> Result<()> {
    let mut page = animation_page()?;
    assert!(matches!(page.set_trace_log_limit(0), Err(Error::InvalidInput(_))));
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_trace_log_limit(2)?;
    page.click("#bounce-btn")?;
    page.flush()?;

    let logs = page.take_trace_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[1].starts_with("[timer] flush"), "{logs:?}");
    Ok(())
}

#[test]
fn trace_is_off_by_default() -> Result<()> {
    let mut page = animation_page()?;
    page.click("#bounce-btn")?;
    page.flush()?;
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}
