use spotlight::classifier::ClassifyError;
use spotlight::intent::{ClassificationOutcome, IntentKind, ParsedCommand};
use spotlight::kernel::event::{ClassifyTicket, Event, InputEvent, RequestSeq};
use spotlight::kernel::scheduler::SideEffect;
use spotlight::memory::CommandCache;
use spotlight::outputs::{Notice, PipelineError};
use spotlight::Reactor;

fn classify_ticket(effects: &[SideEffect]) -> Option<ClassifyTicket> {
    effects.iter().find_map(|e| match e {
        SideEffect::Classify(ticket) => Some(ticket.clone()),
        _ => None,
    })
}

fn dispatched(effects: &[SideEffect]) -> Option<ParsedCommand> {
    effects.iter().find_map(|e| match e {
        SideEffect::Dispatch { command, .. } => Some(command.clone()),
        _ => None,
    })
}

fn open_spotify() -> ClassificationOutcome {
    ClassificationOutcome::Actions(vec![ParsedCommand::open_app("spotify").unwrap()])
}

#[test]
fn test_history_dedup_and_promote() {
    let mut reactor = Reactor::new();
    reactor.handle_input("Open Spotify");
    reactor.handle_input("What's the capital of France?");
    reactor.handle_input("Open Spotify");

    let history = reactor.state.snapshot().history;
    assert_eq!(history[0], "Open Spotify");
    assert_eq!(history.iter().filter(|h| *h == "Open Spotify").count(), 1);
    assert_eq!(history.len(), 2);
}

#[test]
fn test_history_and_cache_use_different_projections() {
    let mut reactor = Reactor::new();
    let ticket = classify_ticket(&reactor.handle_input("Open Spotify")).unwrap();
    reactor.on_classified(ticket, Ok(open_spotify()));

    let effects = reactor.handle_input("OPEN SPOTIFY");

    // One cache entry, two display forms.
    assert!(classify_ticket(&effects).is_none());
    assert_eq!(reactor.state.cache().len(), 1);
    assert_eq!(
        reactor.state.snapshot().history,
        vec!["OPEN SPOTIFY".to_string(), "Open Spotify".to_string()]
    );
}

#[test]
fn test_cache_memoization_skips_classifier() {
    let mut reactor = Reactor::new();

    let first = reactor.handle_input("Open Spotify");
    let ticket = classify_ticket(&first).expect("first submission must classify");
    let effects = reactor.on_classified(ticket, Ok(open_spotify()));
    let command = dispatched(&effects).expect("classified command must dispatch");

    let second = reactor.handle_input("  open spotify");
    assert!(classify_ticket(&second).is_none(), "Second submission must not classify again");
    assert_eq!(dispatched(&second), Some(command));

    let stats = reactor.telemetry.snapshot().cache_stats;
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[test]
fn test_classifier_failure_isolation() {
    let mut reactor = Reactor::new();
    let ticket = classify_ticket(&reactor.handle_input("Open Spotify")).unwrap();
    let seq = ticket.seq;

    let effects = reactor.on_classified(
        ticket,
        Err(ClassifyError::Transport("connection refused".into())),
    );

    assert_eq!(
        effects,
        vec![SideEffect::Notify(Notice::Failed {
            seq,
            error: PipelineError::Classify(ClassifyError::Transport("connection refused".into())),
        })]
    );
    let snapshot = reactor.state.snapshot();
    assert_eq!(snapshot.history, vec!["Open Spotify".to_string()]);
    assert_eq!(snapshot.info, None);
    assert!(reactor.state.cache().lookup("open spotify").is_none());

    // Resubmitting retries the classifier.
    assert!(classify_ticket(&reactor.handle_input("Open Spotify")).is_some());
}

#[test]
fn test_answers_are_shown_but_not_cached() {
    let mut reactor = Reactor::new();
    let ticket = classify_ticket(&reactor.handle_input("What's the capital of France?")).unwrap();

    let effects = reactor.on_classified(
        ticket.clone(),
        Ok(ClassificationOutcome::Answer("Paris".into())),
    );

    assert_eq!(
        effects,
        vec![SideEffect::Notify(Notice::Info { seq: ticket.seq, text: "Paris".into() })]
    );
    assert_eq!(reactor.state.info(), Some("Paris"));
    assert_eq!(reactor.state.cache().len(), 0);
    assert!(classify_ticket(&reactor.handle_input("What's the capital of France?")).is_some());
    assert_eq!(reactor.state.info(), None, "New submission clears the display");
}

#[test]
fn test_stale_response_discard() {
    let mut reactor = Reactor::new();
    let a = classify_ticket(&reactor.handle_input("Capital of France?")).unwrap();
    let b = classify_ticket(&reactor.handle_input("Capital of Spain?")).unwrap();
    assert!(b.seq > a.seq);

    reactor.on_classified(b.clone(), Ok(ClassificationOutcome::Answer("Madrid".into())));
    let late = reactor.on_classified(a.clone(), Ok(ClassificationOutcome::Answer("Paris".into())));

    assert!(late.is_empty(), "Stale response must produce no effects");
    assert_eq!(reactor.state.info(), Some("Madrid"));
    assert!(reactor.state.cache().lookup(&a.normalized).is_none());
    assert_eq!(reactor.telemetry.snapshot().classification_stats.stale_discarded, 1);
}

#[test]
fn test_stale_response_behind_cache_hit_is_discarded() {
    let mut reactor = Reactor::new();
    let warm = classify_ticket(&reactor.handle_input("Open Spotify")).unwrap();
    reactor.on_classified(warm, Ok(open_spotify()));

    let pending = classify_ticket(&reactor.handle_input("Open Safari")).unwrap();
    let hit = reactor.handle_input("Open Spotify");
    assert!(dispatched(&hit).is_some());

    let late = reactor.on_classified(
        pending,
        Ok(ClassificationOutcome::Actions(vec![ParsedCommand::open_app("safari").unwrap()])),
    );
    assert!(late.is_empty());
    assert!(reactor.state.cache().lookup("open safari").is_none());
}

#[test]
fn test_superseded_dispatch_result_is_suppressed() {
    let mut reactor = Reactor::new();
    reactor.handle_input("first");
    reactor.handle_input("second");

    let effects = reactor.on_dispatched(RequestSeq(1), IntentKind::Info, Ok(Some("old".into())));
    assert!(effects.is_empty());
    assert_eq!(reactor.state.info(), None);

    let effects = reactor.on_dispatched(RequestSeq(2), IntentKind::Info, Ok(Some("new".into())));
    assert_eq!(
        effects,
        vec![SideEffect::Notify(Notice::Info { seq: RequestSeq(2), text: "new".into() })]
    );
    assert_eq!(reactor.state.info(), Some("new"));
}

#[test]
fn test_step_processes_events_in_order() {
    let mut reactor = Reactor::new();
    let effects = reactor.step(vec![
        Event::Input(InputEvent::text("test", "Open Spotify")),
        Event::Input(InputEvent::text("test", "   ")),
        Event::Rerun(0),
    ]);

    let tickets: Vec<_> = effects
        .iter()
        .filter_map(|e| match e {
            SideEffect::Classify(t) => Some(t.seq),
            _ => None,
        })
        .collect();
    assert_eq!(tickets, vec![RequestSeq(1), RequestSeq(2)]);
    assert_eq!(reactor.state.history().len(), 1);
}
