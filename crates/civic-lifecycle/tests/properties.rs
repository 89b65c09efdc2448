//! Property tests for the submission and transition gates

mod common;

use civic_lifecycle::*;
use civic_types::*;
use common::*;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

/// Text whose trimmed char count is below `max`
fn short_text(max: usize) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::char::range('a', 'z'), 0..max),
        0usize..3,
    )
        .prop_map(|(chars, pad)| {
            let body: String = chars.into_iter().collect();
            format!("{}{}{}", " ".repeat(pad), body, " ".repeat(pad))
        })
}

/// Text whose trimmed char count is at least `min`, including non-ASCII
fn long_text(min: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![prop::char::range('a', 'z'), Just('ñ'), Just('á')],
        min..min + 40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn short_address_never_reaches_the_store(address in short_text(rules::MIN_ADDRESS_LEN)) {
        let store = FakeStore::new();
        let view = RecordingView::new();
        let interaction = ScriptedInteraction::agreeable();
        let controller = viewer_controller(&store, &view, &interaction);
        let mut fields = valid_fields();
        fields.address = address;

        let result = runtime().block_on(async {
            let mut session = UiSessionState::new();
            controller.submit_report(&mut session, &fields).await
        });

        prop_assert!(matches!(result, Err(LifecycleError::Validation(_))));
        prop_assert!(store.calls().is_empty());
    }

    #[test]
    fn short_comment_never_reaches_the_store(comment in short_text(rules::MIN_COMMENT_LEN)) {
        let store = FakeStore::new();
        let view = RecordingView::new();
        let interaction = ScriptedInteraction::agreeable();
        let controller = viewer_controller(&store, &view, &interaction);
        let mut fields = valid_fields();
        fields.comment = comment;

        let result = runtime().block_on(async {
            let mut session = UiSessionState::new();
            controller.submit_report(&mut session, &fields).await
        });

        prop_assert!(matches!(result, Err(LifecycleError::Validation(_))));
        prop_assert!(store.calls().is_empty());
    }

    #[test]
    fn oversized_photo_never_reaches_the_store(extra in 1usize..4096) {
        let store = FakeStore::new();
        let view = RecordingView::new();
        let interaction = ScriptedInteraction::agreeable();
        let controller = viewer_controller(&store, &view, &interaction);
        let mut fields = valid_fields();
        let size = rules::MAX_PHOTO_BYTES as usize + extra;
        fields.photo = Some(PhotoUpload::new("bache.jpg", vec![0; size]));

        let result = runtime().block_on(async {
            let mut session = UiSessionState::new();
            controller.submit_report(&mut session, &fields).await
        });

        prop_assert!(matches!(result, Err(LifecycleError::Validation(_))));
        prop_assert!(store.calls().is_empty());
    }

    #[test]
    fn valid_submission_is_sent_trimmed(
        address in long_text(rules::MIN_ADDRESS_LEN),
        comment in long_text(rules::MIN_COMMENT_LEN),
    ) {
        let store = FakeStore::new();
        let view = RecordingView::new();
        let interaction = ScriptedInteraction::agreeable();
        let controller = viewer_controller(&store, &view, &interaction);
        let mut fields = valid_fields();
        fields.address = format!("  {}  ", address);
        fields.comment = comment.clone();

        let result = runtime().block_on(async {
            let mut session = UiSessionState::new();
            controller.submit_report(&mut session, &fields).await
        });

        prop_assert!(result.is_ok());
        let creates = store.creates();
        prop_assert_eq!(creates.len(), 1);
        prop_assert_eq!(&creates[0].address, &address);
        prop_assert_eq!(&creates[0].comment, &comment);
    }

    #[test]
    fn short_rejection_reason_is_never_sent(reason in short_text(rules::MIN_REJECTION_REASON_LEN)) {
        let store = FakeStore::seeded(1);
        let view = RecordingView::new();
        // the user gives up after the first invalid answer
        let interaction = ScriptedInteraction::with_reasons(&[]);
        let controller = admin_controller(&store, &view, &interaction);

        let outcome = runtime().block_on(async {
            let mut session = UiSessionState::new();
            controller
                .request_transition(&mut session, &ReportId::new("1"), ReportStatus::Rejected, Some(reason))
                .await
        });

        prop_assert_eq!(outcome, Ok(TransitionOutcome::Cancelled));
        prop_assert!(store.updates().is_empty());
    }

    #[test]
    fn valid_rejection_reason_is_sent_verbatim(reason in long_text(rules::MIN_REJECTION_REASON_LEN)) {
        let store = FakeStore::seeded(1);
        let view = RecordingView::new();
        let interaction = ScriptedInteraction::agreeable();
        let controller = admin_controller(&store, &view, &interaction);

        let outcome = runtime().block_on(async {
            let mut session = UiSessionState::new();
            controller
                .request_transition(&mut session, &ReportId::new("1"), ReportStatus::Rejected, Some(reason.clone()))
                .await
        });

        prop_assert!(
            matches!(outcome, Ok(TransitionOutcome::Applied { .. })),
            "expected Applied outcome, got {:?}",
            outcome
        );
        let updates = store.updates();
        prop_assert_eq!(updates.len(), 1);
        prop_assert_eq!(updates[0].1.rejection_reason.as_deref(), Some(reason.as_str()));
    }

    #[test]
    fn projection_percentages_sum_to_hundred(
        pending in 0u64..500,
        verifying in 0u64..500,
        resolved in 0u64..500,
        rejected in 0u64..500,
    ) {
        let mut stats = Statistics::default();
        stats.record(ReportStatus::Pending, pending);
        stats.record(ReportStatus::Verifying, verifying);
        stats.record(ReportStatus::Resolved, resolved);
        stats.record(ReportStatus::Rejected, rejected);

        let projection = project_statistics(&stats);
        let sum: f64 = projection.bars.iter().map(|b| b.percentage).sum();

        if projection.total == 0 {
            prop_assert!(projection.bars.iter().all(|b| b.percentage == 0.0));
        } else {
            prop_assert!((sum - 100.0).abs() < 1e-9);
        }
    }
}
