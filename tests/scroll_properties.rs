//! Property-based tests for scroll math and hit-testing.
//!
//! Property Under Test:
//! "Percent and pixel positions convert losslessly whenever content can scroll,
//! and every visible block is hit by a click inside it."

use proptest::prelude::*;
use versecast::model::{ContentMeta, ContentPayload, Verse};
use versecast::view_state::scroll::{clamp_offset, max_scroll};
use versecast::view_state::{
    hit_test, scroll_target_for_verse, to_percent, to_pixels, FixedAdvanceMeasure, HitTestResult,
    Layout, LayoutParams, ScrollState, ViewportDimensions,
};

// ===== Helpers =====

fn passage(texts: &[String]) -> ContentPayload {
    ContentPayload::new(
        ContentMeta {
            book_code: "PS".to_string(),
            book_name: "Psalms".to_string(),
            chapter_number: 119,
            range: [1, texts.len() as u32],
        },
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Verse::new(i as u32 + 1, text.clone()))
            .collect(),
    )
}

fn layout(texts: &[String], width: f64, height: f64, fixed_title: bool) -> Layout {
    let params = LayoutParams::new(ViewportDimensions::new(width, height), 8.0, 1.6, fixed_title);
    Layout::compute(&passage(texts), params, &FixedAdvanceMeasure::new(30.0))
}

fn verse_texts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z ]{1,120}", 1..40)
}

// ===== Properties =====

proptest! {
    #[test]
    fn percent_round_trips_when_scrollable(
        percent in 0.0f64..=1.0,
        total in 1.0f64..100_000.0,
        viewport in 1.0f64..5_000.0,
    ) {
        prop_assume!(max_scroll(total, viewport) > 0.0);
        let back = to_percent(to_pixels(percent, total, viewport), total, viewport);
        prop_assert!((back - percent).abs() < 1e-9, "{} became {}", percent, back);
    }

    #[test]
    fn unscrollable_content_is_always_at_zero(
        percent in -10.0f64..10.0,
        total in 0.0f64..1_000.0,
    ) {
        let viewport = total + 1.0;
        prop_assert_eq!(to_pixels(percent, total, viewport), 0.0);
        prop_assert_eq!(to_percent(percent * 100.0, total, viewport), 0.0);
    }

    #[test]
    fn offsets_stay_clamped(
        deltas in prop::collection::vec(-5_000.0f64..5_000.0, 1..50),
        max in 0.0f64..10_000.0,
    ) {
        let mut scroll = ScrollState::new();
        scroll.set_max(max);
        for delta in deltas {
            let offset = scroll.scroll_by(delta);
            prop_assert!((0.0..=max).contains(&offset));
            prop_assert!((0.0..=1.0).contains(&scroll.percent()));
        }
    }

    #[test]
    fn clamp_is_idempotent(offset in any::<f64>(), max in 0.0f64..10_000.0) {
        let once = clamp_offset(offset, max);
        prop_assert_eq!(clamp_offset(once, max), once);
    }

    #[test]
    fn block_middles_hit_their_own_verse(
        texts in verse_texts(),
        fixed_title in any::<bool>(),
        percent in 0.0f64..=1.0,
    ) {
        let layout = layout(&texts, 1280.0, 720.0, fixed_title);
        let offset = to_pixels(percent, layout.total_height(), layout.scroll_region_height());
        let pinned = layout.params().pinned_title_height();

        for block in layout.blocks() {
            let click_y = pinned + block.top_offset + block.height / 2.0 - offset;
            if click_y < pinned {
                continue;
            }
            let hit = hit_test(click_y, offset, &layout);
            prop_assert_eq!(hit.verse_index(), Some(block.verse_index));
        }
    }

    #[test]
    fn gaps_between_blocks_miss(texts in verse_texts()) {
        let layout = layout(&texts, 1280.0, 720.0, false);
        let gap = layout.params().block_gap();
        for block in layout.blocks() {
            let click_y = block.bottom() + gap / 2.0;
            prop_assert_eq!(hit_test(click_y, 0.0, &layout), HitTestResult::Miss);
        }
    }

    #[test]
    fn scroll_targets_are_valid_offsets(texts in verse_texts(), index in 0usize..50) {
        let layout = layout(&texts, 1920.0, 1080.0, true);
        let target = scroll_target_for_verse(index, &layout, layout.scroll_region_height());
        prop_assert!(target >= 0.0);
        prop_assert!(target <= layout.max_scroll());
    }

    #[test]
    fn block_tops_are_strictly_increasing(texts in verse_texts()) {
        let layout = layout(&texts, 800.0, 600.0, true);
        for pair in layout.blocks().windows(2) {
            prop_assert!(pair[0].bottom() < pair[1].top_offset);
        }
    }
}
