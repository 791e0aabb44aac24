use super::*;
use crate::animation::timeline::{ENTRANCE_END, EXIT_START, PhaseLayout};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn every_preset_builds_and_parses_by_name() {
    for kind in PresetKind::ALL {
        let preset = kind.build().unwrap();
        assert_eq!(preset.kind, kind);
        assert_eq!(preset.id.as_str(), kind.name());
        assert_eq!(PresetKind::parse(kind.name()).unwrap(), kind);
        assert!(!preset.targets().is_empty());
    }
    assert!(PresetKind::parse("sidebar").is_err());
}

#[test]
fn pinned_presets_hold_through_the_settle_phase() {
    for kind in PresetKind::ALL {
        let Some(tl) = kind.build().unwrap().scroll else {
            continue;
        };
        assert_eq!(tl.layout(), PhaseLayout::Phased);
        let settled = tl.evaluate(ENTRANCE_END);
        assert_eq!(tl.evaluate(0.5), settled, "{}", kind.name());
        assert_eq!(tl.evaluate(EXIT_START), settled, "{}", kind.name());
    }
}

#[test]
fn hero_exits_sideways_and_plays_intro_on_load() {
    let hero = hero().unwrap();
    let scroll = hero.scroll.as_ref().unwrap();
    assert_eq!(scroll.pin_distance_ratio(), 1.3);
    for track in scroll.tracks() {
        assert_eq!(track.start, EXIT_START);
        assert_eq!(track.ease, Ease::InCubic);
    }
    let done = scroll.evaluate(1.0);
    assert_eq!(done[&TargetId::new("hero.left-card")].x, Some(Length::vw(-55.0)));
    assert_eq!(done[&TargetId::new("hero.right-card")].x, Some(Length::vw(55.0)));

    let intro = hero.reveal.as_ref().unwrap();
    assert_eq!(intro.start, 1.0);
    assert!(close(intro.sequence.duration_secs, 1.9));
    let first = intro.sequence.timeline.evaluate(0.0);
    let left = first[&TargetId::new("hero.left-card")];
    assert_eq!(left.opacity, Some(0.0));
    assert_eq!(left.x, Some(Length::vw(-12.0)));
    assert_eq!(left.scale, Some(0.98));
    assert_eq!(hero.targets().len(), 7);

    // Leave-back covers the copy the scroll timeline never touches.
    let settled_copy = intro.sequence.timeline.evaluate(1.0);
    assert_eq!(hero.leave_back.len(), 5);
    for (target, state) in &hero.leave_back {
        assert!(!scroll.targets().contains(target), "{target}");
        assert_eq!(&settled_copy[target], state, "{target}");
    }
}

#[test]
fn category_cards_are_staggered_within_the_entrance() {
    let wall = category_wall(4).unwrap();
    let tl = wall.scroll.unwrap();
    assert_eq!(tl.pin_distance_ratio(), 1.4);
    let card_starts: Vec<f64> = tl
        .tracks()
        .iter()
        .filter(|t| t.target.as_str().contains("card-") && t.start < ENTRANCE_END)
        .map(|t| t.start)
        .collect();
    let expected = [0.08, 0.12, 0.16, 0.20];
    assert_eq!(card_starts.len(), expected.len());
    for (got, want) in card_starts.iter().zip(expected) {
        assert!(close(*got, want), "{got} vs {want}");
    }
    let exit_last = tl
        .tracks()
        .iter()
        .filter(|t| t.target.as_str() == "category-wall.card-3" && t.start >= EXIT_START)
        .map(|t| t.start)
        .next()
        .unwrap();
    assert!(close(exit_last, 0.79));
}

#[test]
fn too_many_cards_spill_into_the_settle_hold() {
    assert!(category_wall(6).is_ok());
    assert!(category_wall(7).is_err());
}

#[test]
fn spotlight_settles_fully_visible() {
    let tl = featured_spotlight(DEFAULT_HEADLINE_LINES).unwrap().scroll.unwrap();
    let settled = tl.settled();
    for (id, state) in &settled {
        assert_eq!(state.opacity, Some(1.0), "{id}");
    }
    assert_eq!(settled[&TargetId::new("featured-spotlight.cta")].scale, Some(1.0));
}

#[test]
fn reveal_presets_use_their_thresholds() {
    let news = newsletter().unwrap();
    let reveal = news.reveal.as_ref().unwrap();
    assert!(news.scroll.is_none());
    assert_eq!(reveal.start, 0.8);
    assert!(close(reveal.sequence.duration_secs, 0.6));

    let foot = footer(2).unwrap();
    let reveal = foot.reveal.as_ref().unwrap();
    assert_eq!(reveal.start, 0.9);
    assert!(close(reveal.sequence.duration_secs, 0.6));
    assert_eq!(foot.targets().len(), 2);
}

#[test]
fn scroll_extent_includes_pin_distance() {
    assert!(close(curated_grid().unwrap().scroll_extent_vh(), 2.3));
    assert!(close(newsletter().unwrap().scroll_extent_vh(), 0.7));
}

#[test]
fn featured_product_is_priced_in_cents() {
    let p = featured_product();
    assert_eq!(p.id, "headphones-001");
    assert_eq!(p.price_cents, 8900);
}
