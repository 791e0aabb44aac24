//! The storefront's sections as timeline presets.
//!
//! Pinned sections hold for `pin_distance_ratio` viewport heights and run entrance, settle and
//! exit against scroll. Reveal sections play a short sequence once their top crosses a
//! threshold line. The hero does both: its exit is scroll-driven and its intro is a reveal
//! whose line is already behind the top of the page, so it plays on load.

use std::collections::BTreeSet;

use crate::{
    animation::{
        ease::Ease,
        props::PropertyState,
        sequence::{Position, Sequence, SequenceBuilder, Step},
        timeline::{Phase, PhaseTimeline, StyleFrame},
    },
    cart::store::Product,
    composition::dsl::{TimelineBuilder, TweenBuilder},
    foundation::core::{Length, SectionId, TargetId},
    foundation::error::{PhaseError, PhaseResult},
};

/// Catalogue of section presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetKind {
    Hero,
    CuratedGrid,
    CategoryWall,
    FeaturedSpotlight,
    Newsletter,
    Footer,
}

impl PresetKind {
    /// Page order.
    pub const ALL: [Self; 6] = [
        Self::Hero,
        Self::CuratedGrid,
        Self::FeaturedSpotlight,
        Self::CategoryWall,
        Self::Newsletter,
        Self::Footer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::CuratedGrid => "curated-grid",
            Self::CategoryWall => "category-wall",
            Self::FeaturedSpotlight => "featured-spotlight",
            Self::Newsletter => "newsletter",
            Self::Footer => "footer",
        }
    }

    pub fn parse(name: &str) -> PhaseResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name.trim())
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.name()).collect();
                PhaseError::validation(format!(
                    "unknown preset '{name}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }

    /// Build with the storefront's default element counts.
    pub fn build(self) -> PhaseResult<SectionPreset> {
        match self {
            Self::Hero => hero(),
            Self::CuratedGrid => curated_grid(),
            Self::CategoryWall => category_wall(DEFAULT_CATEGORY_CARDS),
            Self::FeaturedSpotlight => featured_spotlight(DEFAULT_HEADLINE_LINES),
            Self::Newsletter => newsletter(),
            Self::Footer => footer(DEFAULT_FOOTER_PANELS),
        }
    }
}

pub const DEFAULT_CATEGORY_CARDS: usize = 4;
pub const DEFAULT_HEADLINE_LINES: usize = 4;
pub const DEFAULT_FOOTER_PANELS: usize = 2;

/// One-shot sequence plus its threshold line.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealPreset {
    pub sequence: Sequence,
    /// Threshold as a fraction of the viewport height (`'top 80%'` is 0.8).
    pub start: f64,
}

/// Everything needed to mount one section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionPreset {
    pub kind: PresetKind,
    pub id: SectionId,
    /// Scroll-scrubbed phased timeline, for pinned sections.
    pub scroll: Option<PhaseTimeline>,
    /// Time-driven reveal.
    pub reveal: Option<RevealPreset>,
    /// Height of the section itself in viewport heights, excluding pin distance.
    pub height_vh: f64,
    /// Targets outside the scroll timeline that are restored, with these states, when the
    /// section is left backwards after it has been revealed.
    pub leave_back: StyleFrame,
}

impl SectionPreset {
    /// Every target either timeline writes.
    pub fn targets(&self) -> BTreeSet<TargetId> {
        let mut out = BTreeSet::new();
        if let Some(tl) = &self.scroll {
            out.extend(tl.targets());
        }
        if let Some(reveal) = &self.reveal {
            out.extend(reveal.sequence.timeline.targets());
        }
        out.extend(self.leave_back.keys().cloned());
        out
    }

    /// Scroll distance the section occupies, pin spacer included.
    pub fn scroll_extent_vh(&self) -> f64 {
        self.height_vh + self.scroll.as_ref().map_or(0.0, PhaseTimeline::pin_distance_ratio)
    }
}

fn target(section: &str, element: &str) -> TargetId {
    TargetId::new(format!("{section}.{element}"))
}

fn numbered(section: &str, element: &str, count: usize) -> Vec<TargetId> {
    (0..count)
        .map(|i| target(section, &format!("{element}-{i}")))
        .collect()
}

fn slide_in_x(x: Length) -> (PropertyState, PropertyState) {
    (
        PropertyState::new().x(x).opacity(0.0),
        PropertyState::new().x(Length::ZERO).opacity(1.0),
    )
}

fn exit_tween(target: TargetId, to: PropertyState) -> TweenBuilder {
    let mut from = PropertyState::new().opacity(1.0);
    if to.x.is_some() {
        from = from.x(Length::ZERO);
    }
    if to.y.is_some() {
        from = from.y(Length::ZERO);
    }
    TweenBuilder::new(target, from, to)
        .ease(Ease::InCubic)
        .phase(Phase::Exit)
}

fn rise(offset_px: f64) -> (PropertyState, PropertyState) {
    (
        PropertyState::new().y(Length::px(offset_px)).opacity(0.0),
        PropertyState::new().y(Length::ZERO).opacity(1.0),
    )
}

/// Hero: cards and copy animate in on load; on scroll the cards slide out sideways.
pub fn hero() -> PhaseResult<SectionPreset> {
    const S: &str = "hero";
    let left = target(S, "left-card");
    let right = target(S, "right-card");

    let scroll = TimelineBuilder::phased(1.3)
        .tween(exit_tween(
            left.clone(),
            PropertyState::new().x(Length::vw(-55.0)).opacity(0.0),
        ))
        .tween(exit_tween(
            right.clone(),
            PropertyState::new().x(Length::vw(55.0)).opacity(0.0),
        ))
        .build()?;

    let card_to = PropertyState::new().x(Length::ZERO).scale(1.0).opacity(1.0);
    let card_from = |x: f64| PropertyState::new().x(Length::vw(x)).scale(0.98).opacity(0.0);
    let (text_from, text_to) = rise(24.0);
    let copy = |name: &str, duration: f64| {
        Step::new([target(S, name)], text_from, text_to, duration)
    };
    // Leaving back forces the copy to its settled state as well as the cards.
    let leave_back: StyleFrame = ["headline", "subhead", "body", "cta", "micro"]
        .into_iter()
        .map(|name| (target(S, name), text_to))
        .collect();
    let intro = SequenceBuilder::new(Ease::OutCubic)
        .add(Step::new([left], card_from(-12.0), card_to, 0.8), Position::At(0.0))?
        .add(Step::new([right], card_from(12.0), card_to, 0.8), Position::At(0.1))?
        .add(copy("headline", 0.5), Position::Overlap(0.4))?
        .add(copy("subhead", 0.5), Position::Overlap(0.3))?
        .add(copy("body", 0.5), Position::Overlap(0.3))?
        .add(
            copy("cta", 0.5).ease(Ease::OutBack { overshoot: 1.6 }),
            Position::Overlap(0.2),
        )?
        .add(copy("micro", 0.4), Position::Overlap(0.2))?
        .build()?;

    Ok(SectionPreset {
        kind: PresetKind::Hero,
        id: SectionId::new(S),
        scroll: Some(scroll),
        reveal: Some(RevealPreset {
            sequence: intro,
            start: 1.0,
        }),
        height_vh: 1.0,
        leave_back,
    })
}

/// Curated grid: four tiles fly in from the sides, then split up and down on exit.
pub fn curated_grid() -> PhaseResult<SectionPreset> {
    const S: &str = "curated-grid";
    let [tl, tr, bl, br] = ["top-left", "top-right", "bottom-left", "bottom-right"]
        .map(|name| target(S, name));

    let (tl_from, tile_to) = slide_in_x(Length::vw(-60.0));
    let (tr_from, _) = slide_in_x(Length::vw(60.0));
    let bottom_to = tile_to.y(Length::ZERO);
    let scroll = TimelineBuilder::phased(1.3)
        .tween(TweenBuilder::new(tl.clone(), tl_from, tile_to))
        .tween(TweenBuilder::new(tr.clone(), tr_from, tile_to))
        .tween(TweenBuilder::new(bl.clone(), tl_from.y(Length::vh(20.0)), bottom_to).start(0.06))
        .tween(TweenBuilder::new(br.clone(), tr_from.y(Length::vh(20.0)), bottom_to).start(0.06))
        .group([tl, tr], 0.0, |t| {
            exit_tween(t, PropertyState::new().y(Length::vh(-35.0)).opacity(0.0))
        })
        .group([bl, br], 0.0, |t| {
            exit_tween(t, PropertyState::new().y(Length::vh(35.0)).opacity(0.0))
        })
        .build()?;

    Ok(pinned(PresetKind::CuratedGrid, S, scroll))
}

/// Category wall: a tall tile and a card grid slide in, cards pop in one after another.
pub fn category_wall(cards: usize) -> PhaseResult<SectionPreset> {
    const S: &str = "category-wall";
    let left = target(S, "left-tall");
    let cards = numbered(S, "card", cards);

    let (left_from, to) = slide_in_x(Length::vw(-60.0));
    let (grid_from, _) = slide_in_x(Length::vw(60.0));
    let pop_from = PropertyState::new().scale(0.86).opacity(0.0);
    let pop_to = PropertyState::new().scale(1.0).opacity(1.0);
    let scroll = TimelineBuilder::phased(1.4)
        .tween(TweenBuilder::new(left.clone(), left_from, to))
        .tween(TweenBuilder::new(target(S, "grid"), grid_from, to))
        .group(cards.clone(), 0.04, |t| {
            TweenBuilder::new(t, pop_from, pop_to).start(0.08)
        })
        .tween(exit_tween(
            left,
            PropertyState::new().y(Length::vh(-30.0)).opacity(0.0),
        ))
        .group(cards, 0.03, |t| {
            exit_tween(t, PropertyState::new().y(Length::vh(30.0)).opacity(0.0))
        })
        .build()?;

    Ok(pinned(PresetKind::CategoryWall, S, scroll))
}

/// Featured spotlight: photo and product card converge, headline lines rise in turn, the
/// call-to-action pops with overshoot.
pub fn featured_spotlight(headline_lines: usize) -> PhaseResult<SectionPreset> {
    const S: &str = "featured-spotlight";
    let photo = target(S, "left-photo");
    let card = target(S, "right-card");

    let (photo_from, to) = slide_in_x(Length::vw(-70.0));
    let (card_from, _) = slide_in_x(Length::vw(70.0));
    let (line_from, line_to) = rise(24.0);
    let scroll = TimelineBuilder::phased(1.3)
        .tween(TweenBuilder::new(photo.clone(), photo_from, to))
        .tween(TweenBuilder::new(card.clone(), card_from, to))
        .group(numbered(S, "headline", headline_lines), 0.05, |t| {
            TweenBuilder::new(t, line_from, line_to).start(0.1)
        })
        .tween(
            TweenBuilder::new(
                target(S, "cta"),
                PropertyState::new().scale(0.92).opacity(0.0),
                PropertyState::new().scale(1.0).opacity(1.0),
            )
            .ease(Ease::OutBack { overshoot: 1.4 })
            .start(0.2),
        )
        .tween(exit_tween(
            photo,
            PropertyState::new().x(Length::vw(-40.0)).opacity(0.0),
        ))
        .tween(exit_tween(
            card,
            PropertyState::new().x(Length::vw(40.0)).opacity(0.0),
        ))
        .build()?;

    Ok(pinned(PresetKind::FeaturedSpotlight, S, scroll))
}

/// Newsletter: the signup block rises in once its top reaches 80% of the viewport.
pub fn newsletter() -> PhaseResult<SectionPreset> {
    const S: &str = "newsletter";
    let (from, to) = rise(24.0);
    let sequence = SequenceBuilder::new(Ease::OutQuad)
        .add(
            Step::new([target(S, "block")], from, to, 0.6),
            Position::AfterPrevious,
        )?
        .build()?;
    Ok(revealed(PresetKind::Newsletter, S, sequence, 0.8, 0.7))
}

/// Footer: contact panels rise in one after another once they reach 90% of the viewport.
pub fn footer(panels: usize) -> PhaseResult<SectionPreset> {
    const S: &str = "footer";
    let (from, to) = rise(30.0);
    let sequence = SequenceBuilder::new(Ease::OutQuad)
        .add(
            Step::new(numbered(S, "panel", panels), from, to, 0.5).stagger(0.1),
            Position::AfterPrevious,
        )?
        .build()?;
    Ok(revealed(PresetKind::Footer, S, sequence, 0.9, 0.8))
}

fn pinned(kind: PresetKind, id: &str, scroll: PhaseTimeline) -> SectionPreset {
    SectionPreset {
        kind,
        id: SectionId::new(id),
        scroll: Some(scroll),
        reveal: None,
        height_vh: 1.0,
        leave_back: StyleFrame::new(),
    }
}

fn revealed(
    kind: PresetKind,
    id: &str,
    sequence: Sequence,
    start: f64,
    height_vh: f64,
) -> SectionPreset {
    SectionPreset {
        kind,
        id: SectionId::new(id),
        scroll: None,
        reveal: Some(RevealPreset { sequence, start }),
        height_vh,
        leave_back: StyleFrame::new(),
    }
}

/// Product promoted by the featured spotlight's call-to-action.
pub fn featured_product() -> Product {
    Product {
        id: "headphones-001".into(),
        name: "Studio-Ready Headphones".into(),
        price_cents: 8900,
        image: "/images/headphones_featured.jpg".into(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/presets.rs"]
mod tests;
