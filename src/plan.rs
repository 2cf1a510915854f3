//! Conversion planning.
//!
//! A [`Plan`] says, for every destination channel, which source components
//! feed it (their values are averaged) or which constant fills it when no
//! source matches. Destination channels fed by the same source set share one
//! [`Step`], so the value is computed once and broadcast.
//!
//! The plan also picks the cheapest [`Strategy`] able to execute it. The
//! strategies form an ordered table of predicates; the first one that
//! matches wins and the generic path takes everything else.

use alloc::vec::Vec;

use crate::channel::Channel;

/// Position of one component within a pixel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Component {
    /// Bit offset from the start of the pixel.
    pub offset: u32,
    pub depth: u32,
}

/// One computed value and every destination component that receives it.
#[derive(Clone, PartialEq, Debug)]
pub struct Step {
    /// Source components whose normalized values are averaged. Empty means
    /// the step writes [`Step::fill`].
    pub sources: Vec<Component>,
    pub targets: Vec<Component>,
    /// Constant used when `sources` is empty: opaque for alpha, black for
    /// color.
    pub fill: f64,
}

impl Step {
    #[inline]
    pub fn is_fill(&self) -> bool {
        self.sources.is_empty()
    }

    /// Exactly one source copied to exactly one target of the same depth.
    #[inline]
    pub fn is_copy(&self) -> bool {
        matches!((&self.sources[..], &self.targets[..]), ([s], [t]) if s.depth == t.depth)
    }
}

/// Execution tiers, cheapest first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Strategy {
    /// Channel lists are equal; nothing to convert.
    Identity,
    /// 1-bit channels widened to 8-bit bytes of 0 or 255.
    BitExpand,
    /// Whole-byte channels copied one-to-one in a new order.
    Swizzle,
    /// 8-bit channels averaged, broadcast or filled byte by byte.
    ByteBlend,
    /// Arbitrary depths through normalized floats.
    Generic,
}

#[derive(Clone, Copy)]
struct Request<'a> {
    src: &'a [Channel],
    dst: &'a [Channel],
}

struct Tier {
    strategy: Strategy,
    matches: fn(Request<'_>, &[Step]) -> bool,
}

/// Tried top to bottom; the first match is used.
const TIERS: &[Tier] = &[
    Tier {
        strategy: Strategy::Identity,
        matches: is_identity,
    },
    Tier {
        strategy: Strategy::BitExpand,
        matches: is_bit_expand,
    },
    Tier {
        strategy: Strategy::Swizzle,
        matches: is_swizzle,
    },
    Tier {
        strategy: Strategy::ByteBlend,
        matches: is_byte_blend,
    },
];

fn is_identity(req: Request<'_>, _: &[Step]) -> bool {
    req.src == req.dst
}

fn is_bit_expand(req: Request<'_>, _: &[Step]) -> bool {
    !req.src.is_empty()
        && req.src.len() == req.dst.len()
        && req.src.iter().zip(req.dst).all(|(s, d)| s.kind == d.kind)
        && req.src.iter().all(|c| c.depth == 1)
        && req.dst.iter().all(|c| c.depth == 8)
}

fn is_swizzle(req: Request<'_>, steps: &[Step]) -> bool {
    let whole_bytes = |c: &Channel| c.depth % 8 == 0;
    req.src.iter().all(whole_bytes)
        && req.dst.iter().all(whole_bytes)
        && steps.iter().all(Step::is_copy)
}

fn is_byte_blend(req: Request<'_>, _: &[Step]) -> bool {
    req.src.iter().all(|c| c.depth == 8) && req.dst.iter().all(|c| c.depth == 8)
}

/// The steps of a conversion and the tier that will run them.
#[derive(Clone, PartialEq, Debug)]
pub struct Plan {
    steps: Vec<Step>,
    strategy: Strategy,
}

impl Plan {
    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Destination components in increasing bit order, each tagged with the
    /// index of the step that produces it.
    pub fn targets_in_order(&self) -> Vec<(Component, usize)> {
        let mut targets: Vec<(Component, usize)> = self
            .steps
            .iter()
            .enumerate()
            .flat_map(|(i, step)| step.targets.iter().map(move |&t| (t, i)))
            .collect();
        targets.sort_unstable_by_key(|(t, _)| t.offset);
        targets
    }
}

/// Plan the conversion of pixels laid out as `src` into `dst`.
pub fn plan(src: &[Channel], dst: &[Channel]) -> Plan {
    let steps = build_steps(src, dst);
    let req = Request { src, dst };
    let strategy = TIERS
        .iter()
        .find(|tier| (tier.matches)(req, &steps))
        .map_or(Strategy::Generic, |tier| tier.strategy);
    Plan { steps, strategy }
}

fn build_steps(src: &[Channel], dst: &[Channel]) -> Vec<Step> {
    let src_offsets = offsets(src);
    let mut steps: Vec<Step> = Vec::new();
    for (d, dst_offset) in dst.iter().zip(offsets(dst)) {
        if d.depth == 0 {
            continue;
        }
        let sources: Vec<Component> = src
            .iter()
            .zip(&src_offsets)
            .filter(|(s, _)| s.depth != 0 && s.kind.intersects(d.kind))
            .map(|(s, &offset)| Component { offset, depth: s.depth })
            .collect();
        let fill = if d.kind.is_alpha() { 1.0 } else { 0.0 };
        let target = Component {
            offset: dst_offset,
            depth: d.depth,
        };
        // group by source set; fills only merge with the same constant
        let existing = steps
            .iter_mut()
            .find(|s| s.sources == sources && (!sources.is_empty() || s.fill == fill));
        match existing {
            Some(step) => step.targets.push(target),
            None => steps.push(Step {
                sources,
                targets: alloc::vec![target],
                fill,
            }),
        }
    }
    steps
}

fn offsets(channels: &[Channel]) -> Vec<u32> {
    channels
        .iter()
        .scan(0u32, |offset, c| {
            let here = *offset;
            *offset += c.depth;
            Some(here)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use alloc::vec;

    fn c(offset: u32, depth: u32) -> Component {
        Component { offset, depth }
    }

    #[test]
    fn identity_first() {
        let rgba = Layout::Rgba.channels(8);
        assert_eq!(plan(&rgba, &rgba).strategy(), Strategy::Identity);
        let bits = Layout::Gray.channels(1);
        assert_eq!(plan(&bits, &bits).strategy(), Strategy::Identity);
    }

    #[test]
    fn bit_expand_requires_matching_types() {
        let src = Layout::Rgb.channels(1);
        assert_eq!(plan(&src, &Layout::Rgb.channels(8)).strategy(), Strategy::BitExpand);
        assert_eq!(plan(&src, &Layout::Bgr.channels(8)).strategy(), Strategy::Generic);
        let gray = Layout::Gray.channels(1);
        assert_eq!(plan(&gray, &Layout::Gray.channels(8)).strategy(), Strategy::BitExpand);
        assert_eq!(plan(&gray, &Layout::Gray.channels(4)).strategy(), Strategy::Generic);
    }

    #[test]
    fn swizzle_steps_are_one_to_one() {
        let p = plan(&Layout::Rgb.channels(8), &Layout::Bgr.channels(8));
        assert_eq!(p.strategy(), Strategy::Swizzle);
        assert_eq!(p.steps().len(), 3);
        assert_eq!(p.steps()[0].sources, [c(16, 8)]);
        assert_eq!(p.steps()[0].targets, [c(0, 8)]);
        assert_eq!(p.steps()[2].sources, [c(0, 8)]);
        assert_eq!(p.steps()[2].targets, [c(16, 8)]);
    }

    #[test]
    fn swizzle_covers_multi_byte_channels() {
        let p = plan(&Layout::Rgba.channels(16), &Layout::Argb.channels(16));
        assert_eq!(p.strategy(), Strategy::Swizzle);
        let p = plan(&Layout::Rgb.channels(16), &Layout::Rgb.channels(8));
        assert_eq!(p.strategy(), Strategy::Generic);
    }

    #[test]
    fn gray_sources_blend() {
        let p = plan(&Layout::Rgb.channels(8), &Layout::Gray.channels(8));
        assert_eq!(p.strategy(), Strategy::ByteBlend);
        assert_eq!(p.steps().len(), 1);
        assert_eq!(p.steps()[0].sources, [c(0, 8), c(8, 8), c(16, 8)]);
    }

    #[test]
    fn broadcast_merges_targets() {
        let p = plan(&Layout::Gray.channels(8), &Layout::Rgba.channels(8));
        assert_eq!(p.strategy(), Strategy::ByteBlend);
        assert_eq!(p.steps().len(), 2);
        assert_eq!(p.steps()[0].sources, [c(0, 8)]);
        assert_eq!(p.steps()[0].targets, [c(0, 8), c(8, 8), c(16, 8)]);
        assert!(p.steps()[1].is_fill());
        assert_eq!(p.steps()[1].fill, 1.0);
    }

    #[test]
    fn fills_merge_only_with_equal_constants() {
        let dst = [Channel::alpha(4), Channel::red(4), Channel::alpha(4), Channel::blue(4)];
        let p = plan(&[Channel::green(8)], &dst);
        assert_eq!(p.steps().len(), 2);
        assert_eq!(p.steps()[0].fill, 1.0);
        assert_eq!(p.steps()[0].targets, [c(0, 4), c(8, 4)]);
        assert_eq!(p.steps()[1].fill, 0.0);
        assert_eq!(p.steps()[1].targets, [c(4, 4), c(12, 4)]);
        assert_eq!(p.strategy(), Strategy::Generic);
    }

    #[test]
    fn zero_depth_channels_are_skipped() {
        let src = [Channel::gray(8), Channel::alpha(0)];
        let dst = [Channel::gray(0), Channel::alpha(8)];
        let p = plan(&src, &dst);
        assert_eq!(p.steps().len(), 1);
        assert!(p.steps()[0].is_fill());
        assert_eq!(p.steps()[0].targets, [c(0, 8)]);
    }

    #[test]
    fn targets_sorted_by_offset() {
        let p = plan(&[Channel::green(8)], &[
            Channel::alpha(2),
            Channel::red(2),
            Channel::alpha(2),
            Channel::green(2),
        ]);
        let order: Vec<u32> = p.targets_in_order().iter().map(|(t, _)| t.offset).collect();
        assert_eq!(order, vec![0, 2, 4, 6]);
    }
}
