//! Resolution of track sizes and component bounds.
//!
//! A pass runs in four phases per axis:
//!
//! 1. Every track resolves its size from the components that start in it and
//!    span only that track.
//! 2. Grouped tracks take the largest size in their group.
//! 3. Components spanning several tracks widen those tracks when they don't
//!    fit, narrowest spans first.
//! 4. The tracks are fitted into the container: compressible tracks shrink
//!    toward their minimum if there is too little space, growing tracks share
//!    any extra space by resize weight. Grouped tracks grow together.
//!
//! Phases 1 to 3 run twice, once measuring preferred sizes and once measuring
//! minimum sizes. The minimum and preferred layout sizes are the sums of
//! those results. Nothing is cached between passes. Sums saturate at
//! `i32::MAX` instead of overflowing.

use formgrid_core::{
    Alignment, Axis, CellConstraints, ComponentId, ComponentSize, Measure, MeasureMode, Size,
    SizeContext, TrackGroup, TrackSpec,
};
use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace};

use crate::bounds::{Bounds, Dimension};
use crate::form::FormLayout;
use crate::info::{Layout, LayoutInfo};

/// One layout pass over a form and a measurement snapshot.
pub(crate) struct Resolver<'a> {
    form: &'a FormLayout,
    measure: &'a dyn Measure,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(form: &'a FormLayout, measure: &'a dyn Measure) -> Self {
        Self { form, measure }
    }

    pub(crate) fn layout_info(&self, container: Bounds) -> LayoutInfo {
        let column_origins = self.origins(Axis::Column, container);
        let row_origins = self.origins(Axis::Row, container);
        debug!(
            columns = self.form.column_count(),
            rows = self.form.row_count(),
            components = self.form.component_count(),
            width = container.width,
            height = container.height,
            "resolved layout"
        );
        LayoutInfo::new(column_origins, row_origins)
    }

    pub(crate) fn layout(&self, container: Bounds) -> Layout {
        let info = self.layout_info(container);
        let components = self
            .form
            .placements()
            .map(|(component, cc)| (component, self.component_bounds(&info, component, cc)))
            .collect::<IndexMap<_, _>>();
        Layout { info, components }
    }

    pub(crate) fn minimum_size(&self) -> Dimension {
        Dimension::new(
            total(&self.axis(Axis::Column).minimum_sizes()),
            total(&self.axis(Axis::Row).minimum_sizes()),
        )
    }

    pub(crate) fn preferred_size(&self) -> Dimension {
        Dimension::new(
            total(&self.axis(Axis::Column).preferred_sizes()),
            total(&self.axis(Axis::Row).preferred_sizes()),
        )
    }

    fn origins(&self, axis: Axis, container: Bounds) -> Vec<i32> {
        let sizes = self.axis(axis).fitted_sizes(container.extent(axis));
        compute_origins(container.origin(axis), &sizes)
    }

    fn axis(&self, axis: Axis) -> AxisResolver<'_> {
        AxisResolver::new(self.form, self.measure, axis)
    }

    fn component_bounds(&self, info: &LayoutInfo, component: ComponentId, cc: &CellConstraints) -> Bounds {
        let (x, width) = self.place(info, component, cc, Axis::Column);
        let (y, height) = self.place(info, component, cc, Axis::Row);
        Bounds::new(x, y, width, height)
    }

    /// Origin and extent of `component` along `axis` inside its cell.
    fn place(&self, info: &LayoutInfo, component: ComponentId, cc: &CellConstraints, axis: Axis) -> (i32, i32) {
        let origins = info.origins(axis);
        let first = cc.origin(axis) - 1;
        let span = cc.span(axis);
        let (Some(&start), Some(&end)) = (origins.get(first), origins.get(first + span)) else {
            return (info.origins(axis).first().copied().unwrap_or_default(), 0);
        };

        let cell_origin = start + cc.insets.leading(axis);
        let cell_size = (end - start - cc.insets.along(axis)).max(0);

        let spec = (span == 1).then(|| &self.form.specs(axis)[first]);
        let alignment = cc
            .alignment(axis)
            .or_else(|| spec.map(TrackSpec::alignment))
            .unwrap_or(Alignment::Fill);
        if alignment == Alignment::Fill {
            return (cell_origin, cell_size);
        }

        let size = self.natural_size(component, axis, spec, cell_size).clamp(0, cell_size);
        let origin = if alignment.is_trailing() {
            cell_origin + cell_size - size
        } else if alignment == Alignment::Center {
            cell_origin + (cell_size - size) / 2
        } else {
            cell_origin
        };
        (origin, size)
    }

    /// Size of a component that doesn't fill its cell.
    fn natural_size(&self, component: ComponentId, axis: Axis, spec: Option<&TrackSpec>, cell_size: i32) -> i32 {
        let measure = |mode| self.measure.measure(component, axis, mode);
        match spec.map(TrackSpec::size) {
            Some(Size::Component(ComponentSize::Minimum)) => measure(MeasureMode::Minimum),
            Some(Size::Component(ComponentSize::Default)) => {
                let preferred = measure(MeasureMode::Preferred);
                if preferred > cell_size {
                    measure(MeasureMode::Minimum)
                } else {
                    preferred
                }
            }
            _ => measure(MeasureMode::Preferred),
        }
    }
}

/// A component covering more than one track.
#[derive(Debug, Clone, Copy)]
struct Spanning {
    component: ComponentId,
    first: usize,
    span: usize,
}

/// Track sizing along one axis.
struct AxisResolver<'a> {
    axis: Axis,
    form: &'a FormLayout,
    measure: &'a dyn Measure,
    specs: &'a [TrackSpec],
    /// Components starting in each track that span only that track.
    singles: Vec<SmallVec<[ComponentId; 4]>>,
    /// Spanning components, narrowest first, ties in placement order.
    spanning: Vec<Spanning>,
    /// Merged groups as 0-based track indices.
    groups: Vec<Vec<usize>>,
}

impl<'a> AxisResolver<'a> {
    fn new(form: &'a FormLayout, measure: &'a dyn Measure, axis: Axis) -> Self {
        let specs = form.specs(axis);
        let mut singles = vec![SmallVec::new(); specs.len()];
        let mut spanning = Vec::new();

        for (component, cc) in form.placements() {
            if form.honors_visibility() && !measure.is_visible(component) {
                continue;
            }
            let first = cc.origin(axis) - 1;
            let span = cc.span(axis);
            if first + span > specs.len() {
                continue;
            }
            if span == 1 {
                singles[first].push(component);
            } else {
                spanning.push(Spanning { component, first, span });
            }
        }
        spanning.sort_by_key(|spanning| spanning.span);

        Self {
            axis,
            form,
            measure,
            specs,
            singles,
            spanning,
            groups: merge_groups(form.groups(axis), specs.len()),
        }
    }

    fn minimum_sizes(&self) -> Vec<i32> {
        self.content_sizes(MeasureMode::Minimum)
    }

    fn preferred_sizes(&self) -> Vec<i32> {
        self.content_sizes(MeasureMode::Preferred)
    }

    /// Phases 1 to 3 for one measure mode.
    fn content_sizes(&self, mode: MeasureMode) -> Vec<i32> {
        let ctx = SizeContext::new(self.axis, self.form.unit_converter(), self.measure).with_default_mode(mode);
        let mut sizes: Vec<i32> = self
            .specs
            .iter()
            .zip(&self.singles)
            .map(|(spec, components)| spec.size().maximum_size(&ctx, components))
            .collect();
        trace!(axis = %self.axis, ?mode, ?sizes, "track sizes");

        equalize_up(&mut sizes, &self.groups);
        trace!(axis = %self.axis, ?mode, ?sizes, "grouped sizes");

        // Widening tracks never shrinks a sum, so a second round only runs
        // when grouping moved sizes and always finds every span satisfied.
        for _ in 0..=self.spanning.len() {
            if !self.distribute_spans(&mut sizes, mode) {
                break;
            }
            equalize_up(&mut sizes, &self.groups);
        }
        trace!(axis = %self.axis, ?mode, ?sizes, "spanned sizes");
        sizes
    }

    /// Widen spanned tracks that are too small for their component.
    /// Returns whether any track changed.
    fn distribute_spans(&self, sizes: &mut [i32], mode: MeasureMode) -> bool {
        let mut changed = false;
        for spanning in &self.spanning {
            let range = spanning.first..spanning.first + spanning.span;
            let required = self.measure.measure(spanning.component, self.axis, mode);
            let shortfall = required.saturating_sub(total(&sizes[range.clone()]));
            if shortfall <= 0 {
                continue;
            }

            let mut weights: Vec<f64> = self.specs[range.clone()].iter().map(TrackSpec::resize_weight).collect();
            if weights.iter().all(|&weight| weight == 0.0) {
                weights.fill(1.0);
            }
            for (size, extra) in sizes[range].iter_mut().zip(apportion(shortfall, &weights)) {
                *size = size.saturating_add(extra);
            }
            changed = true;
        }
        changed
    }

    /// Phase 4: fit the preferred sizes into `available` pixels.
    fn fitted_sizes(&self, available: i32) -> Vec<i32> {
        let preferred = self.preferred_sizes();
        let preferred_total = total(&preferred);

        let mut sizes = if available < preferred_total {
            self.compressed_sizes(preferred, preferred_total, available)
        } else {
            preferred
        };

        let free = available.saturating_sub(total(&sizes));
        if free > 0 {
            self.grow(&mut sizes, free);
        }
        trace!(axis = %self.axis, available, ?sizes, "fitted sizes");
        sizes
    }

    /// Hand up to `free` pixels to the growing tracks.
    ///
    /// A merged group grows as one claim: every member takes the same share,
    /// weighted by the smallest resize weight in the group. Pixels a group
    /// can't split evenly among its members go to the ungrouped growing
    /// tracks. Whatever nobody can take is left as trailing slack.
    fn grow(&self, sizes: &mut [i32], free: i32) {
        let mut group_of = vec![None; self.specs.len()];
        for (index, group) in self.groups.iter().enumerate() {
            for &track in group {
                group_of[track] = Some(index);
            }
        }

        let claims: Vec<SmallVec<[usize; 4]>> = (0..self.specs.len())
            .filter_map(|track| match group_of[track] {
                None => Some(smallvec![track]),
                Some(index) if self.groups[index].first() == Some(&track) => {
                    Some(self.groups[index].iter().copied().collect())
                }
                Some(_) => None,
            })
            .collect();
        let weights: Vec<(i32, f64)> = claims
            .iter()
            .map(|tracks| {
                let weight = tracks
                    .iter()
                    .map(|&track| self.specs[track].resize_weight())
                    .fold(f64::INFINITY, f64::min);
                (tracks.len() as i32, weight)
            })
            .collect();

        for (tracks, share) in claims.iter().zip(apportion_claims(free, &weights)) {
            for &track in tracks {
                sizes[track] = sizes[track].saturating_add(share);
            }
        }
    }

    /// Shrink compressible tracks toward their minimum so the total fits into
    /// `available`, or fall back to the minimum sizes if even that fails.
    fn compressed_sizes(&self, preferred: Vec<i32>, preferred_total: i32, available: i32) -> Vec<i32> {
        let minimum = self.minimum_sizes();
        if available <= total(&minimum) {
            return minimum;
        }

        let room: Vec<f64> = self
            .specs
            .iter()
            .zip(preferred.iter().zip(&minimum))
            .map(|(spec, (&pref, &min))| {
                if spec.size().compressible() {
                    f64::from((pref - min).max(0))
                } else {
                    0.0
                }
            })
            .collect();
        let total_room = room.iter().sum::<f64>() as i32;
        let shrink = preferred_total.saturating_sub(available).min(total_room);
        if shrink <= 0 {
            return preferred;
        }

        let mut sizes = preferred;
        for (size, cut) in sizes.iter_mut().zip(apportion(shrink, &room)) {
            *size -= cut;
        }
        equalize_up(&mut sizes, &self.groups);
        sizes
    }
}

/// Track origins starting at `start`: one more entry than `sizes`.
fn compute_origins(start: i32, sizes: &[i32]) -> Vec<i32> {
    let mut origins = Vec::with_capacity(sizes.len() + 1);
    let mut current = start;
    origins.push(current);
    for &size in sizes {
        current = current.saturating_add(size);
        origins.push(current);
    }
    origins
}

/// Sum of `sizes`, saturating at the `i32` bounds.
fn total(sizes: &[i32]) -> i32 {
    sizes.iter().fold(0, |sum, &size| sum.saturating_add(size))
}

/// Split `amount` pixels in proportion to `weights`.
///
/// Every share is at least the floor of its exact quota; the remaining pixels
/// go one at a time to the track with the largest weight per pixel already
/// given (ties to the lower index). This is the divisor method of d'Hondt, so
/// raising `amount` never lowers any share. Tracks of weight 0 get nothing
/// unless every weight is 0, in which case nothing is handed out.
fn apportion(amount: i32, weights: &[f64]) -> Vec<i32> {
    let claims: Vec<(i32, f64)> = weights.iter().map(|&weight| (1, weight)).collect();
    apportion_claims(amount, &claims)
}

/// Split `amount` pixels among claims of `(members, weight)`.
///
/// A claim's share is given to each of its members, so one more pixel of
/// share costs `members` pixels. Quotas are taken per member as in
/// [`apportion`]; a remaining pixel only goes to a claim that can still pay
/// for it, and pixels no claim can pay for stay unassigned.
fn apportion_claims(amount: i32, claims: &[(i32, f64)]) -> Vec<i32> {
    let mut shares = vec![0; claims.len()];
    let weight_sum: f64 = claims.iter().map(|&(members, weight)| f64::from(members) * weight).sum();
    if amount <= 0 || weight_sum <= 0.0 {
        return shares;
    }

    let mut left = amount;
    for (share, &(members, weight)) in shares.iter_mut().zip(claims) {
        *share = (f64::from(amount) * weight / weight_sum).floor() as i32;
        left = left.saturating_sub(share.saturating_mul(members));
    }

    loop {
        let next = claims
            .iter()
            .zip(&shares)
            .enumerate()
            .filter(|(_, ((members, weight), _))| *weight > 0.0 && *members <= left)
            .map(|(index, (&(_, weight), &share))| (index, weight / f64::from(share + 1)))
            .fold(None, |best: Option<(usize, f64)>, candidate| match best {
                Some(best) if best.1 >= candidate.1 => Some(best),
                _ => Some(candidate),
            });
        match next {
            Some((index, _)) => {
                shares[index] += 1;
                left -= claims[index].0;
            }
            None => break,
        }
    }
    shares
}

/// Union overlapping groups and convert them to 0-based indices.
fn merge_groups(groups: &[TrackGroup], count: usize) -> Vec<Vec<usize>> {
    let mut parent: Vec<usize> = (0..count).collect();
    fn find(parent: &mut [usize], mut index: usize) -> usize {
        while parent[index] != index {
            parent[index] = parent[parent[index]];
            index = parent[index];
        }
        index
    }

    let mut grouped = vec![false; count];
    for group in groups {
        let mut members = group.iter().filter(|&&track| track >= 1 && track <= count).map(|&track| track - 1);
        let Some(head) = members.next() else {
            continue;
        };
        grouped[head] = true;
        for member in members {
            grouped[member] = true;
            let (a, b) = (find(&mut parent, head), find(&mut parent, member));
            parent[b] = a;
        }
    }

    let mut merged: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for track in (0..count).filter(|&track| grouped[track]) {
        let root = find(&mut parent, track);
        merged.entry(root).or_default().push(track);
    }
    merged.into_values().filter(|group| group.len() > 1).collect()
}

/// Raise every grouped track to the largest size in its group.
fn equalize_up(sizes: &mut [i32], groups: &[Vec<usize>]) {
    for group in groups {
        let max = group.iter().map(|&track| sizes[track]).max().unwrap_or_default();
        for &track in group {
            sizes[track] = max;
        }
    }
}
