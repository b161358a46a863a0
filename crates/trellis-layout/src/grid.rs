//! Grid layout with fixed, content-sized and proportional tracks.
//!
//! Columns are resolved first, then rows, by the same routine:
//!
//! 1. Fixed tracks take their declared extent.
//! 2. Children whose span touches an auto track (and no fill track) are
//!    measured unconstrained on the axis and grow the auto tracks they span.
//! 3. Fill tracks share what is left of a finite extent in proportion to
//!    their weights. On an unconstrained axis they are sized from their
//!    content instead, then rescaled so the weights hold.
//!
//! Rows are measured against the column widths resolved in the first pass.

use smallvec::{smallvec, SmallVec};
use tracing::debug;
use trellis_core::{Rect, Size};

use crate::contract::Layout;
use crate::host::LayoutAlgorithm;
use crate::tag::GridTag;

/// How a track is sized.
///
/// The ordering is the order in which children are measured: a child whose
/// span covers tracks of several kinds is classed by the largest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackKind {
    /// A length in DIPs
    FixedSize,
    /// As large as the content spanning it
    AutoSize,
    /// A weighted share of the remaining space
    FillRemainder,
}

/// A row or column definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTrack {
    pub kind: TrackKind,
    /// Length for fixed tracks, weight for fill tracks, ignored for auto tracks.
    pub extent: f64,
}

impl Default for GridTrack {
    fn default() -> Self {
        Self::fill(1.0)
    }
}

impl GridTrack {
    /// A track of exactly `length` DIPs.
    pub fn fixed(length: f64) -> Self {
        Self {
            kind: TrackKind::FixedSize,
            extent: length,
        }
    }

    /// A track sized to its content.
    pub fn auto() -> Self {
        Self {
            kind: TrackKind::AutoSize,
            extent: 0.0,
        }
    }

    /// A track taking `weight` shares of the remaining space.
    pub fn fill(weight: f64) -> Self {
        Self {
            kind: TrackKind::FillRemainder,
            extent: weight,
        }
    }
}

/// A normalized track and its current size.
#[derive(Debug, Clone, Copy)]
struct Track {
    kind: TrackKind,
    /// Share of the fill weight on this axis; zero for other kinds.
    proportion: f64,
    size: f64,
}

type Tracks = SmallVec<[Track; 4]>;

#[derive(Debug, Clone)]
struct ResolvedTracks {
    columns: Tracks,
    rows: Tracks,
}

/// Arranges children into cells addressed by their [`GridTag`].
///
/// No columns (or rows) means a single fill track on that axis. The track
/// sizes resolved by the last measure are kept and reused by arrange.
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    columns: Vec<GridTrack>,
    rows: Vec<GridTrack>,
    resolved: Option<ResolvedTracks>,
}

impl GridLayout {
    /// Create a grid with the given column and row definitions.
    pub fn new(columns: Vec<GridTrack>, rows: Vec<GridTrack>) -> Self {
        Self {
            columns,
            rows,
            resolved: None,
        }
    }

    pub fn columns(&self) -> &[GridTrack] {
        &self.columns
    }

    pub fn rows(&self) -> &[GridTrack] {
        &self.rows
    }

    pub fn add_column(&mut self, column: GridTrack) {
        self.columns.push(column);
        self.resolved = None;
    }

    pub fn add_row(&mut self, row: GridTrack) {
        self.rows.push(row);
        self.resolved = None;
    }

    pub fn set_columns(&mut self, columns: Vec<GridTrack>) {
        self.columns = columns;
        self.resolved = None;
    }

    pub fn set_rows(&mut self, rows: Vec<GridTrack>) {
        self.rows = rows;
        self.resolved = None;
    }

    /// Column widths from the last layout pass, empty before the first one.
    pub fn column_sizes(&self) -> Vec<f64> {
        self.resolved
            .as_ref()
            .map(|resolved| resolved.columns.iter().map(|track| track.size).collect())
            .unwrap_or_default()
    }

    /// Row heights from the last layout pass, empty before the first one.
    pub fn row_sizes(&self) -> Vec<f64> {
        self.resolved
            .as_ref()
            .map(|resolved| resolved.rows.iter().map(|track| track.size).collect())
            .unwrap_or_default()
    }

    /// Resolve both axes.
    ///
    /// With `measure` unset the children are not measured again and their
    /// current desired sizes are used instead.
    fn resolve(&self, children: &mut [&mut dyn Layout], available: Size, measure: bool) -> ResolvedTracks {
        let mut columns = normalize(&self.columns, "column");
        let mut rows = normalize(&self.rows, "row");
        let mut placements: SmallVec<[Placement; 8]> = children
            .iter()
            .enumerate()
            .map(|(index, child)| Placement::new(index, GridTag::from(child.layout_tag()), &columns, &rows))
            .collect();

        placements.sort_by_key(|placement| (placement.column.class, placement.column.span));
        for placement in placements
            .iter()
            .filter(|placement| placement.column.class == TrackKind::AutoSize)
        {
            let size = demand(&mut *children[placement.index], Size::INFINITY, measure);
            grow(&mut columns, &placement.column, size.width);
        }
        if available.width.is_finite() {
            fill_remainder(&mut columns, available.width);
        } else {
            for placement in placements
                .iter()
                .filter(|placement| placement.column.class == TrackKind::FillRemainder)
            {
                let size = demand(&mut *children[placement.index], Size::INFINITY, measure);
                grow(&mut columns, &placement.column, size.width);
            }
            scale_to_anchor(&mut columns);
        }

        placements.sort_by_key(|placement| (placement.row.class, placement.row.span));
        for placement in placements
            .iter()
            .filter(|placement| placement.row.class == TrackKind::AutoSize)
        {
            let constraint = Size::new(placement.column.extent(&columns), f64::INFINITY);
            let size = demand(&mut *children[placement.index], constraint, measure);
            grow(&mut rows, &placement.row, size.height);
        }
        if available.height.is_finite() {
            fill_remainder(&mut rows, available.height);
        } else {
            for placement in placements
                .iter()
                .filter(|placement| placement.row.class == TrackKind::FillRemainder)
            {
                let constraint = Size::new(placement.column.extent(&columns), f64::INFINITY);
                let size = demand(&mut *children[placement.index], constraint, measure);
                grow(&mut rows, &placement.row, size.height);
            }
            scale_to_anchor(&mut rows);
        }

        if measure {
            // Children whose rows did not depend on them still need a measure
            // against their final cell.
            for placement in placements.iter().filter(|placement| match placement.row.class {
                TrackKind::FixedSize => true,
                TrackKind::AutoSize => false,
                TrackKind::FillRemainder => available.height.is_finite(),
            }) {
                let cell = Size::new(placement.column.extent(&columns), placement.row.extent(&rows));
                children[placement.index].measure(cell);
            }
        }

        ResolvedTracks { columns, rows }
    }
}

impl LayoutAlgorithm for GridLayout {
    fn measure_override(&mut self, children: &mut [&mut dyn Layout], available: Size) -> Size {
        let resolved = self.resolve(children, available, true);
        let desired = Size::new(total(&resolved.columns), total(&resolved.rows));
        self.resolved = Some(resolved);
        desired
    }

    fn arrange_override(&mut self, children: &mut [&mut dyn Layout], final_size: Size) {
        let mut resolved = match self.resolved.take() {
            Some(resolved) => resolved,
            None => self.resolve(children, final_size, false),
        };
        if final_size.width.is_finite() {
            fill_remainder(&mut resolved.columns, final_size.width);
        }
        if final_size.height.is_finite() {
            fill_remainder(&mut resolved.rows, final_size.height);
        }

        for (index, child) in children.iter_mut().enumerate() {
            let placement = Placement::new(index, GridTag::from(child.layout_tag()), &resolved.columns, &resolved.rows);
            child.arrange(Rect::new(
                placement.column.offset(&resolved.columns),
                placement.row.offset(&resolved.rows),
                placement.column.extent(&resolved.columns),
                placement.row.extent(&resolved.rows),
            ));
        }

        self.resolved = Some(resolved);
    }
}

/// The tracks a child covers on one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    span: usize,
    /// Largest kind among the spanned tracks.
    class: TrackKind,
}

impl Span {
    /// Clamp `start`/`span` into `tracks`, which is never empty.
    fn new(start: u16, span: u16, tracks: &[Track], axis: &'static str) -> Self {
        let count = tracks.len();
        let clamped_start = usize::from(start).min(count - 1);
        let clamped_span = usize::from(span).clamp(1, count - clamped_start);
        if clamped_start != usize::from(start) || clamped_span != usize::from(span) {
            debug!(axis, start, span, count, "grid tag out of range, clamping");
        }

        let class = tracks[clamped_start..clamped_start + clamped_span]
            .iter()
            .map(|track| track.kind)
            .max()
            .unwrap_or(TrackKind::FixedSize);

        Self {
            start: clamped_start,
            span: clamped_span,
            class,
        }
    }

    fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.span
    }

    fn offset(&self, tracks: &[Track]) -> f64 {
        total(&tracks[..self.start])
    }

    fn extent(&self, tracks: &[Track]) -> f64 {
        total(&tracks[self.range()])
    }
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    index: usize,
    column: Span,
    row: Span,
}

impl Placement {
    fn new(index: usize, tag: GridTag, columns: &[Track], rows: &[Track]) -> Self {
        Self {
            index,
            column: Span::new(tag.column, tag.column_span, columns, "column"),
            row: Span::new(tag.row, tag.row_span, rows, "row"),
        }
    }
}

fn normalize(definitions: &[GridTrack], axis: &'static str) -> Tracks {
    if definitions.is_empty() {
        return smallvec![Track {
            kind: TrackKind::FillRemainder,
            proportion: 1.0,
            size: 0.0,
        }];
    }

    let weight: f64 = definitions
        .iter()
        .filter(|definition| definition.kind == TrackKind::FillRemainder)
        .map(|definition| definition.extent.max(0.0))
        .sum();

    definitions
        .iter()
        .map(|definition| {
            if definition.extent < 0.0 {
                debug!(axis, extent = definition.extent, "negative track extent, clamping to zero");
            }
            let extent = definition.extent.max(0.0);
            match definition.kind {
                TrackKind::FixedSize => Track {
                    kind: TrackKind::FixedSize,
                    proportion: 0.0,
                    size: extent,
                },
                TrackKind::AutoSize => Track {
                    kind: TrackKind::AutoSize,
                    proportion: 0.0,
                    size: 0.0,
                },
                TrackKind::FillRemainder => Track {
                    kind: TrackKind::FillRemainder,
                    proportion: if weight > 0.0 { extent / weight } else { 0.0 },
                    size: 0.0,
                },
            }
        })
        .collect()
}

fn total(tracks: &[Track]) -> f64 {
    tracks.iter().map(|track| track.size).sum()
}

fn demand(child: &mut dyn Layout, constraint: Size, measure: bool) -> Size {
    if measure {
        child.measure(constraint);
    }
    child.desired_size()
}

/// Grow the tracks of `span` so that together they are at least `demand` long.
///
/// A single track takes the maximum. Across several tracks the shortfall is
/// split evenly among the spanned tracks of the span's class.
fn grow(tracks: &mut [Track], span: &Span, demand: f64) {
    let spanned = &mut tracks[span.range()];
    if span.span == 1 {
        spanned[0].size = spanned[0].size.max(demand);
        return;
    }

    let growable = spanned.iter().filter(|track| track.kind == span.class).count();
    let current = total(spanned);
    if current < demand && growable > 0 {
        let share = (demand - current) / growable as f64;
        for track in spanned.iter_mut().filter(|track| track.kind == span.class) {
            track.size += share;
        }
    }
}

/// Share what the other tracks leave of `available` among the fill tracks.
fn fill_remainder(tracks: &mut [Track], available: f64) {
    let taken: f64 = tracks
        .iter()
        .filter(|track| track.kind != TrackKind::FillRemainder)
        .map(|track| track.size)
        .sum();
    let remaining = (available - taken).max(0.0);
    for track in tracks.iter_mut().filter(|track| track.kind == TrackKind::FillRemainder) {
        track.size = remaining * track.proportion;
    }
}

/// Rescale content-sized fill tracks so their sizes follow their weights.
///
/// The largest weighted fill track is kept as is and fixes the size of one
/// unit of weight.
fn scale_to_anchor(tracks: &mut [Track]) {
    let anchor = tracks
        .iter()
        .filter(|track| track.kind == TrackKind::FillRemainder && track.proportion > 0.0)
        .fold(None, |anchor: Option<&Track>, track| match anchor {
            Some(anchor) if anchor.size >= track.size => Some(anchor),
            _ => Some(track),
        });
    let unit = anchor.map_or(0.0, |anchor| anchor.size / anchor.proportion);
    for track in tracks.iter_mut().filter(|track| track.kind == TrackKind::FillRemainder) {
        track.size = unit * track.proportion;
    }
}
