//! The grid definition: column and row specs, groups and placements.

use std::sync::Arc;

use formgrid_core::{
    Axis, CellConstraints, ComponentId, FormError, LayoutError, LayoutStyle, Measure, TrackGroup,
    TrackSpec, UnitConverter,
};
use formgrid_parser::{parse_cell_constraints, parse_track_specs, LayoutMap, ParseOptions};
use indexmap::IndexMap;
use tracing::debug;

use crate::bounds::{Bounds, Dimension};
use crate::info::{Layout, LayoutInfo};
use crate::resolve::Resolver;

/// A grid of columns and rows that places components in cells.
///
/// Track indices are 1-based throughout. Placements keep the order in which
/// components were first added.
///
/// # Example
///
/// ```
/// use formgrid_core::{CellConstraints, ComponentId, ComponentMeasures, MeasureSnapshot};
/// use formgrid_layout::{Bounds, FormLayout};
///
/// let mut form = FormLayout::parse("right:pref, 3dlu, 50dlu:grow", "pref").unwrap();
/// form.set_constraints(ComponentId(1), CellConstraints::xy(1, 1)).unwrap();
/// form.set_constraints(ComponentId(2), CellConstraints::xy(3, 1)).unwrap();
///
/// let measures = MeasureSnapshot::new()
///     .with(ComponentId(1), ComponentMeasures::fixed(40, 16))
///     .with(ComponentId(2), ComponentMeasures::fixed(60, 20));
/// let layout = form.layout(&measures, Bounds::sized(300, 20));
/// assert_eq!(layout.info.width(), 300);
/// ```
#[derive(Debug, Clone)]
pub struct FormLayout {
    column_specs: Vec<TrackSpec>,
    row_specs: Vec<TrackSpec>,
    column_groups: Vec<TrackGroup>,
    row_groups: Vec<TrackGroup>,
    constraints: IndexMap<ComponentId, CellConstraints>,
    converter: Arc<UnitConverter>,
    honors_visibility: bool,
}

impl Default for FormLayout {
    fn default() -> Self {
        Self {
            column_specs: Vec::new(),
            row_specs: Vec::new(),
            column_groups: Vec::new(),
            row_groups: Vec::new(),
            constraints: IndexMap::new(),
            converter: Arc::new(UnitConverter::default()),
            honors_visibility: true,
        }
    }
}

impl FormLayout {
    /// Create a layout from column and row specs.
    pub fn new(columns: Vec<TrackSpec>, rows: Vec<TrackSpec>) -> Result<Self, LayoutError> {
        check_axis(Axis::Column, &columns)?;
        check_axis(Axis::Row, &rows)?;
        Ok(Self {
            column_specs: columns,
            row_specs: rows,
            ..Self::default()
        })
    }

    /// Create a layout from encoded column and row specs, resolving variables
    /// against the default layout style.
    pub fn parse(columns: &str, rows: &str) -> Result<Self, FormError> {
        Self::parse_with(columns, rows, &LayoutMap::root(&LayoutStyle::default()))
    }

    /// Create a layout from encoded specs, resolving variables against `map`.
    pub fn parse_with(columns: &str, rows: &str, map: &LayoutMap) -> Result<Self, FormError> {
        let options = ParseOptions::default();
        let columns = parse_track_specs(Axis::Column, columns, map, &options)?;
        let rows = parse_track_specs(Axis::Row, rows, map, &options)?;
        Ok(Self::new(columns, rows)?)
    }

    /// Use `converter` for constant sizes instead of the default one.
    pub fn with_unit_converter(mut self, converter: Arc<UnitConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn unit_converter(&self) -> &Arc<UnitConverter> {
        &self.converter
    }

    /// Whether invisible components are left out of track sizing.
    pub fn honors_visibility(&self) -> bool {
        self.honors_visibility
    }

    pub fn set_honors_visibility(&mut self, honors_visibility: bool) {
        self.honors_visibility = honors_visibility;
    }

    // Tracks

    pub fn column_count(&self) -> usize {
        self.column_specs.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_specs.len()
    }

    pub fn track_count(&self, axis: Axis) -> usize {
        self.specs(axis).len()
    }

    pub fn column_spec(&self, index: usize) -> Result<&TrackSpec, LayoutError> {
        self.track_spec(Axis::Column, index)
    }

    pub fn row_spec(&self, index: usize) -> Result<&TrackSpec, LayoutError> {
        self.track_spec(Axis::Row, index)
    }

    pub fn column_specs(&self) -> &[TrackSpec] {
        &self.column_specs
    }

    pub fn row_specs(&self) -> &[TrackSpec] {
        &self.row_specs
    }

    pub fn track_spec(&self, axis: Axis, index: usize) -> Result<&TrackSpec, LayoutError> {
        self.check_index(axis, index, self.track_count(axis))?;
        Ok(&self.specs(axis)[index - 1])
    }

    pub fn set_column_spec(&mut self, index: usize, spec: TrackSpec) -> Result<(), LayoutError> {
        self.set_track_spec(Axis::Column, index, spec)
    }

    pub fn set_row_spec(&mut self, index: usize, spec: TrackSpec) -> Result<(), LayoutError> {
        self.set_track_spec(Axis::Row, index, spec)
    }

    pub fn set_track_spec(&mut self, axis: Axis, index: usize, spec: TrackSpec) -> Result<(), LayoutError> {
        self.check_index(axis, index, self.track_count(axis))?;
        if spec.axis() != axis {
            return Err(LayoutError::SpecAxisMismatch { axis, index });
        }
        self.specs_mut(axis)[index - 1] = spec;
        Ok(())
    }

    pub fn append_column(&mut self, spec: TrackSpec) -> Result<(), LayoutError> {
        self.insert_track(Axis::Column, self.column_count() + 1, spec)
    }

    pub fn append_row(&mut self, spec: TrackSpec) -> Result<(), LayoutError> {
        self.insert_track(Axis::Row, self.row_count() + 1, spec)
    }

    pub fn insert_column(&mut self, index: usize, spec: TrackSpec) -> Result<(), LayoutError> {
        self.insert_track(Axis::Column, index, spec)
    }

    pub fn insert_row(&mut self, index: usize, spec: TrackSpec) -> Result<(), LayoutError> {
        self.insert_track(Axis::Row, index, spec)
    }

    /// Insert `spec` so that it becomes track `index`.
    ///
    /// Placements starting at or after `index` move one track further;
    /// placements spanning across it widen by one. Group indices shift too.
    pub fn insert_track(&mut self, axis: Axis, index: usize, spec: TrackSpec) -> Result<(), LayoutError> {
        let count = self.track_count(axis);
        self.check_index(axis, index, count + 1)?;
        if spec.axis() != axis {
            return Err(LayoutError::SpecAxisMismatch { axis, index });
        }

        self.specs_mut(axis).insert(index - 1, spec);
        for group in self.groups_mut(axis) {
            for track in group.iter_mut().filter(|track| **track >= index) {
                *track += 1;
            }
        }
        if index <= count {
            for cc in self.constraints.values_mut() {
                cc.track_inserted(axis, index);
            }
            debug!(%axis, index, "inserted track, shifted placements");
        }
        Ok(())
    }

    pub fn remove_column(&mut self, index: usize) -> Result<TrackSpec, LayoutError> {
        self.remove_track(Axis::Column, index)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<TrackSpec, LayoutError> {
        self.remove_track(Axis::Row, index)
    }

    /// Remove track `index` and return its spec.
    ///
    /// Fails without changing anything if a component starts in the track or
    /// the track belongs to a group. Spans crossing the track shrink by one.
    pub fn remove_track(&mut self, axis: Axis, index: usize) -> Result<TrackSpec, LayoutError> {
        self.check_index(axis, index, self.track_count(axis))?;
        if self.groups(axis).iter().any(|group| group.contains(&index)) {
            return Err(LayoutError::TrackIsGrouped { axis, index });
        }

        let mut shifted = self.constraints.clone();
        for cc in shifted.values_mut() {
            cc.track_removed(axis, index)?;
        }

        self.constraints = shifted;
        for group in self.groups_mut(axis) {
            for track in group.iter_mut().filter(|track| **track > index) {
                *track -= 1;
            }
        }
        debug!(%axis, index, "removed track, shifted placements");
        Ok(self.specs_mut(axis).remove(index - 1))
    }

    // Groups

    pub fn column_groups(&self) -> &[TrackGroup] {
        &self.column_groups
    }

    pub fn row_groups(&self) -> &[TrackGroup] {
        &self.row_groups
    }

    pub fn groups(&self, axis: Axis) -> &[TrackGroup] {
        match axis {
            Axis::Column => &self.column_groups,
            Axis::Row => &self.row_groups,
        }
    }

    /// Replace all column groups. Each inner slice lists 1-based columns
    /// that resolve to the same width.
    pub fn set_column_groups(&mut self, groups: &[&[usize]]) -> Result<(), LayoutError> {
        self.set_groups(Axis::Column, groups)
    }

    pub fn set_row_groups(&mut self, groups: &[&[usize]]) -> Result<(), LayoutError> {
        self.set_groups(Axis::Row, groups)
    }

    pub fn set_groups(&mut self, axis: Axis, groups: &[&[usize]]) -> Result<(), LayoutError> {
        let groups = groups
            .iter()
            .map(|group| self.checked_group(axis, group))
            .collect::<Result<Vec<_>, _>>()?;
        *self.groups_mut(axis) = groups;
        Ok(())
    }

    pub fn add_column_group(&mut self, group: &[usize]) -> Result<(), LayoutError> {
        self.add_group(Axis::Column, group)
    }

    pub fn add_row_group(&mut self, group: &[usize]) -> Result<(), LayoutError> {
        self.add_group(Axis::Row, group)
    }

    pub fn add_group(&mut self, axis: Axis, group: &[usize]) -> Result<(), LayoutError> {
        let group = self.checked_group(axis, group)?;
        self.groups_mut(axis).push(group);
        Ok(())
    }

    /// Add column `index` to the last column group, creating one if needed.
    pub fn add_grouped_column(&mut self, index: usize) -> Result<(), LayoutError> {
        self.add_grouped_track(Axis::Column, index)
    }

    pub fn add_grouped_row(&mut self, index: usize) -> Result<(), LayoutError> {
        self.add_grouped_track(Axis::Row, index)
    }

    fn add_grouped_track(&mut self, axis: Axis, index: usize) -> Result<(), LayoutError> {
        self.check_group_index(axis, index)?;
        let groups = self.groups_mut(axis);
        match groups.last_mut() {
            Some(last) if !last.contains(&index) => last.push(index),
            Some(_) => {}
            None => groups.push(TrackGroup::from_slice(&[index])),
        }
        Ok(())
    }

    // Placements

    /// Place `component`, replacing any earlier placement.
    pub fn set_constraints(
        &mut self,
        component: ComponentId,
        constraints: CellConstraints,
    ) -> Result<(), LayoutError> {
        constraints.validate(self.column_count(), self.row_count())?;
        self.constraints.insert(component, constraints);
        Ok(())
    }

    /// Place `component` using encoded constraints such as `"1, 3, 2, 1"`.
    pub fn set_encoded_constraints(&mut self, component: ComponentId, encoded: &str) -> Result<(), FormError> {
        let constraints = parse_cell_constraints(encoded)?;
        Ok(self.set_constraints(component, constraints)?)
    }

    pub fn constraints(&self, component: ComponentId) -> Result<&CellConstraints, LayoutError> {
        self.constraints
            .get(&component)
            .ok_or_else(|| LayoutError::UnknownComponent {
                component: component.to_string(),
            })
    }

    /// Forget the placement of `component`.
    pub fn remove_component(&mut self, component: ComponentId) -> Option<CellConstraints> {
        self.constraints.shift_remove(&component)
    }

    /// Placed components in placement order.
    pub fn components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.constraints.keys().copied()
    }

    pub fn placements(&self) -> impl Iterator<Item = (ComponentId, &CellConstraints)> + '_ {
        self.constraints.iter().map(|(&id, cc)| (id, cc))
    }

    pub fn component_count(&self) -> usize {
        self.constraints.len()
    }

    // Layout

    /// Track origins for `container`.
    pub fn layout_info(&self, measure: &dyn Measure, container: Bounds) -> LayoutInfo {
        Resolver::new(self, measure).layout_info(container)
    }

    /// Track origins and component bounds for `container`.
    pub fn layout(&self, measure: &dyn Measure, container: Bounds) -> Layout {
        Resolver::new(self, measure).layout(container)
    }

    /// Size at which every track gets its minimum size.
    pub fn minimum_layout_size(&self, measure: &dyn Measure) -> Dimension {
        Resolver::new(self, measure).minimum_size()
    }

    /// Size at which every track gets its preferred size.
    pub fn preferred_layout_size(&self, measure: &dyn Measure) -> Dimension {
        Resolver::new(self, measure).preferred_size()
    }

    pub(crate) fn specs(&self, axis: Axis) -> &[TrackSpec] {
        match axis {
            Axis::Column => &self.column_specs,
            Axis::Row => &self.row_specs,
        }
    }

    fn specs_mut(&mut self, axis: Axis) -> &mut Vec<TrackSpec> {
        match axis {
            Axis::Column => &mut self.column_specs,
            Axis::Row => &mut self.row_specs,
        }
    }

    fn groups_mut(&mut self, axis: Axis) -> &mut Vec<TrackGroup> {
        match axis {
            Axis::Column => &mut self.column_groups,
            Axis::Row => &mut self.row_groups,
        }
    }

    fn check_index(&self, axis: Axis, index: usize, count: usize) -> Result<(), LayoutError> {
        if index == 0 || index > count {
            return Err(LayoutError::IndexOutOfRange { axis, index, count });
        }
        Ok(())
    }

    fn check_group_index(&self, axis: Axis, index: usize) -> Result<(), LayoutError> {
        let count = self.track_count(axis);
        if index == 0 || index > count {
            return Err(LayoutError::InvalidGroupIndex { axis, index, count });
        }
        Ok(())
    }

    fn checked_group(&self, axis: Axis, group: &[usize]) -> Result<TrackGroup, LayoutError> {
        let mut checked = TrackGroup::new();
        for &index in group {
            self.check_group_index(axis, index)?;
            if !checked.contains(&index) {
                checked.push(index);
            }
        }
        Ok(checked)
    }
}

fn check_axis(axis: Axis, specs: &[TrackSpec]) -> Result<(), LayoutError> {
    match specs.iter().position(|spec| spec.axis() != axis) {
        Some(position) => Err(LayoutError::SpecAxisMismatch {
            axis,
            index: position + 1,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use formgrid_core::{Alignment, ParseError, Size};

    use super::*;

    fn form() -> FormLayout {
        FormLayout::parse("pref, 3dlu, pref, 3dlu, pref", "pref, 3dlu, pref").unwrap()
    }

    #[test]
    fn test_parse_counts_tracks() {
        let form = form();
        assert_eq!(form.column_count(), 5);
        assert_eq!(form.row_count(), 3);
        assert_eq!(form.column_spec(2).unwrap().size(), &Size::dialog_units(3.0));
        assert_eq!(form.row_spec(1).unwrap().alignment(), Alignment::Center);
        assert!(form.honors_visibility());
    }

    #[test]
    fn test_parse_reports_bad_specs() {
        assert!(matches!(
            FormLayout::parse("pref, left:foo", "pref"),
            Err(FormError::Parse(ParseError::MalformedSpec { .. }))
        ));
        assert!(matches!(
            FormLayout::parse("pref", "$nope"),
            Err(FormError::Parse(ParseError::MissingVariable { .. }))
        ));
    }

    #[test]
    fn test_new_rejects_specs_of_the_other_axis() {
        let err = FormLayout::new(vec![TrackSpec::column(Size::PREFERRED)], vec![TrackSpec::column(Size::PREFERRED)])
            .unwrap_err();
        assert_eq!(err, LayoutError::SpecAxisMismatch { axis: Axis::Row, index: 1 });
    }

    #[test]
    fn test_set_constraints_validates_range() {
        let mut form = form();
        assert_eq!(
            form.set_constraints(ComponentId(1), CellConstraints::xyw(4, 1, 3)),
            Err(LayoutError::PlacementOutOfRange {
                axis: Axis::Column,
                start: 4,
                end: 6,
                count: 5
            })
        );
        assert_eq!(
            form.set_constraints(ComponentId(1), CellConstraints::xywh(1, 1, 0, 1)),
            Err(LayoutError::InvalidSpan { axis: Axis::Column, span: 0 })
        );
        assert!(form.set_constraints(ComponentId(1), CellConstraints::xyw(3, 1, 3)).is_ok());
        assert_eq!(form.component_count(), 1);
    }

    #[test]
    fn test_set_encoded_constraints() {
        let mut form = form();
        form.set_encoded_constraints(ComponentId(7), "1, 3, 5, 1").unwrap();
        assert_eq!(form.constraints(ComponentId(7)).unwrap(), &CellConstraints::xywh(1, 3, 5, 1));
        assert!(matches!(
            form.set_encoded_constraints(ComponentId(7), "1, 4"),
            Err(FormError::Layout(LayoutError::PlacementOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_components_keep_placement_order() {
        let mut form = form();
        for id in [3, 1, 2] {
            form.set_constraints(ComponentId(id), CellConstraints::xy(1, 1)).unwrap();
        }
        form.set_constraints(ComponentId(1), CellConstraints::xy(3, 1)).unwrap();
        assert_eq!(
            form.components().collect::<Vec<_>>(),
            vec![ComponentId(3), ComponentId(1), ComponentId(2)]
        );

        assert!(form.remove_component(ComponentId(1)).is_some());
        assert!(form.remove_component(ComponentId(1)).is_none());
        assert_eq!(form.components().collect::<Vec<_>>(), vec![ComponentId(3), ComponentId(2)]);
        assert!(matches!(
            form.constraints(ComponentId(1)),
            Err(LayoutError::UnknownComponent { .. })
        ));
    }

    #[test]
    fn test_insert_column_shifts_placements_and_groups() {
        let mut form = form();
        form.set_constraints(ComponentId(1), CellConstraints::xy(1, 1)).unwrap();
        form.set_constraints(ComponentId(2), CellConstraints::xy(3, 1)).unwrap();
        form.set_constraints(ComponentId(3), CellConstraints::xyw(1, 3, 5)).unwrap();
        form.set_column_groups(&[&[1, 3, 5]]).unwrap();

        form.insert_column(2, TrackSpec::column(Size::dialog_units(4.0))).unwrap();

        assert_eq!(form.column_count(), 6);
        assert_eq!(form.constraints(ComponentId(1)).unwrap().column, 1);
        assert_eq!(form.constraints(ComponentId(2)).unwrap().column, 4);
        assert_eq!(form.constraints(ComponentId(3)).unwrap().column_span, 6);
        assert_eq!(form.column_groups()[0].as_slice(), &[1, 4, 6]);
    }

    #[test]
    fn test_append_keeps_placements() {
        let mut form = form();
        form.set_constraints(ComponentId(1), CellConstraints::xyw(1, 1, 5)).unwrap();
        form.append_column(TrackSpec::glue(Axis::Column)).unwrap();
        assert_eq!(form.column_count(), 6);
        assert_eq!(form.constraints(ComponentId(1)).unwrap().column_span, 5);
    }

    #[test]
    fn test_insert_rejects_bad_index_and_axis() {
        let mut form = form();
        assert_eq!(
            form.insert_row(0, TrackSpec::row(Size::PREFERRED)),
            Err(LayoutError::IndexOutOfRange { axis: Axis::Row, index: 0, count: 4 })
        );
        assert_eq!(
            form.insert_row(1, TrackSpec::column(Size::PREFERRED)),
            Err(LayoutError::SpecAxisMismatch { axis: Axis::Row, index: 1 })
        );
    }

    #[test]
    fn test_remove_row() {
        let mut form = form();
        form.set_constraints(ComponentId(1), CellConstraints::xywh(1, 1, 1, 3)).unwrap();
        form.set_constraints(ComponentId(2), CellConstraints::xy(1, 3)).unwrap();

        let removed = form.remove_row(2).unwrap();
        assert_eq!(removed.size(), &Size::dialog_units(3.0));
        assert_eq!(form.row_count(), 2);
        assert_eq!(form.constraints(ComponentId(1)).unwrap().row_span, 2);
        assert_eq!(form.constraints(ComponentId(2)).unwrap().row, 2);
    }

    #[test]
    fn test_remove_rejects_occupied_or_grouped_tracks() {
        let mut form = form();
        form.set_constraints(ComponentId(1), CellConstraints::xy(1, 1)).unwrap();
        form.set_constraints(ComponentId(2), CellConstraints::xy(5, 3)).unwrap();
        form.add_column_group(&[3, 5]).unwrap();

        assert_eq!(
            form.remove_column(5),
            Err(LayoutError::TrackIsGrouped { axis: Axis::Column, index: 5 })
        );
        assert_eq!(
            form.remove_row(3),
            Err(LayoutError::TrackHoldsComponent { axis: Axis::Row, index: 3 })
        );
        // A failed removal leaves every placement untouched.
        assert_eq!(form.row_count(), 3);
        assert_eq!(form.constraints(ComponentId(2)).unwrap().row, 3);

        form.remove_column(4).unwrap();
        assert_eq!(form.column_groups()[0].as_slice(), &[3, 4]);
        assert_eq!(form.constraints(ComponentId(2)).unwrap().column, 4);
    }

    #[test]
    fn test_groups() {
        let mut form = form();
        assert_eq!(
            form.set_column_groups(&[&[1, 6]]),
            Err(LayoutError::InvalidGroupIndex { axis: Axis::Column, index: 6, count: 5 })
        );
        assert!(form.column_groups().is_empty());

        form.add_grouped_column(1).unwrap();
        form.add_grouped_column(3).unwrap();
        form.add_grouped_column(3).unwrap();
        form.add_row_group(&[1, 3]).unwrap();
        form.add_grouped_row(2).unwrap();

        assert_eq!(form.column_groups().len(), 1);
        assert_eq!(form.column_groups()[0].as_slice(), &[1, 3]);
        assert_eq!(form.row_groups()[0].as_slice(), &[1, 3, 2]);
    }

    #[test]
    fn test_set_track_spec() {
        let mut form = form();
        form.set_column_spec(1, TrackSpec::column(Size::MINIMUM).grow()).unwrap();
        assert!(form.column_spec(1).unwrap().can_grow());
        assert!(form.set_row_spec(4, TrackSpec::row(Size::MINIMUM)).is_err());
        assert!(matches!(form.column_spec(9), Err(LayoutError::IndexOutOfRange { .. })));
    }
}
