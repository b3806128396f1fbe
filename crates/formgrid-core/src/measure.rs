//! The measurement boundary towards the host toolkit.

use std::collections::HashMap;

use crate::types::{Axis, ComponentId};

/// Which size of a component to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureMode {
    Minimum,
    Preferred,
}

/// Answers size requests for components.
///
/// The layout never measures widgets itself; the host toolkit implements this
/// trait over its live widget tree. Closures of the shape
/// `Fn(ComponentId, Axis, MeasureMode) -> i32` implement it directly.
pub trait Measure {
    /// Size of `component` along `axis` in pixels.
    fn measure(&self, component: ComponentId, axis: Axis, mode: MeasureMode) -> i32;

    /// Whether `component` currently takes part in layout.
    fn is_visible(&self, _component: ComponentId) -> bool {
        true
    }
}

impl<F> Measure for F
where
    F: Fn(ComponentId, Axis, MeasureMode) -> i32,
{
    fn measure(&self, component: ComponentId, axis: Axis, mode: MeasureMode) -> i32 {
        self(component, axis, mode)
    }
}

/// Minimum and preferred size of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentMeasures {
    pub min_width: i32,
    pub min_height: i32,
    pub pref_width: i32,
    pub pref_height: i32,
    pub visible: bool,
}

impl ComponentMeasures {
    /// A component whose minimum and preferred sizes agree.
    pub fn fixed(width: i32, height: i32) -> Self {
        Self::new((width, height), (width, height))
    }

    pub fn new(min: (i32, i32), pref: (i32, i32)) -> Self {
        Self {
            min_width: min.0,
            min_height: min.1,
            pref_width: pref.0,
            pref_height: pref.1,
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn get(&self, axis: Axis, mode: MeasureMode) -> i32 {
        match (axis, mode) {
            (Axis::Column, MeasureMode::Minimum) => self.min_width,
            (Axis::Column, MeasureMode::Preferred) => self.pref_width,
            (Axis::Row, MeasureMode::Minimum) => self.min_height,
            (Axis::Row, MeasureMode::Preferred) => self.pref_height,
        }
    }
}

/// A frozen set of component measurements.
///
/// Useful for headless layout and tests; unknown components measure as zero.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureSnapshot {
    components: HashMap<ComponentId, ComponentMeasures>,
}

impl MeasureSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: ComponentId, measures: ComponentMeasures) {
        self.components.insert(component, measures);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, component: ComponentId, measures: ComponentMeasures) -> Self {
        self.insert(component, measures);
        self
    }

    pub fn get(&self, component: ComponentId) -> Option<&ComponentMeasures> {
        self.components.get(&component)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Measure for MeasureSnapshot {
    fn measure(&self, component: ComponentId, axis: Axis, mode: MeasureMode) -> i32 {
        self.components
            .get(&component)
            .map_or(0, |measures| measures.get(axis, mode))
    }

    fn is_visible(&self, component: ComponentId) -> bool {
        self.components
            .get(&component)
            .map_or(true, |measures| measures.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_measures() {
        let snapshot = MeasureSnapshot::new()
            .with(ComponentId(1), ComponentMeasures::new((10, 5), (40, 20)))
            .with(ComponentId(2), ComponentMeasures::fixed(7, 7).hidden());

        assert_eq!(snapshot.measure(ComponentId(1), Axis::Column, MeasureMode::Minimum), 10);
        assert_eq!(snapshot.measure(ComponentId(1), Axis::Row, MeasureMode::Preferred), 20);
        assert_eq!(snapshot.measure(ComponentId(9), Axis::Row, MeasureMode::Preferred), 0);
        assert!(snapshot.is_visible(ComponentId(1)));
        assert!(!snapshot.is_visible(ComponentId(2)));
        assert!(snapshot.is_visible(ComponentId(9)));
    }

    #[test]
    fn test_closure_measure() {
        let measure = |_c: ComponentId, axis: Axis, _mode: MeasureMode| match axis {
            Axis::Column => 3,
            Axis::Row => 4,
        };
        assert_eq!(measure.measure(ComponentId(0), Axis::Row, MeasureMode::Minimum), 4);
        assert!(measure.is_visible(ComponentId(0)));
    }
}
