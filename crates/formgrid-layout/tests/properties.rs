use formgrid_core::{
    Axis, CellConstraints, ComponentId, ComponentMeasures, Measure, MeasureMode, MeasureSnapshot,
};
use formgrid_layout::{Bounds, FormLayout};
use proptest::prelude::*;

/// Six columns with mixed weights, four components in the first row and one
/// spanning columns 2 to 5 in the last row.
fn form() -> FormLayout {
    let mut form = FormLayout::parse(
        "right:pref, 3dlu, pref:grow, pref:grow(2), 10px, default:grow",
        "pref, 3dlu, pref",
    )
    .unwrap();
    for (id, column) in [(1, 1), (2, 3), (3, 4), (4, 6)] {
        form.set_constraints(ComponentId(id), CellConstraints::xy(column, 1)).unwrap();
    }
    form.set_constraints(ComponentId(5), CellConstraints::xyw(2, 3, 4)).unwrap();
    form
}

fn measures(widths: &[i32]) -> MeasureSnapshot {
    widths
        .iter()
        .enumerate()
        .fold(MeasureSnapshot::new(), |snapshot, (index, &width)| {
            snapshot.with(
                ComponentId(index as u64 + 1),
                ComponentMeasures::new((width / 2, 10), (width, 20)),
            )
        })
}

fn widths() -> impl Strategy<Value = Vec<i32>> {
    proptest::collection::vec(0i32..200, 5)
}

proptest! {
    #[test]
    fn prop_growth_is_monotonic(widths in widths(), extra in 0i32..400, step in 1i32..50) {
        let form = form();
        let measures = measures(&widths);
        let preferred = form.preferred_layout_size(&measures).width;

        let smaller = form.layout_info(&measures, Bounds::sized(preferred + extra, 50));
        let larger = form.layout_info(&measures, Bounds::sized(preferred + extra + step, 50));
        for (index, spec) in form.column_specs().iter().enumerate() {
            let before = smaller.track_sizes(Axis::Column)[index];
            let after = larger.track_sizes(Axis::Column)[index];
            if spec.can_grow() {
                prop_assert!(after >= before, "column {} shrank from {} to {}", index + 1, before, after);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn prop_grouped_columns_stay_equal(widths in widths(), width in 0i32..800) {
        let mut form = form();
        form.set_column_groups(&[&[1, 3], &[4, 6]]).unwrap();
        let measures = measures(&widths);

        let info = form.layout_info(&measures, Bounds::sized(width, 50));
        prop_assert_eq!(info.column_size(1), info.column_size(3));
        prop_assert_eq!(info.column_size(4), info.column_size(6));
    }

    #[test]
    fn prop_spans_get_their_preferred_size(widths in widths(), extra in 0i32..400) {
        let form = form();
        let measures = measures(&widths);
        let preferred = form.preferred_layout_size(&measures).width;

        let info = form.layout_info(&measures, Bounds::sized(preferred + extra, 50));
        let spanned: i32 = (2..=5).filter_map(|column| info.column_size(column)).sum();
        let required = measures.measure(ComponentId(5), Axis::Column, MeasureMode::Preferred);
        prop_assert!(spanned >= required);
    }

    #[test]
    fn prop_layout_is_idempotent(widths in widths(), width in 0i32..800, height in 0i32..200) {
        let form = form();
        let measures = measures(&widths);
        let container = Bounds::sized(width, height);
        prop_assert_eq!(form.layout(&measures, container), form.layout(&measures, container));
    }

    #[test]
    fn prop_origins_fill_the_container_when_anything_grows(widths in widths(), extra in 0i32..400) {
        let measures = measures(&widths);
        // Column 1 never grows and column 3 does, columns 4 and 6 grow outside any group.
        let mut grouped = form();
        grouped.set_column_groups(&[&[1, 3]]).unwrap();

        for form in [form(), grouped] {
            let preferred = form.preferred_layout_size(&measures).width;
            let info = form.layout_info(&measures, Bounds::sized(preferred + extra, 50));
            prop_assert_eq!(info.width(), preferred + extra);
            prop_assert_eq!(info.column_origins.len(), form.column_count() + 1);
            if !form.column_groups().is_empty() {
                prop_assert_eq!(info.column_size(1), info.column_size(3));
            }
        }
    }
}
