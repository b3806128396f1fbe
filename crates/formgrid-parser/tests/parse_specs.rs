use std::sync::Arc;

use formgrid_core::{Alignment, Axis, LayoutStyle, ParseError, Size, TrackSpec, Unit};
use formgrid_parser::{
    parse_column_spec, parse_column_specs, parse_row_spec, parse_row_specs, parse_track_spec,
    LayoutMap, ParseOptions,
};
use proptest::prelude::*;

fn root() -> LayoutMap {
    LayoutMap::root(&LayoutStyle::default())
}

#[test]
fn test_typical_dialog_columns() {
    let specs = parse_column_specs("$dm, right:pref, $lcgap, 50dlu:grow, $rgap, $b, $dm", &root())
        .unwrap();
    assert_eq!(specs.len(), 7);
    assert_eq!(specs[0].size(), &Size::dialog_units(7.0));
    assert_eq!(specs[1].alignment(), Alignment::Right);
    assert_eq!(specs[2].size(), &Size::dialog_units(3.0));
    assert!(specs[3].can_grow());
    assert_eq!(specs[4].size(), &Size::dialog_units(4.0));
    assert_eq!(specs[5].size(), &Size::at_least(Size::PREFERRED, Size::dialog_units(50.0)));
}

#[test]
fn test_typical_dialog_rows() {
    let specs = parse_row_specs("p, $lg, p, $pg, 3*(p, $nlg), fill:0px:grow", &root()).unwrap();
    assert_eq!(specs.len(), 11);
    assert_eq!(specs[1].size(), &Size::dialog_units(3.0));
    assert_eq!(specs[3].size(), &Size::dialog_units(9.0));
    assert_eq!(specs[5].size(), &Size::dialog_units(2.0));
    assert_eq!(specs[10].alignment(), Alignment::Fill);
    assert!(specs[10].can_grow());
}

#[test]
fn test_axis_specific_variables() {
    // `rgap` is 4dlu between columns but 3dlu between rows.
    assert_eq!(
        parse_column_specs("$rgap", &root()).unwrap()[0].size(),
        &Size::dialog_units(4.0)
    );
    assert_eq!(
        parse_row_specs("$rgap", &root()).unwrap()[0].size(),
        &Size::dialog_units(3.0)
    );
    assert!(matches!(
        parse_column_specs("$pgap", &root()),
        Err(ParseError::MissingVariable { axis: Axis::Column, .. })
    ));
}

#[test]
fn test_scoped_variables_override_root() {
    let child = LayoutMap::child_of(Arc::new(root())).with_column_variable("lcgap", "5px");
    let specs = parse_column_specs("pref, $lcgap, pref", &child).unwrap();
    assert_eq!(specs[1].size(), &Size::pixels(5.0));
}

#[test]
fn test_default_unit_is_configurable() {
    let options = ParseOptions {
        default_unit: Unit::Pixel,
    };
    let spec = parse_track_spec(Axis::Row, "12", &options).unwrap();
    assert_eq!(spec.size(), &Size::pixels(12.0));
    assert_eq!(parse_row_spec("12").unwrap().size(), &Size::dialog_units(12.0));
}

#[test]
fn test_empty_list_yields_no_tracks() {
    assert!(parse_column_specs("", &root()).unwrap().is_empty());
    assert!(parse_column_specs("pref,,pref", &root()).is_err());
}

fn any_unit() -> impl Strategy<Value = Unit> + Clone {
    prop_oneof![
        Just(Unit::Pixel),
        Just(Unit::Point),
        Just(Unit::Millimeter),
        Just(Unit::Centimeter),
        Just(Unit::Inch),
        Just(Unit::DialogUnit),
    ]
}

fn any_logical() -> impl Strategy<Value = Size> {
    prop_oneof![Just(Size::MINIMUM), Just(Size::PREFERRED), Just(Size::DEFAULT)]
}

fn any_size() -> impl Strategy<Value = Size> {
    let constant = (0u32..1000, any_unit()).prop_map(|(value, unit)| Size::constant(f64::from(value), unit));
    prop_oneof![
        constant.clone(),
        any_logical(),
        (any_logical(), constant.clone()).prop_map(|(basis, lower)| Size::at_least(basis, lower)),
        (any_logical(), constant).prop_map(|(basis, upper)| Size::at_most(basis, upper)),
    ]
}

proptest! {
    #[test]
    fn prop_column_encoding_round_trips(
        size in any_size(),
        alignment in prop_oneof![
            Just(Alignment::Fill),
            Just(Alignment::Left),
            Just(Alignment::Center),
            Just(Alignment::Right),
        ],
        weight in prop_oneof![Just(0.0), Just(1.0), Just(0.5), Just(2.0), Just(0.25)],
    ) {
        let spec = TrackSpec::new(Axis::Column, alignment, size, weight).unwrap();
        let decoded = parse_column_spec(&spec.to_string()).unwrap();
        prop_assert_eq!(decoded, spec);
    }

    #[test]
    fn prop_multiplier_repeats(count in 1usize..8) {
        let specs = parse_row_specs(&format!("p, {count}*(3dlu, p)"), &root()).unwrap();
        prop_assert_eq!(specs.len(), 1 + 2 * count);
    }
}
