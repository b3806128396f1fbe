//! Grid definition and layout resolution for formgrid forms.
//!
//! A [`FormLayout`] holds column and row specs, track groups, and the cell
//! constraints of every placed component. Resolving it against a
//! [`Measure`](formgrid_core::Measure) implementation and a container yields
//! the track origins ([`LayoutInfo`]) and the bounds of every component
//! ([`Layout`]).
//!
//! # Example
//!
//! ```
//! use formgrid_core::{CellConstraints, ComponentId, ComponentMeasures, MeasureSnapshot};
//! use formgrid_layout::{Bounds, FormLayout};
//!
//! let mut form = FormLayout::parse("pref", "pref").unwrap();
//! form.set_constraints(ComponentId(1), CellConstraints::xy(1, 1)).unwrap();
//!
//! let measures = MeasureSnapshot::new().with(ComponentId(1), ComponentMeasures::fixed(50, 20));
//! let layout = form.layout(&measures, Bounds::sized(50, 20));
//! assert_eq!(layout.bounds(ComponentId(1)), Some(Bounds::new(0, 0, 50, 20)));
//! ```

mod bounds;
mod form;
mod info;
mod resolve;

pub use bounds::{Bounds, Dimension};
pub use form::FormLayout;
pub use info::{Layout, LayoutInfo};
