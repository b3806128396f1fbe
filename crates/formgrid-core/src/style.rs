//! Platform layout style: the default gaps, margins and button sizes that
//! seed the root variable scope of the track spec parser.

use crate::size::{ConstantSize, Size};

/// Default gaps and sizes for one platform look.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutStyle {
    /// Horizontal gap between a label and its component
    pub label_component_pad_x: ConstantSize,
    /// Vertical gap between a label above its component
    pub label_component_pad_y: ConstantSize,
    /// Horizontal gap between related components
    pub related_component_pad_x: ConstantSize,
    /// Vertical gap between related components
    pub related_component_pad_y: ConstantSize,
    /// Horizontal gap between unrelated components
    pub unrelated_component_pad_x: ConstantSize,
    /// Vertical gap between unrelated components
    pub unrelated_component_pad_y: ConstantSize,
    /// Gap between lines of a dense form
    pub narrow_line_pad: ConstantSize,
    /// Gap between lines of a form
    pub line_pad: ConstantSize,
    /// Gap between paragraphs
    pub paragraph_pad: ConstantSize,
    /// Left and right dialog margin
    pub dialog_margin_x: ConstantSize,
    /// Top and bottom dialog margin
    pub dialog_margin_y: ConstantSize,
    /// Minimum width of a command button
    pub default_button_width: ConstantSize,
    /// Minimum height of a command button
    pub default_button_height: ConstantSize,
}

impl LayoutStyle {
    /// Column size of a command button: its preferred width, at least the
    /// default button width.
    pub fn button_column_size(&self) -> Size {
        Size::at_least(Size::PREFERRED, self.default_button_width.into())
    }

    /// Row size of a command button.
    pub fn button_row_size(&self) -> Size {
        Size::at_least(Size::PREFERRED, self.default_button_height.into())
    }
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            label_component_pad_x: ConstantSize::dialog_units(3.0),
            label_component_pad_y: ConstantSize::dialog_units(3.0),
            related_component_pad_x: ConstantSize::dialog_units(4.0),
            related_component_pad_y: ConstantSize::dialog_units(3.0),
            unrelated_component_pad_x: ConstantSize::dialog_units(7.0),
            unrelated_component_pad_y: ConstantSize::dialog_units(7.0),
            narrow_line_pad: ConstantSize::dialog_units(2.0),
            line_pad: ConstantSize::dialog_units(3.0),
            paragraph_pad: ConstantSize::dialog_units(9.0),
            dialog_margin_x: ConstantSize::dialog_units(7.0),
            dialog_margin_y: ConstantSize::dialog_units(7.0),
            default_button_width: ConstantSize::dialog_units(50.0),
            default_button_height: ConstantSize::dialog_units(14.0),
        }
    }
}
