//! Named variables for encoded column and row specs.
//!
//! A [`LayoutMap`] maps variable names to encoded spec text, separately for
//! columns and rows. Maps form an immutable scope chain: lookups that miss in
//! a map continue in its parent. Encoded specs refer to variables as `$name`
//! or `${name}`; expansion happens before parsing and is recursive.

use std::sync::Arc;

use formgrid_core::{Axis, LayoutStyle, ParseError};
use indexmap::IndexMap;

use crate::lexer::variable;

#[derive(Debug, Clone, Default)]
struct Table {
    values: IndexMap<String, String>,
    aliases: IndexMap<String, String>,
}

/// A scope of column and row variables.
#[derive(Debug, Clone, Default)]
pub struct LayoutMap {
    parent: Option<Arc<LayoutMap>>,
    columns: Table,
    rows: Table,
}

impl LayoutMap {
    /// An empty map without parent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A root map holding the gaps and sizes of `style`.
    pub fn root(style: &LayoutStyle) -> Self {
        let button_column = style.button_column_size().to_string();
        let button_row = style.button_row_size().to_string();

        Self::empty()
            .with_variable(Axis::Column, "label-component-gap", style.label_component_pad_x.to_string())
            .with_alias(Axis::Column, "lcg", "label-component-gap")
            .with_alias(Axis::Column, "lcgap", "label-component-gap")
            .with_variable(Axis::Column, "related-gap", style.related_component_pad_x.to_string())
            .with_alias(Axis::Column, "rg", "related-gap")
            .with_alias(Axis::Column, "rgap", "related-gap")
            .with_variable(Axis::Column, "unrelated-gap", style.unrelated_component_pad_x.to_string())
            .with_alias(Axis::Column, "ug", "unrelated-gap")
            .with_alias(Axis::Column, "ugap", "unrelated-gap")
            .with_variable(Axis::Column, "button", button_column.clone())
            .with_alias(Axis::Column, "b", "button")
            .with_variable(Axis::Column, "growing-button", format!("{button_column}:grow"))
            .with_alias(Axis::Column, "gb", "growing-button")
            .with_variable(Axis::Column, "dialog-margin", style.dialog_margin_x.to_string())
            .with_alias(Axis::Column, "dm", "dialog-margin")
            .with_alias(Axis::Column, "dmargin", "dialog-margin")
            .with_variable(Axis::Column, "glue", "0px:grow")
            .with_variable(Axis::Row, "related-gap", style.related_component_pad_y.to_string())
            .with_alias(Axis::Row, "rg", "related-gap")
            .with_alias(Axis::Row, "rgap", "related-gap")
            .with_variable(Axis::Row, "unrelated-gap", style.unrelated_component_pad_y.to_string())
            .with_alias(Axis::Row, "ug", "unrelated-gap")
            .with_alias(Axis::Row, "ugap", "unrelated-gap")
            .with_variable(Axis::Row, "narrow-line-gap", style.narrow_line_pad.to_string())
            .with_alias(Axis::Row, "nlg", "narrow-line-gap")
            .with_alias(Axis::Row, "nlgap", "narrow-line-gap")
            .with_variable(Axis::Row, "line-gap", style.line_pad.to_string())
            .with_alias(Axis::Row, "lg", "line-gap")
            .with_alias(Axis::Row, "lgap", "line-gap")
            .with_variable(Axis::Row, "paragraph-gap", style.paragraph_pad.to_string())
            .with_alias(Axis::Row, "pg", "paragraph-gap")
            .with_alias(Axis::Row, "pgap", "paragraph-gap")
            .with_variable(Axis::Row, "label-component-gap", style.label_component_pad_y.to_string())
            .with_alias(Axis::Row, "lcg", "label-component-gap")
            .with_alias(Axis::Row, "lcgap", "label-component-gap")
            .with_variable(Axis::Row, "dialog-margin", style.dialog_margin_y.to_string())
            .with_alias(Axis::Row, "dm", "dialog-margin")
            .with_alias(Axis::Row, "dmargin", "dialog-margin")
            .with_variable(Axis::Row, "button", button_row)
            .with_alias(Axis::Row, "b", "button")
            .with_variable(Axis::Row, "glue", "0px:grow")
    }

    /// An empty scope whose misses continue in `parent`.
    pub fn child_of(parent: Arc<LayoutMap>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Define `name` on `axis`. Names are case-insensitive.
    pub fn with_variable(mut self, axis: Axis, name: &str, value: impl Into<String>) -> Self {
        self.table_mut(axis)
            .values
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Make `alias` refer to the variable `name` on `axis`.
    pub fn with_alias(mut self, axis: Axis, alias: &str, name: &str) -> Self {
        self.table_mut(axis)
            .aliases
            .insert(alias.to_ascii_lowercase(), name.to_ascii_lowercase());
        self
    }

    pub fn with_column_variable(self, name: &str, value: impl Into<String>) -> Self {
        self.with_variable(Axis::Column, name, value)
    }

    pub fn with_row_variable(self, name: &str, value: impl Into<String>) -> Self {
        self.with_variable(Axis::Row, name, value)
    }

    pub fn parent(&self) -> Option<&Arc<LayoutMap>> {
        self.parent.as_ref()
    }

    /// Look up a variable in this scope and its ancestors, resolving aliases.
    pub fn get(&self, axis: Axis, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        let key = self.canonical_name(axis, &name).unwrap_or(&name);
        self.scopes()
            .find_map(|scope| scope.table(axis).values.get(key))
            .map(String::as_str)
    }

    pub fn contains(&self, axis: Axis, name: &str) -> bool {
        self.get(axis, name).is_some()
    }

    /// Replace every variable reference in `input`, recursively.
    pub fn expand(&self, axis: Axis, input: &str) -> Result<String, ParseError> {
        let mut stack = Vec::new();
        self.expand_inner(axis, input, &mut stack)
    }

    fn expand_inner(
        &self,
        axis: Axis,
        input: &str,
        stack: &mut Vec<String>,
    ) -> Result<String, ParseError> {
        if !input.contains('$') {
            return Ok(input.to_string());
        }

        let mut output = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(offset) = rest.find('$') {
            output.push_str(&rest[..offset]);
            let (remaining, name) = variable(&rest[offset..]).map_err(|_| {
                ParseError::MissingVariable {
                    axis,
                    name: String::new(),
                }
            })?;
            let name = name.to_ascii_lowercase();

            if stack.contains(&name) {
                return Err(ParseError::RecursiveVariable { axis, name });
            }
            let value = self
                .get(axis, &name)
                .ok_or_else(|| ParseError::MissingVariable {
                    axis,
                    name: name.clone(),
                })?
                .to_string();

            tracing::trace!(%axis, variable = %name, %value, "expanding variable");
            stack.push(name);
            output.push_str(&self.expand_inner(axis, &value, stack)?);
            stack.pop();
            rest = remaining;
        }

        output.push_str(rest);
        Ok(output)
    }

    fn canonical_name(&self, axis: Axis, alias: &str) -> Option<&String> {
        self.scopes()
            .find_map(|scope| scope.table(axis).aliases.get(alias))
    }

    fn scopes(&self) -> impl Iterator<Item = &LayoutMap> {
        std::iter::successors(Some(self), |scope| scope.parent.as_deref())
    }

    fn table(&self, axis: Axis) -> &Table {
        match axis {
            Axis::Column => &self.columns,
            Axis::Row => &self.rows,
        }
    }

    fn table_mut(&mut self, axis: Axis) -> &mut Table {
        match axis {
            Axis::Column => &mut self.columns,
            Axis::Row => &mut self.rows,
        }
    }
}
