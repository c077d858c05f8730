//! Selection Model

use super::catalog::{BrandScope, Category};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionField {
    Branch,
    Type,
    Brand,
}

impl SelectionField {
    pub const ALL: [SelectionField; 3] = [Self::Branch, Self::Type, Self::Brand];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Type => "type",
            Self::Brand => "brand",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Branch => "Branch",
            Self::Type => "Type",
            Self::Brand => "Brand",
        }
    }

    /// Catalog list backing this field's dropdown
    pub fn category(&self) -> Category {
        match self {
            Self::Branch => Category::Branches,
            Self::Type => Category::Types,
            Self::Brand => Category::Brands,
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Where the form is in the branch → type → brand progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    Empty,
    BranchOnly,
    BranchAndType,
    Complete,
    /// Any combination outside the linear progression (e.g. type without branch)
    Partial,
}

/// The in-progress branch / type / brand choice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub branch: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub brand: Option<String>,
}

impl Selection {
    pub fn get(&self, field: SelectionField) -> Option<&str> {
        match field {
            SelectionField::Branch => self.branch.as_deref(),
            SelectionField::Type => self.device_type.as_deref(),
            SelectionField::Brand => self.brand.as_deref(),
        }
    }

    fn slot(&mut self, field: SelectionField) -> &mut Option<String> {
        match field {
            SelectionField::Branch => &mut self.branch,
            SelectionField::Type => &mut self.device_type,
            SelectionField::Brand => &mut self.brand,
        }
    }

    /// Set one field; `None` or a blank value clears it
    ///
    /// Changing the type clears the brand when brands are type-scoped.
    pub fn select(&mut self, field: SelectionField, value: Option<&str>, scope: BrandScope) {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        if field == SelectionField::Type
            && scope == BrandScope::ByType
            && value != self.device_type
        {
            self.brand = None;
        }
        *self.slot(field) = value;
    }

    pub fn clear(&mut self, field: SelectionField) {
        *self.slot(field) = None;
    }

    /// Back to the empty form
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn state(&self) -> SelectionState {
        match (
            self.branch.is_some(),
            self.device_type.is_some(),
            self.brand.is_some(),
        ) {
            (false, false, false) => SelectionState::Empty,
            (true, false, false) => SelectionState::BranchOnly,
            (true, true, false) => SelectionState::BranchAndType,
            (true, true, true) => SelectionState::Complete,
            _ => SelectionState::Partial,
        }
    }

    /// Fields still empty, in form order
    pub fn missing(&self) -> Vec<SelectionField> {
        SelectionField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }
}
