//! Option Catalog Model

use super::selection::SelectionField;
use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Joins the fields of a tag payload, so no option may contain it
pub const PAYLOAD_SEPARATOR: char = '|';

/// The option list a catalog mutation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Branches,
    Types,
    Brands,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Branches, Category::Types, Category::Brands];

    /// Storage key of the list ("branches", "types", "brands")
    pub fn key(&self) -> &'static str {
        match self {
            Self::Branches => "branches",
            Self::Types => "types",
            Self::Brands => "brands",
        }
    }

    /// Singular display name
    pub fn singular(&self) -> &'static str {
        self.field().label()
    }

    /// Selection field whose dropdown shows this list
    pub fn field(&self) -> SelectionField {
        match self {
            Self::Branches => SelectionField::Branch,
            Self::Types => SelectionField::Type,
            Self::Brands => SelectionField::Brand,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "branches" | "branch" => Ok(Self::Branches),
            "types" | "type" => Ok(Self::Types),
            "brands" | "brand" => Ok(Self::Brands),
            other => Err(AppError::invalid_format(format!(
                "Unknown category: {}",
                other
            ))),
        }
    }
}

/// How brand lists are organized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandScope {
    /// One brand list shared by every type
    Flat,
    /// One brand list per type
    ByType,
}

/// Brand lists, either flat or keyed by type name
///
/// Flattened into [`OptionCatalog`] as either a `brands` array or a
/// `brandsByType` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrandLists {
    #[serde(rename = "brands")]
    Flat(Vec<String>),
    #[serde(rename = "brandsByType")]
    ByType(BTreeMap<String, Vec<String>>),
}

impl BrandLists {
    pub fn scope(&self) -> BrandScope {
        match self {
            Self::Flat(_) => BrandScope::Flat,
            Self::ByType(_) => BrandScope::ByType,
        }
    }
}

/// The user-editable option lists behind the three dropdowns
///
/// Stored as a single JSON document:
/// `{"branches":[..],"types":[..],"brandsByType":{"Monitor":[..]}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCatalog {
    pub branches: Vec<String>,
    pub types: Vec<String>,
    #[serde(flatten)]
    pub brands: BrandLists,
}

impl Default for OptionCatalog {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let brands_by_type = [
            ("Monitor", strings(&["AOC", "Samsung", "Gigabyte"])),
            ("Keyboard", strings(&["Logitech", "Razer"])),
            ("Mouse", strings(&["Logitech", "A4Tech"])),
            ("Ram", strings(&["Kingston", "Samsung"])),
            ("Heatsink", strings(&["DeepCool", "Cooler Master"])),
        ]
        .into_iter()
        .map(|(t, brands)| (t.to_string(), brands))
        .collect();

        Self {
            branches: strings(&["Pasay", "Cebu", "Munoz", "Fairview"]),
            types: strings(&["Monitor", "Keyboard", "Mouse", "Ram", "Heatsink"]),
            brands: BrandLists::ByType(brands_by_type),
        }
    }
}

impl OptionCatalog {
    pub fn brand_scope(&self) -> BrandScope {
        self.brands.scope()
    }

    /// The list a dropdown shows
    ///
    /// With type-scoped brands, `scope_type` selects the list; no type (or a
    /// type without brands) yields an empty list.
    pub fn list(&self, category: Category, scope_type: Option<&str>) -> &[String] {
        match category {
            Category::Branches => self.branches.as_slice(),
            Category::Types => self.types.as_slice(),
            Category::Brands => match &self.brands {
                BrandLists::Flat(list) => list.as_slice(),
                BrandLists::ByType(map) => scope_type
                    .and_then(|t| map.get(t))
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
            },
        }
    }

    /// Exact membership test
    pub fn contains(&self, category: Category, value: &str, scope_type: Option<&str>) -> bool {
        self.list(category, scope_type).iter().any(|v| v == value)
    }

    /// Append `value` to a list
    ///
    /// Fails when `value` contains [`PAYLOAD_SEPARATOR`], when a type-scoped
    /// brand has no (known) type, or when the list already holds the value
    /// ignoring case. `value` is stored as given.
    pub fn insert(
        &mut self,
        category: Category,
        scope_type: Option<&str>,
        value: &str,
    ) -> AppResult<()> {
        if value.contains(PAYLOAD_SEPARATOR) {
            return Err(AppError::validation(format!(
                "{} names cannot contain \"{}\"",
                category.singular(),
                PAYLOAD_SEPARATOR
            ))
            .with_detail("category", category.key()));
        }

        let folded = value.to_lowercase();
        let duplicate = |list: &[String]| list.iter().any(|v| v.to_lowercase() == folded);
        let exists = || {
            AppError::already_exists(format!("{} \"{}\"", category.singular(), value))
                .with_detail("category", category.key())
        };

        match category {
            Category::Branches | Category::Types => {
                let list = if category == Category::Branches {
                    &mut self.branches
                } else {
                    &mut self.types
                };
                if duplicate(list.as_slice()) {
                    return Err(exists());
                }
                list.push(value.to_string());
            }
            Category::Brands => match &mut self.brands {
                BrandLists::Flat(list) => {
                    if duplicate(list.as_slice()) {
                        return Err(exists());
                    }
                    list.push(value.to_string());
                }
                BrandLists::ByType(map) => {
                    let Some(scope) = scope_type else {
                        return Err(AppError::validation(
                            "Please select a Type first to add a brand to it.",
                        ));
                    };
                    if !self.types.iter().any(|t| t == scope) {
                        return Err(AppError::with_message(
                            ErrorCode::TypeNotFound,
                            format!("Type \"{}\" not found", scope),
                        ));
                    }
                    let list = map.entry(scope.to_string()).or_default();
                    if duplicate(list.as_slice()) {
                        return Err(exists().with_detail("type", scope));
                    }
                    list.push(value.to_string());
                }
            },
        }
        Ok(())
    }

    /// Remove the first entry equal to `value`; returns whether one went
    ///
    /// Removing the last copy of a type also drops its brand list.
    pub fn remove(&mut self, category: Category, value: &str, scope_type: Option<&str>) -> bool {
        fn remove_first(list: &mut Vec<String>, value: &str) -> bool {
            match list.iter().position(|v| v == value) {
                Some(idx) => {
                    list.remove(idx);
                    true
                }
                None => false,
            }
        }

        match category {
            Category::Branches => remove_first(&mut self.branches, value),
            Category::Types => {
                let removed = remove_first(&mut self.types, value);
                if let BrandLists::ByType(map) = &mut self.brands
                    && !self.types.iter().any(|t| t == value)
                {
                    map.remove(value);
                }
                removed
            }
            Category::Brands => match &mut self.brands {
                BrandLists::Flat(list) => remove_first(list, value),
                BrandLists::ByType(map) => scope_type
                    .and_then(|t| map.get_mut(t))
                    .map(|list| remove_first(list, value))
                    .unwrap_or(false),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = OptionCatalog::default();
        assert_eq!(catalog.branches, ["Pasay", "Cebu", "Munoz", "Fairview"]);
        assert_eq!(catalog.types.len(), 5);
        assert_eq!(catalog.brand_scope(), BrandScope::ByType);
        assert_eq!(
            catalog.list(Category::Brands, Some("Heatsink")),
            ["DeepCool", "Cooler Master"]
        );
        assert!(catalog.list(Category::Brands, None).is_empty());
    }

    #[test]
    fn test_json_shape_by_type() {
        let json = serde_json::to_value(OptionCatalog::default()).unwrap();
        assert!(json.get("branches").is_some());
        assert!(json.get("types").is_some());
        assert_eq!(json["brandsByType"]["Ram"][0], "Kingston");
        assert!(json.get("brands").is_none());
    }

    #[test]
    fn test_json_flat_brands() {
        let raw = r#"{"branches":["Cebu"],"types":["Ram"],"brands":["Kingston","Samsung"]}"#;
        let catalog: OptionCatalog = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.brand_scope(), BrandScope::Flat);
        assert_eq!(catalog.list(Category::Brands, None), ["Kingston", "Samsung"]);
        assert_eq!(catalog.list(Category::Brands, Some("Ram")), ["Kingston", "Samsung"]);

        let back = serde_json::to_string(&catalog).unwrap();
        assert!(back.contains(r#""brands":["Kingston","Samsung"]"#));
    }

    #[test]
    fn test_json_missing_brands_is_error() {
        let raw = r#"{"branches":[],"types":[]}"#;
        assert!(serde_json::from_str::<OptionCatalog>(raw).is_err());
    }

    #[test]
    fn test_insert_and_duplicates() {
        let mut catalog = OptionCatalog::default();
        catalog.insert(Category::Branches, None, "Makati").unwrap();
        assert_eq!(catalog.branches.last().unwrap(), "Makati");

        let err = catalog.insert(Category::Branches, None, "cebu").unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(catalog.branches.len(), 5);
    }

    #[test]
    fn test_insert_brand_requires_type() {
        let mut catalog = OptionCatalog::default();

        let err = catalog.insert(Category::Brands, None, "HyperX").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Please select a Type first to add a brand to it.");

        let err = catalog
            .insert(Category::Brands, Some("Printer"), "Epson")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeNotFound);

        catalog.insert(Category::Brands, Some("Ram"), "HyperX").unwrap();
        assert_eq!(
            catalog.list(Category::Brands, Some("Ram")),
            ["Kingston", "Samsung", "HyperX"]
        );
    }

    #[test]
    fn test_insert_brand_creates_list_for_new_type() {
        let mut catalog = OptionCatalog::default();
        catalog.insert(Category::Types, None, "Printer").unwrap();
        assert!(catalog.list(Category::Brands, Some("Printer")).is_empty());

        catalog.insert(Category::Brands, Some("Printer"), "Epson").unwrap();
        assert_eq!(catalog.list(Category::Brands, Some("Printer")), ["Epson"]);
    }

    #[test]
    fn test_remove_type_drops_brand_list() {
        let mut catalog = OptionCatalog::default();
        assert!(catalog.remove(Category::Types, "Mouse", None));
        assert!(!catalog.types.iter().any(|t| t == "Mouse"));
        match &catalog.brands {
            BrandLists::ByType(map) => assert!(!map.contains_key("Mouse")),
            BrandLists::Flat(_) => panic!("expected type-scoped brands"),
        }
        assert!(!catalog.remove(Category::Types, "Mouse", None));
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let raw = r#"{"branches":["Cebu","Pasay","Cebu"],"types":["Ram","Ram"],"brandsByType":{"Ram":["Kingston"]}}"#;
        let mut catalog: OptionCatalog = serde_json::from_str(raw).unwrap();

        assert!(catalog.remove(Category::Branches, "Cebu", None));
        assert_eq!(catalog.branches, ["Pasay", "Cebu"]);

        // one "Ram" left, its brands stay
        assert!(catalog.remove(Category::Types, "Ram", None));
        assert_eq!(catalog.types, ["Ram"]);
        assert_eq!(catalog.list(Category::Brands, Some("Ram")), ["Kingston"]);

        assert!(catalog.remove(Category::Types, "Ram", None));
        assert!(catalog.list(Category::Brands, Some("Ram")).is_empty());
    }

    #[test]
    fn test_insert_rejects_separator() {
        let mut catalog = OptionCatalog::default();
        let err = catalog.insert(Category::Branches, None, "|Annex").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Branch names cannot contain \"|\"");

        assert!(catalog.insert(Category::Brands, Some("Ram"), "A|B").is_err());
        assert_eq!(catalog.branches.len(), 4);
        assert_eq!(catalog.list(Category::Brands, Some("Ram")).len(), 2);
    }

    #[test]
    fn test_remove_brand_is_scoped() {
        let mut catalog = OptionCatalog::default();
        assert!(catalog.remove(Category::Brands, "Samsung", Some("Ram")));
        assert_eq!(catalog.list(Category::Brands, Some("Ram")), ["Kingston"]);
        assert!(catalog.contains(Category::Brands, "Samsung", Some("Monitor")));
        assert!(!catalog.remove(Category::Brands, "Samsung", None));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("brands".parse::<Category>().unwrap(), Category::Brands);
        assert_eq!("Type".parse::<Category>().unwrap(), Category::Types);
        assert!("colors".parse::<Category>().is_err());
        assert_eq!(Category::Branches.singular(), "Branch");
        assert_eq!(Category::Types.field(), SelectionField::Type);
    }
}
