//! Search query construction for plants.
//!
//! [`PlantQuery::from_params`] turns the raw query string into a typed query:
//! AND-combined filters, a whitelisted sort column and resolved pagination.
//! Stores render it either as SQL (PostgreSQL) or as a predicate and
//! comparator (in-memory); the count and the page always share one filter.

use std::cmp::Ordering;

use anyhow::anyhow;
use microtrack_core::{AppError, Pagination};
use microtrack_models::{Plant, PlantSearchParams};

/// Columns a search may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    PlantId,
    GroupId,
    Name,
    ScientificName,
    RecordedDate,
    SeedingDate,
    HarvestDate,
    GrowthDays,
    Description,
    Height,
    LeafColor,
    Floor,
    Humidity,
    Temperature,
    GrowthStage,
}

impl SortColumn {
    /// Unknown or missing names fall back to [`SortColumn::Name`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).unwrap_or_default() {
            "plant_id" => Self::PlantId,
            "group_id" => Self::GroupId,
            "scientific_name" => Self::ScientificName,
            "recorded_date" => Self::RecordedDate,
            "seeding_date" => Self::SeedingDate,
            "harvest_date" => Self::HarvestDate,
            "growth_days" => Self::GrowthDays,
            "description" => Self::Description,
            "height" => Self::Height,
            "leaf_color" => Self::LeafColor,
            "floor" => Self::Floor,
            "humidity" => Self::Humidity,
            "temperature" => Self::Temperature,
            "growth_stage" => Self::GrowthStage,
            _ => Self::Name,
        }
    }

    pub fn as_column(&self) -> &'static str {
        match self {
            Self::PlantId => "plant_id",
            Self::GroupId => "group_id",
            Self::Name => "name",
            Self::ScientificName => "scientific_name",
            Self::RecordedDate => "recorded_date",
            Self::SeedingDate => "seeding_date",
            Self::HarvestDate => "harvest_date",
            Self::GrowthDays => "growth_days",
            Self::Description => "description",
            Self::Height => "height",
            Self::LeafColor => "leaf_color",
            Self::Floor => "floor",
            Self::Humidity => "humidity",
            Self::Temperature => "temperature",
            Self::GrowthStage => "growth_stage",
        }
    }

    pub fn compare(&self, a: &Plant, b: &Plant) -> Ordering {
        match self {
            Self::PlantId => a.plant_id.cmp(&b.plant_id),
            Self::GroupId => a.group_id.cmp(&b.group_id),
            Self::Name => a.name.cmp(&b.name),
            Self::ScientificName => a.scientific_name.cmp(&b.scientific_name),
            Self::RecordedDate => a.recorded_date.cmp(&b.recorded_date),
            Self::SeedingDate => a.seeding_date.cmp(&b.seeding_date),
            Self::HarvestDate => a.harvest_date.cmp(&b.harvest_date),
            Self::GrowthDays => a.growth_days.cmp(&b.growth_days),
            Self::Description => a.description.cmp(&b.description),
            Self::Height => a.height.total_cmp(&b.height),
            Self::LeafColor => a.leaf_color.cmp(&b.leaf_color),
            Self::Floor => a.floor.cmp(&b.floor),
            Self::Humidity => a.humidity.total_cmp(&b.humidity),
            Self::Temperature => a.temperature.total_cmp(&b.temperature),
            Self::GrowthStage => a.growth_stage.cmp(&b.growth_stage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only the literal `desc` sorts descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// AND-combined search predicates. `None` means the predicate is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlantFilter {
    pub plant_id: Option<i64>,
    pub group_id: Option<String>,
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub growth_stage: Option<String>,
    pub min_growth_days: Option<i32>,
    pub max_growth_days: Option<i32>,
}

impl PlantFilter {
    /// Case-insensitive substring predicates as `(column, needle)` pairs.
    pub fn substring_filters(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("scientific_name", self.scientific_name.as_deref()),
            ("description", self.description.as_deref()),
            ("growth_stage", self.growth_stage.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, needle)| needle.map(|n| (column, n)))
    }

    pub fn matches(&self, plant: &Plant) -> bool {
        if self.plant_id.is_some_and(|id| plant.plant_id != id) {
            return false;
        }
        if self.group_id.as_deref().is_some_and(|g| plant.group_id != g) {
            return false;
        }
        if self.min_growth_days.is_some_and(|min| plant.growth_days < min) {
            return false;
        }
        if self.max_growth_days.is_some_and(|max| plant.growth_days > max) {
            return false;
        }

        self.substring_filters().all(|(column, needle)| {
            let haystack = match column {
                "name" => &plant.name,
                "scientific_name" => &plant.scientific_name,
                "description" => &plant.description,
                _ => &plant.growth_stage,
            };
            contains_ignore_case(haystack, needle)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantQuery {
    pub filter: PlantFilter,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    pub pagination: Pagination,
}

impl PlantQuery {
    /// # Errors
    ///
    /// Returns a bad request error if `plant_id` is present but not an integer.
    pub fn from_params(params: &PlantSearchParams) -> Result<Self, AppError> {
        let plant_id = present(&params.plant_id)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| AppError::bad_request(anyhow!("Invalid plant_id")))
            })
            .transpose()?;

        let filter = PlantFilter {
            plant_id,
            group_id: verbatim(&params.group_id),
            name: verbatim(&params.name),
            scientific_name: verbatim(&params.scientific_name),
            description: verbatim(&params.description),
            growth_stage: verbatim(&params.growth_stage),
            min_growth_days: present(&params.min_growth_days).and_then(|s| s.parse().ok()),
            max_growth_days: present(&params.max_growth_days).and_then(|s| s.parse().ok()),
        };

        Ok(Self {
            filter,
            sort_by: SortColumn::parse(present(&params.sort_by)),
            sort_order: SortOrder::parse(present(&params.sort_order)),
            pagination: Pagination::from_raw(present(&params.limit), present(&params.skip)),
        })
    }

    /// Sort key first, then `plant_id` ascending so pages are stable.
    pub fn compare(&self, a: &Plant, b: &Plant) -> Ordering {
        let primary = self.sort_by.compare(a, b);
        let primary = match self.sort_order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.plant_id.cmp(&b.plant_id))
    }
}

/// Trimmed numeric or keyword parameter; empty values count as absent.
fn present(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Text matched as given, whitespace included; only the empty string counts as absent.
fn verbatim(raw: &Option<String>) -> Option<String> {
    raw.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Escapes `LIKE` wildcards so the needle matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use microtrack_models::{NewPlant, harvest_date_for};

    fn params(pairs: &[(&str, &str)]) -> PlantSearchParams {
        let mut p = PlantSearchParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "plant_id" => p.plant_id = value,
                "group_id" => p.group_id = value,
                "name" => p.name = value,
                "scientific_name" => p.scientific_name = value,
                "description" => p.description = value,
                "growth_stage" => p.growth_stage = value,
                "min_growth_days" => p.min_growth_days = value,
                "max_growth_days" => p.max_growth_days = value,
                "limit" => p.limit = value,
                "skip" => p.skip = value,
                "sort_by" => p.sort_by = value,
                "sort_order" => p.sort_order = value,
                other => panic!("unknown param {}", other),
            }
        }
        p
    }

    fn plant(plant_id: i64, name: &str, growth_days: i32) -> Plant {
        let seeded = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        NewPlant {
            group_id: "g1".to_string(),
            name: name.to_string(),
            scientific_name: String::new(),
            recorded_date: seeded,
            seeding_date: seeded,
            harvest_date: harvest_date_for(seeded, growth_days).unwrap(),
            growth_days,
            description: String::new(),
            height: 0.0,
            leaf_color: String::new(),
            floor: String::new(),
            humidity: 0.0,
            temperature: 0.0,
            growth_stage: "vegetative".to_string(),
        }
        .with_id(plant_id)
    }

    #[test]
    fn test_defaults() {
        let query = PlantQuery::from_params(&PlantSearchParams::default()).unwrap();
        assert_eq!(query.filter, PlantFilter::default());
        assert_eq!(query.sort_by, SortColumn::Name);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(query.pagination, Pagination::default());
    }

    #[test]
    fn test_empty_values_are_absent() {
        let query = PlantQuery::from_params(&params(&[
            ("plant_id", ""),
            ("name", ""),
            ("sort_by", ""),
            ("limit", ""),
        ]))
        .unwrap();
        assert_eq!(query.filter, PlantFilter::default());
        assert_eq!(query.sort_by, SortColumn::Name);
        assert_eq!(query.pagination.limit, 10);
    }

    #[test]
    fn test_text_filters_keep_whitespace() {
        let query =
            PlantQuery::from_params(&params(&[("name", " basil"), ("limit", " 5 ")])).unwrap();
        assert_eq!(query.filter.name.as_deref(), Some(" basil"));
        assert_eq!(query.pagination.limit, 5);
        assert!(!query.filter.matches(&plant(1, "Basil", 30)));
        assert!(query.filter.matches(&plant(2, "Sweet Basil", 30)));

        let query = PlantQuery::from_params(&params(&[("name", " ")])).unwrap();
        assert!(!query.filter.matches(&plant(3, "Mint", 30)));
        assert!(query.filter.matches(&plant(4, "Lemon Balm", 30)));
    }

    #[test]
    fn test_invalid_plant_id_is_rejected() {
        let err = PlantQuery::from_params(&params(&[("plant_id", "abc")])).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[test]
    fn test_unparsable_growth_bounds_are_ignored() {
        let query = PlantQuery::from_params(&params(&[
            ("min_growth_days", "ten"),
            ("max_growth_days", "40"),
        ]))
        .unwrap();
        assert_eq!(query.filter.min_growth_days, None);
        assert_eq!(query.filter.max_growth_days, Some(40));
    }

    #[test]
    fn test_limit_is_clamped() {
        let query = PlantQuery::from_params(&params(&[("limit", "500"), ("skip", "-3")])).unwrap();
        assert_eq!(query.pagination.limit, 100);
        assert_eq!(query.pagination.skip, 0);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(SortColumn::parse(Some("growth_days")), SortColumn::GrowthDays);
        assert_eq!(SortColumn::parse(Some("password")), SortColumn::Name);
        assert_eq!(SortColumn::parse(Some("name; DROP TABLE plants")), SortColumn::Name);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("DESC")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
    }

    #[test]
    fn test_filter_matches_substring_case_insensitively() {
        let query = PlantQuery::from_params(&params(&[("name", "BAS")])).unwrap();
        assert!(query.filter.matches(&plant(1, "Sweet Basil", 30)));
        assert!(!query.filter.matches(&plant(2, "Mint", 30)));
    }

    #[test]
    fn test_filter_wildcards_are_literal() {
        let query = PlantQuery::from_params(&params(&[("name", "b%l")])).unwrap();
        assert!(!query.filter.matches(&plant(1, "Basil", 30)));
        assert!(query.filter.matches(&plant(2, "b%l hybrid", 30)));
    }

    #[test]
    fn test_filter_growth_range_inclusive() {
        let query = PlantQuery::from_params(&params(&[
            ("min_growth_days", "20"),
            ("max_growth_days", "30"),
        ]))
        .unwrap();
        assert!(query.filter.matches(&plant(1, "a", 20)));
        assert!(query.filter.matches(&plant(2, "b", 30)));
        assert!(!query.filter.matches(&plant(3, "c", 31)));
        assert!(!query.filter.matches(&plant(4, "d", 19)));
    }

    #[test]
    fn test_compare_breaks_ties_by_plant_id() {
        let query = PlantQuery::from_params(&params(&[("sort_order", "desc")])).unwrap();
        let mut plants = vec![plant(3, "Basil", 1), plant(1, "Basil", 1), plant(2, "Mint", 1)];
        plants.sort_by(|a, b| query.compare(a, b));
        let ids: Vec<i64> = plants.iter().map(|p| p.plant_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("basil"), "basil");
    }
}
