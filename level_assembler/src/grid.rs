//! Vasebreaker grid selection.
//!
//! Models the column picker used to lay out a vasebreaker level: columns are
//! toggled as a whole, the selection is treated as its bounding span, and a
//! content list has to fill that span exactly before it can be finalized.

use level_model::{validate_name, Fields, Result, ValidationError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROWS: u32 = 5;
pub const DEFAULT_COLUMNS: u32 = 9;

/// Collectable placed in plant food vases.
pub const PLANTFOOD: &str = "plantfood";

/// What a group of vases holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VaseContent {
    Plant { plant_type: String, count: u32 },
    Zombie { zombie_type: String, count: u32 },
    Collectable { collectable_type: String, count: u32 },
}

impl VaseContent {
    pub fn plant(plant_type: impl Into<String>, count: u32) -> Self {
        VaseContent::Plant {
            plant_type: plant_type.into(),
            count,
        }
    }

    pub fn zombie(zombie_type: impl Into<String>, count: u32) -> Self {
        VaseContent::Zombie {
            zombie_type: zombie_type.into(),
            count,
        }
    }

    /// Vases holding plant food.
    pub fn plantfood(count: u32) -> Self {
        VaseContent::Collectable {
            collectable_type: PLANTFOOD.to_string(),
            count,
        }
    }

    /// How many vases this entry fills.
    pub fn count(&self) -> u32 {
        match self {
            VaseContent::Plant { count, .. }
            | VaseContent::Zombie { count, .. }
            | VaseContent::Collectable { count, .. } => *count,
        }
    }

    fn validate(&self) -> Result<()> {
        let (field, name) = match self {
            VaseContent::Plant { plant_type, .. } => ("vase plant type", plant_type),
            VaseContent::Zombie { zombie_type, .. } => ("vase zombie type", zombie_type),
            VaseContent::Collectable {
                collectable_type, ..
            } => ("vase collectable type", collectable_type),
        };
        validate_name(field, name)?;
        if self.count() == 0 {
            return Err(ValidationError::out_of_range("vase count", 0, 1, u32::MAX));
        }
        Ok(())
    }

    /// Engine representation, e.g. `{"PlantTypeName": "peashooter", "Count": 3}`.
    pub fn to_fields(&self) -> Fields {
        let (key, name) = match self {
            VaseContent::Plant { plant_type, .. } => ("PlantTypeName", plant_type),
            VaseContent::Zombie { zombie_type, .. } => ("ZombieTypeName", zombie_type),
            VaseContent::Collectable {
                collectable_type, ..
            } => ("CollectableTypeName", collectable_type),
        };
        Fields::new()
            .with(key, name.as_str())
            .with("Count", self.count())
    }
}

/// A finalized selection: column span plus the vases that fill it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaseLayout {
    pub min_column: u32,
    pub max_column: u32,
    pub vases: Vec<VaseContent>,
}

impl VaseLayout {
    /// Vases holding a plant.
    pub fn colored_plant_vases(&self) -> u32 {
        saturating_count(
            self.vases
                .iter()
                .filter(|v| matches!(v, VaseContent::Plant { .. })),
        )
    }

    /// Vases holding a zombie.
    pub fn colored_zombie_vases(&self) -> u32 {
        saturating_count(
            self.vases
                .iter()
                .filter(|v| matches!(v, VaseContent::Zombie { .. })),
        )
    }

    /// Total number of vases described.
    pub fn total_vases(&self) -> u32 {
        saturating_count(self.vases.iter())
    }

    /// Check the layout against a `rows` by `columns` grid.
    ///
    /// Layouts deserialized from a plan skip the picker, so the same rules
    /// [`GridSelection::finalize`] applies are enforced here.
    pub fn validate(&self, rows: u32, columns: u32) -> Result<()> {
        if self.max_column >= columns {
            return Err(ValidationError::out_of_range(
                "vasebreaker max column",
                self.max_column,
                0,
                columns.saturating_sub(1),
            ));
        }
        if self.max_column < self.min_column {
            return Err(ValidationError::out_of_range(
                "vasebreaker max column",
                self.max_column,
                self.min_column,
                columns.saturating_sub(1),
            ));
        }
        // max_column < columns, so the span cannot overflow.
        let span = self.max_column - self.min_column + 1;
        let expected = span.checked_mul(rows).ok_or_else(|| {
            ValidationError::out_of_range("vasebreaker rows", rows, 0, u32::MAX / span)
        })?;
        check_contents(expected, &self.vases)
    }
}

fn saturating_count<'a>(vases: impl Iterator<Item = &'a VaseContent>) -> u32 {
    vases.fold(0, |total, vase| total.saturating_add(vase.count()))
}

fn check_contents(expected: u32, contents: &[VaseContent]) -> Result<()> {
    if expected == 0 {
        return Err(ValidationError::EmptySelection);
    }
    if contents.is_empty() {
        return Err(ValidationError::Empty {
            field: "vase contents",
        });
    }
    contents.iter().try_for_each(VaseContent::validate)?;

    let total: u64 = contents.iter().map(|v| u64::from(v.count())).sum();
    let actual = u32::try_from(total).map_err(|_| ValidationError::OutOfRange {
        field: "total vase count",
        value: i64::try_from(total).unwrap_or(i64::MAX),
        min: i64::from(expected),
        max: i64::from(expected),
    })?;
    if actual != expected {
        return Err(ValidationError::SlotCountMismatch { expected, actual });
    }
    Ok(())
}

/// Cell grid with whole-row and whole-column toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSelection {
    rows: u32,
    columns: u32,
    /// Row-major.
    marked: Vec<bool>,
}

impl Default for GridSelection {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

impl GridSelection {
    /// Create an empty grid.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            marked: vec![false; (rows * columns) as usize],
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    fn index(&self, row: u32, column: u32) -> usize {
        (row * self.columns + column) as usize
    }

    /// Check whether a cell is selected. Out-of-range cells never are.
    pub fn is_marked(&self, row: u32, column: u32) -> bool {
        row < self.rows && column < self.columns && self.marked[self.index(row, column)]
    }

    /// Toggle a whole column: clear it if fully selected, otherwise fill it.
    pub fn mark_column(&mut self, column: u32) -> Result<()> {
        if column >= self.columns {
            return Err(ValidationError::out_of_range(
                "grid column",
                column,
                0,
                self.columns.saturating_sub(1),
            ));
        }
        let fill = !(0..self.rows).all(|row| self.is_marked(row, column));
        for row in 0..self.rows {
            let index = self.index(row, column);
            self.marked[index] = fill;
        }
        Ok(())
    }

    /// Toggle a whole row. Rows do not affect the vase span.
    pub fn mark_row(&mut self, row: u32) -> Result<()> {
        if row >= self.rows {
            return Err(ValidationError::out_of_range(
                "grid row",
                row,
                0,
                self.rows.saturating_sub(1),
            ));
        }
        let fill = !(0..self.columns).all(|column| self.is_marked(row, column));
        for column in 0..self.columns {
            let index = self.index(row, column);
            self.marked[index] = fill;
        }
        Ok(())
    }

    /// Select every cell.
    pub fn select_all(&mut self) {
        self.marked.iter_mut().for_each(|cell| *cell = true);
    }

    /// Clear every cell.
    pub fn reset(&mut self) {
        self.marked.iter_mut().for_each(|cell| *cell = false);
    }

    /// Columns with at least one selected cell, ascending.
    pub fn marked_columns(&self) -> Vec<u32> {
        (0..self.columns)
            .filter(|&column| (0..self.rows).any(|row| self.is_marked(row, column)))
            .collect()
    }

    /// Bounding span of the marked columns.
    pub fn span(&self) -> Option<(u32, u32)> {
        let columns = self.marked_columns();
        Some((*columns.first()?, *columns.last()?))
    }

    /// Vases needed to fill the span; gaps between marked columns count.
    pub fn total_slots(&self) -> u32 {
        self.span()
            .map(|(min, max)| (max - min + 1).saturating_mul(self.rows))
            .unwrap_or(0)
    }

    /// Turn the selection and a content list into a vasebreaker layout.
    pub fn finalize(&self, contents: Vec<VaseContent>) -> Result<VaseLayout> {
        let (min_column, max_column) = self.span().ok_or(ValidationError::EmptySelection)?;
        check_contents(self.total_slots(), &contents)?;

        Ok(VaseLayout {
            min_column,
            max_column,
            vases: contents,
        })
    }
}
