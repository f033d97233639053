use ratatui::style::Color;

use crate::constants::{CATEGORY_COLORS, GRID_SIDE, GROWTH_SETTINGS, LABELS, PLOTS_PER_FIELD};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    Leisure,
    Work,
    Commuting,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Leisure, Category::Work, Category::Commuting];

    // `0` is reserved for an empty plot.
    pub fn id(self) -> u8 {
        match self {
            Category::Leisure => 1,
            Category::Work => 2,
            Category::Commuting => 3,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Category::Leisure),
            2 => Some(Category::Work),
            3 => Some(Category::Commuting),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Leisure => "Leisure",
            Category::Work => "Work",
            Category::Commuting => "Commuting",
        }
    }

    pub fn color(self) -> Color {
        CATEGORY_COLORS[usize::from(self.id() - 1)]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Stage {
    Seedling,
    Growing,
    Grown,
}

impl Stage {
    pub fn number(self) -> u8 {
        match self {
            Stage::Seedling => 1,
            Stage::Growing => 2,
            Stage::Grown => 3,
        }
    }
}

pub fn classify(_category: Category, elapsed_secs: u64) -> Stage {
    if elapsed_secs < GROWTH_SETTINGS.seedling_until_secs {
        Stage::Seedling
    } else if elapsed_secs < GROWTH_SETTINGS.growing_until_secs {
        Stage::Growing
    } else {
        Stage::Grown
    }
}

pub fn asset_name(category: Category, stage: Stage) -> String {
    format!("plant{}_{}", category.id(), stage.number())
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Planting {
    pub category: Category,
    pub elapsed_secs: u64,
    pub label: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Plot {
    #[default]
    Empty,
    Planted(Planting),
}

impl Plot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Plot::Empty)
    }

    pub fn planting(&self) -> Option<&Planting> {
        match self {
            Plot::Empty => None,
            Plot::Planted(planting) => Some(planting),
        }
    }
}

pub fn grid_position(slot: usize) -> (usize, usize) {
    (slot / GRID_SIDE, slot % GRID_SIDE)
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Field {
    pub plots: [Plot; PLOTS_PER_FIELD],
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planted_count(&self) -> usize {
        self.plots.iter().filter(|plot| !plot.is_empty()).count()
    }

    pub fn plant(&mut self, slot: usize, planting: Planting) -> Result<(), PlotError> {
        let Some(plot) = self.plots.get_mut(slot) else {
            return Err(PlotError::OutOfRange(slot));
        };
        if !plot.is_empty() {
            return Err(PlotError::Occupied(slot));
        }
        *plot = Plot::Planted(planting);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlotError {
    #[error("plot {0} is already planted")]
    Occupied(usize),
    #[error("plot {0} is outside the 3x3 field")]
    OutOfRange(usize),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlotRef {
    pub field: usize,
    pub slot: usize,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Record {
    pub owner_name: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            owner_name: LABELS.default_owner.to_string(),
            fields: vec![Field::new()],
        }
    }

    pub fn last_field_index(&self) -> usize {
        self.fields.len().saturating_sub(1)
    }

    pub fn last_field(&self) -> Option<&Field> {
        self.fields.last()
    }

    pub fn last_field_mut(&mut self) -> Option<&mut Field> {
        self.fields.last_mut()
    }

    pub fn plantings(&self) -> impl Iterator<Item = (PlotRef, &Planting)> {
        self.fields.iter().enumerate().flat_map(|(field_index, field)| {
            field
                .plots
                .iter()
                .enumerate()
                .filter_map(move |(slot, plot)| {
                    plot.planting().map(|planting| {
                        (
                            PlotRef {
                                field: field_index,
                                slot,
                            },
                            planting,
                        )
                    })
                })
        })
    }

    pub fn total_secs_for(&self, category: Category) -> u64 {
        self.plantings()
            .filter(|(_, planting)| planting.category == category)
            .map(|(_, planting)| planting.elapsed_secs)
            .sum()
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}
