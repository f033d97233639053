use std::time::Instant;

use crate::{
    constants::PLOTS_PER_FIELD,
    domain::{Category, Plot, Stage, asset_name, classify},
    storage::RecordStore,
};

use super::{Garden, Screen, Warning};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlotView {
    Empty,
    Planted {
        category: Category,
        elapsed_secs: u64,
        label: String,
        stage: Stage,
        asset: String,
    },
    Growing {
        category: Category,
        elapsed_secs: u64,
        stage: Stage,
        asset: String,
    },
}

impl PlotView {
    fn planted(category: Category, elapsed_secs: u64, label: String) -> Self {
        let stage = classify(category, elapsed_secs);
        PlotView::Planted {
            category,
            elapsed_secs,
            label,
            stage,
            asset: asset_name(category, stage),
        }
    }

    fn growing(category: Category, elapsed_secs: u64) -> Self {
        let stage = classify(category, elapsed_secs);
        PlotView::Growing {
            category,
            elapsed_secs,
            stage,
            asset: asset_name(category, stage),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FrameView {
    pub screen: Screen,
    pub owner_name: String,
    pub viewed_field: usize,
    pub field_count: usize,
    pub plots: Vec<PlotView>,
    pub timer_text: String,
    pub selected: Option<Category>,
    pub running: bool,
    pub name_entry: String,
    pub warning: Option<Warning>,
    pub error_banner: Option<String>,
}

impl<S: RecordStore> Garden<S> {
    pub fn view(&self, now: Instant) -> FrameView {
        let pending = self.timer.is_running() || self.timer.is_paused();
        let elapsed = self.timer.elapsed_at(now);
        let on_last_field = self.viewed_field == self.record.last_field_index();

        let plots = self
            .record
            .fields
            .get(self.viewed_field)
            .map(|field| {
                field
                    .plots
                    .iter()
                    .enumerate()
                    .map(|(slot, plot)| match (plot, self.selected) {
                        (Plot::Empty, Some(category))
                            if pending && on_last_field && self.reserved == Some(slot) =>
                        {
                            PlotView::growing(category, elapsed)
                        }
                        (Plot::Empty, _) => PlotView::Empty,
                        (Plot::Planted(p), _) => {
                            PlotView::planted(p.category, p.elapsed_secs, p.label.clone())
                        }
                    })
                    .collect()
            })
            .unwrap_or_else(|| vec![PlotView::Empty; PLOTS_PER_FIELD]);

        FrameView {
            screen: self.screen,
            owner_name: self.record.owner_name.clone(),
            viewed_field: self.viewed_field,
            field_count: self.record.fields.len(),
            plots,
            timer_text: format_clock(elapsed),
            selected: self.selected,
            running: self.timer.is_running(),
            name_entry: self.name_entry.text().to_string(),
            warning: self
                .warning
                .clone()
                .filter(|warning| warning.expires_at > now),
            error_banner: self.save_error.clone(),
        }
    }
}

pub fn format_clock(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
