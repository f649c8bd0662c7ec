use std::collections::BTreeSet;
use std::path::Path;

use crate::color::ColorMap;
use crate::data::filter::{FilterState, filtered_indices, init_filter_state};
use crate::data::model::{Dimension, DimensionValue, JobCategory, RemoteWorkType, SalaryDataset};
use crate::data::stats::SalaryStat;
use crate::data::{loader, transform};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SalaryDataset>,

    /// File stem of the loaded source, used to name CSV exports.
    pub source_stem: Option<String>,

    /// Per-dimension filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Which statistic the region breakdown chart shows.
    pub region_stat: SalaryStat,

    /// Colour per job category, stable across filter changes.
    pub category_colors: ColorMap,

    /// Colour per remote work type, stable across filter changes.
    pub remote_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source_stem: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            region_stat: SalaryStat::Mean,
            category_colors: ColorMap::new(JobCategory::ALL.iter().map(|c| c.label())),
            remote_colors: ColorMap::new(RemoteWorkType::ALL.iter().map(|r| r.label())),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, select every value in every dimension.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.filters = init_filter_state(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Load a file from disk, enrich it and install it as the active dataset.
    /// Failures land in `status_message` instead of propagating.
    pub fn load_from_path(&mut self, path: &Path) {
        self.loading = true;
        match loader::load_file(path) {
            Ok(raw) => {
                let dataset = transform::enrich_all(raw);
                log::info!(
                    "Loaded {} salary records from {}",
                    dataset.len(),
                    path.display()
                );
                self.source_stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string);
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &DimensionValue) {
        let selected = self.filters.entry(dim).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select every observed value in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(ds) = &self.dataset {
            if let Some(all_vals) = ds.unique_values.get(&dim) {
                self.filters.insert(dim, all_vals.clone());
                self.refilter();
            }
        }
    }

    /// Deselect every value in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.filters.insert(dim, BTreeSet::new());
        self.refilter();
    }
}
