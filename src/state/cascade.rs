//! State → city dependent selection

use super::models::{Region, SubRegion};

/// Where the cascade currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CascadePhase {
    #[default]
    Idle,
    RegionsLoaded,
    SubRegionsLoaded,
}

/// Sub-region fetch the caller should issue after a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRegionRequest {
    pub generation: u64,
    pub region_id: String,
}

/// Two-level selector: the sub-region list always belongs to the selected region
#[derive(Debug, Clone, Default)]
pub struct RegionCascade {
    phase: CascadePhase,
    regions: Vec<Region>,
    sub_regions: Vec<SubRegion>,
    selected_region: Option<String>,
    selected_sub_region: Option<String>,
    generation: u64,
}

impl RegionCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn sub_regions(&self) -> &[SubRegion] {
        &self.sub_regions
    }

    pub fn selected_region(&self) -> Option<&str> {
        self.selected_region.as_deref()
    }

    pub fn selected_sub_region(&self) -> Option<&str> {
        self.selected_sub_region.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Store the region list, sorted by code
    pub fn load_regions(&mut self, mut regions: Vec<Region>) {
        regions.sort_by(|a, b| a.code.cmp(&b.code));
        self.regions = regions;
        if self.phase == CascadePhase::Idle {
            self.phase = CascadePhase::RegionsLoaded;
        }
    }

    /// Change the selected region by code.
    ///
    /// Always clears the sub-region list and selection. Returns the fetch to
    /// issue, or `None` when the code has no backing region.
    pub fn select_region(&mut self, code: Option<&str>) -> Option<SubRegionRequest> {
        self.generation += 1;
        self.selected_region = code.map(str::to_string);
        self.sub_regions.clear();
        self.selected_sub_region = None;
        if self.phase == CascadePhase::SubRegionsLoaded {
            self.phase = CascadePhase::RegionsLoaded;
        }

        let code = code?;
        let region = self.regions.iter().find(|r| r.code == code)?;
        Some(SubRegionRequest {
            generation: self.generation,
            region_id: region.id.clone(),
        })
    }

    /// Apply a sub-region response. Responses from an older selection are dropped.
    pub fn apply_sub_regions(&mut self, generation: u64, sub_regions: Vec<SubRegion>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.sub_regions = sub_regions;
        self.phase = CascadePhase::SubRegionsLoaded;
        true
    }

    pub fn select_sub_region(&mut self, name: Option<&str>) {
        self.selected_sub_region = name
            .filter(|n| self.sub_regions.iter().any(|s| s.name == *n))
            .map(str::to_string);
    }

    /// Step the region selection by `delta`, with one "nothing selected" slot before the first region
    pub fn cycle_region(&mut self, delta: isize) -> Option<SubRegionRequest> {
        let codes: Vec<String> = self.regions.iter().map(|r| r.code.clone()).collect();
        let next = cycle(&codes, self.selected_region.as_deref(), delta);
        self.select_region(next.as_deref())
    }

    pub fn cycle_sub_region(&mut self, delta: isize) {
        let names: Vec<String> = self.sub_regions.iter().map(|s| s.name.clone()).collect();
        let next = cycle(&names, self.selected_sub_region.as_deref(), delta);
        self.select_sub_region(next.as_deref());
    }
}

/// Slot 0 is "no selection", slot i+1 is options[i]
fn cycle(options: &[String], current: Option<&str>, delta: isize) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let slots = options.len() as isize + 1;
    let current_slot = current
        .and_then(|c| options.iter().position(|o| o == c))
        .map_or(0, |i| i as isize + 1);
    let next = (current_slot + delta).rem_euclid(slots);
    if next == 0 {
        None
    } else {
        options.get(next as usize - 1).cloned()
    }
}
