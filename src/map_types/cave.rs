use crate::{
    automaton::AutomatonSpec,
    error::{check_area, Error, Result},
    grid::Grid,
    noise::NoiseSpec,
    region::{remove_small_regions_with_report, CleanupReport},
    sampling::small_rng,
};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct CaveMap {
    pub grid: Grid,
    pub cleanup: CleanupReport,
}

/// Where a cave pipeline is when it reports progress.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaveStage {
    Noise,
    /// 1-indexed smoothing pass.
    Smoothing(u8),
    Cleanup,
}

/// Noise, then cellular smoothing, then removal of undersized regions.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CaveMapSpec {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub noise: NoiseSpec,
    pub automaton: AutomatonSpec,
    /// Floor regions smaller than this are filled in.
    pub min_region_size: usize,
}

impl Default for CaveMapSpec {
    fn default() -> Self {
        CaveMapSpec {
            seed: 0,
            width: 40,
            height: 40,
            noise: NoiseSpec::default(),
            automaton: AutomatonSpec::default(),
            min_region_size: 1,
        }
    }
}

impl CaveMapSpec {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid(
                "dimensions",
                format!("{}x{} grid has no cells", self.width, self.height),
            ));
        }
        check_area("dimensions", self.width, self.height, Grid::MAX_CELLS)?;
        self.noise.validate()?;

        self.automaton.validate()
    }

    pub fn generate(&self) -> Result<CaveMap> {
        self.generate_with(|_, _| {})
    }

    /// Like `generate`, but shows `on_stage` the grid after each stage.
    pub fn generate_with(&self, mut on_stage: impl FnMut(CaveStage, &Grid)) -> Result<CaveMap> {
        self.validate()?;
        log::debug!("Generating {}x{} cave map", self.width, self.height);

        let mut rng = small_rng(self.seed);
        let mut grid = self.noise.generate(self.width, self.height, &mut rng)?;
        on_stage(CaveStage::Noise, &grid);

        for (i, pass) in self.automaton.passes(grid.clone())?.enumerate() {
            grid = pass;
            on_stage(CaveStage::Smoothing(i as u8 + 1), &grid);
        }
        log::debug!("{} floor cells after smoothing", grid.floor_count());

        let (grid, cleanup) = remove_small_regions_with_report(&grid, self.min_region_size);
        on_stage(CaveStage::Cleanup, &grid);
        log::debug!(
            "Region sizes: mean = {:.1}, std dev = {:.1}",
            cleanup.mean_region_size,
            cleanup.region_size_std_dev
        );

        Ok(CaveMap { grid, cleanup })
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        automaton::Rule,
        map_types::from_ron_str,
        noise::{sample_noise, Shaping},
        region::{regions, remove_small_regions},
    };

    fn seed_42_spec() -> CaveMapSpec {
        CaveMapSpec {
            seed: 42,
            width: 20,
            height: 20,
            noise: NoiseSpec {
                fill_probability: 0.45,
                ..Default::default()
            },
            automaton: AutomatonSpec::flip(4, 4),
            min_region_size: 4,
        }
    }

    #[test]
    fn test_seed_42_pipeline() {
        let first = seed_42_spec().generate().unwrap();
        let second = seed_42_spec().generate().unwrap();

        assert_eq!(first.grid, second.grid);
        assert!(regions(&first.grid).iter().all(|r| r.size() >= 4));
        assert_eq!(first.cleanup, second.cleanup);
    }

    #[test]
    fn test_pipeline_matches_individual_stages() {
        let spec = seed_42_spec();
        let mut rng = small_rng(42);
        let noise = sample_noise(20, 20, 0.45, true, &Shaping::none(), &mut rng).unwrap();
        let smoothed = spec.automaton.apply(&noise).unwrap();
        let cleaned = remove_small_regions(&smoothed, 4);

        assert_eq!(spec.generate().unwrap().grid, cleaned);
    }

    #[test]
    fn test_stages_are_reported_in_order() {
        let mut stages = Vec::new();
        let map = seed_42_spec()
            .generate_with(|stage, grid| stages.push((stage, grid.clone())))
            .unwrap();

        let kinds: Vec<CaveStage> = stages.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            kinds,
            vec![
                CaveStage::Noise,
                CaveStage::Smoothing(1),
                CaveStage::Smoothing(2),
                CaveStage::Smoothing(3),
                CaveStage::Smoothing(4),
                CaveStage::Cleanup,
            ]
        );
        assert_eq!(stages.last().map(|(_, g)| g), Some(&map.grid));
    }

    #[test]
    fn test_invalid_spec_fails_before_generating() {
        let mut called = false;
        let spec = CaveMapSpec {
            automaton: AutomatonSpec::flip(12, 4),
            ..seed_42_spec()
        };

        assert!(spec.generate_with(|_, _| called = true).is_err());
        assert!(!called);

        let huge = CaveMapSpec {
            width: usize::MAX,
            height: usize::MAX,
            ..seed_42_spec()
        };
        assert!(huge.generate_with(|_, _| called = true).is_err());
        assert!(!called);
    }

    #[test]
    fn test_spec_from_ron() {
        let spec: CaveMapSpec = from_ron_str(
            r#"(
                seed: 7,
                width: 32,
                height: 24,
                noise: (
                    fill_probability: 0.5,
                    include_border: false,
                    shape: (
                        axial: None,
                        radial: Some((
                            center: (0.5, 0.5),
                            curve: (keys: [(t: 0.0, value: 1.0), (t: 1.0, value: 0.0)]),
                        )),
                    ),
                ),
                automaton: (rule: KillGrow(lower: 3, upper: 4), passes: 5),
                min_region_size: 6,
            )"#,
        )
        .unwrap();

        assert_eq!(spec.automaton.rule, Rule::KillGrow { lower: 3, upper: 4 });
        assert!(!spec.noise.include_border);
        let map = spec.generate().unwrap();
        assert_eq!(map.grid.dimensions(), (32, 24));
        assert!(regions(&map.grid).iter().all(|r| r.size() >= 6));
    }

    #[test]
    fn test_malformed_ron_is_a_config_error() {
        let result: Result<CaveMapSpec> = from_ron_str("(seed: \"nope\")");

        assert!(matches!(result, Err(Error::Config(_))));
    }
}
