use clap::Parser;
use paddy_rice_core::irrigation::parameters::{
    RICE_FLOODING, RICE_HARVEST_DAY_1, RICE_HARVEST_DAY_2, RICE_PERCOLATION, RICE_PLANTING_DAY_1,
    RICE_PLANTING_DAY_2,
};
use paddy_rice_core::{
    CellField, CellMask, ClassFields, Conversion, Evaporation, Fractions, InMemoryMaps,
    LandUse, ModelContext, ModelOptions, RiceIrrigation, RicePhase, RiceSchedule, SoilMoisture,
    StepInputs, Vegetation, DAYS_PER_YEAR,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Paddy rice irrigation demo on a synthetic grid
#[derive(Parser, Debug)]
#[command(name = "paddy-rice-demo")]
#[command(
    about = "Runs one year of paddy rice irrigation demand on a synthetic grid",
    long_about = None
)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 40)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 30)]
    height: usize,

    /// Cell size in meters
    #[arg(long, default_value_t = 5000.0)]
    cell_size: f64,

    /// Mean planting day of year (1-365)
    #[arg(short, long, default_value_t = 120)]
    planting_day: u16,

    /// Season length in days
    #[arg(short, long, default_value_t = 110)]
    season_length: u16,

    /// Spread of planting days across the grid in days
    #[arg(long, default_value_t = 30)]
    planting_spread: u16,

    /// Flooding rate in mm/day
    #[arg(long, default_value_t = 10.0)]
    flooding: f64,

    /// Percolation rate in mm/day
    #[arg(long, default_value_t = 2.0)]
    percolation: f64,

    /// Switch water use accounting off (setup is expected to fail)
    #[arg(long)]
    no_water_use: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Report interval in days
    #[arg(short, long, default_value_t = 30)]
    report_interval: u16,
}

fn random_field(rng: &mut StdRng, cells: usize, low: f64, high: f64) -> CellField {
    (0..cells)
        .map(|_| rng.random_range(low..high))
        .collect::<Vec<_>>()
        .into()
}

/// Fold any day number onto 1..=365
fn day_of_year(day: f64) -> f64 {
    (day - 1.0).rem_euclid(DAYS_PER_YEAR) + 1.0
}

/// Soil and atmosphere state of the synthetic grid
struct SyntheticModel {
    calendar_day: CellField,
    w1: ClassFields,
    ws1: ClassFields,
    wfc1: ClassFields,
    es_act: ClassFields,
    ta: ClassFields,
    ew_ref: CellField,
    rice_fraction: CellField,
    soil_fraction: ClassFields,
    mm_to_m3: CellField,
    m3_to_mm: CellField,
}

impl SyntheticModel {
    fn new(cells: usize, cell_size: f64, rng: &mut StdRng) -> Self {
        let veg_classes = Vegetation::ALL.len();
        let land_uses = LandUse::ALL.len();
        let rice_fraction = random_field(rng, cells, 0.0, 0.6);
        let soil_fraction = ClassFields::from_fields(
            Vegetation::ALL
                .iter()
                .map(|_| random_field(rng, cells, 0.0, 0.8))
                .collect(),
        );
        let area_m2 = cell_size * cell_size;

        Self {
            calendar_day: CellField::with_value(cells, 1.0),
            w1: ClassFields::with_value(veg_classes, cells, 260.0),
            ws1: ClassFields::with_value(land_uses, cells, 320.0),
            wfc1: ClassFields::with_value(land_uses, cells, 210.0),
            es_act: ClassFields::with_value(veg_classes, cells, 0.0),
            ta: ClassFields::with_value(veg_classes, cells, 0.0),
            ew_ref: CellField::new(cells),
            rice_fraction,
            soil_fraction,
            mm_to_m3: CellField::with_value(cells, area_m2 * 0.001),
            m3_to_mm: CellField::with_value(cells, 1000.0 / area_m2),
        }
    }

    /// Seasonal evaporation cycle peaking in early July
    fn advance(&mut self, day: u16, rng: &mut StdRng) {
        self.calendar_day.fill(f64::from(day));
        let season = (2.0 * std::f64::consts::PI * (f64::from(day) - 100.0) / 365.0).sin();
        let ew_ref = (3.5 + 2.5 * season).max(0.2);
        for v in self.ew_ref.as_mut_slice() {
            *v = ew_ref * rng.random_range(0.9..1.1);
        }
        let rice = Vegetation::RainfedPrescribed.index();
        if let Some(es) = self.es_act.class_mut(rice) {
            es.fill(0.3 * ew_ref);
        }
        if let Some(ta) = self.ta.class_mut(rice) {
            ta.fill(0.4 * ew_ref);
        }
    }

    fn inputs(&self) -> StepInputs<'_> {
        StepInputs {
            calendar_day: &self.calendar_day,
            soil: SoilMoisture {
                w1: &self.w1,
                ws1: &self.ws1,
                wfc1: &self.wfc1,
            },
            evaporation: Evaporation {
                es_act: &self.es_act,
                ta: &self.ta,
                ew_ref: &self.ew_ref,
            },
            fractions: Fractions {
                rice: &self.rice_fraction,
                soil: &self.soil_fraction,
            },
            conversion: Conversion {
                mm_to_m3: &self.mm_to_m3,
                m3_to_mm: &self.m3_to_mm,
                dt_day: 1.0,
            },
        }
    }
}

fn season_maps(args: &Args, cells: usize, rng: &mut StdRng) -> InMemoryMaps {
    let spread = f64::from(args.planting_spread);
    let planting: Vec<f64> = (0..cells)
        .map(|_| {
            let offset = if spread > 0.0 {
                rng.random_range(-spread / 2.0..=spread / 2.0).round()
            } else {
                0.0
            };
            day_of_year(f64::from(args.planting_day) + offset)
        })
        .collect();
    let harvest: Vec<f64> = planting
        .iter()
        .map(|p| day_of_year(p + f64::from(args.season_length)))
        .collect();

    InMemoryMaps::new()
        .with(RICE_FLOODING, CellField::with_value(cells, args.flooding))
        .with(RICE_PERCOLATION, CellField::with_value(cells, args.percolation))
        .with(RICE_PLANTING_DAY_1, planting.into())
        .with(RICE_HARVEST_DAY_1, harvest.into())
        .with(RICE_PLANTING_DAY_2, CellField::new(cells))
        .with(RICE_HARVEST_DAY_2, CellField::new(cells))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Paddy Rice Irrigation Demo ===\n");

    let mask = CellMask::all_active(args.width, args.height);
    let cells = mask.active_count();
    let options = ModelOptions {
        rice_irrigation: true,
        water_use: !args.no_water_use,
    };
    let ctx = ModelContext::new(mask, options);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let maps = season_maps(&args, cells, &mut rng);

    let mut engine = match RiceIrrigation::with_schedule(&ctx, &maps, RiceSchedule::default()) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Setup failed: {e}");
            std::process::exit(1);
        }
    };

    let mut model = SyntheticModel::new(cells, args.cell_size, &mut rng);
    let mut upper_zone = ClassFields::new(Vegetation::ALL.len(), cells);

    println!(
        "Grid {}x{} ({} cells, {:.0} m), planting around day {}, {} day season\n",
        args.width, args.height, cells, args.cell_size, args.planting_day, args.season_length
    );
    println!(
        "{:>5} {:>14} {:>14} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "day", "abstr. [m3]", "to UZ [m3]", "sat", "flood", "grow", "dry", "drain"
    );

    let mut total_abstraction = 0.0;
    let mut total_return = 0.0;
    let interval = args.report_interval.max(1);

    for day in 1..=365_u16 {
        model.advance(day, &mut rng);
        let summary = match engine.step(&model.inputs(), &mut upper_zone) {
            Ok(summary) => summary,
            Err(e) => {
                error!("Step failed on day {day}: {e}");
                std::process::exit(1);
            }
        };
        total_abstraction += summary.total_abstraction_m3;
        total_return += summary.total_soil_return_m3;

        if day % interval == 0 || day == 365 {
            println!(
                "{:>5} {:>14.0} {:>14.0} {:>6} {:>6} {:>6} {:>6} {:>6}",
                day,
                summary.total_abstraction_m3,
                summary.total_soil_return_m3,
                summary.cells_in(RicePhase::Saturating),
                summary.cells_in(RicePhase::Flooding),
                summary.cells_in(RicePhase::Growing),
                summary.cells_in(RicePhase::DryDown),
                summary.cells_in(RicePhase::Draining),
            );
        }
    }

    let rice_uz = upper_zone
        .class(Vegetation::RainfedPrescribed.index())
        .map_or(0.0, CellField::sum);

    println!("\n=== Annual totals ===");
    println!("Surface water abstraction: {:.3e} m3", total_abstraction);
    println!("Returned to upper zone:    {:.3e} m3", total_return);
    println!(
        "Mean upper zone gain:      {:.1} mm",
        rice_uz / cells.max(1) as f64
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_year_wraps() {
        assert_eq!(day_of_year(1.0), 1.0);
        assert_eq!(day_of_year(365.0), 365.0);
        assert_eq!(day_of_year(366.0), 1.0);
        assert_eq!(day_of_year(0.0), 365.0);
        assert_eq!(day_of_year(-10.0), 355.0);
    }

    #[test]
    fn test_season_maps_cover_both_cycles() {
        let args = Args::parse_from(["paddy-rice-demo", "--planting-day", "300"]);
        let mut rng = StdRng::seed_from_u64(args.seed);
        let maps = season_maps(&args, 16, &mut rng);

        assert_eq!(maps.len(), 6);
        for name in [
            RICE_FLOODING,
            RICE_PERCOLATION,
            RICE_PLANTING_DAY_1,
            RICE_HARVEST_DAY_1,
            RICE_PLANTING_DAY_2,
            RICE_HARVEST_DAY_2,
        ] {
            assert!(maps.contains(name), "{name} missing");
        }
    }

    #[test]
    fn test_setup_fails_without_water_use() {
        let mask = CellMask::all_active(4, 4);
        let options = ModelOptions {
            rice_irrigation: true,
            water_use: false,
        };
        let ctx = ModelContext::new(mask, options);
        let args = Args::parse_from(["paddy-rice-demo"]);
        let mut rng = StdRng::seed_from_u64(args.seed);
        let maps = season_maps(&args, 16, &mut rng);

        assert!(RiceIrrigation::with_schedule(&ctx, &maps, RiceSchedule::default()).is_err());
    }
}
