use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;

/// One synthetic Monte-Carlo result row, in the column layout of the
/// published diet dataset (more columns than the explorer keeps).
#[derive(Serialize)]
struct DietRow<'a> {
    grouping: String,
    mc_run_id: u32,
    diet_group: &'a str,
    sex: &'a str,
    age_group: &'a str,
    mean_ghgs: f64,
    mean_land: f64,
    mean_watscar: f64,
    mean_eut: f64,
    mean_bio: f64,
    mean_watuse: f64,
    mean_acid: f64,
    n_participants: u32,
}

/// Per-diet baselines: (ghgs, land, watscar, eut, bio, watuse, acid).
const DIETS: [(&str, [f64; 7]); 6] = [
    ("vegan", [2.47, 2.52, 24_060.0, 13.6, 0.21, 506.0, 15.4]),
    ("veggie", [3.81, 4.47, 32_530.0, 19.4, 0.29, 613.0, 24.1]),
    ("fish", [4.26, 4.99, 36_450.0, 22.3, 0.36, 695.0, 28.4]),
    ("meat50", [4.68, 5.93, 37_480.0, 23.9, 0.33, 713.0, 32.2]),
    ("meat", [5.63, 7.88, 39_590.0, 27.7, 0.37, 742.0, 41.1]),
    ("meat100", [10.24, 17.93, 54_420.0, 45.6, 0.51, 885.0, 82.7]),
];
const SEXES: [(&str, f64); 2] = [("female", 0.92), ("male", 1.09)];
const AGE_GROUPS: [(&str, f64); 6] = [
    ("20-29", 0.97),
    ("30-39", 1.0),
    ("40-49", 1.03),
    ("50-59", 1.04),
    ("60-69", 1.01),
    ("70-79", 0.95),
];
const MC_RUNS: u32 = 10;

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(1.0, 0.04).context("building noise distribution")?;

    let output_path = "diet_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut rows = 0usize;
    for mc_run_id in 1..=MC_RUNS {
        for (diet, base) in &DIETS {
            for &(sex, sex_factor) in &SEXES {
                for &(age, age_factor) in &AGE_GROUPS {
                    let scale = sex_factor * age_factor;
                    let mut draw = |i: usize| base[i] * scale * noise.sample(&mut rng);
                    let row = DietRow {
                        grouping: format!("{diet}_{sex}_{age}"),
                        mc_run_id,
                        diet_group: diet,
                        sex,
                        age_group: age,
                        mean_ghgs: draw(0),
                        mean_land: draw(1),
                        mean_watscar: draw(2),
                        mean_eut: draw(3),
                        mean_bio: draw(4),
                        mean_watuse: draw(5),
                        mean_acid: draw(6),
                        n_participants: rng.gen_range(20..2_000),
                    };
                    writer.serialize(&row).context("writing row")?;
                    rows += 1;
                }
            }
        }
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {rows} rows ({} diets x {} sexes x {} age groups x {MC_RUNS} runs) to {output_path}",
        DIETS.len(),
        SEXES.len(),
        AGE_GROUPS.len()
    );
    Ok(())
}
