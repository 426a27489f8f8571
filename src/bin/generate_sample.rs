//! Writes a synthetic `Health_Dataset.csv` for trying the dashboard out.

use std::f64::consts::TAU;

use serde::Serialize;

/// SplitMix64. Seeded, so every run writes the same file.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `(0, 1]`.
    fn unit(&mut self) -> f64 {
        ((self.next_u64() >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    /// Normal draw via Box-Muller, cosine branch only.
    fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        let radius = (-2.0 * self.unit().ln()).sqrt();
        let theta = TAU * self.unit();
        mean + sd * radius * theta.cos()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One output row, column names as the dashboard expects them.
#[derive(Serialize)]
struct Row {
    age: i64,
    gender: &'static str,
    height: f64,
    weight: f64,
    steps: i64,
    calories: f64,
    activity: &'static str,
    distance: f64,
    heart_rate: f64,
    resting_heart: f64,
    norm_heart: f64,
}

/// (name, steps per km, kcal per km, heart-rate uplift over normal)
const ACTIVITIES: [(&str, f64, f64, f64); 4] = [
    ("walking", 1300.0, 55.0, 20.0),
    ("running", 1000.0, 75.0, 60.0),
    ("cycling", 150.0, 30.0, 45.0),
    ("sitting", 0.0, 0.0, 0.0),
];

fn round_to(v: f64, step: f64) -> f64 {
    (v / step).round() * step
}

fn generate(rng: &mut SampleRng) -> Row {
    let gender = *rng.pick(&["M", "F"]);
    let (height_mean, weight_mean) = if gender == "M" { (177.0, 80.0) } else { (164.0, 65.0) };
    let &(activity, steps_per_km, kcal_per_km, uplift) = rng.pick(&ACTIVITIES);

    let distance = if steps_per_km == 0.0 {
        0.0
    } else {
        rng.normal(6.0, 3.0).clamp(0.3, 40.0)
    };
    let resting = rng.normal(64.0, 7.0).clamp(45.0, 95.0);
    let normal = resting + rng.normal(12.0, 4.0).abs();

    Row {
        age: rng.normal(42.0, 14.0).clamp(18.0, 85.0).round() as i64,
        gender,
        // Whole centimetres / half kilograms so that equality filters hit.
        height: round_to(rng.normal(height_mean, 7.0), 1.0),
        weight: round_to(rng.normal(weight_mean, 11.0), 0.5),
        steps: (distance * steps_per_km + rng.normal(2500.0, 800.0).max(0.0)).round() as i64,
        calories: round_to(distance * kcal_per_km + rng.normal(90.0, 25.0).max(10.0), 0.1),
        activity,
        distance: round_to(distance, 0.01),
        heart_rate: round_to(normal + uplift + rng.normal(0.0, 6.0), 1.0),
        resting_heart: round_to(resting, 1.0),
        norm_heart: round_to(normal, 1.0),
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = SampleRng(42);
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "Health_Dataset.csv".to_string());
    let rows = 500;

    let mut writer = csv::Writer::from_path(&output_path)?;
    for _ in 0..rows {
        writer.serialize(generate(&mut rng))?;
    }
    writer.flush()?;

    println!("Wrote {rows} records to {output_path}");
    Ok(())
}
