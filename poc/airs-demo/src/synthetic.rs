//! Synthetic three-class dataset.
//!
//! Each class is a Gaussian-ish blob in four numeric features on a
//! Fahrenheit-like scale, plus a nominal "sensor" attribute that agrees with
//! the class most of the time.

use airs::prelude::*;
use rand::Rng;

const CENTRES: [[f64; 4]; 3] = [
    [20.0, 40.0, 60.0, 80.0],
    [60.0, 80.0, 20.0, 40.0],
    [40.0, 20.0, 80.0, 60.0],
];
const SPREAD: f64 = 9.0;
const SENSOR_AGREEMENT: f64 = 0.8;

pub fn schema() -> Result<Schema> {
    Schema::builder()
        .numeric("intake")
        .numeric("exhaust")
        .numeric("coolant")
        .numeric("ambient")
        .nominal("sensor", 3)
        .class("regime", 3)
        .build()
}

/// `per_class` records of every class, interleaved by class.
pub fn generate<R: Rng + ?Sized>(per_class: usize, rng: &mut R) -> Result<Dataset> {
    let mut data = Dataset::new(schema()?);
    for _ in 0..per_class {
        for (class, centre) in CENTRES.iter().enumerate() {
            let mut record: Vec<f64> = centre
                .iter()
                .map(|c| c + noise(rng) * SPREAD)
                .collect();
            let sensor = if rng.gen_bool(SENSOR_AGREEMENT) {
                class
            } else {
                rng.gen_range(0..3)
            };
            record.push(sensor as f64);
            record.push(class as f64);
            data.push(record)?;
        }
    }
    Ok(data)
}

// Sum of three uniforms: bell-shaped, bounded to [-1.5, 1.5].
fn noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (0..3).map(|_| rng.gen_range(-0.5..0.5)).sum()
}
