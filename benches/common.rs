// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use gitgrowth::model::GrowthStatistics;

/// Synthetic traversal output with `num_objects` records.
///
/// One commit and one tree per ten objects; the rest are blobs spread over
/// a few hundred paths so the per-path map sees repeats.
pub fn generate_output(num_objects: usize, id_offset: usize) -> String {
    let mut out = String::with_capacity(num_objects * 64);
    for i in 0..num_objects {
        let id = format!("{:040x}", i + id_offset);
        match i % 10 {
            0 => out.push_str(&format!("commit {} {} \n", id, 180 + i % 50)),
            1 => out.push_str(&format!("tree {} {} \n", id, 90 + i % 400)),
            _ => out.push_str(&format!(
                "blob {} {} src/mod_{}/file_{}.rs\n",
                id,
                i % 4096,
                i % 17,
                i % 300
            )),
        }
    }
    out
}

/// Cumulative series growing by `rate` per year, starting at 1,000 commits
pub fn generate_series(years: usize, rate: f64) -> Vec<GrowthStatistics> {
    let mut value = 1_000.0_f64;
    (0..years)
        .map(|i| {
            let v = value as u64;
            value *= 1.0 + rate;
            GrowthStatistics::new(2000 + i as i32, v, v * 3, v * 5, v * 4096)
        })
        .collect()
}
