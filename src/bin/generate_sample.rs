use std::f64::consts::PI;

use anyhow::{Context, Result};

const SAMPLE_RATE_HZ: f64 = 256.0;
const CHANNELS: [&str; 4] = ["Fp1", "Fp2", "O1", "O2"];

/// Sum of sinusoids `(frequency Hz, amplitude µV)` at time `t`.
fn rhythm(t: f64, components: &[(f64, f64)]) -> f64 {
    components
        .iter()
        .map(|&(freq, amp)| amp * (2.0 * PI * freq * t).sin())
        .sum()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Write one recording: a `time` column plus one column per channel.
///
/// Every `dropout_every`-th row leaves `O2` empty to exercise the
/// missing-cell handling.
fn write_recording(
    path: &str,
    n_samples: usize,
    components: &[(f64, f64)],
    noise: f64,
    dropout_every: usize,
    rng: &mut SimpleRng,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;

    let mut header = vec!["time".to_string()];
    header.extend(CHANNELS.iter().map(|c| c.to_string()));
    writer.write_record(&header)?;

    for i in 0..n_samples {
        let t = i as f64 / SAMPLE_RATE_HZ;
        let mut record = vec![format!("{t:.4}")];
        for (ch, name) in CHANNELS.iter().enumerate() {
            // Small per-channel phase offset so channels are not identical.
            let value = rhythm(t + ch as f64 * 0.01, components) + rng.gauss(0.0, noise);
            if *name == "O2" && dropout_every > 0 && i % dropout_every == 0 {
                record.push(String::new());
            } else {
                record.push(format!("{value:.4}"));
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush().with_context(|| format!("flushing {path}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Eyes-closed rest: strong 10 Hz alpha with some theta.
    write_recording(
        "recording_1.csv",
        512,
        &[(10.0, 40.0), (6.0, 10.0)],
        4.0,
        0,
        &mut rng,
    )?;

    // Task: 20 Hz beta with residual alpha, slightly shorter.
    write_recording(
        "recording_2.csv",
        480,
        &[(20.0, 25.0), (10.0, 12.0)],
        6.0,
        97,
        &mut rng,
    )?;

    println!(
        "Wrote recording_1.csv (512 samples) and recording_2.csv (480 samples) with channels {}",
        CHANNELS.join(", ")
    );
    Ok(())
}
