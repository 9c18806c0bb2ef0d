use std::fmt::Write as _;

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Spinel-like powder pattern, 2θ 20° → 80° in 0.02° steps, whitespace
/// separated, with an instrument header the parser has to skip.
fn xrd_pattern(rng: &mut SimpleRng) -> String {
    // (2θ, FWHM-ish sigma, counts)
    let reflections = [
        (30.1, 0.08, 320.0),
        (35.5, 0.08, 1000.0),
        (37.1, 0.08, 90.0),
        (43.1, 0.09, 210.0),
        (53.4, 0.10, 110.0),
        (57.0, 0.10, 290.0),
        (62.6, 0.11, 400.0),
        (74.0, 0.12, 80.0),
    ];

    let mut out = String::new();
    out.push_str("; Synthetic diffractometer export\n");
    out.push_str("* Cu K-alpha, step 0.02 deg\n");
    out.push_str("2Theta    Intensity\n");
    for i in 0..3000 {
        let two_theta = 20.0 + i as f64 * 0.02;
        let signal: f64 = reflections
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(two_theta, mu, sigma, amp))
            .sum();
        let background = 40.0 - 0.2 * (two_theta - 20.0);
        let counts = (signal + background + rng.gauss(0.0, 2.0)).max(0.0);
        let _ = writeln!(out, "{two_theta:.2}    {counts:.1}");
    }
    out
}

/// Full M-H loop, +H → −H → +H, comma separated with a tab-delimited
/// metadata block in front.
fn mh_loop(rng: &mut SimpleRng) -> String {
    let ms = 68.0; // emu/g
    let hc = 120.0; // Oe
    let width = 450.0;
    let h_max = 10_000.0;

    let mut out = String::new();
    out.push_str("# VSM measurement\n");
    out.push_str("Temperature:\t300 K\n");
    out.push_str("Field (Oe), Moment (emu/g)\n");

    let steps = 400;
    let sweep = |k: usize| h_max - 2.0 * h_max * k as f64 / steps as f64;
    // descending branch, switching at -Hc
    for k in 0..=steps {
        let h = sweep(k);
        let m = ms * ((h + hc) / width).tanh() + rng.gauss(0.0, 0.05);
        let _ = writeln!(out, "{h:.1}, {m:.4}");
    }
    // ascending branch, switching at +Hc
    for k in (0..steps).rev() {
        let h = sweep(k);
        let m = ms * ((h - hc) / width).tanh() + rng.gauss(0.0, 0.05);
        let _ = writeln!(out, "{h:.1}, {m:.4}");
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let outputs = [
        ("sample_xrd.xy", xrd_pattern(&mut rng)),
        ("sample_mh_loop.dat", mh_loop(&mut rng)),
    ];

    for (path, contents) in outputs {
        std::fs::write(path, &contents).with_context(|| format!("writing {path}"))?;
        println!("Wrote {} lines to {path}", contents.lines().count());
    }
    Ok(())
}
