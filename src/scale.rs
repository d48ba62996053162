//! Continuous position scales and their tick generators.
//!
//! Ticks follow the usual charting conventions: linear scales step by
//! 1, 2 or 5 × 10^k, log scales place ticks at `k·10^i` and label them with
//! SI prefixes.

/// Tick count requested by the axes when none is configured.
pub const DEFAULT_TICK_COUNT: usize = 10;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// One axis tick: the domain value and its (possibly empty) label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// A continuous mapping from data values to pixels.
pub trait Scale {
    /// Map a domain value to the output range. Values outside the domain are
    /// extrapolated, invalid values produce non-finite output.
    fn apply(&self, value: f64) -> f64;

    /// Output range as `(start, end)`.
    fn range(&self) -> (f64, f64);

    /// Generate roughly `count` labelled ticks inside the domain.
    fn ticks(&self, count: usize) -> Vec<Tick>;
}

// ---------------------------------------------------------------------------
// Linear
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

impl Scale for LinearScale {
    fn apply(&self, value: f64) -> f64 {
        let t = normalize(self.domain, value);
        interpolate(self.range, t)
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn ticks(&self, count: usize) -> Vec<Tick> {
        let (start, stop) = self.domain;
        let precision = fixed_precision(tick_step(start, stop, count as f64));
        linear_ticks(start, stop, count as f64)
            .into_iter()
            .map(|value| Tick {
                value,
                label: format_grouped(value, precision),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Logarithmic (base 10)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn tick_values(&self, count: usize) -> Vec<f64> {
        let (mut u, mut v) = self.domain;
        if !u.is_finite() || !v.is_finite() || u <= 0.0 || v <= 0.0 {
            return Vec::new();
        }
        let reverse = v < u;
        if reverse {
            std::mem::swap(&mut u, &mut v);
        }

        let n = count as f64;
        let (i, j) = (u.log10(), v.log10());
        let mut values = Vec::new();

        if j - i < n {
            let (lo, hi) = (i.floor() as i32, j.ceil() as i32);
            'decades: for p in lo..=hi {
                for k in 1..10 {
                    let t = if p < 0 {
                        k as f64 / 10f64.powi(-p)
                    } else {
                        k as f64 * 10f64.powi(p)
                    };
                    if t < u {
                        continue;
                    }
                    if t > v {
                        break 'decades;
                    }
                    values.push(t);
                }
            }
            if (values.len() as f64) * 2.0 < n {
                values = linear_ticks(u, v, n);
            }
        } else {
            values = linear_ticks(i, j, (j - i).min(n))
                .into_iter()
                .map(|e| 10f64.powf(e))
                .collect();
        }

        if reverse {
            values.reverse();
        }
        values
    }
}

impl Scale for LogScale {
    fn apply(&self, value: f64) -> f64 {
        let domain = (self.domain.0.log10(), self.domain.1.log10());
        interpolate(self.range, normalize(domain, value.log10()))
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn ticks(&self, count: usize) -> Vec<Tick> {
        let values = self.tick_values(count);
        // Dense decades only label the leading digits up to `limit`.
        let limit = (10.0 * count as f64 / values.len().max(1) as f64).max(1.0);
        values
            .into_iter()
            .map(|value| {
                let mut lead = value / 10f64.powf(js_round(value.log10()));
                if lead * 10.0 < 9.5 {
                    lead *= 10.0;
                }
                let label = if lead <= limit {
                    format_si(value)
                } else {
                    String::new()
                };
                Tick { value, label }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Shared numeric helpers
// ---------------------------------------------------------------------------

fn normalize((d0, d1): (f64, f64), value: f64) -> f64 {
    let span = d1 - d0;
    if span == 0.0 {
        0.5
    } else {
        (value - d0) / span
    }
}

fn interpolate((r0, r1): (f64, f64), t: f64) -> f64 {
    r0 * (1.0 - t) + r1 * t
}

/// Round half up, as chart libraries on the web do.
fn js_round(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Integer tick bounds and increment. A negative increment means "divide by".
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let div = 10f64.powf(-power) / factor;
        i1 = js_round(start * div);
        i2 = js_round(stop * div);
        if i1 / div < start {
            i1 += 1.0;
        }
        if i2 / div > stop {
            i2 -= 1.0;
        }
        inc = -div;
    } else {
        let mul = 10f64.powf(power) * factor;
        i1 = js_round(start / mul);
        i2 = js_round(stop / mul);
        if i1 * mul < start {
            i1 += 1.0;
        }
        if i2 * mul > stop {
            i2 -= 1.0;
        }
        inc = mul;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let (_, _, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

fn linear_ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let mut ticks: Vec<f64> = (0..n)
        .map(|k| {
            let i = i1 + k as f64;
            if inc < 0.0 {
                i / -inc
            } else {
                i * inc
            }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Decimal places needed to show values that are `step` apart.
fn fixed_precision(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Fixed-point with `,` thousands grouping: `1234.5` → `1,234.5`.
pub fn format_grouped(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        format!("−{grouped}")
    } else {
        grouped
    }
}

/// SI-prefixed with six significant digits and trailing zeros trimmed:
/// `20000` → `20k`, `1500` → `1.5k`.
pub fn format_si(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{:.5e}", value.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let prefix_exp = exponent.div_euclid(3).clamp(-8, 8);
    let int_len = exponent - prefix_exp * 3 + 1;
    let n = digits.len() as i32;

    let mut body = if int_len >= n {
        format!("{digits}{}", "0".repeat((int_len - n) as usize))
    } else if int_len > 0 {
        let (head, tail) = digits.split_at(int_len as usize);
        format!("{head}.{tail}")
    } else {
        format!("0.{}{digits}", "0".repeat((-int_len) as usize))
    };
    if body.contains('.') {
        let trimmed = body.trim_end_matches('0').trim_end_matches('.').len();
        body.truncate(trimmed);
    }

    let sign = if value < 0.0 { "−" } else { "" };
    format!("{sign}{body}{}", SI_PREFIXES[(prefix_exp + 8) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(ticks: &[Tick]) -> Vec<f64> {
        ticks.iter().map(|t| t.value).collect()
    }

    #[test]
    fn linear_maps_domain_ends_to_range_ends() {
        let x = LinearScale::new((0.0, 40.0), (0.0, 700.0));
        assert_eq!(x.apply(0.0), 0.0);
        assert_eq!(x.apply(40.0), 700.0);
        assert_eq!(x.apply(20.0), 350.0);
    }

    #[test]
    fn linear_degenerate_and_nan_domains() {
        let flat = LinearScale::new((0.0, 0.0), (0.0, 700.0));
        assert_eq!(flat.apply(3.0), 350.0);

        let nan = LinearScale::new((0.0, f64::NAN), (0.0, 700.0));
        assert!(nan.apply(3.0).is_nan());
        assert!(nan.ticks(DEFAULT_TICK_COUNT).is_empty());
    }

    #[test]
    fn linear_ticks_use_round_steps() {
        let x = LinearScale::new((0.0, 40.0), (0.0, 700.0));
        let ticks = x.ticks(DEFAULT_TICK_COUNT);
        assert_eq!(
            values(&ticks),
            vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0]
        );
        assert_eq!(ticks[1].label, "5");

        let x = LinearScale::new((0.0, 31.0), (0.0, 700.0));
        let v = values(&x.ticks(DEFAULT_TICK_COUNT));
        assert_eq!(v.first(), Some(&0.0));
        assert_eq!(v.last(), Some(&30.0));
        assert_eq!(v.len(), 16);
    }

    #[test]
    fn fractional_ticks_carry_decimals() {
        let x = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let ticks = x.ticks(5);
        assert_eq!(values(&ticks), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks[1].label, "0.2");
    }

    #[test]
    fn log_scale_is_inverted_and_monotone() {
        let y = LogScale::new((20000.0, 150000.0), (500.0, 0.0));
        assert!((y.apply(20000.0) - 500.0).abs() < 1e-9);
        assert!(y.apply(150000.0).abs() < 1e-9);

        let samples = [20000.0, 35000.0, 50000.0, 80000.0, 120000.0, 150000.0];
        for pair in samples.windows(2) {
            assert!(y.apply(pair[1]) < y.apply(pair[0]));
        }
    }

    #[test]
    fn log_scale_out_of_domain_is_not_finite() {
        let y = LogScale::new((20000.0, 150000.0), (500.0, 0.0));
        assert!(!y.apply(0.0).is_finite());
        assert!(y.apply(-5.0).is_nan());
    }

    #[test]
    fn log_ticks_cover_each_decade() {
        let y = LogScale::new((20000.0, 150000.0), (500.0, 0.0));
        let ticks = y.ticks(DEFAULT_TICK_COUNT);
        assert_eq!(
            values(&ticks),
            vec![
                20000.0, 30000.0, 40000.0, 50000.0, 60000.0, 70000.0, 80000.0, 90000.0, 100000.0
            ]
        );
        assert_eq!(ticks[0].label, "20k");
        assert_eq!(ticks[8].label, "100k");
    }

    #[test]
    fn dense_log_ticks_thin_their_labels() {
        let y = LogScale::new((20000.0, 2_000_000.0), (500.0, 0.0));
        let ticks = y.ticks(DEFAULT_TICK_COUNT);
        let label_of = |v: f64| {
            ticks
                .iter()
                .find(|t| t.value == v)
                .map(|t| t.label.clone())
                .unwrap()
        };
        assert_eq!(label_of(20000.0), "20k");
        assert_eq!(label_of(50000.0), "50k");
        assert_eq!(label_of(60000.0), "");
        assert_eq!(label_of(1_000_000.0), "1M");
    }

    #[test]
    fn grouped_and_si_formats() {
        assert_eq!(format_grouped(1234567.0, 0), "1,234,567");
        assert_eq!(format_grouped(-1500.25, 2), "−1,500.25");
        assert_eq!(format_grouped(-0.0, 0), "0");
        assert_eq!(format_si(20000.0), "20k");
        assert_eq!(format_si(1500.0), "1.5k");
        assert_eq!(format_si(0.25), "250m");
        assert_eq!(format_si(999.0), "999");
    }
}
